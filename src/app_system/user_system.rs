use tracing::{error, info};
use uuid::Uuid;
use crate::actor_framework::ResourceActor;
use crate::clients::{RelationshipManager, UserClient};
use crate::config::Config;
use crate::domain::User;

/// Starts the user store actor and wires the clients that talk to it.
pub struct UserSystem {
    pub user_client: UserClient,
    pub relationships: RelationshipManager,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    pub fn new(config: &Config) -> Self {
        let next_user_id = || Uuid::new_v4().to_string();

        let (user_actor, user_resource_client) = ResourceActor::<User>::new(config.store_buffer, next_user_id);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let relationships = RelationshipManager::new(user_client.clone());

        info!("User system started");
        Self {
            user_client,
            relationships,
            handles: vec![user_handle],
        }
    }

    /// Drops this system's handles and waits for the actor to drain.
    ///
    /// The actor only stops once every clone of the client is gone, so the
    /// HTTP server must be shut down first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.relationships);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
