use tracing::{debug, instrument};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::{normalize_email, MembershipChange, UserAction, UserError};
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, payload), fields(user_email = %payload.email))]
    pub async fn create_user(&self, payload: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(UserError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(UserError::from)
    }

    /// Looks a user up by email, after the same normalization applied on create.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let Ok(email) = normalize_email(email) else {
            return Ok(None);
        };
        self.inner
            .find(move |u: &User| u.email == email)
            .await
            .map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn add_following(&self, id: String, target: String) -> Result<MembershipChange, UserError> {
        self.membership(id, UserAction::AddFollowing(target)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_following(&self, id: String, target: String) -> Result<MembershipChange, UserError> {
        self.membership(id, UserAction::RemoveFollowing(target)).await
    }

    #[instrument(skip(self))]
    pub async fn add_follower(&self, id: String, follower: String) -> Result<MembershipChange, UserError> {
        self.membership(id, UserAction::AddFollower(follower)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_follower(&self, id: String, follower: String) -> Result<MembershipChange, UserError> {
        self.membership(id, UserAction::RemoveFollower(follower)).await
    }

    async fn membership(&self, id: String, action: UserAction) -> Result<MembershipChange, UserError> {
        debug!("Sending request");
        self.inner.perform_action(id, action).await.map_err(UserError::from)
    }
}
