use tracing::{error, info, instrument, warn};
use crate::clients::UserClient;
use crate::domain::{User, UserProfile};
use crate::user_actor::{MembershipChange, UserError};

/// Maintains the follow graph across user records.
///
/// Every single-sided operation mutates exactly one record through the user
/// actor, so each half is atomic on its own. [`follow`](Self::follow) and
/// [`unfollow`](Self::unfollow) chain the two halves and compensate the first
/// when the second fails.
#[derive(Clone)]
pub struct RelationshipManager {
    users: UserClient,
}

impl RelationshipManager {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// Adds `target` to `actor.following`.
    ///
    /// `target` is not resolved: relationship ids are weak references.
    #[instrument(skip(self))]
    pub async fn add_following(&self, actor: &str, target: &str) -> Result<MembershipChange, UserError> {
        ensure_distinct(actor, target)?;
        self.users.add_following(actor.to_string(), target.to_string()).await
    }

    /// Adds `actor` to `target.followers` and returns the scrubbed target.
    #[instrument(skip(self))]
    pub async fn add_follower(&self, actor: &str, target: &str) -> Result<UserProfile, UserError> {
        ensure_distinct(actor, target)?;
        let change = self.users.add_follower(target.to_string(), actor.to_string()).await?;
        self.expand(&change.user).await
    }

    /// Removes `target` from `actor.following`.
    #[instrument(skip(self))]
    pub async fn remove_following(&self, actor: &str, target: &str) -> Result<MembershipChange, UserError> {
        ensure_distinct(actor, target)?;
        self.users.remove_following(actor.to_string(), target.to_string()).await
    }

    /// Removes `actor` from `target.followers` and returns the scrubbed target.
    #[instrument(skip(self))]
    pub async fn remove_follower(&self, actor: &str, target: &str) -> Result<UserProfile, UserError> {
        ensure_distinct(actor, target)?;
        let change = self.users.remove_follower(target.to_string(), actor.to_string()).await?;
        self.expand(&change.user).await
    }

    /// `actor` follows `target`: both halves, or neither if the second fails.
    ///
    /// The target's side is written first, so an unknown target fails before
    /// the actor's record is touched.
    #[instrument(skip(self))]
    pub async fn follow(&self, actor: &str, target: &str) -> Result<UserProfile, UserError> {
        ensure_distinct(actor, target)?;
        let first = self.users.add_follower(target.to_string(), actor.to_string()).await?;
        if let Err(e) = self.users.add_following(actor.to_string(), target.to_string()).await {
            warn!(error = %e, "Following update failed");
            if first.changed {
                if let Err(undo) = self.users.remove_follower(target.to_string(), actor.to_string()).await {
                    error!(error = %undo, "Compensating remove_follower failed, graph left asymmetric");
                }
            }
            return Err(e);
        }
        info!("Follow recorded");
        self.expand(&first.user).await
    }

    /// `actor` stops following `target`. Mirrors [`follow`](Self::follow):
    /// target side first, restored if the actor's side cannot be updated.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, actor: &str, target: &str) -> Result<UserProfile, UserError> {
        ensure_distinct(actor, target)?;
        let first = self.users.remove_follower(target.to_string(), actor.to_string()).await?;
        if let Err(e) = self.users.remove_following(actor.to_string(), target.to_string()).await {
            warn!(error = %e, "Following update failed");
            if first.changed {
                if let Err(undo) = self.users.add_follower(target.to_string(), actor.to_string()).await {
                    error!(error = %undo, "Compensating add_follower failed, graph left asymmetric");
                }
            }
            return Err(e);
        }
        info!("Unfollow recorded");
        self.expand(&first.user).await
    }

    /// Resolves `following`/`followers` to `{id, name}` in one store round-trip.
    pub async fn expand(&self, user: &User) -> Result<UserProfile, UserError> {
        let related = self.users.get_users(user.related_ids()).await?;
        Ok(user.to_profile(&related))
    }

    /// Expanded profile for `id`, or `NotFound`.
    #[instrument(skip(self))]
    pub async fn profile(&self, id: &str) -> Result<UserProfile, UserError> {
        let user = self
            .users
            .get_user(id.to_string())
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        self.expand(&user).await
    }
}

fn ensure_distinct(actor: &str, target: &str) -> Result<(), UserError> {
    if actor == target {
        return Err(UserError::ValidationError("a user cannot follow itself".to_string()));
    }
    Ok(())
}
