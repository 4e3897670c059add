//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get_many`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test owns instead of a running
/// `ResourceActor`, so the test decides every reply (success, failure,
/// missing entity) and can check the exact request sequence.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetMany request
pub async fn expect_get_many<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::GetMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::clients::{RelationshipManager, UserClient};
    use crate::domain::User;
    use crate::user_actor::{MembershipChange, UserAction, UserError};

    fn user(id: &str, name: &str) -> User {
        let now = Utc::now();
        User {
            id: id.into(),
            name: name.into(),
            email: format!("{name}@example.com"),
            password_hash: "hash".into(),
            about: String::new(),
            photo: None,
            following: Vec::new(),
            followers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_follow_issues_both_halves_in_order() {
        let (inner, mut rx) = create_mock_client::<User>(10);
        let manager = RelationshipManager::new(UserClient::new(inner));

        let task = tokio::spawn(async move { manager.follow("alice", "bob").await });

        // First half: target's followers list.
        let (id, action, responder) = expect_action(&mut rx).await.expect("Expected follower update");
        assert_eq!(id, "bob");
        assert_eq!(action, UserAction::AddFollower("alice".into()));
        let mut bob = user("bob", "bob");
        bob.followers.push("alice".into());
        responder.send(Ok(MembershipChange { user: bob, changed: true })).unwrap();

        // Second half: actor's following list.
        let (id, action, responder) = expect_action(&mut rx).await.expect("Expected following update");
        assert_eq!(id, "alice");
        assert_eq!(action, UserAction::AddFollowing("bob".into()));
        let mut alice = user("alice", "alice");
        alice.following.push("bob".into());
        responder.send(Ok(MembershipChange { user: alice.clone(), changed: true })).unwrap();

        // Expansion of bob's lists.
        let (ids, responder) = expect_get_many(&mut rx).await.expect("Expected expansion lookup");
        assert_eq!(ids, vec!["alice".to_string()]);
        responder.send(Ok(vec![alice])).unwrap();

        let profile = task.await.unwrap().unwrap();
        assert_eq!(profile.id, "bob");
        assert_eq!(profile.followers[0].name, "alice");
    }

    #[tokio::test]
    async fn test_unknown_target_fails_before_actor_is_written() {
        let (inner, mut rx) = create_mock_client::<User>(10);
        let manager = RelationshipManager::new(UserClient::new(inner));

        let task = tokio::spawn(async move { manager.follow("alice", "ghost").await });

        let (id, _, responder) = expect_action(&mut rx).await.expect("Expected follower update");
        assert_eq!(id, "ghost");
        responder.send(Err(FrameworkError::NotFound("ghost".into()))).unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), UserError::NotFound("ghost".into()));
        // No request ever reached alice's record.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_follow_compensates_when_following_side_fails() {
        let (inner, mut rx) = create_mock_client::<User>(10);
        let manager = RelationshipManager::new(UserClient::new(inner));

        let task = tokio::spawn(async move { manager.follow("alice", "bob").await });

        let (_, _, responder) = expect_action(&mut rx).await.expect("Expected follower update");
        responder.send(Ok(MembershipChange { user: user("bob", "bob"), changed: true })).unwrap();

        let (id, _, responder) = expect_action(&mut rx).await.expect("Expected following update");
        assert_eq!(id, "alice");
        responder.send(Err(FrameworkError::NotFound("alice".into()))).unwrap();

        let (id, action, responder) = expect_action(&mut rx).await.expect("Expected compensation");
        assert_eq!(id, "bob");
        assert_eq!(action, UserAction::RemoveFollower("alice".into()));
        responder.send(Ok(MembershipChange { user: user("bob", "bob"), changed: true })).unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), UserError::NotFound("alice".into()));
    }

    #[tokio::test]
    async fn test_no_compensation_when_first_half_was_noop() {
        let (inner, mut rx) = create_mock_client::<User>(10);
        let manager = RelationshipManager::new(UserClient::new(inner));

        let task = tokio::spawn(async move { manager.follow("alice", "bob").await });

        let (_, _, responder) = expect_action(&mut rx).await.expect("Expected follower update");
        responder.send(Ok(MembershipChange { user: user("bob", "bob"), changed: false })).unwrap();

        let (_, _, responder) = expect_action(&mut rx).await.expect("Expected following update");
        responder.send(Err(FrameworkError::NotFound("alice".into()))).unwrap();

        assert!(task.await.unwrap().is_err());
        // The manager dropped its client, so the channel drains to None.
        assert!(rx.recv().await.is_none());
    }
}
