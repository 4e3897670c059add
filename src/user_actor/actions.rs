/// Membership actions on a single user's relationship lists.
///
/// Each action touches exactly one record. Pairing a `following` change with
/// the matching `followers` change on the other user is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Adds the id to `following`. No-op if already present.
    AddFollowing(String),
    /// Removes the id from `following`. No-op if absent.
    RemoveFollowing(String),
    /// Adds the id to `followers`. No-op if already present.
    AddFollower(String),
    /// Removes the id from `followers`. No-op if absent.
    RemoveFollower(String),
}

/// Outcome of a [`UserAction`]: the record after the action, and whether the
/// list actually changed.
#[derive(Debug, Clone)]
pub struct MembershipChange {
    pub user: crate::domain::User,
    pub changed: bool,
}
