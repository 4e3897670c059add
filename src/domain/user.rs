use chrono::{DateTime, Utc};
use serde::Serialize;

/// Represents a registered user in the system.
///
/// `password_hash` never leaves the process: the type is not `Serialize`, and
/// every outbound shape ([`UserProfile`], [`UserSummary`]) is built without it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub about: String,
    pub photo: Option<String>,
    /// Ids this user follows. Weak references: entries may outlive the user
    /// they point at.
    pub following: Vec<String>,
    /// Ids following this user.
    pub followers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub about: String,
}

/// Payload for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    pub photo: Option<String>,
    pub password_hash: Option<String>,
}

/// `{id, name}` pair used when expanding relationship lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedUser {
    pub id: String,
    pub name: String,
}

impl From<&User> for RelatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

/// Scrubbed user with expanded relationship lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub about: String,
    pub photo: Option<String>,
    pub following: Vec<RelatedUser>,
    pub followers: Vec<RelatedUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the public user listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl User {
    /// Builds the scrubbed profile. `related` is looked up by id; ids with no
    /// matching entry are dropped.
    pub fn to_profile(&self, related: &[User]) -> UserProfile {
        let expand = |ids: &[String]| -> Vec<RelatedUser> {
            ids.iter()
                .filter_map(|id| related.iter().find(|u| &u.id == id))
                .map(RelatedUser::from)
                .collect()
        };

        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            about: self.about.clone(),
            photo: self.photo.clone(),
            following: expand(&self.following),
            followers: expand(&self.followers),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Union of both relationship lists, without repeats.
    pub fn related_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.following.len() + self.followers.len());
        for id in self.following.iter().chain(&self.followers) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        let now = Utc::now();
        User {
            id: id.into(),
            name: name.into(),
            email: format!("{name}@example.com"),
            password_hash: "$argon2id$secret".into(),
            about: String::new(),
            photo: None,
            following: Vec::new(),
            followers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn profile_expands_and_skips_dangling_ids() {
        let mut alice = user("a", "alice");
        alice.following = vec!["b".into(), "gone".into()];
        alice.followers = vec!["b".into()];
        let bob = user("b", "bob");

        let profile = alice.to_profile(&[bob]);
        let bob_ref = RelatedUser { id: "b".into(), name: "bob".into() };
        assert_eq!(profile.following, vec![bob_ref.clone()]);
        assert_eq!(profile.followers, vec![bob_ref]);
    }

    #[test]
    fn profile_json_has_no_secret() {
        let profile = user("a", "alice").to_profile(&[]);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn related_ids_are_unique() {
        let mut alice = user("a", "alice");
        alice.following = vec!["b".into(), "c".into()];
        alice.followers = vec!["c".into(), "d".into()];
        assert_eq!(alice.related_ids(), vec!["b", "c", "d"]);
    }
}
