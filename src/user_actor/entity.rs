use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};
use super::actions::{MembershipChange, UserAction};

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = MembershipChange;

    fn id(&self) -> &String { &self.id }

    /// Creates a new User from creation parameters.
    ///
    /// Name and email are trimmed, email is lowercased. Both are required.
    fn from_create(id: String, payload: UserCreate) -> Result<Self, String> {
        let name = required("name", &payload.name)?;
        let email = normalize_email(&payload.email)?;
        if payload.password_hash.is_empty() {
            return Err("password is required".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id,
            name,
            email,
            password_hash: payload.password_hash,
            about: payload.about.trim().to_string(),
            photo: None,
            following: Vec::new(),
            followers: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.email == other.email).then(|| format!("email already registered: {}", self.email))
    }

    /// Updates the user's profile information.
    ///
    /// Empty strings count as "not provided" and leave the field as it was.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = provided(patch.name) {
            self.name = required("name", &name)?;
        }
        if let Some(email) = provided(patch.email) {
            self.email = normalize_email(&email)?;
        }
        if let Some(about) = provided(patch.about) {
            self.about = about.trim().to_string();
        }
        if let Some(photo) = provided(patch.photo) {
            self.photo = Some(photo);
        }
        if let Some(password_hash) = provided(patch.password_hash) {
            self.password_hash = password_hash;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<MembershipChange, String> {
        let changed = match action {
            UserAction::AddFollowing(id) => insert(&mut self.following, id),
            UserAction::RemoveFollowing(id) => remove(&mut self.following, &id),
            UserAction::AddFollower(id) => insert(&mut self.followers, id),
            UserAction::RemoveFollower(id) => remove(&mut self.followers, &id),
        };
        if changed {
            self.updated_at = Utc::now();
        }
        Ok(MembershipChange { user: self.clone(), changed })
    }
}

fn insert(ids: &mut Vec<String>, id: String) -> bool {
    if ids.contains(&id) {
        return false;
    }
    ids.push(id);
    true
}

fn remove(ids: &mut Vec<String>, id: &str) -> bool {
    let before = ids.len();
    ids.retain(|existing| existing != id);
    ids.len() != before
}

fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(field: &str, value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(value.to_string())
}

/// Trims and lowercases an email, rejecting anything without a `local@domain` shape.
pub fn normalize_email(email: &str) -> Result<String, String> {
    let email = required("email", email)?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => Ok(email),
        _ => Err(format!("invalid email: {email}")),
    }
}
