use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::error::{ApiError, ApiResult};
use super::extract::AuthUser;
use super::AppState;
use crate::auth::password::{hash_password_blocking, reject_unknown_blocking, verify_password_blocking};
use crate::domain::{User, UserCreate, UserPatch, UserProfile, UserSummary};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub about: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    pub photo: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub follow_id: String,
}

/// Returned by register and login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub about: String,
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub about: String,
    pub photo: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub token: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub about: String,
    pub photo: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            about: user.about,
            token,
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = payload?;
    if request.password.is_empty() {
        return Err(ApiError::Validation("password is required".to_string()));
    }

    let password_hash = hash_password_blocking(request.password).await?;
    let id = state
        .users
        .create_user(UserCreate {
            name: request.name,
            email: request.email,
            password_hash,
            about: request.about,
        })
        .await?;

    let user = state
        .users
        .get_user(id.clone())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    let token = state.tokens.issue(&id)?;

    info!(user_id = %id, "User registered");
    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}

/// Every user, oldest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<UserSummary>>> {
    let mut users = state.users.list_users().await?;
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(Json(users.iter().map(UserSummary::from).collect()))
}

#[instrument(skip(state))]
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.relationships.profile(&id).await?))
}

#[instrument(skip(state, actor, payload), fields(actor_id = %actor.id))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    ensure_owner(&actor, &id)?;
    let Json(request) = payload?;

    let password_hash = match request.password.filter(|p| !p.is_empty()) {
        Some(password) => Some(hash_password_blocking(password).await?),
        None => None,
    };
    let patch = UserPatch {
        name: request.name,
        email: request.email,
        about: request.about,
        photo: request.photo,
        password_hash,
    };

    let user = state.users.update_user(id, patch).await?;
    let token = state.tokens.issue(&user.id)?;

    info!("Profile updated");
    Ok(Json(UpdateResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        about: user.about,
        photo: user.photo,
        updated_at: user.updated_at,
        token,
    }))
}

/// Deletes the caller's own account. Other users' relationship lists keep
/// the id; expansion skips it from then on.
#[instrument(skip(state, actor), fields(actor_id = %actor.id))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    ensure_owner(&actor, &id)?;
    state.users.delete_user(id).await?;

    info!("User deleted");
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(request) = payload?;
    let invalid = || ApiError::AuthFailure("Invalid email or password".to_string());

    let Some(user) = state.users.find_by_email(&request.email).await? else {
        reject_unknown_blocking(request.password).await;
        return Err(invalid());
    };
    if !verify_password_blocking(request.password, user.password_hash.clone()).await {
        return Err(invalid());
    }

    let token = state.tokens.issue(&user.id)?;
    info!(user_id = %user.id, "User logged in");
    Ok(Json(AuthResponse::new(user, token)))
}

#[instrument(skip(state, actor), fields(actor_id = %actor.id))]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let user = state
        .users
        .get_user(actor.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        about: user.about,
        photo: user.photo,
    }))
}

/// Caller follows `followId`. Returns the followed user's profile.
///
/// Routed as `PUT`. Older clients sent this as a `GET` with a JSON body;
/// that verb is not served.
#[instrument(skip(state, actor, payload), fields(actor_id = %actor.id))]
pub async fn follow(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    payload: Result<Json<FollowRequest>, JsonRejection>,
) -> ApiResult<Json<UserProfile>> {
    let Json(request) = payload?;
    let profile = state.relationships.follow(&actor.id, &request.follow_id).await?;
    Ok(Json(profile))
}

/// Caller stops following `followId`. Returns the unfollowed user's profile.
///
/// Routed as `PUT`, like [`follow`].
#[instrument(skip(state, actor, payload), fields(actor_id = %actor.id))]
pub async fn unfollow(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    payload: Result<Json<FollowRequest>, JsonRejection>,
) -> ApiResult<Json<UserProfile>> {
    let Json(request) = payload?;
    let profile = state.relationships.unfollow(&actor.id, &request.follow_id).await?;
    Ok(Json(profile))
}

fn ensure_owner(actor: &User, id: &str) -> Result<(), ApiError> {
    if actor.id != id {
        return Err(ApiError::Unauthorized("Not authorized to modify this user".to_string()));
    }
    Ok(())
}
