use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use super::error::ApiError;
use super::AppState;
use crate::domain::User;

/// The authenticated actor of a private route.
///
/// Resolved from `Authorization: Bearer <token>`; the token's subject must
/// still exist in the store. Rejection happens before the body is read.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Not authorized, no token".to_string()))?;

        let user_id = state.tokens.verify(token.trim()).inspect_err(|e| {
            debug!(error = %e, "Bearer token rejected");
        })?;

        let user = state
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Not authorized, user no longer exists".to_string()))?;

        Ok(AuthUser(user))
    }
}
