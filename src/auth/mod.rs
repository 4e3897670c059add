//! Auth gate: bearer tokens and password hashing.

pub mod password;
pub mod token;

use thiserror::Error;

pub use token::TokenIssuer;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token signing failed: {0}")]
    Signing(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
