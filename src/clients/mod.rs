//! Typed handles over the generic resource clients.

#[macro_use]
mod macros;
mod relationship_manager;
mod user_client;

pub use relationship_manager::*;
pub use user_client::*;
