//! User-specific domain logic, including follow-graph membership actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::normalize_email;
pub use error::*;
