//! Profile administration module: accounts, roles and permission overrides

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
