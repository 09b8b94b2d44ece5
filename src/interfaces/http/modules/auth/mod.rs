//! Authentication module: login, register, current profile and password change

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
