//! Catalog module: dropdown options and contact directories

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
