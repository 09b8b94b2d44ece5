//! Requirement registration module ("Detalle Reqs")

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
