//! Quotation log module: CRUD plus code suggestion and availability probe

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
