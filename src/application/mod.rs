pub mod identity;

pub use identity::{AuthResult, ProfileService};
