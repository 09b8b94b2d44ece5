//! Profile aggregate
//!
//! Contains the Profile entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use dto_create::CreateProfileDto;
pub use dto_get::GetProfilesDto;
pub use dto_update::UpdateProfileDto;
pub use model::Profile;
pub use repository::ProfileRepositoryInterface;
