//! Domain layer: pure business types and seams.

pub mod error;
pub mod permissions;
pub mod profile;
pub mod quote_code;

pub use error::{DomainError, DomainResult};
pub use permissions::{
    apply_overrides, permissions_for_role, resolve_effective, LogColumn, PermissionOverrides,
    Role, RolePermissions, Section,
};
pub use profile::{
    CreateProfileDto, GetProfilesDto, Profile, ProfileRepositoryInterface, UpdateProfileDto,
};
