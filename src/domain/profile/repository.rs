use async_trait::async_trait;
use serde_json::Value;

use super::{CreateProfileDto, GetProfilesDto, Profile, UpdateProfileDto};
use crate::domain::permissions::Role;
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait ProfileRepositoryInterface: Send + Sync {
    async fn create_profile(&self, dto: CreateProfileDto) -> DomainResult<Profile>;

    async fn list_profiles(&self, dto: GetProfilesDto) -> DomainResult<PaginatedResult<Profile>>;
    async fn get_profile_by_email(&self, email: &str) -> DomainResult<Option<Profile>>;
    async fn get_profile_by_id(&self, id: &str) -> DomainResult<Option<Profile>>;
    async fn count_profiles(&self) -> DomainResult<u64>;

    async fn update_profile(
        &self,
        id: &str,
        dto: UpdateProfileDto,
    ) -> DomainResult<Option<Profile>>;
    async fn set_role(&self, id: &str, role: Option<Role>) -> DomainResult<Option<Profile>>;
    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<Option<Profile>>;
    async fn set_permission_overrides(
        &self,
        id: &str,
        overrides: Option<Value>,
    ) -> DomainResult<Option<Profile>>;
    async fn update_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
    async fn delete_profile(&self, id: &str) -> DomainResult<()>;
}
