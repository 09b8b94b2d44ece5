use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde_json::Value;

use crate::domain::{
    CreateProfileDto, DomainError, DomainResult, GetProfilesDto, Profile,
    ProfileRepositoryInterface, Role, UpdateProfileDto,
};
use crate::infrastructure::database::entities::profile;
use crate::shared::PaginatedResult;

pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: profile::Model) -> Profile {
    Profile {
        id: model.id,
        email: model.email,
        display_name: model.display_name,
        password_hash: model.password_hash,
        role: model.role,
        is_active: model.is_active,
        permissions: model.permissions,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn insert_err(e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict("Email already exists".to_string())
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ProfileRepositoryInterface for ProfileRepository {
    async fn create_profile(&self, dto: CreateProfileDto) -> DomainResult<Profile> {
        use crate::infrastructure::crypto::password::hash_password;

        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let password_hash = hash_password(&dto.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let new_profile = profile::ActiveModel {
            id: Set(id),
            email: Set(dto.email),
            display_name: Set(dto.display_name),
            password_hash: Set(password_hash),
            role: Set(dto.role.map(|r| r.as_str().to_string())),
            is_active: Set(dto.is_active),
            permissions: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let inserted = new_profile.insert(&self.db).await.map_err(insert_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn list_profiles(&self, dto: GetProfilesDto) -> DomainResult<PaginatedResult<Profile>> {
        let page = dto.page.unwrap_or(1).max(1);
        let page_size = dto.page_size.unwrap_or(20).clamp(1, 100);

        let mut query = profile::Entity::find();

        // Search by email or display name
        if let Some(ref search) = dto.search {
            query = query.filter(
                profile::Column::Email
                    .contains(search)
                    .or(profile::Column::DisplayName.contains(search)),
            );
        }

        if let Some(ref role) = dto.role {
            query = query.filter(profile::Column::Role.eq(role.as_str()));
        }

        match dto.sort_by.as_deref() {
            Some("email") => {
                query = query.order_by_asc(profile::Column::Email);
            }
            Some("display_name") => {
                query = query.order_by_asc(profile::Column::DisplayName);
            }
            Some("role") => {
                query = query.order_by_asc(profile::Column::Role);
            }
            _ => {
                query = query.order_by_desc(profile::Column::CreatedAt);
            }
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let offset = ((page - 1) * page_size) as u64;
        let models = query
            .offset(offset)
            .limit(page_size as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Profile> = models.into_iter().map(model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn get_profile_by_email(&self, email: &str) -> DomainResult<Option<Profile>> {
        let model = profile::Entity::find()
            .filter(profile::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn get_profile_by_id(&self, id: &str) -> DomainResult<Option<Profile>> {
        let model = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn count_profiles(&self) -> DomainResult<u64> {
        profile::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update_profile(
        &self,
        id: &str,
        dto: UpdateProfileDto,
    ) -> DomainResult<Option<Profile>> {
        let existing = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: profile::ActiveModel = existing.into();

        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(display_name) = dto.display_name {
            active.display_name = Set(Some(display_name));
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(insert_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn set_role(&self, id: &str, role: Option<Role>) -> DomainResult<Option<Profile>> {
        let existing = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: profile::ActiveModel = existing.into();
        active.role = Set(role.map(|r| r.as_str().to_string()));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<Option<Profile>> {
        let existing = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: profile::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn set_permission_overrides(
        &self,
        id: &str,
        overrides: Option<Value>,
    ) -> DomainResult<Option<Profile>> {
        let existing = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: profile::ActiveModel = existing.into();
        active.permissions = Set(overrides);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn update_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()> {
        let existing = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: profile::ActiveModel = existing.into();
        active.password_hash = Set(new_password_hash.to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        let existing = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(());
        };

        let mut active: profile::ActiveModel = existing.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn delete_profile(&self, id: &str) -> DomainResult<()> {
        let result = profile::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: id.to_string(),
            });
        }

        Ok(())
    }
}
