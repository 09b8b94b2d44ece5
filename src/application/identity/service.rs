//! Profile management service, application-layer orchestration
//!
//! All identity and permission business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::{
    CreateProfileDto, DomainError, DomainResult, GetProfilesDto, PermissionOverrides, Profile,
    ProfileRepositoryInterface, Role, RolePermissions, UpdateProfileDto,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub profile: Profile,
    pub permissions: RolePermissions,
}

/// Orchestrates all identity and account-management use-cases.
///
/// Generic over `R: ProfileRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct ProfileService<R: ProfileRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: ProfileRepositoryInterface> ProfileService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT plus the
    /// caller's effective permissions.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let profile = self.repo.get_profile_by_email(email).await?;

        let Some(profile) = profile else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !profile.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &profile.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        self.repo.touch_last_login(&profile.id).await?;

        let role_str = profile.role.clone().unwrap_or_else(|| "user".to_string());
        let token = create_token(&profile.id, &profile.email, &role_str, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        let permissions = profile.effective_permissions();

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            profile,
            permissions,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account. New accounts start as `pending` with no
    /// access until an administrator approves them.
    pub async fn register(
        &self,
        email: &str,
        display_name: Option<&str>,
        password: &str,
    ) -> DomainResult<Profile> {
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        if self.repo.get_profile_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let dto = CreateProfileDto {
            email: email.to_string(),
            display_name: display_name.map(|s| s.to_string()),
            password: password.to_string(),
            role: Some(Role::Pending),
            is_active: true,
        };

        let profile = self.repo.create_profile(dto).await?;

        info!(profile_id = %profile.id, email = %profile.email, "New account registered, awaiting approval");
        Ok(profile)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// List profiles with search, filtering, sorting and pagination.
    pub async fn list_profiles(&self, dto: GetProfilesDto) -> DomainResult<PaginatedResult<Profile>> {
        self.repo.list_profiles(dto).await
    }

    /// Get a single profile by ID.
    pub async fn get_profile_by_id(&self, id: &str) -> DomainResult<Option<Profile>> {
        self.repo.get_profile_by_id(id).await
    }

    /// Get a profile by email.
    pub async fn get_profile_by_email(&self, email: &str) -> DomainResult<Option<Profile>> {
        self.repo.get_profile_by_email(email).await
    }

    /// Total number of profiles (used for first-run admin seeding).
    pub async fn count_profiles(&self) -> DomainResult<u64> {
        self.repo.count_profiles().await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update profile fields (email, display name).
    pub async fn update_profile(
        &self,
        id: &str,
        dto: UpdateProfileDto,
    ) -> DomainResult<Option<Profile>> {
        self.repo.update_profile(id, dto).await
    }

    /// Create a profile directly with an assigned role (admin action,
    /// bypasses the pending flow).
    pub async fn create_profile(&self, dto: CreateProfileDto) -> DomainResult<Profile> {
        if dto.password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !dto.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if self.repo.get_profile_by_email(&dto.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let profile = self.repo.create_profile(dto).await?;
        info!(profile_id = %profile.id, email = %profile.email, "Profile created");
        Ok(profile)
    }

    /// Assign a role to a profile. `None` clears the stored role; the
    /// resolver then falls back to `user` defaults.
    pub async fn set_role(&self, id: &str, role: Option<Role>) -> DomainResult<Profile> {
        let updated = self
            .repo
            .set_role(id, role)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: id.to_string(),
            })?;

        info!(profile_id = id, role = ?updated.role, "Role updated");
        Ok(updated)
    }

    /// Approve a pending account: assign the `user` role and make sure
    /// the account can log in.
    pub async fn approve(&self, id: &str) -> DomainResult<Profile> {
        self.set_role(id, Some(Role::User)).await?;
        self.set_active(id, true).await
    }

    /// Block a profile (keeps the row, rejects logins).
    pub async fn block(&self, id: &str) -> DomainResult<Profile> {
        self.set_active(id, false).await
    }

    /// Reactivate a previously blocked profile.
    pub async fn reactivate(&self, id: &str) -> DomainResult<Profile> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<Profile> {
        let updated = self
            .repo
            .set_active(id, is_active)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: id.to_string(),
            })?;

        info!(profile_id = id, is_active, "Active flag updated");
        Ok(updated)
    }

    /// Replace a profile's permission overrides with the given patch
    /// document. The patch is normalized before storage: unknown keys
    /// and non-boolean values are dropped, and an empty patch is stored
    /// as NULL.
    pub async fn set_permission_overrides(
        &self,
        id: &str,
        patch: Option<&Value>,
    ) -> DomainResult<Profile> {
        let canonical = patch
            .map(PermissionOverrides::from_json)
            .and_then(|o| o.to_json());

        let updated = self
            .repo
            .set_permission_overrides(id, canonical)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: id.to_string(),
            })?;

        info!(profile_id = id, "Permission overrides updated");
        Ok(updated)
    }

    /// Resolve the effective permissions a profile would currently get.
    pub async fn effective_permissions(&self, id: &str) -> DomainResult<RolePermissions> {
        let profile = self
            .repo
            .get_profile_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: id.to_string(),
            })?;

        Ok(profile.effective_permissions())
    }

    /// Change a profile's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        profile_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < 8 {
            return Err(DomainError::Validation(
                "New password must be at least 8 characters".into(),
            ));
        }

        let profile = self
            .repo
            .get_profile_by_id(profile_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Profile",
                field: "id",
                value: profile_id.to_string(),
            })?;

        let valid = verify_password(current_password, &profile.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        self.repo.update_password(profile_id, &new_hash).await?;

        info!(profile_id, "Password changed");
        Ok(())
    }

    /// Delete a profile by ID.
    pub async fn delete_profile(&self, id: &str) -> DomainResult<()> {
        self.repo.delete_profile(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;

    use crate::domain::Section;

    /// In-memory repository for exercising the service logic without a
    /// database.
    #[derive(Default)]
    struct MemoryRepository {
        profiles: Mutex<HashMap<String, Profile>>,
    }

    #[async_trait]
    impl ProfileRepositoryInterface for MemoryRepository {
        async fn create_profile(&self, dto: CreateProfileDto) -> DomainResult<Profile> {
            let now = Utc::now();
            let profile = Profile {
                id: uuid::Uuid::new_v4().to_string(),
                email: dto.email,
                display_name: dto.display_name,
                password_hash: hash_password(&dto.password)
                    .map_err(|e| DomainError::Storage(e.to_string()))?,
                role: dto.role.map(|r| r.as_str().to_string()),
                is_active: dto.is_active,
                permissions: None,
                created_at: now,
                updated_at: now,
                last_login_at: None,
            };
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.id.clone(), profile.clone());
            Ok(profile)
        }

        async fn list_profiles(
            &self,
            _dto: GetProfilesDto,
        ) -> DomainResult<PaginatedResult<Profile>> {
            let items: Vec<Profile> = self.profiles.lock().unwrap().values().cloned().collect();
            let total = items.len() as u64;
            Ok(PaginatedResult::new(items, total, 1, 50))
        }

        async fn get_profile_by_email(&self, email: &str) -> DomainResult<Option<Profile>> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .values()
                .find(|p| p.email == email)
                .cloned())
        }

        async fn get_profile_by_id(&self, id: &str) -> DomainResult<Option<Profile>> {
            Ok(self.profiles.lock().unwrap().get(id).cloned())
        }

        async fn count_profiles(&self) -> DomainResult<u64> {
            Ok(self.profiles.lock().unwrap().len() as u64)
        }

        async fn update_profile(
            &self,
            id: &str,
            dto: UpdateProfileDto,
        ) -> DomainResult<Option<Profile>> {
            let mut profiles = self.profiles.lock().unwrap();
            Ok(profiles.get_mut(id).map(|p| {
                if let Some(email) = dto.email {
                    p.email = email;
                }
                if let Some(name) = dto.display_name {
                    p.display_name = Some(name);
                }
                p.clone()
            }))
        }

        async fn set_role(&self, id: &str, role: Option<Role>) -> DomainResult<Option<Profile>> {
            let mut profiles = self.profiles.lock().unwrap();
            Ok(profiles.get_mut(id).map(|p| {
                p.role = role.map(|r| r.as_str().to_string());
                p.clone()
            }))
        }

        async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<Option<Profile>> {
            let mut profiles = self.profiles.lock().unwrap();
            Ok(profiles.get_mut(id).map(|p| {
                p.is_active = is_active;
                p.clone()
            }))
        }

        async fn set_permission_overrides(
            &self,
            id: &str,
            overrides: Option<Value>,
        ) -> DomainResult<Option<Profile>> {
            let mut profiles = self.profiles.lock().unwrap();
            Ok(profiles.get_mut(id).map(|p| {
                p.permissions = overrides;
                p.clone()
            }))
        }

        async fn update_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()> {
            let mut profiles = self.profiles.lock().unwrap();
            match profiles.get_mut(id) {
                Some(p) => {
                    p.password_hash = new_password_hash.to_string();
                    Ok(())
                }
                None => Err(DomainError::NotFound {
                    entity: "Profile",
                    field: "id",
                    value: id.to_string(),
                }),
            }
        }

        async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
            let mut profiles = self.profiles.lock().unwrap();
            if let Some(p) = profiles.get_mut(id) {
                p.last_login_at = Some(Utc::now());
            }
            Ok(())
        }

        async fn delete_profile(&self, id: &str) -> DomainResult<()> {
            match self.profiles.lock().unwrap().remove(id) {
                Some(_) => Ok(()),
                None => Err(DomainError::NotFound {
                    entity: "Profile",
                    field: "id",
                    value: id.to_string(),
                }),
            }
        }
    }

    fn service() -> ProfileService<MemoryRepository> {
        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "gestion-comercial".to_string(),
        };
        ProfileService::new(Arc::new(MemoryRepository::default()), jwt)
    }

    #[tokio::test]
    async fn register_creates_pending_account() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", Some("Ana"), "secret-123")
            .await
            .unwrap();

        assert_eq!(profile.role.as_deref(), Some("pending"));
        assert!(profile.is_active);
        assert!(profile.effective_permissions().sections.is_empty());
    }

    #[tokio::test]
    async fn register_rejects_short_password_and_duplicates() {
        let svc = service();
        assert!(matches!(
            svc.register("ana@example.com", None, "short").await,
            Err(DomainError::Validation(_))
        ));

        svc.register("ana@example.com", None, "secret-123")
            .await
            .unwrap();
        assert!(matches!(
            svc.register("ana@example.com", None, "secret-456").await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn login_returns_token_and_effective_permissions() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", None, "secret-123")
            .await
            .unwrap();
        svc.set_role(&profile.id, Some(Role::Admin)).await.unwrap();

        let auth = svc.login("ana@example.com", "secret-123").await.unwrap();
        assert!(!auth.token.is_empty());
        assert_eq!(auth.token_type, "Bearer");
        assert!(auth.permissions.allows_section(Section::Admin));

        let stored = svc.get_profile_by_id(&profile.id).await.unwrap().unwrap();
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_blocked_accounts() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", None, "secret-123")
            .await
            .unwrap();

        assert!(matches!(
            svc.login("ana@example.com", "wrong-password").await,
            Err(DomainError::Unauthorized(_))
        ));

        svc.block(&profile.id).await.unwrap();
        assert!(matches!(
            svc.login("ana@example.com", "secret-123").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn approve_assigns_user_role_and_activates() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", None, "secret-123")
            .await
            .unwrap();
        svc.block(&profile.id).await.unwrap();

        let approved = svc.approve(&profile.id).await.unwrap();
        assert_eq!(approved.role.as_deref(), Some("user"));
        assert!(approved.is_active);
        assert!(approved
            .effective_permissions()
            .allows_section(Section::Dashboard));
    }

    #[tokio::test]
    async fn empty_override_patch_is_stored_as_null() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", None, "secret-123")
            .await
            .unwrap();

        let updated = svc
            .set_permission_overrides(&profile.id, Some(&json!({})))
            .await
            .unwrap();
        assert!(updated.permissions.is_none());

        // Unknown keys are dropped during normalization too
        let updated = svc
            .set_permission_overrides(
                &profile.id,
                Some(&json!({ "sections": { "bogus": true } })),
            )
            .await
            .unwrap();
        assert!(updated.permissions.is_none());
    }

    #[tokio::test]
    async fn override_patch_changes_effective_permissions() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", None, "secret-123")
            .await
            .unwrap();
        svc.set_role(&profile.id, Some(Role::Lector)).await.unwrap();

        svc.set_permission_overrides(&profile.id, Some(&json!({ "canCreateQuote": true })))
            .await
            .unwrap();

        let effective = svc.effective_permissions(&profile.id).await.unwrap();
        assert!(effective.can_create_quote);
        assert!(!effective.can_edit_quote);
    }

    #[tokio::test]
    async fn change_password_verifies_the_current_one() {
        let svc = service();
        let profile = svc
            .register("ana@example.com", None, "secret-123")
            .await
            .unwrap();

        assert!(matches!(
            svc.change_password(&profile.id, "wrong", "new-secret-1").await,
            Err(DomainError::Unauthorized(_))
        ));

        svc.change_password(&profile.id, "secret-123", "new-secret-1")
            .await
            .unwrap();
        svc.login("ana@example.com", "new-secret-1").await.unwrap();
    }

    #[tokio::test]
    async fn count_profiles_reflects_registrations() {
        let svc = service();
        assert_eq!(svc.count_profiles().await.unwrap(), 0);
        svc.register("ana@example.com", None, "secret-123")
            .await
            .unwrap();
        assert_eq!(svc.count_profiles().await.unwrap(), 1);
        assert!(svc
            .get_profile_by_email("ana@example.com")
            .await
            .unwrap()
            .is_some());
    }
}
