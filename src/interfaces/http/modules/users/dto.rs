//! Profile management DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Profile;
use crate::interfaces::http::common::PermissionsDto;

/// Profile API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileDto {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Stored role string, `null` when unassigned
    pub role: Option<String>,
    pub is_active: bool,
    /// Stored permission overrides document, `null` when none
    #[schema(value_type = Object, nullable)]
    pub permissions: Option<Value>,
    /// Effective permissions after resolving role defaults + overrides
    pub effective_permissions: PermissionsDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Profile> for ProfileDto {
    fn from(p: Profile) -> Self {
        let effective = p.effective_permissions();
        Self {
            id: p.id,
            email: p.email,
            display_name: p.display_name,
            role: p.role,
            is_active: p.is_active,
            permissions: p.permissions,
            effective_permissions: effective.into(),
            created_at: p.created_at,
            updated_at: p.updated_at,
            last_login_at: p.last_login_at,
        }
    }
}

/// Create profile request (admin action)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub display_name: Option<String>,
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: String,
    /// Role to assign (admin, user, lector, pending). Default: pending
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "pending".to_string()
}

/// Update profile request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Role assignment request. A `null` role clears the stored value and
/// the resolver falls back to `user` defaults.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoleRequest {
    pub role: Option<String>,
}

/// Permission overrides replacement request.
///
/// The body under `permissions` is the raw patch document. Unknown keys
/// and non-boolean values are dropped during normalization; an empty
/// patch is stored as `null`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPermissionsRequest {
    #[schema(value_type = Object, nullable)]
    pub permissions: Option<Value>,
}

/// List profiles query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListProfilesParams {
    /// Search by email or display name
    pub search: Option<String>,
    /// Filter by role (admin, user, lector, pending)
    pub role: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Sort field (email, display_name, role, created_at)
    pub sort_by: Option<String>,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}
