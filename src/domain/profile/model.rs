use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::permissions::{resolve_effective, RolePermissions};

/// User profile.
///
/// `role` is kept as the raw stored string (nullable, possibly unknown) so
/// the permission resolver's tolerance survives the persistence round trip;
/// `permissions` is the raw override document (NULL = no overrides).
#[derive(Clone, Debug)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub role: Option<String>,
    pub is_active: bool,
    pub permissions: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Resolve this profile's effective capability set.
    pub fn effective_permissions(&self) -> RolePermissions {
        resolve_effective(self.role.as_deref(), self.permissions.as_ref())
    }
}
