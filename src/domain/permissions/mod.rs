//! Role/permission resolution.
//!
//! A session's effective capabilities are computed in two pure steps:
//! look up the role's entry in the base table ([`permissions_for_role`]),
//! then patch it with the per-user override document stored on the profile
//! ([`apply_overrides`]). Neither step can fail: degenerate input (absent
//! or unknown role, missing or malformed override keys) falls back to
//! well-defined defaults instead of erroring, so a session always ends up
//! with a resolved permission set.

pub mod model;
pub mod overrides;
pub mod role;

pub use model::{permissions_for_role, LogColumn, RolePermissions, Section};
pub use overrides::{apply_overrides, PermissionOverrides};
pub use role::Role;

use serde_json::Value;
use tracing::warn;

/// Resolve effective permissions from raw profile data.
///
/// This is the session-bootstrap entry point: it takes the role column and
/// the overrides column exactly as stored and never fails. A non-null role
/// string the base table does not know is logged before falling back to
/// the `user` baseline.
pub fn resolve_effective(role: Option<&str>, overrides: Option<&Value>) -> RolePermissions {
    let parsed = role.and_then(Role::parse);
    if let (Some(raw), None) = (role, parsed) {
        warn!(role = raw, "unknown role on profile, using 'user' defaults");
    }

    let base = permissions_for_role(parsed);
    let overrides = overrides.map(PermissionOverrides::from_json);
    apply_overrides(&base, overrides.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_effective_combines_lookup_and_patch() {
        let overrides = json!({ "logColumns": { "oferta_usd": true } });
        let effective = resolve_effective(Some("lector"), Some(&overrides));

        assert!(effective.shows_column(LogColumn::OfertaUsd));
        assert!(!effective.shows_column(LogColumn::Moneda));
        assert!(!effective.can_edit_quote);
    }

    #[test]
    fn resolve_effective_tolerates_garbage() {
        let overrides = json!("not an object");
        let effective = resolve_effective(Some("whatever"), Some(&overrides));
        assert_eq!(effective, permissions_for_role(Some(Role::User)));
    }
}
