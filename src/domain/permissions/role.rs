//! User roles

use serde::{Deserialize, Serialize};

/// Base authorization class of a user profile.
///
/// Profiles store the role as a free-form optional string; `Role::parse`
/// never fails: an unknown or empty string behaves exactly like an absent
/// role, which the resolver maps to the `user` baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
    /// Read-only access
    Lector,
    /// Awaiting admin approval, sees nothing
    Pending,
}

impl Role {
    /// Parse a stored role string. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            "lector" => Some(Role::Lector),
            "pending" => Some(Role::Pending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Lector => "lector",
            Role::Pending => "pending",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("lector"), Some(Role::Lector));
        assert_eq!(Role::parse("pending"), Some(Role::Pending));
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("LECTOR"), Some(Role::Lector));
    }

    #[test]
    fn parse_unknown_yields_none() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("nonexistent_role_xyz"), None);
    }

    #[test]
    fn round_trip_as_str() {
        for role in [Role::Admin, Role::User, Role::Lector, Role::Pending] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
