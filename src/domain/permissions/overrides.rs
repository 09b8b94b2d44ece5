//! Per-user permission overrides (stored as a JSON column on the profile)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LogColumn, RolePermissions, Section};

/// Per-user patch over a role's base permissions.
///
/// Only keys present in the maps carry an opinion: `true` forces a section
/// or column visible, `false` forces it hidden, absent defers to the base.
/// The two action flags overwrite the base wholesale when `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverrides {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<Section, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub log_columns: BTreeMap<LogColumn, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_create_quote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit_quote: Option<bool>,
}

impl PermissionOverrides {
    /// Whether this patch carries no opinion at all.
    ///
    /// An empty patch is stored as NULL to keep the column canonical, but
    /// reading NULL and reading `{}` are equivalent.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
            && self.log_columns.is_empty()
            && self.can_create_quote.is_none()
            && self.can_edit_quote.is_none()
    }

    /// Decode the stored JSON document tolerantly.
    ///
    /// The stored patch is an advisory document, not a validated protocol
    /// message: keys outside the closed enumerations and values that are
    /// not booleans are dropped silently, and anything that is not an
    /// object decodes to an empty patch.
    pub fn from_json(value: &Value) -> PermissionOverrides {
        let Some(obj) = value.as_object() else {
            return PermissionOverrides::default();
        };

        let mut overrides = PermissionOverrides::default();

        if let Some(sections) = obj.get("sections").and_then(Value::as_object) {
            for (key, val) in sections {
                if let (Some(section), Some(b)) = (Section::parse(key), val.as_bool()) {
                    overrides.sections.insert(section, b);
                }
            }
        }

        if let Some(columns) = obj.get("logColumns").and_then(Value::as_object) {
            for (key, val) in columns {
                if let (Some(column), Some(b)) = (LogColumn::parse(key), val.as_bool()) {
                    overrides.log_columns.insert(column, b);
                }
            }
        }

        overrides.can_create_quote = obj.get("canCreateQuote").and_then(Value::as_bool);
        overrides.can_edit_quote = obj.get("canEditQuote").and_then(Value::as_bool);

        overrides
    }

    /// Encode for storage, using the original document's key casing.
    ///
    /// Returns `None` when the patch is empty (store NULL).
    pub fn to_json(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }

        let mut obj = serde_json::Map::new();
        if !self.sections.is_empty() {
            let map: serde_json::Map<String, Value> = self
                .sections
                .iter()
                .map(|(k, v)| (k.as_str().to_owned(), Value::Bool(*v)))
                .collect();
            obj.insert("sections".into(), Value::Object(map));
        }
        if !self.log_columns.is_empty() {
            let map: serde_json::Map<String, Value> = self
                .log_columns
                .iter()
                .map(|(k, v)| (k.as_str().to_owned(), Value::Bool(*v)))
                .collect();
            obj.insert("logColumns".into(), Value::Object(map));
        }
        if let Some(b) = self.can_create_quote {
            obj.insert("canCreateQuote".into(), Value::Bool(b));
        }
        if let Some(b) = self.can_edit_quote {
            obj.insert("canEditQuote".into(), Value::Bool(b));
        }

        Some(Value::Object(obj))
    }
}

/// Apply a per-user override patch to a role's base permissions.
///
/// Produces a fresh value; neither input is mutated (the base may be a
/// shared table entry). Each field merges independently: sections and
/// columns via set patching (insert on `true`, remove on `false`, both
/// idempotent), the action flags via whole-value overwrite.
pub fn apply_overrides(
    base: &RolePermissions,
    overrides: Option<&PermissionOverrides>,
) -> RolePermissions {
    let Some(overrides) = overrides else {
        return base.clone();
    };

    let mut merged = base.clone();

    for (section, visible) in &overrides.sections {
        if *visible {
            merged.sections.insert(*section);
        } else {
            merged.sections.remove(section);
        }
    }

    for (column, visible) in &overrides.log_columns {
        if *visible {
            merged.log_columns.insert(*column);
        } else {
            merged.log_columns.remove(column);
        }
    }

    if let Some(b) = overrides.can_create_quote {
        merged.can_create_quote = b;
    }
    if let Some(b) = overrides.can_edit_quote {
        merged.can_edit_quote = b;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permissions::{permissions_for_role, Role};
    use serde_json::json;

    fn base_with_sections(sections: &[Section]) -> RolePermissions {
        RolePermissions {
            sections: sections.iter().copied().collect(),
            ..RolePermissions::none()
        }
    }

    #[test]
    fn no_overrides_returns_base_unchanged() {
        for role in [Role::Admin, Role::User, Role::Lector, Role::Pending] {
            let base = permissions_for_role(Some(role));
            assert_eq!(apply_overrides(&base, None), base);
        }
    }

    #[test]
    fn empty_patch_returns_base_unchanged() {
        let base = permissions_for_role(Some(Role::Lector));
        let empty = PermissionOverrides::default();
        assert_eq!(apply_overrides(&base, Some(&empty)), base);
    }

    #[test]
    fn forcing_a_section_visible_is_idempotent() {
        let base = base_with_sections(&[Section::Log, Section::Dashboard]);
        let overrides = PermissionOverrides {
            sections: [(Section::Admin, true)].into_iter().collect(),
            ..Default::default()
        };

        let once = apply_overrides(&base, Some(&overrides));
        assert_eq!(
            once.sections,
            [Section::Log, Section::Dashboard, Section::Admin]
                .into_iter()
                .collect()
        );

        // Applying the same patch to the result changes nothing further
        let twice = apply_overrides(&once, Some(&overrides));
        assert_eq!(twice, once);
    }

    #[test]
    fn forcing_a_section_hidden_removes_it() {
        let base = base_with_sections(&[Section::Log, Section::Dashboard, Section::Admin]);
        let overrides = PermissionOverrides {
            sections: [(Section::Admin, false)].into_iter().collect(),
            ..Default::default()
        };

        let result = apply_overrides(&base, Some(&overrides));
        assert_eq!(
            result.sections,
            [Section::Log, Section::Dashboard].into_iter().collect()
        );
    }

    #[test]
    fn mixed_add_and_remove_on_columns() {
        let base = RolePermissions {
            log_columns: [LogColumn::Cotizacion, LogColumn::Moneda]
                .into_iter()
                .collect(),
            ..RolePermissions::none()
        };
        let overrides = PermissionOverrides {
            log_columns: [(LogColumn::Moneda, false), (LogColumn::OfertaUsd, true)]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        let result = apply_overrides(&base, Some(&overrides));
        assert_eq!(
            result.log_columns,
            [LogColumn::Cotizacion, LogColumn::OfertaUsd]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn boolean_flags_overwrite_only_when_present() {
        let mut base = RolePermissions::none();
        base.can_create_quote = false;

        let grant = PermissionOverrides {
            can_create_quote: Some(true),
            ..Default::default()
        };
        assert!(apply_overrides(&base, Some(&grant)).can_create_quote);

        // None = no opinion; base value kept
        let silent = PermissionOverrides::default();
        assert!(!apply_overrides(&base, Some(&silent)).can_create_quote);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = permissions_for_role(Some(Role::User));
        let snapshot = base.clone();
        let overrides = PermissionOverrides {
            sections: [(Section::Dashboard, false)].into_iter().collect(),
            log_columns: [(LogColumn::Acciones, false)].into_iter().collect(),
            can_create_quote: Some(false),
            can_edit_quote: Some(false),
        };
        let overrides_snapshot = overrides.clone();

        let _ = apply_overrides(&base, Some(&overrides));

        assert_eq!(base, snapshot);
        assert_eq!(overrides, overrides_snapshot);
    }

    #[test]
    fn lector_can_be_granted_a_hidden_column() {
        let base = permissions_for_role(Some(Role::Lector));
        let overrides = PermissionOverrides {
            log_columns: [(LogColumn::OfertaUsd, true)].into_iter().collect(),
            ..Default::default()
        };

        let effective = apply_overrides(&base, Some(&overrides));
        assert!(effective.shows_column(LogColumn::OfertaUsd));
        // Not mentioned in the patch and absent from the base, so stays hidden
        assert!(!effective.shows_column(LogColumn::Moneda));
    }

    #[test]
    fn pending_without_overrides_stays_fully_empty() {
        let effective = apply_overrides(&permissions_for_role(Some(Role::Pending)), None);
        assert!(effective.sections.is_empty());
        assert!(effective.log_columns.is_empty());
        assert!(!effective.can_create_quote);
        assert!(!effective.can_edit_quote);
    }

    // ── Stored JSON decoding ───────────────────────────────────

    #[test]
    fn from_json_reads_the_stored_document_shape() {
        let doc = json!({
            "sections": { "admin": true, "log": false },
            "logColumns": { "oferta_usd": true },
            "canCreateQuote": true,
            "canEditQuote": null
        });

        let overrides = PermissionOverrides::from_json(&doc);
        assert_eq!(overrides.sections.get(&Section::Admin), Some(&true));
        assert_eq!(overrides.sections.get(&Section::Log), Some(&false));
        assert_eq!(
            overrides.log_columns.get(&LogColumn::OfertaUsd),
            Some(&true)
        );
        assert_eq!(overrides.can_create_quote, Some(true));
        assert_eq!(overrides.can_edit_quote, None);
    }

    #[test]
    fn from_json_ignores_unknown_keys_and_non_booleans() {
        let doc = json!({
            "sections": { "unknownSection": true, "log": "yes", "admin": false },
            "logColumns": { "oferta_eur": true },
            "canCreateQuote": "true",
            "somethingElse": 42
        });

        let overrides = PermissionOverrides::from_json(&doc);
        assert_eq!(
            overrides.sections,
            [(Section::Admin, false)].into_iter().collect()
        );
        assert!(overrides.log_columns.is_empty());
        assert_eq!(overrides.can_create_quote, None);
    }

    #[test]
    fn null_and_empty_object_decode_identically() {
        let from_null = PermissionOverrides::from_json(&Value::Null);
        let from_empty = PermissionOverrides::from_json(&json!({}));
        assert_eq!(from_null, from_empty);
        assert!(from_null.is_empty());
    }

    #[test]
    fn to_json_is_canonical() {
        assert_eq!(PermissionOverrides::default().to_json(), None);

        let overrides = PermissionOverrides {
            log_columns: [(LogColumn::Moneda, false)].into_iter().collect(),
            can_edit_quote: Some(true),
            ..Default::default()
        };
        let doc = overrides.to_json().unwrap();
        assert_eq!(doc, json!({ "logColumns": { "moneda": false }, "canEditQuote": true }));
        assert_eq!(PermissionOverrides::from_json(&doc), overrides);
    }
}
