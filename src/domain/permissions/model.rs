//! Permission model: UI sections, quotation-log columns and the
//! per-role base capability table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Role;

/// Navigable UI area gated by permission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    /// Quotation log ("Log de Cotizaciones")
    Log,
    Requerimientos,
    DetalleReqs,
    Admin,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Log,
        Section::Requerimientos,
        Section::DetalleReqs,
        Section::Admin,
    ];

    /// Parse a wire/storage key. Unknown keys yield `None`.
    pub fn parse(s: &str) -> Option<Section> {
        match s {
            "dashboard" => Some(Section::Dashboard),
            "log" => Some(Section::Log),
            "requerimientos" => Some(Section::Requerimientos),
            "detalle_reqs" => Some(Section::DetalleReqs),
            "admin" => Some(Section::Admin),
            _ => None,
        }
    }

    /// Wire/storage key, the inverse of [`Section::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Log => "log",
            Section::Requerimientos => "requerimientos",
            Section::DetalleReqs => "detalle_reqs",
            Section::Admin => "admin",
        }
    }
}

/// Column of the quotation-log table gated by permission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LogColumn {
    Cotizacion,
    Descripcion,
    Cliente,
    UnidadMinera,
    TipoServicio,
    StatusCotizacion,
    StatusProyecto,
    OfertaUsd,
    Moneda,
    Acciones,
}

impl LogColumn {
    pub const ALL: [LogColumn; 10] = [
        LogColumn::Cotizacion,
        LogColumn::Descripcion,
        LogColumn::Cliente,
        LogColumn::UnidadMinera,
        LogColumn::TipoServicio,
        LogColumn::StatusCotizacion,
        LogColumn::StatusProyecto,
        LogColumn::OfertaUsd,
        LogColumn::Moneda,
        LogColumn::Acciones,
    ];

    /// Parse a wire/storage key. Unknown keys yield `None`.
    pub fn parse(s: &str) -> Option<LogColumn> {
        match s {
            "cotizacion" => Some(LogColumn::Cotizacion),
            "descripcion" => Some(LogColumn::Descripcion),
            "cliente" => Some(LogColumn::Cliente),
            "unidad_minera" => Some(LogColumn::UnidadMinera),
            "tipo_servicio" => Some(LogColumn::TipoServicio),
            "status_cotizacion" => Some(LogColumn::StatusCotizacion),
            "status_proyecto" => Some(LogColumn::StatusProyecto),
            "oferta_usd" => Some(LogColumn::OfertaUsd),
            "moneda" => Some(LogColumn::Moneda),
            "acciones" => Some(LogColumn::Acciones),
            _ => None,
        }
    }

    /// Wire/storage key, the inverse of [`LogColumn::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LogColumn::Cotizacion => "cotizacion",
            LogColumn::Descripcion => "descripcion",
            LogColumn::Cliente => "cliente",
            LogColumn::UnidadMinera => "unidad_minera",
            LogColumn::TipoServicio => "tipo_servicio",
            LogColumn::StatusCotizacion => "status_cotizacion",
            LogColumn::StatusProyecto => "status_proyecto",
            LogColumn::OfertaUsd => "oferta_usd",
            LogColumn::Moneda => "moneda",
            LogColumn::Acciones => "acciones",
        }
    }
}

/// Effective capability set of a session.
///
/// `sections` and `log_columns` are proper sets: membership is all that
/// matters, order never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    pub sections: BTreeSet<Section>,
    pub log_columns: BTreeSet<LogColumn>,
    pub can_create_quote: bool,
    pub can_edit_quote: bool,
}

impl RolePermissions {
    /// Fully empty permission set (what `pending` maps to).
    pub fn none() -> Self {
        Self {
            sections: BTreeSet::new(),
            log_columns: BTreeSet::new(),
            can_create_quote: false,
            can_edit_quote: false,
        }
    }

    pub fn allows_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    pub fn shows_column(&self, column: LogColumn) -> bool {
        self.log_columns.contains(&column)
    }
}

fn all_columns() -> BTreeSet<LogColumn> {
    LogColumn::ALL.into_iter().collect()
}

/// Base capability table entry for a known role.
fn base_permissions(role: Role) -> RolePermissions {
    match role {
        Role::Admin => RolePermissions {
            sections: Section::ALL.into_iter().collect(),
            log_columns: all_columns(),
            can_create_quote: true,
            can_edit_quote: true,
        },
        Role::User => RolePermissions {
            sections: [
                Section::Dashboard,
                Section::Log,
                Section::Requerimientos,
                Section::DetalleReqs,
            ]
            .into_iter()
            .collect(),
            log_columns: all_columns(),
            can_create_quote: true,
            can_edit_quote: true,
        },
        // Lector does not see offer amount or currency by default
        Role::Lector => RolePermissions {
            sections: [Section::Dashboard, Section::Log].into_iter().collect(),
            log_columns: LogColumn::ALL
                .into_iter()
                .filter(|c| *c != LogColumn::OfertaUsd && *c != LogColumn::Moneda)
                .collect(),
            can_create_quote: false,
            can_edit_quote: false,
        },
        Role::Pending => RolePermissions::none(),
    }
}

/// Look up the base permissions for a role.
///
/// An absent role (`None`, covering both a null column and a stored string
/// `Role::parse` rejected) falls back to the `user` baseline. This is a
/// deliberate fail-open default: the function always succeeds and always
/// returns a fully populated set.
pub fn permissions_for_role(role: Option<Role>) -> RolePermissions {
    base_permissions(role.unwrap_or(Role::User))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sees_everything() {
        let perms = permissions_for_role(Some(Role::Admin));
        assert_eq!(perms.sections, Section::ALL.into_iter().collect());
        assert_eq!(perms.log_columns, LogColumn::ALL.into_iter().collect());
        assert!(perms.can_create_quote);
        assert!(perms.can_edit_quote);
    }

    #[test]
    fn user_sees_everything_except_admin_section() {
        let perms = permissions_for_role(Some(Role::User));
        assert!(!perms.allows_section(Section::Admin));
        assert!(perms.allows_section(Section::Dashboard));
        assert!(perms.allows_section(Section::Log));
        assert!(perms.allows_section(Section::Requerimientos));
        assert!(perms.allows_section(Section::DetalleReqs));
        assert_eq!(perms.log_columns, LogColumn::ALL.into_iter().collect());
        assert!(perms.can_create_quote);
        assert!(perms.can_edit_quote);
    }

    #[test]
    fn lector_is_read_only_without_money_columns() {
        let perms = permissions_for_role(Some(Role::Lector));
        assert_eq!(
            perms.sections,
            [Section::Dashboard, Section::Log].into_iter().collect()
        );
        assert!(!perms.shows_column(LogColumn::OfertaUsd));
        assert!(!perms.shows_column(LogColumn::Moneda));
        assert!(perms.shows_column(LogColumn::Cotizacion));
        assert_eq!(perms.log_columns.len(), 8);
        assert!(!perms.can_create_quote);
        assert!(!perms.can_edit_quote);
    }

    #[test]
    fn pending_gets_nothing() {
        let perms = permissions_for_role(Some(Role::Pending));
        assert_eq!(perms, RolePermissions::none());
    }

    #[test]
    fn absent_role_falls_back_to_user_baseline() {
        assert_eq!(
            permissions_for_role(None),
            permissions_for_role(Some(Role::User))
        );
    }

    #[test]
    fn unknown_role_string_falls_back_to_user_baseline() {
        let parsed = Role::parse("nonexistent_role_xyz");
        assert_eq!(parsed, None);
        assert_eq!(
            permissions_for_role(parsed),
            permissions_for_role(Some(Role::User))
        );
    }

    #[test]
    fn section_keys_round_trip() {
        for section in Section::ALL {
            let key = serde_json::to_value(section).unwrap();
            let key = key.as_str().unwrap().to_string();
            assert_eq!(Section::parse(&key), Some(section));
        }
        assert_eq!(Section::parse("unknown_section"), None);
    }

    #[test]
    fn column_keys_round_trip() {
        for column in LogColumn::ALL {
            let key = serde_json::to_value(column).unwrap();
            let key = key.as_str().unwrap().to_string();
            assert_eq!(LogColumn::parse(&key), Some(column));
        }
        assert_eq!(LogColumn::parse("oferta_eur"), None);
    }
}
