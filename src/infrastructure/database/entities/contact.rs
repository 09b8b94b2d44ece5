//! Contact entity
//!
//! Requesters ("solicitantes") and responsibles ("responsables") share a
//! shape, so they live in one table discriminated by `kind`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    #[sea_orm(string_value = "solicitantes")]
    Solicitantes,
    #[sea_orm(string_value = "responsables")]
    Responsables,
}

impl ContactKind {
    /// Parse a URL path segment. Unknown kinds yield `None`.
    pub fn parse(s: &str) -> Option<ContactKind> {
        match s {
            "solicitantes" => Some(ContactKind::Solicitantes),
            "responsables" => Some(ContactKind::Responsables),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: ContactKind,
    pub nombre: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
