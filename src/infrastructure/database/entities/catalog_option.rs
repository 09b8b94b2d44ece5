//! Catalog option entity
//!
//! One table for every simple dropdown catalog (client, mining unit,
//! service type, quotation status), discriminated by `kind`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    #[sea_orm(string_value = "clientes")]
    Clientes,
    #[sea_orm(string_value = "unidades_minera")]
    UnidadesMinera,
    #[sea_orm(string_value = "tipos_servicio")]
    TiposServicio,
    #[sea_orm(string_value = "status_cotizacion")]
    StatusCotizacion,
}

impl CatalogKind {
    /// Parse a URL path segment. Unknown kinds yield `None`.
    pub fn parse(s: &str) -> Option<CatalogKind> {
        match s {
            "clientes" => Some(CatalogKind::Clientes),
            "unidades_minera" => Some(CatalogKind::UnidadesMinera),
            "tipos_servicio" => Some(CatalogKind::TiposServicio),
            "status_cotizacion" => Some(CatalogKind::StatusCotizacion),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_options")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: CatalogKind,
    pub nombre: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
