//! Requirement detail item entity ("Detalle Reqs")

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line item of a registered requirement.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requirement_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nro_requerimiento: Option<String>,
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub unidad: Option<String>,
    pub cantidad: Option<f64>,
    pub oc: Option<String>,
    pub estado: Option<String>,
    /// Optional back-reference to a quotation code
    pub cotizacion: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
