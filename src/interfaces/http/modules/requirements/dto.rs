//! Requirement item DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::infrastructure::database::entities::requirement_item;

/// Requirement item API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct RequirementItemDto {
    pub id: String,
    pub nro_requerimiento: Option<String>,
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub unidad: Option<String>,
    pub cantidad: Option<f64>,
    pub oc: Option<String>,
    pub estado: Option<String>,
    pub cotizacion: Option<String>,
    pub created_at: String,
}

impl From<requirement_item::Model> for RequirementItemDto {
    fn from(r: requirement_item::Model) -> Self {
        Self {
            id: r.id,
            nro_requerimiento: r.nro_requerimiento,
            codigo: r.codigo,
            descripcion: r.descripcion,
            unidad: r.unidad,
            cantidad: r.cantidad,
            oc: r.oc,
            estado: r.estado,
            cotizacion: r.cotizacion,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Create requirement item request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequirementRequest {
    pub nro_requerimiento: Option<String>,
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub unidad: Option<String>,
    pub cantidad: Option<f64>,
    pub oc: Option<String>,
    pub estado: Option<String>,
    pub cotizacion: Option<String>,
}

/// Update requirement item request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequirementRequest {
    pub nro_requerimiento: Option<String>,
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub unidad: Option<String>,
    pub cantidad: Option<f64>,
    pub oc: Option<String>,
    pub estado: Option<String>,
    pub cotizacion: Option<String>,
}

/// List requirement items query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRequirementsParams {
    /// Filter by linked quotation code
    pub cotizacion: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    50
}
