//! Catalog and contact DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::infrastructure::database::entities::{catalog_option, contact};

/// Catalog option API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogOptionDto {
    pub id: String,
    pub nombre: String,
    pub created_at: String,
}

impl From<catalog_option::Model> for CatalogOptionDto {
    fn from(c: catalog_option::Model) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Create/update catalog option request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CatalogOptionRequest {
    #[validate(length(min = 1, max = 200, message = "nombre is required"))]
    pub nombre: String,
}

/// Contact API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactDto {
    pub id: String,
    pub nombre: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub created_at: String,
}

impl From<contact::Model> for ContactDto {
    fn from(c: contact::Model) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre,
            correo: c.correo,
            telefono: c.telefono,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Create/update contact request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200, message = "nombre is required"))]
    pub nombre: String,
    #[validate(email(message = "invalid email format"))]
    pub correo: Option<String>,
    pub telefono: Option<String>,
}
