//! Common API envelope types

pub mod validated_json;

pub use validated_json::ValidatedJson;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope
///
/// All REST endpoints return their data inside this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload. `null` on error
    pub data: Option<T>,
    /// Error description. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map a domain error onto the HTTP status it should surface as.
pub fn domain_error_status(e: &crate::domain::DomainError) -> axum::http::StatusCode {
    use axum::http::StatusCode;
    use crate::domain::DomainError;

    match e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire representation of effective permissions
///
/// Flattens the resolved permission set into plain string lists so the
/// frontend does not depend on the server-side enum spelling.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PermissionsDto {
    pub sections: Vec<String>,
    pub log_columns: Vec<String>,
    pub can_create_quote: bool,
    pub can_edit_quote: bool,
}

impl From<crate::domain::RolePermissions> for PermissionsDto {
    fn from(p: crate::domain::RolePermissions) -> Self {
        Self {
            sections: p.sections.iter().map(|s| s.as_str().to_string()).collect(),
            log_columns: p
                .log_columns
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            can_create_quote: p.can_create_quote,
            can_edit_quote: p.can_edit_quote,
        }
    }
}

/// Paginated list response
///
/// Carries one page of data plus page metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total page count
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
