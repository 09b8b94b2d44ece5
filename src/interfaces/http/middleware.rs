//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::json;

use crate::domain::{resolve_effective, RolePermissions, Section};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::crypto::jwt::verify_token;
use crate::infrastructure::database::entities::profile;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    AccountDisabled,
    ProfileNotFound,
}

/// Authentication state containing JWT config and database handle
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub db: DatabaseConnection,
}

/// Authenticated caller information, inserted as a request extension.
///
/// Role and permission overrides are re-read from the profile row on
/// every request, so role changes and override edits take effect
/// without waiting for the JWT to expire.
#[derive(Clone, Debug)]
pub struct AuthenticatedProfile {
    pub profile_id: String,
    pub email: String,
    pub role: Option<String>,
    pub permissions: RolePermissions,
}

impl AuthenticatedProfile {
    pub fn is_admin(&self) -> bool {
        self.permissions.allows_section(Section::Admin)
    }

    pub fn can_create_quote(&self) -> bool {
        self.permissions.can_create_quote
    }

    pub fn can_edit_quote(&self) -> bool {
        self.permissions.can_edit_quote
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(_) => return auth_error_response(AuthError::InvalidToken),
    };
    if claims.is_expired() {
        return auth_error_response(AuthError::ExpiredToken);
    }

    let record = profile::Entity::find_by_id(&claims.sub)
        .one(&auth_state.db)
        .await;

    let record = match record {
        Ok(Some(record)) => record,
        Ok(None) => return auth_error_response(AuthError::ProfileNotFound),
        Err(e) => {
            let body = Json(json!({"success": false, "error": e.to_string()}));
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }
    };

    if !record.is_active {
        return auth_error_response(AuthError::AccountDisabled);
    }

    let permissions = resolve_effective(record.role.as_deref(), record.permissions.as_ref());

    let caller = AuthenticatedProfile {
        profile_id: record.id,
        email: record.email,
        role: record.role,
        permissions,
    };
    request.extensions_mut().insert(caller);
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::AccountDisabled => (StatusCode::UNAUTHORIZED, "Account is disabled"),
        AuthError::ProfileNotFound => (StatusCode::UNAUTHORIZED, "Profile no longer exists"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}
