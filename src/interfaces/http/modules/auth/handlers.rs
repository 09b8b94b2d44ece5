//! Authentication API handlers
//!
//! Thin wrappers over `ProfileService`. Login and `/me` both return the
//! caller's effective permissions so the frontend can render navigation
//! and the quotation log without a second round trip.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, ProfileInfo, RegisterRequest,
};
use crate::application::identity::ProfileService;
use crate::infrastructure::database::repositories::ProfileRepository;
use crate::interfaces::http::common::{domain_error_status, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedProfile;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub profile_service: Arc<ProfileService<ProfileRepository>>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    match state
        .profile_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => {
            let response = LoginResponse {
                token: auth.token,
                token_type: auth.token_type,
                expires_in: auth.expires_in,
                profile: ProfileInfo::from(auth.profile),
                permissions: auth.permissions.into(),
            };
            Ok(Json(ApiResponse::success(response)))
        }
        Err(e) => Err((domain_error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, pending approval", body = ApiResponse<ProfileInfo>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileInfo>>), (StatusCode, Json<ApiResponse<ProfileInfo>>)>
{
    match state
        .profile_service
        .register(
            &request.email,
            request.display_name.as_deref(),
            &request.password,
        )
        .await
    {
        Ok(profile) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ProfileInfo::from(profile))),
        )),
        Err(e) => Err((domain_error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile with effective permissions", body = ApiResponse<MeResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_profile(
    State(state): State<AuthHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
) -> Result<Json<ApiResponse<MeResponse>>, (StatusCode, Json<ApiResponse<MeResponse>>)> {
    let Some(caller) = caller else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    let profile = state
        .profile_service
        .get_profile_by_id(&caller.profile_id)
        .await
        .map_err(|e| (domain_error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    let Some(profile) = profile else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Profile not found")),
        ));
    };

    let permissions = profile.effective_permissions();
    let response = MeResponse {
        profile: ProfileInfo::from(profile),
        permissions: permissions.into(),
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "New password too short"),
        (status = 401, description = "Invalid current password")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(caller) = caller else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state
        .profile_service
        .change_password(
            &caller.profile_id,
            &request.current_password,
            &request.new_password,
        )
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err((domain_error_status(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
