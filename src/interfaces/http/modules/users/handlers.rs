//! Profile management API handlers
//!
//! Admin-only endpoints for managing accounts, roles and permission
//! overrides. Delegates to `ProfileService` from the application layer.
//! Every handler checks the caller's effective permissions: access
//! requires the `admin` section, which overrides can grant or revoke
//! independently of the stored role.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateProfileRequest, ListProfilesParams, ProfileDto, SetPermissionsRequest, SetRoleRequest,
    UpdateProfileRequest,
};
use crate::application::identity::ProfileService;
use crate::domain::{CreateProfileDto, GetProfilesDto, Role, UpdateProfileDto};
use crate::infrastructure::database::repositories::ProfileRepository;
use crate::interfaces::http::common::{
    domain_error_status, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedProfile;

/// Profile handler state, concrete over `ProfileRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct ProfileHandlerState {
    pub profile_service: Arc<ProfileService<ProfileRepository>>,
}

fn require_admin<T>(
    caller: &Option<axum::Extension<AuthenticatedProfile>>,
) -> Result<(), (StatusCode, Json<ApiResponse<T>>)> {
    match caller {
        Some(caller) if caller.is_admin() => Ok(()),
        Some(_) => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        )),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListProfilesParams),
    responses(
        (status = 200, description = "Profile list", body = PaginatedResponse<ProfileDto>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_profiles(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Query(params): Query<ListProfilesParams>,
) -> Result<Json<PaginatedResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require_admin(&caller)?;

    let dto = GetProfilesDto {
        search: params.search,
        role: params.role.as_deref().and_then(Role::parse),
        page: Some(params.page),
        page_size: Some(params.page_size),
        sort_by: params.sort_by,
    };

    match state.profile_service.list_profiles(dto).await {
        Ok(result) => {
            let items: Vec<ProfileDto> = result.items.into_iter().map(ProfileDto::from).collect();
            Ok(Json(PaginatedResponse::new(
                items,
                result.total,
                result.page,
                result.limit,
            )))
        }
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile details", body = ApiResponse<ProfileDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    match state.profile_service.get_profile_by_id(&id).await {
        Ok(Some(profile)) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Profile '{}' not found", id))),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ApiResponse<ProfileDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    ValidatedJson(request): ValidatedJson<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileDto>>), (StatusCode, Json<ApiResponse<ProfileDto>>)>
{
    require_admin(&caller)?;

    let dto = CreateProfileDto {
        email: request.email,
        display_name: request.display_name,
        password: request.password,
        role: Role::parse(&request.role),
        is_active: true,
    };

    match state.profile_service.create_profile(dto).await {
        Ok(profile) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ProfileDto::from(profile))),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    let dto = UpdateProfileDto {
        email: request.email,
        display_name: request.display_name,
    };

    match state.profile_service.update_profile(&id, dto).await {
        Ok(Some(profile)) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Profile '{}' not found", id))),
        )),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/role",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<ProfileDto>),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_role(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    // A null role clears the assignment; a non-null role must be known.
    let role = match request.role.as_deref() {
        None => None,
        Some(raw) => match Role::parse(raw) {
            Some(role) => Some(role),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown role '{}'", raw))),
                ));
            }
        },
    };

    match state.profile_service.set_role(&id, role).await {
        Ok(profile) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/permissions",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    request_body = SetPermissionsRequest,
    responses(
        (status = 200, description = "Overrides replaced", body = ApiResponse<ProfileDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_permissions(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
    Json(request): Json<SetPermissionsRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    match state
        .profile_service
        .set_permission_overrides(&id, request.permissions.as_ref())
        .await
    {
        Ok(profile) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/approve",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Account approved as user", body = ApiResponse<ProfileDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    match state.profile_service.approve(&id).await {
        Ok(profile) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/block",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Account blocked", body = ApiResponse<ProfileDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn block_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    match state.profile_service.block(&id).await {
        Ok(profile) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/reactivate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Account reactivated", body = ApiResponse<ProfileDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn reactivate_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProfileDto>>, (StatusCode, Json<ApiResponse<ProfileDto>>)> {
    require_admin(&caller)?;

    match state.profile_service.reactivate(&id).await {
        Ok(profile) => Ok(Json(ApiResponse::success(ProfileDto::from(profile)))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_profile(
    State(state): State<ProfileHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    require_admin(&caller)?;

    // Admins cannot delete themselves
    if let Some(axum::Extension(ref c)) = caller {
        if c.profile_id == id {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Cannot delete your own account")),
            ));
        }
    }

    match state.profile_service.delete_profile(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err((
            domain_error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
