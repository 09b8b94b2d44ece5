//! Requirement item handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::dto::{
    CreateRequirementRequest, ListRequirementsParams, RequirementItemDto, UpdateRequirementRequest,
};
use crate::infrastructure::database::entities::requirement_item;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};

/// Requirement handler state
#[derive(Clone)]
pub struct RequirementHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

fn internal<T>(e: impl ToString) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/requirements",
    tag = "Requirements",
    security(("bearer_auth" = [])),
    params(ListRequirementsParams),
    responses(
        (status = 200, description = "Requirement item list, newest first", body = PaginatedResponse<RequirementItemDto>)
    )
)]
pub async fn list_requirements(
    State(state): State<RequirementHandlerState>,
    Query(params): Query<ListRequirementsParams>,
) -> Result<Json<PaginatedResponse<RequirementItemDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut query =
        requirement_item::Entity::find().order_by_desc(requirement_item::Column::CreatedAt);

    if let Some(ref cotizacion) = params.cotizacion {
        query = query.filter(requirement_item::Column::Cotizacion.eq(cotizacion));
    }

    let total = query.clone().count(&state.db).await.map_err(internal)?;

    let page = params.page.max(1);
    let page_size = params.page_size.clamp(1, 200);
    let offset = ((page - 1) * page_size) as u64;

    let rows = query
        .offset(offset)
        .limit(page_size as u64)
        .all(&state.db)
        .await
        .map_err(internal)?;

    let items: Vec<RequirementItemDto> =
        rows.into_iter().map(RequirementItemDto::from).collect();
    Ok(Json(PaginatedResponse::new(items, total, page, page_size)))
}

#[utoipa::path(
    post,
    path = "/api/v1/requirements",
    tag = "Requirements",
    security(("bearer_auth" = [])),
    request_body = CreateRequirementRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<RequirementItemDto>)
    )
)]
pub async fn create_requirement(
    State(state): State<RequirementHandlerState>,
    Json(request): Json<CreateRequirementRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<RequirementItemDto>>),
    (StatusCode, Json<ApiResponse<RequirementItemDto>>),
> {
    let new_item = requirement_item::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        nro_requerimiento: Set(request.nro_requerimiento),
        codigo: Set(request.codigo),
        descripcion: Set(request.descripcion),
        unidad: Set(request.unidad),
        cantidad: Set(request.cantidad),
        oc: Set(request.oc),
        estado: Set(request.estado),
        cotizacion: Set(request.cotizacion),
        created_at: Set(Utc::now()),
    };

    let created = new_item.insert(&state.db).await.map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RequirementItemDto::from(created))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/requirements/{id}",
    tag = "Requirements",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Requirement item ID")),
    request_body = UpdateRequirementRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<RequirementItemDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_requirement(
    State(state): State<RequirementHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRequirementRequest>,
) -> Result<Json<ApiResponse<RequirementItemDto>>, (StatusCode, Json<ApiResponse<RequirementItemDto>>)>
{
    let row = requirement_item::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(internal)?;

    let Some(row) = row else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Requirement item not found")),
        ));
    };

    let mut active: requirement_item::ActiveModel = row.into();
    active.nro_requerimiento = Set(request.nro_requerimiento);
    active.codigo = Set(request.codigo);
    active.descripcion = Set(request.descripcion);
    active.unidad = Set(request.unidad);
    active.cantidad = Set(request.cantidad);
    active.oc = Set(request.oc);
    active.estado = Set(request.estado);
    active.cotizacion = Set(request.cotizacion);

    let updated = active.update(&state.db).await.map_err(internal)?;
    Ok(Json(ApiResponse::success(RequirementItemDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/requirements/{id}",
    tag = "Requirements",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Requirement item ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_requirement(
    State(state): State<RequirementHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let result = requirement_item::Entity::delete_by_id(&id)
        .exec(&state.db)
        .await
        .map_err(internal)?;

    if result.rows_affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Requirement item not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
