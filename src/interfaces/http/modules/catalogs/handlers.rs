//! Catalog and contact handlers
//!
//! The dropdown catalogs (clientes, unidades_minera, tipos_servicio,
//! status_cotizacion) share one table and one set of handlers addressed
//! by kind; requester and responsible contacts work the same way under
//! `/contacts/{kind}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::dto::{CatalogOptionDto, CatalogOptionRequest, ContactDto, ContactRequest};
use crate::infrastructure::database::entities::catalog_option::{self, CatalogKind};
use crate::infrastructure::database::entities::contact::{self, ContactKind};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// Catalog handler state
#[derive(Clone)]
pub struct CatalogHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

fn internal<T>(e: impl ToString) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

fn unknown_kind<T>(kind: &str) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!("Unknown catalog '{}'", kind))),
    )
}

// ── Catalog options ─────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/catalogs/{kind}",
    tag = "Catalogs",
    security(("bearer_auth" = [])),
    params(("kind" = String, Path, description = "Catalog kind (clientes, unidades_minera, tipos_servicio, status_cotizacion)")),
    responses(
        (status = 200, description = "Options sorted by name", body = ApiResponse<Vec<CatalogOptionDto>>),
        (status = 404, description = "Unknown catalog kind")
    )
)]
pub async fn list_options(
    State(state): State<CatalogHandlerState>,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<CatalogOptionDto>>>, (StatusCode, Json<ApiResponse<Vec<CatalogOptionDto>>>)>
{
    let Some(kind) = CatalogKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let rows = catalog_option::Entity::find()
        .filter(catalog_option::Column::Kind.eq(kind))
        .order_by_asc(catalog_option::Column::Nombre)
        .all(&state.db)
        .await
        .map_err(internal)?;

    let items: Vec<CatalogOptionDto> = rows.into_iter().map(CatalogOptionDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/catalogs/{kind}",
    tag = "Catalogs",
    security(("bearer_auth" = [])),
    params(("kind" = String, Path, description = "Catalog kind")),
    request_body = CatalogOptionRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CatalogOptionDto>),
        (status = 404, description = "Unknown catalog kind"),
        (status = 409, description = "Name already exists in this catalog")
    )
)]
pub async fn create_option(
    State(state): State<CatalogHandlerState>,
    Path(kind): Path<String>,
    ValidatedJson(request): ValidatedJson<CatalogOptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogOptionDto>>), (StatusCode, Json<ApiResponse<CatalogOptionDto>>)>
{
    let Some(kind) = CatalogKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let new_option = catalog_option::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        kind: Set(kind),
        nombre: Set(request.nombre),
        created_at: Set(Utc::now()),
    };

    let created = new_option.insert(&state.db).await.map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::error("Name already exists in this catalog")),
            )
        } else {
            internal(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CatalogOptionDto::from(created))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/catalogs/{kind}/{id}",
    tag = "Catalogs",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Catalog kind"),
        ("id" = String, Path, description = "Option ID")
    ),
    request_body = CatalogOptionRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CatalogOptionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_option(
    State(state): State<CatalogHandlerState>,
    Path((kind, id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<CatalogOptionRequest>,
) -> Result<Json<ApiResponse<CatalogOptionDto>>, (StatusCode, Json<ApiResponse<CatalogOptionDto>>)>
{
    let Some(kind) = CatalogKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let row = catalog_option::Entity::find_by_id(&id)
        .filter(catalog_option::Column::Kind.eq(kind))
        .one(&state.db)
        .await
        .map_err(internal)?;

    let Some(row) = row else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Catalog option not found")),
        ));
    };

    let mut active: catalog_option::ActiveModel = row.into();
    active.nombre = Set(request.nombre);

    let updated = active.update(&state.db).await.map_err(internal)?;
    Ok(Json(ApiResponse::success(CatalogOptionDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/catalogs/{kind}/{id}",
    tag = "Catalogs",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Catalog kind"),
        ("id" = String, Path, description = "Option ID")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_option(
    State(state): State<CatalogHandlerState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(kind) = CatalogKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let result = catalog_option::Entity::delete_many()
        .filter(catalog_option::Column::Id.eq(&id))
        .filter(catalog_option::Column::Kind.eq(kind))
        .exec(&state.db)
        .await
        .map_err(internal)?;

    if result.rows_affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Catalog option not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}

// ── Contacts ────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/contacts/{kind}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("kind" = String, Path, description = "Contact kind (solicitantes, responsables)")),
    responses(
        (status = 200, description = "Contacts sorted by name", body = ApiResponse<Vec<ContactDto>>),
        (status = 404, description = "Unknown contact kind")
    )
)]
pub async fn list_contacts(
    State(state): State<CatalogHandlerState>,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<ContactDto>>>, (StatusCode, Json<ApiResponse<Vec<ContactDto>>>)> {
    let Some(kind) = ContactKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let rows = contact::Entity::find()
        .filter(contact::Column::Kind.eq(kind))
        .order_by_asc(contact::Column::Nombre)
        .all(&state.db)
        .await
        .map_err(internal)?;

    let items: Vec<ContactDto> = rows.into_iter().map(ContactDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/contacts/{kind}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("kind" = String, Path, description = "Contact kind")),
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ContactDto>),
        (status = 404, description = "Unknown contact kind"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_contact(
    State(state): State<CatalogHandlerState>,
    Path(kind): Path<String>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactDto>>), (StatusCode, Json<ApiResponse<ContactDto>>)>
{
    let Some(kind) = ContactKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let new_contact = contact::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        kind: Set(kind),
        nombre: Set(request.nombre),
        correo: Set(request.correo),
        telefono: Set(request.telefono),
        created_at: Set(Utc::now()),
    };

    let created = new_contact.insert(&state.db).await.map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::error("Name already exists")),
            )
        } else {
            internal(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ContactDto::from(created))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/contacts/{kind}/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Contact kind"),
        ("id" = String, Path, description = "Contact ID")
    ),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ContactDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_contact(
    State(state): State<CatalogHandlerState>,
    Path((kind, id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<Json<ApiResponse<ContactDto>>, (StatusCode, Json<ApiResponse<ContactDto>>)> {
    let Some(kind) = ContactKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let row = contact::Entity::find_by_id(&id)
        .filter(contact::Column::Kind.eq(kind))
        .one(&state.db)
        .await
        .map_err(internal)?;

    let Some(row) = row else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Contact not found")),
        ));
    };

    let mut active: contact::ActiveModel = row.into();
    active.nombre = Set(request.nombre);
    active.correo = Set(request.correo);
    active.telefono = Set(request.telefono);

    let updated = active.update(&state.db).await.map_err(internal)?;
    Ok(Json(ApiResponse::success(ContactDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{kind}/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Contact kind"),
        ("id" = String, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_contact(
    State(state): State<CatalogHandlerState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(kind) = ContactKind::parse(&kind) else {
        return Err(unknown_kind(&kind));
    };

    let result = contact::Entity::delete_many()
        .filter(contact::Column::Id.eq(&id))
        .filter(contact::Column::Kind.eq(kind))
        .exec(&state.db)
        .await
        .map_err(internal)?;

    if result.rows_affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Contact not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
