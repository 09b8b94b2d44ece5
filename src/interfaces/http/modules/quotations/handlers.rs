//! Quotation log handlers
//!
//! Create requires the caller's effective `can_create_quote`, update and
//! delete require `can_edit_quote`. Column-level visibility stays a
//! client concern; the API always returns full rows.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::dto::{
    CheckCodeParams, CheckCodeResponse, CreateQuotationRequest, ListQuotationsParams,
    NextCodeResponse, QuotationDto, QuotationFields, UpdateQuotationRequest,
};
use crate::domain::quote_code::{next_quote_code, QUOTE_CODE_PREFIX};
use crate::infrastructure::database::entities::quotation;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::AuthenticatedProfile;

/// Quotation handler state
#[derive(Clone)]
pub struct QuotationHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

fn internal<T>(e: impl ToString) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

fn apply_fields(active: &mut quotation::ActiveModel, fields: QuotationFields) {
    active.descripcion = Set(fields.descripcion);
    active.cliente = Set(fields.cliente);
    active.unidad_minera = Set(fields.unidad_minera);
    active.tipo_servicio = Set(fields.tipo_servicio);
    active.solicitado_por = Set(fields.solicitado_por);
    active.correo_solicitante = Set(fields.correo_solicitante);
    active.telefono_solicitante = Set(fields.telefono_solicitante);
    active.prioridad = Set(fields.prioridad);
    active.status_cotizacion = Set(fields.status_cotizacion);
    active.status_proyecto = Set(fields.status_proyecto);
    active.fecha_invitacion = Set(fields.fecha_invitacion);
    active.fecha_confirmacion = Set(fields.fecha_confirmacion);
    active.fecha_visita_tec = Set(fields.fecha_visita_tec);
    active.fecha_consultas = Set(fields.fecha_consultas);
    active.fecha_abs_consultas = Set(fields.fecha_abs_consultas);
    active.fecha_entrega = Set(fields.fecha_entrega);
    active.link_carpeta_drive = Set(fields.link_carpeta_drive);
    active.responsable = Set(fields.responsable);
    active.correo_resp_tec = Set(fields.correo_resp_tec);
    active.telefono_resp_tec = Set(fields.telefono_resp_tec);
    active.responsable_economico = Set(fields.responsable_economico);
    active.correo_resp_eco = Set(fields.correo_resp_eco);
    active.telefono_resp_eco = Set(fields.telefono_resp_eco);
    active.estado_propuesta = Set(fields.estado_propuesta);
    active.fecha_envio_propuesta = Set(fields.fecha_envio_propuesta);
    active.hora_envio_propuesta = Set(fields.hora_envio_propuesta);
    active.dias_vencimiento = Set(fields.dias_vencimiento);
    active.enviado_a_tiempo = Set(fields.enviado_a_tiempo);
    active.requiere_visita_tecnica = Set(fields.requiere_visita_tecnica);
    active.visita_ejecutada = Set(fields.visita_ejecutada);
    active.tiempo_respuesta_dias = Set(fields.tiempo_respuesta_dias);
    active.semana_iso = Set(fields.semana_iso);
    active.mes_anio = Set(fields.mes_anio);
    active.oc = Set(fields.oc);
    active.f_oc = Set(fields.f_oc);
    active.observacion = Set(fields.observacion);
    active.oferta_tecnica = Set(fields.oferta_tecnica);
    active.oferta_economica = Set(fields.oferta_economica);
    active.oferta_usd = Set(fields.oferta_usd);
    active.moneda = Set(fields.moneda);
    active.estado_pipeline = Set(fields.estado_pipeline);
}

async fn code_taken(
    db: &sea_orm::DatabaseConnection,
    codigo: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sea_orm::DbErr> {
    let mut query = quotation::Entity::find().filter(quotation::Column::Cotizacion.eq(codigo));
    if let Some(id) = exclude_id {
        query = query.filter(quotation::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

#[utoipa::path(
    get,
    path = "/api/v1/quotations",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    params(ListQuotationsParams),
    responses(
        (status = 200, description = "Quotation list", body = PaginatedResponse<QuotationDto>)
    )
)]
pub async fn list_quotations(
    State(state): State<QuotationHandlerState>,
    Query(params): Query<ListQuotationsParams>,
) -> Result<Json<PaginatedResponse<QuotationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut query = quotation::Entity::find().order_by_desc(quotation::Column::CreatedAt);

    if let Some(ref search) = params.search {
        query = query.filter(
            quotation::Column::Cotizacion
                .contains(search)
                .or(quotation::Column::Descripcion.contains(search))
                .or(quotation::Column::Cliente.contains(search)),
        );
    }
    if let Some(ref cliente) = params.cliente {
        query = query.filter(quotation::Column::Cliente.eq(cliente));
    }
    if let Some(ref status) = params.status_cotizacion {
        query = query.filter(quotation::Column::StatusCotizacion.eq(status));
    }

    let total = query.clone().count(&state.db).await.map_err(internal)?;

    let page = params.page.max(1);
    let page_size = params.page_size.clamp(1, 100);
    let offset = ((page - 1) * page_size) as u64;

    let rows = query
        .offset(offset)
        .limit(page_size as u64)
        .all(&state.db)
        .await
        .map_err(internal)?;

    let items: Vec<QuotationDto> = rows.into_iter().map(QuotationDto::from).collect();
    Ok(Json(PaginatedResponse::new(items, total, page, page_size)))
}

#[utoipa::path(
    get,
    path = "/api/v1/quotations/next-code",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Suggested next code for the current year", body = ApiResponse<NextCodeResponse>)
    )
)]
pub async fn next_code(
    State(state): State<QuotationHandlerState>,
) -> Result<Json<ApiResponse<NextCodeResponse>>, (StatusCode, Json<ApiResponse<NextCodeResponse>>)>
{
    // Lexicographically last scheme code; zero-padded sequences make
    // string order agree with numeric order within a year.
    let last = quotation::Entity::find()
        .filter(quotation::Column::Cotizacion.starts_with(QUOTE_CODE_PREFIX))
        .order_by_desc(quotation::Column::Cotizacion)
        .one(&state.db)
        .await
        .map_err(internal)?;

    let year = Utc::now().year();
    let codigo = next_quote_code(last.as_ref().map(|q| q.cotizacion.as_str()), year);

    Ok(Json(ApiResponse::success(NextCodeResponse { codigo })))
}

#[utoipa::path(
    get,
    path = "/api/v1/quotations/check-code",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    params(CheckCodeParams),
    responses(
        (status = 200, description = "Code availability", body = ApiResponse<CheckCodeResponse>)
    )
)]
pub async fn check_code(
    State(state): State<QuotationHandlerState>,
    Query(params): Query<CheckCodeParams>,
) -> Result<Json<ApiResponse<CheckCodeResponse>>, (StatusCode, Json<ApiResponse<CheckCodeResponse>>)>
{
    let taken = code_taken(&state.db, &params.codigo, params.exclude_id.as_deref())
        .await
        .map_err(internal)?;

    Ok(Json(ApiResponse::success(CheckCodeResponse {
        codigo: params.codigo,
        available: !taken,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/quotations/{id}",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Quotation ID")),
    responses(
        (status = 200, description = "Quotation details", body = ApiResponse<QuotationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_quotation(
    State(state): State<QuotationHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QuotationDto>>, (StatusCode, Json<ApiResponse<QuotationDto>>)> {
    let row = quotation::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(internal)?;

    match row {
        Some(q) => Ok(Json(ApiResponse::success(QuotationDto::from(q)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Quotation not found")),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/quotations",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    request_body = CreateQuotationRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<QuotationDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller cannot create quotations"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_quotation(
    State(state): State<QuotationHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Json(request): Json<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuotationDto>>), (StatusCode, Json<ApiResponse<QuotationDto>>)>
{
    let Some(caller) = caller else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };
    if !caller.can_create_quote() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Caller cannot create quotations")),
        ));
    }

    if request.cotizacion.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Quotation code cannot be empty")),
        ));
    }

    if code_taken(&state.db, &request.cotizacion, None)
        .await
        .map_err(internal)?
    {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(format!(
                "Quotation code '{}' already exists",
                request.cotizacion
            ))),
        ));
    }

    let now = Utc::now();
    let mut active = quotation::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        cotizacion: Set(request.cotizacion),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply_fields(&mut active, request.fields);

    // The unique column is the real duplicate guard; a concurrent insert
    // between the check above and here still surfaces as an error.
    let created = active.insert(&state.db).await.map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::error("Quotation code already exists")),
            )
        } else {
            internal(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(QuotationDto::from(created))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/quotations/{id}",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Quotation ID")),
    request_body = UpdateQuotationRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<QuotationDto>),
        (status = 403, description = "Caller cannot edit quotations"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn update_quotation(
    State(state): State<QuotationHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuotationRequest>,
) -> Result<Json<ApiResponse<QuotationDto>>, (StatusCode, Json<ApiResponse<QuotationDto>>)> {
    let Some(caller) = caller else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };
    if !caller.can_edit_quote() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Caller cannot edit quotations")),
        ));
    }

    let row = quotation::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(internal)?;

    let Some(row) = row else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Quotation not found")),
        ));
    };

    if let Some(ref codigo) = request.cotizacion {
        if code_taken(&state.db, codigo, Some(&id))
            .await
            .map_err(internal)?
        {
            return Err((
                StatusCode::CONFLICT,
                Json(ApiResponse::error(format!(
                    "Quotation code '{}' already exists",
                    codigo
                ))),
            ));
        }
    }

    let mut active: quotation::ActiveModel = row.into();
    if let Some(codigo) = request.cotizacion {
        active.cotizacion = Set(codigo);
    }
    apply_fields(&mut active, request.fields);
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await.map_err(internal)?;
    Ok(Json(ApiResponse::success(QuotationDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/quotations/{id}",
    tag = "Quotations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Quotation ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Caller cannot edit quotations"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_quotation(
    State(state): State<QuotationHandlerState>,
    caller: Option<axum::Extension<AuthenticatedProfile>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(caller) = caller else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };
    if !caller.can_edit_quote() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Caller cannot edit quotations")),
        ));
    }

    let result = quotation::Entity::delete_by_id(&id)
        .exec(&state.db)
        .await
        .map_err(internal)?;

    if result.rows_affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Quotation not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
