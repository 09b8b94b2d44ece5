//! Quotation DTOs
//!
//! The quotation log carries a lot of free-form business fields; the
//! API exposes them as-is, keyed by their domain names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::infrastructure::database::entities::quotation;

/// Quotation API representation (one log row)
#[derive(Debug, Serialize, ToSchema)]
pub struct QuotationDto {
    pub id: String,
    pub cotizacion: String,
    pub descripcion: Option<String>,
    pub cliente: Option<String>,
    pub unidad_minera: Option<String>,
    pub tipo_servicio: Option<String>,
    pub solicitado_por: Option<String>,
    pub correo_solicitante: Option<String>,
    pub telefono_solicitante: Option<String>,
    pub prioridad: Option<String>,
    pub status_cotizacion: Option<String>,
    pub status_proyecto: Option<String>,
    pub fecha_invitacion: Option<NaiveDate>,
    pub fecha_confirmacion: Option<NaiveDate>,
    pub fecha_visita_tec: Option<NaiveDate>,
    pub fecha_consultas: Option<NaiveDate>,
    pub fecha_abs_consultas: Option<NaiveDate>,
    pub fecha_entrega: Option<NaiveDate>,
    pub link_carpeta_drive: Option<String>,
    pub responsable: Option<String>,
    pub correo_resp_tec: Option<String>,
    pub telefono_resp_tec: Option<String>,
    pub responsable_economico: Option<String>,
    pub correo_resp_eco: Option<String>,
    pub telefono_resp_eco: Option<String>,
    pub estado_propuesta: Option<String>,
    pub fecha_envio_propuesta: Option<NaiveDate>,
    pub hora_envio_propuesta: Option<String>,
    pub dias_vencimiento: Option<i32>,
    pub enviado_a_tiempo: bool,
    pub requiere_visita_tecnica: bool,
    pub visita_ejecutada: bool,
    pub tiempo_respuesta_dias: Option<i32>,
    pub semana_iso: Option<String>,
    pub mes_anio: Option<String>,
    pub oc: Option<String>,
    pub f_oc: Option<NaiveDate>,
    pub observacion: Option<String>,
    pub oferta_tecnica: Option<String>,
    pub oferta_economica: Option<String>,
    pub oferta_usd: Option<f64>,
    pub moneda: Option<String>,
    pub estado_pipeline: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<quotation::Model> for QuotationDto {
    fn from(q: quotation::Model) -> Self {
        Self {
            id: q.id,
            cotizacion: q.cotizacion,
            descripcion: q.descripcion,
            cliente: q.cliente,
            unidad_minera: q.unidad_minera,
            tipo_servicio: q.tipo_servicio,
            solicitado_por: q.solicitado_por,
            correo_solicitante: q.correo_solicitante,
            telefono_solicitante: q.telefono_solicitante,
            prioridad: q.prioridad,
            status_cotizacion: q.status_cotizacion,
            status_proyecto: q.status_proyecto,
            fecha_invitacion: q.fecha_invitacion,
            fecha_confirmacion: q.fecha_confirmacion,
            fecha_visita_tec: q.fecha_visita_tec,
            fecha_consultas: q.fecha_consultas,
            fecha_abs_consultas: q.fecha_abs_consultas,
            fecha_entrega: q.fecha_entrega,
            link_carpeta_drive: q.link_carpeta_drive,
            responsable: q.responsable,
            correo_resp_tec: q.correo_resp_tec,
            telefono_resp_tec: q.telefono_resp_tec,
            responsable_economico: q.responsable_economico,
            correo_resp_eco: q.correo_resp_eco,
            telefono_resp_eco: q.telefono_resp_eco,
            estado_propuesta: q.estado_propuesta,
            fecha_envio_propuesta: q.fecha_envio_propuesta,
            hora_envio_propuesta: q.hora_envio_propuesta,
            dias_vencimiento: q.dias_vencimiento,
            enviado_a_tiempo: q.enviado_a_tiempo,
            requiere_visita_tecnica: q.requiere_visita_tecnica,
            visita_ejecutada: q.visita_ejecutada,
            tiempo_respuesta_dias: q.tiempo_respuesta_dias,
            semana_iso: q.semana_iso,
            mes_anio: q.mes_anio,
            oc: q.oc,
            f_oc: q.f_oc,
            observacion: q.observacion,
            oferta_tecnica: q.oferta_tecnica,
            oferta_economica: q.oferta_economica,
            oferta_usd: q.oferta_usd,
            moneda: q.moneda,
            estado_pipeline: q.estado_pipeline,
            created_at: q.created_at.to_rfc3339(),
            updated_at: q.updated_at.to_rfc3339(),
        }
    }
}

/// Shared mutable quotation fields for create/update requests.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuotationFields {
    pub descripcion: Option<String>,
    pub cliente: Option<String>,
    pub unidad_minera: Option<String>,
    pub tipo_servicio: Option<String>,
    pub solicitado_por: Option<String>,
    pub correo_solicitante: Option<String>,
    pub telefono_solicitante: Option<String>,
    pub prioridad: Option<String>,
    pub status_cotizacion: Option<String>,
    pub status_proyecto: Option<String>,
    pub fecha_invitacion: Option<NaiveDate>,
    pub fecha_confirmacion: Option<NaiveDate>,
    pub fecha_visita_tec: Option<NaiveDate>,
    pub fecha_consultas: Option<NaiveDate>,
    pub fecha_abs_consultas: Option<NaiveDate>,
    pub fecha_entrega: Option<NaiveDate>,
    pub link_carpeta_drive: Option<String>,
    pub responsable: Option<String>,
    pub correo_resp_tec: Option<String>,
    pub telefono_resp_tec: Option<String>,
    pub responsable_economico: Option<String>,
    pub correo_resp_eco: Option<String>,
    pub telefono_resp_eco: Option<String>,
    pub estado_propuesta: Option<String>,
    pub fecha_envio_propuesta: Option<NaiveDate>,
    pub hora_envio_propuesta: Option<String>,
    pub dias_vencimiento: Option<i32>,
    #[serde(default)]
    pub enviado_a_tiempo: bool,
    #[serde(default)]
    pub requiere_visita_tecnica: bool,
    #[serde(default)]
    pub visita_ejecutada: bool,
    pub tiempo_respuesta_dias: Option<i32>,
    pub semana_iso: Option<String>,
    pub mes_anio: Option<String>,
    pub oc: Option<String>,
    pub f_oc: Option<NaiveDate>,
    pub observacion: Option<String>,
    pub oferta_tecnica: Option<String>,
    pub oferta_economica: Option<String>,
    pub oferta_usd: Option<f64>,
    pub moneda: Option<String>,
    pub estado_pipeline: Option<String>,
}

/// Create quotation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuotationRequest {
    /// Quotation code. Usually the value suggested by `next-code`.
    pub cotizacion: String,
    #[serde(flatten)]
    pub fields: QuotationFields,
}

/// Update quotation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuotationRequest {
    /// New code, if renaming. Duplicate check excludes the row itself.
    pub cotizacion: Option<String>,
    #[serde(flatten)]
    pub fields: QuotationFields,
}

/// List quotations query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuotationsParams {
    /// Search in code, description and client
    pub search: Option<String>,
    /// Exact client filter
    pub cliente: Option<String>,
    /// Exact quotation status filter
    pub status_cotizacion: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}

/// Suggested next quotation code
#[derive(Debug, Serialize, ToSchema)]
pub struct NextCodeResponse {
    pub codigo: String,
}

/// Code availability probe parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct CheckCodeParams {
    pub codigo: String,
    /// Row to exclude from the duplicate check (when editing)
    pub exclude_id: Option<String>,
}

/// Code availability probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckCodeResponse {
    pub codigo: String,
    pub available: bool,
}
