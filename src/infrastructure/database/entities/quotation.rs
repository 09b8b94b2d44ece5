//! Quotation entity ("Log de Cotizaciones")

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the quotation log. Column names follow the business domain.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Quotation code, `FOR-EKA-PRO-3_{year}-{seq}`
    #[sea_orm(unique)]
    pub cotizacion: String,
    pub descripcion: Option<String>,
    pub cliente: Option<String>,
    pub unidad_minera: Option<String>,
    pub tipo_servicio: Option<String>,

    // Requester
    pub solicitado_por: Option<String>,
    pub correo_solicitante: Option<String>,
    pub telefono_solicitante: Option<String>,

    pub prioridad: Option<String>,
    pub status_cotizacion: Option<String>,
    pub status_proyecto: Option<String>,

    // Date pipeline
    pub fecha_invitacion: Option<NaiveDate>,
    pub fecha_confirmacion: Option<NaiveDate>,
    pub fecha_visita_tec: Option<NaiveDate>,
    pub fecha_consultas: Option<NaiveDate>,
    pub fecha_abs_consultas: Option<NaiveDate>,
    pub fecha_entrega: Option<NaiveDate>,

    pub link_carpeta_drive: Option<String>,

    // Technical responsible
    pub responsable: Option<String>,
    pub correo_resp_tec: Option<String>,
    pub telefono_resp_tec: Option<String>,

    // Economic responsible
    pub responsable_economico: Option<String>,
    pub correo_resp_eco: Option<String>,
    pub telefono_resp_eco: Option<String>,

    // Proposal
    pub estado_propuesta: Option<String>,
    pub fecha_envio_propuesta: Option<NaiveDate>,
    /// Time of day as entered ("14:30")
    pub hora_envio_propuesta: Option<String>,
    pub dias_vencimiento: Option<i32>,
    pub enviado_a_tiempo: bool,
    pub requiere_visita_tecnica: bool,
    pub visita_ejecutada: bool,
    pub tiempo_respuesta_dias: Option<i32>,
    pub semana_iso: Option<String>,
    pub mes_anio: Option<String>,

    // Purchase order
    pub oc: Option<String>,
    pub f_oc: Option<NaiveDate>,

    pub observacion: Option<String>,
    pub oferta_tecnica: Option<String>,
    pub oferta_economica: Option<String>,
    pub oferta_usd: Option<f64>,
    pub moneda: Option<String>,
    pub estado_pipeline: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
