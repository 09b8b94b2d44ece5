//! Migration to create quotations table ("Log de Cotizaciones")

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quotations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quotations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Quotations::Cotizacion)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Quotations::Descripcion).text().null())
                    .col(ColumnDef::new(Quotations::Cliente).string_len(255).null())
                    .col(ColumnDef::new(Quotations::UnidadMinera).string_len(255).null())
                    .col(ColumnDef::new(Quotations::TipoServicio).string_len(255).null())
                    .col(ColumnDef::new(Quotations::SolicitadoPor).string_len(255).null())
                    .col(ColumnDef::new(Quotations::CorreoSolicitante).string_len(255).null())
                    .col(ColumnDef::new(Quotations::TelefonoSolicitante).string_len(64).null())
                    .col(ColumnDef::new(Quotations::Prioridad).string_len(32).null())
                    .col(ColumnDef::new(Quotations::StatusCotizacion).string_len(64).null())
                    .col(ColumnDef::new(Quotations::StatusProyecto).string_len(64).null())
                    .col(ColumnDef::new(Quotations::FechaInvitacion).date().null())
                    .col(ColumnDef::new(Quotations::FechaConfirmacion).date().null())
                    .col(ColumnDef::new(Quotations::FechaVisitaTec).date().null())
                    .col(ColumnDef::new(Quotations::FechaConsultas).date().null())
                    .col(ColumnDef::new(Quotations::FechaAbsConsultas).date().null())
                    .col(ColumnDef::new(Quotations::FechaEntrega).date().null())
                    .col(ColumnDef::new(Quotations::LinkCarpetaDrive).text().null())
                    .col(ColumnDef::new(Quotations::Responsable).string_len(255).null())
                    .col(ColumnDef::new(Quotations::CorreoRespTec).string_len(255).null())
                    .col(ColumnDef::new(Quotations::TelefonoRespTec).string_len(64).null())
                    .col(ColumnDef::new(Quotations::ResponsableEconomico).string_len(255).null())
                    .col(ColumnDef::new(Quotations::CorreoRespEco).string_len(255).null())
                    .col(ColumnDef::new(Quotations::TelefonoRespEco).string_len(64).null())
                    .col(ColumnDef::new(Quotations::EstadoPropuesta).string_len(64).null())
                    .col(ColumnDef::new(Quotations::FechaEnvioPropuesta).date().null())
                    .col(ColumnDef::new(Quotations::HoraEnvioPropuesta).string_len(16).null())
                    .col(ColumnDef::new(Quotations::DiasVencimiento).integer().null())
                    .col(
                        ColumnDef::new(Quotations::EnviadoATiempo)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Quotations::RequiereVisitaTecnica)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Quotations::VisitaEjecutada)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Quotations::TiempoRespuestaDias).integer().null())
                    .col(ColumnDef::new(Quotations::SemanaIso).string_len(16).null())
                    .col(ColumnDef::new(Quotations::MesAnio).string_len(16).null())
                    .col(ColumnDef::new(Quotations::Oc).string_len(64).null())
                    .col(ColumnDef::new(Quotations::FOc).date().null())
                    .col(ColumnDef::new(Quotations::Observacion).text().null())
                    .col(ColumnDef::new(Quotations::OfertaTecnica).text().null())
                    .col(ColumnDef::new(Quotations::OfertaEconomica).text().null())
                    .col(ColumnDef::new(Quotations::OfertaUsd).double().null())
                    .col(ColumnDef::new(Quotations::Moneda).string_len(16).null())
                    .col(ColumnDef::new(Quotations::EstadoPipeline).string_len(64).null())
                    .col(
                        ColumnDef::new(Quotations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Quotations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quotations_cliente")
                    .table(Quotations::Table)
                    .col(Quotations::Cliente)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quotations_status")
                    .table(Quotations::Table)
                    .col(Quotations::StatusCotizacion)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quotations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Quotations {
    Table,
    Id,
    Cotizacion,
    Descripcion,
    Cliente,
    UnidadMinera,
    TipoServicio,
    SolicitadoPor,
    CorreoSolicitante,
    TelefonoSolicitante,
    Prioridad,
    StatusCotizacion,
    StatusProyecto,
    FechaInvitacion,
    FechaConfirmacion,
    FechaVisitaTec,
    FechaConsultas,
    FechaAbsConsultas,
    FechaEntrega,
    LinkCarpetaDrive,
    Responsable,
    CorreoRespTec,
    TelefonoRespTec,
    ResponsableEconomico,
    CorreoRespEco,
    TelefonoRespEco,
    EstadoPropuesta,
    FechaEnvioPropuesta,
    HoraEnvioPropuesta,
    DiasVencimiento,
    EnviadoATiempo,
    RequiereVisitaTecnica,
    VisitaEjecutada,
    TiempoRespuestaDias,
    SemanaIso,
    MesAnio,
    Oc,
    FOc,
    Observacion,
    OfertaTecnica,
    OfertaEconomica,
    OfertaUsd,
    Moneda,
    EstadoPipeline,
    CreatedAt,
    UpdatedAt,
}
