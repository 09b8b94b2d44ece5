//! Migration to create requirement_items table ("Detalle Reqs")

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequirementItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequirementItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RequirementItems::NroRequerimiento).string_len(64).null())
                    .col(ColumnDef::new(RequirementItems::Codigo).string_len(64).null())
                    .col(ColumnDef::new(RequirementItems::Descripcion).text().null())
                    .col(ColumnDef::new(RequirementItems::Unidad).string_len(32).null())
                    .col(ColumnDef::new(RequirementItems::Cantidad).double().null())
                    .col(ColumnDef::new(RequirementItems::Oc).string_len(64).null())
                    .col(ColumnDef::new(RequirementItems::Estado).string_len(64).null())
                    .col(ColumnDef::new(RequirementItems::Cotizacion).string_len(64).null())
                    .col(
                        ColumnDef::new(RequirementItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requirement_items_cotizacion")
                    .table(RequirementItems::Table)
                    .col(RequirementItems::Cotizacion)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequirementItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RequirementItems {
    Table,
    Id,
    NroRequerimiento,
    Codigo,
    Descripcion,
    Unidad,
    Cantidad,
    Oc,
    Estado,
    Cotizacion,
    CreatedAt,
}
