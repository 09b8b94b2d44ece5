//! Migration to create catalog_options and contacts tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogOptions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogOptions::Kind)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogOptions::Nombre)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogOptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // A name is unique within its catalog, not globally
        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_options_kind_nombre")
                    .table(CatalogOptions::Table)
                    .col(CatalogOptions::Kind)
                    .col(CatalogOptions::Nombre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Contacts::Nombre).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::Correo).string_len(255).null())
                    .col(ColumnDef::new(Contacts::Telefono).string_len(64).null())
                    .col(
                        ColumnDef::new(Contacts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_kind_nombre")
                    .table(Contacts::Table)
                    .col(Contacts::Kind)
                    .col(Contacts::Nombre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CatalogOptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CatalogOptions {
    Table,
    Id,
    Kind,
    Nombre,
    CreatedAt,
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    Kind,
    Nombre,
    Correo,
    Telefono,
    CreatedAt,
}
