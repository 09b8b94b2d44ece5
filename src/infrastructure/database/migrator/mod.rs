//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_profiles;
mod m20250101_000002_create_quotations;
mod m20250101_000003_create_requirement_items;
mod m20250101_000004_create_catalogs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_profiles::Migration),
            Box::new(m20250101_000002_create_quotations::Migration),
            Box::new(m20250101_000003_create_requirement_items::Migration),
            Box::new(m20250101_000004_create_catalogs::Migration),
        ]
    }
}
