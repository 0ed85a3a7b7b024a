pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_tables;
mod m20250302_000001_create_comments;
mod m20250303_000001_reservation_active_marker;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_tables::Migration),
            Box::new(m20250302_000001_create_comments::Migration),
            Box::new(m20250303_000001_reservation_active_marker::Migration),
        ]
    }
}
