pub use sea_orm_migration::prelude::*;

mod m20250301_000001_reference_tables;
mod m20250301_000002_placement_drive;
mod m20250305_000001_trainers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_reference_tables::Migration),
            Box::new(m20250301_000002_placement_drive::Migration),
            Box::new(m20250305_000001_trainers::Migration),
        ]
    }
}
