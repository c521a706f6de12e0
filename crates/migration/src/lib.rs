pub use sea_orm_migration::prelude::*;

mod m20260110_000000_init;
mod m20260203_000000_order_meta;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000000_init::Migration),
            Box::new(m20260203_000000_order_meta::Migration),
        ]
    }
}
