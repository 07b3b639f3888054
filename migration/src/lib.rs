pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_account;
mod m20260801_000002_create_dealer;
mod m20260801_000003_create_opportunity;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_account::Migration),
            Box::new(m20260801_000002_create_dealer::Migration),
            Box::new(m20260801_000003_create_opportunity::Migration),
        ]
    }
}
