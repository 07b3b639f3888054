use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Set up test database connection and bring the schema up to date.
/// Uses TEST_DATABASE_URL environment variable or falls back to default.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://crm_user@localhost:5432/crm_test".to_string());

    let db = Database::connect(&database_url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
