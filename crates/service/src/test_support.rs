#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_in_memory;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the full schema; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
