//! Migrator registering entity-specific migrations in dependency order.
//! Indexes and composite unique constraints are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_department;
mod m20240301_000002_create_position;
mod m20240301_000003_create_employee;
mod m20240301_000004_create_attendance;
mod m20240301_000005_create_leave_balance;
mod m20240301_000006_create_users;
mod m20240301_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_department::Migration),
            Box::new(m20240301_000002_create_position::Migration),
            Box::new(m20240301_000003_create_employee::Migration),
            Box::new(m20240301_000004_create_attendance::Migration),
            Box::new(m20240301_000005_create_leave_balance::Migration),
            Box::new(m20240301_000006_create_users::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000007_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    async fn memory_db() -> Result<sea_orm_migration::sea_orm::DatabaseConnection, DbErr> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(opts).await
    }

    #[tokio::test]
    async fn up_creates_every_table() -> Result<(), DbErr> {
        let db = memory_db().await?;
        Migrator::up(&db, None).await?;
        let manager = SchemaManager::new(&db);
        for table in ["department", "position", "employee", "attendance", "leave_balance", "users"] {
            assert!(manager.has_table(table).await?, "missing table {table}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn down_drops_everything() -> Result<(), DbErr> {
        let db = memory_db().await?;
        Migrator::up(&db, None).await?;
        Migrator::down(&db, None).await?;
        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("employee").await?);
        assert!(!manager.has_table("department").await?);
        Ok(())
    }
}
