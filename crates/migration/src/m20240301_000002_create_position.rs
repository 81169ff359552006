//! Create `position` table with FK to `department`.
//!
//! Positions go away with their department; the (title, department) pair is
//! made unique in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Position::Table)
                    .if_not_exists()
                    .col(pk_auto(Position::Id))
                    .col(string_len(Position::Title, 100))
                    .col(text_null(Position::Description))
                    .col(integer(Position::DepartmentId))
                    .col(timestamp_with_time_zone(Position::CreatedAt))
                    .col(timestamp_with_time_zone(Position::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_position_department")
                            .from(Position::Table, Position::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Position::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Position { Table, Id, Title, Description, DepartmentId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Department { Table, Id }
