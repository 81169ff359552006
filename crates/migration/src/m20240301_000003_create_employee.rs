//! Create `employee` table with optional FKs to `department` and `position`.
//!
//! Rows are never removed by the application; deletion is a status change.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::FirstName, 50))
                    .col(string_len(Employee::LastName, 50))
                    .col(string_len(Employee::Email, 100).unique_key())
                    .col(string_len_null(Employee::Phone, 20))
                    .col(date_null(Employee::DateOfBirth))
                    .col(date(Employee::HireDate))
                    .col(decimal_len_null(Employee::Salary, 10, 2))
                    .col(text_null(Employee::Address))
                    .col(string_len(Employee::Status, 20))
                    .col(integer_null(Employee::DepartmentId))
                    .col(integer_null(Employee::PositionId))
                    .col(timestamp_with_time_zone(Employee::CreatedAt))
                    .col(timestamp_with_time_zone(Employee::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employee::Table, Employee::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_position")
                            .from(Employee::Table, Employee::PositionId)
                            .to(Position::Table, Position::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    HireDate,
    Salary,
    Address,
    Status,
    DepartmentId,
    PositionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Department { Table, Id }

#[derive(DeriveIden)]
enum Position { Table, Id }
