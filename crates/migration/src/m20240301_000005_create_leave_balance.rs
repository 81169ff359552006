//! Create `leave_balance` table with FK to `employee`.
//!
//! `remaining_days` is written by the entity on every save, never by callers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveBalance::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaveBalance::Id))
                    .col(integer(LeaveBalance::EmployeeId))
                    .col(integer(LeaveBalance::Year))
                    .col(string_len(LeaveBalance::LeaveType, 20))
                    .col(integer(LeaveBalance::TotalDays))
                    .col(integer(LeaveBalance::UsedDays).default(0))
                    .col(integer(LeaveBalance::RemainingDays))
                    .col(timestamp_with_time_zone(LeaveBalance::CreatedAt))
                    .col(timestamp_with_time_zone(LeaveBalance::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_balance_employee")
                            .from(LeaveBalance::Table, LeaveBalance::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LeaveBalance::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LeaveBalance { Table, Id, EmployeeId, Year, LeaveType, TotalDays, UsedDays, RemainingDays, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Employee { Table, Id }
