//! Create `attendance` table with FK to `employee`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendance::Id))
                    .col(integer(Attendance::EmployeeId))
                    .col(date(Attendance::Date))
                    .col(date_time_null(Attendance::CheckInTime))
                    .col(date_time_null(Attendance::CheckOutTime))
                    .col(decimal_len_null(Attendance::HoursWorked, 4, 2))
                    .col(timestamp_with_time_zone(Attendance::CreatedAt))
                    .col(timestamp_with_time_zone(Attendance::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_employee")
                            .from(Attendance::Table, Attendance::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Attendance::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Attendance { Table, Id, EmployeeId, Date, CheckInTime, CheckOutTime, HoursWorked, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Employee { Table, Id }
