use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Position: composite unique (title, department_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_position_title_department")
                    .table(Position::Table)
                    .col(Position::Title)
                    .col(Position::DepartmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Attendance: one row per employee per day
        manager
            .create_index(
                Index::create()
                    .name("uniq_attendance_employee_date")
                    .table(Attendance::Table)
                    .col(Attendance::EmployeeId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // LeaveBalance: one row per employee, year and leave type
        manager
            .create_index(
                Index::create()
                    .name("uniq_leave_balance_employee_year_type")
                    .table(LeaveBalance::Table)
                    .col(LeaveBalance::EmployeeId)
                    .col(LeaveBalance::Year)
                    .col(LeaveBalance::LeaveType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Employee: lookup/count paths
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_department")
                    .table(Employee::Table)
                    .col(Employee::DepartmentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_position")
                    .table(Employee::Table)
                    .col(Employee::PositionId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_status")
                    .table(Employee::Table)
                    .col(Employee::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_position_title_department").table(Position::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_attendance_employee_date").table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_leave_balance_employee_year_type").table(LeaveBalance::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_department").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_position").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_status").table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Position { Table, Title, DepartmentId }

#[derive(DeriveIden)]
enum Attendance { Table, EmployeeId, Date }

#[derive(DeriveIden)]
enum LeaveBalance { Table, EmployeeId, Year, LeaveType }

#[derive(DeriveIden)]
enum Employee { Table, DepartmentId, PositionId, Status }
