use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{info, instrument};

use models::leave_balance;
use crate::dto::{LeaveBalanceInput, LeaveBalanceResponse, LeaveBalanceUpdate};
use crate::employee_service::find_employee;
use crate::errors::ServiceError;

async fn find_balance<C: ConnectionTrait>(db: &C, id: i32) -> Result<leave_balance::Model, ServiceError> {
    leave_balance::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Leave balance", id))
}

/// Open a balance for (employee, year, leave type). `remainingDays` is
/// computed by the entity on save.
#[instrument(skip(db, input), fields(year = input.year, leave_type = %input.leave_type))]
pub async fn create_leave_balance(
    db: &DatabaseConnection,
    employee_id: i32,
    input: &LeaveBalanceInput,
) -> Result<LeaveBalanceResponse, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    find_employee(&txn, employee_id).await?;
    if leave_balance::exists_for(&txn, employee_id, input.year, input.leave_type).await? {
        return Err(ServiceError::conflict(format!(
            "{} leave balance for {} already exists for employee {}",
            input.leave_type, input.year, employee_id
        )));
    }
    let am = leave_balance::ActiveModel {
        employee_id: Set(employee_id),
        year: Set(input.year),
        leave_type: Set(input.leave_type),
        total_days: Set(input.total_days),
        used_days: Set(input.used_days),
        ..Default::default()
    };
    let saved = am.insert(&txn).await?;
    txn.commit().await?;
    info!(employee_id, leave_balance_id = saved.id, "leave_balance_created");
    Ok(saved.into())
}

#[instrument(skip(db, input))]
pub async fn update_leave_balance(
    db: &DatabaseConnection,
    id: i32,
    input: &LeaveBalanceUpdate,
) -> Result<LeaveBalanceResponse, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    let mut am: leave_balance::ActiveModel = find_balance(&txn, id).await?.into();
    am.total_days = Set(input.total_days);
    am.used_days = Set(input.used_days);
    let saved = am.update(&txn).await?;
    txn.commit().await?;
    info!(leave_balance_id = id, remaining = saved.remaining_days, "leave_balance_updated");
    Ok(saved.into())
}

pub async fn list_leave_balances(db: &DatabaseConnection, employee_id: i32) -> Result<Vec<LeaveBalanceResponse>, ServiceError> {
    find_employee(db, employee_id).await?;
    let rows = leave_balance::list_by_employee(db, employee_id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::EmployeeInput;
    use crate::employee_service::create_employee;
    use crate::test_support::get_db;
    use chrono::NaiveDate;
    use models::leave_balance::LeaveType;

    async fn employee(db: &DatabaseConnection) -> Result<i32, anyhow::Error> {
        let hired = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        Ok(create_employee(db, &EmployeeInput::new("Ada", "Lovelace", "ada@x.com", hired)).await?.id)
    }

    #[tokio::test]
    async fn remaining_tracks_total_minus_used() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let emp = employee(&db).await?;
        let input = LeaveBalanceInput { year: 2024, leave_type: LeaveType::Annual, total_days: 20, used_days: 0 };
        let b = create_leave_balance(&db, emp, &input).await?;
        assert_eq!(b.remaining_days, 20);

        let b = update_leave_balance(&db, b.id, &LeaveBalanceUpdate { total_days: 22, used_days: 5 }).await?;
        assert_eq!(b.remaining_days, 17);

        let err = update_leave_balance(&db, 99, &LeaveBalanceUpdate { total_days: 1, used_days: 0 }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Leave balance not found with ID: 99"));
        Ok(())
    }

    #[tokio::test]
    async fn triple_is_unique() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let emp = employee(&db).await?;
        let annual = LeaveBalanceInput { year: 2024, leave_type: LeaveType::Annual, total_days: 20, used_days: 2 };
        create_leave_balance(&db, emp, &annual).await?;
        assert!(matches!(create_leave_balance(&db, emp, &annual).await, Err(ServiceError::Conflict(_))));

        let sick = LeaveBalanceInput { leave_type: LeaveType::Sick, ..annual.clone() };
        create_leave_balance(&db, emp, &sick).await?;
        let next_year = LeaveBalanceInput { year: 2025, ..annual };
        create_leave_balance(&db, emp, &next_year).await?;

        assert_eq!(list_leave_balances(&db, emp).await?.len(), 3);
        assert!(matches!(list_leave_balances(&db, 500).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
