use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{info, instrument};

use models::attendance;
use crate::dto::{AttendanceInput, AttendanceResponse};
use crate::employee_service::find_employee;
use crate::errors::ServiceError;

/// Record one day of attendance. Hours come from the check-in/out pair when
/// not given explicitly.
#[instrument(skip(db, input))]
pub async fn record_attendance(
    db: &DatabaseConnection,
    employee_id: i32,
    input: &AttendanceInput,
) -> Result<AttendanceResponse, ServiceError> {
    input.validate()?;
    let date = input.date.ok_or_else(|| ServiceError::invalid("date", "Date is required"))?;
    let hours = match (input.hours_worked, input.check_in_time, input.check_out_time) {
        (Some(h), _, _) => Some(h),
        (None, Some(cin), Some(cout)) => attendance::hours_between(cin, cout),
        _ => None,
    };

    let txn = db.begin().await?;
    find_employee(&txn, employee_id).await?;
    if attendance::exists_for_day(&txn, employee_id, date).await? {
        return Err(ServiceError::conflict(format!(
            "Attendance for employee {} on {} already recorded",
            employee_id, date
        )));
    }
    let am = attendance::ActiveModel {
        employee_id: Set(employee_id),
        date: Set(date),
        check_in_time: Set(input.check_in_time),
        check_out_time: Set(input.check_out_time),
        hours_worked: Set(hours),
        ..Default::default()
    };
    let saved = am.insert(&txn).await?;
    txn.commit().await?;
    info!(employee_id, attendance_id = saved.id, "attendance_recorded");
    Ok(saved.into())
}

/// Attendance history of one employee, oldest first. Terminated employees keep theirs.
pub async fn list_attendance(db: &DatabaseConnection, employee_id: i32) -> Result<Vec<AttendanceResponse>, ServiceError> {
    find_employee(db, employee_id).await?;
    let rows = attendance::list_by_employee(db, employee_id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::EmployeeInput;
    use crate::employee_service::{create_employee, delete_employee};
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, d).unwrap() }

    #[tokio::test]
    async fn one_record_per_employee_per_day() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let e = create_employee(&db, &EmployeeInput::new("Ada", "Lovelace", "ada@x.com", day(1))).await?;

        let input = AttendanceInput {
            date: Some(day(4)),
            check_in_time: day(4).and_hms_opt(9, 0, 0),
            check_out_time: day(4).and_hms_opt(17, 30, 0),
            hours_worked: None,
        };
        let rec = record_attendance(&db, e.id, &input).await?;
        assert_eq!(rec.employee_id, e.id);
        assert!(rec.hours_worked.is_some());

        let err = record_attendance(&db, e.id, &input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let next = AttendanceInput { date: Some(day(5)), ..Default::default() };
        record_attendance(&db, e.id, &next).await?;

        let history = list_attendance(&db, e.id).await?;
        assert_eq!(history.iter().map(|a| a.date).collect::<Vec<_>>(), vec![day(4), day(5)]);
        Ok(())
    }

    #[tokio::test]
    async fn history_survives_soft_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let e = create_employee(&db, &EmployeeInput::new("Ada", "Lovelace", "ada@x.com", day(1))).await?;
        record_attendance(&db, e.id, &AttendanceInput { date: Some(day(2)), ..Default::default() }).await?;
        delete_employee(&db, e.id).await?;
        assert_eq!(list_attendance(&db, e.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_employee_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let input = AttendanceInput { date: Some(day(2)), ..Default::default() };
        assert!(matches!(record_attendance(&db, 8, &input).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(list_attendance(&db, 8).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
