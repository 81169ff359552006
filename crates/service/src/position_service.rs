use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, instrument};

use models::{department, employee, position};
use crate::department_service::find_department;
use crate::dto::{PositionInput, PositionResponse};
use crate::errors::ServiceError;

pub(crate) async fn find_position<C: ConnectionTrait>(db: &C, id: i32) -> Result<position::Model, ServiceError> {
    position::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Position", id))
}

fn title_taken(title: &str) -> ServiceError {
    ServiceError::conflict(format!("Position with title '{}' already exists in this department", title))
}

fn required_department(input: &PositionInput) -> Result<i32, ServiceError> {
    input
        .department_id
        .ok_or_else(|| ServiceError::invalid("departmentId", "Department ID is required"))
}

async fn project<C: ConnectionTrait>(db: &C, m: position::Model) -> Result<PositionResponse, ServiceError> {
    let dept = find_department(db, m.department_id).await?;
    let count = employee::count_by_position(db, m.id).await?;
    Ok(PositionResponse::from_model(m, dept.name, count))
}

/// Project a batch with two extra queries: department names and grouped counts.
async fn project_all<C: ConnectionTrait>(db: &C, rows: Vec<position::Model>) -> Result<Vec<PositionResponse>, ServiceError> {
    let dept_ids: Vec<i32> = rows.iter().map(|p| p.department_id).collect();
    let names: HashMap<i32, String> = department::Entity::find()
        .filter(department::Column::Id.is_in(dept_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    let counts = employee::counts_per_position(db).await?;
    Ok(rows
        .into_iter()
        .map(|p| {
            let name = names.get(&p.department_id).cloned().unwrap_or_default();
            let n = counts.get(&p.id).copied().unwrap_or(0);
            PositionResponse::from_model(p, name, n)
        })
        .collect())
}

/// Create a position; the title must be unique inside its department.
#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_position(db: &DatabaseConnection, input: &PositionInput) -> Result<PositionResponse, ServiceError> {
    input.validate()?;
    let department_id = required_department(input)?;
    let txn = db.begin().await?;
    let dept = find_department(&txn, department_id).await?;
    if position::title_taken(&txn, &input.title, department_id, None).await? {
        return Err(title_taken(&input.title));
    }
    let am = position::ActiveModel {
        title: Set(input.title.clone()),
        description: Set(input.description.clone()),
        department_id: Set(department_id),
        ..Default::default()
    };
    let saved = am.insert(&txn).await?;
    txn.commit().await?;
    info!(position_id = saved.id, department_id, "position_created");
    Ok(PositionResponse::from_model(saved, dept.name, 0))
}

/// Switch department first when it differs, then re-check the resulting
/// (title, department) pair against every other position.
#[instrument(skip(db, input))]
pub async fn update_position(db: &DatabaseConnection, id: i32, input: &PositionInput) -> Result<PositionResponse, ServiceError> {
    input.validate()?;
    let department_id = required_department(input)?;
    let txn = db.begin().await?;
    let found = find_position(&txn, id).await?;
    let dept = find_department(&txn, department_id).await?;
    if position::title_taken(&txn, &input.title, dept.id, Some(id)).await? {
        return Err(title_taken(&input.title));
    }
    let moved = found.department_id != dept.id;
    let mut am: position::ActiveModel = found.into();
    am.department_id = Set(dept.id);
    am.title = Set(input.title.clone());
    am.description = Set(input.description.clone());
    let saved = am.update(&txn).await?;
    let count = employee::count_by_position(&txn, id).await?;
    txn.commit().await?;
    info!(position_id = id, department_id = dept.id, moved, "position_updated");
    Ok(PositionResponse::from_model(saved, dept.name, count))
}

/// Hard delete, refused while any employee references the position.
#[instrument(skip(db))]
pub async fn delete_position(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    find_position(&txn, id).await?;
    let count = employee::count_by_position(&txn, id).await?;
    if count > 0 {
        return Err(ServiceError::conflict(format!(
            "Cannot delete position with {} employees. Please reassign employees first.",
            count
        )));
    }
    position::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(position_id = id, "position_deleted");
    Ok(())
}

pub async fn get_position(db: &DatabaseConnection, id: i32) -> Result<PositionResponse, ServiceError> {
    let found = find_position(db, id).await?;
    project(db, found).await
}

pub async fn list_positions(db: &DatabaseConnection) -> Result<Vec<PositionResponse>, ServiceError> {
    let rows = position::Entity::find()
        .order_by_asc(position::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

/// Positions of one department. Unlike the employee filters, an unknown
/// department is NotFound rather than an empty list.
pub async fn list_positions_by_department(db: &DatabaseConnection, department_id: i32) -> Result<Vec<PositionResponse>, ServiceError> {
    find_department(db, department_id).await?;
    let rows = position::list_by_department(db, department_id).await?;
    project_all(db, rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::department_service::create_department;
    use crate::dto::{DepartmentInput, EmployeeInput};
    use crate::employee_service::create_employee;
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    async fn two_departments(db: &DatabaseConnection) -> Result<(i32, i32), anyhow::Error> {
        let a = create_department(db, &DepartmentInput::new("Engineering", None)).await?;
        let b = create_department(db, &DepartmentInput::new("Marketing", None)).await?;
        Ok((a.id, b.id))
    }

    #[tokio::test]
    async fn title_unique_per_department_only() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (eng, mkt) = two_departments(&db).await?;

        let p = create_position(&db, &PositionInput::new("Lead", eng)).await?;
        assert_eq!(p.department_name, "Engineering");
        assert_eq!(p.employee_count, 0);

        let err = create_position(&db, &PositionInput::new("Lead", eng)).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => assert_eq!(msg, "Position with title 'Lead' already exists in this department"),
            other => panic!("expected conflict, got {other:?}"),
        }

        let other = create_position(&db, &PositionInput::new("Lead", mkt)).await?;
        assert_eq!(other.department_id, mkt);
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_existing_department() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_position(&db, &PositionInput::new("Lead", 42)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Department not found with ID: 42"));
        Ok(())
    }

    #[tokio::test]
    async fn moving_department_rechecks_title() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (eng, mkt) = two_departments(&db).await?;
        let lead_eng = create_position(&db, &PositionInput::new("Lead", eng)).await?;
        create_position(&db, &PositionInput::new("Lead", mkt)).await?;
        let analyst = create_position(&db, &PositionInput::new("Analyst", eng)).await?;

        // same title, same department, itself excluded
        let kept = update_position(&db, lead_eng.id, &PositionInput::new("Lead", eng)).await?;
        assert_eq!(kept.department_id, eng);

        let err = update_position(&db, lead_eng.id, &PositionInput::new("Lead", mkt)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let moved = update_position(&db, analyst.id, &PositionInput::new("Analyst", mkt)).await?;
        assert_eq!(moved.department_id, mkt);
        assert_eq!(moved.department_name, "Marketing");

        let err = update_position(&db, analyst.id, &PositionInput::new("Analyst", 77)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = update_position(&db, 555, &PositionInput::new("Analyst", eng)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Position not found with ID: 555"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_blocked_while_staffed() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (eng, _) = two_departments(&db).await?;
        let p = create_position(&db, &PositionInput::new("Engineer", eng)).await?;
        let mut input = EmployeeInput::new("Alan", "Turing", "alan@x.com", NaiveDate::from_ymd_opt(2020, 2, 3).unwrap());
        input.position_id = Some(p.id);
        create_employee(&db, &input).await?;

        assert_eq!(get_position(&db, p.id).await?.employee_count, 1);
        let err = delete_position(&db, p.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m.starts_with("Cannot delete position with 1 employees")));

        let empty = create_position(&db, &PositionInput::new("Intern", eng)).await?;
        delete_position(&db, empty.id).await?;
        assert!(matches!(get_position(&db, empty.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn by_department_checks_department_exists() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (eng, mkt) = two_departments(&db).await?;
        create_position(&db, &PositionInput::new("Engineer", eng)).await?;
        create_position(&db, &PositionInput::new("Architect", eng)).await?;

        let listed = list_positions_by_department(&db, eng).await?;
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|p| p.department_name == "Engineering"));

        assert!(list_positions_by_department(&db, mkt).await?.is_empty());
        let err = list_positions_by_department(&db, 99).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        assert_eq!(list_positions(&db).await?.len(), 2);
        Ok(())
    }
}
