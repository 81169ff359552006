use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};

use models::{department, employee};
use crate::dto::{DepartmentInput, DepartmentResponse};
use crate::errors::ServiceError;

/// Load a department or fail with NotFound.
pub(crate) async fn find_department<C: ConnectionTrait>(db: &C, id: i32) -> Result<department::Model, ServiceError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Department", id))
}

async fn project<C: ConnectionTrait>(db: &C, m: department::Model) -> Result<DepartmentResponse, ServiceError> {
    let count = employee::count_by_department(db, m.id).await?;
    Ok(DepartmentResponse::from_model(m, count))
}

fn name_taken(name: &str) -> ServiceError {
    ServiceError::conflict(format!("Department with name '{}' already exists", name))
}

/// Create a department with a unique name.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_department(db: &DatabaseConnection, input: &DepartmentInput) -> Result<DepartmentResponse, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    if department::name_exists(&txn, &input.name).await? {
        return Err(name_taken(&input.name));
    }
    let am = department::ActiveModel {
        name: Set(input.name.clone()),
        description: Set(input.description.clone()),
        ..Default::default()
    };
    let saved = am.insert(&txn).await?;
    txn.commit().await?;
    info!(department_id = saved.id, "department_created");
    Ok(DepartmentResponse::from_model(saved, 0))
}

/// Overwrite name and description. Renaming re-checks uniqueness against other departments.
#[instrument(skip(db, input))]
pub async fn update_department(db: &DatabaseConnection, id: i32, input: &DepartmentInput) -> Result<DepartmentResponse, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    let found = find_department(&txn, id).await?;
    if found.name != input.name && department::name_exists(&txn, &input.name).await? {
        return Err(name_taken(&input.name));
    }
    let mut am: department::ActiveModel = found.into();
    am.name = Set(input.name.clone());
    am.description = Set(input.description.clone());
    let saved = am.update(&txn).await?;
    let resp = project(&txn, saved).await?;
    txn.commit().await?;
    info!(department_id = id, "department_updated");
    Ok(resp)
}

/// Hard delete, refused while any employee (of any status) references the department
/// or holds one of its positions. Its positions go with it.
#[instrument(skip(db))]
pub async fn delete_department(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    find_department(&txn, id).await?;
    let count = employee::count_by_department(&txn, id).await?;
    if count > 0 {
        return Err(ServiceError::conflict(format!(
            "Cannot delete department with {} employees. Please reassign employees first.",
            count
        )));
    }
    let holders = employee::count_by_positions_of_department(&txn, id).await?;
    if holders > 0 {
        return Err(ServiceError::conflict(format!(
            "Cannot delete department whose positions are held by {} employees. Please reassign employees first.",
            holders
        )));
    }
    department::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(department_id = id, "department_deleted");
    Ok(())
}

pub async fn get_department(db: &DatabaseConnection, id: i32) -> Result<DepartmentResponse, ServiceError> {
    let found = find_department(db, id).await?;
    project(db, found).await
}

pub async fn get_department_by_name(db: &DatabaseConnection, name: &str) -> Result<DepartmentResponse, ServiceError> {
    let found = department::find_by_name(db, name)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Department not found with name: {}", name)))?;
    project(db, found).await
}

/// All departments ordered by id, counts fetched in a single grouped query.
pub async fn list_departments(db: &DatabaseConnection) -> Result<Vec<DepartmentResponse>, ServiceError> {
    let rows = department::Entity::find()
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?;
    let counts = employee::counts_per_department(db).await?;
    Ok(rows
        .into_iter()
        .map(|d| {
            let n = counts.get(&d.id).copied().unwrap_or(0);
            DepartmentResponse::from_model(d, n)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{EmployeeInput, PositionInput};
    use crate::test_support::get_db;
    use crate::{employee_service, position_service};
    use chrono::NaiveDate;

    fn hired() -> NaiveDate { NaiveDate::from_ymd_opt(2021, 9, 1).unwrap() }

    #[tokio::test]
    async fn duplicate_name_conflicts() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let d = create_department(&db, &DepartmentInput::new("Engineering", None)).await?;
        assert_eq!(d.employee_count, 0);

        let err = create_department(&db, &DepartmentInput::new("Engineering", Some("again"))).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => assert_eq!(msg, "Department with name 'Engineering' already exists"),
            other => panic!("expected conflict, got {other:?}"),
        }

        // comparison is case-sensitive as stored
        create_department(&db, &DepartmentInput::new("engineering", None)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_rename_rules() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let eng = create_department(&db, &DepartmentInput::new("Engineering", None)).await?;
        create_department(&db, &DepartmentInput::new("Sales", None)).await?;

        // keeping its own name is not a conflict
        let same = update_department(&db, eng.id, &DepartmentInput::new("Engineering", Some("R&D"))).await?;
        assert_eq!(same.description.as_deref(), Some("R&D"));

        let err = update_department(&db, eng.id, &DepartmentInput::new("Sales", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let err = update_department(&db, 999, &DepartmentInput::new("Ops", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Department not found with ID: 999"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_blocked_by_employees_even_terminated() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let d = create_department(&db, &DepartmentInput::new("Engineering", None)).await?;
        assert_eq!(d.id, 1);

        let mut input = EmployeeInput::new("Ada", "Lovelace", "a@x.com", hired());
        input.department_id = Some(d.id);
        let e = employee_service::create_employee(&db, &input).await?;
        assert_eq!(get_department(&db, d.id).await?.employee_count, 1);

        let err = delete_department(&db, d.id).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => assert!(msg.starts_with("Cannot delete department with 1 employees")),
            other => panic!("expected conflict, got {other:?}"),
        }

        employee_service::delete_employee(&db, e.id).await?;
        assert_eq!(get_department(&db, d.id).await?.employee_count, 1);
        assert!(matches!(delete_department(&db, d.id).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_empty_department_removes_it_and_its_positions() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let d = create_department(&db, &DepartmentInput::new("Support", None)).await?;
        let p = position_service::create_position(&db, &PositionInput::new("Agent", d.id)).await?;

        delete_department(&db, d.id).await?;
        assert!(matches!(get_department(&db, d.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(position_service::get_position(&db, p.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_department(&db, d.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_blocked_while_its_positions_are_held_elsewhere() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_department(&db, &DepartmentInput::new("Sales", None)).await?;
        let b = create_department(&db, &DepartmentInput::new("Marketing", None)).await?;
        let p = position_service::create_position(&db, &PositionInput::new("Copywriter", b.id)).await?;

        let mut input = EmployeeInput::new("Ada", "Lovelace", "a@x.com", hired());
        input.department_id = Some(a.id);
        input.position_id = Some(p.id);
        let e = employee_service::create_employee(&db, &input).await?;

        let err = delete_department(&db, b.id).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => {
                assert!(msg.starts_with("Cannot delete department whose positions are held by 1 employees"))
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(position_service::get_position(&db, p.id).await?.employee_count, 1);
        assert_eq!(employee_service::get_employee(&db, e.id).await?.position_id, Some(p.id));
        Ok(())
    }

    #[tokio::test]
    async fn lookup_by_name_and_listing()-> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_department(&db, &DepartmentInput::new("Finance", None)).await?;
        let b = create_department(&db, &DepartmentInput::new("Legal", None)).await?;

        let mut input = EmployeeInput::new("Grace", "Hopper", "grace@x.com", hired());
        input.department_id = Some(b.id);
        employee_service::create_employee(&db, &input).await?;

        assert_eq!(get_department_by_name(&db, "Legal").await?.id, b.id);
        let err = get_department_by_name(&db, "Nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Department not found with name: Nope"));

        let all = list_departments(&db).await?;
        assert_eq!(all.iter().map(|d| d.id).collect::<Vec<_>>(), vec![a.id, b.id]);
        assert_eq!(all[0].employee_count, 0);
        assert_eq!(all[1].employee_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_store() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_department(&db, &DepartmentInput::new("", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.has_field("name")));
        assert!(list_departments(&db).await?.is_empty());
        Ok(())
    }
}
