use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::{BinOper, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};

use models::employee::{self, EmployeeStatus};
use models::{department, position};
use crate::department_service::find_department;
use crate::dto::{EmployeeInput, EmployeeResponse};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::position_service::find_position;

pub(crate) async fn find_employee<C: ConnectionTrait>(db: &C, id: i32) -> Result<employee::Model, ServiceError> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Employee", id))
}

fn email_taken(email: &str) -> ServiceError {
    ServiceError::conflict(format!("Employee with email '{}' already exists", email))
}

/// Columns a paginated listing may sort by, camelCase or snake_case.
fn sort_column(field: &str) -> Option<employee::Column> {
    use employee::Column as C;
    let col = match field {
        "id" => C::Id,
        "firstName" | "first_name" => C::FirstName,
        "lastName" | "last_name" => C::LastName,
        "email" => C::Email,
        "hireDate" | "hire_date" => C::HireDate,
        "dateOfBirth" | "date_of_birth" => C::DateOfBirth,
        "salary" => C::Salary,
        "status" => C::Status,
        "createdAt" | "created_at" => C::CreatedAt,
        "updatedAt" | "updated_at" => C::UpdatedAt,
        _ => return None,
    };
    Some(col)
}

async fn resolve_department<C: ConnectionTrait>(db: &C, id: Option<i32>) -> Result<Option<department::Model>, ServiceError> {
    match id {
        Some(id) => Ok(Some(find_department(db, id).await?)),
        None => Ok(None),
    }
}

async fn resolve_position<C: ConnectionTrait>(db: &C, id: Option<i32>) -> Result<Option<position::Model>, ServiceError> {
    match id {
        Some(id) => Ok(Some(find_position(db, id).await?)),
        None => Ok(None),
    }
}

async fn project<C: ConnectionTrait>(db: &C, m: employee::Model) -> Result<EmployeeResponse, ServiceError> {
    let dept = match m.department_id {
        Some(id) => department::Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    let pos = match m.position_id {
        Some(id) => position::Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    Ok(EmployeeResponse::from_parts(m, dept.as_ref(), pos.as_ref()))
}

/// Project a batch, loading referenced departments and positions once each.
async fn project_all<C: ConnectionTrait>(db: &C, rows: Vec<employee::Model>) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let dept_ids: HashSet<i32> = rows.iter().filter_map(|e| e.department_id).collect();
    let pos_ids: HashSet<i32> = rows.iter().filter_map(|e| e.position_id).collect();

    let depts: HashMap<i32, department::Model> = if dept_ids.is_empty() {
        HashMap::new()
    } else {
        department::Entity::find()
            .filter(department::Column::Id.is_in(dept_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect()
    };
    let positions: HashMap<i32, position::Model> = if pos_ids.is_empty() {
        HashMap::new()
    } else {
        position::Entity::find()
            .filter(position::Column::Id.is_in(pos_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|e| {
            let d = e.department_id.and_then(|id| depts.get(&id));
            let p = e.position_id.and_then(|id| positions.get(&id));
            EmployeeResponse::from_parts(e, d, p)
        })
        .collect())
}

/// Create an employee. Omitted department/position stay unset; given ones must exist.
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_employee(db: &DatabaseConnection, input: &EmployeeInput) -> Result<EmployeeResponse, ServiceError> {
    let today = Utc::now().date_naive();
    input.validate(today)?;
    let hire_date = input.hire_date.unwrap_or(today);

    let txn = db.begin().await?;
    if employee::email_exists(&txn, &input.email).await? {
        return Err(email_taken(&input.email));
    }
    let dept = resolve_department(&txn, input.department_id).await?;
    let pos = resolve_position(&txn, input.position_id).await?;

    let am = employee::ActiveModel {
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        email: Set(input.email.clone()),
        phone: Set(input.phone.clone()),
        date_of_birth: Set(input.date_of_birth),
        hire_date: Set(hire_date),
        salary: Set(input.salary),
        address: Set(input.address.clone()),
        status: Set(input.status.unwrap_or_default()),
        department_id: Set(dept.as_ref().map(|d| d.id)),
        position_id: Set(pos.as_ref().map(|p| p.id)),
        ..Default::default()
    };
    let saved = am.insert(&txn).await?;
    txn.commit().await?;
    info!(employee_id = saved.id, "employee_created");
    Ok(EmployeeResponse::from_parts(saved, dept.as_ref(), pos.as_ref()))
}

/// Overwrite every scalar field. `status` changes only when supplied; an
/// omitted `departmentId` or `positionId` clears that reference.
#[instrument(skip(db, input))]
pub async fn update_employee(db: &DatabaseConnection, id: i32, input: &EmployeeInput) -> Result<EmployeeResponse, ServiceError> {
    let today = Utc::now().date_naive();
    input.validate(today)?;
    let hire_date = input.hire_date.unwrap_or(today);

    let txn = db.begin().await?;
    let found = find_employee(&txn, id).await?;
    if found.email != input.email && employee::email_exists(&txn, &input.email).await? {
        return Err(email_taken(&input.email));
    }
    let dept = resolve_department(&txn, input.department_id).await?;
    let pos = resolve_position(&txn, input.position_id).await?;

    let mut am: employee::ActiveModel = found.into();
    am.first_name = Set(input.first_name.clone());
    am.last_name = Set(input.last_name.clone());
    am.email = Set(input.email.clone());
    am.phone = Set(input.phone.clone());
    am.date_of_birth = Set(input.date_of_birth);
    am.hire_date = Set(hire_date);
    am.salary = Set(input.salary);
    am.address = Set(input.address.clone());
    if let Some(status) = input.status {
        am.status = Set(status);
    }
    am.department_id = Set(dept.as_ref().map(|d| d.id));
    am.position_id = Set(pos.as_ref().map(|p| p.id));
    let saved = am.update(&txn).await?;
    txn.commit().await?;
    info!(employee_id = id, "employee_updated");
    Ok(EmployeeResponse::from_parts(saved, dept.as_ref(), pos.as_ref()))
}

/// Soft delete: status becomes TERMINATED, the row and its history stay.
#[instrument(skip(db))]
pub async fn delete_employee(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    let found = find_employee(&txn, id).await?;
    employee::terminate(&txn, found).await?;
    txn.commit().await?;
    info!(employee_id = id, "employee_terminated");
    Ok(())
}

pub async fn get_employee(db: &DatabaseConnection, id: i32) -> Result<EmployeeResponse, ServiceError> {
    let found = find_employee(db, id).await?;
    project(db, found).await
}

pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let rows = employee::Entity::find()
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

/// One page of employees plus totals. Ties on the sort column fall back to id order.
#[instrument(skip(db))]
pub async fn list_employees_paginated(db: &DatabaseConnection, req: &PageRequest) -> Result<Page<EmployeeResponse>, ServiceError> {
    let (page, size) = req.normalize();
    let col = sort_column(&req.sort_by)
        .ok_or_else(|| ServiceError::invalid("sortBy", format!("Unknown sort field: {}", req.sort_by)))?;
    if req.offset().is_none() {
        return Err(ServiceError::invalid("page", format!("Page index out of range: {}", page)));
    }
    let paginator = employee::Entity::find()
        .order_by(col, req.direction().into())
        .order_by_asc(employee::Column::Id)
        .paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page).await?;
    Ok(Page {
        content: project_all(db, rows).await?,
        page,
        size,
        total_elements: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

/// No existence check on the department; unknown ids give an empty list.
pub async fn list_by_department(db: &DatabaseConnection, department_id: i32) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let rows = employee::Entity::find()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

pub async fn list_by_position(db: &DatabaseConnection, position_id: i32) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let rows = employee::Entity::find()
        .filter(employee::Column::PositionId.eq(position_id))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

pub async fn list_by_status(db: &DatabaseConnection, status: EmployeeStatus) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let rows = employee::Entity::find()
        .filter(employee::Column::Status.eq(status))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

/// Case-insensitive substring match on first name, last name or email.
/// An empty keyword matches everyone.
#[instrument(skip(db))]
pub async fn search_employees(db: &DatabaseConnection, keyword: &str) -> Result<Vec<EmployeeResponse>, ServiceError> {
    // Both sides go through the store's LOWER so they fold the same way.
    let pattern = format!("%{}%", keyword);
    let lower_like = |col: employee::Column| {
        Expr::expr(Func::lower(Expr::col(col))).binary(BinOper::Like, Func::lower(Expr::val(pattern.clone())))
    };
    let rows = employee::Entity::find()
        .filter(
            Condition::any()
                .add(lower_like(employee::Column::FirstName))
                .add(lower_like(employee::Column::LastName))
                .add(lower_like(employee::Column::Email)),
        )
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::department_service::{create_department, get_department};
    use crate::dto::{DepartmentInput, PositionInput};
    use crate::position_service::create_position;
    use crate::test_support::get_db;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn hired() -> NaiveDate { NaiveDate::from_ymd_opt(2019, 4, 15).unwrap() }

    fn input(first: &str, last: &str, email: &str) -> EmployeeInput {
        EmployeeInput::new(first, last, email, hired())
    }

    #[tokio::test]
    async fn create_projects_department_and_position() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let d = create_department(&db, &DepartmentInput::new("Engineering", None)).await?;
        let p = create_position(&db, &PositionInput::new("Engineer", d.id)).await?;

        let mut i = input("Ada", "Lovelace", "ada@x.com");
        i.department_id = Some(d.id);
        i.position_id = Some(p.id);
        i.salary = Some(Decimal::new(8_250_050, 2));
        let e = create_employee(&db, &i).await?;
        assert_eq!(e.status, EmployeeStatus::Active);
        assert_eq!(e.department_name.as_deref(), Some("Engineering"));
        assert_eq!(e.position_title.as_deref(), Some("Engineer"));
        assert!(e.salary.is_some());

        let bare = create_employee(&db, &input("Bob", "Builder", "bob@x.com")).await?;
        assert!(bare.department_id.is_none() && bare.department_name.is_none());
        assert!(bare.position_id.is_none() && bare.position_title.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_and_unknown_refs() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_employee(&db, &input("Ada", "Lovelace", "ada@x.com")).await?;
        let err = create_employee(&db, &input("Ada", "Byron", "ada@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == "Employee with email 'ada@x.com' already exists"));

        let mut i = input("Carl", "Gauss", "carl@x.com");
        i.department_id = Some(12);
        assert!(matches!(create_employee(&db, &i).await, Err(ServiceError::NotFound(_))));
        i.department_id = None;
        i.position_id = Some(13);
        let err = create_employee(&db, &i).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Position not found with ID: 13"));
        Ok(())
    }

    #[tokio::test]
    async fn update_clears_omitted_refs_and_keeps_status() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let d = create_department(&db, &DepartmentInput::new("Engineering", None)).await?;
        let mut i = input("Ada", "Lovelace", "ada@x.com");
        i.department_id = Some(d.id);
        i.status = Some(EmployeeStatus::OnLeave);
        let before = create_employee(&db, &i).await?;
        assert_eq!(before.department_id, Some(d.id));

        let after = update_employee(&db, before.id, &input("Ada", "King", "ada@x.com")).await?;
        assert_eq!(after.last_name, "King");
        assert!(after.department_id.is_none());
        assert_eq!(after.status, EmployeeStatus::OnLeave);
        assert_eq!(get_department(&db, d.id).await?.employee_count, 0);

        let mut active = input("Ada", "King", "ada@x.com");
        active.status = Some(EmployeeStatus::Active);
        assert_eq!(update_employee(&db, before.id, &active).await?.status, EmployeeStatus::Active);
        Ok(())
    }

    #[tokio::test]
    async fn update_email_conflicts_only_with_others() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_employee(&db, &input("Ada", "Lovelace", "ada@x.com")).await?;
        create_employee(&db, &input("Bob", "Builder", "bob@x.com")).await?;

        update_employee(&db, a.id, &input("Ada", "Lovelace", "ada@x.com")).await?;
        let err = update_employee(&db, a.id, &input("Ada", "Lovelace", "bob@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        let err = update_employee(&db, 404, &input("Ada", "Lovelace", "ada@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Employee not found with ID: 404"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_soft() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let e = create_employee(&db, &input("Ada", "Lovelace", "ada@x.com")).await?;
        delete_employee(&db, e.id).await?;

        let found = get_employee(&db, e.id).await?;
        assert_eq!(found.status, EmployeeStatus::Terminated);
        assert_eq!(list_by_status(&db, EmployeeStatus::Terminated).await?.len(), 1);
        assert!(list_by_status(&db, EmployeeStatus::Active).await?.is_empty());
        assert!(matches!(delete_employee(&db, 77).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn paginates_fifteen_employees() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for n in 0..15 {
            create_employee(&db, &input("Emp", &format!("Number{n:02}"), &format!("e{n}@x.com"))).await?;
        }

        let first = list_employees_paginated(&db, &PageRequest::new(0, 10, "id", "ASC")).await?;
        assert_eq!(first.content.len(), 10);
        assert_eq!(first.total_elements, 15);
        assert_eq!(first.total_pages, 2);
        let ids: Vec<i32> = first.content.iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        let second = list_employees_paginated(&db, &PageRequest::new(1, 10, "id", "asc")).await?;
        assert_eq!(second.content.len(), 5);

        let desc = list_employees_paginated(&db, &PageRequest::new(0, 3, "lastName", "desc")).await?;
        assert_eq!(desc.content[0].last_name, "Number14");

        let err = list_employees_paginated(&db, &PageRequest::new(0, 10, "password", "ASC")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.has_field("sortBy")));

        let err = list_employees_paginated(&db, &PageRequest::new(u64::MAX / 2, 10, "id", "ASC")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.has_field("page")));
        let past_end = list_employees_paginated(&db, &PageRequest::new(50, 10, "id", "ASC")).await?;
        assert!(past_end.content.is_empty());
        assert_eq!(past_end.total_elements, 15);
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_names_and_email_case_insensitively() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let smith = create_employee(&db, &input("Anna", "Smith", "anna@x.com")).await?;
        let jsmith = create_employee(&db, &input("John", "Doe", "jsmith@x.com")).await?;
        create_employee(&db, &input("Mary", "Jones", "mary@x.com")).await?;

        let hits: Vec<i32> = search_employees(&db, "smith").await?.iter().map(|e| e.id).collect();
        assert_eq!(hits, vec![smith.id, jsmith.id]);
        assert_eq!(search_employees(&db, "ANNA").await?.len(), 1);
        assert!(search_employees(&db, "zzz").await?.is_empty());
        assert_eq!(search_employees(&db, "").await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn search_folds_keyword_and_columns_alike() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let emile = create_employee(&db, &input("Émile", "Zola", "ez@x.com")).await?;
        create_employee(&db, &input("Anna", "Smith", "anna@x.com")).await?;

        let hits: Vec<i32> = search_employees(&db, "ÉMILE").await?.iter().map(|e| e.id).collect();
        assert_eq!(hits, vec![emile.id]);
        assert_eq!(search_employees(&db, "Émile").await?.len(), 1);
        assert_eq!(search_employees(&db, "zOLA").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn filters_do_not_check_existence() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let d = create_department(&db, &DepartmentInput::new("Ops", None)).await?;
        let p = create_position(&db, &PositionInput::new("Operator", d.id)).await?;
        let mut i = input("Ada", "Lovelace", "ada@x.com");
        i.department_id = Some(d.id);
        i.position_id = Some(p.id);
        create_employee(&db, &i).await?;
        create_employee(&db, &input("Bob", "Builder", "bob@x.com")).await?;

        assert_eq!(list_by_department(&db, d.id).await?.len(), 1);
        assert_eq!(list_by_position(&db, p.id).await?.len(), 1);
        assert!(list_by_department(&db, 999).await?.is_empty());
        assert!(list_by_position(&db, 999).await?.is_empty());
        assert_eq!(list_employees(&db).await?.len(), 2);
        Ok(())
    }
}
