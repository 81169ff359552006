use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{info, instrument};

use models::user::{self, UserRole};
use crate::dto::{UserAccountInput, UserResponse};
use crate::employee_service::find_employee;
use crate::errors::ServiceError;

fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
}

/// Check a plain password against a stored PHC hash.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// Create a login account, optionally linked to one employee.
#[instrument(skip(db, input), fields(username = %input.username))]
pub async fn create_user(db: &DatabaseConnection, input: &UserAccountInput) -> Result<UserResponse, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    if user::username_exists(&txn, &input.username).await? {
        return Err(ServiceError::conflict(format!("Username '{}' already exists", input.username)));
    }
    if let Some(employee_id) = input.employee_id {
        find_employee(&txn, employee_id).await?;
        if user::find_by_employee(&txn, employee_id).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "Employee {} already has a user account",
                employee_id
            )));
        }
    }
    let am = user::ActiveModel {
        username: Set(input.username.clone()),
        password: Set(hash_password(&input.password)?),
        role: Set(input.role.unwrap_or(UserRole::Employee)),
        employee_id: Set(input.employee_id),
        ..Default::default()
    };
    let saved = am.insert(&txn).await?;
    txn.commit().await?;
    info!(user_id = saved.id, "user_created");
    Ok(saved.into())
}

/// The account linked to an employee, if any.
pub async fn get_user_by_employee(db: &DatabaseConnection, employee_id: i32) -> Result<UserResponse, ServiceError> {
    user::find_by_employee(db, employee_id)
        .await?
        .map(Into::into)
        .ok_or_else(|| ServiceError::NotFound(format!("User not found for employee ID: {}", employee_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::EmployeeInput;
    use crate::employee_service::create_employee;
    use crate::test_support::get_db;
    use chrono::NaiveDate;
    use sea_orm::EntityTrait;

    fn account(username: &str, employee_id: Option<i32>) -> UserAccountInput {
        UserAccountInput {
            username: username.into(),
            password: "correct horse".into(),
            role: None,
            employee_id,
        }
    }

    #[tokio::test]
    async fn stores_hash_and_links_employee() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let hired = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let e = create_employee(&db, &EmployeeInput::new("Ada", "Lovelace", "ada@x.com", hired)).await?;

        let u = create_user(&db, &account("ada", Some(e.id))).await?;
        assert_eq!(u.role, UserRole::Employee);
        assert_eq!(get_user_by_employee(&db, e.id).await?.id, u.id);

        let stored = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
        assert_ne!(stored.password, "correct horse");
        assert!(verify_password("correct horse", &stored.password));
        assert!(!verify_password("wrong horse", &stored.password));

        let json = serde_json::to_value(&u)?;
        assert!(json.get("password").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn username_and_employee_link_are_unique() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let hired = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let e = create_employee(&db, &EmployeeInput::new("Ada", "Lovelace", "ada@x.com", hired)).await?;

        create_user(&db, &account("ada", Some(e.id))).await?;
        assert!(matches!(create_user(&db, &account("ada", None)).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(create_user(&db, &account("ada2", Some(e.id))).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(create_user(&db, &account("ghost", Some(321))).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(get_user_by_employee(&db, 321).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
