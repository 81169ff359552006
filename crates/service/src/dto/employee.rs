use chrono::NaiveDate;
use models::employee::{self, EmployeeStatus};
use models::{department, position};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, is_valid_phone, ValidationErrors};

/// Create and update share this shape. On update a missing `status` keeps
/// the stored one, while missing `departmentId`/`positionId` clear the link.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
}

impl EmployeeInput {
    /// Minimal valid input; tests and seeding fill the rest.
    pub fn new(first_name: &str, last_name: &str, email: &str, hire_date: NaiveDate) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            hire_date: Some(hire_date),
            ..Default::default()
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.required_len("firstName", &self.first_name, 2, 50, "First name");
        errs.required_len("lastName", &self.last_name, 2, 50, "Last name");

        if self.email.trim().is_empty() {
            errs.add("email", "Email is required");
        } else if self.email.chars().count() > 100 || !is_valid_email(&self.email) {
            errs.add("email", "Email must be valid");
        }

        if let Some(phone) = &self.phone {
            if !is_valid_phone(phone) {
                errs.add("phone", "Phone number must be valid");
            }
        }
        if let Some(dob) = self.date_of_birth {
            if dob >= today {
                errs.add("dateOfBirth", "Date of birth must be in the past");
            }
        }
        match self.hire_date {
            None => errs.add("hireDate", "Hire date is required"),
            Some(d) if d > today => errs.add("hireDate", "Hire date must be today or in the past"),
            Some(_) => {}
        }
        if let Some(salary) = self.salary {
            if salary <= Decimal::ZERO {
                errs.add("salary", "Salary must be positive");
            }
        }
        errs.max_len("address", self.address.as_deref(), 500, "Address");
        errs.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
    pub status: EmployeeStatus,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub position_id: Option<i32>,
    pub position_title: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl EmployeeResponse {
    /// Denormalizes the linked department and position when present.
    pub fn from_parts(
        m: employee::Model,
        dept: Option<&department::Model>,
        pos: Option<&position::Model>,
    ) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            date_of_birth: m.date_of_birth,
            hire_date: m.hire_date,
            salary: m.salary,
            address: m.address,
            status: m.status,
            department_id: dept.map(|d| d.id),
            department_name: dept.map(|d| d.name.clone()),
            position_id: pos.map(|p| p.id),
            position_title: pos.map(|p| p.title.clone()),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
