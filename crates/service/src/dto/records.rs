//! Attendance, leave balance and user account shapes.

use chrono::{NaiveDate, NaiveDateTime};
use models::leave_balance::LeaveType;
use models::user::UserRole;
use models::{attendance, leave_balance, user};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    pub date: Option<NaiveDate>,
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
    /// Derived from check-in/out when omitted.
    pub hours_worked: Option<Decimal>,
}

impl AttendanceInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        if self.date.is_none() {
            errs.add("date", "Date is required");
        }
        if let (Some(cin), Some(cout)) = (self.check_in_time, self.check_out_time) {
            if cout < cin {
                errs.add("checkOutTime", "Check-out time must not be before check-in time");
            }
        }
        if let Some(h) = self.hours_worked {
            if h < Decimal::ZERO || h > Decimal::from(24) {
                errs.add("hoursWorked", "Hours worked must be between 0 and 24");
            }
        }
        errs.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: i32,
    pub employee_id: i32,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
    pub hours_worked: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<attendance::Model> for AttendanceResponse {
    fn from(m: attendance::Model) -> Self {
        Self {
            id: m.id,
            employee_id: m.employee_id,
            date: m.date,
            check_in_time: m.check_in_time,
            check_out_time: m.check_out_time,
            hours_worked: m.hours_worked,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn check_days(errs: &mut ValidationErrors, total: i32, used: i32) {
    if total < 0 {
        errs.add("totalDays", "Total days must not be negative");
    }
    if used < 0 {
        errs.add("usedDays", "Used days must not be negative");
    } else if used > total {
        errs.add("usedDays", "Used days must not exceed total days");
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceInput {
    pub year: i32,
    pub leave_type: LeaveType,
    pub total_days: i32,
    #[serde(default)]
    pub used_days: i32,
}

impl LeaveBalanceInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        if !(1900..=9999).contains(&self.year) {
            errs.add("year", "Year must be between 1900 and 9999");
        }
        check_days(&mut errs, self.total_days, self.used_days);
        errs.into_result()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceUpdate {
    pub total_days: i32,
    pub used_days: i32,
}

impl LeaveBalanceUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        check_days(&mut errs, self.total_days, self.used_days);
        errs.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceResponse {
    pub id: i32,
    pub employee_id: i32,
    pub year: i32,
    pub leave_type: LeaveType,
    pub total_days: i32,
    pub used_days: i32,
    pub remaining_days: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<leave_balance::Model> for LeaveBalanceResponse {
    fn from(m: leave_balance::Model) -> Self {
        Self {
            id: m.id,
            employee_id: m.employee_id,
            year: m.year,
            leave_type: m.leave_type,
            total_days: m.total_days,
            used_days: m.used_days,
            remaining_days: m.remaining_days,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<UserRole>,
    pub employee_id: Option<i32>,
}

impl UserAccountInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.required_len("username", &self.username, 3, 50, "Username");
        if self.password.is_empty() {
            errs.add("password", "Password is required");
        } else if self.password.chars().count() < 8 {
            errs.add("password", "Password must be at least 8 characters");
        }
        errs.into_result()
    }
}

/// Account projection; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub employee_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            role: m.role,
            employee_id: m.employee_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
