//! OpenAPI document. The `*Doc` types mirror the camelCase wire shapes of
//! the service DTOs so the service crate stays free of schema derives.

use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DepartmentInputDoc {
    /// 1 to 100 characters, unique
    pub name: String,
    pub description: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DepartmentDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub employee_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PositionInputDoc {
    /// 2 to 100 characters, unique within the department
    pub title: String,
    pub description: Option<String>,
    pub department_id: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PositionDoc {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub department_id: i32,
    pub department_name: String,
    pub employee_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeeInputDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// optional `+`, then 10 to 15 digits
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub hire_date: chrono::NaiveDate,
    /// decimal string or number, must be positive
    pub salary: Option<String>,
    pub address: Option<String>,
    /// ACTIVE, ON_LEAVE or TERMINATED
    pub status: Option<String>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeeDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub hire_date: chrono::NaiveDate,
    pub salary: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub position_id: Option<i32>,
    pub position_title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeePageDoc {
    pub content: Vec<EmployeeDoc>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PageQueryDoc {
    /// 0-based page index, default 0
    pub page: Option<u64>,
    /// page size, default 10, clamped to 1..=100
    pub size: Option<u64>,
    /// default `id`
    pub sort_by: Option<String>,
    /// `ASC` (any case) ascends, anything else descends
    pub sort_dir: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AttendanceInputDoc {
    pub date: chrono::NaiveDate,
    pub check_in_time: Option<chrono::NaiveDateTime>,
    pub check_out_time: Option<chrono::NaiveDateTime>,
    pub hours_worked: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AttendanceDoc {
    pub id: i32,
    pub employee_id: i32,
    pub date: chrono::NaiveDate,
    pub check_in_time: Option<chrono::NaiveDateTime>,
    pub check_out_time: Option<chrono::NaiveDateTime>,
    pub hours_worked: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LeaveBalanceInputDoc {
    pub year: i32,
    /// ANNUAL, SICK, PERSONAL, MATERNITY, PATERNITY or UNPAID
    pub leave_type: String,
    pub total_days: i32,
    pub used_days: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LeaveBalanceUpdateDoc {
    pub total_days: i32,
    pub used_days: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LeaveBalanceDoc {
    pub id: i32,
    pub employee_id: i32,
    pub year: i32,
    pub leave_type: String,
    pub total_days: i32,
    pub used_days: i32,
    pub remaining_days: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserAccountInputDoc {
    pub username: String,
    pub password: String,
    /// ADMIN, HR, MANAGER or EMPLOYEE (default)
    pub role: Option<String>,
    pub employee_id: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::departments::create,
        crate::routes::departments::list,
        crate::routes::departments::get,
        crate::routes::departments::get_by_name,
        crate::routes::departments::update,
        crate::routes::departments::delete,
        crate::routes::positions::create,
        crate::routes::positions::list,
        crate::routes::positions::get,
        crate::routes::positions::by_department,
        crate::routes::positions::update,
        crate::routes::positions::delete,
        crate::routes::employees::create,
        crate::routes::employees::list,
        crate::routes::employees::paginated,
        crate::routes::employees::get,
        crate::routes::employees::update,
        crate::routes::employees::delete,
        crate::routes::employees::by_department,
        crate::routes::employees::by_position,
        crate::routes::employees::by_status,
        crate::routes::employees::search,
        crate::routes::records::record_attendance,
        crate::routes::records::list_attendance,
        crate::routes::records::create_leave_balance,
        crate::routes::records::list_leave_balances,
        crate::routes::records::update_leave_balance,
        crate::routes::records::create_user,
        crate::routes::records::user_of_employee,
    ),
    components(
        schemas(
            HealthResponse,
            DepartmentInputDoc,
            DepartmentDoc,
            PositionInputDoc,
            PositionDoc,
            EmployeeInputDoc,
            EmployeeDoc,
            EmployeePageDoc,
            AttendanceInputDoc,
            AttendanceDoc,
            LeaveBalanceInputDoc,
            LeaveBalanceUpdateDoc,
            LeaveBalanceDoc,
            UserAccountInputDoc,
            UserDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "departments"),
        (name = "positions"),
        (name = "employees"),
        (name = "records")
    )
)]
pub struct ApiDoc;
