//! Attendance, leave balance and user account endpoints.

use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use service::dto::{
    AttendanceInput, AttendanceResponse, LeaveBalanceInput, LeaveBalanceResponse, LeaveBalanceUpdate,
    UserAccountInput, UserResponse,
};
use service::{attendance_service, leave_balance_service, user_service};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/api/employees/{id}/attendance", tag = "records",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = crate::openapi::AttendanceInputDoc,
    responses(
        (status = 201, description = "Recorded", body = crate::openapi::AttendanceDoc),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Already recorded for that date")
    )
)]
pub async fn record_attendance(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<AttendanceInput>, JsonApiError>,
) -> Result<(StatusCode, Json<AttendanceResponse>), JsonApiError> {
    let rec = attendance_service::record_attendance(&state.db, id, &input).await?;
    Ok((StatusCode::CREATED, Json(rec)))
}

#[utoipa::path(
    get, path = "/api/employees/{id}/attendance", tag = "records",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Attendance history by date", body = [crate::openapi::AttendanceDoc]),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn list_attendance(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Vec<AttendanceResponse>>, JsonApiError> {
    Ok(Json(attendance_service::list_attendance(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/employees/{id}/leave-balances", tag = "records",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = crate::openapi::LeaveBalanceInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::LeaveBalanceDoc),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Balance for year and type exists")
    )
)]
pub async fn create_leave_balance(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<LeaveBalanceInput>, JsonApiError>,
) -> Result<(StatusCode, Json<LeaveBalanceResponse>), JsonApiError> {
    let created = leave_balance_service::create_leave_balance(&state.db, id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/employees/{id}/leave-balances", tag = "records",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Balances by year and type", body = [crate::openapi::LeaveBalanceDoc]),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn list_leave_balances(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Vec<LeaveBalanceResponse>>, JsonApiError> {
    Ok(Json(leave_balance_service::list_leave_balances(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/leave-balances/{id}", tag = "records",
    params(("id" = i32, Path, description = "Leave balance ID")),
    request_body = crate::openapi::LeaveBalanceUpdateDoc,
    responses(
        (status = 200, description = "Updated; remainingDays recomputed", body = crate::openapi::LeaveBalanceDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_leave_balance(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<LeaveBalanceUpdate>, JsonApiError>,
) -> Result<Json<LeaveBalanceResponse>, JsonApiError> {
    Ok(Json(leave_balance_service::update_leave_balance(&state.db, id, &input).await?))
}

#[utoipa::path(
    post, path = "/api/users", tag = "records",
    request_body = crate::openapi::UserAccountInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Username taken or employee already linked")
    )
)]
pub async fn create_user(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<UserAccountInput>, JsonApiError>,
) -> Result<(StatusCode, Json<UserResponse>), JsonApiError> {
    let created = user_service::create_user(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/employees/{id}/user", tag = "records",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Linked account", body = crate::openapi::UserDoc),
        (status = 404, description = "No account linked")
    )
)]
pub async fn user_of_employee(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<UserResponse>, JsonApiError> {
    Ok(Json(user_service::get_user_by_employee(&state.db, id).await?))
}
