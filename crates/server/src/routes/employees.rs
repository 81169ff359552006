use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use models::employee::EmployeeStatus;
use serde::Deserialize;
use service::dto::{EmployeeInput, EmployeeResponse};
use service::employee_service;
use service::errors::ServiceError;
use service::pagination::{Page, PageRequest};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched case-insensitively against first name, last name and email.
    #[serde(default)]
    pub keyword: String,
}

#[utoipa::path(
    post, path = "/api/employees", tag = "employees",
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Department or position not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<EmployeeInput>, JsonApiError>,
) -> Result<(StatusCode, Json<EmployeeResponse>), JsonApiError> {
    let created = employee_service::create_employee(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/employees", tag = "employees",
    responses((status = 200, description = "All employees, any status", body = [crate::openapi::EmployeeDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_service::list_employees(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/employees/paginated", tag = "employees",
    params(crate::openapi::PageQueryDoc),
    responses(
        (status = 200, description = "One page of employees", body = crate::openapi::EmployeePageDoc),
        (status = 400, description = "Unknown sort field")
    )
)]
pub async fn paginated(
    State(state): State<ServerState>,
    WithRejection(Query(req), _): WithRejection<Query<PageRequest>, JsonApiError>,
) -> Result<Json<Page<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_service::list_employees_paginated(&state.db, &req).await?))
}

#[utoipa::path(
    get, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    Ok(Json(employee_service::get_employee(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 200, description = "Updated; omitted departmentId/positionId are cleared", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Employee, department or position not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<EmployeeInput>, JsonApiError>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    Ok(Json(employee_service::update_employee(&state.db, id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Status set to TERMINATED"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    employee_service::delete_employee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/employees/department/{department_id}", tag = "employees",
    params(("department_id" = i32, Path, description = "Department ID")),
    responses((status = 200, description = "Employees in the department; empty for unknown ids", body = [crate::openapi::EmployeeDoc]))
)]
pub async fn by_department(
    State(state): State<ServerState>,
    WithRejection(Path(department_id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_service::list_by_department(&state.db, department_id).await?))
}

#[utoipa::path(
    get, path = "/api/employees/position/{position_id}", tag = "employees",
    params(("position_id" = i32, Path, description = "Position ID")),
    responses((status = 200, description = "Employees holding the position", body = [crate::openapi::EmployeeDoc]))
)]
pub async fn by_position(
    State(state): State<ServerState>,
    WithRejection(Path(position_id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_service::list_by_position(&state.db, position_id).await?))
}

#[utoipa::path(
    get, path = "/api/employees/status/{status}", tag = "employees",
    params(("status" = String, Path, description = "ACTIVE, ON_LEAVE or TERMINATED")),
    responses(
        (status = 200, description = "Employees with the status", body = [crate::openapi::EmployeeDoc]),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    let status: EmployeeStatus = status.parse().map_err(ServiceError::from)?;
    Ok(Json(employee_service::list_by_status(&state.db, status).await?))
}

#[utoipa::path(
    get, path = "/api/employees/search", tag = "employees",
    params(SearchQuery),
    responses((status = 200, description = "Matching employees", body = [crate::openapi::EmployeeDoc]))
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_service::search_employees(&state.db, &q.keyword).await?))
}
