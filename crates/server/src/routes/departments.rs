use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use service::department_service;
use service::dto::{DepartmentInput, DepartmentResponse};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/api/departments", tag = "departments",
    request_body = crate::openapi::DepartmentInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DepartmentDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<DepartmentInput>, JsonApiError>,
) -> Result<(StatusCode, Json<DepartmentResponse>), JsonApiError> {
    let created = department_service::create_department(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/departments", tag = "departments",
    responses((status = 200, description = "All departments", body = [crate::openapi::DepartmentDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<DepartmentResponse>>, JsonApiError> {
    Ok(Json(department_service::list_departments(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DepartmentDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<DepartmentResponse>, JsonApiError> {
    Ok(Json(department_service::get_department(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/api/departments/name/{name}", tag = "departments",
    params(("name" = String, Path, description = "Exact department name")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DepartmentDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<DepartmentResponse>, JsonApiError> {
    Ok(Json(department_service::get_department_by_name(&state.db, &name).await?))
}

#[utoipa::path(
    put, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
    request_body = crate::openapi::DepartmentInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DepartmentDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<DepartmentInput>, JsonApiError>,
) -> Result<Json<DepartmentResponse>, JsonApiError> {
    Ok(Json(department_service::update_department(&state.db, id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Department still has employees")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    department_service::delete_department(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
