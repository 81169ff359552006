use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use service::dto::{PositionInput, PositionResponse};
use service::position_service;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/api/positions", tag = "positions",
    request_body = crate::openapi::PositionInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PositionDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Title already exists in department")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<PositionInput>, JsonApiError>,
) -> Result<(StatusCode, Json<PositionResponse>), JsonApiError> {
    let created = position_service::create_position(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/positions", tag = "positions",
    responses((status = 200, description = "All positions", body = [crate::openapi::PositionDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<PositionResponse>>, JsonApiError> {
    Ok(Json(position_service::list_positions(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/positions/{id}", tag = "positions",
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PositionDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<PositionResponse>, JsonApiError> {
    Ok(Json(position_service::get_position(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/api/positions/department/{department_id}", tag = "positions",
    params(("department_id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Positions of the department", body = [crate::openapi::PositionDoc]),
        (status = 404, description = "Department not found")
    )
)]
pub async fn by_department(
    State(state): State<ServerState>,
    WithRejection(Path(department_id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Vec<PositionResponse>>, JsonApiError> {
    Ok(Json(position_service::list_positions_by_department(&state.db, department_id).await?))
}

#[utoipa::path(
    put, path = "/api/positions/{id}", tag = "positions",
    params(("id" = i32, Path, description = "Position ID")),
    request_body = crate::openapi::PositionInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PositionDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Position or department not found"),
        (status = 409, description = "Title already exists in department")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<PositionInput>, JsonApiError>,
) -> Result<Json<PositionResponse>, JsonApiError> {
    Ok(Json(position_service::update_position(&state.db, id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/positions/{id}", tag = "positions",
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Position still has employees")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    position_service::delete_position(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
