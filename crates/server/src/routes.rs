use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod departments;
pub mod employees;
pub mod positions;
pub mod records;

/// Shared handler state. The connection is a pool handle and cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/departments", post(departments::create).get(departments::list))
        .route(
            "/api/departments/:id",
            get(departments::get).put(departments::update).delete(departments::delete),
        )
        .route("/api/departments/name/:name", get(departments::get_by_name))
        .route("/api/positions", post(positions::create).get(positions::list))
        .route(
            "/api/positions/:id",
            get(positions::get).put(positions::update).delete(positions::delete),
        )
        .route("/api/positions/department/:department_id", get(positions::by_department))
        .route("/api/employees", post(employees::create).get(employees::list))
        .route("/api/employees/paginated", get(employees::paginated))
        .route("/api/employees/search", get(employees::search))
        .route("/api/employees/department/:department_id", get(employees::by_department))
        .route("/api/employees/position/:position_id", get(employees::by_position))
        .route("/api/employees/status/:status", get(employees::by_status))
        .route(
            "/api/employees/:id",
            get(employees::get).put(employees::update).delete(employees::delete),
        )
        .route(
            "/api/employees/:id/attendance",
            get(records::list_attendance).post(records::record_attendance),
        )
        .route(
            "/api/employees/:id/leave-balances",
            get(records::list_leave_balances).post(records::create_leave_balance),
        )
        .route("/api/employees/:id/user", get(records::user_of_employee))
        .route("/api/leave-balances/:id", put(records::update_leave_balance))
        .route("/api/users", post(records::create_user))
}

/// Build the full application router: health, OpenAPI document and the `/api` resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
