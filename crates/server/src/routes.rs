use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Message};

use crate::openapi;
use crate::state::AppState;

pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Banner")))]
pub async fn root() -> Json<Message> {
    Json(Message::new("User Management System API"))
}

#[utoipa::path(get, path = "/about", tag = "health", responses((status = 200, description = "About")))]
pub async fn about() -> Json<Message> {
    Json(Message::new("A fully functional API to manage your user records"))
}

/// Build the full application router: informational routes plus user CRUD.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/about", get(about))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    let user_routes = Router::new()
        .route("/view", get(users::view))
        .route("/user/:user_id", get(users::get_user))
        .route("/sort", get(users::sort_users))
        .route("/create", post(users::create_user))
        .route("/edit/:user_id", put(users::update_user))
        .route("/delete/:user_id", delete(users::delete_user))
        .with_state(state);

    public
        .merge(user_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
