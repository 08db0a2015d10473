use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Message;
use models::{UserInput, UserPatch, UserRecord};
use serde::Deserialize;
use service::storage::OrderedMap;
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability::observe;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SortQuery {
    /// Sort on the basis of height, weight or bmi
    pub sort_by: String,
    /// Sort in asc or desc order
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String { "asc".to_string() }

#[utoipa::path(get, path = "/view", tag = "users", responses((status = 200, description = "All users keyed by id"), (status = 500, description = "Storage Error")))]
pub async fn view(State(state): State<AppState>) -> Result<Json<OrderedMap<UserRecord>>, JsonApiError> {
    let res = state.users.list().await;
    observe("list", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    get, path = "/user/{user_id}", tag = "users",
    params(("user_id" = String, Path, description = "ID of the user in the DB")),
    responses((status = 200, description = "OK"), (status = 404, description = "User not found"))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserRecord>, JsonApiError> {
    let res = state.users.get(&user_id).await;
    observe("get", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    get, path = "/sort", tag = "users",
    params(SortQuery),
    responses((status = 200, description = "Sorted users"), (status = 400, description = "Invalid field or order"))
)]
pub async fn sort_users(
    State(state): State<AppState>,
    Query(q): Query<SortQuery>,
) -> Result<Json<Vec<UserRecord>>, JsonApiError> {
    let res = state.users.sort(&q.sort_by, &q.order).await;
    observe("sort", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    post, path = "/create", tag = "users",
    request_body = crate::openapi::UserInputDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "User already exists"), (status = 422, description = "Validation Error"))
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let res = state.users.create(input).await;
    observe("create", &res);
    let user = res?;
    info!(user_id = %user.id, "create_user_request_ok");
    Ok((StatusCode::CREATED, Json(Message::new("user created successfully"))))
}

#[utoipa::path(
    put, path = "/edit/{user_id}", tag = "users",
    params(("user_id" = String, Path, description = "ID of the user to update")),
    request_body = crate::openapi::UserPatchDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "User not found"), (status = 422, description = "Validation Error"))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<Message>, JsonApiError> {
    let res = state.users.update(&user_id, patch).await;
    observe("update", &res);
    res?;
    Ok(Json(Message::new("user updated")))
}

#[utoipa::path(
    delete, path = "/delete/{user_id}", tag = "users",
    params(("user_id" = String, Path, description = "ID of the user to delete")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "User not found"))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let res = state.users.delete(&user_id).await;
    observe("delete", &res);
    res?;
    Ok(Json(Message::new("user deleted")))
}
