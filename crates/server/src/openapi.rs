use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

/// Create payload. `gender` is one of `male`, `female`, `others`.
#[derive(ToSchema)]
pub struct UserInputDoc {
    pub id: String,
    pub name: String,
    pub city: String,
    /// 0 < age < 120
    pub age: i64,
    pub gender: String,
    /// meters, > 0
    pub height: f64,
    /// kilograms, > 0
    pub weight: f64,
}

/// Partial update; omitted or null fields are left unchanged.
#[derive(ToSchema)]
pub struct UserPatchDoc {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::root,
        crate::routes::about,
        crate::routes::users::view,
        crate::routes::users::get_user,
        crate::routes::users::sort_users,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            UserInputDoc,
            UserPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users", description = "User records stored in a flat JSON file"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
