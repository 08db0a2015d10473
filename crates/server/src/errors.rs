use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>, "code": <numeric code>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub code: Option<u16>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, code: None }
    }

    fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        let full = e.to_string();
        let err = match e {
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::AlreadyExists(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Already Exists", Some(msg)),
            ServiceError::InvalidArgument(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Argument", Some(msg)),
            ServiceError::Model(m) => JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(m.to_string())),
            ServiceError::StorageUnavailable(_) | ServiceError::CorruptData(_) => {
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(full))
            }
        };
        err.with_code(code)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({
            "error": self.title,
            "detail": self.detail,
            "code": self.code,
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn maps_service_errors_to_statuses() {
        let cases = [
            (ServiceError::not_found("user"), StatusCode::NOT_FOUND),
            (ServiceError::already_exists("user"), StatusCode::BAD_REQUEST),
            (ServiceError::InvalidArgument("bad".into()), StatusCode::BAD_REQUEST),
            (ModelError::invalid("age", "out of range").into(), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::StorageUnavailable("gone".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::CorruptData("junk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let api: JsonApiError = err.into();
            assert_eq!(api.status, status);
            assert!(api.code.is_some());
        }
    }

    #[test]
    fn not_found_detail_is_plain_message() {
        let api: JsonApiError = ServiceError::not_found("user").into();
        assert_eq!(api.detail.as_deref(), Some("user not found"));
        assert_eq!(api.code, Some(1003));
    }
}
