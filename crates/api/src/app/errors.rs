use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

pub const INVALID_INPUT_MESSAGE: &str = "invalid data for adding item";
pub const ADD_FAILED_MESSAGE: &str = "internal error while adding item";
pub const LIST_FAILED_MESSAGE: &str = "failed to fetch inventory items";

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn invalid_input() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_input", INVALID_INPUT_MESSAGE)
}

/// Generic 500; the underlying error stays on the span and in the logs.
pub fn internal_error(message: &'static str) -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
}
