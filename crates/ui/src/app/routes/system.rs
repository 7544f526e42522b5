use axum::{http::Uri, response::Redirect, Json};

use crate::app::dto;

/// Liveness check.
pub async fn root() -> Json<dto::MessageResponse> {
    Json(dto::MessageResponse {
        message: dto::WELCOME_MESSAGE,
    })
}

/// `307` to the slash-terminated route, keeping method, body and query.
pub async fn add_trailing_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{query}", uri.path()),
        None => format!("{}/", uri.path()),
    };
    Redirect::temporary(&target)
}
