use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors, UiServices};
use crate::context::RequestTrace;
use crate::upstream::UpstreamReply;

// Upstream status failures are reported in the body with 200 OK; callers
// inspect the payload shape, not the status code.

pub async fn add_item(
    Extension(services): Extension<Arc<UiServices>>,
    Extension(trace): Extension<RequestTrace>,
    Query(params): Query<dto::AddItemParams>,
) -> axum::response::Response {
    let reply = services
        .inventory()
        .add_item(trace.context(), &params.name, params.quantity)
        .await;

    match reply {
        Ok(UpstreamReply::Ok(data)) => Json(dto::AddedResponse {
            message: dto::ADDED_MESSAGE,
            data,
        })
        .into_response(),
        Ok(UpstreamReply::Status(status)) => {
            tracing::warn!(status = status.as_u16(), "inventory service rejected add");
            Json(dto::UpstreamFailure {
                error: dto::ADD_FAILED_MESSAGE,
                status: status.as_u16(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "add item proxy call failed");
            errors::upstream_unavailable()
        }
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<UiServices>>,
    Extension(trace): Extension<RequestTrace>,
) -> axum::response::Response {
    match services.inventory().list_items(trace.context()).await {
        Ok(UpstreamReply::Ok(items)) => Json(dto::ItemsResponse { items }).into_response(),
        Ok(UpstreamReply::Status(status)) => {
            tracing::warn!(status = status.as_u16(), "inventory service rejected list");
            Json(dto::UpstreamFailure {
                error: dto::LIST_FAILED_MESSAGE,
                status: status.as_u16(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "list items proxy call failed");
            errors::upstream_unavailable()
        }
    }
}
