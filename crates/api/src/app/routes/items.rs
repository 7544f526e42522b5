use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use stockroom_infra::item_store::sql;
use stockroom_inventory::NewItem;
use stockroom_observability::{KeyValue, SpanKind};

use crate::app::services::InventoryServices;
use crate::app::{dto, errors};

pub const ADD_ITEM_SPAN: &str = "POST /items/add";
pub const LIST_ITEMS_SPAN: &str = "GET /items/all";
pub const QUERY_SPAN: &str = "Query DB";

pub const ATTR_QUERY_TEXT: &str = "db.query.text";
pub const ATTR_ITEM_NAME: &str = "item.name";
pub const ATTR_ITEM_QUANTITY: &str = "item.quantity";

pub async fn add_item(
    Extension(services): Extension<Arc<InventoryServices>>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let telemetry = services.telemetry();
    let parent = telemetry.extract(&headers);
    let span = telemetry.start_span(ADD_ITEM_SPAN, SpanKind::Server, &parent);

    // Decoded regardless of Content-Type; clients that omit the header still send JSON.
    let body = match serde_json::from_slice::<dto::AddItemRequest>(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "rejected add-item body");
            span.record_failure(&e);
            return errors::invalid_input();
        }
    };

    let new_item = match NewItem::new(body.name, body.quantity) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "invalid add-item request");
            span.record_failure(&e);
            return errors::invalid_input();
        }
    };

    let item = match services.store().insert(&new_item).await {
        Ok(item) => item,
        Err(e) => {
            tracing::error!(error = %e, "failed to add item");
            span.record_failure(&e);
            return errors::internal_error(errors::ADD_FAILED_MESSAGE);
        }
    };

    span.set_attribute(KeyValue::new(ATTR_QUERY_TEXT, sql::INSERT_ITEM));
    span.set_attribute(KeyValue::new(ATTR_ITEM_NAME, item.name.clone()));
    span.set_attribute(KeyValue::new(ATTR_ITEM_QUANTITY, item.quantity));

    let message = dto::added_message(&item.name, item.quantity);
    span.add_event(message.clone());
    tracing::info!(item_id = %item.id, "item added");

    (StatusCode::OK, Json(dto::MessageResponse { message })).into_response()
}

pub async fn list_items(
    Extension(services): Extension<Arc<InventoryServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let telemetry = services.telemetry();
    let parent = telemetry.extract(&headers);
    let span = telemetry.start_span(LIST_ITEMS_SPAN, SpanKind::Server, &parent);

    let delay = services.list_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    // The child span covers the store round-trip only.
    let result = {
        let query = span.child(telemetry, QUERY_SPAN, SpanKind::Client);
        query.set_attribute(KeyValue::new(ATTR_QUERY_TEXT, sql::SELECT_ITEMS));

        let result = services.store().list().await;
        if let Err(e) = &result {
            query.record_failure(e);
        }
        result
    };

    match result {
        Ok(items) => {
            tracing::debug!(count = items.len(), "listed items");
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list items");
            span.record_failure(&e);
            errors::internal_error(errors::LIST_FAILED_MESSAGE)
        }
    }
}
