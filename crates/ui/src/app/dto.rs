use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WELCOME_MESSAGE: &str = "Welcome to the User Interface Microservice";
pub const ADDED_MESSAGE: &str = "Item added successfully";
pub const ADD_FAILED_MESSAGE: &str = "Could not add the item";
pub const LIST_FAILED_MESSAGE: &str = "Could not fetch the item list";

/// Query string of `POST /add_item/`.
#[derive(Debug, Deserialize)]
pub struct AddItemParams {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub message: &'static str,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Value,
}

/// Upstream answered with a non-200 status. Sent with `200 OK`.
#[derive(Debug, Serialize)]
pub struct UpstreamFailure {
    pub error: &'static str,
    pub status: u16,
}
