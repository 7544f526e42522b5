use serde::{Deserialize, Serialize};

/// Body of `POST /items/add`.
///
/// Both fields are optional at the wire level so that a missing field maps to
/// `400 invalid_input` instead of a deserializer rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn added_message(name: &str, quantity: i64) -> String {
    format!("Item '{name}' added with quantity {quantity}")
}
