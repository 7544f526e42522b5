use axum::{routing::{get, post}, Router};

pub mod items;

pub fn router() -> Router {
    Router::new()
        .route("/items/add", post(items::add_item))
        .route("/items/all", get(items::list_items))
}
