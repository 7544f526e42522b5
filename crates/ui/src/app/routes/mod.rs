use axum::{routing::{get, post}, Router};

pub mod items;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/add_item/", post(items::add_item))
        .route("/add_item", post(system::add_trailing_slash))
        .route("/items/", get(items::list_items))
        .route("/items", get(system::add_trailing_slash))
}
