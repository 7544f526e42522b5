use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode as AxumStatus, routing::{get, post}, Router};
use opentelemetry::trace::{SpanKind, Status};
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider, SpanData};
use reqwest::StatusCode;

use stockroom_api::app::InventoryServices;
use stockroom_infra::InMemoryItemStore;
use stockroom_observability::Telemetry;
use stockroom_ui::app::{build_app, UiServices};
use stockroom_ui::upstream::InventoryClient;

const TRACE_ID: &str = "4bf92f3577b34da6a3ce929d0e0e4736";
const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

struct Spawned {
    base_url: String,
    exporter: InMemorySpanExporter,
    handle: tokio::task::JoinHandle<()>,
}

impl Spawned {
    fn spans(&self) -> Vec<SpanData> {
        self.exporter.get_finished_spans().unwrap()
    }
}

impl Drop for Spawned {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn telemetry(scope: &'static str) -> (Arc<Telemetry>, InMemorySpanExporter) {
    let exporter = InMemorySpanExporter::default();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    (Arc::new(Telemetry::from_provider(provider, scope)), exporter)
}

async fn serve(app: Router, exporter: InMemorySpanExporter) -> Spawned {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Spawned {
        base_url,
        exporter,
        handle,
    }
}

/// Real Inventory Service on an in-memory store.
async fn spawn_inventory() -> Spawned {
    let (telemetry, exporter) = telemetry("api-inventory");
    let services = InventoryServices::new(Arc::new(InMemoryItemStore::new()), telemetry)
        .with_list_delay(Duration::ZERO);
    serve(stockroom_api::app::build_app(services), exporter).await
}

/// Stand-in upstream answering every data call with `status`.
async fn spawn_failing_inventory(status: AxumStatus) -> Spawned {
    let (_telemetry, exporter) = telemetry("stub");
    let app = Router::new()
        .route("/items/add", post(move || async move { status }))
        .route("/items/all", get(move || async move { status }));
    serve(app, exporter).await
}

async fn spawn_ui(inventory_url: &str) -> Spawned {
    let (telemetry, exporter) = telemetry("user_interface");
    let client = InventoryClient::new(inventory_url, None, telemetry.clone()).unwrap();
    serve(build_app(UiServices::new(client), telemetry), exporter).await
}

/// A URL on which nothing is listening.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

async fn add(client: &reqwest::Client, ui: &Spawned, name: &str, quantity: i64) -> reqwest::Response {
    client
        .post(format!("{}/add_item/", ui.base_url))
        .query(&[("name", name.to_string()), ("quantity", quantity.to_string())])
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn root_reports_liveness() {
    let ui = spawn_ui(&dead_url().await).await;

    let res = reqwest::get(format!("{}/", ui.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to the User Interface Microservice");
}

#[tokio::test]
async fn add_and_list_are_proxied() {
    let inventory = spawn_inventory().await;
    let ui = spawn_ui(&inventory.base_url).await;
    let client = reqwest::Client::new();

    let res = add(&client, &ui, "Widget", 5).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item added successfully");
    assert_eq!(body["data"]["message"], "Item 'Widget' added with quantity 5");

    let res = client
        .get(format!("{}/items/", ui.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Widget");
    assert_eq!(items[0]["quantity"], 5);
}

#[tokio::test]
async fn paths_without_trailing_slash_redirect() {
    let inventory = spawn_inventory().await;
    let ui = spawn_ui(&inventory.base_url).await;
    let no_redirects = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let res = no_redirects
        .post(format!("{}/add_item?name=Widget&quantity=5", ui.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        res.headers()["location"],
        "/add_item/?name=Widget&quantity=5"
    );

    // Followed, the redirect lands on the real routes.
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/add_item?name=Widget&quantity=5", ui.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item added successfully");

    let res = client.get(format!("{}/items", ui.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn span_names_use_the_route_not_the_raw_path() {
    let ui = spawn_ui(&dead_url().await).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/no/such/page-123", ui.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = client.get(format!("{}/", ui.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let names: Vec<String> = ui.spans().iter().map(|s| s.name.to_string()).collect();
    assert!(names.iter().any(|n| n == "GET /"));
    assert!(names.iter().all(|n| !n.contains("page-123")));
}

#[tokio::test]
async fn upstream_status_failures_are_reported_in_the_body() {
    let inventory = spawn_failing_inventory(AxumStatus::SERVICE_UNAVAILABLE).await;
    let ui = spawn_ui(&inventory.base_url).await;
    let client = reqwest::Client::new();

    let res = add(&client, &ui, "Widget", 5).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Could not add the item");
    assert_eq!(body["status"], 503);

    let res = client
        .get(format!("{}/items/", ui.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Could not fetch the item list");
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn upstream_validation_failure_is_reported_in_the_body() {
    let inventory = spawn_inventory().await;
    let ui = spawn_ui(&inventory.base_url).await;
    let client = reqwest::Client::new();

    let res = add(&client, &ui, "", 5).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn missing_query_params_are_rejected_locally() {
    let inventory = spawn_inventory().await;
    let ui = spawn_ui(&inventory.base_url).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/add_item/?name=Widget", ui.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(inventory.spans().is_empty());
}

#[tokio::test]
async fn unreachable_upstream_is_a_500() {
    let ui = spawn_ui(&dead_url().await).await;
    let client = reqwest::Client::new();

    let res = add(&client, &ui, "Widget", 5).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "upstream_unavailable");

    let spans = ui.spans();
    let server = spans.iter().find(|s| s.span_kind == SpanKind::Server).unwrap();
    let outbound = spans.iter().find(|s| s.span_kind == SpanKind::Client).unwrap();
    assert!(matches!(server.status, Status::Error { .. }));
    assert!(matches!(outbound.status, Status::Error { .. }));
}

#[tokio::test]
async fn trace_context_flows_from_ui_to_inventory() {
    let inventory = spawn_inventory().await;
    let ui = spawn_ui(&inventory.base_url).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/add_item/?name=Widget&quantity=5", ui.base_url))
        .header("traceparent", TRACEPARENT)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let ui_spans = ui.spans();
    let server = ui_spans
        .iter()
        .find(|s| s.name == "POST /add_item/")
        .unwrap();
    let outbound = ui_spans
        .iter()
        .find(|s| s.span_kind == SpanKind::Client)
        .unwrap();
    assert_eq!(server.span_context.trace_id().to_string(), TRACE_ID);
    assert_eq!(server.parent_span_id.to_string(), "00f067aa0ba902b7");
    assert_eq!(outbound.parent_span_id, server.span_context.span_id());

    let downstream = inventory
        .spans()
        .into_iter()
        .find(|s| s.name == "POST /items/add")
        .unwrap();
    assert_eq!(downstream.span_context.trace_id().to_string(), TRACE_ID);
    assert_eq!(downstream.parent_span_id, outbound.span_context.span_id());
}

#[tokio::test]
async fn requests_without_trace_headers_start_a_new_trace() {
    let inventory = spawn_inventory().await;
    let ui = spawn_ui(&inventory.base_url).await;

    let res = reqwest::get(format!("{}/items/", ui.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let server = ui
        .spans()
        .into_iter()
        .find(|s| s.span_kind == SpanKind::Server)
        .unwrap();
    let downstream = inventory
        .spans()
        .into_iter()
        .find(|s| s.name == "GET /items/all")
        .unwrap();
    assert!(server.span_context.is_valid());
    assert_eq!(downstream.span_context.trace_id(), server.span_context.trace_id());
}
