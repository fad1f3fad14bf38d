use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use sobripos_api::{build_router, AppState};
use sobripos_db::{Database, DbConfig};

struct TestApp {
    app: axum::Router,
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

impl TestApp {
    async fn new() -> Self {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("sobripos_api=debug,sobripos_db=debug"))
                .with_test_writer()
                .try_init();
        });

        let db = Database::new(DbConfig::in_memory()).await.expect("database");
        TestApp {
            app: build_router(AppState::new(db)),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec();

        TestResponse {
            status,
            location,
            body,
        }
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    async fn create_category(&self, name: &str) -> String {
        let response = self.post("/api/categories", json!({ "name": name })).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()["id"].as_str().expect("id").to_string()
    }

    async fn create_product(&self, sku: &str, category_id: &str, stock: i32, minimum: i32) -> Value {
        let response = self
            .post(
                "/api/products",
                json!({
                    "name": format!("Product {sku}"),
                    "sku": sku,
                    "barcode": format!("590{sku}"),
                    "priceCents": 250,
                    "stockQuantity": stock,
                    "minimumStock": minimum,
                    "categoryId": category_id,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()
    }
}

#[tokio::test]
async fn category_lifecycle() {
    let app = TestApp::new().await;

    let created = app.post("/api/categories", json!({ "name": "Beverages" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    let id = body["id"].as_str().expect("id").to_string();
    assert_ne!(id, Uuid::nil().to_string());
    assert_eq!(created.location.as_deref(), Some(format!("/api/categories/{id}").as_str()));

    let fetched = app.get(&format!("/api/categories/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["name"], "Beverages");

    let deleted = app.delete(&format!("/api/categories/{id}")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/categories/{id}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert!(gone.body.is_empty());
}

#[tokio::test]
async fn client_supplied_id_is_replaced() {
    let app = TestApp::new().await;
    let supplied = Uuid::new_v4().to_string();

    let created = app
        .post("/api/categories", json!({ "id": supplied, "name": "Snacks" }))
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_ne!(created.json()["id"], supplied);
}

#[tokio::test]
async fn low_stock_lists_only_products_at_or_below_minimum() {
    let app = TestApp::new().await;
    let category_id = app.create_category("Dairy").await;

    let low = app.create_product("MILK", &category_id, 5, 10).await;
    app.create_product("BUTTER", &category_id, 20, 10).await;

    let response = app.get("/api/products/low-stock").await;
    assert_eq!(response.status, StatusCode::OK);

    let listed = response.json();
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], low["id"]);
    assert_eq!(listed[0]["category"]["name"], "Dairy");
}

#[tokio::test]
async fn barcode_lookup() {
    let app = TestApp::new().await;
    let category_id = app.create_category("Grocery").await;
    app.create_product("RICE", &category_id, 40, 5).await;

    let found = app.get("/api/products/barcode/590RICE").await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.json()["sku"], "RICE");

    let missing = app.get("/api/products/barcode/000000").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.body.is_empty());
}

#[tokio::test]
async fn update_with_mismatched_id_is_rejected() {
    let app = TestApp::new().await;
    let id = app.create_category("Frozen").await;

    let response = app
        .put(
            &format!("/api/categories/{id}"),
            json!({ "id": Uuid::new_v4(), "name": "Renamed" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "BAD_REQUEST");

    let fetched = app.get(&format!("/api/categories/{id}")).await;
    assert_eq!(fetched.json()["name"], "Frozen");
}

#[tokio::test]
async fn update_overwrites_fields() {
    let app = TestApp::new().await;
    let id = app.create_category("Frozen").await;

    let response = app
        .put(
            &format!("/api/categories/{id}"),
            json!({ "id": id, "name": "Frozen Foods", "description": "Keep below -18C" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let fetched = app.get(&format!("/api/categories/{id}")).await.json();
    assert_eq!(fetched["name"], "Frozen Foods");
    assert_eq!(fetched["description"], "Keep below -18C");
    assert!(fetched["updatedAt"].is_string());
}

#[tokio::test]
async fn update_and_delete_of_missing_rows_succeed() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let updated = app
        .put(
            &format!("/api/categories/{id}"),
            json!({ "id": id, "name": "Nowhere" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT);

    let deleted = app.delete(&format!("/api/categories/{id}")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(app.get(&format!("/api/categories/{id}")).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = TestApp::new().await;

    let blank = app.post("/api/categories", json!({ "name": "  " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.json()["code"], "VALIDATION_ERROR");

    let category_id = app.create_category("Snacks").await;
    let negative = app
        .post(
            "/api/products",
            json!({
                "name": "Chips",
                "sku": "CHIPS",
                "priceCents": -1,
                "stockQuantity": 1,
                "minimumStock": 0,
                "categoryId": category_id,
            }),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let malformed = app.post("/api/categories", json!({ "name": 42 })).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let bad_uuid = app.get("/api/categories/not-a-uuid").await;
    assert_eq!(bad_uuid.status, StatusCode::BAD_REQUEST);

    let all = app.get("/api/categories").await.json();
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn list_excludes_deleted_rows() {
    let app = TestApp::new().await;
    let keep = app.create_category("Keep").await;
    let dropped = app.create_category("Drop").await;

    app.delete(&format!("/api/categories/{dropped}")).await;

    let listed = app.get("/api/categories").await.json();
    let ids: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["id"].as_str())
        .collect();
    assert_eq!(ids, vec![keep.as_str()]);
}

#[tokio::test]
async fn user_role_lookup() {
    let app = TestApp::new().await;

    for (username, role) in [("ana", "cashier"), ("ben", "manager"), ("cy", "cashier")] {
        let created = app
            .post(
                "/api/users",
                json!({
                    "username": username,
                    "passwordHash": "hash",
                    "fullName": username,
                    "email": format!("{username}@sobripos.test"),
                    "role": role,
                    "isActive": true,
                }),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let cashiers = app.get("/api/users/role/cashier").await.json();
    assert_eq!(cashiers.as_array().map(Vec::len), Some(2));

    let by_name = app.get("/api/users/username/ben").await;
    assert_eq!(by_name.json()["role"], "manager");

    let unknown = app.get("/api/users/role/janitor").await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transaction_details_and_date_range() {
    let app = TestApp::new().await;

    let cashier = app
        .post(
            "/api/users",
            json!({
                "username": "till1",
                "passwordHash": "hash",
                "fullName": "Till One",
                "email": "till1@sobripos.test",
                "role": "cashier",
                "isActive": true,
            }),
        )
        .await
        .json();
    let cashier_id = cashier["id"].as_str().expect("id").to_string();

    for (number, date) in [("T-1", "2024-03-01T09:00:00Z"), ("T-2", "2024-03-05T12:00:00Z")] {
        let created = app
            .post(
                "/api/transactions",
                json!({
                    "transactionNumber": number,
                    "transactionDate": date,
                    "totalAmountCents": 500,
                    "finalAmountCents": 500,
                    "paymentMethod": "cash",
                    "status": "completed",
                    "cashierId": cashier_id,
                }),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let by_number = app.get("/api/transactions/number/T-2").await.json();
    assert_eq!(by_number["cashier"]["username"], "till1");
    assert!(by_number["customer"].is_null());
    assert_eq!(by_number["items"].as_array().map(Vec::len), Some(0));

    let range = app
        .get("/api/transactions/range?start=2024-03-01T00:00:00Z&end=2024-03-02T00:00:00Z")
        .await;
    assert_eq!(range.status, StatusCode::OK);
    let range = range.json();
    let range = range.as_array().expect("array");
    assert_eq!(range.len(), 1);
    assert_eq!(range[0]["transactionNumber"], "T-1");

    let by_cashier = app.get(&format!("/api/transactions/cashier/{cashier_id}")).await.json();
    assert_eq!(by_cashier.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn health_reports_database_and_migrations() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
    assert_eq!(body["migrations"]["total"], body["migrations"]["applied"]);
}
