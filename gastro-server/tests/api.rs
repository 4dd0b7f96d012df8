//! End-to-end API tests
//!
//! Drive the real router over an in-memory database without binding a
//! socket. Each test gets a fresh store, so ids are deterministic and the
//! seeded menu is always present.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gastro_server::SuggestionService;
use gastro_server::api;
use gastro_server::core::{Config, ServerState, SuggestConfig};
use gastro_server::db::DbService;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let config = Config {
        http_port: 0,
        data_dir: String::new(),
        environment: "test".to_string(),
        tax_rate: 0.21,
        tip_rate: 0.0,
        suggest: SuggestConfig::disabled(),
    };
    let db = DbService::in_memory().await.expect("in-memory database");
    let suggestions = SuggestionService::new(&config.suggest);
    let state = ServerState {
        config,
        db: db.pool,
        suggestions,
    };
    api::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn approx(value: &Value, key: &str, expected: f64) {
    let actual = value[key].as_f64().unwrap_or(f64::NAN);
    assert!(
        (actual - expected).abs() < 1e-9,
        "{key}: expected {expected}, got {actual}"
    );
}

async fn create_order(app: &Router) -> i64 {
    let (status, body) = send(app, "POST", "/orders/create", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["orderId"].as_i64().expect("orderId")
}

async fn add_item(app: &Router, order_id: i64, dish_id: i64, name: &str, price: f64, qty: i64) {
    let (status, body) = send(
        app,
        "POST",
        &format!("/orders/{order_id}/items/add"),
        Some(json!([{
            "dish_id": dish_id,
            "ordered_name": name,
            "ordered_unit_price": price,
            "quantity": qty,
        }])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add_item failed: {body}");
    assert_eq!(body["message"], "Item added to order successfully");
}

// ========== Health and catalog ==========

#[tokio::test]
async fn health_reports_database_up() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn categories_are_listed_in_id_order() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(categories[0], json!({"category_id": 1, "name": "Appetizer"}));
    assert_eq!(categories[3]["name"], "Drink");
}

#[tokio::test]
async fn menu_lists_dishes_joined_with_category_names() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/menu", None).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 8);

    // Ordered by category, then name
    assert_eq!(entries[0]["name"], "Ensalada mixta");
    assert_eq!(entries[0]["category_name"], "Appetizer");

    let paella = entries
        .iter()
        .find(|e| e["name"] == "Paella")
        .expect("Paella on the menu");
    approx(paella, "unit_price", 12.5);
    assert_eq!(paella["category_name"], "Main Course");

    // The legacy alias serves the same rows
    let (alias_status, alias_body) = send(&app, "GET", "/dishes", None).await;
    assert_eq!(alias_status, StatusCode::OK);
    assert_eq!(alias_body, body);
}

#[tokio::test]
async fn menu_add_creates_a_dish() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/menu/add",
        Some(json!({"name": "Churros", "category_id": 3, "unit_price": 4.5})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Dish added successfully");
    let dish_id = body["dishId"].as_i64().unwrap();
    assert!(dish_id > 8);

    let (_, menu) = send(&app, "GET", "/menu", None).await;
    let churros = menu
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Churros")
        .expect("Churros on the menu")
        .clone();
    assert_eq!(churros["dish_id"].as_i64().unwrap(), dish_id);
    assert_eq!(churros["category_name"], "Dessert");
}

#[tokio::test]
async fn menu_add_rejects_missing_fields() {
    let app = test_app().await;
    let (status, body) = send(&app, "POST", "/menu/add", Some(json!({"name": "Churros"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn menu_add_rejects_unknown_category() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/menu/add",
        Some(json!({"name": "Churros", "category_id": 99, "unit_price": 4.5})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ========== Order lifecycle ==========

#[tokio::test]
async fn create_order_returns_its_id() {
    let app = test_app().await;
    let first = create_order(&app).await;
    let second = create_order(&app).await;

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[tokio::test]
async fn complete_is_idempotent() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    for _ in 0..2 {
        let (status, body) =
            send(&app, "PUT", &format!("/orders/{order_id}/complete"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Order completed successfully");
    }
}

#[tokio::test]
async fn complete_rejects_bad_ids() {
    let app = test_app().await;

    let (status, body) = send(&app, "PUT", "/orders/abc/complete", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid order ID");

    let (status, _) = send(&app, "PUT", "/orders/999/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_total_writes_through() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/orders/{order_id}/update-total"),
        Some(json!({"total_price": 37.51})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order total price updated successfully");
}

#[tokio::test]
async fn update_total_rejects_invalid_values() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    let uri = format!("/orders/{order_id}/update-total");

    for payload in [
        json!({"total_price": -1.0}),
        json!({"total_price": "abc"}),
        json!({}),
    ] {
        let (status, body) = send(&app, "PUT", &uri, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid total price");
    }

    let (status, _) = send(
        &app,
        "PUT",
        "/orders/999/update-total",
        Some(json!({"total_price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completed_orders_reject_mutations() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    add_item(&app, order_id, 4, "Paella", 12.5, 1).await;

    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    let line_id = items[0]["order_dish_id"].as_i64().unwrap();

    let (status, _) = send(&app, "PUT", &format!("/orders/{order_id}/complete"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/items/add"),
        Some(json!([{"dish_id": 1, "ordered_name": "Tortilla", "ordered_unit_price": 6.0}])),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/orders/{order_id}/update-total"),
        Some(json!({"total_price": 5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/orders/{order_id}/items/{line_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The ledger is untouched
    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

// ========== Line-item ledger ==========

#[tokio::test]
async fn items_are_listed_in_insertion_order_with_exact_shape() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    add_item(&app, order_id, 4, "Paella", 12.5, 2).await;
    add_item(&app, order_id, 1, "Tortilla", 6.0, 1).await;

    let (status, body) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0]["dish_id"], 4);
    assert_eq!(items[0]["ordered_name"], "Paella");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[1]["ordered_name"], "Tortilla");

    // Exactly the four documented fields, nothing more
    let keys = items[0].as_object().unwrap();
    assert_eq!(keys.len(), 4);
    for key in ["dish_id", "ordered_name", "quantity", "order_dish_id"] {
        assert!(keys.contains_key(key), "missing {key}");
    }
}

#[tokio::test]
async fn line_snapshots_are_independent_of_the_catalog() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    // Snapshot a name and price that deliberately differ from dish 4
    add_item(&app, order_id, 4, "Paella (large)", 14.0, 1).await;

    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    assert_eq!(items[0]["ordered_name"], "Paella (large)");

    // The catalog row is unchanged
    let (_, menu) = send(&app, "GET", "/menu", None).await;
    let paella = menu
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["dish_id"] == 4)
        .unwrap()
        .clone();
    assert_eq!(paella["name"], "Paella");
    approx(&paella, "unit_price", 12.5);
}

#[tokio::test]
async fn add_items_rejects_a_non_array_body() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/items/add"),
        Some(json!({"dish_id": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid request body. Expected an array of order items."
    );
}

#[tokio::test]
async fn add_items_rejects_invalid_item_data() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    let uri = format!("/orders/{order_id}/items/add");

    // Missing fields
    let (status, body) = send(&app, "POST", &uri, Some(json!([{"dish_id": 1}]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid item data");

    // Empty array
    let (status, _) = send(&app, "POST", &uri, Some(json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Zero quantity
    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!([{"dish_id": 1, "ordered_name": "Tortilla", "ordered_unit_price": 6.0, "quantity": 0}])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive price
    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!([{"dish_id": 1, "ordered_name": "Tortilla", "ordered_unit_price": 0.0}])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown order
    let (status, _) = send(
        &app,
        "POST",
        "/orders/999/items/add",
        Some(json!([{"dish_id": 1, "ordered_name": "Tortilla", "ordered_unit_price": 6.0}])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_items_processes_only_the_first_element() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/items/add"),
        Some(json!([
            {"dish_id": 4, "ordered_name": "Paella", "ordered_unit_price": 12.5, "quantity": 1},
            {"dish_id": 1, "ordered_name": "Tortilla", "ordered_unit_price": 6.0, "quantity": 1},
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["ordered_name"], "Paella");
}

#[tokio::test]
async fn quantity_defaults_to_one_when_omitted() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/items/add"),
        Some(json!([{"dish_id": 1, "ordered_name": "Tortilla", "ordered_unit_price": 6.0}])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    assert_eq!(items[0]["quantity"], 1);
}

#[tokio::test]
async fn remove_item_deletes_exactly_one_line() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    add_item(&app, order_id, 4, "Paella", 12.5, 1).await;
    add_item(&app, order_id, 1, "Tortilla", 6.0, 1).await;

    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    let first_id = items[0]["order_dish_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/orders/{order_id}/items/{first_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order item deleted successfully");

    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ordered_name"], "Tortilla");

    // Removing it again is a 404 and corrupts nothing
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/orders/{order_id}/items/{first_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, items) = send(&app, "GET", &format!("/orders/{order_id}/items"), None).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn remove_item_is_scoped_to_its_order() {
    let app = test_app().await;
    let first = create_order(&app).await;
    let second = create_order(&app).await;
    add_item(&app, first, 4, "Paella", 12.5, 1).await;

    let (_, items) = send(&app, "GET", &format!("/orders/{first}/items"), None).await;
    let line_id = items[0]["order_dish_id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/orders/{second}/items/{line_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, items) = send(&app, "GET", &format!("/orders/{first}/items"), None).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

// ========== Totals ==========

#[tokio::test]
async fn totals_are_zero_for_an_empty_order() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    let (status, body) = send(&app, "GET", &format!("/orders/{order_id}/totals"), None).await;
    assert_eq!(status, StatusCode::OK);
    approx(&body, "subtotal", 0.0);
    approx(&body, "tax", 0.0);
    approx(&body, "tip", 0.0);
    approx(&body, "total", 0.0);
}

#[tokio::test]
async fn totals_apply_the_configured_tax_rate() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    add_item(&app, order_id, 4, "Paella", 12.5, 2).await;
    add_item(&app, order_id, 1, "Tortilla", 6.0, 1).await;

    let (status, body) = send(&app, "GET", &format!("/orders/{order_id}/totals"), None).await;
    assert_eq!(status, StatusCode::OK);
    approx(&body, "subtotal", 31.0);
    approx(&body, "tax", 6.51);
    approx(&body, "tip", 0.0);
    approx(&body, "total", 37.51);
}

#[tokio::test]
async fn totals_accept_a_flat_tip() {
    let app = test_app().await;
    let order_id = create_order(&app).await;
    add_item(&app, order_id, 4, "Paella", 12.5, 2).await;
    add_item(&app, order_id, 1, "Tortilla", 6.0, 1).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/orders/{order_id}/totals?tip=2.5"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    approx(&body, "tip", 2.5);
    approx(&body, "total", 40.01);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/orders/{order_id}/totals?tip=-1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/orders/999/totals", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== Suggestions ==========

#[tokio::test]
async fn suggestions_stay_empty_and_never_block_mutations_when_disabled() {
    let app = test_app().await;
    let order_id = create_order(&app).await;

    // Mutations succeed with the adapter disabled
    add_item(&app, order_id, 4, "Paella", 12.5, 1).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/orders/{order_id}/suggestions"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
