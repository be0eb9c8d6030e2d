//! End-to-end tests: requests go through the full router against an
//! in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use bazaar_api::{app, AppState};
use bazaar_core::{Item, Merchant, Money, NewItem, NewMerchant};
use bazaar_db::{Database, DbConfig};

// =============================================================================
// Harness
// =============================================================================

struct TestApp {
    db: Database,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let router = app(AppState::new(db.clone()));
        TestApp { db, router }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(text.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(method, uri, Some(&body.to_string())).await
    }

    async fn merchant(&self, name: &str) -> Merchant {
        self.db
            .merchants()
            .insert(&NewMerchant { name: name.to_string() })
            .await
            .unwrap()
    }

    async fn item(&self, merchant_id: i64, name: &str, cents: i64) -> Item {
        self.db
            .items()
            .insert(&NewItem {
                name: name.to_string(),
                description: format!("About {name}"),
                unit_price: Money::from_cents(cents),
                merchant_id,
            })
            .await
            .unwrap()
    }

    async fn invoice(&self, customer_id: i64, item_ids: &[i64]) -> i64 {
        let invoice = self.db.invoices().create(customer_id, "shipped").await.unwrap();
        for item_id in item_ids {
            self.db.invoices().add_item(invoice.id, *item_id, 1).await.unwrap();
        }
        invoice.id
    }
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["attributes"]["name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Items: CRUD
// =============================================================================

#[tokio::test]
async fn test_list_items_paginates() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Schroeder-Jerde").await;
    for n in 1..=35 {
        app.item(merchant.id, &format!("Item {n:02}"), 100 * n).await;
    }

    let (status, body) = app.get("/api/v1/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 20);
    assert_eq!(ids(&body)[0], "1");

    let (_, body) = app.get("/api/v1/items?per_page=15&page=2").await;
    let expected: Vec<String> = (16..=30).map(|n| n.to_string()).collect();
    assert_eq!(ids(&body), expected);

    let (_, body) = app.get("/api/v1/items?per_page=&page=").await;
    assert_eq!(ids(&body).len(), 20);

    let (status, body) = app.get("/api/v1/items?page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_show_item() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Klein, Rempel and Jones").await;
    let item = app.item(merchant.id, "Item Nemo Facere", 4291).await;

    let (status, body) = app.get(&format!("/api/v1/items/{}", item.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": {
                "id": item.id.to_string(),
                "type": "item",
                "attributes": {
                    "name": "Item Nemo Facere",
                    "description": "About Item Nemo Facere",
                    "unit_price": 42.91,
                    "merchant_id": merchant.id
                }
            }
        })
    );
}

#[tokio::test]
async fn test_show_missing_item_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/items/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": "Item not found: 404" }));

    let (status, body) = app.get("/api/v1/items/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Item not found: abc");
}

#[tokio::test]
async fn test_create_item() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Willms and Sons").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/items",
            json!({
                "name": "Shiny Itemy Item",
                "description": "It does a lot of things real good",
                "unit_price": 123.45,
                "merchant_id": merchant.id
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "item");
    assert_eq!(body["data"]["attributes"]["unit_price"], json!(123.45));

    let id: i64 = body["data"]["id"].as_str().unwrap().parse().unwrap();
    let stored = app.db.items().require(id).await.unwrap();
    assert_eq!(stored.name, "Shiny Itemy Item");
    assert_eq!(stored.unit_price_cents, 12345);
    assert_eq!(stored.merchant_id, merchant.id);
}

#[tokio::test]
async fn test_create_item_validation_is_422() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Cummings-Thiel").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/items",
            json!({ "name": "No Description", "unit_price": 1, "merchant_id": merchant.id }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": "description is required" }));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/items",
            json!({
                "name": "Bad Price",
                "description": "x",
                "unit_price": "twelve",
                "merchant_id": merchant.id
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "unit_price has invalid format: must be a decimal number");

    let (status, body) = app.request(Method::POST, "/api/v1/items", Some("{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].is_string());

    assert_eq!(app.db.items().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_item_for_unknown_merchant_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/items",
            json!({ "name": "Orphan", "description": "x", "unit_price": 5, "merchant_id": 77 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Merchant not found: 77");
}

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Bernhard-Johns").await;
    let item = app.item(merchant.id, "Item Qui Esse", 7500).await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/items/{}", item.id),
            json!({ "unit_price": "80.25" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let attributes = &body["data"]["attributes"];
    assert_eq!(attributes["unit_price"], json!(80.25));
    assert_eq!(attributes["name"], "Item Qui Esse");
    assert_eq!(attributes["description"], "About Item Qui Esse");

    let stored = app.db.items().require(item.id).await.unwrap();
    assert_eq!(stored.unit_price_cents, 8025);
    assert_eq!(stored.name, item.name);
    assert_eq!(stored.created_at, item.created_at);
}

#[tokio::test]
async fn test_put_is_patch_alias() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Glover Inc").await;
    let item = app.item(merchant.id, "Old Name", 100).await;

    let (status, body) = app
        .send(Method::PUT, &format!("/api/v1/items/{}", item.id), json!({ "name": "New Name" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["name"], "New Name");
    assert_eq!(body["data"]["attributes"]["unit_price"], json!(1.0));
}

#[tokio::test]
async fn test_patch_errors() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Osinski-Stokes").await;
    let item = app.item(merchant.id, "Item", 100).await;

    let (status, _) = app
        .send(Method::PATCH, "/api/v1/items/999", json!({ "name": "x" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::PATCH, &format!("/api/v1/items/{}", item.id), json!({ "merchant_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Merchant not found: 999");

    let (status, body) = app
        .send(Method::PATCH, &format!("/api/v1/items/{}", item.id), json!({ "name": "   " }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "name is required");

    assert_eq!(app.db.items().require(item.id).await.unwrap(), item);
}

#[tokio::test]
async fn test_delete_item_cascades_to_orphaned_invoices() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Ondricka-Nader").await;
    let x = app.item(merchant.id, "Item X", 1000).await;
    let y = app.item(merchant.id, "Item Y", 2000).await;
    let customer = app.db.customers().insert("Joey", "Ondricka").await.unwrap();

    let a = app.invoice(customer.id, &[x.id]).await;
    let b = app.invoice(customer.id, &[x.id, y.id]).await;
    let c = app.invoice(customer.id, &[x.id]).await;

    let (status, body) = app.request(Method::DELETE, &format!("/api/v1/items/{}", x.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], x.id.to_string());

    assert!(app.db.invoices().get_by_id(a).await.unwrap().is_none());
    assert!(app.db.invoices().get_by_id(b).await.unwrap().is_some());
    assert!(app.db.invoices().get_by_id(c).await.unwrap().is_none());

    let (status, _) = app.get(&format!("/api/v1/items/{}", x.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.request(Method::DELETE, &format!("/api/v1/items/{}", x.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], format!("Item not found: {}", x.id));
}

#[tokio::test]
async fn test_item_merchant() {
    let app = TestApp::new().await;
    let merchant = app.merchant("Williamson Group").await;
    let item = app.item(merchant.id, "Item", 100).await;

    let (status, body) = app.get(&format!("/api/v1/items/{}/merchant", item.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": {
                "id": merchant.id.to_string(),
                "type": "merchant",
                "attributes": { "name": "Williamson Group" }
            }
        })
    );

    let (status, _) = app.get("/api/v1/items/123/merchant").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Items: Search
// =============================================================================

async fn search_fixture() -> TestApp {
    let app = TestApp::new().await;
    let merchant = app.merchant("Search Goods").await;
    app.item(merchant.id, "Turing Ring", 5000).await;
    app.item(merchant.id, "Gold Ring", 25000).await;
    app.item(merchant.id, "Silver Necklace", 1500).await;
    app.item(merchant.id, "ring box", 999).await;
    app
}

#[tokio::test]
async fn test_find_item_by_name() {
    let app = search_fixture().await;

    let (status, body) = app.get("/api/v1/items/find?name=RING").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["name"], "Gold Ring");

    let (_, body) = app.get("/api/v1/items/find_all?name=ring").await;
    assert_eq!(names(&body), vec!["Gold Ring", "Turing Ring", "ring box"]);
}

#[tokio::test]
async fn test_find_item_by_price() {
    let app = search_fixture().await;

    let (_, body) = app.get("/api/v1/items/find_all?min_price=15&max_price=50").await;
    assert_eq!(names(&body), vec!["Silver Necklace", "Turing Ring"]);

    let (_, body) = app.get("/api/v1/items/find_all?min_price=100").await;
    assert_eq!(names(&body), vec!["Gold Ring"]);

    let (_, body) = app.get("/api/v1/items/find_all?max_price=10").await;
    assert_eq!(names(&body), vec!["ring box"]);

    let (status, body) = app.get("/api/v1/items/find?min_price=49.99&max_price=50.01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["name"], "Turing Ring");
}

#[tokio::test]
async fn test_find_item_no_match() {
    let app = search_fixture().await;

    let (status, body) = app.get("/api/v1/items/find?name=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": {} }));

    let (status, body) = app.get("/api/v1/items/find_all?name=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_find_item_rejections() {
    let app = search_fixture().await;

    let cases = [
        ("name=ring&min_price=5", "name and price cannot be used together"),
        ("name=ring&max_price=5", "name and price cannot be used together"),
        ("", "no search parameters provided"),
        ("name=", "no search parameters provided"),
        ("min_price=-5", "prices must be non-negative"),
        ("min_price=5&max_price=-1", "prices must be non-negative"),
        ("min_price=50&max_price=5", "minimum must not exceed maximum"),
        ("min_price=abc", "min_price has invalid format: must be a decimal number"),
    ];

    for (query, message) in cases {
        for endpoint in ["find", "find_all"] {
            let (status, body) = app.get(&format!("/api/v1/items/{endpoint}?{query}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{endpoint}?{query}");
            assert_eq!(body, json!({ "errors": message }), "{endpoint}?{query}");
        }
    }
}

#[tokio::test]
async fn test_unreadable_query_uses_error_envelope() {
    let app = search_fixture().await;

    let uris = [
        "/api/v1/items/find?name=a&name=b",
        "/api/v1/items/find_all?min_price=1&min_price=2",
        "/api/v1/items?page=1&page=2",
        "/api/v1/merchants/find_all?name=a&name=b",
    ];

    for uri in uris {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["errors"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_find_item_keeps_surrounding_whitespace() {
    let app = search_fixture().await;

    let (status, body) = app.get("/api/v1/items/find_all?name=%20ring").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Gold Ring", "Turing Ring"]);
}

// =============================================================================
// Merchants
// =============================================================================

#[tokio::test]
async fn test_merchants_list_show_and_create() {
    let app = TestApp::new().await;
    for name in ["Schroeder-Jerde", "Klein, Rempel and Jones", "Willms and Sons"] {
        app.merchant(name).await;
    }

    let (status, body) = app.get("/api/v1/merchants?per_page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["1", "2"]);

    let (_, body) = app.get("/api/v1/merchants?per_page=2&page=2").await;
    assert_eq!(names(&body), vec!["Willms and Sons"]);

    let (status, body) = app.get("/api/v1/merchants/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["name"], "Klein, Rempel and Jones");

    let (status, body) = app.get("/api/v1/merchants/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": "Merchant not found: 99" }));

    let (status, body) = app
        .send(Method::POST, "/api/v1/merchants", json!({ "name": "Bechtelar LLC" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "4");

    let (status, body) = app.send(Method::POST, "/api/v1/merchants", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "name is required");
}

#[tokio::test]
async fn test_merchant_items() {
    let app = TestApp::new().await;
    let first = app.merchant("First").await;
    let second = app.merchant("Second").await;
    let a = app.item(first.id, "A", 100).await;
    app.item(second.id, "B", 100).await;
    let c = app.item(first.id, "C", 100).await;

    let (status, body) = app.get(&format!("/api/v1/merchants/{}/items", first.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![a.id.to_string(), c.id.to_string()]);

    let (_, body) = app
        .get(&format!("/api/v1/merchants/{}/items?per_page=1&page=2", first.id))
        .await;
    assert_eq!(ids(&body), vec![c.id.to_string()]);

    let (status, body) = app.get("/api/v1/merchants/42/items").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Merchant not found: 42");
}

#[tokio::test]
async fn test_find_merchants() {
    let app = TestApp::new().await;
    for name in ["Williamson Group", "Ondricka-Nader", "Schroeder-Jerde", "Nader LLC"] {
        app.merchant(name).await;
    }

    let (status, body) = app.get("/api/v1/merchants/find?name=NADER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["name"], "Nader LLC");

    let (_, body) = app.get("/api/v1/merchants/find_all?name=er").await;
    assert_eq!(
        names(&body),
        vec!["Nader LLC", "Ondricka-Nader", "Schroeder-Jerde"]
    );

    let (_, body) = app.get("/api/v1/merchants/find?name=nobody").await;
    assert_eq!(body, json!({ "data": {} }));

    let (status, body) = app.get("/api/v1/merchants/find_all").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], "no search parameters provided");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}
