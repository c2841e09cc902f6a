//! Integration tests for the ShopTwo REST resource.
//!
//! Every test boots its own server instance, so stores never leak state
//! between tests.

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};

use shop_registry_integration_tests::spawn_server;

const ENTITY_API_PATH: &str = "/api/shop-twos";

const DEFAULT_SHOP_NAME: &str = "Corner Books";
const UPDATED_SHOP_NAME: &str = "Corner Books & Prints";
const DEFAULT_OWNER: &str = "Mara Voss";
const UPDATED_OWNER: &str = "Jonas Voss";
const DEFAULT_CATEGORY: &str = "books";
const UPDATED_CATEGORY: &str = "antiques";
const DEFAULT_EMAIL: &str = "mara@example.com";
const UPDATED_EMAIL: &str = "jonas@example.com";

fn default_shop() -> Value {
    json!({
        "shopName": DEFAULT_SHOP_NAME,
        "owner": DEFAULT_OWNER,
        "category": DEFAULT_CATEGORY,
        "email": DEFAULT_EMAIL,
    })
}

/// Test helper: create a shop via the API and return the stored entity.
async fn create_shop(client: &Client, base_url: &str, body: &Value) -> Value {
    let resp = client
        .post(format!("{base_url}{ENTITY_API_PATH}"))
        .json(body)
        .send()
        .await
        .expect("Failed to create shop");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to read created entity")
}

/// Test helper: list all shops.
async fn list_shops(client: &Client, base_url: &str) -> Vec<Value> {
    let resp = client
        .get(format!("{base_url}{ENTITY_API_PATH}"))
        .send()
        .await
        .expect("Failed to list shops");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to read list")
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let resp = client
        .post(format!("{base_url}{ENTITY_API_PATH}"))
        .json(&default_shop())
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(resp.status(), StatusCode::CREATED);

    let id = {
        let location = resp
            .headers()
            .get("location")
            .expect("Location header present")
            .to_str()
            .expect("Location header is ASCII")
            .to_owned();
        assert!(location.starts_with("/api/shop-twos/"));

        let alert = resp
            .headers()
            .get("x-shopregistry-alert")
            .expect("alert header present");
        assert_eq!(alert, "shopRegistry.shopTwo.created");

        let created: Value = resp.json().await.expect("Failed to read created entity");
        assert!(created["id"].is_i64());
        assert_eq!(created["shopName"], DEFAULT_SHOP_NAME);
        assert_eq!(created["owner"], DEFAULT_OWNER);
        assert_eq!(created["category"], DEFAULT_CATEGORY);
        assert_eq!(created["email"], DEFAULT_EMAIL);
        created["id"].clone()
    };

    let shops = list_shops(&client, &base_url).await;
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["id"], id);
}

#[tokio::test]
async fn test_create_shop_two_with_existing_id() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let mut body = default_shop();
    body["id"] = json!(1);

    let resp = client
        .post(format!("{base_url}{ENTITY_API_PATH}"))
        .json(&body)
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()
            .get("x-shopregistry-error")
            .expect("error header present"),
        "error.idexists"
    );

    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idexists");
    assert_eq!(problem["params"], "shopTwo");

    // The store must be unchanged
    assert!(list_shops(&client, &base_url).await.is_empty());
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_get_all_shop_twos() {
    let base_url = spawn_server().await;
    let client = Client::new();

    create_shop(&client, &base_url, &default_shop()).await;

    let resp = client
        .get(format!("{base_url}{ENTITY_API_PATH}?sort=id,desc"))
        .send()
        .await
        .expect("Failed to list shops");

    assert_eq!(resp.status(), StatusCode::OK);
    let shops: Vec<Value> = resp.json().await.expect("Failed to read list");
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["shopName"], DEFAULT_SHOP_NAME);
    assert_eq!(shops[0]["owner"], DEFAULT_OWNER);
    assert_eq!(shops[0]["category"], DEFAULT_CATEGORY);
    assert_eq!(shops[0]["email"], DEFAULT_EMAIL);
}

#[tokio::test]
async fn test_get_all_sorted_by_id_descending() {
    let base_url = spawn_server().await;
    let client = Client::new();

    for name in ["first", "second", "third"] {
        create_shop(&client, &base_url, &json!({ "shopName": name })).await;
    }

    let resp = client
        .get(format!("{base_url}{ENTITY_API_PATH}?sort=id,desc"))
        .send()
        .await
        .expect("Failed to list shops");

    assert_eq!(resp.status(), StatusCode::OK);
    let shops: Vec<Value> = resp.json().await.expect("Failed to read list");
    let ids: Vec<i64> = shops
        .iter()
        .map(|s| s["id"].as_i64().expect("id is numeric"))
        .collect();

    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] >= w[1]), "ids not descending: {ids:?}");
}

#[tokio::test]
async fn test_get_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let resp = client
        .get(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .send()
        .await
        .expect("Failed to get shop");

    assert_eq!(resp.status(), StatusCode::OK);
    let shop: Value = resp.json().await.expect("Failed to read entity");
    assert_eq!(shop["id"], json!(id));
    assert_eq!(shop["shopName"], DEFAULT_SHOP_NAME);
}

#[tokio::test]
async fn test_get_non_existing_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let resp = client
        .get(format!("{base_url}{ENTITY_API_PATH}/424242"))
        .send()
        .await
        .expect("Failed to get shop");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.is_empty());
}

// ============================================================================
// Full update
// ============================================================================

#[tokio::test]
async fn test_update_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let replacement = json!({
        "id": id,
        "shopName": UPDATED_SHOP_NAME,
        "owner": UPDATED_OWNER,
        "category": UPDATED_CATEGORY,
        "email": UPDATED_EMAIL,
    });

    let resp = client
        .put(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .json(&replacement)
        .send()
        .await
        .expect("Failed to update shop");

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to read entity");
    assert_eq!(updated["shopName"], UPDATED_SHOP_NAME);
    assert_eq!(updated["owner"], UPDATED_OWNER);
    assert_eq!(updated["category"], UPDATED_CATEGORY);
    assert_eq!(updated["email"], UPDATED_EMAIL);

    let shops = list_shops(&client, &base_url).await;
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["shopName"], UPDATED_SHOP_NAME);
}

#[tokio::test]
async fn test_update_resets_omitted_fields() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let resp = client
        .put(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .json(&json!({ "id": id, "shopName": UPDATED_SHOP_NAME }))
        .send()
        .await
        .expect("Failed to update shop");

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to read entity");
    assert_eq!(updated["shopName"], UPDATED_SHOP_NAME);
    assert!(updated["owner"].is_null());
    assert!(updated["category"].is_null());
    assert!(updated["email"].is_null());
}

#[tokio::test]
async fn test_update_without_body_id() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let resp = client
        .put(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .json(&default_shop())
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idnull");
}

#[tokio::test]
async fn test_update_with_mismatched_id() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let mut body = default_shop();
    body["id"] = json!(id);

    let resp = client
        .put(format!("{base_url}{ENTITY_API_PATH}/{}", id + 1))
        .json(&body)
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idinvalid");

    // The stored record is untouched
    let shops = list_shops(&client, &base_url).await;
    assert_eq!(shops[0]["shopName"], DEFAULT_SHOP_NAME);
}

#[tokio::test]
async fn test_update_non_existing_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let mut body = default_shop();
    body["id"] = json!(777);

    let resp = client
        .put(format!("{base_url}{ENTITY_API_PATH}/777"))
        .json(&body)
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idnotfound");
}

// ============================================================================
// Partial update
// ============================================================================

#[tokio::test]
async fn test_partial_update_preserves_untouched_fields() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let patch = json!({
        "id": id,
        "category": UPDATED_CATEGORY,
        "email": UPDATED_EMAIL,
    });

    let resp = client
        .patch(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .header(CONTENT_TYPE, "application/merge-patch+json")
        .body(patch.to_string())
        .send()
        .await
        .expect("Failed to patch shop");

    assert_eq!(resp.status(), StatusCode::OK);
    let patched: Value = resp.json().await.expect("Failed to read entity");
    assert_eq!(patched["shopName"], DEFAULT_SHOP_NAME);
    assert_eq!(patched["owner"], DEFAULT_OWNER);
    assert_eq!(patched["category"], UPDATED_CATEGORY);
    assert_eq!(patched["email"], UPDATED_EMAIL);

    // The merged record is what got stored
    let shops = list_shops(&client, &base_url).await;
    assert_eq!(shops[0]["shopName"], DEFAULT_SHOP_NAME);
    assert_eq!(shops[0]["category"], UPDATED_CATEGORY);
}

#[tokio::test]
async fn test_partial_update_with_all_fields() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let patch = json!({
        "id": id,
        "shopName": UPDATED_SHOP_NAME,
        "owner": UPDATED_OWNER,
        "category": UPDATED_CATEGORY,
        "email": UPDATED_EMAIL,
    });

    let resp = client
        .patch(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .header(CONTENT_TYPE, "application/merge-patch+json")
        .body(patch.to_string())
        .send()
        .await
        .expect("Failed to patch shop");

    assert_eq!(resp.status(), StatusCode::OK);
    let patched: Value = resp.json().await.expect("Failed to read entity");
    assert_eq!(patched["shopName"], UPDATED_SHOP_NAME);
    assert_eq!(patched["owner"], UPDATED_OWNER);
    assert_eq!(patched["category"], UPDATED_CATEGORY);
    assert_eq!(patched["email"], UPDATED_EMAIL);
}

#[tokio::test]
async fn test_partial_update_without_body_id() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let resp = client
        .patch(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .header(CONTENT_TYPE, "application/merge-patch+json")
        .body(json!({ "category": UPDATED_CATEGORY }).to_string())
        .send()
        .await
        .expect("Failed to send patch");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idnull");
}

#[tokio::test]
async fn test_partial_update_with_mismatched_id() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let resp = client
        .patch(format!("{base_url}{ENTITY_API_PATH}/{}", id + 1))
        .header(CONTENT_TYPE, "application/merge-patch+json")
        .body(json!({ "id": id, "category": UPDATED_CATEGORY }).to_string())
        .send()
        .await
        .expect("Failed to send patch");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idinvalid");
}

#[tokio::test]
async fn test_partial_update_non_existing_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let resp = client
        .patch(format!("{base_url}{ENTITY_API_PATH}/555"))
        .header(CONTENT_TYPE, "application/merge-patch+json")
        .body(json!({ "id": 555, "category": UPDATED_CATEGORY }).to_string())
        .send()
        .await
        .expect("Failed to send patch");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.expect("Failed to read problem body");
    assert_eq!(problem["message"], "error.idnotfound");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_shop_two() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    let resp = client
        .delete(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .send()
        .await
        .expect("Failed to delete shop");

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.is_empty());

    // Reads after delete are 404
    let resp = client
        .get(format!("{base_url}{ENTITY_API_PATH}/{id}"))
        .send()
        .await
        .expect("Failed to get shop");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert!(list_shops(&client, &base_url).await.is_empty());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let created = create_shop(&client, &base_url, &default_shop()).await;
    let id = created["id"].as_i64().expect("id is numeric");

    for _ in 0..2 {
        let resp = client
            .delete(format!("{base_url}{ENTITY_API_PATH}/{id}"))
            .send()
            .await
            .expect("Failed to delete shop");
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    assert!(list_shops(&client, &base_url).await.is_empty());
}

// ============================================================================
// Routing edges
// ============================================================================

#[tokio::test]
async fn test_mutations_without_path_id_are_rejected() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let url = format!("{base_url}{ENTITY_API_PATH}");

    let resp = client
        .put(&url)
        .json(&default_shop())
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = client
        .patch(&url)
        .header(CONTENT_TYPE, "application/merge-patch+json")
        .body(default_shop().to_string())
        .send()
        .await
        .expect("Failed to send patch");
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = client
        .delete(&url)
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to check health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to check readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}
