//! Admin panel flows: product CRUD and hosted-image list management.

use serde_json::{json, Value};

use wallcraft_api_integration::TestServer;

const SEED_IMAGE: &str = "https://i.ibb.co/DfdkKCgk/about2-jpg.jpg";

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    client
        .get(url)
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body")
}

#[tokio::test]
async fn product_crud_round_trip() {
    let server = TestServer::spawn().await;
    let client = server.client();

    // Add.
    let resp = client
        .post(server.url("/api/admin/products"))
        .json(&json!({
            "name": "Silver Mist Panel",
            "desc": "Brushed silver finish.",
            "price_small": "₹4,999",
            "price_medium": "₹6,499",
            "price_large": "₹8,999",
            "features": "silver leaf, teak frame",
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["features"], json!(["silver leaf", "teak frame"]));

    let products = get_json(&client, server.url("/api/admin/products")).await;
    assert_eq!(products.as_array().unwrap().len(), 2);

    // The new product prices carts like any other.
    let resp = client
        .post(server.url("/api/cart/add"))
        .json(&json!({"product_id": id, "size": "medium", "quantity": 2}))
        .send()
        .await
        .unwrap();
    let cart: Value = resp.json().await.unwrap();
    assert_eq!(cart["total"], 12998);

    // Update.
    let resp = client
        .put(server.url(&format!("/api/admin/products/{id}")))
        .json(&json!({
            "name": "Silver Mist",
            "desc": "Brushed silver finish.",
            "price_small": "₹5,499",
            "price_medium": "₹6,999",
            "price_large": "₹8,999",
            "features": "silver leaf",
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "Silver Mist");
    assert_eq!(updated["price_small"], "₹5,499");

    // The cart reprices from the updated catalog.
    let cart = get_json(&client, server.url("/api/cart")).await;
    assert_eq!(cart["total"], 13998);

    // Delete; a second delete has nothing left to remove.
    let resp = client
        .delete(server.url(&format!("/api/admin/products/{id}")))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let resp = client
        .delete(server.url(&format!("/api/admin/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Deleted products silently drop out of existing carts.
    let cart = get_json(&client, server.url("/api/cart")).await;
    assert_eq!(cart["total"], 0);
}

#[tokio::test]
async fn update_of_unknown_product_404s() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = client
        .put(server.url("/api/admin/products/999"))
        .json(&json!({"name": "Ghost Panel"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn add_requires_a_name() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = client
        .post(server.url("/api/admin/products"))
        .json(&json!({"name": "  ", "price_small": "₹4,999"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn failed_uploads_cost_the_image_not_the_save() {
    let server = TestServer::spawn().await;
    let client = server.client();

    // The image host is unconfigured in tests, so the upload is dropped and
    // the product is saved without it.
    let resp = client
        .post(server.url("/api/admin/products"))
        .json(&json!({
            "name": "Bare Panel",
            "new": "₹2,999",
            "images": [{"name": "panel.png", "data": "AQID"}],
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let created: Value = resp.json().await.unwrap();
    assert!(created["imgs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn image_remove_and_replace_paths() {
    let server = TestServer::spawn().await;
    let client = server.client();

    // Remove against an unknown product.
    let resp = client
        .post(server.url("/api/admin/products/999/images/remove"))
        .json(&json!({"url": SEED_IMAGE}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Replace is refused outright for non-image filenames.
    let resp = client
        .post(server.url("/api/admin/products/1/images/replace"))
        .json(&json!({"url": SEED_IMAGE, "image": {"name": "evil.exe", "data": "AQID"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // With no image host configured the replacement upload fails and the
    // original image stays.
    let resp = client
        .post(server.url("/api/admin/products/1/images/replace"))
        .json(&json!({"url": SEED_IMAGE, "image": {"name": "panel.png", "data": "AQID"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let detail = get_json(&client, server.url("/api/products/1")).await;
    assert_eq!(detail["imgs"][0], SEED_IMAGE);

    // Remove the seed image; the product survives with an empty list and the
    // cart falls back to the placeholder image.
    let resp = client
        .post(server.url("/api/admin/products/1/images/remove"))
        .json(&json!({"url": SEED_IMAGE}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let detail = get_json(&client, server.url("/api/products/1")).await;
    assert!(detail["imgs"].as_array().unwrap().is_empty());

    client
        .post(server.url("/api/cart/add"))
        .json(&json!({"product_id": "1", "size": "small"}))
        .send()
        .await
        .unwrap();
    let cart = get_json(&client, server.url("/api/cart")).await;
    assert_eq!(cart["items"][0]["img"], "");
}
