use reqwest::StatusCode;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;

mod common;
use common::{bearer, decimal, spawn_app, TestApp};

fn checkout_payload(card_number: &str) -> serde_json::Value {
    json!({
        "shipping_address": "12 Pottery Lane",
        "shipping_city": "Kilnford",
        "shipping_postal_code": "K1L 2N3",
        "card_number": card_number,
        "card_expiry": "11/27",
        "card_cvv": "123"
    })
}

async fn add_to_cart(
    app: &TestApp,
    client: &reqwest::Client,
    token: &str,
    product_id: i32,
    quantity: i32,
) {
    let response = client
        .post(format!("{}/api/cart", app.address))
        .headers(bearer(token))
        .json(&json!({
            "item_id": product_id,
            "item_type": "Product",
            "quantity": quantity
        }))
        .send()
        .await
        .expect("Failed to send add to cart request");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn checkout_with_empty_cart_is_rejected_and_creates_no_order() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.register_buyer(&client, "empty_checkout").await;

    let view = client
        .get(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(view.status(), StatusCode::BAD_REQUEST);

    let submit = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .json(&checkout_payload("4242424242424242"))
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(submit.status(), StatusCode::BAD_REQUEST);

    let orders = client
        .get(format!("{}/api/orders", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn invalid_form_fields_fail_validation_and_keep_the_cart() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.register_buyer(&client, "typo_buyer").await;
    let product_id = app.seed_product("Copper Pot", dec!(60.00), 5).await;
    add_to_cart(&app, &client, &token, product_id, 1).await;

    let mut payload = checkout_payload("4242424242424242");
    payload["card_expiry"] = json!("13/27");
    payload["card_cvv"] = json!("12");

    let response = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert!(body["fields"]["card_expiry"].is_array());
    assert!(body["fields"]["card_cvv"].is_array());

    let cart = client
        .get(format!("{}/api/cart", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn card_ending_1111_is_declined_and_the_cart_survives() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.register_buyer(&client, "declined_buyer").await;
    let product_id = app.seed_product("Silver Ring", dec!(80.00), 5).await;
    add_to_cart(&app, &client, &token, product_id, 1).await;

    let response = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .json(&checkout_payload("4111111111111111"))
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let cart = client
        .get(format!("{}/api/cart", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    let orders = client
        .get(format!("{}/api/orders", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn card_ending_0000_is_always_approved() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.register_buyer(&client, "zero_buyer").await;
    let product_id = app.seed_product("Jade Pendant", dec!(10.00), 5).await;
    add_to_cart(&app, &client, &token, product_id, 1).await;

    let response = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .json(&checkout_payload("4000000000000000"))
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn approved_checkout_creates_the_order_and_clears_the_cart() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.register_buyer(&client, "happy_buyer").await;
    let product_id = app.seed_product("Stoneware Jug", dec!(21.25), 10).await;
    add_to_cart(&app, &client, &token, product_id, 2).await;

    // Cart totals $42.50 before submission.
    let view = client
        .get(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(decimal(&view["total"]), dec!(42.50));

    let response = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .json(&checkout_payload("4242424242424242"))
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.json::<serde_json::Value>().await.unwrap();
    let order_id = body["order_id"].as_i64().unwrap();
    assert_eq!(decimal(&body["total"]), dec!(42.50));

    // Cart is gone.
    let cart = client
        .get(format!("{}/api/cart", app.address))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 0);

    // Order persisted with one line item and the frozen total.
    let order = client
        .get(format!("{}/api/orders/{}", app.address, order_id))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(decimal(&order["total_amount"]), dec!(42.50));
    assert_eq!(order["status"], "processing");
    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(decimal(&items[0]["unit_price_at_purchase"]), dec!(21.25));
    assert_eq!(items[0]["product_id"].as_i64().unwrap(), product_id as i64);
    assert!(items[0]["material_id"].is_null());
}

#[tokio::test]
async fn order_prices_stay_frozen_when_the_catalog_changes() {
    use artisans_market::entities::product;

    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.register_buyer(&client, "frozen_buyer").await;
    let product_id = app.seed_product("Walnut Tray", dec!(25.00), 10).await;
    add_to_cart(&app, &client, &token, product_id, 1).await;

    let response = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&token))
        .json(&checkout_payload("4242424242424242"))
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let order_id = response.json::<serde_json::Value>().await.unwrap()["order_id"]
        .as_i64()
        .unwrap();

    // Reprice the product after the fact.
    let model = product::Entity::find_by_id(product_id)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    let mut model: product::ActiveModel = model.into();
    model.price = Set(dec!(99.00));
    model.update(&*app.db).await.unwrap();

    let order = client
        .get(format!("{}/api/orders/{}", app.address, order_id))
        .headers(bearer(&token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(decimal(&order["total_amount"]), dec!(25.00));
    assert_eq!(
        decimal(&order["items"][0]["unit_price_at_purchase"]),
        dec!(25.00)
    );
}

#[tokio::test]
async fn orders_are_scoped_to_their_buyer() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let owner_token = app.register_buyer(&client, "order_owner").await;
    let other_token = app.register_buyer(&client, "order_snoop").await;
    let product_id = app.seed_product("Felt Hat", dec!(32.00), 10).await;
    add_to_cart(&app, &client, &owner_token, product_id, 1).await;

    let response = client
        .post(format!("{}/api/checkout", app.address))
        .headers(bearer(&owner_token))
        .json(&checkout_payload("4242424242424242"))
        .send()
        .await
        .expect("Failed to send checkout request");
    let order_id = response.json::<serde_json::Value>().await.unwrap()["order_id"]
        .as_i64()
        .unwrap();

    // Foreign confirmation looks like a missing order.
    let foreign = client
        .get(format!("{}/api/orders/{}", app.address, order_id))
        .headers(bearer(&other_token))
        .send()
        .await
        .expect("Failed to send order request");
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    // And the listing never leaks someone else's orders.
    let mine = client
        .get(format!("{}/api/orders", app.address))
        .headers(bearer(&other_token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 0);

    let owners = client
        .get(format!("{}/api/orders", app.address))
        .headers(bearer(&owner_token))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(owners.as_array().unwrap().len(), 1);
}
