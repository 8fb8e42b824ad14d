use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::api::user::cart::CartResponse;
use crate::cart::ItemType;
use crate::entities::{order, order_item};
use crate::middleware::auth::Claims;
use crate::payment::{PaymentAuthorizer, PaymentDecision};
use crate::session::CartStore;

//ROUTERS
pub fn checkout_router(
    db: Arc<DatabaseConnection>,
    store: Arc<CartStore>,
    authorizer: Arc<dyn PaymentAuthorizer>,
) -> Router {
    Router::new()
        .route("/checkout", get(view_checkout).post(submit_checkout))
        .layer(Extension(db))
        .layer(Extension(store))
        .layer(Extension(authorizer))
}

//ROUTES
async fn view_checkout(
    Extension(store): Extension<Arc<CartStore>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let cart = store.load(claims.user_id).await;
    if cart.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Your cart is empty."
            })),
        )
            .into_response();
    }
    (StatusCode::OK, Json(CartResponse::new(&cart))).into_response()
}

async fn submit_checkout(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(store): Extension<Arc<CartStore>>,
    Extension(authorizer): Extension<Arc<dyn PaymentAuthorizer>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CheckoutPayload>,
) -> impl IntoResponse {
    println!("->> Called `submit_checkout` for user {}", claims.user_id);
    let user_id = claims.user_id;
    let cart = store.load(user_id).await;

    // The empty-cart guard is a user-visible validation error, never a fault.
    if cart.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Your cart is empty. Please add items before checking out."
            })),
        );
    }

    if let Err(errors) = payload.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Validation failed",
                "fields": errors
            })),
        );
    }

    let total = cart.total();
    if authorizer.authorize(&payload.card_number, total) == PaymentDecision::Declined {
        return (
            StatusCode::PAYMENT_REQUIRED,
            Json(json!({
                "error": "Payment declined. Please check your card details or use a different card."
            })),
        );
    }

    // Order header and line items commit together or not at all. The session
    // cart is only cleared once the commit has gone through, so a failed
    // write never loses the buyer's items.
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    let new_order = order::ActiveModel {
        buyer_user_id: Set(user_id),
        order_date: Set(Utc::now()),
        total_amount: Set(total),
        shipping_address: Set(payload.shipping_address),
        shipping_city: Set(payload.shipping_city),
        shipping_postal_code: Set(payload.shipping_postal_code),
        status: Set(order::Status::Processing),
        ..Default::default()
    };

    let order_id = match order::Entity::insert(new_order).exec(&txn).await {
        Ok(result) => result.last_insert_id,
        Err(_) => {
            let _ = txn.rollback().await;
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    let items: Vec<order_item::ActiveModel> = cart
        .items()
        .iter()
        .map(|line| order_item::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(match line.item_type {
                ItemType::Product => Some(line.item_id),
                ItemType::Material => None,
            }),
            material_id: Set(match line.item_type {
                ItemType::Material => Some(line.item_id),
                ItemType::Product => None,
            }),
            quantity: Set(line.quantity),
            unit_price_at_purchase: Set(line.unit_price),
            ..Default::default()
        })
        .collect();

    if order_item::Entity::insert_many(items).exec(&txn).await.is_err() {
        let _ = txn.rollback().await;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        );
    }

    if txn.commit().await.is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        );
    }

    store.clear(user_id).await;
    (
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Order #{} placed successfully! Thank you for your purchase.", order_id),
            "order_id": order_id,
            "total": total
        })),
    )
}

//Structs
#[derive(Deserialize, Validate)]
struct CheckoutPayload {
    #[validate(length(min = 1, max = 200))]
    shipping_address: String,
    #[validate(length(max = 100))]
    shipping_city: Option<String>,
    #[validate(length(max = 10))]
    shipping_postal_code: Option<String>,
    #[validate(regex(path = *CARD_NUMBER_RE, message = "Invalid card number."))]
    card_number: String,
    #[validate(regex(path = *CARD_EXPIRY_RE, message = "Expiry Date must be in MM/YY format."))]
    card_expiry: String,
    #[validate(regex(path = *CARD_CVV_RE, message = "Invalid CVV."))]
    card_cvv: String,
}

static CARD_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12,19}$").unwrap());
static CARD_EXPIRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/?([0-9]{2})$").unwrap());
static CARD_CVV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").unwrap());
