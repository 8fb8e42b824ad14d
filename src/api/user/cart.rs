use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::cart::{Cart, CartItem, ItemType};
use crate::entities::{material, product};
use crate::middleware::auth::Claims;
use crate::session::CartStore;

//ROUTERS
pub fn cart_router(db: Arc<DatabaseConnection>, store: Arc<CartStore>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart))
        .route(
            "/cart/:item_type/:item_id",
            patch(update_cart_quantity).delete(remove_from_cart),
        )
        .layer(Extension(db))
        .layer(Extension(store))
}

//ROUTES
async fn get_cart(
    Extension(store): Extension<Arc<CartStore>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let cart = store.load(claims.user_id).await;
    (StatusCode::OK, Json(CartResponse::new(&cart)))
}

async fn add_to_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(store): Extension<Arc<CartStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCart>,
) -> impl IntoResponse {
    println!("->> Called `add_to_cart` with payload: {:?}", payload);
    let user_id = claims.user_id;
    let quantity = match payload.quantity {
        Some(value) if value > 0 => value,
        _ => 1,
    };

    let mut cart = store.load(user_id).await;

    // An existing line just grows; only brand-new lines hit the catalog.
    if cart.increment(payload.item_id, payload.item_type, quantity) {
        store.store(user_id, cart).await;
        return (
            StatusCode::OK,
            Json(json!({
                "message": "Item added to cart!"
            })),
        );
    }

    let snapshot = match payload.item_type {
        ItemType::Product => {
            match product::Entity::find_by_id(payload.item_id).one(&*db).await {
                Ok(Some(prod)) if prod.is_active && prod.stock_quantity >= quantity => CartItem {
                    item_id: prod.id,
                    item_type: ItemType::Product,
                    name: prod.name,
                    unit_price: prod.price,
                    quantity,
                    image_url: prod.main_image_url,
                },
                Ok(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Product not available or insufficient stock."
                        })),
                    );
                }
                Err(_) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "Internal server error."
                        })),
                    );
                }
            }
        }
        ItemType::Material => {
            match material::Entity::find_by_id(payload.item_id).one(&*db).await {
                Ok(Some(mat)) if mat.is_active && mat.stock_quantity >= quantity => CartItem {
                    item_id: mat.id,
                    item_type: ItemType::Material,
                    name: mat.name,
                    unit_price: mat.price_per_unit,
                    quantity,
                    image_url: mat.image_url,
                },
                Ok(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Material not available or insufficient stock."
                        })),
                    );
                }
                Err(_) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "Internal server error."
                        })),
                    );
                }
            }
        }
    };

    cart.add_item(snapshot);
    store.store(user_id, cart).await;
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Item added to cart!"
        })),
    )
}

async fn update_cart_quantity(
    Path((item_type, item_id)): Path<(ItemType, i32)>,
    Extension(store): Extension<Arc<CartStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateCartQuantity>,
) -> impl IntoResponse {
    let mut cart = store.load(claims.user_id).await;
    cart.update_quantity(item_id, item_type, payload.quantity);
    let response = CartResponse::new(&cart);
    store.store(claims.user_id, cart).await;
    (StatusCode::OK, Json(response))
}

async fn remove_from_cart(
    Path((item_type, item_id)): Path<(ItemType, i32)>,
    Extension(store): Extension<Arc<CartStore>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let mut cart = store.load(claims.user_id).await;
    cart.remove_item(item_id, item_type);
    let response = CartResponse::new(&cart);
    store.store(claims.user_id, cart).await;
    (StatusCode::OK, Json(response))
}

//Structs
#[derive(Deserialize, Debug)]
struct AddToCart {
    item_id: i32,
    item_type: ItemType,
    quantity: Option<i32>,
}

#[derive(Deserialize)]
struct UpdateCartQuantity {
    quantity: i32,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl CartResponse {
    pub fn new(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
        }
    }
}
