use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::{
    order::{self, Entity as OrderEntity},
    order_item::{self, Entity as OrderItemEntity},
};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn orders_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/orders", get(my_orders))
        .route("/orders/:id", get(order_confirmation))
        .layer(Extension(db))
}

//ROUTES
async fn my_orders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match OrderEntity::find()
        .filter(order::Column::BuyerUserId.eq(claims.user_id))
        .order_by_desc(order::Column::OrderDate)
        .all(&*db)
        .await
    {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        )
            .into_response(),
    }
}

async fn order_confirmation(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    // Scoped to the caller: a foreign order id looks like a missing one.
    let result = OrderEntity::find_by_id(id)
        .filter(order::Column::BuyerUserId.eq(claims.user_id))
        .one(&*db)
        .await;

    let order = match result {
        Ok(Some(order)) => order,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": format!("No order with {} id was found.", id)
                })),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error."
                })),
            )
                .into_response();
        }
    };

    match OrderItemEntity::find()
        .filter(order_item::Column::OrderId.eq(order.id))
        .all(&*db)
        .await
    {
        Ok(items) => (StatusCode::OK, Json(OrderResponse { order, items })).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        )
            .into_response(),
    }
}

//Structs
#[derive(Serialize)]
struct OrderResponse {
    #[serde(flatten)]
    order: order::Model,
    items: Vec<order_item::Model>,
}
