use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::entities::{
    artisan_profile,
    product::{self, Entity as ProductEntity},
};

pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", get(get_products))
        .route("/product/:id", get(get_product))
        .layer(Extension(db))
}

async fn get_products(
    Query(params): Query<GetProductsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    // Only live items from approved artisans are browsable.
    let mut half_result = ProductEntity::find()
        .join(JoinType::InnerJoin, product::Relation::ArtisanProfile.def())
        .filter(product::Column::IsActive.eq(true))
        .filter(artisan_profile::Column::IsApproved.eq(true));

    if let Some(category_id) = params.category_id {
        half_result = half_result.filter(product::Column::CategoryId.eq(category_id));
    }

    if let Some(q) = params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        half_result = half_result.filter(
            Condition::any()
                .add(product::Column::Name.contains(q))
                .add(product::Column::Description.contains(q)),
        );
    }

    let result = half_result
        .order_by_desc(product::Column::DateAdded)
        .all(&*db)
        .await;
    match result {
        Ok(products) => {
            let response: Vec<PublicProductResponse> = products
                .into_iter()
                .map(PublicProductResponse::new)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        )
            .into_response(),
    }
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let result = ProductEntity::find_by_id(id)
        .join(JoinType::InnerJoin, product::Relation::ArtisanProfile.def())
        .filter(product::Column::IsActive.eq(true))
        .filter(artisan_profile::Column::IsApproved.eq(true))
        .one(&*db)
        .await;
    match result {
        Ok(Some(prod)) => (StatusCode::OK, Json(PublicProductResponse::new(prod))).into_response(),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No product with {} id was found.", id)
            })),
        )
            .into_response(),
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
#[derive(Deserialize)]
struct GetProductsQuery {
    category_id: Option<i32>,
    q: Option<String>,
}

#[derive(Serialize)]
struct PublicProductResponse {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    stock_quantity: i32,
    category_id: Option<i32>,
    main_image_url: Option<String>,
    story_details_text: Option<String>,
}

impl PublicProductResponse {
    fn new(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock_quantity: model.stock_quantity,
            category_id: model.category_id,
            main_image_url: model.main_image_url,
            story_details_text: model.story_details_text,
        }
    }
}
