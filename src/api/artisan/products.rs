use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::artisan::own_profile;
use crate::entities::product::{self, Entity as ProductEntity};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn artisan_product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", post(create_product))
        .route(
            "/product/:id",
            axum::routing::patch(patch_product).delete(delete_product),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateProduct>,
) -> impl IntoResponse {
    println!("->> Called `create_product()` for user {}", claims.user_id);

    let profile = match own_profile(&db, claims.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Unable to find your artisan profile."
                })),
            );
        }
        Err(response) => return response,
    };

    let now = Utc::now();
    let new_product = product::ActiveModel {
        artisan_profile_id: Set(profile.id),
        category_id: Set(payload.category_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        stock_quantity: Set(payload.stock_quantity),
        main_image_url: Set(payload.main_image_url),
        story_details_text: Set(payload.story_details_text),
        date_added: Set(now),
        last_updated: Set(now),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    match product::Entity::insert(new_product).exec(&*db).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Product created successfully!",
                "id": result.last_insert_id
            })),
        ),
        Err(err) => {
            println!("Error: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            )
        }
    }
}

async fn patch_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PatchProduct>,
) -> impl IntoResponse {
    let profile = match own_profile(&db, claims.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Unable to find your artisan profile."
                })),
            );
        }
        Err(response) => return response,
    };

    let result = ProductEntity::find_by_id(id)
        .filter(product::Column::ArtisanProfileId.eq(profile.id))
        .one(&*db)
        .await;

    match result {
        Ok(Some(model)) => {
            let mut model: product::ActiveModel = model.into();

            if let Some(name) = payload.name {
                model.name = Set(name);
            }
            if let Some(description) = payload.description {
                model.description = Set(description);
            }
            if let Some(price) = payload.price {
                model.price = Set(price);
            }
            if let Some(stock_quantity) = payload.stock_quantity {
                model.stock_quantity = Set(stock_quantity);
            }
            if let Some(category_id) = payload.category_id {
                model.category_id = Set(Some(category_id));
            }
            if let Some(main_image_url) = payload.main_image_url {
                model.main_image_url = Set(Some(main_image_url));
            }
            if let Some(story_details_text) = payload.story_details_text {
                model.story_details_text = Set(Some(story_details_text));
            }
            if let Some(is_active) = payload.is_active {
                model.is_active = Set(is_active);
            }
            model.last_updated = Set(Utc::now());

            match model.update(&*db).await {
                Ok(_) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Resource patched successfully"
                    })),
                ),
                Err(_) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Failed to patch this resource"
                    })),
                ),
            }
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No product with {} id was found.", id)
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        ),
    }
}

async fn delete_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let profile = match own_profile(&db, claims.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Unable to find your artisan profile."
                })),
            );
        }
        Err(response) => return response,
    };

    let result = ProductEntity::find_by_id(id)
        .filter(product::Column::ArtisanProfileId.eq(profile.id))
        .one(&*db)
        .await;

    match result {
        Ok(Some(model)) => {
            let model: product::ActiveModel = model.into();
            match model.delete(&*db).await {
                Ok(_) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Resource deleted successfully"
                    })),
                ),
                Err(_) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Failed to delete this resource"
                    })),
                ),
            }
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No product with {} id was found.", id)
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        ),
    }
}

//Structs
#[derive(Deserialize)]
struct CreateProduct {
    name: String,
    description: String,
    price: Decimal,
    stock_quantity: i32,
    category_id: Option<i32>,
    main_image_url: Option<String>,
    story_details_text: Option<String>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
struct PatchProduct {
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    stock_quantity: Option<i32>,
    category_id: Option<i32>,
    main_image_url: Option<String>,
    story_details_text: Option<String>,
    is_active: Option<bool>,
}
