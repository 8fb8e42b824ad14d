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
use crate::entities::material::{self, Entity as MaterialEntity};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn artisan_material_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/material", post(create_material))
        .route(
            "/material/:id",
            axum::routing::patch(patch_material).delete(delete_material),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_material(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateMaterial>,
) -> impl IntoResponse {
    println!("->> Called `create_material()` for user {}", claims.user_id);

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

    let new_material = material::ActiveModel {
        supplier_artisan_profile_id: Set(profile.id),
        category_id: Set(payload.category_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price_per_unit: Set(payload.price_per_unit),
        unit_of_measure: Set(payload.unit_of_measure),
        stock_quantity: Set(payload.stock_quantity),
        image_url: Set(payload.image_url),
        date_added: Set(Utc::now()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    match material::Entity::insert(new_material).exec(&*db).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Material created successfully!",
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

async fn patch_material(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PatchMaterial>,
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

    let result = MaterialEntity::find_by_id(id)
        .filter(material::Column::SupplierArtisanProfileId.eq(profile.id))
        .one(&*db)
        .await;

    match result {
        Ok(Some(model)) => {
            let mut model: material::ActiveModel = model.into();

            if let Some(name) = payload.name {
                model.name = Set(name);
            }
            if let Some(description) = payload.description {
                model.description = Set(Some(description));
            }
            if let Some(price_per_unit) = payload.price_per_unit {
                model.price_per_unit = Set(price_per_unit);
            }
            if let Some(unit_of_measure) = payload.unit_of_measure {
                model.unit_of_measure = Set(unit_of_measure);
            }
            if let Some(stock_quantity) = payload.stock_quantity {
                model.stock_quantity = Set(stock_quantity);
            }
            if let Some(category_id) = payload.category_id {
                model.category_id = Set(Some(category_id));
            }
            if let Some(image_url) = payload.image_url {
                model.image_url = Set(Some(image_url));
            }
            if let Some(is_active) = payload.is_active {
                model.is_active = Set(is_active);
            }

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
                "error": format!("No material with {} id was found.", id)
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

async fn delete_material(
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

    let result = MaterialEntity::find_by_id(id)
        .filter(material::Column::SupplierArtisanProfileId.eq(profile.id))
        .one(&*db)
        .await;

    match result {
        Ok(Some(model)) => {
            let model: material::ActiveModel = model.into();
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
                "error": format!("No material with {} id was found.", id)
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
struct CreateMaterial {
    name: String,
    description: Option<String>,
    price_per_unit: Decimal,
    unit_of_measure: String,
    stock_quantity: i32,
    category_id: Option<i32>,
    image_url: Option<String>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
struct PatchMaterial {
    name: Option<String>,
    description: Option<String>,
    price_per_unit: Option<Decimal>,
    unit_of_measure: Option<String>,
    stock_quantity: Option<i32>,
    category_id: Option<i32>,
    image_url: Option<String>,
    is_active: Option<bool>,
}
