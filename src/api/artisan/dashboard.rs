use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::artisan::own_profile;
use crate::entities::{
    artisan_profile,
    material::{self, Entity as MaterialEntity},
    product::{self, Entity as ProductEntity},
};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn artisan_dashboard_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .layer(Extension(db))
}

//ROUTES
async fn dashboard(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let profile = match own_profile(&db, claims.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Artisan profile not found or not yet set up. Please contact support or complete your profile setup."
                })),
            )
                .into_response();
        }
        Err(response) => return response.into_response(),
    };

    let products = ProductEntity::find()
        .filter(product::Column::ArtisanProfileId.eq(profile.id))
        .order_by_desc(product::Column::DateAdded)
        .all(&*db)
        .await;

    let materials = MaterialEntity::find()
        .filter(material::Column::SupplierArtisanProfileId.eq(profile.id))
        .order_by_desc(material::Column::DateAdded)
        .all(&*db)
        .await;

    match (products, materials) {
        (Ok(products), Ok(materials)) => (
            StatusCode::OK,
            Json(DashboardResponse {
                profile,
                products,
                materials,
            }),
        )
            .into_response(),
        _ => (
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
struct DashboardResponse {
    profile: artisan_profile::Model,
    products: Vec<product::Model>,
    materials: Vec<material::Model>,
}
