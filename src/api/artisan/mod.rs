pub mod dashboard;
pub mod materials;
pub mod products;

use axum::{http::StatusCode, middleware::from_fn_with_state, Json, Router};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::json;
use std::sync::Arc;

use crate::entities::artisan_profile::{self, Entity as ArtisanProfileEntity};
use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState};
use dashboard::artisan_dashboard_router;
use materials::artisan_material_router;
use products::artisan_product_router;

pub fn artisan_api_router(db: Arc<DatabaseConnection>) -> Router {
    let artisan_dashboard_router = artisan_dashboard_router(db.clone());
    let artisan_product_router = artisan_product_router(db.clone());
    let artisan_material_router = artisan_material_router(db.clone());

    Router::new()
        .merge(artisan_dashboard_router)
        .merge(artisan_product_router)
        .merge(artisan_material_router)
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Some(Role::Artisan),
            },
            auth_middleware,
        ))
}

// Every artisan handler scopes its queries to the caller's own profile.
pub(super) async fn own_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<artisan_profile::Model>, (StatusCode, Json<serde_json::Value>)> {
    ArtisanProfileEntity::find()
        .filter(artisan_profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error."
                })),
            )
        })
}
