pub mod auth;
pub mod category;
pub mod feed;
pub mod material;
pub mod product;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use auth::auth_router;
use category::category_router;
use feed::feed_router;
use material::material_router;
use product::product_router;

pub fn public_api_router(db: Arc<DatabaseConnection>) -> Router {
    let auth_router = auth_router(db.clone());
    let category_router = category_router(db.clone());
    let product_router = product_router(db.clone());
    let material_router = material_router(db.clone());
    let feed_router = feed_router(db.clone());

    Router::new()
        .merge(auth_router)
        .merge(category_router)
        .merge(product_router)
        .merge(material_router)
        .merge(feed_router)
}
