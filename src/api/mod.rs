pub mod admin;
pub mod artisan;
pub mod influencer;
pub mod public;
pub mod user;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::middleware::logging::logging_middleware;
use crate::payment::PaymentAuthorizer;
use crate::session::CartStore;

use admin::admin_api_router;
use artisan::artisan_api_router;
use influencer::influencer_api_router;
use public::public_api_router;
use user::user_api_router;

pub fn create_api_router(
    shared_db: Arc<DatabaseConnection>,
    cart_store: Arc<CartStore>,
    authorizer: Arc<dyn PaymentAuthorizer>,
) -> Router {
    Router::new()
        .nest("/api", public_api_router(shared_db.clone()))
        .nest(
            "/api",
            user_api_router(shared_db.clone(), cart_store, authorizer),
        )
        .nest("/api/artisan", artisan_api_router(shared_db.clone()))
        .nest("/api/influencer", influencer_api_router(shared_db.clone()))
        .nest("/api/admin", admin_api_router(shared_db.clone()))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
