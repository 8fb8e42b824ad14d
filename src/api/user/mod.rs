pub mod cart;
pub mod checkout;
pub mod orders;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::middleware::auth::{auth_middleware, AuthState};
use crate::payment::PaymentAuthorizer;
use crate::session::CartStore;
use cart::cart_router;
use checkout::checkout_router;
use orders::orders_router;

// Cart, checkout and order history are open to any authenticated user
// regardless of role, hence `role: None`.
pub fn user_api_router(
    db: Arc<DatabaseConnection>,
    store: Arc<CartStore>,
    authorizer: Arc<dyn PaymentAuthorizer>,
) -> Router {
    Router::new()
        .merge(cart_router(db.clone(), store.clone()))
        .merge(checkout_router(db.clone(), store, authorizer))
        .merge(orders_router(db.clone()))
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: None,
            },
            auth_middleware,
        ))
}
