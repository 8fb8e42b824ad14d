pub mod posts;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState};
use posts::influencer_post_router;

pub fn influencer_api_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .merge(influencer_post_router(db.clone()))
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Some(Role::Influencer),
            },
            auth_middleware,
        ))
}
