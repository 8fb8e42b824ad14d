pub mod approvals;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState};
use approvals::approvals_router;

pub fn admin_api_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .merge(approvals_router(db.clone()))
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Some(Role::Admin),
            },
            auth_middleware,
        ))
}
