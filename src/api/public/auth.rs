use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::{
    artisan_profile,
    hash_password,
    user::{self, Entity as UserEntity, Role},
};
use crate::middleware::auth::generate_token;

//ROUTERS
pub fn auth_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login))
        .layer(Extension(db))
}

//ROUTES
async fn register_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<RegisterUser>,
) -> impl IntoResponse {
    println!("->> Called `register_user()` for '{}'", payload.username);

    if let Err(errors) = payload.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Validation failed",
                "fields": errors
            })),
        );
    }

    // Artisans sign up with their brand; the profile starts unapproved.
    if payload.role == RegisterRole::Artisan
        && payload
            .brand_name
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Brand Name is required for Artisans."
            })),
        );
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    let password = match hash_password(&payload.password) {
        Ok(password) => password,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "An internal server error occured"
                })),
            );
        }
    };

    let new_user = user::ActiveModel {
        username: Set(payload.username),
        password: Set(password),
        role: Set(payload.role.into()),
        registration_date: Set(Utc::now()),
        is_active: Set(true),
        ..Default::default()
    };

    let user_id = match user::Entity::insert(new_user).exec(&txn).await {
        Ok(result) => result.last_insert_id,
        Err(err) => {
            println!("Error: {:?}", err);
            let _ = txn.rollback().await;
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "Username already exists"
                })),
            );
        }
    };

    if payload.role == RegisterRole::Artisan {
        let profile = artisan_profile::ActiveModel {
            user_id: Set(user_id),
            brand_name: Set(payload.brand_name.unwrap_or_default()),
            bio: Set(payload.bio),
            is_approved: Set(false),
            ..Default::default()
        };
        if artisan_profile::Entity::insert(profile)
            .exec(&txn)
            .await
            .is_err()
        {
            let _ = txn.rollback().await;
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    }

    match txn.commit().await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "User registered successfully"
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        ),
    }
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UserLogin>,
) -> impl IntoResponse {
    println!("->> Called `login()` for '{}'", payload.username);

    let result = UserEntity::find()
        .filter(user::Column::Username.eq(&*payload.username))
        .filter(user::Column::IsActive.eq(true))
        .one(&*db)
        .await;

    let model = match result {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Invalid username or password"
                })),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "An internal server error occured"
                })),
            );
        }
    };

    if model.check_hash(&payload.password).is_err() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid username or password"
            })),
        );
    }

    // Artisans cannot sign in until an admin has approved their profile.
    if model.role == Role::Artisan {
        let approved = artisan_profile::Entity::find()
            .filter(artisan_profile::Column::UserId.eq(model.id))
            .one(&*db)
            .await;
        match approved {
            Ok(Some(profile)) if profile.is_approved => {}
            Ok(_) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "Your artisan account is pending approval or setup is incomplete."
                    })),
                );
            }
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An internal server error occured"
                    })),
                );
            }
        }
    }

    match generate_token(model.id, model.role.to_string()).await {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({
                "token": token
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        ),
    }
}

//Structs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RegisterRole {
    Buyer,
    Artisan,
    Influencer,
}

impl From<RegisterRole> for Role {
    fn from(role: RegisterRole) -> Self {
        match role {
            RegisterRole::Buyer => Role::Buyer,
            RegisterRole::Artisan => Role::Artisan,
            RegisterRole::Influencer => Role::Influencer,
        }
    }
}

#[derive(Deserialize, Validate)]
struct RegisterUser {
    #[validate(length(min = 3, max = 50))]
    username: String,
    #[validate(length(min = 8, max = 128))]
    password: String,
    role: RegisterRole,
    #[validate(length(max = 100))]
    brand_name: Option<String>,
    #[validate(length(max = 1000))]
    bio: Option<String>,
}

#[derive(Deserialize)]
struct UserLogin {
    username: String,
    password: String,
}
