use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::{
    artisan_profile::{self, Entity as ArtisanProfileEntity},
    influencer_post::{self, Entity as PostEntity},
    user::Entity as UserEntity,
};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn approvals_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/approvals", get(pending_approvals))
        .route(
            "/artisan/:id",
            patch(approve_artisan).delete(reject_artisan),
        )
        .route("/post/:id", patch(approve_post).delete(reject_post))
        .layer(Extension(db))
}

//ROUTES
async fn pending_approvals(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let profiles = ArtisanProfileEntity::find()
        .filter(artisan_profile::Column::IsApproved.eq(false))
        .all(&*db)
        .await;

    let posts = PostEntity::find()
        .filter(influencer_post::Column::IsApproved.eq(false))
        .order_by_desc(influencer_post::Column::UploadTimestamp)
        .all(&*db)
        .await;

    match (profiles, posts) {
        (Ok(pending_artisans), Ok(pending_posts)) => (
            StatusCode::OK,
            Json(PendingApprovals {
                pending_artisans,
                pending_posts,
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

async fn approve_artisan(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let result = ArtisanProfileEntity::find_by_id(id).one(&*db).await;

    match result {
        Ok(Some(profile)) => {
            // Second approval is a state no-op: the original approval date
            // must not move.
            if profile.is_approved {
                return (
                    StatusCode::OK,
                    Json(json!({
                        "message": format!("Artisan {} approved.", profile.brand_name)
                    })),
                );
            }
            let brand_name = profile.brand_name.clone();
            let mut profile: artisan_profile::ActiveModel = profile.into();
            profile.is_approved = Set(true);
            profile.approved_date = Set(Some(Utc::now()));

            match profile.update(&*db).await {
                Ok(_) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": format!("Artisan {} approved.", brand_name)
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
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No artisan profile with {} id was found.", id)
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

// Rejection is destructive: the profile and its user account go together,
// there is no persisted "rejected" state to resurrect.
async fn reject_artisan(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
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

    let profile = match ArtisanProfileEntity::find_by_id(id).one(&txn).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("No artisan profile with {} id was found.", id)
                })),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error."
                })),
            );
        }
    };

    let user_id = profile.user_id;
    let deleted = ArtisanProfileEntity::delete_by_id(profile.id)
        .exec(&txn)
        .await
        .is_ok()
        && UserEntity::delete_by_id(user_id).exec(&txn).await.is_ok();

    if !deleted {
        let _ = txn.rollback().await;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        );
    }

    match txn.commit().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "message": "Artisan rejected and account removed."
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

async fn approve_post(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let result = PostEntity::find_by_id(id).one(&*db).await;

    match result {
        Ok(Some(post)) => {
            if post.is_approved {
                return (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Influencer post approved."
                    })),
                );
            }
            let mut post: influencer_post::ActiveModel = post.into();
            post.is_approved = Set(true);
            post.approval_timestamp = Set(Some(Utc::now()));
            post.approved_by_admin_user_id = Set(Some(claims.user_id));

            match post.update(&*db).await {
                Ok(_) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Influencer post approved."
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
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No influencer post with {} id was found.", id)
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

async fn reject_post(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match PostEntity::find_by_id(id).one(&*db).await {
        Ok(Some(post)) => {
            let post: influencer_post::ActiveModel = post.into();
            match post.delete(&*db).await {
                Ok(_) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Influencer post rejected and removed."
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
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No influencer post with {} id was found.", id)
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
#[derive(Serialize)]
struct PendingApprovals {
    pending_artisans: Vec<artisan_profile::Model>,
    pending_posts: Vec<influencer_post::Model>,
}
