use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::entities::{
    influencer_post::{self, Entity as PostEntity},
    post_tag::{self, Entity as PostTagEntity},
};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn influencer_post_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/posts", get(my_posts))
        .route("/post", post(create_post))
        .layer(Extension(db))
}

//ROUTES
async fn my_posts(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let posts = match PostEntity::find()
        .filter(influencer_post::Column::InfluencerUserId.eq(claims.user_id))
        .order_by_desc(influencer_post::Column::UploadTimestamp)
        .all(&*db)
        .await
    {
        Ok(posts) => posts,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error."
                })),
            )
                .into_response();
        }
    };

    let post_ids: Vec<i32> = posts.iter().map(|post| post.id).collect();
    let tags = match PostTagEntity::find()
        .filter(post_tag::Column::InfluencerPostId.is_in(post_ids))
        .all(&*db)
        .await
    {
        Ok(tags) => tags,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error."
                })),
            )
                .into_response();
        }
    };

    let response: Vec<MyPostResponse> = posts
        .into_iter()
        .map(|post| {
            let tagged: Vec<i32> = tags
                .iter()
                .filter(|tag| tag.influencer_post_id == post.id)
                .map(|tag| tag.tagged_artisan_profile_id)
                .collect();
            MyPostResponse {
                post,
                tagged_artisan_profile_ids: tagged,
            }
        })
        .collect();

    (StatusCode::OK, Json(response)).into_response()
}

async fn create_post(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePost>,
) -> impl IntoResponse {
    println!("->> Called `create_post()` for user {}", claims.user_id);

    if payload.image_url.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Image URL is required."
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

    let new_post = influencer_post::ActiveModel {
        influencer_user_id: Set(claims.user_id),
        image_url: Set(payload.image_url),
        caption: Set(payload.caption),
        upload_timestamp: Set(Utc::now()),
        is_approved: Set(false),
        ..Default::default()
    };

    let post_id = match influencer_post::Entity::insert(new_post).exec(&txn).await {
        Ok(result) => result.last_insert_id,
        Err(_) => {
            let _ = txn.rollback().await;
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    // Duplicate tag ids collapse to one tag per artisan.
    let mut tagged = payload.tagged_artisan_profile_ids.unwrap_or_default();
    tagged.sort_unstable();
    tagged.dedup();

    if !tagged.is_empty() {
        let tags: Vec<post_tag::ActiveModel> = tagged
            .into_iter()
            .map(|profile_id| post_tag::ActiveModel {
                influencer_post_id: Set(post_id),
                tagged_artisan_profile_id: Set(profile_id),
                ..Default::default()
            })
            .collect();

        if post_tag::Entity::insert_many(tags).exec(&txn).await.is_err() {
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
                "message": "Post submitted for approval!",
                "id": post_id
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
#[derive(Deserialize)]
struct CreatePost {
    image_url: String,
    caption: Option<String>,
    tagged_artisan_profile_ids: Option<Vec<i32>>,
}

#[derive(Serialize)]
struct MyPostResponse {
    #[serde(flatten)]
    post: influencer_post::Model,
    tagged_artisan_profile_ids: Vec<i32>,
}
