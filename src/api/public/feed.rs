use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::{
    influencer_post::{self, Entity as PostEntity},
    post_tag::{self, Entity as PostTagEntity},
};

const FEED_PAGE_SIZE: u64 = 20;

pub fn feed_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/feed", get(get_feed))
        .layer(Extension(db))
}

async fn get_feed(Extension(db): Extension<Arc<DatabaseConnection>>) -> impl IntoResponse {
    let posts = match PostEntity::find()
        .filter(influencer_post::Column::IsApproved.eq(true))
        .order_by_desc(influencer_post::Column::UploadTimestamp)
        .limit(FEED_PAGE_SIZE)
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

    let response: Vec<FeedPostResponse> = posts
        .into_iter()
        .map(|post| {
            let tagged: Vec<i32> = tags
                .iter()
                .filter(|tag| tag.influencer_post_id == post.id)
                .map(|tag| tag.tagged_artisan_profile_id)
                .collect();
            FeedPostResponse {
                post,
                tagged_artisan_profile_ids: tagged,
            }
        })
        .collect();

    (StatusCode::OK, Json(response)).into_response()
}

//Structs
#[derive(Serialize)]
struct FeedPostResponse {
    #[serde(flatten)]
    post: influencer_post::Model,
    tagged_artisan_profile_ids: Vec<i32>,
}
