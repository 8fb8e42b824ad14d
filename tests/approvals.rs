use reqwest::StatusCode;
use sea_orm::EntityTrait;
use serde_json::json;

mod common;
use common::{bearer, spawn_app, TestApp, ADMIN_PASSWORD, ADMIN_USERNAME};

async fn register_pending_artisan(app: &TestApp, client: &reqwest::Client, username: &str) -> i64 {
    let response = client
        .post(format!("{}/api/register", app.address))
        .json(&json!({
            "username": username,
            "password": "Muzion15pass",
            "role": "artisan",
            "brand_name": format!("{} Studio", username)
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let admin_token = app.login(client, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let approvals = client
        .get(format!("{}/api/admin/approvals", app.address))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to fetch approvals")
        .json::<serde_json::Value>()
        .await
        .unwrap();

    approvals["pending_artisans"]
        .as_array()
        .unwrap()
        .iter()
        .find(|profile| profile["brand_name"] == format!("{} Studio", username))
        .expect("Registered artisan not in the pending list")["id"]
        .as_i64()
        .unwrap()
}

async fn register_influencer(app: &TestApp, client: &reqwest::Client, username: &str) -> String {
    let response = client
        .post(format!("{}/api/register", app.address))
        .json(&json!({
            "username": username,
            "password": "Muzion15pass",
            "role": "influencer"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    app.login(client, username, "Muzion15pass").await
}

async fn submit_post(app: &TestApp, client: &reqwest::Client, token: &str, caption: &str) -> i64 {
    let response = client
        .post(format!("{}/api/influencer/post", app.address))
        .headers(bearer(token))
        .json(&json!({
            "image_url": "https://img.example/shot.jpg",
            "caption": caption
        }))
        .send()
        .await
        .expect("Failed to send create post request");
    assert_eq!(response.status(), StatusCode::CREATED);

    response.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn approving_an_artisan_twice_keeps_the_original_date() {
    use artisans_market::entities::artisan_profile;

    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let profile_id = register_pending_artisan(&app, &client, "twice_approved").await;
    let admin_token = app.login(&client, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let first = client
        .patch(format!("{}/api/admin/artisan/{}", app.address, profile_id))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to approve artisan");
    assert_eq!(first.status(), StatusCode::OK);

    let after_first = artisan_profile::Entity::find_by_id(profile_id as i32)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert!(after_first.is_approved);
    let original_date = after_first.approved_date.expect("Approval date not set");

    let second = client
        .patch(format!("{}/api/admin/artisan/{}", app.address, profile_id))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to approve artisan");
    assert_eq!(second.status(), StatusCode::OK);

    let after_second = artisan_profile::Entity::find_by_id(profile_id as i32)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_second.approved_date, Some(original_date));
}

#[tokio::test]
async fn rejecting_an_artisan_removes_profile_and_account() {
    use artisans_market::entities::artisan_profile;

    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let profile_id = register_pending_artisan(&app, &client, "rejected_maker").await;
    let admin_token = app.login(&client, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = client
        .delete(format!("{}/api/admin/artisan/{}", app.address, profile_id))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to reject artisan");
    assert_eq!(response.status(), StatusCode::OK);

    let profile = artisan_profile::Entity::find_by_id(profile_id as i32)
        .one(&*app.db)
        .await
        .unwrap();
    assert!(profile.is_none());

    // The login credential died with the account.
    let login = client
        .post(format!("{}/api/login", app.address))
        .json(&json!({ "username": "rejected_maker", "password": "Muzion15pass" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn approved_post_records_timestamp_and_reviewing_admin() {
    use artisans_market::entities::influencer_post;

    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let influencer_token = register_influencer(&app, &client, "style_scout").await;
    let post_id = submit_post(&app, &client, &influencer_token, "Fresh from the kiln").await;
    let admin_token = app.login(&client, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = client
        .patch(format!("{}/api/admin/post/{}", app.address, post_id))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to approve post");
    assert_eq!(response.status(), StatusCode::OK);

    let post = influencer_post::Entity::find_by_id(post_id as i32)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert!(post.is_approved);
    assert!(post.approval_timestamp.is_some());
    assert!(post.approved_by_admin_user_id.is_some());
}

#[tokio::test]
async fn rejected_post_is_deleted() {
    use artisans_market::entities::influencer_post;

    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let influencer_token = register_influencer(&app, &client, "trend_hunter").await;
    let post_id = submit_post(&app, &client, &influencer_token, "Not quite right").await;
    let admin_token = app.login(&client, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = client
        .delete(format!("{}/api/admin/post/{}", app.address, post_id))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to reject post");
    assert_eq!(response.status(), StatusCode::OK);

    let post = influencer_post::Entity::find_by_id(post_id as i32)
        .one(&*app.db)
        .await
        .unwrap();
    assert!(post.is_none());
}

#[tokio::test]
async fn public_feed_shows_only_approved_posts() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let influencer_token = register_influencer(&app, &client, "craft_curator").await;

    let approved_id = submit_post(&app, &client, &influencer_token, "Showcase piece").await;
    submit_post(&app, &client, &influencer_token, "Still in review").await;

    let admin_token = app.login(&client, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    client
        .patch(format!("{}/api/admin/post/{}", app.address, approved_id))
        .headers(bearer(&admin_token))
        .send()
        .await
        .expect("Failed to approve post");

    let feed = client
        .get(format!("{}/api/feed", app.address))
        .send()
        .await
        .expect("Failed to fetch feed")
        .json::<serde_json::Value>()
        .await
        .unwrap();

    let posts = feed.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["caption"], "Showcase piece");
    assert_eq!(posts[0]["id"].as_i64().unwrap(), approved_id);
}
