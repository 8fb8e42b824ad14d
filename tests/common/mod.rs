use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use serde_json::json;
use std::sync::Arc;

use artisans_market::api::create_api_router;
use artisans_market::entities::{
    artisan_profile, material, primary_setup, product, setup_schema,
};
use artisans_market::payment::{PaymentAuthorizer, SimulatedGateway};
use artisans_market::session::{CartStore, CART_IDLE_EXPIRY};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Secret15";

pub struct TestApp {
    pub address: String,
    pub db: Arc<DatabaseConnection>,
}

/// Boots the full router against a fresh in-memory database on an ephemeral
/// port, so each test talks to its own isolated instance over real HTTP.
pub async fn spawn_app() -> TestApp {
    std::env::set_var("SECRET", "integration-test-secret");

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory sqlite");
    setup_schema(&db).await;

    let db = Arc::new(db);
    primary_setup(db.clone()).await;

    let cart_store = Arc::new(CartStore::new(CART_IDLE_EXPIRY));
    let authorizer: Arc<dyn PaymentAuthorizer> = Arc::new(SimulatedGateway);
    let app = create_api_router(db.clone(), cart_store, authorizer);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind an ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    TestApp { address, db }
}

impl TestApp {
    pub async fn login(&self, client: &reqwest::Client, username: &str, password: &str) -> String {
        let response = client
            .post(format!("{}/api/login", self.address))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to send login request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body = response
            .json::<serde_json::Value>()
            .await
            .expect("Failed to parse login response JSON");
        body["token"]
            .as_str()
            .expect("Token not found in login response")
            .to_string()
    }

    pub async fn register_buyer(&self, client: &reqwest::Client, username: &str) -> String {
        let response = client
            .post(format!("{}/api/register", self.address))
            .json(&json!({
                "username": username,
                "password": "Muzion15pass",
                "role": "buyer"
            }))
            .send()
            .await
            .expect("Failed to send register request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        self.login(client, username, "Muzion15pass").await
    }

    /// Creates an approved artisan with one active product, bypassing HTTP.
    /// Returns the product id.
    pub async fn seed_product(&self, name: &str, price: Decimal, stock_quantity: i32) -> i32 {
        let profile_id = self.seed_approved_profile(&format!("{}-maker", name)).await;
        self.seed_product_for(profile_id, name, price, stock_quantity, true)
            .await
    }

    pub async fn seed_product_for(
        &self,
        artisan_profile_id: i32,
        name: &str,
        price: Decimal,
        stock_quantity: i32,
        is_active: bool,
    ) -> i32 {
        let now = Utc::now();
        product::Entity::insert(product::ActiveModel {
            artisan_profile_id: Set(artisan_profile_id),
            name: Set(name.to_string()),
            description: Set(format!("{} description", name)),
            price: Set(price),
            stock_quantity: Set(stock_quantity),
            date_added: Set(now),
            last_updated: Set(now),
            is_active: Set(is_active),
            ..Default::default()
        })
        .exec(&*self.db)
        .await
        .expect("Failed to seed product")
        .last_insert_id
    }

    pub async fn seed_material(
        &self,
        name: &str,
        price_per_unit: Decimal,
        stock_quantity: i32,
    ) -> i32 {
        let profile_id = self
            .seed_approved_profile(&format!("{}-supplier", name))
            .await;
        material::Entity::insert(material::ActiveModel {
            supplier_artisan_profile_id: Set(profile_id),
            name: Set(name.to_string()),
            price_per_unit: Set(price_per_unit),
            unit_of_measure: Set("piece".to_string()),
            stock_quantity: Set(stock_quantity),
            date_added: Set(Utc::now()),
            is_active: Set(true),
            ..Default::default()
        })
        .exec(&*self.db)
        .await
        .expect("Failed to seed material")
        .last_insert_id
    }

    pub async fn seed_approved_profile(&self, brand: &str) -> i32 {
        use artisans_market::entities::user::{self, Role};

        let user_id = user::Entity::insert(user::ActiveModel {
            username: Set(format!("{}-user", brand)),
            password: Set(artisans_market::entities::hash_password("Muzion15pass").unwrap()),
            role: Set(Role::Artisan),
            registration_date: Set(Utc::now()),
            is_active: Set(true),
            ..Default::default()
        })
        .exec(&*self.db)
        .await
        .expect("Failed to seed artisan user")
        .last_insert_id;

        artisan_profile::Entity::insert(artisan_profile::ActiveModel {
            user_id: Set(user_id),
            brand_name: Set(brand.to_string()),
            is_approved: Set(true),
            approved_date: Set(Some(Utc::now())),
            ..Default::default()
        })
        .exec(&*self.db)
        .await
        .expect("Failed to seed artisan profile")
        .last_insert_id
    }
}

pub fn bearer(token: &str) -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::AUTHORIZATION,
        reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .expect("Failed to create Authorization header"),
    );
    headers
}

pub fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("Expected a decimal string")
        .parse::<Decimal>()
        .expect("Failed to parse decimal")
}
