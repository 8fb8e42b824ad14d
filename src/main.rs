use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use artisans_market::api::create_api_router;
use artisans_market::entities::{primary_setup, setup_schema};
use artisans_market::payment::{PaymentAuthorizer, SimulatedGateway};
use artisans_market::session::{CartStore, CART_IDLE_EXPIRY};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("Database url must be set");
    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to the database");
    setup_schema(&db).await;

    let shared_db = Arc::new(db);

    primary_setup(shared_db.clone()).await;

    let cart_store = Arc::new(CartStore::new(CART_IDLE_EXPIRY));
    let authorizer: Arc<dyn PaymentAuthorizer> = Arc::new(SimulatedGateway);

    let app = create_api_router(shared_db, cart_store, authorizer);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind 0.0.0.0:3000");
    println!("Running at {:?}", listener);
    axum::serve(listener, app).await.expect("Server error");
}
