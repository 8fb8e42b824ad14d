pub mod artisan_profile;
pub mod category;
pub mod influencer_post;
pub mod material;
pub mod order;
pub mod order_item;
pub mod post_tag;
pub mod product;
pub mod user;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema, Set, TransactionTrait};
use std::sync::Arc;

use crate::entities::{
    artisan_profile::Entity as ArtisanProfile, category::Entity as Category,
    influencer_post::Entity as InfluencerPost, material::Entity as Material,
    order::Entity as Order, order_item::Entity as OrderItem, post_tag::Entity as PostTag,
    product::Entity as Product, user::Entity as User,
};

pub async fn setup_schema(db: &DatabaseConnection) {
    let schema = Schema::new(db.get_database_backend());
    let create_user_table = schema.create_table_from_entity(User);
    let create_artisan_profile_table = schema.create_table_from_entity(ArtisanProfile);
    let create_category_table = schema.create_table_from_entity(Category);
    let create_product_table = schema.create_table_from_entity(Product);
    let create_material_table = schema.create_table_from_entity(Material);
    let create_influencer_post_table = schema.create_table_from_entity(InfluencerPost);
    let create_post_tag_table = schema.create_table_from_entity(PostTag);
    let create_order_table = schema.create_table_from_entity(Order);
    let create_order_item_table = schema.create_table_from_entity(OrderItem);

    db.execute(db.get_database_backend().build(&create_user_table))
        .await
        .expect("Failed to create users schema");
    db.execute(db.get_database_backend().build(&create_artisan_profile_table))
        .await
        .expect("Failed to create artisan_profiles schema");
    db.execute(db.get_database_backend().build(&create_category_table))
        .await
        .expect("Failed to create categories schema");
    db.execute(db.get_database_backend().build(&create_product_table))
        .await
        .expect("Failed to create products schema");
    db.execute(db.get_database_backend().build(&create_material_table))
        .await
        .expect("Failed to create materials schema");
    db.execute(db.get_database_backend().build(&create_influencer_post_table))
        .await
        .expect("Failed to create influencer_posts schema");
    db.execute(db.get_database_backend().build(&create_post_tag_table))
        .await
        .expect("Failed to create post_tags schema");
    db.execute(db.get_database_backend().build(&create_order_table))
        .await
        .expect("Failed to create orders schema");
    db.execute(db.get_database_backend().build(&create_order_item_table))
        .await
        .expect("Failed to create order_items schema");
}

pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| err.to_string())?;
    Ok(hash.to_string())
}

pub async fn primary_setup(db: Arc<DatabaseConnection>) {
    let password_hash = hash_password("Secret15").expect("Failed to hash seed password");

    let new_admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password: Set(password_hash),
        role: Set(user::Role::Admin),
        registration_date: Set(Utc::now()),
        is_active: Set(true),
        ..Default::default()
    };

    let base_categories = ["Ceramics", "Textiles", "Woodwork", "Jewelry"].map(|name| {
        category::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
    });

    match db.begin().await {
        Ok(txn) => {
            let inserted = user::Entity::insert(new_admin).exec(&txn).await.is_ok()
                && category::Entity::insert_many(base_categories)
                    .exec(&txn)
                    .await
                    .is_ok();
            if !inserted {
                let _ = txn.rollback().await;
                panic!("Failed to run primary setup of the db, but it was requested.");
            }
            if txn.commit().await.is_err() {
                panic!("Failed to run primary setup of the db, but it was requested.");
            }
        }
        Err(_) => {
            panic!("Failed to run primary setup of the db, but it was requested.");
        }
    }
}
