use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::entities::{
    artisan_profile,
    material::{self, Entity as MaterialEntity},
};

pub fn material_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/material", get(get_materials))
        .route("/material/:id", get(get_material))
        .layer(Extension(db))
}

async fn get_materials(
    Query(params): Query<GetMaterialsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let mut half_result = MaterialEntity::find()
        .join(
            JoinType::InnerJoin,
            material::Relation::SupplierArtisanProfile.def(),
        )
        .filter(material::Column::IsActive.eq(true))
        .filter(artisan_profile::Column::IsApproved.eq(true));

    if let Some(category_id) = params.category_id {
        half_result = half_result.filter(material::Column::CategoryId.eq(category_id));
    }

    if let Some(q) = params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        half_result = half_result.filter(
            Condition::any()
                .add(material::Column::Name.contains(q))
                .add(material::Column::Description.contains(q)),
        );
    }

    let result = half_result
        .order_by_desc(material::Column::DateAdded)
        .all(&*db)
        .await;
    match result {
        Ok(materials) => {
            let response: Vec<PublicMaterialResponse> = materials
                .into_iter()
                .map(PublicMaterialResponse::new)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        )
            .into_response(),
    }
}

async fn get_material(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let result = MaterialEntity::find_by_id(id)
        .join(
            JoinType::InnerJoin,
            material::Relation::SupplierArtisanProfile.def(),
        )
        .filter(material::Column::IsActive.eq(true))
        .filter(artisan_profile::Column::IsApproved.eq(true))
        .one(&*db)
        .await;
    match result {
        Ok(Some(mat)) => (StatusCode::OK, Json(PublicMaterialResponse::new(mat))).into_response(),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No material with {} id was found.", id)
            })),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        )
            .into_response(),
    }
}

//Structs
#[derive(Deserialize)]
struct GetMaterialsQuery {
    category_id: Option<i32>,
    q: Option<String>,
}

#[derive(Serialize)]
struct PublicMaterialResponse {
    id: i32,
    name: String,
    description: Option<String>,
    price_per_unit: Decimal,
    unit_of_measure: String,
    stock_quantity: i32,
    category_id: Option<i32>,
    image_url: Option<String>,
}

impl PublicMaterialResponse {
    fn new(model: material::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price_per_unit: model.price_per_unit,
            unit_of_measure: model.unit_of_measure,
            stock_quantity: model.stock_quantity,
            category_id: model.category_id,
            image_url: model.image_url,
        }
    }
}
