use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::entities::artisan_profile::Entity as ArtisanProfile;
use crate::entities::category::Entity as Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub artisan_profile_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,
    #[sea_orm(default = 0)]
    pub stock_quantity: i32,
    pub main_image_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub story_details_text: Option<String>,
    pub date_added: DateTimeUtc,
    pub last_updated: DateTimeUtc,
    #[sea_orm(default = true)]
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "ArtisanProfile",
        from = "Column::ArtisanProfileId",
        to = "crate::entities::artisan_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ArtisanProfile,
    #[sea_orm(
        belongs_to = "Category",
        from = "Column::CategoryId",
        to = "crate::entities::category::Column::Id",
        on_update = "Cascade"
    )]
    Category,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<crate::entities::artisan_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtisanProfile.def()
    }
}

impl Related<crate::entities::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}
