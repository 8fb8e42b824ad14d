use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::entities::artisan_profile::Entity as ArtisanProfile;
use crate::entities::category::Entity as Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub supplier_artisan_profile_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price_per_unit: Decimal,
    // "meter", "yard", "piece" and the like
    pub unit_of_measure: String,
    #[sea_orm(default = 0)]
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub date_added: DateTimeUtc,
    #[sea_orm(default = true)]
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "ArtisanProfile",
        from = "Column::SupplierArtisanProfileId",
        to = "crate::entities::artisan_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SupplierArtisanProfile,
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
        Relation::SupplierArtisanProfile.def()
    }
}

impl Related<crate::entities::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}
