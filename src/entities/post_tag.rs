use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "post_tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub influencer_post_id: i32,
    pub tagged_artisan_profile_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::entities::influencer_post::Entity",
        from = "Column::InfluencerPostId",
        to = "crate::entities::influencer_post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    InfluencerPost,
    #[sea_orm(
        belongs_to = "crate::entities::artisan_profile::Entity",
        from = "Column::TaggedArtisanProfileId",
        to = "crate::entities::artisan_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TaggedArtisanProfile,
}

impl Related<crate::entities::influencer_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InfluencerPost.def()
    }
}

impl Related<crate::entities::artisan_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaggedArtisanProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
