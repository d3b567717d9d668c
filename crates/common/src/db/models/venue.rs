//! Venue entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub venue_id: i64,

    #[sea_orm(column_type = "Text")]
    pub openalex_id: String,

    /// Venue display name, cropped to 255 characters at insert
    pub venue: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub issn_l: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub publisher: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work::Entity")]
    Works,
}

impl Related<super::work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
