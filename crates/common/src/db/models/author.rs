//! Author entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub author_id: i64,

    #[sea_orm(column_type = "Text")]
    pub openalex_id: String,

    /// Display name, normalized by the filtering pass
    #[sea_orm(column_type = "Text")]
    pub name: String,

    /// Canonical id shared by all authors with the same normalized name.
    /// 0 until the filtering pass assigns it.
    pub alt_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
