//! Work entity
//!
//! One row per fetched publication. The comma-delimited list columns
//! (`author_ids`, `cited_ids`, `concepts`) mirror what the record source
//! hands the network pipeline; splitting and validation happen there.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "works")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// External identifier assigned by OpenAlex, unique per work
    #[sea_orm(column_type = "Text", unique)]
    pub openalex_id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub doi: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub publication_type: Option<String>,

    pub cited_by_count: i64,

    pub host_venue_id: Option<i64>,

    /// Comma-delimited `authors.author_id` values. NULL here means the
    /// upstream record was corrupted; the pipeline aborts on it.
    #[sea_orm(column_type = "Text", nullable)]
    pub author_ids: Option<String>,

    /// ISO-8601 timestamp string as delivered by the API
    #[sea_orm(column_type = "Text", nullable)]
    pub updated_date: Option<String>,

    /// ISO-8601 date string as delivered by the API; parsed (and
    /// validated) when records are loaded for analysis
    #[sea_orm(column_type = "Text", nullable)]
    pub publication_date: Option<String>,

    /// Comma-delimited external ids of cited works, possibly referencing
    /// works outside the corpus
    #[sea_orm(column_type = "Text")]
    pub cited_ids: String,

    /// Comma-delimited concept display names
    #[sea_orm(column_type = "Text")]
    pub concepts: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venue::Entity",
        from = "Column::HostVenueId",
        to = "super::venue::Column::VenueId"
    )]
    Venue,
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
