//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations used by the
//! ingestion and network binaries. All SQL lives behind these methods.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// Insertable work row, assembled by the ingestion loader
#[derive(Debug, Clone)]
pub struct NewWork {
    pub openalex_id: String,
    pub doi: Option<String>,
    pub title: String,
    pub publication_type: Option<String>,
    pub cited_by_count: i64,
    pub host_venue_id: Option<i64>,
    pub author_ids: String,
    pub updated_date: Option<String>,
    pub publication_date: Option<String>,
    pub cited_ids: String,
    pub concepts: String,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Venue Operations
    // ========================================================================

    /// Find venue by display name
    pub async fn find_venue_by_name(&self, name: &str) -> Result<Option<Venue>> {
        VenueEntity::find()
            .filter(VenueColumn::Venue.eq(name))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Insert a new venue
    pub async fn insert_venue(
        &self,
        openalex_id: String,
        name: String,
        issn_l: Option<String>,
        publisher: Option<String>,
    ) -> Result<Venue> {
        let venue = VenueActiveModel {
            openalex_id: Set(openalex_id),
            venue: Set(name),
            issn_l: Set(issn_l),
            publisher: Set(publisher),
            ..Default::default()
        };

        venue.insert(self.conn()).await.map_err(Into::into)
    }

    // ========================================================================
    // Author Operations
    // ========================================================================

    /// Find author by OpenAlex id
    pub async fn find_author_by_openalex_id(&self, id: &str) -> Result<Option<Author>> {
        AuthorEntity::find()
            .filter(AuthorColumn::OpenalexId.eq(id))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Insert a new author with alt_id unassigned
    pub async fn insert_author(&self, openalex_id: String, name: String) -> Result<Author> {
        let author = AuthorActiveModel {
            openalex_id: Set(openalex_id),
            name: Set(name),
            alt_id: Set(0),
            ..Default::default()
        };

        author.insert(self.conn()).await.map_err(Into::into)
    }

    /// All (author_id, alt_id) pairs
    pub async fn author_alt_ids(&self) -> Result<Vec<(i64, i64)>> {
        AuthorEntity::find()
            .select_only()
            .column(AuthorColumn::AuthorId)
            .column(AuthorColumn::AltId)
            .into_tuple()
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Distinct names of authors whose alt_id is still unassigned
    pub async fn unnormalized_author_names(&self) -> Result<Vec<String>> {
        AuthorEntity::find()
            .select_only()
            .column(AuthorColumn::Name)
            .filter(AuthorColumn::AltId.eq(0))
            .distinct()
            .into_tuple()
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Rename every author row carrying `old` to `new`
    pub async fn rename_authors(&self, old: &str, new: &str) -> Result<u64> {
        let res = AuthorEntity::update_many()
            .col_expr(AuthorColumn::Name, Expr::value(new))
            .filter(AuthorColumn::Name.eq(old))
            .exec(self.conn())
            .await?;

        Ok(res.rows_affected)
    }

    /// Smallest author_id among rows with this name
    pub async fn min_author_id_for_name(&self, name: &str) -> Result<Option<i64>> {
        let author = AuthorEntity::find()
            .filter(AuthorColumn::Name.eq(name))
            .order_by_asc(AuthorColumn::AuthorId)
            .one(self.conn())
            .await?;

        Ok(author.map(|a| a.author_id))
    }

    /// Set the alt_id for every author row with this name
    pub async fn set_alt_id_for_name(&self, name: &str, alt_id: i64) -> Result<u64> {
        let res = AuthorEntity::update_many()
            .col_expr(AuthorColumn::AltId, Expr::value(alt_id))
            .filter(AuthorColumn::Name.eq(name))
            .exec(self.conn())
            .await?;

        Ok(res.rows_affected)
    }

    // ========================================================================
    // Work Operations
    // ========================================================================

    /// External ids of all stored works (seed for the fetch seen-set)
    pub async fn work_external_ids(&self) -> Result<Vec<String>> {
        WorkEntity::find()
            .select_only()
            .column(WorkColumn::OpenalexId)
            .into_tuple()
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Insert a new work
    pub async fn insert_work(&self, work: NewWork) -> Result<Work> {
        let row = WorkActiveModel {
            openalex_id: Set(work.openalex_id),
            doi: Set(work.doi),
            title: Set(work.title),
            publication_type: Set(work.publication_type),
            cited_by_count: Set(work.cited_by_count),
            host_venue_id: Set(work.host_venue_id),
            author_ids: Set(Some(work.author_ids)),
            updated_date: Set(work.updated_date),
            publication_date: Set(work.publication_date),
            cited_ids: Set(work.cited_ids),
            concepts: Set(work.concepts),
            ..Default::default()
        };

        row.insert(self.conn()).await.map_err(Into::into)
    }

    /// Load every work row for network analysis
    pub async fn load_works(&self) -> Result<Vec<Work>> {
        WorkEntity::find()
            .order_by_asc(WorkColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Delete works whose publication type is set but not in the allowed list.
    /// Rows with no type recorded are kept, matching the NULL semantics of
    /// the `NOT IN` predicate.
    pub async fn delete_works_not_in_types(&self, allowed: &[String]) -> Result<u64> {
        let res = WorkEntity::delete_many()
            .filter(WorkColumn::PublicationType.is_not_in(allowed.iter().map(String::as_str)))
            .exec(self.conn())
            .await?;

        Ok(res.rows_affected)
    }

    /// Delete works published on or after the cutoff date.
    /// publication_date is stored as an ISO-8601 string, which orders
    /// lexicographically the same as chronologically.
    pub async fn delete_works_on_or_after(&self, cutoff: NaiveDate) -> Result<u64> {
        let res = WorkEntity::delete_many()
            .filter(WorkColumn::PublicationDate.gte(cutoff.format("%Y-%m-%d").to_string()))
            .exec(self.conn())
            .await?;

        Ok(res.rows_affected)
    }
}
