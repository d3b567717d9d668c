//! Pipeline input records
//!
//! `WorkRecord` is the in-memory form of one `works` row: list columns
//! split, ids parsed, dates validated. Conversion is where upstream data
//! corruption surfaces; a missing author list or a malformed date aborts
//! the run instead of being silently defaulted.

use crate::errors::{NetworkError, Result};
use chrono::NaiveDate;
use scholnet_common::db::models::Work;

/// Graph node key: the relational id of a work
pub type WorkId = i64;

#[derive(Debug, Clone)]
pub struct WorkRecord {
    pub id: WorkId,
    /// Externally assigned identifier; citation targets reference these
    pub external_id: String,
    pub title: String,
    pub concepts: Vec<String>,
    /// External ids of cited works, possibly outside the corpus
    pub cited_ids: Vec<String>,
    pub author_ids: Vec<i64>,
    pub publication_date: Option<NaiveDate>,
}

impl WorkRecord {
    pub fn from_model(model: Work) -> Result<Self> {
        let raw_authors = model
            .author_ids
            .ok_or(NetworkError::MissingAuthors { work_id: model.id })?;

        let author_ids = split_list(&raw_authors)
            .into_iter()
            .map(|s| {
                s.parse::<i64>().map_err(|_| NetworkError::InvalidAuthorId {
                    work_id: model.id,
                    value: s,
                })
            })
            .collect::<Result<Vec<i64>>>()?;

        let publication_date = model
            .publication_date
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    NetworkError::InvalidDate {
                        work_id: model.id,
                        value: s.to_string(),
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            id: model.id,
            external_id: model.openalex_id,
            title: model.title,
            concepts: split_list(&model.concepts),
            cited_ids: split_list(&model.cited_ids),
            author_ids,
            publication_date,
        })
    }
}

/// Split a comma-delimited column. The empty string is an empty list,
/// and stray empty segments are dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
