//! Network analysis error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// A secondary label referenced a slot outside the label id space.
    /// This is a taxonomy/data inconsistency, never a recoverable miss.
    #[error("No label slot registered for `{label}`")]
    SlotMissing { label: String },

    #[error("Work {work_id} has no author list")]
    MissingAuthors { work_id: i64 },

    #[error("Work {work_id} has a malformed author id `{value}`")]
    InvalidAuthorId { work_id: i64, value: String },

    #[error("Work {work_id} has a malformed publication date `{value}`")]
    InvalidDate { work_id: i64, value: String },

    #[error("Author {author_id} has no alternate id assigned")]
    AltIdMissing { author_id: i64 },

    #[error("Report error: {0}")]
    Report(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    App(#[from] scholnet_common::AppError),
}
