//! Ingestion service error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("OpenAlex API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<scholnet_common::AppError> for IngestError {
    fn from(e: scholnet_common::AppError) -> Self {
        IngestError::Database(e.to_string())
    }
}
