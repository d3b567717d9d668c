//! OpenAlex works client
//!
//! Thin client over the works endpoint: per-concept filtering, cursor
//! pagination, and the polite-pool `mailto` User-Agent. Transient
//! failures are retried with exponential backoff; client errors are not.

use crate::errors::IngestError;
use backoff::ExponentialBackoffBuilder;
use scholnet_common::config::OpenAlexConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// One work as returned by the API, trimmed to the fields we store
#[derive(Debug, Clone, Deserialize)]
pub struct ApiWork {
    pub id: String,
    pub doi: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub publication_type: Option<String>,
    #[serde(default)]
    pub cited_by_count: i64,
    #[serde(default)]
    pub is_retracted: bool,
    #[serde(default)]
    pub is_paratext: bool,
    pub publication_date: Option<String>,
    pub updated_date: Option<String>,
    pub host_venue: Option<ApiVenue>,
    #[serde(default)]
    pub authorships: Vec<ApiAuthorship>,
    #[serde(default)]
    pub referenced_works: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<ApiConcept>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVenue {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub issn_l: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAuthorship {
    pub author: ApiAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAuthor {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConcept {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct WorksPage {
    results: Vec<ApiWork>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    next_cursor: Option<String>,
}

pub struct OpenAlexClient {
    http: reqwest::Client,
    base_url: String,
    per_page: u32,
    retry_window: Duration,
}

impl OpenAlexClient {
    pub fn new(config: &OpenAlexConfig) -> Result<Self, IngestError> {
        // A contact address in the User-Agent gets us into the polite pool
        let mut user_agent = format!("scholnet/{}", scholnet_common::VERSION);
        if let Some(mailto) = &config.mailto {
            user_agent.push_str(&format!(" mailto:{mailto}"));
        }

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
            retry_window: Duration::from_secs(config.retry_window_secs),
        })
    }

    /// Fetch every work tagged with the given concept id, following the
    /// cursor until the API returns an empty page.
    pub async fn works_by_concept(&self, concept_id: &str) -> Result<Vec<ApiWork>, IngestError> {
        let mut works = Vec::new();
        let mut cursor = "*".to_string();

        loop {
            let page = self.fetch_page(concept_id, &cursor).await?;
            if page.results.is_empty() {
                break;
            }
            debug!(
                fetched = page.results.len(),
                total = works.len(),
                "page received"
            );
            works.extend(page.results);

            match page.meta.next_cursor {
                Some(next) => cursor = next,
                None => break,
            }
        }

        info!(concept = concept_id, works = works.len(), "concept fetched");
        Ok(works)
    }

    async fn fetch_page(&self, concept_id: &str, cursor: &str) -> Result<WorksPage, IngestError> {
        let url = format!("{}/works", self.base_url);
        let backoff = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(self.retry_window))
            .build();

        let page = backoff::future::retry(backoff, || async {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("filter", format!("concepts.id:{concept_id}")),
                    ("per-page", self.per_page.to_string()),
                    ("cursor", cursor.to_string()),
                ])
                .send()
                .await
                .map_err(classify)?;

            response
                .error_for_status()
                .map_err(classify)?
                .json::<WorksPage>()
                .await
                .map_err(classify)
        })
        .await?;

        Ok(page)
    }
}

/// Retry server-side and transport failures; give up on client errors
fn classify(err: reqwest::Error) -> backoff::Error<reqwest::Error> {
    match err.status() {
        Some(status) if status.is_client_error() => backoff::Error::permanent(err),
        _ => backoff::Error::transient(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "results": [{
            "id": "https://openalex.org/W2045435533",
            "doi": "https://doi.org/10.1007/s10898-007-9149-x",
            "title": "Firefly algorithms for multimodal optimization",
            "type": "journal-article",
            "cited_by_count": 412,
            "is_retracted": false,
            "is_paratext": false,
            "publication_date": "2008-10-01",
            "updated_date": "2022-06-19T20:23:24.923467",
            "host_venue": {
                "id": "https://openalex.org/V123",
                "display_name": "Journal of Global Optimization",
                "issn_l": "0925-5001",
                "publisher": "Springer"
            },
            "authorships": [
                {"author": {"id": "https://openalex.org/A1", "display_name": "Xin-She Yang"}}
            ],
            "referenced_works": ["https://openalex.org/W1", "https://openalex.org/W2"],
            "concepts": [
                {"display_name": "Firefly algorithm"},
                {"display_name": "Metaheuristic"}
            ]
        }],
        "meta": {"next_cursor": "IlsxNj=="}
    }"#;

    #[test]
    fn test_page_deserialization() {
        let page: WorksPage = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.meta.next_cursor.as_deref(), Some("IlsxNj=="));

        let work = &page.results[0];
        assert_eq!(work.publication_type.as_deref(), Some("journal-article"));
        assert_eq!(work.referenced_works.len(), 2);
        assert_eq!(work.authorships[0].author.display_name, "Xin-She Yang");
        assert_eq!(
            work.host_venue.as_ref().unwrap().publisher.as_deref(),
            Some("Springer")
        );
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let page: WorksPage = serde_json::from_str(
            r#"{"results": [{"id": "https://openalex.org/W1"}], "meta": {"next_cursor": null}}"#,
        )
        .unwrap();

        let work = &page.results[0];
        assert!(work.doi.is_none());
        assert!(!work.is_retracted);
        assert!(work.authorships.is_empty());
        assert!(work.referenced_works.is_empty());
        assert!(page.meta.next_cursor.is_none());
    }
}
