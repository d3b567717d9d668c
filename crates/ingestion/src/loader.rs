//! Snapshot loader
//!
//! Writes admitted works into the relational store: venues deduplicated
//! by display name, authors deduplicated by OpenAlex id, and one works
//! row per publication with its list columns joined by commas.

use crate::errors::IngestError;
use crate::filtering::normalize_name;
use crate::openalex::{ApiVenue, ApiWork};
use scholnet_common::db::{NewWork, Repository};
use tracing::{info, instrument};

/// Venue names longer than this are cropped before insert
const MAX_VENUE_NAME: usize = 255;

#[derive(Debug, Default)]
pub struct LoadSummary {
    pub works: u64,
    pub authors: u64,
    pub venues: u64,
}

pub struct Loader<'a> {
    repo: &'a Repository,
}

impl<'a> Loader<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, fields(batch = works.len()))]
    pub async fn load(&self, works: Vec<ApiWork>) -> Result<LoadSummary, IngestError> {
        let mut summary = LoadSummary::default();

        for work in works {
            self.load_one(work, &mut summary).await?;
        }

        info!(
            works = summary.works,
            new_authors = summary.authors,
            new_venues = summary.venues,
            "batch loaded"
        );
        Ok(summary)
    }

    async fn load_one(&self, work: ApiWork, summary: &mut LoadSummary) -> Result<(), IngestError> {
        let host_venue_id = match &work.host_venue {
            Some(venue) => match venue.display_name.clone() {
                Some(name) => Some(self.resolve_venue(venue, name, summary).await?),
                None => None,
            },
            None => None,
        };

        let mut author_ids: Vec<String> = Vec::with_capacity(work.authorships.len());
        for authorship in &work.authorships {
            let author = match self
                .repo
                .find_author_by_openalex_id(&authorship.author.id)
                .await?
            {
                Some(existing) => existing,
                None => {
                    let name = normalize_name(&authorship.author.display_name)
                        .unwrap_or_else(|| authorship.author.display_name.clone());
                    summary.authors += 1;
                    self.repo
                        .insert_author(authorship.author.id.clone(), name)
                        .await?
                }
            };
            author_ids.push(author.author_id.to_string());
        }

        let concepts = work
            .concepts
            .iter()
            .map(|c| c.display_name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        self.repo
            .insert_work(NewWork {
                openalex_id: work.id,
                doi: work.doi,
                title: work.title.unwrap_or_default(),
                publication_type: work.publication_type,
                cited_by_count: work.cited_by_count,
                host_venue_id,
                author_ids: author_ids.join(","),
                updated_date: work.updated_date,
                publication_date: work.publication_date,
                cited_ids: work.referenced_works.join(","),
                concepts,
            })
            .await?;

        summary.works += 1;
        Ok(())
    }

    async fn resolve_venue(
        &self,
        api_venue: &ApiVenue,
        name: String,
        summary: &mut LoadSummary,
    ) -> Result<i64, IngestError> {
        let name: String = name.chars().take(MAX_VENUE_NAME).collect();

        if let Some(venue) = self.repo.find_venue_by_name(&name).await? {
            return Ok(venue.venue_id);
        }

        summary.venues += 1;
        let venue = self
            .repo
            .insert_venue(
                api_venue.id.clone().unwrap_or_default(),
                name,
                api_venue.issn_l.clone(),
                api_venue.publisher.clone(),
            )
            .await?;
        Ok(venue.venue_id)
    }
}
