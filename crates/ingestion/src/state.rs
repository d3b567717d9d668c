//! Per-run fetch state
//!
//! Tracks which external ids have been seen (including everything
//! already in the database) and buffers the works that pass the admit
//! filter. One instance lives for one ingest run and is passed through
//! the call chain explicitly.

use crate::openalex::ApiWork;
use std::collections::HashSet;

#[derive(Default)]
pub struct FetchState {
    seen: HashSet<String>,
    admitted: Vec<ApiWork>,
}

impl FetchState {
    /// Seed with ids already present in the store so re-fetched works
    /// are not inserted twice.
    pub fn with_known_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            seen: ids.into_iter().collect(),
            admitted: Vec::new(),
        }
    }

    /// Admit a fetched work into the buffer.
    ///
    /// Rejected: duplicates, works without a DOI, retracted works,
    /// paratext, and works with no authors at all.
    pub fn admit(&mut self, work: ApiWork) -> bool {
        if self.seen.contains(&work.id)
            || work.doi.is_none()
            || work.is_retracted
            || work.is_paratext
            || work.authorships.is_empty()
        {
            return false;
        }

        self.seen.insert(work.id.clone());
        self.admitted.push(work);
        true
    }

    pub fn admitted_count(&self) -> usize {
        self.admitted.len()
    }

    /// Take the admitted buffer, leaving the seen-set in place
    pub fn drain(&mut self) -> Vec<ApiWork> {
        std::mem::take(&mut self.admitted)
    }
}
