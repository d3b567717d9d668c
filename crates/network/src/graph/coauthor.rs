//! Co-authorship network
//!
//! Undirected weighted graph over canonical author ids, derived from the
//! citation network's surviving works only. Edge weight counts
//! co-authored papers; each node carries a paper count and the set of
//! topics the author has published in.

use super::citation::CitationGraph;
use crate::errors::{NetworkError, Result};
use crate::labels::TopicId;
use crate::records::WorkRecord;
use std::collections::{BTreeSet, HashMap};

/// Canonical (alternate) author id
pub type AuthorId = i64;

#[derive(Debug, Clone, Default)]
pub struct AuthorData {
    pub papers_published: u64,
    pub topics: BTreeSet<TopicId>,
}

#[derive(Debug)]
pub struct CoauthorGraph {
    nodes: HashMap<AuthorId, AuthorData>,
    /// Weight per unordered pair, keyed (smaller id, larger id)
    weights: HashMap<(AuthorId, AuthorId), u64>,
    adjacency: HashMap<AuthorId, Vec<AuthorId>>,
}

impl CoauthorGraph {
    /// Build from the works that survived citation-graph pruning.
    ///
    /// Author ids are collapsed through the alternate-id table; an
    /// author without a mapping is a data inconsistency and aborts.
    /// Two ids collapsing to the same author within one paper would
    /// form a self-loop, so such pairs are skipped.
    pub fn build(
        records: &[WorkRecord],
        citation: &CitationGraph,
        alt_ids: &HashMap<i64, AuthorId>,
    ) -> Result<Self> {
        let mut graph = Self {
            nodes: HashMap::new(),
            weights: HashMap::new(),
            adjacency: HashMap::new(),
        };

        for record in records {
            let Some(node) = citation.node(record.id) else {
                // pruned out of the citation network
                continue;
            };
            let Some(primary) = node.primary.as_ref() else {
                continue;
            };

            let mut authors = record
                .author_ids
                .iter()
                .map(|&a| {
                    alt_ids
                        .get(&a)
                        .copied()
                        .ok_or(NetworkError::AltIdMissing { author_id: a })
                })
                .collect::<Result<Vec<AuthorId>>>()?;
            authors.sort_unstable();
            authors.dedup();

            for (i, &a) in authors.iter().enumerate() {
                let data = graph.nodes.entry(a).or_default();
                data.papers_published += 1;
                data.topics.extend(primary.topics().iter().copied());

                for &b in &authors[i + 1..] {
                    graph.add_coauthorship(a, b);
                }
            }
        }

        Ok(graph)
    }

    fn add_coauthorship(&mut self, a: AuthorId, b: AuthorId) {
        let key = (a.min(b), a.max(b));
        let weight = self.weights.entry(key).or_insert(0);
        if *weight == 0 {
            self.adjacency.entry(key.0).or_default().push(key.1);
            self.adjacency.entry(key.1).or_default().push(key.0);
        }
        *weight += 1;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn node(&self, id: AuthorId) -> Option<&AuthorData> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (AuthorId, &AuthorData)> {
        self.nodes.iter().map(|(&id, data)| (id, data))
    }

    /// Distinct co-author count
    pub fn degree(&self, id: AuthorId) -> usize {
        self.adjacency.get(&id).map(|v| v.len()).unwrap_or(0)
    }

    pub fn weight(&self, a: AuthorId, b: AuthorId) -> u64 {
        self.weights
            .get(&(a.min(b), a.max(b)))
            .copied()
            .unwrap_or(0)
    }

    pub fn edges(&self) -> impl Iterator<Item = ((AuthorId, AuthorId), u64)> + '_ {
        self.weights.iter().map(|(&pair, &w)| (pair, w))
    }

    /// Sorted node ids, for deterministic iteration in reports
    pub fn node_ids_sorted(&self) -> Vec<AuthorId> {
        let mut ids: Vec<AuthorId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
