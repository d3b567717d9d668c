//! Citation cross-tabulation by label slot
//!
//! One pass over the citation edges accumulates, per slot, the outgoing
//! and incoming citation counts and the pairwise flow matrix. A node
//! contributing to k slots contributes k counts per edge endpoint and up
//! to k_src * k_tgt flow increments per edge: multi-label nodes are
//! counted in every slot they occupy.

use crate::errors::Result;
use crate::graph::CitationGraph;
use crate::labels::{LabelSpace, SlotId};
use crate::records::WorkId;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct CrossTab {
    n_slots: usize,
    /// Citations from nodes occupying each slot
    pub outgoing: Vec<u64>,
    /// Citations to nodes occupying each slot
    pub incoming: Vec<u64>,
    /// Flow counts, row = source slot, column = target slot
    flows: Vec<u64>,
}

impl CrossTab {
    /// All tables zeroed over the full id space
    pub fn zeroed(space: &LabelSpace) -> Self {
        let n = space.len();
        Self {
            n_slots: n,
            outgoing: vec![0; n],
            incoming: vec![0; n],
            flows: vec![0; n * n],
        }
    }

    /// Tabulate a pruned, labeled graph.
    ///
    /// Secondary slot sets are expanded once per node; an expansion
    /// failure (slot outside the id space) aborts the pass.
    pub fn tabulate(graph: &CitationGraph, space: &LabelSpace) -> Result<Self> {
        let mut tab = Self::zeroed(space);

        let mut secondary: HashMap<WorkId, Vec<SlotId>> = HashMap::new();
        for (id, data) in graph.nodes() {
            if let Some(primary) = data.primary.as_ref() {
                secondary.insert(id, space.secondary_slots(primary)?);
            }
        }

        for (source, target) in graph.edges() {
            let (Some(from_slots), Some(to_slots)) =
                (secondary.get(&source), secondary.get(&target))
            else {
                // unlabeled endpoints only exist pre-prune; their edges
                // are not tabulated
                continue;
            };

            for &a in from_slots {
                tab.outgoing[a] += 1;
            }
            for &b in to_slots {
                tab.incoming[b] += 1;
            }
            for &a in from_slots {
                for &b in to_slots {
                    tab.flows[a * tab.n_slots + b] += 1;
                }
            }
        }

        Ok(tab)
    }

    pub fn n_slots(&self) -> usize {
        self.n_slots
    }

    pub fn flow(&self, source: SlotId, target: SlotId) -> u64 {
        self.flows[source * self.n_slots + target]
    }

    /// Flow matrix as rows, for the report
    pub fn flow_rows(&self) -> Vec<Vec<u64>> {
        (0..self.n_slots)
            .map(|i| self.flows[i * self.n_slots..(i + 1) * self.n_slots].to_vec())
            .collect()
    }

    /// Share of slot i's outgoing citations that land in slot j
    pub fn outgoing_proportions(&self) -> Vec<Vec<f64>> {
        (0..self.n_slots)
            .map(|i| {
                (0..self.n_slots)
                    .map(|j| ratio(self.flow(i, j), self.outgoing[i]))
                    .collect()
            })
            .collect()
    }

    /// Share of slot i's incoming citations that come from slot j
    pub fn incoming_proportions(&self) -> Vec<Vec<f64>> {
        (0..self.n_slots)
            .map(|i| {
                (0..self.n_slots)
                    .map(|j| ratio(self.flow(j, i), self.incoming[i]))
                    .collect()
            })
            .collect()
    }

    /// Outgoing share minus incoming share, per slot pair
    pub fn proportion_difference(&self) -> Vec<Vec<f64>> {
        (0..self.n_slots)
            .map(|i| {
                (0..self.n_slots)
                    .map(|j| {
                        ratio(self.flow(i, j), self.outgoing[i])
                            - ratio(self.flow(j, i), self.incoming[i])
                    })
                    .collect()
            })
            .collect()
    }
}

/// Ratio with an explicit zero sentinel.
///
/// Every flow increment also increments both marginals, so a zero
/// denominator can only pair with a zero numerator; 0/0 reads as 0.
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        debug_assert_eq!(numerator, 0, "flow without a matching marginal count");
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::taxonomy::{KeywordRule, Taxonomy, Topic};
    use crate::labels::Labeler;
    use crate::records::WorkRecord;

    fn tiny_topic(
        name: &'static str,
        abbrev: &'static str,
        concepts_level1: &'static [&'static str],
    ) -> Topic {
        Topic {
            name,
            abbrev,
            title_markers: &[],
            keywords: &[] as &[KeywordRule],
            concepts_level1,
            concepts_level2: &[],
        }
    }

    /// Three topics matched purely through level-1 concept tags
    fn tiny_taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            tiny_topic("alpha", "A", &["alpha"]),
            tiny_topic("beta", "B", &["beta"]),
            tiny_topic("gamma", "C", &["gamma"]),
        ])
    }

    fn record(id: i64, concepts: &[&str], cited: &[&str]) -> WorkRecord {
        WorkRecord {
            id,
            external_id: format!("W{id}"),
            title: String::new(),
            concepts: concepts.iter().map(|s| s.to_string()).collect(),
            cited_ids: cited.iter().map(|s| s.to_string()).collect(),
            author_ids: vec![1],
            publication_date: None,
        }
    }

    fn graph_of(records: &[WorkRecord], taxonomy: &Taxonomy) -> CitationGraph {
        let labeler = Labeler::new(taxonomy);
        let mut graph = CitationGraph::build(records, &labeler);
        graph.prune();
        graph
    }

    #[test]
    fn test_zeroed_covers_full_space() {
        let space = LabelSpace::build(&tiny_taxonomy());
        let tab = CrossTab::zeroed(&space);
        assert_eq!(tab.outgoing, vec![0; 6]);
        assert_eq!(tab.incoming, vec![0; 6]);
        assert_eq!(tab.flow_rows(), vec![vec![0; 6]; 6]);
    }

    #[test]
    fn test_single_edge_single_to_pair() {
        // X labeled {alpha} cites Y labeled {alpha, beta}:
        // X expands to the alpha singleton, Y to the one {alpha,beta}
        // pair slot.
        let taxonomy = tiny_taxonomy();
        let space = LabelSpace::build(&taxonomy);
        let records = vec![
            record(1, &["alpha"], &["W2"]),
            record(2, &["alpha", "beta"], &[]),
        ];
        let graph = graph_of(&records, &taxonomy);
        let tab = CrossTab::tabulate(&graph, &space).unwrap();

        // slot ids: 0 = A, 1 = A,B, 2 = A,C, 3 = B, 4 = B,C, 5 = C
        assert_eq!(tab.outgoing, vec![1, 0, 0, 0, 0, 0]);
        assert_eq!(tab.incoming, vec![0, 1, 0, 0, 0, 0]);
        assert_eq!(tab.flow(0, 1), 1);
        assert_eq!(tab.flow(0, 0), 0);
        let total: u64 = tab.flow_rows().iter().flatten().sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_triple_label_target_overcounts() {
        // Y labeled {alpha, beta, gamma} occupies all three pair slots;
        // one citation into Y counts once per occupied slot.
        let taxonomy = tiny_taxonomy();
        let space = LabelSpace::build(&taxonomy);
        let records = vec![
            record(1, &["alpha"], &["W2"]),
            record(2, &["alpha", "beta", "gamma"], &[]),
        ];
        let graph = graph_of(&records, &taxonomy);
        let tab = CrossTab::tabulate(&graph, &space).unwrap();

        assert_eq!(tab.outgoing[0], 1);
        // pair slots 1 = A,B, 2 = A,C, 4 = B,C
        assert_eq!(tab.incoming[1], 1);
        assert_eq!(tab.incoming[2], 1);
        assert_eq!(tab.incoming[4], 1);
        assert_eq!(tab.flow(0, 1), 1);
        assert_eq!(tab.flow(0, 2), 1);
        assert_eq!(tab.flow(0, 4), 1);
    }

    #[test]
    fn test_outgoing_totals_match_expanded_endpoints() {
        let taxonomy = tiny_taxonomy();
        let space = LabelSpace::build(&taxonomy);
        let records = vec![
            record(1, &["alpha", "beta", "gamma"], &["W2", "W3"]),
            record(2, &["beta"], &["W3"]),
            record(3, &["gamma"], &[]),
        ];
        let graph = graph_of(&records, &taxonomy);
        let tab = CrossTab::tabulate(&graph, &space).unwrap();

        // per-edge source slot counts: node 1 expands to 3 slots and has
        // 2 edges, node 2 to 1 slot with 1 edge
        let out_total: u64 = tab.outgoing.iter().sum();
        assert_eq!(out_total, 3 * 2 + 1);
    }

    #[test]
    fn test_outgoing_monotone_under_edge_addition() {
        let taxonomy = tiny_taxonomy();
        let space = LabelSpace::build(&taxonomy);

        let sparse = vec![
            record(1, &["alpha"], &["W2"]),
            record(2, &["beta"], &[]),
            record(3, &["gamma"], &["W1"]),
        ];
        let mut dense = sparse.clone();
        dense[1].cited_ids = vec!["W1".to_string()]; // add an edge

        let tab_sparse = CrossTab::tabulate(&graph_of(&sparse, &taxonomy), &space).unwrap();
        let tab_dense = CrossTab::tabulate(&graph_of(&dense, &taxonomy), &space).unwrap();

        for slot in 0..space.len() {
            assert!(tab_dense.outgoing[slot] >= tab_sparse.outgoing[slot]);
        }
    }

    #[test]
    fn test_proportions_and_zero_division_sentinel() {
        let taxonomy = tiny_taxonomy();
        let space = LabelSpace::build(&taxonomy);
        let records = vec![
            record(1, &["alpha"], &["W2", "W3"]),
            record(2, &["beta"], &[]),
            record(3, &["beta"], &[]),
        ];
        let graph = graph_of(&records, &taxonomy);
        let tab = CrossTab::tabulate(&graph, &space).unwrap();

        let out = tab.outgoing_proportions();
        assert_eq!(out[0][3], 1.0); // both of alpha's citations go to beta
        // gamma has no outgoing citations at all: whole row is the sentinel
        assert!(out[5].iter().all(|&v| v == 0.0));

        let inc = tab.incoming_proportions();
        assert_eq!(inc[3][0], 1.0); // all of beta's incoming come from alpha
        assert!(inc[0].iter().all(|&v| v == 0.0));

        let diff = tab.proportion_difference();
        assert_eq!(diff[0][3], 1.0);
        assert_eq!(diff[3][0], -1.0);
    }

    #[test]
    fn test_tabulation_is_deterministic() {
        let taxonomy = tiny_taxonomy();
        let space = LabelSpace::build(&taxonomy);
        let records = vec![
            record(1, &["alpha", "beta"], &["W2", "W3"]),
            record(2, &["beta", "gamma"], &["W1"]),
            record(3, &["gamma"], &["W1", "W2"]),
        ];

        let first = CrossTab::tabulate(&graph_of(&records, &taxonomy), &space).unwrap();
        for _ in 0..5 {
            let again = CrossTab::tabulate(&graph_of(&records, &taxonomy), &space).unwrap();
            assert_eq!(again.outgoing, first.outgoing);
            assert_eq!(again.incoming, first.incoming);
            assert_eq!(again.flow_rows(), first.flow_rows());
        }
    }

    #[test]
    fn test_slot_miss_aborts() {
        // a graph labeled against a wider taxonomy than the space knows
        // cannot be tabulated
        let wide = Taxonomy::new(vec![
            tiny_topic("alpha", "A", &["alpha"]),
            tiny_topic("beta", "B", &["beta"]),
            tiny_topic("gamma", "C", &["gamma"]),
            tiny_topic("delta", "D", &["delta"]),
        ]);
        let space = LabelSpace::build(&tiny_taxonomy());
        let records = vec![record(1, &["alpha"], &["W2"]), record(2, &["delta"], &[])];
        let graph = graph_of(&records, &wide);

        let err = CrossTab::tabulate(&graph, &space).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::NetworkError::SlotMissing { .. }
        ));
    }
}
