//! Citation network
//!
//! Simple directed graph over works: one node per record, one edge per
//! resolved (citing, cited) pair. Nodes carry the primary label and the
//! author count. Built fresh from relational records every run.

use crate::labels::{Labeler, PrimaryLabel};
use crate::records::{WorkId, WorkRecord};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Attributes attached to one work node
#[derive(Debug, Clone)]
pub struct NodeData {
    /// `None` is the unlabeled sentinel; such nodes are pruned
    pub primary: Option<PrimaryLabel>,
    pub author_count: usize,
}

pub struct CitationGraph {
    nodes: HashMap<WorkId, NodeData>,
    outgoing: HashMap<WorkId, Vec<WorkId>>,
    incoming: HashMap<WorkId, Vec<WorkId>>,
    edges: HashSet<(WorkId, WorkId)>,
}

impl CitationGraph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            edges: HashSet::new(),
        }
    }

    /// Build the labeled graph from records.
    ///
    /// Citation targets are resolved through an external-id lookup over
    /// the input set; targets outside the corpus are expected and
    /// silently skipped. Duplicate citations collapse to one edge.
    pub fn build(records: &[WorkRecord], labeler: &Labeler) -> Self {
        let mut graph = Self::new();

        for record in records {
            graph.nodes.insert(
                record.id,
                NodeData {
                    primary: labeler.primary(&record.title, &record.concepts),
                    author_count: record.author_ids.len(),
                },
            );
        }

        let lookup: HashMap<&str, WorkId> = records
            .iter()
            .map(|r| (r.external_id.as_str(), r.id))
            .collect();

        let mut outside = 0u64;
        for record in records {
            for cited in &record.cited_ids {
                match lookup.get(cited.as_str()) {
                    Some(&target) => graph.add_edge(record.id, target),
                    None => outside += 1,
                }
            }
        }
        debug!(skipped = outside, "citations to works outside the corpus");

        graph
    }

    /// Add a directed edge between existing nodes. Duplicates are no-ops.
    pub fn add_edge(&mut self, citing: WorkId, cited: WorkId) {
        debug_assert!(self.nodes.contains_key(&citing));
        debug_assert!(self.nodes.contains_key(&cited));

        if self.edges.insert((citing, cited)) {
            self.outgoing.entry(citing).or_default().push(cited);
            self.incoming.entry(cited).or_default().push(citing);
        }
    }

    /// Remove unlabeled and isolated nodes.
    ///
    /// Two atomic sub-sweeps over snapshots of the node set: first every
    /// unlabeled node goes, then every node left with total degree zero.
    /// Within each sweep the decisions use one consistent view, never
    /// recomputing degrees mid-removal. The second sweep only drops
    /// edge-less nodes, so running prune again removes nothing.
    pub fn prune(&mut self) {
        let unlabeled: Vec<WorkId> = self
            .nodes
            .iter()
            .filter(|(_, data)| data.primary.is_none())
            .map(|(id, _)| *id)
            .collect();
        for id in unlabeled {
            self.remove_node(id);
        }

        let isolated: Vec<WorkId> = self
            .nodes
            .keys()
            .copied()
            .filter(|&id| self.in_degree(id) + self.out_degree(id) == 0)
            .collect();
        for id in isolated {
            self.remove_node(id);
        }
    }

    fn remove_node(&mut self, id: WorkId) {
        self.nodes.remove(&id);
        for target in self.outgoing.remove(&id).unwrap_or_default() {
            self.edges.remove(&(id, target));
            if let Some(back) = self.incoming.get_mut(&target) {
                back.retain(|&n| n != id);
            }
        }
        for source in self.incoming.remove(&id).unwrap_or_default() {
            self.edges.remove(&(source, id));
            if let Some(fwd) = self.outgoing.get_mut(&source) {
                fwd.retain(|&n| n != id);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, id: WorkId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: WorkId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (WorkId, &NodeData)> {
        self.nodes.iter().map(|(&id, data)| (id, data))
    }

    pub fn edges(&self) -> impl Iterator<Item = (WorkId, WorkId)> + '_ {
        self.edges.iter().copied()
    }

    /// Works cited by this work
    pub fn references(&self, id: WorkId) -> &[WorkId] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Works citing this work
    pub fn citations(&self, id: WorkId) -> &[WorkId] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn out_degree(&self, id: WorkId) -> usize {
        self.references(id).len()
    }

    pub fn in_degree(&self, id: WorkId) -> usize {
        self.citations(id).len()
    }

    /// Sorted node ids, for deterministic iteration in reports
    pub fn node_ids_sorted(&self) -> Vec<WorkId> {
        let mut ids: Vec<WorkId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for CitationGraph {
    fn default() -> Self {
        Self::new()
    }
}
