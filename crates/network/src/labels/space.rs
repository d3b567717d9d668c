//! Label-slot id space and secondary-label expansion
//!
//! Every singleton topic and every unordered topic pair owns one integer
//! slot. Slot numbering is a fixed function of the declared taxonomy
//! order, matching the reference table layout: singleton(i) followed by
//! the pairs (i, j) for j > i, with the final singleton last. Cross-tab
//! tables and report vectors are indexed by these ids, so the numbering
//! is part of the report format.

use super::taxonomy::{Taxonomy, TopicId};
use super::PrimaryLabel;
use crate::errors::{NetworkError, Result};
use std::collections::HashMap;

/// Index into the label id space
pub type SlotId = usize;

/// Key of one slot: a topic, or an unordered pair of topics.
///
/// Pairs are canonical (lower taxonomy index first), so each unordered
/// pair has exactly one representation and lookups never need to try
/// both orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Single(TopicId),
    Pair(TopicId, TopicId),
}

impl SlotKey {
    pub fn single(topic: TopicId) -> Self {
        SlotKey::Single(topic)
    }

    /// Canonical pair key. The two topics must differ.
    pub fn pair(a: TopicId, b: TopicId) -> Self {
        debug_assert_ne!(a, b, "a pair slot needs two distinct topics");
        if a < b {
            SlotKey::Pair(a, b)
        } else {
            SlotKey::Pair(b, a)
        }
    }
}

/// The full label id space with display names aligned to slot order
pub struct LabelSpace {
    slots: HashMap<SlotKey, SlotId>,
    names: Vec<String>,
    abbrevs: Vec<String>,
    topic_names: Vec<&'static str>,
}

impl LabelSpace {
    /// Build the space for a taxonomy. Total slots = N + C(N, 2).
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let n = taxonomy.len();
        let mut space = Self {
            slots: HashMap::new(),
            names: Vec::new(),
            abbrevs: Vec::new(),
            topic_names: taxonomy.topics().map(|(_, t)| t.name).collect(),
        };

        for i in 0..n.saturating_sub(1) {
            space.register_single(taxonomy, TopicId(i));
            for j in (i + 1)..n {
                space.register_pair(taxonomy, TopicId(i), TopicId(j));
            }
        }
        if n > 0 {
            space.register_single(taxonomy, TopicId(n - 1));
        }

        space
    }

    fn register_single(&mut self, taxonomy: &Taxonomy, t: TopicId) {
        let id = self.names.len();
        self.slots.insert(SlotKey::single(t), id);
        self.names.push(taxonomy.name(t).to_string());
        self.abbrevs.push(taxonomy.abbrev(t).to_string());
    }

    fn register_pair(&mut self, taxonomy: &Taxonomy, a: TopicId, b: TopicId) {
        let id = self.names.len();
        self.slots.insert(SlotKey::pair(a, b), id);
        self.names
            .push(format!("{},{}", taxonomy.name(a), taxonomy.name(b)));
        self.abbrevs
            .push(format!("{},{}", taxonomy.abbrev(a), taxonomy.abbrev(b)));
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn resolve(&self, key: SlotKey) -> Option<SlotId> {
        self.slots.get(&key).copied()
    }

    /// Full display names aligned to slot index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Abbreviated display names aligned to slot index order
    pub fn abbrevs(&self) -> &[String] {
        &self.abbrevs
    }

    /// The secondary-label slots a node contributes to:
    /// - cardinality 1: the singleton slot
    /// - cardinality 2: the one pair slot
    /// - cardinality s > 2: all C(s, 2) pairwise slots
    ///
    /// A miss means the label references a topic outside this space's
    /// taxonomy. That is a data inconsistency, reported with the label
    /// itself.
    pub fn secondary_slots(&self, label: &PrimaryLabel) -> Result<Vec<SlotId>> {
        let topics = label.topics();
        match topics {
            [t] => Ok(vec![self.lookup(SlotKey::single(*t), topics)?]),
            [a, b] => Ok(vec![self.lookup(SlotKey::pair(*a, *b), topics)?]),
            _ => {
                let mut slots = Vec::with_capacity(topics.len() * (topics.len() - 1) / 2);
                for (i, &a) in topics.iter().enumerate() {
                    for &b in &topics[i + 1..] {
                        slots.push(self.lookup(SlotKey::pair(a, b), topics)?);
                    }
                }
                Ok(slots)
            }
        }
    }

    fn lookup(&self, key: SlotKey, topics: &[TopicId]) -> Result<SlotId> {
        self.resolve(key).ok_or_else(|| NetworkError::SlotMissing {
            label: topics
                .iter()
                .map(|t| {
                    self.topic_names
                        .get(t.0)
                        .copied()
                        .unwrap_or("<unknown topic>")
                })
                .collect::<Vec<_>>()
                .join(","),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::taxonomy::{KeywordRule, Topic};

    fn tiny_topic(name: &'static str, abbrev: &'static str) -> Topic {
        Topic {
            name,
            abbrev,
            title_markers: &[],
            keywords: &[] as &[KeywordRule],
            concepts_level1: &[],
            concepts_level2: &[],
        }
    }

    fn tiny_taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            tiny_topic("alpha", "A"),
            tiny_topic("beta", "B"),
            tiny_topic("gamma", "C"),
        ])
    }

    #[test]
    fn test_slot_count() {
        // N + C(N, 2)
        let space = LabelSpace::build(&Taxonomy::reference());
        assert_eq!(space.len(), 9 + 36);

        let space = LabelSpace::build(&tiny_taxonomy());
        assert_eq!(space.len(), 3 + 3);
    }

    #[test]
    fn test_reference_enumeration_order() {
        let space = LabelSpace::build(&tiny_taxonomy());
        // singleton(0), pair(0,1), pair(0,2), singleton(1), pair(1,2), singleton(2)
        assert_eq!(space.abbrevs(), &["A", "A,B", "A,C", "B", "B,C", "C"]);
        assert_eq!(space.resolve(SlotKey::single(TopicId(0))), Some(0));
        assert_eq!(space.resolve(SlotKey::pair(TopicId(1), TopicId(2))), Some(4));
        assert_eq!(space.resolve(SlotKey::single(TopicId(2))), Some(5));
    }

    #[test]
    fn test_pair_key_is_orientation_free() {
        let space = LabelSpace::build(&tiny_taxonomy());
        assert_eq!(
            space.resolve(SlotKey::pair(TopicId(2), TopicId(0))),
            space.resolve(SlotKey::pair(TopicId(0), TopicId(2))),
        );
    }

    #[test]
    fn test_singleton_expansion() {
        let space = LabelSpace::build(&tiny_taxonomy());
        let label = PrimaryLabel::new(vec![TopicId(1)]).unwrap();
        assert_eq!(space.secondary_slots(&label).unwrap(), vec![3]);
    }

    #[test]
    fn test_pair_expansion() {
        let space = LabelSpace::build(&tiny_taxonomy());
        let label = PrimaryLabel::new(vec![TopicId(2), TopicId(0)]).unwrap();
        assert_eq!(space.secondary_slots(&label).unwrap(), vec![2]);
    }

    #[test]
    fn test_triple_expands_to_all_pairs() {
        let space = LabelSpace::build(&tiny_taxonomy());
        let label = PrimaryLabel::new(vec![TopicId(0), TopicId(1), TopicId(2)]).unwrap();
        let slots = space.secondary_slots(&label).unwrap();
        // exactly the three pair slots, none of the singletons
        assert_eq!(slots, vec![1, 2, 4]);
        for singleton in [0usize, 3, 5] {
            assert!(!slots.contains(&singleton));
        }
    }

    #[test]
    fn test_expansion_count_for_wide_labels() {
        let space = LabelSpace::build(&Taxonomy::reference());
        let label =
            PrimaryLabel::new((0..5).map(TopicId).collect()).unwrap();
        let slots = space.secondary_slots(&label).unwrap();
        assert_eq!(slots.len(), 10); // C(5, 2)
        let unique: std::collections::HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), slots.len());
    }

    #[test]
    fn test_unknown_topic_is_a_defect() {
        let space = LabelSpace::build(&tiny_taxonomy());
        let label = PrimaryLabel::new(vec![TopicId(7)]).unwrap();
        let err = space.secondary_slots(&label).unwrap_err();
        assert!(matches!(err, NetworkError::SlotMissing { .. }));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let space = LabelSpace::build(&Taxonomy::reference());
        let label = PrimaryLabel::new(vec![TopicId(3), TopicId(1), TopicId(6)]).unwrap();
        let first = space.secondary_slots(&label).unwrap();
        for _ in 0..10 {
            assert_eq!(space.secondary_slots(&label).unwrap(), first);
        }
    }
}
