//! Topic labeling
//!
//! A fixed taxonomy of elementary topics, the two-stage labeler that
//! assigns them to publications, and the label-slot id space used for
//! citation cross-tabulation.

pub mod labeler;
pub mod space;
pub mod taxonomy;

pub use labeler::Labeler;
pub use space::{LabelSpace, SlotId, SlotKey};
pub use taxonomy::{KeywordRule, Taxonomy, Topic, TopicId};

/// Topic set assigned to one publication.
///
/// Kept ordered by taxonomy index and deduplicated, so the same inputs
/// always produce the same label and the same display string. A label of
/// cardinality 2+ is a genuine multi-topic assignment; it is never
/// disambiguated down to one topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimaryLabel {
    topics: Vec<TopicId>,
}

impl PrimaryLabel {
    /// Build a label from matched topics. Returns `None` for an empty
    /// match set; the caller treats that as the unlabeled sentinel.
    pub fn new(mut topics: Vec<TopicId>) -> Option<Self> {
        topics.sort_unstable();
        topics.dedup();
        if topics.is_empty() {
            None
        } else {
            Some(Self { topics })
        }
    }

    pub fn cardinality(&self) -> usize {
        self.topics.len()
    }

    pub fn topics(&self) -> &[TopicId] {
        &self.topics
    }

    pub fn contains(&self, topic: TopicId) -> bool {
        self.topics.contains(&topic)
    }

    /// Comma-joined topic names, the human-readable form
    pub fn display(&self, taxonomy: &Taxonomy) -> String {
        self.topics
            .iter()
            .map(|&t| taxonomy.name(t))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_orders_and_dedups() {
        let label = PrimaryLabel::new(vec![TopicId(2), TopicId(0), TopicId(2)]).unwrap();
        assert_eq!(label.topics(), &[TopicId(0), TopicId(2)]);
        assert_eq!(label.cardinality(), 2);
    }

    #[test]
    fn test_empty_label_is_none() {
        assert!(PrimaryLabel::new(Vec::new()).is_none());
    }

    #[test]
    fn test_display_joins_names() {
        let taxonomy = Taxonomy::reference();
        let label = PrimaryLabel::new(vec![TopicId(1), TopicId(0)]).unwrap();
        assert_eq!(
            label.display(&taxonomy),
            "particle swarm optimization,evolutionary algorithms"
        );
    }
}
