//! Two-stage node labeler
//!
//! Stage 1 matches the title: abbreviation markers first (case-sensitive,
//! exact substring), then keyword anchors with their qualifier words on
//! the case-folded text. Stage 2 runs only when stage 1 found nothing and
//! matches concept tags, fine-grained rules shadowing coarse ones.

use super::taxonomy::{Taxonomy, TopicId};
use super::PrimaryLabel;
use std::collections::HashSet;

pub struct Labeler<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Labeler<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Assign a primary label, or `None` when neither stage matches.
    /// Empty titles and empty concept lists simply match nothing.
    pub fn primary(&self, title: &str, concepts: &[String]) -> Option<PrimaryLabel> {
        let matched = self.stage1(title);
        if let Some(label) = PrimaryLabel::new(matched) {
            return Some(label);
        }
        PrimaryLabel::new(self.stage2(concepts))
    }

    /// Title-based matching. Topics are collected in taxonomy order so
    /// the resulting label is identical across runs.
    fn stage1(&self, title: &str) -> Vec<TopicId> {
        let folded = title.to_lowercase();
        let mut matched = Vec::new();

        for (id, topic) in self.taxonomy.topics() {
            // Abbreviation markers are checked against the raw title:
            // case matters for short acronyms.
            let by_marker = topic.title_markers.iter().any(|m| title.contains(m));

            let by_keyword = topic.keywords.iter().any(|rule| {
                folded.contains(rule.anchor)
                    && rule.qualifiers.iter().any(|q| folded.contains(q))
            });

            if by_marker || by_keyword {
                matched.push(id);
            }
        }

        matched
    }

    /// Concept-based matching. Tags match as whole strings, case-folded.
    /// If any topic matches at level 2, only level-2 matches are
    /// returned; level 1 is the coarser fallback.
    fn stage2(&self, concepts: &[String]) -> Vec<TopicId> {
        let tags: HashSet<String> = concepts.iter().map(|c| c.to_lowercase()).collect();

        let level2: Vec<TopicId> = self
            .taxonomy
            .topics()
            .filter(|(_, t)| t.concepts_level2.iter().any(|c| tags.contains(*c)))
            .map(|(id, _)| id)
            .collect();
        if !level2.is_empty() {
            return level2;
        }

        self.taxonomy
            .topics()
            .filter(|(_, t)| t.concepts_level1.iter().any(|c| tags.contains(*c)))
            .map(|(id, _)| id)
            .collect()
    }
}
