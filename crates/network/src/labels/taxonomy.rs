//! The topic taxonomy
//!
//! A closed, ordered list of elementary topics with their matching rules.
//! The declared order is load-bearing: it fixes `TopicId` values and,
//! through them, the slot numbering of the label id space, so report
//! tables keep the same layout across runs.

use serde::{Deserialize, Serialize};

/// Index of a topic in the declared taxonomy order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TopicId(pub usize);

/// One keyword rule for stage-1 title matching.
///
/// The anchor alone is too ambiguous to confirm a topic ("evolution",
/// "ant"); at least one qualifier must also appear in the title.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub anchor: &'static str,
    pub qualifiers: &'static [&'static str],
}

/// One elementary topic with all of its matching rules
#[derive(Debug, Clone, Copy)]
pub struct Topic {
    pub name: &'static str,
    pub abbrev: &'static str,

    /// Case-sensitive markers checked against the raw title ("PSO",
    /// " GA "). Padding and punctuation are part of the marker to keep
    /// short acronyms from matching inside other words.
    pub title_markers: &'static [&'static str],

    /// Stage-1 keyword rules, matched against the case-folded title
    pub keywords: &'static [KeywordRule],

    /// Coarse concept tags (exact, case-folded match)
    pub concepts_level1: &'static [&'static str],

    /// Fine-grained concept tags; any level-2 match anywhere in the
    /// taxonomy suppresses level-1 matching entirely
    pub concepts_level2: &'static [&'static str],
}

/// The fixed, ordered topic list
#[derive(Debug, Clone)]
pub struct Taxonomy {
    topics: Vec<Topic>,
}

impl Taxonomy {
    /// The reference taxonomy of nature-inspired optimization subfields
    pub fn reference() -> Self {
        Self {
            topics: REFERENCE_TOPICS.to_vec(),
        }
    }

    /// A taxonomy from caller-supplied topics, in the given order
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topics(&self) -> impl Iterator<Item = (TopicId, &Topic)> {
        self.topics
            .iter()
            .enumerate()
            .map(|(i, t)| (TopicId(i), t))
    }

    pub fn get(&self, id: TopicId) -> &Topic {
        &self.topics[id.0]
    }

    pub fn name(&self, id: TopicId) -> &'static str {
        self.topics[id.0].name
    }

    pub fn abbrev(&self, id: TopicId) -> &'static str {
        self.topics[id.0].abbrev
    }
}

const REFERENCE_TOPICS: &[Topic] = &[
    Topic {
        name: "particle swarm optimization",
        abbrev: "PSO",
        title_markers: &["PSO"],
        keywords: &[KeywordRule {
            anchor: "swarm",
            qualifiers: &["particle swarm", "particle-swarm", "multi-swarm", "multi swarm"],
        }],
        concepts_level1: &["particle swarm optimization", "multi-swarm optimization"],
        concepts_level2: &[],
    },
    Topic {
        name: "evolutionary algorithms",
        abbrev: "EA",
        title_markers: &[" GA ", "(GA)"],
        keywords: &[
            KeywordRule {
                anchor: "evolution",
                qualifiers: &[
                    "evolutionary algorithm",
                    "program",
                    "strateg",
                    "evolutionary-based",
                    "approach",
                    "evolution algorithm",
                    "evolutionary optimization",
                    "evolutionary optimisation",
                ],
            },
            KeywordRule {
                anchor: "genetic",
                qualifiers: &["algorithm", "program"],
            },
        ],
        concepts_level1: &[
            "evolutionary algorithm",
            "evolutionary programming",
            "genetic algorithm",
            "genetic programming",
            "evolution strategy",
        ],
        concepts_level2: &[],
    },
    Topic {
        name: "ant colony optimization",
        abbrev: "ACO",
        title_markers: &["ACO"],
        keywords: &[KeywordRule {
            anchor: "ant",
            qualifiers: &["ant colony", "ant system", "ant algorithm"],
        }],
        concepts_level1: &["ant colony optimization algorithms"],
        concepts_level2: &[],
    },
    Topic {
        name: "differential evolution",
        abbrev: "DE",
        title_markers: &[],
        keywords: &[KeywordRule {
            anchor: "differential",
            qualifiers: &["evolution"],
        }],
        concepts_level1: &[],
        concepts_level2: &["differential evolution"],
    },
    Topic {
        name: "cuckoo search",
        abbrev: "Cuckoo",
        title_markers: &[" CS "],
        keywords: &[KeywordRule {
            anchor: "cuckoo",
            qualifiers: &["search", "algorithm"],
        }],
        concepts_level1: &[],
        concepts_level2: &["cuckoo search"],
    },
    Topic {
        name: "harmony search",
        abbrev: "Harmony",
        title_markers: &[" HS "],
        keywords: &[KeywordRule {
            anchor: "harmony",
            qualifiers: &["search", "algorithm"],
        }],
        concepts_level1: &[],
        concepts_level2: &["harmony search"],
    },
    Topic {
        name: "bat algorithm",
        abbrev: "Bat",
        title_markers: &["Bat ", " BA ", " BA-", "(BA)"],
        keywords: &[KeywordRule {
            anchor: " bat ",
            qualifiers: &["algorithm", "optimiz"],
        }],
        concepts_level1: &[],
        concepts_level2: &["bat algorithm"],
    },
    Topic {
        name: "firefly algorithm",
        abbrev: "FA",
        title_markers: &[" FA ", " FA-", "-FA ", "(FA)"],
        keywords: &[KeywordRule {
            anchor: "firefly",
            qualifiers: &["algorithm", "optimiz", "metaheuristic", "technique"],
        }],
        concepts_level1: &[],
        concepts_level2: &["firefly algorithm"],
    },
    Topic {
        name: "artificial bee colony",
        abbrev: "ABC",
        title_markers: &["(ABC)"],
        keywords: &[
            KeywordRule {
                anchor: "bees ",
                qualifiers: &["bees colony", "bees algorithm", "bees swarm"],
            },
            KeywordRule {
                anchor: "bee",
                qualifiers: &["bee algorithm", "bee swarm", "bee colony", "bee-inspired"],
            },
        ],
        concepts_level1: &[],
        concepts_level2: &["artificial bee colony algorithm", "bees algorithm"],
    },
];
