//! Descriptive statistics over the derived networks
//!
//! Everything here is plain aggregation: label-cardinality census,
//! per-topic property tables, publication counts per year, histogram
//! binning, and partition composition. The reporting layer serializes
//! these as-is; rendering happens elsewhere.

use crate::graph::{CitationGraph, CoauthorGraph, Partition};
use crate::labels::Taxonomy;
use crate::records::WorkRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// How many surviving works carry one, two, three, or more topics
#[derive(Debug, Clone, Serialize)]
pub struct LabelCensus {
    pub single: usize,
    pub two: usize,
    pub three: usize,
    pub more_than_three: usize,
    /// Works carrying each topic, multi-label works counted everywhere
    pub per_topic_total: Vec<u64>,
    /// Works carrying each topic as their only topic
    pub per_topic_single: Vec<u64>,
}

impl LabelCensus {
    pub fn multi_total(&self) -> usize {
        self.two + self.three + self.more_than_three
    }
}

pub fn label_census(graph: &CitationGraph, taxonomy: &Taxonomy) -> LabelCensus {
    let n = taxonomy.len();
    let mut census = LabelCensus {
        single: 0,
        two: 0,
        three: 0,
        more_than_three: 0,
        per_topic_total: vec![0; n],
        per_topic_single: vec![0; n],
    };

    for (_, data) in graph.nodes() {
        let Some(primary) = data.primary.as_ref() else {
            continue;
        };
        match primary.cardinality() {
            1 => {
                census.single += 1;
                census.per_topic_single[primary.topics()[0].0] += 1;
            }
            2 => census.two += 1,
            3 => census.three += 1,
            _ => census.more_than_three += 1,
        }
        for topic in primary.topics() {
            census.per_topic_total[topic.0] += 1;
        }
    }

    census
}

/// One row of a per-topic property table
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub topic: String,
    pub mean: f64,
    pub stdev: f64,
    pub total: f64,
    pub size: usize,
}

/// Summarize per-topic value lists: mean, sample standard deviation,
/// total, count. Topics with fewer than two samples report a stdev of 0.
pub fn summarize_per_topic(values: &[Vec<f64>], taxonomy: &Taxonomy) -> Vec<SummaryRow> {
    taxonomy
        .topics()
        .map(|(id, topic)| {
            let vs = &values[id.0];
            SummaryRow {
                topic: topic.name.to_string(),
                mean: mean(vs),
                stdev: sample_stdev(vs),
                total: vs.iter().sum(),
                size: vs.len(),
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Per-topic value lists collected from the citation network. A
/// multi-label node contributes to every topic it carries.
#[derive(Debug, Clone)]
pub struct CitationProperties {
    pub outdegree: Vec<Vec<f64>>,
    pub indegree: Vec<Vec<f64>>,
    pub authors_per_paper: Vec<Vec<f64>>,
}

pub fn citation_properties(graph: &CitationGraph, taxonomy: &Taxonomy) -> CitationProperties {
    let n = taxonomy.len();
    let mut props = CitationProperties {
        outdegree: vec![Vec::new(); n],
        indegree: vec![Vec::new(); n],
        authors_per_paper: vec![Vec::new(); n],
    };

    for id in graph.node_ids_sorted() {
        let Some(data) = graph.node(id) else {
            continue;
        };
        let Some(primary) = data.primary.as_ref() else {
            continue;
        };
        for topic in primary.topics() {
            props.outdegree[topic.0].push(graph.out_degree(id) as f64);
            props.indegree[topic.0].push(graph.in_degree(id) as f64);
            props.authors_per_paper[topic.0].push(data.author_count as f64);
        }
    }

    props
}

/// Per-topic value lists collected from the co-authorship network
#[derive(Debug, Clone)]
pub struct CoauthorProperties {
    pub degree: Vec<Vec<f64>>,
    pub papers_per_author: Vec<Vec<f64>>,
}

pub fn coauthor_properties(graph: &CoauthorGraph, taxonomy: &Taxonomy) -> CoauthorProperties {
    let n = taxonomy.len();
    let mut props = CoauthorProperties {
        degree: vec![Vec::new(); n],
        papers_per_author: vec![Vec::new(); n],
    };

    for id in graph.node_ids_sorted() {
        let Some(data) = graph.node(id) else {
            continue;
        };
        for &topic in &data.topics {
            props.degree[topic.0].push(graph.degree(id) as f64);
            props.papers_per_author[topic.0].push(data.papers_published as f64);
        }
    }

    props
}

/// Flat summary of one graph property (edge weights, degrees)
#[derive(Debug, Clone, Serialize)]
pub struct PropertySummary {
    pub max: f64,
    pub mean: f64,
    pub stdev: f64,
    pub mode: f64,
    pub mode_share: f64,
}

/// Summarize a flat list of property values. Mode ties resolve to the
/// smallest value.
pub fn summarize_property(values: &[f64]) -> PropertySummary {
    if values.is_empty() {
        return PropertySummary {
            max: 0.0,
            mean: 0.0,
            stdev: 0.0,
            mode: 0.0,
            mode_share: 0.0,
        };
    }

    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v.to_bits()).or_insert(0) += 1;
    }
    let (mode, mode_share) = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(&bits, &count)| (f64::from_bits(bits), count as f64 / values.len() as f64))
        .unwrap_or((0.0, 0.0));

    PropertySummary {
        max: values.iter().copied().fold(f64::MIN, f64::max),
        mean: mean(values),
        stdev: sample_stdev(values),
        mode,
        mode_share,
    }
}

/// Equal-width histogram over a fixed range; values outside are dropped
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<u64>,
}

pub fn histogram(values: impl IntoIterator<Item = f64>, bins: usize, range: (f64, f64)) -> Histogram {
    let (lo, hi) = range;
    let mut counts = vec![0u64; bins];
    let width = (hi - lo) / bins as f64;

    for v in values {
        if v < lo || v > hi || width <= 0.0 {
            continue;
        }
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram { lo, hi, counts }
}

/// Publication counts per year, per topic, over surviving works
pub fn publications_per_year(
    records: &[WorkRecord],
    graph: &CitationGraph,
    taxonomy: &Taxonomy,
) -> BTreeMap<i32, Vec<u64>> {
    use chrono::Datelike;

    let n = taxonomy.len();
    let mut years: BTreeMap<i32, Vec<u64>> = BTreeMap::new();

    for record in records {
        let Some(date) = record.publication_date else {
            continue;
        };
        let Some(node) = graph.node(record.id) else {
            continue;
        };
        let Some(primary) = node.primary.as_ref() else {
            continue;
        };
        let counts = years.entry(date.year()).or_insert_with(|| vec![0; n]);
        for topic in primary.topics() {
            counts[topic.0] += 1;
        }
    }

    years
}

/// Per-group topic shares plus group sizes for one partition
#[derive(Debug, Clone, Serialize)]
pub struct PartitionSummary {
    pub group_sizes: Vec<usize>,
    /// Row per group, column per topic: share of members carrying it
    pub composition: Vec<Vec<f64>>,
}

pub fn partition_summary(
    partition: &Partition<i64>,
    graph: &CoauthorGraph,
    taxonomy: &Taxonomy,
) -> PartitionSummary {
    let n = taxonomy.len();
    let sizes = partition.group_sizes();
    let mut composition = vec![vec![0.0f64; n]; partition.group_count()];

    for (author, group) in partition.iter() {
        if let Some(data) = graph.node(author) {
            for &topic in &data.topics {
                composition[group][topic.0] += 1.0;
            }
        }
    }
    for (group, row) in composition.iter_mut().enumerate() {
        if sizes[group] > 0 {
            for share in row.iter_mut() {
                *share /= sizes[group] as f64;
            }
        }
    }

    PartitionSummary {
        group_sizes: sizes,
        composition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::connected_components;
    use crate::labels::Labeler;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn record(id: i64, title: &str, cited: &[&str], authors: &[i64], year: i32) -> WorkRecord {
        WorkRecord {
            id,
            external_id: format!("W{id}"),
            title: title.to_string(),
            concepts: Vec::new(),
            cited_ids: cited.iter().map(|s| s.to_string()).collect(),
            author_ids: authors.to_vec(),
            publication_date: NaiveDate::from_ymd_opt(year, 6, 1),
        }
    }

    fn fixture() -> (Vec<WorkRecord>, CitationGraph, Taxonomy) {
        let records = vec![
            record(1, "Improved PSO for routing", &["W2"], &[10, 20], 2010),
            record(
                2,
                "Hybrid genetic algorithm and particle swarm optimization",
                &[],
                &[10],
                2012,
            ),
            record(3, "Cuckoo search algorithm survey", &["W1"], &[30], 2012),
        ];
        let taxonomy = Taxonomy::reference();
        let labeler = Labeler::new(&taxonomy);
        let mut graph = CitationGraph::build(&records, &labeler);
        graph.prune();
        (records, graph, taxonomy)
    }

    #[test]
    fn test_label_census() {
        let (_, graph, taxonomy) = fixture();
        let census = label_census(&graph, &taxonomy);

        assert_eq!(census.single, 2); // PSO paper, cuckoo paper
        assert_eq!(census.two, 1); // the hybrid
        assert_eq!(census.multi_total(), 1);
        assert_eq!(census.per_topic_total[0], 2); // PSO appears twice
        assert_eq!(census.per_topic_single[0], 1);
        assert_eq!(census.per_topic_total[4], 1); // cuckoo search
    }

    #[test]
    fn test_citation_properties_multi_label_contributes_everywhere() {
        let (_, graph, taxonomy) = fixture();
        let props = citation_properties(&graph, &taxonomy);

        // topic 0 (PSO): nodes 1 and 2
        assert_eq!(props.outdegree[0], vec![1.0, 0.0]);
        assert_eq!(props.indegree[0], vec![1.0, 1.0]);
        // topic 1 (EA): only the hybrid node 2
        assert_eq!(props.authors_per_paper[1], vec![1.0]);
    }

    #[test]
    fn test_summarize_per_topic() {
        let taxonomy = Taxonomy::reference();
        let mut values = vec![Vec::new(); taxonomy.len()];
        values[0] = vec![1.0, 3.0];
        let rows = summarize_per_topic(&values, &taxonomy);

        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].mean, 2.0);
        assert!((rows[0].stdev - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(rows[0].total, 4.0);
        assert_eq!(rows[0].size, 2);
        // empty topics stay well-defined
        assert_eq!(rows[3].mean, 0.0);
        assert_eq!(rows[3].stdev, 0.0);
        assert_eq!(rows[3].size, 0);
    }

    #[test]
    fn test_summarize_property_mode() {
        let summary = summarize_property(&[1.0, 2.0, 2.0, 5.0]);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.mode, 2.0);
        assert_eq!(summary.mode_share, 0.5);
    }

    #[test]
    fn test_histogram_binning() {
        let h = histogram(vec![0.0, 0.5, 1.0, 7.5, 8.0, 9.0], 8, (0.0, 8.0));
        assert_eq!(h.counts.len(), 8);
        assert_eq!(h.counts[0], 2); // 0.0 and 0.5
        assert_eq!(h.counts[1], 1); // 1.0
        assert_eq!(h.counts[7], 2); // 7.5 and the right edge 8.0
        let total: u64 = h.counts.iter().sum();
        assert_eq!(total, 5); // 9.0 is out of range
    }

    #[test]
    fn test_histogram_with_negative_range() {
        let h = histogram(vec![-0.5, -0.25, 0.25, 0.5], 4, (-0.5, 0.5));
        assert_eq!(h.counts, vec![1, 1, 0, 2]);
    }

    #[test]
    fn test_publications_per_year() {
        let (records, graph, taxonomy) = fixture();
        let years = publications_per_year(&records, &graph, &taxonomy);

        assert_eq!(years[&2010][0], 1);
        // 2012: hybrid carries PSO and EA, survey carries cuckoo
        assert_eq!(years[&2012][0], 1);
        assert_eq!(years[&2012][1], 1);
        assert_eq!(years[&2012][4], 1);
    }

    #[test]
    fn test_partition_summary_composition() {
        let (records, citation, taxonomy) = fixture();
        let alt: HashMap<i64, i64> = [(10, 10), (20, 20), (30, 30)].into_iter().collect();
        let coauthor = CoauthorGraph::build(&records, &citation, &alt).unwrap();

        let nodes = coauthor.node_ids_sorted();
        let components =
            connected_components(&nodes, coauthor.edges().map(|(pair, _)| pair));
        let partition = Partition::from_components(&components);
        let summary = partition_summary(&partition, &coauthor, &taxonomy);

        assert_eq!(summary.group_sizes.iter().sum::<usize>(), 3);
        // group 0 is the {10, 20} component; both carry PSO
        assert_eq!(summary.composition[0][0], 1.0);
    }
}
