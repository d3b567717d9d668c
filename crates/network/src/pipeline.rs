//! The analysis pipeline
//!
//! One linear pass per run: records in, labeled pruned citation network,
//! cross-tab tables, co-authorship network, statistics, report out.
//! No state survives between runs; identical records produce an
//! identical report apart from the run id and timestamp.

use crate::crosstab::CrossTab;
use crate::errors::Result;
use crate::graph::{connected_components, CitationGraph, CoauthorGraph, Partition};
use crate::labels::{LabelSpace, Labeler, Taxonomy};
use crate::records::WorkRecord;
use crate::report::{CitationTables, CoauthorTables, GraphSummary, RunReport};
use crate::stats;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

/// Histogram shapes for the proportion matrices
const PROPORTION_BINS: usize = 16;
const PROPORTION_RANGE: (f64, f64) = (0.0, 0.8);
const DIFFERENCE_BINS: usize = 20;
const DIFFERENCE_RANGE: (f64, f64) = (-0.5, 0.5);

/// Run the full analysis over one snapshot of records.
///
/// `alt_ids` maps every author id appearing in the records to its
/// canonical id (the filtering pass's output).
#[instrument(skip_all, fields(records = records.len()))]
pub fn analyze(records: &[WorkRecord], alt_ids: &HashMap<i64, i64>) -> Result<RunReport> {
    let taxonomy = Taxonomy::reference();
    let labeler = Labeler::new(&taxonomy);
    let space = LabelSpace::build(&taxonomy);

    let mut citation = CitationGraph::build(records, &labeler);
    citation.prune();
    info!(
        nodes = citation.node_count(),
        edges = citation.edge_count(),
        "citation network built"
    );

    let crosstab = CrossTab::tabulate(&citation, &space)?;
    let outgoing_proportions = crosstab.outgoing_proportions();
    let incoming_proportions = crosstab.incoming_proportions();
    let proportion_difference = crosstab.proportion_difference();

    let coauthor = CoauthorGraph::build(records, &citation, alt_ids)?;
    info!(
        nodes = coauthor.node_count(),
        edges = coauthor.edge_count(),
        "co-authorship network built"
    );

    let census = stats::label_census(&citation, &taxonomy);
    let cit_props = stats::citation_properties(&citation, &taxonomy);
    let co_props = stats::coauthor_properties(&coauthor, &taxonomy);
    let edge_weights: Vec<f64> = coauthor.edges().map(|(_, w)| w as f64).collect();

    let coauthor_nodes = coauthor.node_ids_sorted();
    let components =
        connected_components(&coauthor_nodes, coauthor.edges().map(|(pair, _)| pair));
    let partition = Partition::from_components(&components);
    info!(groups = partition.group_count(), "co-authorship partition");

    let report = RunReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        citation: GraphSummary {
            nodes: citation.node_count(),
            edges: citation.edge_count(),
        },
        coauthorship: GraphSummary {
            nodes: coauthor.node_count(),
            edges: coauthor.edge_count(),
        },
        slot_labels: space.abbrevs().to_vec(),
        outgoing_histogram: stats::histogram(
            outgoing_proportions.iter().flatten().copied(),
            PROPORTION_BINS,
            PROPORTION_RANGE,
        ),
        incoming_histogram: stats::histogram(
            incoming_proportions.iter().flatten().copied(),
            PROPORTION_BINS,
            PROPORTION_RANGE,
        ),
        difference_histogram: stats::histogram(
            proportion_difference.iter().flatten().copied(),
            DIFFERENCE_BINS,
            DIFFERENCE_RANGE,
        ),
        outgoing_proportions,
        incoming_proportions,
        proportion_difference,
        crosstab,
        label_census: census,
        citation_tables: CitationTables {
            outdegree: stats::summarize_per_topic(&cit_props.outdegree, &taxonomy),
            indegree: stats::summarize_per_topic(&cit_props.indegree, &taxonomy),
            authors_per_paper: stats::summarize_per_topic(&cit_props.authors_per_paper, &taxonomy),
        },
        coauthor_tables: CoauthorTables {
            degree: stats::summarize_per_topic(&co_props.degree, &taxonomy),
            papers_per_author: stats::summarize_per_topic(&co_props.papers_per_author, &taxonomy),
            edge_weight: stats::summarize_property(&edge_weights),
        },
        publications_per_year: stats::publications_per_year(records, &citation, &taxonomy),
        partition: stats::partition_summary(&partition, &coauthor, &taxonomy),
    };

    Ok(report)
}
