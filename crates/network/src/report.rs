//! Run report
//!
//! The pipeline's output contract: the cross-tab tables, the derived
//! matrices and histograms, the census and property tables, and the
//! abbreviated slot names aligned to slot index order. Written as JSON
//! for whatever renders the heatmaps, chord diagrams, and histograms.

use crate::crosstab::CrossTab;
use crate::errors::Result;
use crate::stats::{Histogram, LabelCensus, PartitionSummary, PropertySummary, SummaryRow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitationTables {
    pub outdegree: Vec<SummaryRow>,
    pub indegree: Vec<SummaryRow>,
    pub authors_per_paper: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoauthorTables {
    pub degree: Vec<SummaryRow>,
    pub papers_per_author: Vec<SummaryRow>,
    pub edge_weight: PropertySummary,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,

    pub citation: GraphSummary,
    pub coauthorship: GraphSummary,

    /// Abbreviated slot names; index = slot id for every table below
    pub slot_labels: Vec<String>,
    pub crosstab: CrossTab,
    pub outgoing_proportions: Vec<Vec<f64>>,
    pub incoming_proportions: Vec<Vec<f64>>,
    pub proportion_difference: Vec<Vec<f64>>,
    pub outgoing_histogram: Histogram,
    pub incoming_histogram: Histogram,
    pub difference_histogram: Histogram,

    pub label_census: LabelCensus,
    pub citation_tables: CitationTables,
    pub coauthor_tables: CoauthorTables,
    /// Per year, per elementary topic
    pub publications_per_year: BTreeMap<i32, Vec<u64>>,
    pub partition: PartitionSummary,
}

impl RunReport {
    /// Write the report as pretty JSON; returns the file path
    pub fn write_to(&self, dir: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = Path::new(dir).join(format!("network-report-{}.json", self.run_id));
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(path)
    }
}
