//! Core module for quality-control filtering of genome assembly tables
//!
//! This module chains the five stages of a run over a single in-memory table:
//! loading, row filtering, the length/CDS outlier model, plotting and export.
//!
//! In short, genomes without any isolation/host metadata are dropped first,
//! then genomes failing the CheckM completeness/contamination thresholds. A
//! degree-1 least squares line of CDS count against genome length [kbp] is fit
//! once over the survivors and every genome whose CDS count deviates from it
//! by more than the error threshold is tagged for removal. The remaining IDs
//! are written one per line, next to a PNG and an SVG of the fit.

pub mod export;
pub mod filter;
pub mod load;
pub mod model;
pub mod plot;

use config::{QcError, Removal};
use log::info;

use crate::cli::Args;
use export::{export_ids, export_summary, removed_ids, RunSummary};
use filter::{filter_metadata, filter_quality};
use load::load_table;
use model::{detect_outliers, AnnotatedRecord, LinearFit};
use plot::{render, ImageFormat, PlotData};

/// outcome of a successful run
#[derive(Debug, Clone)]
pub struct QcReport {
    pub columns: Vec<String>,
    pub records_loaded: usize,
    pub records_with_metadata: usize,
    pub records_passing_checkm: usize,
    pub fit: LinearFit,
    pub records: Vec<AnnotatedRecord>,
    pub kept: usize,
}

impl QcReport {
    pub fn removed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.remove == Removal::Yes)
            .count()
    }

    pub fn summary(&self, args: &Args) -> RunSummary {
        RunSummary {
            version: config::VERSION,
            input: args.input.clone(),
            thresholds: args.thresholds(),
            records_loaded: self.records_loaded,
            records_with_metadata: self.records_with_metadata,
            records_passing_checkm: self.records_passing_checkm,
            fit: self.fit,
            kept: self.kept,
            removed: self.removed(),
            removed_ids: removed_ids(&self.records)
                .into_iter()
                .map(String::from)
                .collect(),
            records: self.records.clone(),
        }
    }
}

/// Run every stage once, in order
///
/// # Parameters
///
/// - `args`: paths, metadata columns and thresholds for the run
///
/// # Returns
///
/// - A `QcReport` on success. Any failure is returned as a `QcError`
///   whose `kind()` tells file, validation, parse, insufficient-data and
///   unexpected failures apart. Input is fully validated before any output
///   file is created.
pub fn run_qc(args: &Args) -> Result<QcReport, QcError> {
    info!("Running assembly QC on {}", args.input.display());

    let table = load_table(&args.input, &args.metadata)?;
    let records_loaded = table.records.len();

    let records = filter_metadata(table.records);
    let records_with_metadata = records.len();

    let records = filter_quality(records, args.completeness, args.contamination);
    let records_passing_checkm = records.len();

    let (fit, annotated) = detect_outliers(records, args.error)?;

    if args.no_plot {
        info!("Skipping plot rendering");
    } else {
        let plot = PlotData::new(&annotated, &fit)?;
        render(&plot, &args.png, ImageFormat::Png)?;
        render(&plot, &args.svg, ImageFormat::Svg)?;
    }

    let kept = export_ids(&annotated, &args.output)?;

    let report = QcReport {
        columns: table.columns,
        records_loaded,
        records_with_metadata,
        records_passing_checkm,
        fit,
        records: annotated,
        kept,
    };

    if let Some(path) = &args.summary {
        export_summary(&report.summary(args), path)?;
    }

    info!(
        "Kept {} of {} genomes [{} flagged as CDS outliers]",
        report.kept,
        report.records_loaded,
        report.removed()
    );

    Ok(report)
}
