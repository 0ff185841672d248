//! Core module for quality-control filtering of genome assembly tables
//!
//! This crate contains the pipeline that narrows a ;-separated table of
//! bacterial genome assemblies down to the genomes worth keeping.
//!
//! In short, genomes lacking every isolation/host metadata field are dropped,
//! then genomes failing the CheckM completeness/contamination thresholds. The
//! survivors feed a least squares line of CDS count against genome length and
//! genomes deviating too far from it are flagged. A diagnostic plot is drawn
//! and the IDs of the remaining genomes are written one per line.

pub mod cli;
pub mod core;
pub mod utils;

pub use crate::core::{run_qc, QcReport};

use config::{ArgCheck, QcError};

/// run the filter from a raw argument list [without the binary name]
pub fn lib_asm_qc(args: Vec<String>) -> Result<QcReport, QcError> {
    let args = cli::Args::from(args);
    args.check()?;

    run_qc(&args)
}
