//! Quality-control filter for bacterial genome assembly tables
//!
//! Reads a ;-separated genome table, drops genomes without metadata or with
//! poor CheckM scores, flags CDS-count outliers against a length/CDS line,
//! draws the fit and writes the IDs that survive every filter.

use clap::Parser;
use config::ArgCheck;
use log::{error, info, Level};
use simple_logger::init_with_level;

use asm_qc::{cli::Args, core::run_qc};

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).expect("ERROR: failed to initialize logger");

    let args: Args = Args::parse();
    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    run_qc(&args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
