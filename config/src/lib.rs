//! Universal constants, error taxonomy and writers shared by the asm-qc tools.
//!
//! Every fixed value the quality-control run depends on lives here: default
//! file names, the column names of the genome table and the three policy
//! thresholds. The tool crate exposes them as CLI defaults so a run can be
//! reconfigured without touching pipeline logic.

pub mod fns;
pub mod mods;

pub use fns::*;
pub use mods::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// numeric values
pub const COMPLETENESS_THRESHOLD: f64 = 90.0; // %
pub const CONTAMINATION_THRESHOLD: f64 = 5.0; // %
pub const ERROR_THRESHOLD: f64 = 500.0; // CDS
pub const BP_PER_KBP: f64 = 1000.0;
pub const MIN_FIT_POINTS: usize = 2;

// figure geometry [inches, dpi]
pub const FIGURE_SIZE: (f64, f64) = (18.5, 10.5);
pub const FIGURE_DPI: f64 = 100.0;

// file names
pub const INPUT_CSV: &str = "20240307_Salmonella_genomes.csv";
pub const GOOD_IDS: &str = "GOODSALMONELLA1.txt";
pub const PLOT_PNG: &str = "CDSLinear_Contam.png";
pub const PLOT_SVG: &str = "CDSLinear_Contam.svg";

// table layout
pub const FIELD_SEP: u8 = b';';
pub const GZ_EXT: &str = "gz";

// columns
pub const GENOME_ID: &str = "Genome ID";
pub const ISOLATION_SOURCE: &str = "Isolation Source";
pub const ISOLATION_COMMENTS: &str = "Isolation Comments";
pub const HOST_NAME: &str = "Host Name";
pub const HOST_COMMON_NAME: &str = "Host Common Name";
pub const CHECKM_COMPLETENESS: &str = "CheckM Completeness";
pub const CHECKM_CONTAMINATION: &str = "CheckM Contamination";
pub const SIZE: &str = "Size";
pub const CDS: &str = "CDS";

pub const METADATA_COLUMNS: [&str; 4] = [
    ISOLATION_SOURCE,
    ISOLATION_COMMENTS,
    HOST_NAME,
    HOST_COMMON_NAME,
];

/// columns every stage after loading dereferences
pub const REQUIRED_COLUMNS: [&str; 5] = [
    GENOME_ID,
    CHECKM_COMPLETENESS,
    CHECKM_CONTAMINATION,
    SIZE,
    CDS,
];

// cells read as missing values [compared after trimming]
pub const NA_VALUES: [&str; 19] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN",
];
