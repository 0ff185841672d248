use clap::{ArgAction, Parser};
use config::{
    ArgCheck, Thresholds, COMPLETENESS_THRESHOLD, CONTAMINATION_THRESHOLD, ERROR_THRESHOLD,
    GOOD_IDS, INPUT_CSV, METADATA_COLUMNS, PLOT_PNG, PLOT_SVG,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "asm-qc")]
#[command(about = "asm-qc: quality-control filter for bacterial genome assembly tables")]
#[command(version = config::VERSION)]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        default_value = INPUT_CSV,
        help = "Path to ;-separated genome table [.csv or .csv.gz]"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = GOOD_IDS,
        help = "Path to write the IDs of genomes passing every filter"
    )]
    pub output: PathBuf,

    #[arg(
        long = "png",
        value_name = "PATH",
        default_value = PLOT_PNG,
        help = "Path to the raster rendering of the regression plot"
    )]
    pub png: PathBuf,

    #[arg(
        long = "svg",
        value_name = "PATH",
        default_value = PLOT_SVG,
        help = "Path to the vector rendering of the regression plot"
    )]
    pub svg: PathBuf,

    #[arg(
        short = 'm',
        long = "metadata",
        value_name = "COLUMNS",
        value_delimiter = ',',
        num_args = 1..,
        default_values = METADATA_COLUMNS,
        help = "Metadata columns; a genome needs at least one of them filled"
    )]
    pub metadata: Vec<String>,

    #[arg(
        short = 'c',
        long = "completeness",
        value_name = "PERCENT",
        default_value_t = COMPLETENESS_THRESHOLD,
        action = ArgAction::Set,
        help = "Minimum CheckM completeness [exclusive]"
    )]
    pub completeness: f64,

    #[arg(
        short = 'x',
        long = "contamination",
        value_name = "PERCENT",
        default_value_t = CONTAMINATION_THRESHOLD,
        action = ArgAction::Set,
        help = "Maximum CheckM contamination [exclusive]"
    )]
    pub contamination: f64,

    #[arg(
        short = 'e',
        long = "error",
        value_name = "CDS",
        default_value_t = ERROR_THRESHOLD,
        action = ArgAction::Set,
        help = "Maximum absolute CDS deviation from the fitted line"
    )]
    pub error: f64,

    #[arg(
        short = 's',
        long = "summary",
        required = false,
        value_name = "PATH",
        help = "Optional path to a JSON run summary"
    )]
    pub summary: Option<PathBuf>,

    #[arg(
        long = "no-plot",
        help = "Flag to skip rendering the regression plot",
        value_name = "FLAG",
        default_missing_value("true"),
        default_value("false"),
        num_args(0..=1),
        require_equals(true),
        action = ArgAction::Set,
    )]
    pub no_plot: bool,
}

impl Args {
    pub fn from(args: Vec<String>) -> Self {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::parse_from(full_args)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            completeness: self.completeness,
            contamination: self.contamination,
            error: self.error,
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Args::from(Vec::new())
    }
}

impl ArgCheck for Args {
    fn get_input(&self) -> &PathBuf {
        &self.input
    }

    fn get_metadata(&self) -> &Vec<String> {
        &self.metadata
    }

    fn get_thresholds(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("completeness", self.completeness),
            ("contamination", self.contamination),
            ("error", self.error),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ErrorKind;

    #[test]
    fn test_defaults_match_constants() {
        let args = Args::default();

        assert_eq!(args.input, PathBuf::from(INPUT_CSV));
        assert_eq!(args.output, PathBuf::from(GOOD_IDS));
        assert_eq!(args.png, PathBuf::from(PLOT_PNG));
        assert_eq!(args.svg, PathBuf::from(PLOT_SVG));
        assert_eq!(args.metadata, METADATA_COLUMNS.map(String::from).to_vec());
        assert_eq!(args.thresholds(), Thresholds::default());
        assert!(args.summary.is_none());
        assert!(!args.no_plot);
    }

    #[test]
    fn test_overrides() {
        let args = Args::from(
            [
                "-i",
                "genomes.csv.gz",
                "--metadata",
                "Host Name,Isolation Source",
                "-c",
                "95",
                "-e",
                "250.5",
                "--no-plot",
            ]
            .map(String::from)
            .to_vec(),
        );

        assert_eq!(args.input, PathBuf::from("genomes.csv.gz"));
        assert_eq!(args.metadata, vec!["Host Name", "Isolation Source"]);
        assert_eq!(args.completeness, 95.0);
        assert_eq!(args.contamination, CONTAMINATION_THRESHOLD);
        assert_eq!(args.error, 250.5);
        assert!(args.no_plot);
    }

    #[test]
    fn test_check_rejects_non_finite_thresholds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Genome ID\n").unwrap();

        let mut args = Args::default();
        args.input = file.path().to_path_buf();
        assert!(args.check().is_ok());

        args.error = f64::NAN;
        assert_eq!(args.check().unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_check_missing_input() {
        let mut args = Args::default();
        args.input = PathBuf::from("/definitely/not/here.csv");

        assert_eq!(args.check().unwrap_err().kind(), ErrorKind::FileNotFound);
    }
}
