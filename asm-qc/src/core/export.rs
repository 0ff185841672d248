use config::{write_collection, write_descriptor, QcError, Removal, Thresholds};
use hashbrown::HashSet;
use log::{info, warn};
use serde::Serialize;

use std::path::{Path, PathBuf};

use crate::core::model::{AnnotatedRecord, LinearFit};

/// run descriptor written as JSON next to the ID list
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: &'static str,
    pub input: PathBuf,
    pub thresholds: Thresholds,
    pub records_loaded: usize,
    pub records_with_metadata: usize,
    pub records_passing_checkm: usize,
    pub fit: LinearFit,
    pub kept: usize,
    pub removed: usize,
    pub removed_ids: Vec<String>,
    pub records: Vec<AnnotatedRecord>,
}

/// IDs tagged Remove=No, in row order, each written once
pub fn kept_ids(records: &[AnnotatedRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();

    records
        .iter()
        .filter(|r| r.remove == Removal::No)
        .map(|r| r.genome_id.as_str())
        .filter(|id| {
            let fresh = seen.insert(*id);
            if !fresh {
                warn!("Genome ID {} appears more than once; writing it once", id);
            }
            fresh
        })
        .collect()
}

/// IDs tagged Remove=Yes, in row order
pub fn removed_ids(records: &[AnnotatedRecord]) -> Vec<&str> {
    records
        .iter()
        .filter(|r| r.remove == Removal::Yes)
        .map(|r| r.genome_id.as_str())
        .collect()
}

/// write the surviving IDs, one per line, no header
pub fn export_ids(records: &[AnnotatedRecord], path: &Path) -> Result<usize, QcError> {
    let ids = kept_ids(records);
    write_collection(&ids, path)?;

    info!("Valid IDs saved to {}", path.display());
    Ok(ids.len())
}

pub fn export_summary(summary: &RunSummary, path: &Path) -> Result<(), QcError> {
    write_descriptor(summary, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated(id: &str, remove: Removal) -> AnnotatedRecord {
        AnnotatedRecord {
            genome_id: id.to_string(),
            lengthkbp: 4800.0,
            cds: 4500.0,
            predicted: 4500.0,
            error: 0.0,
            remove,
        }
    }

    #[test]
    fn test_export_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("good.txt");

        let records = vec![
            annotated("28901.1", Removal::No),
            annotated("28901.2", Removal::Yes),
            annotated("28901.3", Removal::No),
        ];

        let n = export_ids(&records, &path).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "28901.1\n28901.3\n"
        );
        assert_eq!(removed_ids(&records), vec!["28901.2"]);
    }

    #[test]
    fn test_ids_are_written_once() {
        let records = vec![
            annotated("a", Removal::No),
            annotated("b", Removal::No),
            annotated("a", Removal::No),
        ];

        assert_eq!(kept_ids(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_export_nothing_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("good.txt");

        let records = vec![annotated("x", Removal::Yes)];
        assert_eq!(export_ids(&records, &path).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_summary_carries_fit_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        let records = vec![annotated("28901.1", Removal::No), {
            let mut r = annotated("28901.2", Removal::Yes);
            r.cds = 5200.0;
            r.error = 700.0;
            r
        }];
        let summary = RunSummary {
            version: config::VERSION,
            input: PathBuf::from("genomes.csv"),
            thresholds: Thresholds::default(),
            records_loaded: 4,
            records_with_metadata: 3,
            records_passing_checkm: 2,
            fit: LinearFit {
                slope: 0.95,
                intercept: -60.0,
            },
            kept: 1,
            removed: 1,
            removed_ids: removed_ids(&records).into_iter().map(String::from).collect(),
            records,
        };
        export_summary(&summary, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["thresholds"]["error"], 500.0);
        assert_eq!(value["fit"]["slope"], 0.95);
        assert_eq!(value["fit"]["intercept"], -60.0);
        assert_eq!(value["removed_ids"][0], "28901.2");
        assert_eq!(value["records"][0]["remove"], "No");
        assert_eq!(value["records"][1]["remove"], "Yes");
        assert_eq!(value["records"][1]["predicted"], 4500.0);
        assert_eq!(value["records"][1]["error"], 700.0);
    }
}
