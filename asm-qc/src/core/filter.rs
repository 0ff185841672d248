use log::info;

use crate::core::load::GenomeRecord;

/// drop rows whose metadata fields are all missing
pub fn filter_metadata(records: Vec<GenomeRecord>) -> Vec<GenomeRecord> {
    let before = records.len();
    let kept: Vec<GenomeRecord> = records
        .into_iter()
        .filter(GenomeRecord::has_metadata)
        .collect();

    info!(
        "Metadata filter: dropped {} of {} records without metadata",
        before - kept.len(),
        before
    );

    kept
}

/// completeness above and contamination below their thresholds; missing values pass
#[inline(always)]
pub fn passes_checkm(record: &GenomeRecord, completeness: f64, contamination: f64) -> bool {
    let complete = record.completeness.map_or(true, |value| value > completeness);
    let clean = record.contamination.map_or(true, |value| value < contamination);

    complete && clean
}

/// drop rows failing the CheckM thresholds
pub fn filter_quality(
    records: Vec<GenomeRecord>,
    completeness: f64,
    contamination: f64,
) -> Vec<GenomeRecord> {
    let before = records.len();
    let kept: Vec<GenomeRecord> = records
        .into_iter()
        .filter(|record| passes_checkm(record, completeness, contamination))
        .collect();

    info!(
        "CheckM filter: dropped {} of {} records [completeness > {}, contamination < {}]",
        before - kept.len(),
        before,
        completeness,
        contamination
    );

    kept
}
