use config::{
    validate, QcError, CDS, CHECKM_COMPLETENESS, CHECKM_CONTAMINATION, FIELD_SEP, GENOME_ID,
    REQUIRED_COLUMNS, SIZE,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use hashbrown::{HashMap, HashSet};
use log::{info, warn};

use std::path::Path;

use crate::utils::{from_csv, numeric_field, open_table, text_field};

/// one genome assembly row
#[derive(Debug, Clone, PartialEq)]
pub struct GenomeRecord {
    pub line: u64,
    pub genome_id: Option<String>,
    pub metadata: Vec<Option<String>>,
    pub completeness: Option<f64>,
    pub contamination: Option<f64>,
    pub size: Option<f64>,
    pub cds: Option<f64>,
}

impl GenomeRecord {
    pub fn has_metadata(&self) -> bool {
        self.metadata.iter().any(Option::is_some)
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<GenomeRecord>,
}

/// header positions of every column the run reads
#[derive(Debug)]
struct ColumnIndex {
    genome_id: usize,
    metadata: Vec<usize>,
    completeness: usize,
    contamination: usize,
    size: usize,
    cds: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, metadata: &[String]) -> Result<Self, QcError> {
        let mut lookup: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            lookup.entry(name).or_insert(idx);
        }

        let missing: Vec<String> = metadata
            .iter()
            .map(String::as_str)
            .chain(REQUIRED_COLUMNS)
            .filter(|column| !lookup.contains_key(column))
            .map(String::from)
            .collect();

        if !missing.is_empty() {
            return Err(QcError::MissingColumns(missing));
        }

        Ok(Self {
            genome_id: lookup[GENOME_ID],
            metadata: metadata.iter().map(|c| lookup[c.as_str()]).collect(),
            completeness: lookup[CHECKM_COMPLETENESS],
            contamination: lookup[CHECKM_CONTAMINATION],
            size: lookup[SIZE],
            cds: lookup[CDS],
        })
    }

    fn parse(&self, row: &StringRecord, line: u64) -> Result<GenomeRecord, QcError> {
        Ok(GenomeRecord {
            line,
            genome_id: text_field(row, self.genome_id),
            metadata: self
                .metadata
                .iter()
                .map(|&idx| text_field(row, idx))
                .collect(),
            completeness: numeric_field(row, self.completeness, CHECKM_COMPLETENESS, line)?,
            contamination: numeric_field(row, self.contamination, CHECKM_CONTAMINATION, line)?,
            size: numeric_field(row, self.size, SIZE, line)?,
            cds: numeric_field(row, self.cds, CDS, line)?,
        })
    }
}

/// Load a ;-separated genome table
///
/// # Parameters
///
/// - `path`: table to read, plain or gzip-compressed [.gz]
/// - `metadata`: metadata columns that must be present in the header
///
/// # Returns
///
/// - The detected header and one `GenomeRecord` per data row, in input order.
///   Fails with `FileNotFound`, `MissingColumns` naming every absent column,
///   or `Parse` on malformed rows and non-numeric quality/size/CDS cells.
pub fn load_table(path: &Path, metadata: &[String]) -> Result<Table, QcError> {
    validate(path)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_SEP)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(open_table(path)?);

    let headers = reader.headers().map_err(from_csv)?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(QcError::Parse {
            line: 1,
            message: "no header row found".to_string(),
        });
    }

    let columns: Vec<String> = headers.iter().map(String::from).collect();
    info!("Detected columns: {:?}", columns);

    let index = ColumnIndex::resolve(&headers, metadata)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for row in reader.records() {
        let row = row.map_err(from_csv)?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();

        // INFO: short rows are padded with missing values, long ones are malformed
        if row.len() > headers.len() {
            return Err(QcError::Parse {
                line,
                message: format!("expected {} fields, saw {}", headers.len(), row.len()),
            });
        }

        let record = index.parse(&row, line)?;
        if let Some(id) = &record.genome_id {
            if !seen.insert(id.clone()) {
                warn!("Duplicate genome ID {} at line {}", id, line);
            }
        }

        records.push(record);
    }

    info!("Loaded {} records from {}", records.len(), path.display());

    Ok(Table { columns, records })
}
