use config::{is_missing, QcError, GZ_EXT};
use csv::StringRecord;
use flate2::read::MultiGzDecoder;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// open a plain or gzip-compressed table
pub fn open_table(path: &Path) -> Result<Box<dyn Read>, QcError> {
    let file = BufReader::new(File::open(path)?);

    match path.extension() {
        Some(ext) if ext == GZ_EXT => Ok(Box::new(MultiGzDecoder::new(file))),
        _ => Ok(Box::new(file)),
    }
}

/// map a csv failure onto the run taxonomy, keeping the line number
pub fn from_csv(err: csv::Error) -> QcError {
    let line = err.position().map(|pos| pos.line()).unwrap_or_default();
    let message = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(e) => QcError::Io(e),
        _ => QcError::Parse { line, message },
    }
}

/// text cell; absent trailing fields and NA tokens are missing
#[inline(always)]
pub fn text_field(row: &StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .filter(|field| !is_missing(field))
        .map(|field| field.trim().to_string())
}

/// numeric cell; anything non-missing must parse to a finite float
pub fn numeric_field(
    row: &StringRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<Option<f64>, QcError> {
    let field = match row.get(idx).map(str::trim) {
        Some(field) if !is_missing(field) => field,
        _ => return Ok(None),
    };

    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(QcError::Parse {
            line,
            message: format!("invalid numeric value {:?} in column '{}'", field, column),
        }),
    }
}
