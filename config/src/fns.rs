use serde::Serialize;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{QcError, NA_VALUES};

/// argument checker for every tool in the workspace
pub trait ArgCheck {
    fn check(&self) -> Result<(), QcError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), QcError> {
        validate(self.get_input())?;
        self.check_columns()?;
        self.check_thresholds()?;

        Ok(())
    }

    fn check_columns(&self) -> Result<(), QcError> {
        let columns = self.get_metadata();
        if columns.is_empty() {
            let err = "No metadata columns provided".to_string();
            return Err(QcError::InvalidInput(err));
        }

        if let Some(blank) = columns.iter().find(|c| c.trim().is_empty()) {
            return Err(QcError::InvalidInput(format!(
                "blank metadata column name: {:?}",
                blank
            )));
        }

        Ok(())
    }

    fn check_thresholds(&self) -> Result<(), QcError> {
        for (name, value) in self.get_thresholds() {
            if !value.is_finite() {
                return Err(QcError::InvalidInput(format!(
                    "{} threshold must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    fn get_input(&self) -> &PathBuf;
    fn get_metadata(&self) -> &Vec<String>;
    fn get_thresholds(&self) -> Vec<(&'static str, f64)>;
}

/// input validation
pub fn validate(arg: &Path) -> Result<(), QcError> {
    if !arg.is_file() {
        return Err(QcError::FileNotFound(arg.to_path_buf()));
    }

    Ok(())
}

/// true when a cell carries no value
#[inline(always)]
pub fn is_missing(field: &str) -> bool {
    NA_VALUES.contains(&field.trim())
}

/// write any collection to a file, one item per line
pub fn write_collection<T: AsRef<str>>(data: &[T], fname: &Path) -> Result<(), QcError> {
    log::info!("IDs in {}: {:?}. Writing...", fname.display(), data.len());
    let mut writer = BufWriter::new(File::create(fname)?);

    for line in data.iter() {
        writeln!(writer, "{}", line.as_ref())?;
    }

    writer.flush()?;
    Ok(())
}

/// write a serializable descriptor as pretty JSON
pub fn write_descriptor<T: Serialize>(data: &T, fname: &Path) -> Result<(), QcError> {
    log::info!("Writing run descriptor to {}", fname.display());
    let mut writer = BufWriter::new(File::create(fname)?);

    serde_json::to_writer_pretty(&mut writer, data).map_err(std::io::Error::from)?;
    writeln!(writer)?;

    writer.flush()?;
    Ok(())
}
