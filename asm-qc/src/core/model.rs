use config::{QcError, Removal, BP_PER_KBP, CDS, GENOME_ID, MIN_FIT_POINTS, SIZE};
use log::info;
use serde::Serialize;

use crate::core::load::GenomeRecord;

/// degree-1 least squares fit: CDS = slope * lengthkbp + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Closed-form ordinary least squares over centred sums
    ///
    /// Fails with `InsufficientData` when fewer than two points are given or
    /// when every point shares the same x, since the slope is undefined then.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, QcError> {
        if points.len() < MIN_FIT_POINTS {
            return Err(QcError::InsufficientData(format!(
                "at least {} records are required to fit the CDS model, got {}",
                MIN_FIT_POINTS,
                points.len()
            )));
        }

        let n = points.len() as f64;
        let (sum_x, sum_y) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
        let (mean_x, mean_y) = (sum_x / n, sum_y / n);

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), &(x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

        if sxx == 0.0 {
            return Err(QcError::InsufficientData(
                "all records share the same genome length; the CDS model is undefined".to_string(),
            ));
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    #[inline(always)]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// legend label, e.g. y=0.950x+12.3 or y=0.950x-12.3
    pub fn equation(&self) -> String {
        let sign = if self.intercept < 0.0 { '-' } else { '+' };
        format!("y={:.3}x{}{:.1}", self.slope, sign, self.intercept.abs())
    }
}

/// a filtered genome ready for the model
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub genome_id: String,
    pub lengthkbp: f64,
    pub cds: f64,
}

impl TryFrom<GenomeRecord> for Observation {
    type Error = QcError;

    fn try_from(record: GenomeRecord) -> Result<Self, Self::Error> {
        let line = record.line;
        let genome_id = record.genome_id.ok_or_else(|| QcError::MissingValue {
            genome_id: String::new(),
            column: GENOME_ID.to_string(),
            line,
        })?;

        let missing = |column: &str| QcError::MissingValue {
            genome_id: genome_id.clone(),
            column: column.to_string(),
            line,
        };
        let size = record.size.ok_or_else(|| missing(SIZE))?;
        let cds = record.cds.ok_or_else(|| missing(CDS))?;

        Ok(Self {
            genome_id,
            lengthkbp: size / BP_PER_KBP,
            cds,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRecord {
    pub genome_id: String,
    pub lengthkbp: f64,
    pub cds: f64,
    pub predicted: f64,
    pub error: f64,
    pub remove: Removal,
}

/// fit over every observation
pub fn fit_observations(observations: &[Observation]) -> Result<LinearFit, QcError> {
    let points: Vec<(f64, f64)> = observations
        .iter()
        .map(|obs| (obs.lengthkbp, obs.cds))
        .collect();

    LinearFit::fit(&points)
}

/// tag each observation against a shared fit
pub fn annotate(
    observations: Vec<Observation>,
    fit: &LinearFit,
    error_threshold: f64,
) -> Vec<AnnotatedRecord> {
    observations
        .into_iter()
        .map(|obs| {
            let predicted = fit.predict(obs.lengthkbp);
            let error = (obs.cds - predicted).abs();

            AnnotatedRecord {
                genome_id: obs.genome_id,
                lengthkbp: obs.lengthkbp,
                cds: obs.cds,
                predicted,
                error,
                remove: Removal::from_error(error, error_threshold),
            }
        })
        .collect()
}

/// Fit the length/CDS line once over the filtered set and flag outliers
///
/// # Parameters
///
/// - `records`: genomes that passed both row filters
/// - `error_threshold`: absolute CDS deviation above which a genome is removed
///
/// # Returns
///
/// - The shared fit and every record annotated with `predicted`, `error`
///   and `remove`, in input order.
pub fn detect_outliers(
    records: Vec<GenomeRecord>,
    error_threshold: f64,
) -> Result<(LinearFit, Vec<AnnotatedRecord>), QcError> {
    let observations = records
        .into_iter()
        .map(Observation::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let fit = fit_observations(&observations)?;
    info!("CDS model: {} over {} records", fit.equation(), observations.len());

    let annotated = annotate(observations, &fit, error_threshold);
    let removed = annotated
        .iter()
        .filter(|r| r.remove == Removal::Yes)
        .count();

    info!(
        "Outlier model: flagged {} of {} records [error > {}]",
        removed,
        annotated.len(),
        error_threshold
    );

    Ok((fit, annotated))
}
