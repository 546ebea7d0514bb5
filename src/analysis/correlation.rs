//! Relationship between PM2.5 and the meteorological factors.
//!
//! Every predictor is paired with PM2.5 over the rows where both readings are present, then
//! summarised by its Pearson coefficient and a least-squares trend line with the predictor as
//! the independent variable.

use crate::analysis::stats::{self, LinearFit};
use crate::dataset::Dataset;
use crate::error::AirQualityError;
use crate::types::variable::Variable;
use log::{debug, warn};
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Correlation of one predictor against PM2.5.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub predictor: Variable,
    /// Number of rows where both the predictor and PM2.5 were present.
    pub sample_size: usize,
    /// Pearson correlation coefficient. `NaN` when either side has zero variance.
    pub pearson_r: f64,
    /// Trend line of PM2.5 against the predictor.
    pub fit: LinearFit,
}

impl CorrelationResult {
    /// `true` when the coefficient or the trend line is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.pearson_r.is_nan() || self.fit.is_degenerate()
    }

    /// PM2.5 predicted by the trend line at predictor value `x`.
    pub fn trend_at(&self, x: f64) -> f64 {
        self.fit.predict(x)
    }
}

/// Pearson coefficient of PM2.5 against each predictor, in the order requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationTable {
    entries: Vec<(Variable, f64)>,
}

impl CorrelationTable {
    /// Collects the coefficients of already computed results, keeping their order.
    pub fn from_results(results: &[CorrelationResult]) -> Self {
        Self {
            entries: results
                .iter()
                .map(|result| (result.predictor, result.pearson_r))
                .collect(),
        }
    }

    pub fn get(&self, predictor: Variable) -> Option<f64> {
        self.entries
            .iter()
            .find(|(v, _)| *v == predictor)
            .map(|(_, r)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The predictor with the largest absolute coefficient. Undefined coefficients are ignored.
    pub fn strongest(&self) -> Option<(Variable, f64)> {
        self.iter()
            .filter(|(_, r)| !r.is_nan())
            .max_by_key(|(_, r)| OrderedFloat(r.abs()))
    }
}

/// Parses predictor column names such as `"TEMP"` or `"wspm"`.
///
/// # Errors
///
/// * [`AirQualityError::UnknownVariable`] for an unrecognised name.
/// * [`AirQualityError::InvalidPredictor`] if `PM2.5` itself is named.
pub fn parse_predictors<S: AsRef<str>>(names: &[S]) -> Result<Vec<Variable>, AirQualityError> {
    names
        .iter()
        .map(|name| {
            let variable: Variable = name.as_ref().parse()?;
            ensure_predictor(variable)?;
            Ok(variable)
        })
        .collect()
}

fn ensure_predictor(variable: Variable) -> Result<(), AirQualityError> {
    if variable.is_target() {
        return Err(AirQualityError::InvalidPredictor(variable));
    }
    Ok(())
}

/// Correlates one predictor with PM2.5 and fits the trend line.
///
/// A predictor with zero variance yields a result whose coefficient and slope are `NaN`;
/// see [`CorrelationResult::is_degenerate`].
///
/// # Errors
///
/// * [`AirQualityError::InvalidPredictor`] if `predictor` is PM2.5.
/// * [`AirQualityError::EmptyDataset`] if the dataset has no rows.
/// * [`AirQualityError::NoValues`] if no row has both readings.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pm25_analysis::{correlate, Dataset, Observation, Variable};
///
/// let day = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
/// let rows: Vec<Observation> = (0..4)
///     .map(|h| {
///         let temp = h as f64;
///         Observation::empty(day.and_hms_opt(h, 0, 0).unwrap())
///             .with(Variable::Temperature, temp)
///             .with(Variable::Pm25, 2.0 * temp + 3.0)
///     })
///     .collect();
/// let dataset = Dataset::from_observations(&rows).unwrap();
///
/// let result = correlate(&dataset, Variable::Temperature).unwrap();
/// assert!((result.pearson_r - 1.0).abs() < 1e-9);
/// assert!((result.fit.slope - 2.0).abs() < 1e-9);
/// assert!((result.fit.intercept - 3.0).abs() < 1e-9);
/// ```
pub fn correlate(
    dataset: &Dataset,
    predictor: Variable,
) -> Result<CorrelationResult, AirQualityError> {
    ensure_predictor(predictor)?;
    if dataset.is_empty() {
        return Err(AirQualityError::EmptyDataset);
    }

    let (xs, ys) = dataset.paired_values(predictor, Variable::Pm25)?;
    if xs.is_empty() {
        return Err(AirQualityError::NoValues {
            column: predictor.column_name().to_string(),
        });
    }

    let pearson_r = stats::pearson(&xs, &ys)?;
    let fit = stats::linear_regression(&xs, &ys)?;
    let result = CorrelationResult {
        predictor,
        sample_size: xs.len(),
        pearson_r,
        fit,
    };

    if result.is_degenerate() {
        warn!(
            "Correlation of {} with PM2.5 is undefined over {} samples (zero variance)",
            predictor,
            xs.len()
        );
    } else {
        debug!(
            "{} vs PM2.5: r = {:.4}, slope = {:.4}, intercept = {:.4}",
            predictor, pearson_r, fit.slope, fit.intercept
        );
    }
    Ok(result)
}

/// Runs [`correlate`] for each predictor, in order.
pub fn correlate_all(
    dataset: &Dataset,
    predictors: &[Variable],
) -> Result<Vec<CorrelationResult>, AirQualityError> {
    predictors
        .iter()
        .map(|predictor| correlate(dataset, *predictor))
        .collect()
}

/// Builds the row of Pearson coefficients of PM2.5 against each predictor.
pub fn correlation_table(
    dataset: &Dataset,
    predictors: &[Variable],
) -> Result<CorrelationTable, AirQualityError> {
    let results = correlate_all(dataset, predictors)?;
    Ok(CorrelationTable::from_results(&results))
}
