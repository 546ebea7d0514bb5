use crate::dataset::Dataset;
use crate::error::AirQualityError;
use crate::types::variable::Variable;
use polars::prelude::*;
use serde::Serialize;

const COL_MEAN: &str = "mean";
const COL_MAX: &str = "max";
const COL_MIN: &str = "min";
const COL_COUNT: &str = "count";

/// Headline figures for the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Mean PM2.5, µg/m³.
    pub mean: f64,
    /// Highest PM2.5 reading, µg/m³.
    pub max: f64,
    /// Lowest PM2.5 reading, µg/m³.
    pub min: f64,
    /// Number of non-missing PM2.5 readings.
    pub readings: usize,
    pub rows: usize,
    pub columns: usize,
}

/// Computes mean, maximum and minimum PM2.5 plus the table's shape.
///
/// Missing PM2.5 readings are skipped.
///
/// # Errors
///
/// * [`AirQualityError::EmptyDataset`] if the dataset has no rows.
/// * [`AirQualityError::NoValues`] if every PM2.5 reading is missing.
pub fn summarize(dataset: &Dataset) -> Result<SummaryStatistics, AirQualityError> {
    if dataset.is_empty() {
        return Err(AirQualityError::EmptyDataset);
    }
    let pm25 = Variable::Pm25.column_name();

    let frame = dataset
        .lazy()
        .select([
            col(pm25).mean().alias(COL_MEAN),
            col(pm25).max().alias(COL_MAX),
            col(pm25).min().alias(COL_MIN),
            col(pm25).count().cast(DataType::UInt32).alias(COL_COUNT),
        ])
        .collect()?;

    let readings = frame.column(COL_COUNT)?.u32()?.get(0).unwrap_or(0) as usize;
    let no_values = || AirQualityError::NoValues {
        column: pm25.to_string(),
    };
    if readings == 0 {
        return Err(no_values());
    }

    Ok(SummaryStatistics {
        mean: frame.column(COL_MEAN)?.f64()?.get(0).ok_or_else(no_values)?,
        max: frame.column(COL_MAX)?.f64()?.get(0).ok_or_else(no_values)?,
        min: frame.column(COL_MIN)?.f64()?.get(0).ok_or_else(no_values)?,
        readings,
        rows: dataset.height(),
        columns: dataset.width(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Observation;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, 20)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn dataset(values: &[Option<f64>]) -> Dataset {
        let observations: Vec<Observation> = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let obs = Observation::empty(at(i as u32));
                match value {
                    Some(v) => obs.with(Variable::Pm25, *v),
                    None => obs,
                }
            })
            .collect();
        Dataset::from_observations(&observations).unwrap()
    }

    #[test]
    fn test_constant_series() {
        let summary = summarize(&dataset(&[Some(42.5); 6])).unwrap();

        assert_eq!(summary.mean, 42.5);
        assert_eq!(summary.max, 42.5);
        assert_eq!(summary.min, 42.5);
        assert_eq!(summary.readings, 6);
    }

    #[test]
    fn test_mean_max_min_and_shape() {
        let summary = summarize(&dataset(&[Some(3.0), None, Some(210.0), Some(27.0)])).unwrap();

        assert_eq!(summary.mean, 80.0);
        assert_eq!(summary.max, 210.0);
        assert_eq!(summary.min, 3.0);
        assert_eq!(summary.readings, 3);
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.columns, 7);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let data = dataset(&[Some(0.1), Some(0.7), Some(13.3), Some(2.9)]);
        assert_eq!(summarize(&data).unwrap(), summarize(&data).unwrap());
    }

    #[test]
    fn test_empty_dataset_fails() {
        assert!(matches!(
            summarize(&dataset(&[])),
            Err(AirQualityError::EmptyDataset)
        ));
    }

    #[test]
    fn test_all_missing_fails() {
        assert!(matches!(
            summarize(&dataset(&[None, None])),
            Err(AirQualityError::NoValues { .. })
        ));
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let values = [Some(12.0), None, Some(0.5), Some(301.0), Some(44.25), None];
        let mut reversed = values;
        reversed.reverse();

        let forward = summarize(&dataset(&values)).unwrap();
        let backward = summarize(&dataset(&reversed)).unwrap();

        assert!((forward.mean - backward.mean).abs() < 1e-12);
        assert_eq!(forward.max, backward.max);
        assert_eq!(forward.min, backward.min);
        assert_eq!(forward.readings, backward.readings);
        assert_eq!((forward.rows, forward.columns), (backward.rows, backward.columns));
    }

    #[test]
    fn test_nan_reading_is_skipped() {
        let summary = summarize(&dataset(&[Some(4.0), Some(f64::NAN), Some(8.0)])).unwrap();

        assert_eq!(summary.mean, 6.0);
        assert_eq!(summary.readings, 2);
    }
}
