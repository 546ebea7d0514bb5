//! Mean PM2.5 for each hour of the day.

use crate::dataset::{Dataset, COL_DATE};
use crate::error::AirQualityError;
use crate::types::variable::Variable;
use log::debug;
use ordered_float::OrderedFloat;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

const COL_HOUR: &str = "hour";
const COL_MEAN: &str = "mean";
const COL_COUNT: &str = "count";

/// Mean PM2.5 of the observations taken at one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyMean {
    pub mean: f64,
    /// Number of non-missing readings averaged.
    pub count: usize,
}

/// Mean PM2.5 keyed by hour of day (0–23), in ascending hour order.
///
/// Hours without any PM2.5 reading are absent rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyAggregate {
    means: BTreeMap<u32, HourlyMean>,
}

impl HourlyAggregate {
    pub fn get(&self, hour: u32) -> Option<f64> {
        self.means.get(&hour).map(|m| m.mean)
    }

    pub fn entry(&self, hour: u32) -> Option<&HourlyMean> {
        self.means.get(&hour)
    }

    /// Hours with data, ascending.
    pub fn hours(&self) -> impl Iterator<Item = u32> + '_ {
        self.means.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &HourlyMean)> {
        self.means.iter().map(|(hour, mean)| (*hour, mean))
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Hour with the highest mean PM2.5. Ties resolve to the later hour.
    pub fn peak(&self) -> Option<(u32, f64)> {
        self.iter()
            .max_by_key(|(_, m)| OrderedFloat(m.mean))
            .map(|(hour, m)| (hour, m.mean))
    }

    /// Hour with the lowest mean PM2.5. Ties resolve to the earlier hour.
    pub fn trough(&self) -> Option<(u32, f64)> {
        self.iter()
            .min_by_key(|(_, m)| OrderedFloat(m.mean))
            .map(|(hour, m)| (hour, m.mean))
    }
}

/// Groups the dataset by hour of day and averages PM2.5 within each group.
///
/// Missing PM2.5 readings are skipped.
///
/// # Errors
///
/// * [`AirQualityError::EmptyDataset`] if the dataset has no rows.
/// * [`AirQualityError::NoValues`] if every PM2.5 reading is missing.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pm25_analysis::{hourly_means, Dataset, Observation, Variable};
///
/// let day = NaiveDate::from_ymd_opt(2014, 6, 1).unwrap();
/// let dataset = Dataset::from_observations(&[
///     Observation::empty(day.and_hms_opt(5, 0, 0).unwrap()).with(Variable::Pm25, 10.0),
///     Observation::empty(day.and_hms_opt(5, 0, 0).unwrap()).with(Variable::Pm25, 20.0),
/// ]).unwrap();
///
/// let hourly = hourly_means(&dataset).unwrap();
/// assert_eq!(hourly.get(5), Some(15.0));
/// assert_eq!(hourly.get(6), None);
/// ```
pub fn hourly_means(dataset: &Dataset) -> Result<HourlyAggregate, AirQualityError> {
    if dataset.is_empty() {
        return Err(AirQualityError::EmptyDataset);
    }
    let pm25 = Variable::Pm25.column_name();

    let grouped = dataset
        .lazy()
        .select([
            col(COL_DATE)
                .dt()
                .hour()
                .cast(DataType::UInt32)
                .alias(COL_HOUR),
            col(pm25),
        ])
        .filter(col(pm25).is_not_null())
        .group_by([col(COL_HOUR)])
        .agg([
            col(pm25).mean().alias(COL_MEAN),
            col(pm25).count().cast(DataType::UInt32).alias(COL_COUNT),
        ])
        .sort([COL_HOUR], SortMultipleOptions::default())
        .collect()?;

    let hours = grouped.column(COL_HOUR)?.u32()?;
    let means = grouped.column(COL_MEAN)?.f64()?;
    let counts = grouped.column(COL_COUNT)?.u32()?;

    let means: BTreeMap<u32, HourlyMean> = hours
        .into_iter()
        .zip(means)
        .zip(counts)
        .filter_map(|((hour, mean), count)| {
            Some((
                hour?,
                HourlyMean {
                    mean: mean?,
                    count: count? as usize,
                },
            ))
        })
        .collect();

    if means.is_empty() {
        return Err(AirQualityError::NoValues {
            column: pm25.to_string(),
        });
    }
    debug!("Aggregated PM2.5 over {} distinct hours", means.len());
    Ok(HourlyAggregate { means })
}
