//! Contains the [`Dataset`] type, the validated and immutable table every analysis reads from.

pub(crate) mod loader;
pub(crate) mod schema;

use crate::error::AirQualityError;
use crate::types::observation::Observation;
use crate::types::variable::Variable;
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

pub(crate) use schema::COL_DATE;

/// A loaded air-quality table.
///
/// A `Dataset` is created once, either from a CSV file via [`Dataset::from_csv`] or from
/// an in-memory frame or observations, and is never modified afterwards. Analysis functions
/// borrow it, so one load serves every chart and table of a session.
///
/// # Schema
///
/// The wrapped frame always has:
///
/// * a `date` column of type `Datetime(Milliseconds, None)` without nulls,
/// * one `Float64` column per [`Variable`] (`PM2.5`, `TEMP`, `RAIN`, `PRES`, `DEWP`, `WSPM`),
///   where nulls mark missing readings,
///
/// plus whatever other columns the source file carried.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Wraps an existing frame after validating and normalising it.
    ///
    /// The frame must contain a `date` column and every measurement column.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`Dataset::from_csv`].
    pub fn from_frame(frame: DataFrame) -> Result<Self, AirQualityError> {
        let frame = schema::normalize(frame, COL_DATE)?;
        Ok(Self { frame })
    }

    /// Builds a dataset from observations, preserving their order.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pm25_analysis::{Dataset, Observation, Variable};
    ///
    /// let at = NaiveDate::from_ymd_opt(2015, 12, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
    /// let dataset = Dataset::from_observations(&[
    ///     Observation::empty(at).with(Variable::Pm25, 35.0).with(Variable::Temperature, -2.0),
    /// ]).unwrap();
    ///
    /// assert_eq!(dataset.height(), 1);
    /// assert_eq!(dataset.width(), 7);
    /// ```
    pub fn from_observations(observations: &[Observation]) -> Result<Self, AirQualityError> {
        let dates: Vec<NaiveDateTime> = observations.iter().map(|o| o.datetime).collect();
        let mut columns: Vec<Column> = vec![Series::new(COL_DATE.into(), dates).into()];
        for variable in Variable::ALL {
            let values: Vec<Option<f64>> = observations.iter().map(|o| o.get(variable)).collect();
            columns.push(Series::new(variable.column_name().into(), values).into());
        }
        Self::from_frame(DataFrame::new(columns)?)
    }

    /// The underlying frame, in its normalised schema.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// A lazy view of the data for building further polars queries.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns, including any the source file carried beyond the required ones.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// The readings of `variable`, with nulls for missing values.
    pub fn values(&self, variable: Variable) -> Result<&Float64Chunked, AirQualityError> {
        Ok(self.frame.column(variable.column_name())?.f64()?)
    }

    /// Readings of `x` and `y` taken from the rows where both are present.
    ///
    /// The two returned vectors have equal length and keep row order.
    pub fn paired_values(
        &self,
        x: Variable,
        y: Variable,
    ) -> Result<(Vec<f64>, Vec<f64>), AirQualityError> {
        let xs = self.values(x)?;
        let ys = self.values(y)?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .filter_map(|(x, y)| Some((x?, y?)))
            .unzip())
    }

    /// Collects every row into an [`Observation`].
    pub fn collect_observations(&self) -> Result<Vec<Observation>, AirQualityError> {
        let dates = self.frame.column(COL_DATE)?.datetime()?;
        let pm25 = self.values(Variable::Pm25)?;
        let temperature = self.values(Variable::Temperature)?;
        let rain = self.values(Variable::Rain)?;
        let pressure = self.values(Variable::Pressure)?;
        let dew_point = self.values(Variable::DewPoint)?;
        let wind_speed = self.values(Variable::WindSpeed)?;

        (0..self.height())
            .map(|idx| {
                let datetime = dates
                    .get(idx)
                    .and_then(DateTime::from_timestamp_millis)
                    .map(|dt| dt.naive_utc())
                    .ok_or(AirQualityError::DateParse {
                        row: idx,
                        value: None,
                    })?;
                Ok(Observation {
                    datetime,
                    pm25: pm25.get(idx),
                    temperature: temperature.get(idx),
                    rain: rain.get(idx),
                    pressure: pressure.get(idx),
                    dew_point: dew_point.get(idx),
                    wind_speed: wind_speed.get(idx),
                })
            })
            .collect()
    }
}
