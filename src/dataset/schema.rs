//! Validates a freshly read frame and normalises its column types.
//!
//! After normalisation the frame has a `date` column of type `Datetime(Milliseconds, None)`
//! without nulls, and every [`Variable`] column as `Float64` with NaN readings turned into nulls.
//! Anything else the CSV carried is left untouched.

use crate::error::AirQualityError;
use crate::types::variable::Variable;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use polars::prelude::*;

pub(crate) const COL_DATE: &str = "date";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_DTYPE: DataType = DataType::Datetime(TimeUnit::Milliseconds, None);

/// Checks that every required column exists and brings them to their canonical types.
///
/// `date_column` names the timestamp column in `frame`; it is renamed to `date` if it differs.
pub(crate) fn normalize(
    mut frame: DataFrame,
    date_column: &str,
) -> Result<DataFrame, AirQualityError> {
    let date = get_column(&frame, date_column)?;
    let normalized_date = normalize_date_column(date)?;
    frame.with_column(normalized_date)?;
    if date_column != COL_DATE {
        frame.rename(date_column, COL_DATE.into())?;
    }

    for variable in Variable::ALL {
        let name = variable.column_name();
        let column = get_column(&frame, name)?;
        let dtype = column.dtype().clone();
        let mut column = column.clone();
        if dtype != DataType::Float64 {
            // Columns with no readings (including header-only files) are inferred as strings.
            let all_missing = column.null_count() == column.len();
            if !all_missing && !is_numeric(&dtype) {
                return Err(AirQualityError::NonNumericColumn {
                    column: name.to_string(),
                    dtype,
                });
            }
            debug!("Casting column '{}' from {} to f64", name, dtype);
            column = column.cast(&DataType::Float64)?;
        }
        if let Some(cleaned) = nan_to_null(&column)? {
            debug!("Treating NaN readings in column '{}' as missing", name);
            column = cleaned;
        }
        frame.with_column(column)?;
    }

    Ok(frame)
}

/// Replaces NaN in a `Float64` column with null. Returns `None` if there is no NaN.
fn nan_to_null(column: &Column) -> Result<Option<Column>, AirQualityError> {
    let values = column.f64()?;
    if !values.into_iter().flatten().any(f64::is_nan) {
        return Ok(None);
    }
    let cleaned: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(Some(Series::new(column.name().clone(), cleaned).into()))
}

fn get_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, AirQualityError> {
    frame
        .column(name)
        .map_err(|_| AirQualityError::MissingColumn {
            column: name.to_string(),
        })
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
            | DataType::Null
    )
}

fn normalize_date_column(column: &Column) -> Result<Column, AirQualityError> {
    let typed = matches!(column.dtype(), DataType::Date | DataType::Datetime(_, _));
    if typed && column.null_count() > 0 {
        let nulls = column.is_null();
        let row = nulls
            .into_iter()
            .position(|missing| missing == Some(true))
            .unwrap_or(0);
        return Err(AirQualityError::DateParse { row, value: None });
    }
    match column.dtype() {
        DataType::Datetime(TimeUnit::Milliseconds, None) => Ok(column.clone()),
        DataType::Datetime(_, _) | DataType::Date => Ok(column.cast(&DATETIME_DTYPE)?),
        DataType::String => parse_date_strings(column),
        other => Err(AirQualityError::InvalidDateColumn {
            dtype: other.clone(),
        }),
    }
}

fn parse_date_strings(column: &Column) -> Result<Column, AirQualityError> {
    let strings = column.str()?;
    let parsed = strings
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(parse_timestamp)
                .ok_or_else(|| AirQualityError::DateParse {
                    row,
                    value: value.map(str::to_string),
                })
        })
        .collect::<Result<Vec<NaiveDateTime>, _>>()?;

    Ok(Series::new(column.name().clone(), parsed).into())
}

/// Parses a timestamp in one of the accepted layouts. A bare date is taken as midnight.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
