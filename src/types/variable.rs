//! Defines the measured variables of the air-quality dataset and their CSV column names.

use crate::error::AirQualityError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A measured quantity in the air-quality dataset.
///
/// [`Variable::Pm25`] is the target of every analysis; the remaining variants are the
/// meteorological predictors it is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Variable {
    /// Fine particulate matter concentration, µg/m³.
    #[serde(rename = "PM2.5")]
    Pm25,
    /// Air temperature, °C.
    #[serde(rename = "TEMP")]
    Temperature,
    /// Precipitation, mm.
    #[serde(rename = "RAIN")]
    Rain,
    /// Air pressure, hPa.
    #[serde(rename = "PRES")]
    Pressure,
    /// Dew point temperature, °C.
    #[serde(rename = "DEWP")]
    DewPoint,
    /// Wind speed, m/s.
    #[serde(rename = "WSPM")]
    WindSpeed,
}

impl Variable {
    /// Every variable the dataset must contain.
    pub const ALL: [Variable; 6] = [
        Variable::Pm25,
        Variable::Temperature,
        Variable::Rain,
        Variable::Pressure,
        Variable::DewPoint,
        Variable::WindSpeed,
    ];

    /// The meteorological factors the dashboard offers for analysis, in display order.
    pub const PREDICTORS: [Variable; 5] = [
        Variable::Temperature,
        Variable::Rain,
        Variable::Pressure,
        Variable::DewPoint,
        Variable::WindSpeed,
    ];

    /// The CSV column header holding this variable.
    pub fn column_name(&self) -> &'static str {
        match self {
            Variable::Pm25 => "PM2.5",
            Variable::Temperature => "TEMP",
            Variable::Rain => "RAIN",
            Variable::Pressure => "PRES",
            Variable::DewPoint => "DEWP",
            Variable::WindSpeed => "WSPM",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Pm25 => "µg/m³",
            Variable::Temperature | Variable::DewPoint => "°C",
            Variable::Rain => "mm",
            Variable::Pressure => "hPa",
            Variable::WindSpeed => "m/s",
        }
    }

    pub fn is_target(&self) -> bool {
        matches!(self, Variable::Pm25)
    }
}

/// Formats a `Variable` as its CSV column name.
///
/// # Examples
///
/// ```
/// use pm25_analysis::Variable;
///
/// assert_eq!(Variable::WindSpeed.to_string(), "WSPM");
/// assert_eq!(format!("{}", Variable::Pm25), "PM2.5");
/// ```
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Parses a column name (case-insensitive) into a `Variable`.
///
/// # Examples
///
/// ```
/// use pm25_analysis::Variable;
///
/// assert_eq!("temp".parse::<Variable>().unwrap(), Variable::Temperature);
/// assert!("humidity".parse::<Variable>().is_err());
/// ```
impl FromStr for Variable {
    type Err = AirQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Variable::ALL
            .into_iter()
            .find(|v| v.column_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AirQualityError::UnknownVariable(trimmed.to_string()))
    }
}
