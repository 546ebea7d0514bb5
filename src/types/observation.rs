use crate::types::variable::Variable;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// One hourly reading of pollution and weather at a monitoring site.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Observation {
    pub datetime: NaiveDateTime,
    pub pm25: Option<f64>,
    pub temperature: Option<f64>,
    pub rain: Option<f64>,
    pub pressure: Option<f64>,
    pub dew_point: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl Observation {
    /// An observation at `datetime` with every reading missing.
    pub fn empty(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            pm25: None,
            temperature: None,
            rain: None,
            pressure: None,
            dew_point: None,
            wind_speed: None,
        }
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    /// Returns the reading for `variable`, if present.
    pub fn get(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::Pm25 => self.pm25,
            Variable::Temperature => self.temperature,
            Variable::Rain => self.rain,
            Variable::Pressure => self.pressure,
            Variable::DewPoint => self.dew_point,
            Variable::WindSpeed => self.wind_speed,
        }
    }

    /// Sets the reading for `variable`, returning the updated observation.
    pub fn with(mut self, variable: Variable, value: f64) -> Self {
        let slot = match variable {
            Variable::Pm25 => &mut self.pm25,
            Variable::Temperature => &mut self.temperature,
            Variable::Rain => &mut self.rain,
            Variable::Pressure => &mut self.pressure,
            Variable::DewPoint => &mut self.dew_point,
            Variable::WindSpeed => &mut self.wind_speed,
        };
        *slot = Some(value);
        self
    }
}
