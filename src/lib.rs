//! Analysis core of a PM2.5 air-quality dashboard.
//!
//! Load an hourly pollution and weather CSV once into a [`Dataset`], then derive the
//! dashboard's figures from it:
//!
//! * [`summarize`]: mean, maximum and minimum PM2.5 and the table's shape,
//! * [`hourly_means`]: the daily PM2.5 pattern, averaged per hour of day,
//! * [`correlate`] / [`correlation_table`]: how each meteorological factor relates to PM2.5,
//! * [`DashboardReport`]: all of the above in one serialisable value.
//!
//! ```no_run
//! use pm25_analysis::{AirQualityError, DashboardReport, Dataset, Variable};
//!
//! # fn main() -> Result<(), AirQualityError> {
//! let dataset = Dataset::from_csv("Dashboard/all_data.csv").call()?;
//! let report = DashboardReport::generate(&dataset, &Variable::PREDICTORS)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

mod analysis;
mod dataset;
mod error;
mod report;
mod types;

pub use error::AirQualityError;

pub use dataset::loader::DEFAULT_NULL_VALUES;
pub use dataset::Dataset;
pub use report::DashboardReport;

pub use types::observation::Observation;
pub use types::variable::Variable;

pub use analysis::correlation::*;
pub use analysis::hourly::*;
pub use analysis::stats;
pub use analysis::stats::LinearFit;
pub use analysis::summary::*;
