//! Bundles every analysis the dashboard shows into one serialisable value.
//!
//! [`DashboardReport`] is the hand-off to presentation code: it holds plain data only, and its
//! `Display` impl renders the same sections as text tables.

use crate::analysis::correlation::{correlate_all, CorrelationResult, CorrelationTable};
use crate::analysis::hourly::{hourly_means, HourlyAggregate};
use crate::analysis::summary::{summarize, SummaryStatistics};
use crate::dataset::Dataset;
use crate::error::AirQualityError;
use crate::types::variable::Variable;
use log::info;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: SummaryStatistics,
    pub hourly: HourlyAggregate,
    pub correlations: CorrelationTable,
    /// One entry per requested predictor, in request order.
    pub factors: Vec<CorrelationResult>,
}

impl DashboardReport {
    /// Runs the summary, hourly aggregate and correlations over `dataset`.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of [`summarize`], [`hourly_means`] or
    /// [`crate::correlate`].
    pub fn generate(dataset: &Dataset, predictors: &[Variable]) -> Result<Self, AirQualityError> {
        let summary = summarize(dataset)?;
        let hourly = hourly_means(dataset)?;
        let factors = correlate_all(dataset, predictors)?;
        let correlations = CorrelationTable::from_results(&factors);
        info!(
            "Generated report over {} rows with {} factors",
            summary.rows,
            factors.len()
        );
        Ok(Self {
            summary,
            hourly,
            correlations,
            factors,
        })
    }

    pub fn factor(&self, predictor: Variable) -> Option<&CorrelationResult> {
        self.factors.iter().find(|f| f.predictor == predictor)
    }
}

/// Formats a coefficient, spelling out undefined values.
fn coefficient(value: f64) -> String {
    if value.is_nan() {
        "undefined".to_string()
    } else {
        format!("{value:.2}")
    }
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = Variable::Pm25.unit();
        writeln!(f, "Mean PM2.5: {:.2} {unit}", self.mean)?;
        writeln!(f, "Max PM2.5:  {:.2} {unit}", self.max)?;
        writeln!(f, "Min PM2.5:  {:.2} {unit}", self.min)?;
        write!(
            f,
            "Dataset has {} rows and {} columns.",
            self.rows, self.columns
        )
    }
}

impl fmt::Display for HourlyAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4}  {:>10}  {:>7}", "Hour", "PM2.5", "Samples")?;
        for (hour, entry) in self.iter() {
            writeln!(f, "{:>4}  {:>10.2}  {:>7}", hour, entry.mean, entry.count)?;
        }
        Ok(())
    }
}

impl fmt::Display for CorrelationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.iter().map(|(v, _)| format!("{v:>9}")).collect();
        let row: Vec<String> = self
            .iter()
            .map(|(_, r)| format!("{:>9}", coefficient(r)))
            .collect();
        writeln!(f, "{:<6}{}", "", header.join(" "))?;
        write!(f, "{:<6}{}", "PM2.5", row.join(" "))
    }
}

impl fmt::Display for CorrelationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs PM2.5: r = {}, trend PM2.5 = {:.3} * {} + {:.3} (n = {})",
            self.predictor,
            coefficient(self.pearson_r),
            self.fit.slope,
            self.predictor,
            self.fit.intercept,
            self.sample_size
        )
    }
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Data summary ==")?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "== Daily PM2.5 pattern ==")?;
        write!(f, "{}", self.hourly)?;
        if let (Some((peak, high)), Some((trough, low))) = (self.hourly.peak(), self.hourly.trough())
        {
            writeln!(
                f,
                "Highest at {peak:02}:00 ({high:.2}), lowest at {trough:02}:00 ({low:.2})."
            )?;
        }
        writeln!(f)?;
        writeln!(f, "== Meteorological factors ==")?;
        writeln!(f, "{}", self.correlations)?;
        for factor in &self.factors {
            writeln!(f, "{factor}")?;
        }
        if let Some((strongest, r)) = self.correlations.strongest() {
            writeln!(
                f,
                "Strongest relationship: {strongest} (r = {})",
                coefficient(r)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Observation;
    use chrono::NaiveDate;

    fn sample() -> Dataset {
        let day = NaiveDate::from_ymd_opt(2013, 3, 1).unwrap();
        let observations: Vec<Observation> = (0..6)
            .map(|h| {
                let wind = 1.0 + h as f64;
                Observation::empty(day.and_hms_opt(h, 0, 0).unwrap())
                    .with(Variable::Pm25, 100.0 - 10.0 * wind)
                    .with(Variable::Temperature, -2.0 + 0.5 * h as f64)
                    .with(Variable::Rain, 0.0)
                    .with(Variable::Pressure, 1020.0 + (h % 2) as f64)
                    .with(Variable::DewPoint, -15.0)
                    .with(Variable::WindSpeed, wind)
            })
            .collect();
        Dataset::from_observations(&observations).unwrap()
    }

    #[test]
    fn test_generate_covers_every_predictor() {
        let report = DashboardReport::generate(&sample(), &Variable::PREDICTORS).unwrap();

        assert_eq!(report.summary.rows, 6);
        assert_eq!(report.hourly.len(), 6);
        assert_eq!(report.factors.len(), 5);
        assert_eq!(report.correlations.len(), 5);
        assert!(report.factor(Variable::Rain).unwrap().is_degenerate());
        assert!(report.factor(Variable::DewPoint).unwrap().is_degenerate());
        assert!((report.factor(Variable::WindSpeed).unwrap().pearson_r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_marks_undefined_coefficients() {
        let report = DashboardReport::generate(&sample(), &Variable::PREDICTORS).unwrap();
        let text = report.to_string();

        assert!(text.contains("Dataset has 6 rows and 7 columns."));
        assert!(text.contains("RAIN vs PM2.5: r = undefined"));
        assert!(text.contains("Highest at 00:00 (90.00), lowest at 05:00 (40.00)."));
    }

    #[test]
    fn test_empty_dataset_fails() {
        let empty = Dataset::from_observations(&[]).unwrap();
        assert!(matches!(
            DashboardReport::generate(&empty, &Variable::PREDICTORS),
            Err(AirQualityError::EmptyDataset)
        ));
    }
}
