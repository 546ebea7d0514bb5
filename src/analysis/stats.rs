//! Numeric kernels shared by the analyses: Pearson correlation and least-squares line fitting.
//!
//! Degenerate inputs (fewer than two samples, or zero variance) produce `NaN` rather than an
//! error so callers can report them alongside the valid results.

use crate::error::AirQualityError;
use serde::Serialize;

/// Straight line fitted by ordinary least squares, `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation of the fitted samples.
    pub r_value: f64,
    /// Standard error of the slope. `NaN` with fewer than three samples.
    pub std_err: f64,
}

impl LinearFit {
    /// Evaluates the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Coefficient of determination.
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    pub fn is_degenerate(&self) -> bool {
        self.slope.is_nan() || self.r_value.is_nan()
    }
}

/// Centered sums of a paired sample.
struct Moments {
    n: usize,
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl Moments {
    fn compute(xs: &[f64], ys: &[f64]) -> Result<Self, AirQualityError> {
        if xs.len() != ys.len() {
            return Err(AirQualityError::LengthMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }
        let n = xs.len();
        let mean_x = mean(xs);
        let mean_y = mean(ys);

        let (sxx, syy, sxy) = xs.iter().zip(ys).fold((0.0, 0.0, 0.0), |acc, (x, y)| {
            let dx = x - mean_x;
            let dy = y - mean_y;
            (acc.0 + dx * dx, acc.1 + dy * dy, acc.2 + dx * dy)
        });

        Ok(Self {
            n,
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
        })
    }

    fn r_value(&self) -> f64 {
        let denominator = (self.sxx * self.syy).sqrt();
        if denominator == 0.0 {
            return f64::NAN;
        }
        // Rounding can push |r| a hair past 1 for collinear data.
        (self.sxy / denominator).clamp(-1.0, 1.0)
    }
}

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of two equally long samples.
///
/// # Errors
///
/// [`AirQualityError::LengthMismatch`] if the samples differ in length.
///
/// # Example
///
/// ```
/// use pm25_analysis::stats::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 7.0]).unwrap();
/// assert!(r > 0.99 && r <= 1.0);
///
/// // A constant sample has no variance, so the coefficient is undefined.
/// assert!(pearson(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).unwrap().is_nan());
/// ```
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64, AirQualityError> {
    Ok(Moments::compute(xs, ys)?.r_value())
}

/// Fits `ys` against `xs` by ordinary least squares.
///
/// # Errors
///
/// [`AirQualityError::LengthMismatch`] if the samples differ in length.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<LinearFit, AirQualityError> {
    let m = Moments::compute(xs, ys)?;

    let slope = if m.sxx == 0.0 { f64::NAN } else { m.sxy / m.sxx };
    let intercept = m.mean_y - slope * m.mean_x;
    let r_value = m.r_value();

    let std_err = if m.n > 2 && m.sxx != 0.0 {
        let residual = (1.0 - r_value * r_value).max(0.0) * m.syy / m.sxx;
        (residual / (m.n - 2) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_value,
        std_err,
    })
}
