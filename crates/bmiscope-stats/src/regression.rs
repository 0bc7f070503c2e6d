//! Simple linear regression
//!
//! Fits `y = intercept + slope * x` by ordinary least squares over the rows
//! where both values are valid.

use std::hash::Hash;

use crate::{
    correlation,
    error::{StatsError, VarianceScope},
    sample,
};

/// Ordinary least squares line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Rows used in the fit.
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; `0.0` when `y` is constant.
    pub r_squared: f64,
    /// Standard error of the slope; undefined below three rows.
    pub slope_std_err: Result<f64, StatsError>,
    /// Smallest `x` used in the fit.
    pub x_min: f64,
    /// Largest `x` used in the fit.
    pub x_max: f64,
}

impl LinearFit {
    /// Fits a line through the complete `(x, y)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use bmiscope_stats::regression::LinearFit;
    ///
    /// let x = [Some(1.0), Some(2.0), Some(3.0), None];
    /// let y = [Some(3.0), Some(5.0), Some(7.0), Some(100.0)];
    /// let fit = LinearFit::fit(&x, &y).unwrap();
    ///
    /// assert_eq!(fit.n, 3);
    /// assert!((fit.slope - 2.0).abs() < 1e-12);
    /// assert!((fit.intercept - 1.0).abs() < 1e-12);
    /// assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(x: &[Option<f64>], y: &[Option<f64>]) -> Result<Self, StatsError> {
        let (xs, ys) = correlation::complete_pairs(x, y)?;
        StatsError::check_count(2, xs.len())?;
        if sample::is_constant(&xs) {
            return Err(StatsError::ZeroVariance(VarianceScope::X));
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut sst = 0.0;
        for (&xi, &yi) in xs.iter().zip(&ys) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            sst += dy * dy;
        }
        if sxx == 0.0 {
            return Err(StatsError::ZeroVariance(VarianceScope::X));
        }

        let slope = StatsError::check_finite(sxy / sxx)?;
        let intercept = StatsError::check_finite(mean_y - slope * mean_x)?;
        let sse = xs
            .iter()
            .zip(&ys)
            .map(|(&xi, &yi)| (yi - (intercept + slope * xi)).powi(2))
            .sum::<f64>();
        let r_squared = if sst > 0.0 {
            (1.0 - sse / sst).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let slope_std_err = StatsError::check_count(3, xs.len())
            .and_then(|()| StatsError::check_finite((sse / (n - 2.0) / sxx).sqrt()));

        let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            n: xs.len(),
            slope,
            intercept,
            r_squared,
            slope_std_err,
            x_min,
            x_max,
        })
    }

    /// Fitted value at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// End points of the fitted line over the observed `x` range.
    #[must_use]
    pub fn endpoints(&self) -> [(f64, f64); 2] {
        [
            (self.x_min, self.predict(self.x_min)),
            (self.x_max, self.predict(self.x_max)),
        ]
    }
}

/// One group's regression line.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFit<L> {
    pub label: L,
    pub fit: Result<LinearFit, StatsError>,
}

/// Fits `y` on `x` separately within each label, in first-seen label order.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::regression::fit_by_group;
///
/// let age = [Some(20.0), Some(30.0), Some(40.0), Some(20.0), Some(40.0)];
/// let bmi = [Some(22.0), Some(24.0), Some(26.0), Some(30.0), Some(26.0)];
/// let sex = ["M", "M", "M", "F", "F"];
/// let fits = fit_by_group(&age, &bmi, &sex).unwrap();
///
/// assert!(fits[0].fit.as_ref().unwrap().slope > 0.0);
/// assert!(fits[1].fit.as_ref().unwrap().slope < 0.0);
/// ```
pub fn fit_by_group<L>(
    x: &[Option<f64>],
    y: &[Option<f64>],
    labels: &[L],
) -> Result<Vec<GroupFit<L>>, StatsError>
where
    L: Clone + Eq + Hash,
{
    StatsError::check_aligned(x.len(), y.len())?;
    StatsError::check_aligned(x.len(), labels.len())?;

    Ok(sample::distinct_in_order(labels)
        .into_iter()
        .map(|label| {
            let (gx, gy): (Vec<_>, Vec<_>) = x
                .iter()
                .zip(y)
                .zip(labels)
                .filter(|(_, l)| **l == label)
                .map(|((xi, yi), _)| (*xi, *yi))
                .unzip();
            let fit = LinearFit::fit(&gx, &gy);
            GroupFit { label, fit }
        })
        .collect())
}
