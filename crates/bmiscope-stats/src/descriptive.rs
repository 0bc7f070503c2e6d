use crate::{
    error::{Statistic, StatsError},
    percentiles,
};

/// Descriptive statistics summarizing a dataset.
///
/// Dispersion measures use the sample (Bessel-corrected, divisor `n - 1`)
/// estimators. With a single observation they are undefined and reported as
/// [`StatsError::InsufficientData`].
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values summarized.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median, linearly interpolated for even counts.
    pub median: f64,
    /// The sample variance.
    pub variance: Statistic,
    /// The sample standard deviation.
    pub std_dev: Statistic,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Non-finite values are treated as missing and skipped.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one finite value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use bmiscope_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, Ok(2.5));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let mean = mean(sorted_values)?;
        let median = percentiles::compute_percentile(sorted_values, 50.0);
        let variance = sample_variance_with_mean(sorted_values, mean);
        let std_dev = sample_std_dev_with_mean(sorted_values, mean);

        Some(Self {
            count: sorted_values.len(),
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
        })
    }
}

/// Arithmetic mean, or `None` for an empty slice.
///
/// ```
/// # use bmiscope_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return Some(sum / n);
    }
    // The plain sum overflowed; average in units of the largest magnitude.
    let scale = max_abs(values);
    Some(values.iter().map(|v| v / scale).sum::<f64>() / n * scale)
}

/// Sample variance (divisor `n - 1`).
///
/// ```
/// # use bmiscope_stats::descriptive::sample_variance;
/// assert_eq!(sample_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), Ok(32.0 / 7.0));
/// assert!(sample_variance(&[1.0]).unwrap_err().is_insufficient_data());
/// ```
pub fn sample_variance(values: &[f64]) -> Statistic {
    let mean = mean(values).ok_or(StatsError::InsufficientData {
        required: 2,
        found: 0,
    })?;
    sample_variance_with_mean(values, mean)
}

/// Sample standard deviation (square root of [`sample_variance`]).
///
/// Stays finite for values whose variance alone would overflow.
///
/// ```
/// # use bmiscope_stats::descriptive::{sample_std_dev, sample_variance};
/// let huge = [1e200, 3e200];
/// assert!(sample_variance(&huge).unwrap_err().is_non_finite());
/// assert!((sample_std_dev(&huge).unwrap() / 2.0_f64.sqrt() - 1e200).abs() < 1e186);
/// ```
pub fn sample_std_dev(values: &[f64]) -> Statistic {
    let mean = mean(values).ok_or(StatsError::InsufficientData {
        required: 2,
        found: 0,
    })?;
    sample_std_dev_with_mean(values, mean)
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Sum of squared deviations from `mean` as `(scale, sum)`, meaning
/// `scale² * sum`. `scale` is `1.0` unless the plain sum overflows.
fn squared_deviations(values: &[f64], mean: f64) -> (f64, f64) {
    let plain = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    if plain.is_finite() {
        return (1.0, plain);
    }
    let scale = max_abs(values).max(mean.abs());
    let scaled = values
        .iter()
        .map(|v| (v / scale - mean / scale).powi(2))
        .sum::<f64>();
    (scale, scaled)
}

#[expect(clippy::cast_precision_loss)]
fn sample_variance_with_mean(values: &[f64], mean: f64) -> Statistic {
    StatsError::check_count(2, values.len())?;
    let (scale, sum_sq) = squared_deviations(values, mean);
    StatsError::check_finite(sum_sq / (values.len() - 1) as f64 * scale * scale)
}

#[expect(clippy::cast_precision_loss)]
fn sample_std_dev_with_mean(values: &[f64], mean: f64) -> Statistic {
    StatsError::check_count(2, values.len())?;
    let (scale, sum_sq) = squared_deviations(values, mean);
    StatsError::check_finite((sum_sq / (values.len() - 1) as f64).sqrt() * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_has_undefined_spread() {
        let stats = DescriptiveStats::new([4.2]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 4.2);
        assert_eq!(stats.median, 4.2);
        assert_eq!(
            stats.std_dev,
            Err(StatsError::InsufficientData {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let stats = DescriptiveStats::new([1.0, f64::NAN, 3.0, f64::INFINITY]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_empty_is_none() {
        assert!(DescriptiveStats::new([]).is_none());
        assert!(DescriptiveStats::new([f64::NAN]).is_none());
    }

    #[test]
    fn test_bessel_corrected_std_dev() {
        let std = sample_std_dev(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((std - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series_has_zero_variance() {
        assert_eq!(sample_variance(&[7.0, 7.0, 7.0]), Ok(0.0));
    }

    #[test]
    fn test_mean_of_values_near_max_stays_finite() {
        let values = [1.5e308, 1.7e308, -1.0e308];
        let m = mean(&values).unwrap();
        assert!(m.is_finite());
        assert!((m / 1e308 - 2.2 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_huge_values_keep_std_dev_finite() {
        let stats = DescriptiveStats::new([1.5e308, -1.5e308, 1.0e308, -1.0e308]).unwrap();
        assert!((stats.mean / 1e308).abs() < 1e-12);
        assert_eq!(stats.variance, Err(StatsError::NonFinite));
        let std = stats.std_dev.unwrap();
        // sqrt((2 * 1.5² + 2 * 1.0²) / 3)
        assert!((std / 1e308 - (6.5_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_input_is_non_finite() {
        assert_eq!(sample_std_dev(&[1.0, f64::INFINITY]), Err(StatsError::NonFinite));
    }
}
