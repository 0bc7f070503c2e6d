use std::hash::Hash;

use crate::{error::StatsError, percentiles::compute_percentile, sample};

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary with Tukey whiskers, as drawn by a box plot.
///
/// Quartiles use linear interpolation (see [`compute_percentile`]).
/// Whiskers extend to the most extreme observations within
/// `1.5 * IQR` of the box; values beyond them are listed as outliers.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::boxplot::BoxSummary;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 40.0];
/// let summary = BoxSummary::new(values).unwrap();
///
/// assert_eq!(summary.median, 5.5);
/// assert_eq!(summary.upper_whisker, 9.0);
/// assert_eq!(summary.outliers, vec![40.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Observations outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarizes unsorted values; non-finite values are skipped.
    ///
    /// Returns `None` when no finite value remains.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Summarizes pre-sorted finite values.
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
        let q1 = compute_percentile(sorted_values, 25.0);
        let median = compute_percentile(sorted_values, 50.0);
        let q3 = compute_percentile(sorted_values, 75.0);

        let reach = WHISKER_IQR_FACTOR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);
        let lower_whisker = sorted_values
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(min);
        let upper_whisker = sorted_values
            .iter()
            .copied()
            .rfind(|v| *v <= high_fence)
            .unwrap_or(max);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| *v < lower_whisker || *v > upper_whisker)
            .collect();

        Some(Self {
            count: sorted_values.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// One group's box summary; `None` when the group has no valid measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox<L> {
    pub label: L,
    pub summary: Option<BoxSummary>,
}

/// Box summaries per label, in first-seen label order.
pub fn group_boxes<L>(
    measurements: &[Option<f64>],
    labels: &[L],
) -> Result<Vec<GroupBox<L>>, StatsError>
where
    L: Clone + Eq + Hash,
{
    StatsError::check_aligned(measurements.len(), labels.len())?;
    Ok(sample::partition_by_label(measurements, labels)
        .into_iter()
        .map(|(label, values)| GroupBox {
            label,
            summary: BoxSummary::new(values),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_outliers() {
        let summary = BoxSummary::new([4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.iqr(), 2.0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_low_outlier() {
        let summary = BoxSummary::new([-50.0, 10.0, 11.0, 12.0, 13.0, 14.0]).unwrap();
        assert_eq!(summary.lower_whisker, 10.0);
        assert_eq!(summary.outliers, vec![-50.0]);
        assert_eq!(summary.min, -50.0);
    }

    #[test]
    fn test_single_value() {
        let summary = BoxSummary::new([7.0]).unwrap();
        assert_eq!(summary.q1, 7.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.lower_whisker, 7.0);
        assert_eq!(summary.upper_whisker, 7.0);
    }

    #[test]
    fn test_empty() {
        assert!(BoxSummary::new([]).is_none());
    }

    #[test]
    fn test_group_boxes() {
        let boxes = group_boxes(
            &[Some(1.0), Some(2.0), None, Some(3.0)],
            &["x", "x", "y", "x"],
        )
        .unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].summary.as_ref().unwrap().count, 3);
        assert!(boxes[1].summary.is_none());
    }
}
