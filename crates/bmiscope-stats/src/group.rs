//! Group-wise descriptive statistics

use std::hash::Hash;

use crate::{
    descriptive,
    error::{Statistic, StatsError},
    sample,
};

/// Mean and sample standard deviation of one group's valid measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats<L> {
    /// The group label.
    pub label: L,
    /// Number of valid (non-missing) measurements carrying this label.
    pub count: usize,
    /// Arithmetic mean; undefined when the group has no valid measurement.
    pub mean: Statistic,
    /// Sample standard deviation; undefined below two valid measurements.
    pub std_dev: Statistic,
}

impl<L> GroupStats<L> {
    fn from_values(label: L, values: &[f64]) -> Self {
        let mean = descriptive::mean(values).ok_or(StatsError::InsufficientData {
            required: 1,
            found: 0,
        });
        Self {
            label,
            count: values.len(),
            mean,
            std_dev: descriptive::sample_std_dev(values),
        }
    }
}

/// Computes per-group descriptive statistics.
///
/// Returns one row per distinct label in first-seen order. Rows with a
/// missing measurement are excluded from both the statistics and the counts.
/// A degenerate group reports the reason inside its own row; it never aborts
/// the whole computation.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::group::group_descriptives;
///
/// let bmi = [Some(27.9), Some(23.4), Some(31.1), None, Some(30.4)];
/// let sex = ["M", "F", "M", "F", "M"];
/// let groups = group_descriptives(&bmi, &sex).unwrap();
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].label, "M");
/// assert_eq!(groups[0].count, 3);
/// assert!((groups[0].mean.unwrap() - 29.8).abs() < 1e-9);
/// assert!(groups[1].std_dev.unwrap_err().is_insufficient_data());
/// ```
pub fn group_descriptives<L>(
    measurements: &[Option<f64>],
    labels: &[L],
) -> Result<Vec<GroupStats<L>>, StatsError>
where
    L: Clone + Eq + Hash,
{
    StatsError::check_aligned(measurements.len(), labels.len())?;
    Ok(group_descriptives_unchecked(measurements, labels))
}

pub(crate) fn group_descriptives_unchecked<L>(
    measurements: &[Option<f64>],
    labels: &[L],
) -> Vec<GroupStats<L>>
where
    L: Clone + Eq + Hash,
{
    sample::partition_by_label(measurements, labels)
        .into_iter()
        .map(|(label, values)| GroupStats::from_values(label, &values))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_values_near_max_give_finite_group_stats() {
        let values = [Some(1.5e308), Some(1.5e308), Some(-1.5e308), Some(1.0e308)];
        let groups = group_descriptives(&values, &["a", "a", "b", "b"]).unwrap();

        assert_eq!(groups[0].mean, Ok(1.5e308));
        assert_eq!(groups[0].std_dev, Ok(0.0));
        assert!((groups[1].mean.unwrap() / 1e308 + 0.25).abs() < 1e-12);
        let std = groups[1].std_dev.unwrap();
        assert!(std.is_finite());
        // |(-1.5) - 1.0| / sqrt(2)
        assert!((std / 1e308 - 2.5 / 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_three_groups_match_reference_aggregation() {
        let values = [
            Some(27.9),
            Some(23.4),
            Some(31.1),
            Some(22.7),
            Some(30.4),
            Some(35.6),
            Some(28.9),
            Some(25.0),
            Some(19.5),
        ];
        let labels = [3, 1, 4, 1, 3, 4, 3, 1, 4];
        let groups = group_descriptives(&values, &labels).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups.iter().map(|g| g.label).collect::<Vec<_>>(),
            vec![3, 1, 4]
        );

        // Independent aggregation: sums and counts through an ordered map.
        let mut sums = BTreeMap::<i32, (f64, usize)>::new();
        for (v, l) in values.iter().zip(&labels) {
            let entry = sums.entry(*l).or_default();
            entry.0 += v.unwrap();
            entry.1 += 1;
        }
        for group in &groups {
            let (sum, count) = sums[&group.label];
            #[expect(clippy::cast_precision_loss)]
            let expected = sum / count as f64;
            assert_eq!(group.count, count);
            assert!(
                (group.mean.unwrap() - expected).abs() < TOLERANCE,
                "group {} mean {:?} != {expected}",
                group.label,
                group.mean
            );
        }
    }

    #[test]
    fn test_std_dev_is_bessel_corrected() {
        let groups = group_descriptives(
            &[Some(2.0), Some(4.0), Some(4.0), Some(4.0), Some(5.0), Some(5.0), Some(7.0), Some(9.0)],
            &["a"; 8],
        )
        .unwrap();
        let std = groups[0].std_dev.unwrap();
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn test_group_with_only_missing_values_is_reported() {
        let groups = group_descriptives(&[Some(1.0), None, Some(3.0), None], &["a", "b", "a", "b"])
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].label, "b");
        assert_eq!(groups[1].count, 0);
        assert_eq!(
            groups[1].mean,
            Err(StatsError::InsufficientData {
                required: 1,
                found: 0
            })
        );
        assert_eq!(
            groups[1].std_dev,
            Err(StatsError::InsufficientData {
                required: 2,
                found: 0
            })
        );
    }

    #[test]
    fn test_singleton_group_has_mean_but_no_std_dev() {
        let groups = group_descriptives(&[Some(1.0), Some(2.0), Some(9.0)], &["a", "a", "b"]).unwrap();
        assert_eq!(groups[1].mean, Ok(9.0));
        assert_eq!(
            groups[1].std_dev,
            Err(StatsError::InsufficientData {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            group_descriptives(&[Some(1.0)], &["a", "b"]),
            Err(StatsError::LengthMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        let groups = group_descriptives::<&str>(&[], &[]).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let values = [Some(1.5), Some(2.25), None, Some(8.0), Some(3.0)];
        let labels = ["x", "y", "x", "y", "x"];
        let first = group_descriptives(&values, &labels).unwrap();
        let second = group_descriptives(&values, &labels).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.mean.unwrap().to_bits(), b.mean.unwrap().to_bits());
            assert_eq!(a.std_dev.unwrap().to_bits(), b.std_dev.unwrap().to_bits());
        }
    }
}
