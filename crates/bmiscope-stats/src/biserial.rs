//! Point-biserial correlation with a two-sample t-test
//!
//! The point-biserial coefficient measures how strongly a continuous
//! measurement is associated with membership in a group. For a split of the
//! valid rows into an in-group (`n1` rows, mean `M1`, sample std `s1`) and an
//! out-group (`n0`, `M0`, `s0`), with `n = n1 + n0` and `s` the sample
//! standard deviation of all `n` rows:
//!
//! ```text
//! r  = (M1 - M0) / s * sqrt(n1 * n0 / (n * (n - 1)))
//! sp = sqrt(((n1 - 1) * s1² + (n0 - 1) * s0²) / (n - 2))
//! t  = (M1 - M0) / (sp * sqrt(1 / n1 + 1 / n0)),   df = n - 2
//! ```
//!
//! The significance is the two-tailed tail probability of `t` under Student's
//! t distribution (see [`distribution`](crate::distribution)).
//!
//! # Degenerate input
//!
//! - Either side with fewer than 2 valid rows: [`StatsError::InsufficientData`].
//! - All valid rows equal: [`StatsError::ZeroVariance`] (`Overall`); `r` is undefined.
//! - Both sides constant but different: `r` is defined, the t-test is not and
//!   carries [`StatsError::ZeroVariance`] (`Pooled`).
//! - Magnitudes so large that a result cannot be represented:
//!   [`StatsError::NonFinite`]. Values up to `f64::MAX` are handled in scaled
//!   units, so this is rare in practice.

use std::hash::Hash;

use crate::{
    descriptive, distribution,
    error::{Statistic, StatsError, VarianceScope},
    sample::{self, valid_value},
};

/// Point-biserial correlation of a measurement with a binary indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBiserial {
    /// Valid rows flagged `true`.
    pub n_in: usize,
    /// Valid rows flagged `false`.
    pub n_out: usize,
    /// Mean of the in-group.
    pub mean_in: f64,
    /// Mean of the out-group.
    pub mean_out: f64,
    /// Correlation coefficient in `[-1, 1]`; its sign follows `mean_in - mean_out`.
    pub r: f64,
    /// Pooled two-sample t-test of the mean difference.
    pub test: Result<TTest, StatsError>,
}

/// Two-sample t-test with pooled variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    pub pooled_std_dev: f64,
    pub t: f64,
    pub df: f64,
    /// Two-tailed p-value in `[0, 1]`.
    pub p_value: f64,
}

impl PointBiserial {
    /// The two-tailed p-value, or why it is undefined.
    #[must_use]
    pub fn p_value(&self) -> Statistic {
        self.test.map(|test| test.p_value)
    }
}

/// One group's point-biserial result against all other rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BiserialResult<L> {
    pub label: L,
    pub outcome: Result<PointBiserial, StatsError>,
}

/// Computes the point-biserial correlation of `measurements` with `indicator`.
///
/// Rows with a missing or non-finite measurement are dropped before counting.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::biserial::point_biserial;
///
/// let values = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)];
/// let indicator = [true, true, true, false, false, false];
/// let result = point_biserial(&values, &indicator).unwrap();
///
/// assert!(result.r < 0.0);
/// assert!(result.p_value().unwrap() < 0.05);
/// ```
pub fn point_biserial(
    measurements: &[Option<f64>],
    indicator: &[bool],
) -> Result<PointBiserial, StatsError> {
    StatsError::check_aligned(measurements.len(), indicator.len())?;

    let mut all = Vec::with_capacity(measurements.len());
    let mut in_group = Vec::new();
    let mut out_group = Vec::new();
    for (value, &flag) in measurements.iter().zip(indicator) {
        let Some(v) = valid_value(*value) else {
            continue;
        };
        all.push(v);
        if flag {
            in_group.push(v);
        } else {
            out_group.push(v);
        }
    }

    from_partitions(&all, &in_group, &out_group)
}

/// Computes [`point_biserial`] once per distinct label, each label's rows
/// against all other rows. Results are in first-seen label order; a
/// degenerate label only affects its own entry.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::biserial::point_biserial_by_group;
///
/// let values = [Some(1.0), Some(5.0), Some(2.0), Some(6.0), Some(3.0), Some(7.0)];
/// let labels = ["a", "b", "a", "b", "a", "b"];
/// let results = point_biserial_by_group(&values, &labels).unwrap();
///
/// assert_eq!(results.len(), 2);
/// let r_a = results[0].outcome.as_ref().unwrap().r;
/// let r_b = results[1].outcome.as_ref().unwrap().r;
/// assert_eq!(r_a, -r_b);
/// ```
pub fn point_biserial_by_group<L>(
    measurements: &[Option<f64>],
    labels: &[L],
) -> Result<Vec<BiserialResult<L>>, StatsError>
where
    L: Clone + Eq + Hash,
{
    StatsError::check_aligned(measurements.len(), labels.len())?;
    Ok(point_biserial_by_group_unchecked(measurements, labels))
}

pub(crate) fn point_biserial_by_group_unchecked<L>(
    measurements: &[Option<f64>],
    labels: &[L],
) -> Vec<BiserialResult<L>>
where
    L: Clone + Eq + Hash,
{
    sample::distinct_in_order(labels)
        .into_iter()
        .map(|label| {
            let indicator = labels.iter().map(|l| *l == label).collect::<Vec<_>>();
            let outcome = point_biserial(measurements, &indicator);
            BiserialResult { label, outcome }
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn from_partitions(
    all: &[f64],
    in_group: &[f64],
    out_group: &[f64],
) -> Result<PointBiserial, StatsError> {
    StatsError::check_count(2, in_group.len())?;
    StatsError::check_count(2, out_group.len())?;
    if sample::is_constant(all) {
        return Err(StatsError::ZeroVariance(VarianceScope::Overall));
    }

    let n1 = in_group.len() as f64;
    let n0 = out_group.len() as f64;
    let n = n1 + n0;

    let mean_in = checked_mean(in_group)?;
    let mean_out = checked_mean(out_group)?;
    let overall_std = descriptive::sample_std_dev(all)?;
    if overall_std == 0.0 {
        return Err(StatsError::ZeroVariance(VarianceScope::Overall));
    }

    // Standardize before subtracting so opposite huge means cannot overflow.
    let standardized = mean_in / overall_std - mean_out / overall_std;
    let r = StatsError::check_finite(standardized * ((n1 * n0) / (n * (n - 1.0))).sqrt())?
        .clamp(-1.0, 1.0);

    let test = t_test(in_group, out_group, mean_in, mean_out);

    Ok(PointBiserial {
        n_in: in_group.len(),
        n_out: out_group.len(),
        mean_in,
        mean_out,
        r,
        test,
    })
}

#[expect(clippy::cast_precision_loss)]
fn t_test(
    in_group: &[f64],
    out_group: &[f64],
    mean_in: f64,
    mean_out: f64,
) -> Result<TTest, StatsError> {
    if sample::is_constant(in_group) && sample::is_constant(out_group) {
        return Err(StatsError::ZeroVariance(VarianceScope::Pooled));
    }
    let n1 = in_group.len() as f64;
    let n0 = out_group.len() as f64;
    let s1 = descriptive::sample_std_dev(in_group)?;
    let s0 = descriptive::sample_std_dev(out_group)?;
    let df = n1 + n0 - 2.0;
    // Pool in units of the larger spread so the squares stay in range.
    let unit = s1.max(s0);
    if unit == 0.0 {
        return Err(StatsError::ZeroVariance(VarianceScope::Pooled));
    }
    let pooled_std_dev = StatsError::check_finite(
        unit * (((n1 - 1.0) * (s1 / unit).powi(2) + (n0 - 1.0) * (s0 / unit).powi(2)) / df)
            .sqrt(),
    )?;
    let t = StatsError::check_finite(
        (mean_in / pooled_std_dev - mean_out / pooled_std_dev) / (1.0 / n1 + 1.0 / n0).sqrt(),
    )?;
    let p_value = distribution::two_tailed_p_value(t, df)?;
    Ok(TTest {
        pooled_std_dev,
        t,
        df,
        p_value,
    })
}

fn checked_mean(values: &[f64]) -> Statistic {
    descriptive::mean(values).ok_or(StatsError::InsufficientData {
        required: 1,
        found: 0,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_hand_computed_two_groups() {
        let values = some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let is_a = [true, true, true, true, false, false, false, false];
        let result = point_biserial(&values, &is_a).unwrap();

        assert_eq!(result.n_in, 4);
        assert_eq!(result.n_out, 4);
        assert_eq!(result.mean_in, 2.5);
        assert_eq!(result.mean_out, 6.5);

        // (M1 - M0) / s * sqrt(n1 n0 / (n (n - 1))) with s² = 42 / 7.
        let expected_r = (2.5 - 6.5) / 6.0_f64.sqrt() * (16.0_f64 / 56.0).sqrt();
        assert!((result.r - expected_r).abs() < TOLERANCE);
        assert!(result.r < 0.0);

        // Pooled s² = (3 * 5/3 + 3 * 5/3) / 6.
        let test = result.test.unwrap();
        let expected_t = -4.0 / ((10.0_f64 / 6.0).sqrt() * 0.5_f64.sqrt());
        assert!((test.t - expected_t).abs() < TOLERANCE);
        assert_eq!(test.df, 6.0);
        // Reference: regularized incomplete beta I_{df/(df+t²)}(df/2, 1/2).
        assert!((test.p_value - 0.004_659_214_943_993_936).abs() < 1e-8);
    }

    #[test]
    fn test_hand_computed_other_coding_flips_sign() {
        let values = some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let is_b = [false, false, false, false, true, true, true, true];
        let result = point_biserial(&values, &is_b).unwrap();
        let expected_r = (6.5 - 2.5) / 6.0_f64.sqrt() * (16.0_f64 / 56.0).sqrt();
        assert!((result.r - expected_r).abs() < TOLERANCE);
        assert!(result.r > 0.0);
    }

    #[test]
    fn test_t_agrees_with_r() {
        // For a two-group split, t = r * sqrt(df / (1 - r²)).
        let values = some(&[3.1, 4.7, 2.2, 5.9, 4.4, 6.1, 3.8, 7.2, 5.5]);
        let flags = [true, false, true, false, true, false, true, false, false];
        let result = point_biserial(&values, &flags).unwrap();
        let test = result.test.unwrap();
        let from_r = result.r * (test.df / (1.0 - result.r.powi(2))).sqrt();
        assert!((test.t - from_r).abs() < 1e-9);
    }

    #[test]
    fn test_constant_partitions_report_pooled_zero_variance() {
        let values = some(&[10.0, 20.0, 10.0, 20.0, 10.0, 20.0]);
        let flags = [true, false, true, false, true, false];
        let result = point_biserial(&values, &flags).unwrap();

        assert_eq!(result.mean_in, 10.0);
        assert_eq!(result.mean_out, 20.0);
        assert!((result.r + 1.0).abs() < TOLERANCE);
        assert_eq!(
            result.test,
            Err(StatsError::ZeroVariance(VarianceScope::Pooled))
        );
        assert_eq!(
            result.p_value(),
            Err(StatsError::ZeroVariance(VarianceScope::Pooled))
        );
    }

    #[test]
    fn test_constant_series_is_zero_variance() {
        let values = some(&[0.1, 0.1, 0.1, 0.1]);
        let result = point_biserial(&values, &[true, true, false, false]);
        assert_eq!(
            result,
            Err(StatsError::ZeroVariance(VarianceScope::Overall))
        );
    }

    #[test]
    fn test_all_true_or_all_false_is_insufficient() {
        let values = some(&[1.0, 2.0, 3.0]);
        let all_true = point_biserial(&values, &[true; 3]);
        let all_false = point_biserial(&values, &[false; 3]);
        assert_eq!(
            all_true,
            Err(StatsError::InsufficientData {
                required: 2,
                found: 0
            })
        );
        assert_eq!(
            all_false,
            Err(StatsError::InsufficientData {
                required: 2,
                found: 0
            })
        );
    }

    #[test]
    fn test_missing_rows_are_excluded_from_counts() {
        let values = vec![Some(1.0), None, Some(2.0), Some(f64::NAN), Some(5.0), Some(6.0)];
        let flags = [true, true, true, false, false, false];
        let result = point_biserial(&values, &flags).unwrap();
        assert_eq!(result.n_in, 2);
        assert_eq!(result.n_out, 2);
        assert_eq!(result.mean_in, 1.5);
        assert_eq!(result.mean_out, 5.5);
    }

    #[test]
    fn test_one_valid_row_in_group_is_insufficient() {
        let values = vec![Some(1.0), None, Some(5.0), Some(6.0)];
        let flags = [true, true, false, false];
        assert_eq!(
            point_biserial(&values, &flags),
            Err(StatsError::InsufficientData {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            point_biserial(&[Some(1.0)], &[true, false]),
            Err(StatsError::LengthMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn test_equal_means_give_zero_r() {
        let values = some(&[1.0, 3.0, 2.0, 2.0]);
        let result = point_biserial(&values, &[true, true, false, false]).unwrap();
        assert_eq!(result.r, 0.0);
        let test = result.test.unwrap();
        assert_eq!(test.t, 0.0);
        assert!((test.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_by_group_isolates_degenerate_label() {
        let values = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let labels = ["a", "a", "b", "b", "c"];
        let results = point_biserial_by_group(&values, &labels).unwrap();

        assert_eq!(
            results.iter().map(|r| r.label).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert!(results[0].outcome.is_ok());
        assert!(results[1].outcome.is_ok());
        assert_eq!(
            results[2].outcome,
            Err(StatsError::InsufficientData {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_idempotent() {
        let values = some(&[2.5, 9.1, 4.4, 7.3, 1.2, 8.8, 5.0, 6.1]);
        let labels = [1, 2, 1, 2, 1, 2, 3, 3];
        let first = point_biserial_by_group(&values, &labels).unwrap();
        let second = point_biserial_by_group(&values, &labels).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(&second) {
            let (a, b) = (a.outcome.as_ref().unwrap(), b.outcome.as_ref().unwrap());
            assert_eq!(a.r.to_bits(), b.r.to_bits());
            assert_eq!(
                a.p_value().unwrap().to_bits(),
                b.p_value().unwrap().to_bits()
            );
        }
    }

    #[test]
    fn test_idempotent_with_degenerate_label() {
        let values = some(&[2.5, 9.1, 4.4, 7.3, 1.2, 8.8, 5.0]);
        let labels = [1, 2, 1, 2, 1, 2, 3];
        let first = point_biserial_by_group(&values, &labels).unwrap();
        let second = point_biserial_by_group(&values, &labels).unwrap();
        assert_eq!(first, second);
        assert!(first[2].outcome.as_ref().unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_huge_values_keep_sign_and_finite_results() {
        let values = some(&[1e200, 2e200, -1e200, -2e200]);
        let result = point_biserial(&values, &[true, true, false, false]).unwrap();
        assert_eq!(result.mean_in, 1.5e200);
        assert_eq!(result.mean_out, -1.5e200);
        assert!(result.r > 0.0);

        // Same split at unit scale gives the same r and t.
        let unit = point_biserial(&some(&[1.0, 2.0, -1.0, -2.0]), &[true, true, false, false])
            .unwrap();
        assert!((result.r - unit.r).abs() < 1e-12);
        let (test, unit_test) = (result.test.unwrap(), unit.test.unwrap());
        assert!(test.pooled_std_dev.is_finite());
        assert!((test.t - unit_test.t).abs() < 1e-9);
        assert!((test.p_value - unit_test.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_values_near_max_do_not_leak_nan() {
        let values = some(&[1.5e308, 1.0e308, -1.5e308, -1.0e308]);
        let result = point_biserial(&values, &[true, true, false, false]).unwrap();
        assert!(result.mean_in.is_finite() && result.mean_out.is_finite());
        assert!(result.r > 0.0 && result.r <= 1.0);
        let test = result.test.unwrap();
        assert!(test.t.is_finite() && test.t > 0.0);
        assert!((0.0..=1.0).contains(&test.p_value));
    }

    fn two_group_data() -> impl Strategy<Value = (Vec<f64>, Vec<bool>)> {
        (4_usize..40)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec(-1000.0_f64..1000.0, n),
                    prop::collection::vec(any::<bool>(), n),
                )
            })
            .prop_filter("both sides need two rows", |(_, flags)| {
                let n1 = flags.iter().filter(|f| **f).count();
                n1 >= 2 && flags.len() - n1 >= 2
            })
    }

    proptest! {
        #[test]
        fn prop_complementary_indicators_negate_r((values, flags) in two_group_data()) {
            let values = some(&values);
            let inverse = flags.iter().map(|f| !f).collect::<Vec<_>>();
            let forward = point_biserial(&values, &flags);
            let backward = point_biserial(&values, &inverse);
            match (forward, backward) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a.r, -b.r);
                    prop_assert_eq!(a.r.abs(), b.r.abs());
                }
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                (a, b) => prop_assert!(false, "mismatched outcomes: {:?} vs {:?}", a, b),
            }
        }

        #[test]
        fn prop_r_sign_follows_mean_difference((values, flags) in two_group_data()) {
            let values = some(&values);
            if let Ok(result) = point_biserial(&values, &flags) {
                prop_assert!((-1.0..=1.0).contains(&result.r));
                let diff = result.mean_in - result.mean_out;
                if diff > 0.0 {
                    prop_assert!(result.r >= 0.0);
                } else if diff < 0.0 {
                    prop_assert!(result.r <= 0.0);
                } else {
                    prop_assert_eq!(result.r, 0.0);
                }
            }
        }

        #[test]
        fn prop_p_value_in_unit_interval((values, flags) in two_group_data()) {
            let values = some(&values);
            if let Ok(result) = point_biserial(&values, &flags) {
                if let Ok(p) = result.p_value() {
                    prop_assert!((0.0..=1.0).contains(&p));
                }
            }
        }
    }
}
