//! Tail probabilities of Student's t distribution.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Statistic, StatsError};

/// Two-tailed p-value of a t statistic with `df` degrees of freedom.
///
/// Computes `2 * P(T >= |t|)` from the survival function of Student's t
/// distribution, clamped to `[0, 1]`. An infinite `|t|` yields `0.0`; a `NaN`
/// statistic fails with [`StatsError::NonFinite`].
///
/// # Examples
///
/// ```
/// use bmiscope_stats::distribution::two_tailed_p_value;
///
/// let p = two_tailed_p_value(0.0, 10.0).unwrap();
/// assert!((p - 1.0).abs() < 1e-12);
///
/// // t = 2.228 is the 97.5th percentile at 10 degrees of freedom.
/// let p = two_tailed_p_value(2.228_138_851_986_274, 10.0).unwrap();
/// assert!((p - 0.05).abs() < 1e-6);
/// ```
pub fn two_tailed_p_value(t: f64, df: f64) -> Statistic {
    if t.is_nan() {
        return Err(StatsError::NonFinite);
    }
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|_| StatsError::InvalidDegreesOfFreedom { df })?;
    if t.is_infinite() {
        return Ok(0.0);
    }
    let p = 2.0 * dist.sf(t.abs());
    Ok(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_symmetric_in_sign() {
        let pos = two_tailed_p_value(1.7, 6.0).unwrap();
        let neg = two_tailed_p_value(-1.7, 6.0).unwrap();
        assert_eq!(pos, neg);
    }

    #[test]
    fn test_reference_values() {
        // One degree of freedom is the Cauchy distribution: P(|T| >= 1) = 0.5.
        assert_close(two_tailed_p_value(1.0, 1.0).unwrap(), 0.5, 1e-9);
        // Critical values of Student's t at alpha = 0.01 (two-tailed).
        assert_close(two_tailed_p_value(2.845_339_709_785_2, 20.0).unwrap(), 0.01, 1e-6);
        assert_close(two_tailed_p_value(4.604_094_871_415_9, 4.0).unwrap(), 0.01, 1e-6);
    }

    #[test]
    fn test_extreme_t_stays_in_unit_interval() {
        let p = two_tailed_p_value(1e6, 3.0).unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert_eq!(two_tailed_p_value(f64::INFINITY, 3.0), Ok(0.0));
    }

    #[test]
    fn test_invalid_df() {
        assert!(matches!(
            two_tailed_p_value(1.0, 0.0),
            Err(StatsError::InvalidDegreesOfFreedom { .. })
        ));
    }

    #[test]
    fn test_nan_t_is_rejected() {
        assert_eq!(two_tailed_p_value(f64::NAN, 5.0), Err(StatsError::NonFinite));
    }
}
