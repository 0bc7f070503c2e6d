/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: the k-th
/// percentile sits at fractional position `(n - 1) * k / 100`. This is the
/// quantile definition used by common data-frame and box-plot tooling.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let position = last as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = (position.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = position - lower as f64;
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}
