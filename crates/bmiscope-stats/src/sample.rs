//! Paired measurement/label observations
//!
//! A [`Sample`] pairs a continuous measurement with a categorical group label,
//! index by index. Measurements may be missing (`None`, or any non-finite
//! value); such rows are dropped from every computation and every group count.
//!
//! Groups are always reported in **first-seen order** of their labels, which
//! keeps output deterministic without requiring labels to be ordered.
//!
//! # Examples
//!
//! ```
//! use bmiscope_stats::sample::Sample;
//!
//! let sample = Sample::new(
//!     vec![Some(27.9), Some(23.4), None, Some(22.7)],
//!     vec!["Male", "Female", "Male", "Female"],
//! )
//! .unwrap();
//!
//! assert_eq!(sample.valid_len(), 3);
//! let groups = sample.group_descriptives();
//! assert_eq!(groups[0].label, "Male");
//! assert_eq!(groups[0].count, 1);
//! ```

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use crate::{
    biserial::{self, BiserialResult},
    error::StatsError,
    group::{self, GroupStats},
};

/// Returns the measurement if it is present and finite.
#[must_use]
pub fn valid_value(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Index-aligned measurements and group labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<L> {
    measurements: Vec<Option<f64>>,
    labels: Vec<L>,
}

impl<L> Sample<L>
where
    L: Clone + Eq + Hash,
{
    /// Pairs measurements with labels.
    ///
    /// Fails with [`StatsError::LengthMismatch`] if the columns differ in length.
    pub fn new(measurements: Vec<Option<f64>>, labels: Vec<L>) -> Result<Self, StatsError> {
        StatsError::check_aligned(measurements.len(), labels.len())?;
        Ok(Self {
            measurements,
            labels,
        })
    }

    /// Number of rows, including rows with a missing measurement.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows with a valid measurement.
    #[must_use]
    pub fn valid_len(&self) -> usize {
        self.measurements
            .iter()
            .filter(|m| valid_value(**m).is_some())
            .count()
    }

    #[must_use]
    pub fn measurements(&self) -> &[Option<f64>] {
        &self.measurements
    }

    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Distinct labels in first-seen order.
    #[must_use]
    pub fn distinct_labels(&self) -> Vec<L> {
        distinct_in_order(&self.labels)
    }

    /// Per-group mean and sample standard deviation.
    #[must_use]
    pub fn group_descriptives(&self) -> Vec<GroupStats<L>> {
        group::group_descriptives_unchecked(&self.measurements, &self.labels)
    }

    /// Point-biserial correlation of each group against all other rows.
    #[must_use]
    pub fn point_biserial_by_group(&self) -> Vec<BiserialResult<L>> {
        biserial::point_biserial_by_group_unchecked(&self.measurements, &self.labels)
    }
}

/// Distinct values in order of first appearance.
pub(crate) fn distinct_in_order<L>(labels: &[L]) -> Vec<L>
where
    L: Clone + Eq + Hash,
{
    let mut seen = HashSet::new();
    labels
        .iter()
        .filter(|label| seen.insert(*label))
        .cloned()
        .collect()
}

/// Whether every value equals the first one (vacuously true below two values).
#[expect(clippy::float_cmp)]
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Valid measurements bucketed by label, buckets in first-seen order.
///
/// Labels whose rows are all missing still get an (empty) bucket.
pub(crate) fn partition_by_label<L>(measurements: &[Option<f64>], labels: &[L]) -> Vec<(L, Vec<f64>)>
where
    L: Clone + Eq + Hash,
{
    let mut index = HashMap::new();
    let mut buckets: Vec<(L, Vec<f64>)> = Vec::new();
    for (value, label) in measurements.iter().zip(labels) {
        let slot = *index.entry(label).or_insert_with(|| {
            buckets.push((label.clone(), Vec::new()));
            buckets.len() - 1
        });
        if let Some(v) = valid_value(*value) {
            buckets[slot].1.push(v);
        }
    }
    buckets
}
