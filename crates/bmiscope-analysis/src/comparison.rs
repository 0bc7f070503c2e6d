//! Group-wise section: the measurement across the levels of a category

use bmiscope_stats::{
    biserial::BiserialResult,
    boxplot::{self, GroupBox},
    group::GroupStats,
    sample::Sample,
};

use crate::{
    config::DashboardConfig,
    dataset::Dataset,
    report::{self, ReportError},
};

/// The measurement compared across the levels of one categorical column.
///
/// Every list is in first-seen label order and has one entry per level.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    pub measurement: String,
    pub category: String,
    /// Rows left out because their label was missing.
    pub dropped_rows: usize,
    pub groups: Vec<GroupStats<String>>,
    pub biserial: Vec<BiserialResult<String>>,
    pub boxes: Vec<GroupBox<String>>,
}

/// Compares the configured measurement across the levels of `category`.
///
/// Codebook labels are applied first; rows whose label is missing are left
/// out of every statistic.
///
/// ```
/// use bmiscope_analysis::{comparison, config::DashboardConfig, dataset::Dataset};
///
/// let report = comparison::compare_groups(&Dataset::demo(), &DashboardConfig::default(), "Diabetes")
///     .unwrap();
/// let labels = report.groups.iter().map(|g| g.label.as_str()).collect::<Vec<_>>();
/// assert_eq!(labels, ["Yes", "No"]);
/// ```
pub fn compare_groups(
    dataset: &Dataset,
    config: &DashboardConfig,
    category: &str,
) -> Result<GroupComparison, ReportError> {
    let measurement = dataset.continuous(&config.measurement)?;
    let labels = report::recoded_labels(dataset, config, category)?;
    let mut rows = report::labelled_rows(&[measurement], labels, category);
    let values = rows.columns.pop().unwrap_or_default();

    let sample = Sample::new(values, rows.labels)?;
    let groups = sample.group_descriptives();
    let biserial = sample.point_biserial_by_group();
    let boxes = boxplot::group_boxes(sample.measurements(), sample.labels())?;

    for result in &biserial {
        if let Err(err) = &result.outcome {
            tracing::debug!(category, label = %result.label, %err, "point-biserial undefined");
        }
    }
    tracing::debug!(
        category,
        rows = sample.len(),
        valid = sample.valid_len(),
        levels = groups.len(),
        "groups compared"
    );

    Ok(GroupComparison {
        measurement: config.measurement.clone(),
        category: category.to_owned(),
        dropped_rows: rows.dropped,
        groups,
        biserial,
        boxes,
    })
}
