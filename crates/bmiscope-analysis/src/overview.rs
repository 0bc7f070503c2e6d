//! Home section: what the data looks like
//!
//! Summarises every column (descriptive statistics for continuous columns,
//! level counts for categorical ones) and renders the first rows with
//! codebook labels applied.

use bmiscope_stats::descriptive::DescriptiveStats;

use crate::{
    config::DashboardConfig,
    dataset::{ColumnData, Dataset},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub row_count: usize,
    pub continuous: Vec<ContinuousSummary>,
    pub categorical: Vec<CategoricalSummary>,
    pub preview: Preview,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousSummary {
    pub name: String,
    pub missing: usize,
    /// `None` when the column has no valid value.
    pub stats: Option<DescriptiveStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalSummary {
    pub name: String,
    pub missing: usize,
    /// Levels in first-seen order.
    pub levels: Vec<LevelCount>,
}

/// First rows of the dataset as display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Summarises `dataset`.
///
/// ```
/// use bmiscope_analysis::{config::DashboardConfig, dataset::Dataset, overview};
///
/// let summary = overview::overview(&Dataset::demo(), &DashboardConfig::default());
/// assert_eq!(summary.row_count, 7);
/// assert_eq!(summary.preview.rows.len(), 5);
/// assert_eq!(summary.preview.rows[0][1], "Male");
/// ```
#[must_use]
pub fn overview(dataset: &Dataset, config: &DashboardConfig) -> Overview {
    let mut continuous = Vec::new();
    let mut categorical = Vec::new();
    let mut display_columns = Vec::with_capacity(dataset.columns().len());

    for column in dataset.columns() {
        let missing = column.data.missing_count();
        match &column.data {
            ColumnData::Continuous(values) => {
                continuous.push(ContinuousSummary {
                    name: column.name.clone(),
                    missing,
                    stats: DescriptiveStats::new(values.iter().flatten().copied()),
                });
                display_columns.push(column.data.clone());
            }
            ColumnData::Categorical(values) => {
                let labels = config.codebooks.recode_column(&column.name, values);
                categorical.push(CategoricalSummary {
                    name: column.name.clone(),
                    missing: labels.iter().filter(|l| l.is_none()).count(),
                    levels: level_counts(&labels),
                });
                display_columns.push(ColumnData::Categorical(labels));
            }
        }
    }

    let preview_rows = config.preview_rows.min(dataset.row_count());
    let preview = Preview {
        headers: dataset.columns().iter().map(|c| c.name.clone()).collect(),
        rows: (0..preview_rows)
            .map(|row| display_columns.iter().map(|c| c.display_cell(row)).collect())
            .collect(),
    };

    Overview {
        row_count: dataset.row_count(),
        continuous,
        categorical,
        preview,
    }
}

fn level_counts(labels: &[Option<String>]) -> Vec<LevelCount> {
    let mut levels: Vec<LevelCount> = Vec::new();
    for label in labels.iter().flatten() {
        match levels.iter_mut().find(|l| l.label == *label) {
            Some(level) => level.count += 1,
            None => levels.push(LevelCount {
                label: label.clone(),
                count: 1,
            }),
        }
    }
    levels
}
