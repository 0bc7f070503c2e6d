//! Shared plumbing of the dashboard sections

use bmiscope_stats::StatsError;

use crate::{
    config::DashboardConfig,
    dataset::{Dataset, DatasetError},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ReportError {
    #[display("{_0}")]
    Dataset(DatasetError),
    #[display("{_0}")]
    Stats(StatsError),
}

/// Categorical column with codebook labels applied.
pub(crate) fn recoded_labels(
    dataset: &Dataset,
    config: &DashboardConfig,
    column: &str,
) -> Result<Vec<Option<String>>, DatasetError> {
    let raw = dataset.categorical(column)?;
    Ok(config.codebooks.recode_column(column, raw))
}

/// Measurement and labels over the rows that have a label.
pub(crate) struct LabelledRows {
    pub(crate) columns: Vec<Vec<Option<f64>>>,
    pub(crate) labels: Vec<String>,
    pub(crate) dropped: usize,
}

/// Keeps rows whose label is present, carrying every numeric column along.
pub(crate) fn labelled_rows(
    numeric: &[&[Option<f64>]],
    labels: Vec<Option<String>>,
    column: &str,
) -> LabelledRows {
    let mut columns = vec![Vec::with_capacity(labels.len()); numeric.len()];
    let mut kept = Vec::with_capacity(labels.len());
    let mut dropped = 0;
    for (row, label) in labels.into_iter().enumerate() {
        let Some(label) = label else {
            dropped += 1;
            continue;
        };
        for (out, values) in columns.iter_mut().zip(numeric) {
            out.push(values.get(row).copied().flatten());
        }
        kept.push(label);
    }
    if dropped > 0 {
        tracing::debug!(column, dropped, "rows without a label dropped");
    }
    LabelledRows {
        columns,
        labels: kept,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_rows() {
        let bmi = [Some(20.0), Some(21.0), None];
        let age = [Some(30.0), Some(31.0), Some(32.0)];
        let rows = labelled_rows(
            &[&bmi, &age],
            vec![Some("a".to_owned()), None, Some("b".to_owned())],
            "Group",
        );
        assert_eq!(rows.dropped, 1);
        assert_eq!(rows.labels, vec!["a", "b"]);
        assert_eq!(rows.columns[0], vec![Some(20.0), None]);
        assert_eq!(rows.columns[1], vec![Some(30.0), Some(32.0)]);
    }

    #[test]
    fn test_recoded_labels() {
        let labels = recoded_labels(&Dataset::demo(), &DashboardConfig::default(), "Gender").unwrap();
        assert_eq!(labels[0].as_deref(), Some("Male"));
        assert_eq!(labels[1].as_deref(), Some("Female"));
    }
}
