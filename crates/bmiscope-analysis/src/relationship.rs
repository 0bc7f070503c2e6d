//! Correlation, regression and interaction sections
//!
//! All three relate the measurement to other continuous columns. Missing
//! values are dropped pairwise.

use bmiscope_stats::{
    StatsError,
    correlation::{self, Correlation, CorrelationMatrix},
    regression::{self, GroupFit, LinearFit},
};

use crate::{
    config::DashboardConfig,
    dataset::{ColumnKind, Dataset},
    report::{self, ReportError},
};

/// Pearson correlation of every pair of continuous columns, in dataset order.
///
/// ```
/// use bmiscope_analysis::{dataset::Dataset, relationship};
///
/// let matrix = relationship::correlation_matrix(&Dataset::demo()).unwrap();
/// assert_eq!(matrix.names().len(), 5);
/// assert!((matrix.get(0, 0).unwrap().r - 1.0).abs() < 1e-12);
/// ```
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix<String>, ReportError> {
    let columns = dataset
        .names_of_kind(ColumnKind::Continuous)
        .map(|name| {
            dataset
                .continuous(name)
                .map(|values| (name.to_owned(), values))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let matrix = CorrelationMatrix::new(&columns)?;
    tracing::debug!(columns = columns.len(), "correlation matrix computed");
    Ok(matrix)
}

/// Correlation of the measurement with one other column.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCorrelation {
    pub variable: String,
    pub measurement: String,
    pub result: Result<Correlation, StatsError>,
}

/// Correlates the measurement with `variable`.
pub fn correlate(
    dataset: &Dataset,
    config: &DashboardConfig,
    variable: &str,
) -> Result<PairCorrelation, ReportError> {
    let x = dataset.continuous(variable)?;
    let y = dataset.continuous(&config.measurement)?;
    Ok(PairCorrelation {
        variable: variable.to_owned(),
        measurement: config.measurement.clone(),
        result: correlation::pearson(x, y),
    })
}

/// The measurement regressed on one continuous column.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub variable: String,
    pub measurement: String,
    pub fit: Result<LinearFit, StatsError>,
}

/// Fits `measurement = intercept + slope * variable`.
///
/// ```
/// use bmiscope_analysis::{config::DashboardConfig, dataset::Dataset, relationship};
///
/// let report = relationship::regress(&Dataset::demo(), &DashboardConfig::default(), "Age").unwrap();
/// let fit = report.fit.unwrap();
/// assert_eq!(fit.n, 7);
/// assert_eq!(fit.endpoints()[0].0, 29.0);
/// ```
pub fn regress(
    dataset: &Dataset,
    config: &DashboardConfig,
    variable: &str,
) -> Result<Regression, ReportError> {
    let x = dataset.continuous(variable)?;
    let y = dataset.continuous(&config.measurement)?;
    let fit = LinearFit::fit(x, y);
    if let Err(err) = &fit {
        tracing::warn!(variable, %err, "regression undefined");
    }
    Ok(Regression {
        variable: variable.to_owned(),
        measurement: config.measurement.clone(),
        fit,
    })
}

/// The measurement regressed on a continuous column within each level of a
/// categorical one.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub variable: String,
    pub measurement: String,
    pub group: String,
    /// Rows left out because their label was missing.
    pub dropped_rows: usize,
    /// One fit per level, first-seen order.
    pub fits: Vec<GroupFit<String>>,
}

/// Fits the measurement on `variable` separately for each level of `group`.
pub fn interaction(
    dataset: &Dataset,
    config: &DashboardConfig,
    variable: &str,
    group: &str,
) -> Result<Interaction, ReportError> {
    let x = dataset.continuous(variable)?;
    let y = dataset.continuous(&config.measurement)?;
    let labels = report::recoded_labels(dataset, config, group)?;
    let rows = report::labelled_rows(&[x, y], labels, group);

    let fits = match rows.columns.as_slice() {
        [x, y] => regression::fit_by_group(x, y, &rows.labels)?,
        _ => Vec::new(),
    };
    for fit in &fits {
        if let Err(err) = &fit.fit {
            tracing::debug!(group, label = %fit.label, %err, "group regression undefined");
        }
    }

    Ok(Interaction {
        variable: variable.to_owned(),
        measurement: config.measurement.clone(),
        group: group.to_owned(),
        dropped_rows: rows.dropped,
        fits,
    })
}
