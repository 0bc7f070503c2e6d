//! JSON output documents
//!
//! Undefined statistics serialise as `{"undefined": "<reason>"}` in place of
//! the number.

use bmiscope_analysis::{
    comparison::GroupComparison,
    overview::Overview,
    relationship::{Interaction, PairCorrelation, Regression},
};
use bmiscope_stats::{
    StatsError, boxplot::BoxSummary, correlation::CorrelationMatrix, regression::LinearFit,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A value, or why it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Value(T),
    Undefined { undefined: String },
}

impl<T> Outcome<T> {
    pub fn from_result<U>(result: Result<&U, &StatsError>, f: impl FnOnce(&U) -> T) -> Self {
        match result {
            Ok(value) => Outcome::Value(f(value)),
            Err(err) => Outcome::Undefined {
                undefined: err.to_string(),
            },
        }
    }
}

impl From<&Result<f64, StatsError>> for Outcome<f64> {
    fn from(result: &Result<f64, StatsError>) -> Self {
        Outcome::from_result(result.as_ref(), |v| *v)
    }
}

/// Common header of every document.
#[derive(Debug, Serialize)]
pub struct Report<T> {
    /// Timestamp when the report was generated (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Data file, or `built-in sample`
    pub source: String,
    pub section: &'static str,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Report<T> {
    pub fn new(source: String, section: &'static str, body: T) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
            section,
            body,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewDoc {
    pub rows: usize,
    pub continuous: Vec<ContinuousDoc>,
    pub categorical: Vec<CategoricalDoc>,
    pub preview: PreviewDoc,
}

#[derive(Debug, Serialize)]
pub struct ContinuousDoc {
    pub name: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<Outcome<f64>>,
}

#[derive(Debug, Serialize)]
pub struct CategoricalDoc {
    pub name: String,
    pub missing: usize,
    pub levels: Vec<LevelDoc>,
}

#[derive(Debug, Serialize)]
pub struct LevelDoc {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct PreviewDoc {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&Overview> for OverviewDoc {
    fn from(overview: &Overview) -> Self {
        Self {
            rows: overview.row_count,
            continuous: overview
                .continuous
                .iter()
                .map(|c| {
                    let stats = c.stats.as_ref();
                    ContinuousDoc {
                        name: c.name.clone(),
                        count: stats.map_or(0, |s| s.count),
                        missing: c.missing,
                        min: stats.map(|s| s.min),
                        max: stats.map(|s| s.max),
                        mean: stats.map(|s| s.mean),
                        median: stats.map(|s| s.median),
                        std_dev: stats.map(|s| Outcome::from(&s.std_dev)),
                    }
                })
                .collect(),
            categorical: overview
                .categorical
                .iter()
                .map(|c| CategoricalDoc {
                    name: c.name.clone(),
                    missing: c.missing,
                    levels: c
                        .levels
                        .iter()
                        .map(|l| LevelDoc {
                            label: l.label.clone(),
                            count: l.count,
                        })
                        .collect(),
                })
                .collect(),
            preview: PreviewDoc {
                headers: overview.preview.headers.clone(),
                rows: overview.preview.rows.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CorrelationDoc {
    pub columns: Vec<String>,
    /// Pearson `r`, row-major.
    pub matrix: Vec<Vec<Outcome<f64>>>,
    pub selected: PairDoc,
}

#[derive(Debug, Serialize)]
pub struct PairDoc {
    pub variable: String,
    pub measurement: String,
    pub n: Option<usize>,
    pub r: Outcome<f64>,
    pub p_value: Outcome<f64>,
}

impl CorrelationDoc {
    pub fn new(matrix: &CorrelationMatrix<String>, pair: &PairCorrelation) -> Self {
        let size = matrix.names().len();
        let rows = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| Outcome::from_result(matrix.get(i, j), |c| c.r))
                    .collect()
            })
            .collect();
        let result = pair.result.as_ref();
        Self {
            columns: matrix.names().to_vec(),
            matrix: rows,
            selected: PairDoc {
                variable: pair.variable.clone(),
                measurement: pair.measurement.clone(),
                n: result.ok().map(|c| c.n),
                r: Outcome::from_result(result, |c| c.r),
                p_value: match result {
                    Ok(c) => Outcome::from(&c.p_value),
                    Err(err) => Outcome::Undefined {
                        undefined: err.to_string(),
                    },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupWiseDoc {
    pub measurement: String,
    pub category: String,
    pub dropped_rows: usize,
    pub groups: Vec<GroupDoc>,
}

#[derive(Debug, Serialize)]
pub struct GroupDoc {
    pub label: String,
    pub count: usize,
    pub mean: Outcome<f64>,
    pub std_dev: Outcome<f64>,
    /// Point-biserial correlation against all other groups.
    pub r: Outcome<f64>,
    pub t: Outcome<f64>,
    pub p_value: Outcome<f64>,
    #[serde(rename = "box")]
    pub box_summary: Option<BoxDoc>,
}

#[derive(Debug, Serialize)]
pub struct BoxDoc {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl From<&BoxSummary> for BoxDoc {
    fn from(summary: &BoxSummary) -> Self {
        Self {
            min: summary.min,
            q1: summary.q1,
            median: summary.median,
            q3: summary.q3,
            max: summary.max,
            lower_whisker: summary.lower_whisker,
            upper_whisker: summary.upper_whisker,
            outliers: summary.outliers.clone(),
        }
    }
}

impl From<&GroupComparison> for GroupWiseDoc {
    fn from(report: &GroupComparison) -> Self {
        let groups = report
            .groups
            .iter()
            .zip(&report.biserial)
            .zip(&report.boxes)
            .map(|((stats, biserial), boxed)| {
                let outcome = biserial.outcome.as_ref();
                let test = outcome.map_err(|err| *err).and_then(|pb| pb.test);
                GroupDoc {
                    label: stats.label.clone(),
                    count: stats.count,
                    mean: Outcome::from(&stats.mean),
                    std_dev: Outcome::from(&stats.std_dev),
                    r: Outcome::from_result(outcome, |pb| pb.r),
                    t: Outcome::from_result(test.as_ref(), |t| t.t),
                    p_value: Outcome::from_result(test.as_ref(), |t| t.p_value),
                    box_summary: boxed.summary.as_ref().map(BoxDoc::from),
                }
            })
            .collect();
        Self {
            measurement: report.measurement.clone(),
            category: report.category.clone(),
            dropped_rows: report.dropped_rows,
            groups,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FitDoc {
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub slope_std_err: Outcome<f64>,
    /// Trend line end points `[x, y]` over the observed `x` range.
    pub line: [[f64; 2]; 2],
}

impl From<&LinearFit> for FitDoc {
    fn from(fit: &LinearFit) -> Self {
        let [(x0, y0), (x1, y1)] = fit.endpoints();
        Self {
            n: fit.n,
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
            slope_std_err: Outcome::from(&fit.slope_std_err),
            line: [[x0, y0], [x1, y1]],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegressionDoc {
    pub measurement: String,
    pub variable: String,
    pub fit: Outcome<FitDoc>,
}

impl From<&Regression> for RegressionDoc {
    fn from(report: &Regression) -> Self {
        Self {
            measurement: report.measurement.clone(),
            variable: report.variable.clone(),
            fit: Outcome::from_result(report.fit.as_ref(), |fit| FitDoc::from(fit)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InteractionDoc {
    pub measurement: String,
    pub variable: String,
    pub group: String,
    pub dropped_rows: usize,
    pub fits: Vec<GroupFitDoc>,
}

#[derive(Debug, Serialize)]
pub struct GroupFitDoc {
    pub label: String,
    pub fit: Outcome<FitDoc>,
}

impl From<&Interaction> for InteractionDoc {
    fn from(report: &Interaction) -> Self {
        Self {
            measurement: report.measurement.clone(),
            variable: report.variable.clone(),
            group: report.group.clone(),
            dropped_rows: report.dropped_rows,
            fits: report
                .fits
                .iter()
                .map(|g| GroupFitDoc {
                    label: g.label.clone(),
                    fit: Outcome::from_result(g.fit.as_ref(), |fit| FitDoc::from(fit)),
                })
                .collect(),
        }
    }
}
