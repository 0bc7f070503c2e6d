//! Statistical computations for the bmiscope health-survey dashboard.
//!
//! Every function here is pure: it takes already-typed, index-aligned columns
//! and returns freshly computed results. Missing measurements are `None` (or
//! any non-finite value) and are dropped consistently from both the statistic
//! and its counts. Degenerate input never panics and never leaks `NaN` into a
//! result; it is reported as a [`StatsError`] next to the affected group.
//!
//! # Modules
//!
//! - [`group`]: per-group mean and sample standard deviation
//! - [`biserial`]: point-biserial correlation of each group against the rest,
//!   with a pooled two-sample t-test
//! - [`sample`]: the paired measurement/label [`Sample`](sample::Sample)
//! - [`descriptive`]: descriptive statistics of a single series
//! - [`percentiles`]: interpolated percentiles
//! - [`boxplot`]: five-number summaries with Tukey whiskers
//! - [`correlation`]: Pearson correlation and correlation matrices
//! - [`regression`]: simple linear regression, overall and per group
//! - [`distribution`]: Student's t tail probabilities
//!
//! Groups are always reported in first-seen order of their labels.
//!
//! # Examples
//!
//! ## Comparing BMI across groups
//!
//! ```
//! use bmiscope_stats::{biserial, group};
//!
//! let bmi = [Some(27.9), Some(23.4), Some(31.1), Some(22.7), Some(30.4), Some(35.6), Some(28.9)];
//! let diabetes = ["Yes", "No", "No", "Yes", "No", "Yes", "No"];
//!
//! let stats = group::group_descriptives(&bmi, &diabetes).unwrap();
//! assert_eq!(stats.len(), 2);
//!
//! let results = biserial::point_biserial_by_group(&bmi, &diabetes).unwrap();
//! for result in &results {
//!     match &result.outcome {
//!         Ok(pb) => println!("{}: r = {:.3}, p = {:?}", result.label, pb.r, pb.p_value()),
//!         Err(err) => println!("{}: undefined ({err})", result.label),
//!     }
//! }
//! ```
//!
//! ## Degenerate input is reported, not propagated
//!
//! ```
//! use bmiscope_stats::{StatsError, biserial::point_biserial};
//!
//! let values = [Some(1.0), Some(2.0), Some(3.0)];
//! let err = point_biserial(&values, &[true, true, true]).unwrap_err();
//! assert_eq!(err, StatsError::InsufficientData { required: 2, found: 0 });
//! ```

pub mod biserial;
pub mod boxplot;
pub mod correlation;
pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod group;
pub mod percentiles;
pub mod regression;
pub mod sample;

pub use self::error::{Statistic, StatsError, VarianceScope};
