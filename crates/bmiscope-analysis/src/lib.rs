//! Dataset handling and dashboard sections for BMI and health-factor surveys
//!
//! This crate sits between raw survey files and the pure computations of
//! [`bmiscope_stats`]: it loads typed columns, turns categorical codes into
//! labels, drops unlabelled rows, and assembles one typed report per
//! dashboard section.
//!
//! # Workflow
//!
//! 1. **Configure** ([`config::DashboardConfig`]): schema, codebooks, missing
//!    tokens and section defaults. `Default` reproduces the health survey.
//! 2. **Load** ([`load::read_csv`]) a CSV file, or start from
//!    [`dataset::Dataset::demo`].
//! 3. **Report** per section:
//!    - [`overview::overview`]: column summaries and a data preview
//!    - [`relationship::correlation_matrix`] and [`relationship::correlate`]
//!    - [`comparison::compare_groups`]: group statistics, point-biserial
//!      correlations and box summaries
//!    - [`relationship::regress`]: least squares trend line
//!    - [`relationship::interaction`]: one trend line per level of a category
//!
//! # Example
//!
//! ```
//! use bmiscope_analysis::{comparison, config::DashboardConfig, load};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::default();
//! let csv = "BMI,Gender,Race,Age,Income Ratio,LDL,Blood Pressure,Diabetes\n\
//!            27.9,1,3,45,1.5,120,120,1\n\
//!            23.4,2,1,34,2.0,130,110,2\n\
//!            31.1,1,4,67,4.5,110,130,2\n\
//!            22.7,2,2,29,3.2,100,115,1\n";
//! let dataset = load::read_csv(csv.as_bytes(), &config)?;
//!
//! let report = comparison::compare_groups(&dataset, &config, "Gender")?;
//! for group in &report.groups {
//!     println!("{}: n = {}, mean = {:?}", group.label, group.count, group.mean);
//! }
//! # Ok(())
//! # }
//! ```

pub mod codebook;
pub mod comparison;
pub mod config;
pub mod dataset;
pub mod load;
pub mod overview;
pub mod relationship;
pub mod report;
