//! Dashboard configuration
//!
//! Describes which columns a data file has, how categorical codes map to
//! labels, which cell texts mean "missing", and which columns each section
//! uses by default. Every field has a default reproducing the BMI and
//! health-factors dashboard, so a configuration file only needs to list
//! what differs.
//!
//! ```
//! use bmiscope_analysis::{config::DashboardConfig, dataset::ColumnKind};
//!
//! let config: DashboardConfig = serde_json::from_str(
//!     r#"{ "measurement": "Waist", "columns": [
//!         { "name": "Waist", "kind": "continuous" },
//!         { "name": "Smoker", "kind": "categorical" }
//!     ], "codebooks": { "Smoker": { "labels": { "1": "Yes", "2": "No" } } } }"#,
//! ).unwrap();
//! config.validate().unwrap();
//!
//! assert_eq!(config.kind_of("Smoker"), Some(ColumnKind::Categorical));
//! assert_eq!(config.preview_rows, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    codebook::{Codebook, CodebookSet},
    dataset::ColumnKind,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("schema has no columns")]
    EmptySchema,
    #[display("column `{name}` is declared more than once")]
    DuplicateColumn { name: String },
    #[display("measurement column `{name}` is not declared in the schema")]
    UnknownMeasurement { name: String },
    #[display("measurement column `{name}` must be continuous")]
    CategoricalMeasurement { name: String },
    #[display("codebook given for `{name}`, which is not a categorical column")]
    StrayCodebook { name: String },
}

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
        }
    }
}

/// Columns a section uses when none is given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDefaults {
    /// Variable correlated with and regressed against the measurement.
    pub variable: String,
    /// Grouping column of the group-wise section.
    pub category: String,
    /// Grouping column of the interaction section.
    pub interaction_group: String,
}

impl Default for SectionDefaults {
    fn default() -> Self {
        Self {
            variable: "Age".to_owned(),
            category: "Gender".to_owned(),
            interaction_group: "Gender".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Continuous column every section analyses.
    pub measurement: String,
    /// Columns read from the data file, in display order.
    pub columns: Vec<ColumnSpec>,
    /// Code labels per categorical column.
    pub codebooks: CodebookSet,
    /// Cell texts read as missing (compared after trimming).
    pub missing_tokens: Vec<String>,
    /// Rows shown in the overview preview.
    pub preview_rows: usize,
    pub defaults: SectionDefaults,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        use ColumnKind::{Categorical, Continuous};

        let columns = vec![
            ColumnSpec::new("BMI", Continuous),
            ColumnSpec::new("Gender", Categorical),
            ColumnSpec::new("Race", Categorical),
            ColumnSpec::new("Age", Continuous),
            ColumnSpec::new("Income Ratio", Continuous),
            ColumnSpec::new("LDL", Continuous),
            ColumnSpec::new("Blood Pressure", Continuous),
            ColumnSpec::new("Diabetes", Categorical),
        ];

        let mut codebooks = CodebookSet::default();
        codebooks.insert(
            "Gender",
            Codebook::from_pairs([("1", "Male"), ("2", "Female")]),
        );
        codebooks.insert(
            "Race",
            Codebook::from_pairs([
                ("1", "Mexican American"),
                ("2", "Other Hispanic"),
                ("3", "Non-Hispanic White"),
                ("4", "Non-Hispanic Black"),
                ("5", "Other Race"),
            ]),
        );
        codebooks.insert(
            "Diabetes",
            Codebook::from_pairs([("1", "Yes"), ("2", "No"), ("3", "Borderline")])
                .with_missing(["7", "9"]),
        );

        Self {
            measurement: "BMI".to_owned(),
            columns,
            codebooks,
            missing_tokens: ["", "NA", "NaN", "."].map(str::to_owned).to_vec(),
            preview_rows: 5,
            defaults: SectionDefaults::default(),
        }
    }
}

impl DashboardConfig {
    /// Checks the schema is usable.
    ///
    /// Section defaults are not checked here; a default naming an absent
    /// column fails when that section runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::EmptySchema);
        }
        for (i, spec) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == spec.name) {
                return Err(ConfigError::DuplicateColumn {
                    name: spec.name.clone(),
                });
            }
        }
        match self.kind_of(&self.measurement) {
            None => {
                return Err(ConfigError::UnknownMeasurement {
                    name: self.measurement.clone(),
                });
            }
            Some(ColumnKind::Categorical) => {
                return Err(ConfigError::CategoricalMeasurement {
                    name: self.measurement.clone(),
                });
            }
            Some(ColumnKind::Continuous) => {}
        }
        if let Some(name) = self
            .codebooks
            .columns()
            .find(|name| self.kind_of(name) != Some(ColumnKind::Categorical))
        {
            return Err(ConfigError::StrayCodebook {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.kind)
    }

    #[must_use]
    pub fn is_missing_token(&self, cell: &str) -> bool {
        let cell = cell.trim();
        self.missing_tokens.iter().any(|t| t.trim() == cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DashboardConfig::default();
        config.validate().unwrap();
        assert_eq!(config.kind_of("BMI"), Some(ColumnKind::Continuous));
        assert_eq!(config.kind_of("Diabetes"), Some(ColumnKind::Categorical));
        assert_eq!(config.kind_of("Weight"), None);
        assert!(config.is_missing_token(" NA "));
        assert!(config.is_missing_token(""));
        assert!(!config.is_missing_token("0"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "preview_rows": 2, "defaults": { "category": "Race" } }"#)
                .unwrap();
        assert_eq!(config.preview_rows, 2);
        assert_eq!(config.measurement, "BMI");
        assert_eq!(config.defaults.category, "Race");
        assert_eq!(config.defaults.variable, "Age");
        assert!(config.codebooks.get("Gender").is_some());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(serde_json::from_str::<DashboardConfig>(r#"{ "measurment": "BMI" }"#).is_err());
    }

    #[test]
    fn test_validate_errors() {
        let mut config = DashboardConfig {
            measurement: "Gender".to_owned(),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CategoricalMeasurement { .. })
        ));

        config.measurement = "Weight".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownMeasurement { .. })
        ));

        config.measurement = "BMI".to_owned();
        config.codebooks.insert("Age", Codebook::default());
        assert_eq!(
            config.validate(),
            Err(ConfigError::StrayCodebook {
                name: "Age".to_owned()
            })
        );

        config.columns.push(config.columns[0].clone());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateColumn { .. })
        ));

        config.columns.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptySchema));
    }
}
