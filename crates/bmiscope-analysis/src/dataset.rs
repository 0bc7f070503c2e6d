//! Typed, column-oriented survey data
//!
//! A [`Dataset`] is a set of named columns of equal length. Each column is
//! either continuous (`Option<f64>` per row) or categorical (raw code per
//! row). Missing cells are `None` in both kinds.

use serde::{Deserialize, Serialize};

/// Kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[display("continuous")]
    Continuous,
    #[display("categorical")]
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("unknown column `{name}`")]
    UnknownColumn { name: String },
    #[display("column `{name}` is {found}, expected {expected}")]
    WrongKind {
        name: String,
        expected: ColumnKind,
        found: ColumnKind,
    },
    #[display("column `{name}` has {found} rows, expected {expected}")]
    RowCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[display("column `{name}` appears more than once")]
    DuplicateColumn { name: String },
}

/// Values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Continuous(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Continuous(_) => ColumnKind::Continuous,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Continuous(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells. Non-finite numbers count as missing.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Continuous(values) => values
                .iter()
                .filter(|v| !v.is_some_and(f64::is_finite))
                .count(),
            ColumnData::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Cell rendered for display; empty when missing.
    #[must_use]
    pub fn display_cell(&self, row: usize) -> String {
        match self {
            ColumnData::Continuous(values) => values
                .get(row)
                .copied()
                .flatten()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ColumnData::Categorical(values) => {
                values.get(row).cloned().flatten().unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn continuous<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self {
            name: name.into(),
            data: ColumnData::Continuous(values.into_iter().collect()),
        }
    }

    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values.into_iter().map(|v| v.map(Into::into)).collect()),
        }
    }
}

/// Named columns of equal length, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Builds a dataset, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let row_count = columns.first().map_or(0, |c| c.data.len());
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(DatasetError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
            if column.data.len() != row_count {
                return Err(DatasetError::RowCountMismatch {
                    name: column.name.clone(),
                    expected: row_count,
                    found: column.data.len(),
                });
            }
        }
        Ok(Self { columns, row_count })
    }

    /// The seven-row sample shipped with the dashboard.
    ///
    /// Categorical columns hold raw survey codes; apply the configured
    /// codebooks to get labels.
    ///
    /// ```
    /// use bmiscope_analysis::dataset::Dataset;
    ///
    /// let demo = Dataset::demo();
    /// assert_eq!(demo.row_count(), 7);
    /// assert_eq!(demo.continuous("BMI").unwrap()[0], Some(27.9));
    /// assert_eq!(demo.categorical("Gender").unwrap()[1].as_deref(), Some("2"));
    /// ```
    #[must_use]
    pub fn demo() -> Self {
        fn numbers(values: &[f64]) -> Vec<Option<f64>> {
            values.iter().copied().map(Some).collect()
        }
        fn codes(values: &[u8]) -> Vec<Option<String>> {
            values.iter().map(|v| Some(v.to_string())).collect()
        }

        let columns = vec![
            Column::continuous("BMI", numbers(&[27.9, 23.4, 31.1, 22.7, 30.4, 35.6, 28.9])),
            Column::categorical("Gender", codes(&[1, 2, 1, 2, 1, 2, 1])),
            Column::categorical("Race", codes(&[3, 1, 4, 2, 3, 5, 3])),
            Column::continuous("Age", numbers(&[45.0, 34.0, 67.0, 29.0, 50.0, 40.0, 52.0])),
            Column::continuous("Income Ratio", numbers(&[1.5, 2.0, 4.5, 3.2, 1.9, 0.8, 2.4])),
            Column::continuous(
                "LDL",
                numbers(&[120.0, 130.0, 110.0, 100.0, 140.0, 150.0, 125.0]),
            ),
            Column::continuous(
                "Blood Pressure",
                numbers(&[120.0, 110.0, 130.0, 115.0, 125.0, 135.0, 128.0]),
            ),
            Column::categorical("Diabetes", codes(&[1, 2, 2, 1, 2, 1, 2])),
        ];
        Self {
            columns,
            row_count: 7,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Column, DatasetError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::UnknownColumn {
                name: name.to_owned(),
            })
    }

    /// Names of the columns of `kind`, in dataset order.
    pub fn names_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(move |c| c.data.kind() == kind)
            .map(|c| c.name.as_str())
    }

    pub fn continuous(&self, name: &str) -> Result<&[Option<f64>], DatasetError> {
        match &self.column(name)?.data {
            ColumnData::Continuous(values) => Ok(values),
            ColumnData::Categorical(_) => Err(DatasetError::WrongKind {
                name: name.to_owned(),
                expected: ColumnKind::Continuous,
                found: ColumnKind::Categorical,
            }),
        }
    }

    pub fn categorical(&self, name: &str) -> Result<&[Option<String>], DatasetError> {
        match &self.column(name)?.data {
            ColumnData::Categorical(values) => Ok(values),
            ColumnData::Continuous(_) => Err(DatasetError::WrongKind {
                name: name.to_owned(),
                expected: ColumnKind::Categorical,
                found: ColumnKind::Continuous,
            }),
        }
    }
}
