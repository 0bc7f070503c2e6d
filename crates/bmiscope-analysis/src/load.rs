//! CSV loading
//!
//! Reads a headed CSV file into a [`Dataset`] following the configured
//! schema. Schema columns are located by header name; other columns are
//! ignored.

use std::io;

use crate::{
    config::DashboardConfig,
    dataset::{Column, ColumnData, ColumnKind, Dataset, DatasetError},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("malformed CSV: {_0}")]
    #[from]
    Csv(csv::Error),
    #[display("column `{name}` not found in the CSV header")]
    MissingColumn { name: String },
    #[display("row {row}, column `{column}`: `{value}` is not a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
    #[display("{_0}")]
    #[from]
    Dataset(DatasetError),
}

/// Reads CSV data shaped by `config`.
///
/// Cells matching a missing-value token become missing. Numeric cells must
/// parse as numbers; categorical cells holding integral numbers are
/// normalised so `1` and `1.0` are the same code. Rows are numbered from 1,
/// excluding the header.
///
/// # Examples
///
/// ```
/// use bmiscope_analysis::{config::DashboardConfig, load};
///
/// let csv = "BMI,Gender,Race,Age,Income Ratio,LDL,Blood Pressure,Diabetes,Note\n\
///            27.9,1,3,45,1.5,120,120,1,x\n\
///            NA,2.0,1,34,,130,110,9,y\n";
/// let data = load::read_csv(csv.as_bytes(), &DashboardConfig::default()).unwrap();
///
/// assert_eq!(data.row_count(), 2);
/// assert_eq!(data.continuous("BMI").unwrap(), &[Some(27.9), None]);
/// assert_eq!(data.categorical("Gender").unwrap()[1].as_deref(), Some("2"));
/// assert!(data.column("Note").is_err());
/// ```
pub fn read_csv<R>(reader: R, config: &DashboardConfig) -> Result<Dataset, LoadError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let positions = config
        .columns
        .iter()
        .map(|spec| {
            headers
                .iter()
                .position(|h| h == spec.name)
                .ok_or_else(|| LoadError::MissingColumn {
                    name: spec.name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let ignored = headers
        .iter()
        .filter(|h| config.kind_of(h).is_none())
        .collect::<Vec<_>>();
    if !ignored.is_empty() {
        tracing::debug!(?ignored, "columns outside the schema ignored");
    }

    let mut columns = config
        .columns
        .iter()
        .map(|spec| Column {
            name: spec.name.clone(),
            data: match spec.kind {
                ColumnKind::Continuous => ColumnData::Continuous(Vec::new()),
                ColumnKind::Categorical => ColumnData::Categorical(Vec::new()),
            },
        })
        .collect::<Vec<_>>();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        for (column, &position) in columns.iter_mut().zip(&positions) {
            let cell = record.get(position).unwrap_or_default();
            let missing = config.is_missing_token(cell);
            match &mut column.data {
                ColumnData::Continuous(values) => {
                    let value = if missing {
                        None
                    } else {
                        Some(parse_number(cell).ok_or_else(|| LoadError::InvalidNumber {
                            column: column.name.clone(),
                            row,
                            value: cell.to_owned(),
                        })?)
                    };
                    values.push(value.filter(|v| v.is_finite()));
                }
                ColumnData::Categorical(values) => {
                    values.push((!missing).then(|| canonical_code(cell)));
                }
            }
        }
    }

    let dataset = Dataset::new(columns)?;
    tracing::info!(
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// `"1.0"` and `"1"` name the same code.
#[expect(clippy::cast_possible_truncation)]
fn canonical_code(cell: &str) -> String {
    let cell = cell.trim();
    match parse_number(cell) {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
            format!("{}", v as i64)
        }
        _ => cell.to_owned(),
    }
}
