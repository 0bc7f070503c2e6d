//! Fixed-width text tables
//!
//! Label column left-aligned, value columns right-aligned. Column widths grow
//! to fit the widest cell so `N/A (...)` markers never break alignment.

use std::io::{self, Write};

use bmiscope_stats::StatsError;

const LABEL_MIN_WIDTH: usize = 20;
const CELL_MIN_WIDTH: usize = 10;

/// A row in a report table.
pub(crate) struct TableRow {
    pub label: String,
    pub cells: Vec<String>,
}

impl TableRow {
    pub(crate) fn new(label: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }
}

/// Writes a header, a separator line and all rows.
pub(crate) fn write_table<W>(
    w: &mut W,
    label_col: &str,
    columns: &[&str],
    rows: &[TableRow],
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain([label_col.chars().count(), LABEL_MIN_WIDTH])
        .max()
        .unwrap_or(LABEL_MIN_WIDTH);
    let widths = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.chars().count())
                .chain([header.chars().count(), CELL_MIN_WIDTH])
                .max()
                .unwrap_or(CELL_MIN_WIDTH)
        })
        .collect::<Vec<_>>();

    write!(w, "  {label_col:<label_width$}")?;
    for (header, width) in columns.iter().zip(widths.iter().copied()) {
        write!(w, " {header:>width$}")?;
    }
    writeln!(w)?;

    let total_width = label_width + widths.iter().map(|width| width + 1).sum::<usize>();
    writeln!(w, "  {}", "-".repeat(total_width))?;

    for row in rows {
        write!(w, "  {:<label_width$}", row.label)?;
        for (cell, width) in row.cells.iter().zip(widths.iter().copied()) {
            write!(w, " {cell:>width$}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Writes a section title underlined with `=`.
pub(crate) fn write_title<W>(w: &mut W, title: &str) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "=".repeat(title.chars().count()))
}

pub(crate) fn number(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// A statistic, or `N/A (reason)` when it is undefined.
pub(crate) fn stat(value: &Result<f64, StatsError>, precision: usize) -> String {
    match value {
        Ok(v) => number(*v, precision),
        Err(err) => not_available(err),
    }
}

pub(crate) fn not_available(err: &StatsError) -> String {
    format!("N/A ({})", err.short_label())
}

#[cfg(test)]
mod tests {
    use bmiscope_stats::VarianceScope;

    use super::*;

    #[test]
    fn test_table_is_aligned() {
        let rows = vec![
            TableRow::new("Male", vec!["4".to_owned(), "29.575".to_owned()]),
            TableRow::new(
                "Female",
                vec![
                    "1".to_owned(),
                    not_available(&StatsError::ZeroVariance(VarianceScope::Overall)),
                ],
            ),
        ];
        let mut out = Vec::new();
        write_table(&mut out, "Gender", &["n", "r"], &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  Gender"));
        assert!(lines[1].trim_start().chars().all(|c| c == '-'));
        assert_eq!(lines[2].len(), lines[3].len());
        assert!(lines[3].ends_with("N/A (zero variance)"));
    }

    #[test]
    fn test_stat_formatting() {
        assert_eq!(stat(&Ok(0.123_456), 3), "0.123");
        assert_eq!(
            stat(
                &Err(StatsError::InsufficientData {
                    required: 2,
                    found: 1
                }),
                3
            ),
            "N/A (insufficient data)"
        );
    }
}
