use std::io::{self, Write};

use bmiscope_analysis::{
    config::DashboardConfig,
    overview::{self, Overview},
};

use super::Session;
use crate::{
    schema::OverviewDoc,
    table::{self, TableRow},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OverviewArg {
    /// Rows shown in the data preview [default: from configuration]
    #[arg(long)]
    rows: Option<usize>,
}

pub(crate) fn run(session: &Session, arg: &OverviewArg) -> anyhow::Result<()> {
    let config = DashboardConfig {
        preview_rows: arg.rows.unwrap_or(session.config.preview_rows),
        ..session.config.clone()
    };
    let report = overview::overview(&session.dataset, &config);
    session.emit("overview", OverviewDoc::from(&report), |w| {
        write_overview(w, &report)
    })
}

fn write_overview<W>(w: &mut W, report: &Overview) -> io::Result<()>
where
    W: Write + ?Sized,
{
    table::write_title(w, "BMI and Health Factors Dashboard")?;
    writeln!(w, "Rows: {}", report.row_count)?;
    writeln!(w)?;

    let rows = report
        .continuous
        .iter()
        .map(|c| {
            let cells = match &c.stats {
                Some(s) => vec![
                    s.count.to_string(),
                    c.missing.to_string(),
                    table::number(s.min, 2),
                    table::number(s.max, 2),
                    table::number(s.mean, 2),
                    table::number(s.median, 2),
                    table::stat(&s.std_dev, 2),
                ],
                None => {
                    let mut cells = vec!["0".to_owned(), c.missing.to_string()];
                    cells.extend(std::iter::repeat_n("N/A".to_owned(), 5));
                    cells
                }
            };
            TableRow::new(c.name.clone(), cells)
        })
        .collect::<Vec<_>>();
    writeln!(w, "Continuous columns:")?;
    table::write_table(
        w,
        "Column",
        &["Count", "Missing", "Min", "Max", "Mean", "Median", "Std"],
        &rows,
    )?;
    writeln!(w)?;

    for column in &report.categorical {
        writeln!(w, "{} (missing: {}):", column.name, column.missing)?;
        let rows = column
            .levels
            .iter()
            .map(|l| TableRow::new(l.label.clone(), vec![l.count.to_string()]))
            .collect::<Vec<_>>();
        table::write_table(w, "Level", &["Count"], &rows)?;
        writeln!(w)?;
    }

    writeln!(w, "Data preview:")?;
    let columns = report
        .preview
        .headers
        .iter()
        .skip(1)
        .map(String::as_str)
        .collect::<Vec<_>>();
    let rows = report
        .preview
        .rows
        .iter()
        .map(|row| {
            let (first, rest) = row.split_first().map_or(("", &[][..]), |(f, r)| (f.as_str(), r));
            TableRow::new(first, rest.to_vec())
        })
        .collect::<Vec<_>>();
    let first_header = report.preview.headers.first().map_or("", String::as_str);
    table::write_table(w, first_header, &columns, &rows)
}

#[cfg(test)]
mod tests {
    use bmiscope_analysis::dataset::Dataset;

    use super::*;

    #[test]
    fn test_table_lists_every_column() {
        let report = overview::overview(&Dataset::demo(), &DashboardConfig::default());
        let mut out = Vec::new();
        write_overview(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Rows: 7"));
        for name in ["BMI", "Income Ratio", "Blood Pressure", "Race (missing: 0):"] {
            assert!(text.contains(name), "{name} missing from output");
        }
        assert!(text.contains("Non-Hispanic White"));
    }
}
