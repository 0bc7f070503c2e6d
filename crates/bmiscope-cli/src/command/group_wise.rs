use std::io::{self, Write};

use bmiscope_analysis::comparison::{self, GroupComparison};

use super::Session;
use crate::{
    schema::GroupWiseDoc,
    table::{self, TableRow},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GroupWiseArg {
    /// Categorical column to group by [default: from configuration]
    #[arg(long)]
    category: Option<String>,
}

pub(crate) fn run(session: &Session, arg: &GroupWiseArg) -> anyhow::Result<()> {
    let category = arg
        .category
        .as_deref()
        .unwrap_or(&session.config.defaults.category);
    let report = comparison::compare_groups(&session.dataset, &session.config, category)?;

    session.emit("group-wise", GroupWiseDoc::from(&report), |w| {
        write_group_wise(w, &report)
    })
}

fn print_legend<W>(w: &mut W) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(w, "Legend:")?;
    writeln!(w, "  Std      : Sample standard deviation (n - 1)")?;
    writeln!(w, "  r        : Point-biserial correlation of the group against all other rows")?;
    writeln!(w, "  t, p     : Pooled two-sample t-test, df = n - 2, two-tailed")?;
    writeln!(w, "  Whiskers : Most extreme values within 1.5 IQR of the box")
}

fn write_group_wise<W>(w: &mut W, report: &GroupComparison) -> io::Result<()>
where
    W: Write + ?Sized,
{
    table::write_title(w, &format!("{} by {}", report.measurement, report.category))?;
    print_legend(w)?;
    writeln!(w)?;
    if report.dropped_rows > 0 {
        writeln!(w, "Rows without a {} label: {}", report.category, report.dropped_rows)?;
        writeln!(w)?;
    }

    let rows = report
        .groups
        .iter()
        .zip(&report.biserial)
        .map(|(stats, biserial)| {
            let mut cells = vec![
                stats.count.to_string(),
                table::stat(&stats.mean, 2),
                table::stat(&stats.std_dev, 2),
            ];
            match &biserial.outcome {
                Ok(pb) => {
                    cells.push(table::number(pb.r, 3));
                    match &pb.test {
                        Ok(test) => {
                            cells.push(table::number(test.t, 3));
                            cells.push(table::number(test.p_value, 4));
                        }
                        Err(err) => {
                            cells.push(table::not_available(err));
                            cells.push("-".to_owned());
                        }
                    }
                }
                Err(err) => {
                    cells.push(table::not_available(err));
                    cells.push("-".to_owned());
                    cells.push("-".to_owned());
                }
            }
            TableRow::new(stats.label.clone(), cells)
        })
        .collect::<Vec<_>>();
    writeln!(w, "Group statistics:")?;
    table::write_table(
        w,
        &report.category,
        &["Count", "Mean", "Std", "r", "t", "p-value"],
        &rows,
    )?;
    writeln!(w)?;

    let rows = report
        .boxes
        .iter()
        .map(|group| {
            let cells = match &group.summary {
                Some(b) => vec![
                    table::number(b.lower_whisker, 2),
                    table::number(b.q1, 2),
                    table::number(b.median, 2),
                    table::number(b.q3, 2),
                    table::number(b.upper_whisker, 2),
                    b.outliers.len().to_string(),
                ],
                None => vec!["N/A (no data)".to_owned()],
            };
            TableRow::new(group.label.clone(), cells)
        })
        .collect::<Vec<_>>();
    writeln!(w, "Distribution:")?;
    table::write_table(
        w,
        &report.category,
        &["Low", "Q1", "Median", "Q3", "High", "Outliers"],
        &rows,
    )
}
