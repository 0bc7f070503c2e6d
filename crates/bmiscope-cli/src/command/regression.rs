use std::io::{self, Write};

use bmiscope_analysis::relationship::{self, Regression};
use bmiscope_stats::{StatsError, regression::LinearFit};

use super::Session;
use crate::{
    schema::RegressionDoc,
    table::{self, TableRow},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RegressionArg {
    /// Explanatory variable [default: from configuration]
    #[arg(long)]
    variable: Option<String>,
}

pub(crate) fn run(session: &Session, arg: &RegressionArg) -> anyhow::Result<()> {
    let variable = arg
        .variable
        .as_deref()
        .unwrap_or(&session.config.defaults.variable);
    let report = relationship::regress(&session.dataset, &session.config, variable)?;

    session.emit("regression", RegressionDoc::from(&report), |w| {
        write_regression(w, &report)
    })
}

pub(super) const FIT_COLUMNS: [&str; 7] = ["n", "Slope", "Intercept", "R²", "Slope SE", "From", "To"];

/// Cells matching [`FIT_COLUMNS`].
pub(super) fn fit_cells(fit: &Result<LinearFit, StatsError>) -> Vec<String> {
    match fit {
        Ok(fit) => {
            let [(x0, y0), (x1, y1)] = fit.endpoints();
            vec![
                fit.n.to_string(),
                table::number(fit.slope, 4),
                table::number(fit.intercept, 3),
                table::number(fit.r_squared, 3),
                table::stat(&fit.slope_std_err, 4),
                format!("({x0:.1}, {y0:.2})"),
                format!("({x1:.1}, {y1:.2})"),
            ]
        }
        Err(err) => vec![table::not_available(err)],
    }
}

fn write_regression<W>(w: &mut W, report: &Regression) -> io::Result<()>
where
    W: Write + ?Sized,
{
    table::write_title(w, "Regression Analysis")?;
    writeln!(
        w,
        "{} = intercept + slope * {}",
        report.measurement, report.variable
    )?;
    writeln!(w)?;
    table::write_table(
        w,
        "Variable",
        &FIT_COLUMNS,
        &[TableRow::new(report.variable.clone(), fit_cells(&report.fit))],
    )
}
