use std::io::{self, Write};

use bmiscope_analysis::relationship::{self, Interaction};

use super::{
    Session,
    regression::{FIT_COLUMNS, fit_cells},
};
use crate::{
    schema::InteractionDoc,
    table::{self, TableRow},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct InteractionArg {
    /// Continuous explanatory variable [default: from configuration]
    #[arg(long)]
    variable: Option<String>,

    /// Categorical column whose levels get separate lines [default: from configuration]
    #[arg(long)]
    group: Option<String>,
}

pub(crate) fn run(session: &Session, arg: &InteractionArg) -> anyhow::Result<()> {
    let defaults = &session.config.defaults;
    let variable = arg.variable.as_deref().unwrap_or(&defaults.variable);
    let group = arg.group.as_deref().unwrap_or(&defaults.interaction_group);
    let report = relationship::interaction(&session.dataset, &session.config, variable, group)?;

    session.emit("interaction", InteractionDoc::from(&report), |w| {
        write_interaction(w, &report)
    })
}

fn write_interaction<W>(w: &mut W, report: &Interaction) -> io::Result<()>
where
    W: Write + ?Sized,
{
    table::write_title(w, "Interaction Effects")?;
    writeln!(
        w,
        "{} on {}, fitted separately for each {} level",
        report.measurement, report.variable, report.group
    )?;
    if report.dropped_rows > 0 {
        writeln!(w, "Rows without a {} label: {}", report.group, report.dropped_rows)?;
    }
    writeln!(w)?;

    let rows = report
        .fits
        .iter()
        .map(|g| TableRow::new(g.label.clone(), fit_cells(&g.fit)))
        .collect::<Vec<_>>();
    table::write_table(w, &report.group, &FIT_COLUMNS, &rows)
}
