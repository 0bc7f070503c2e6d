use std::io::{self, Write};

use bmiscope_analysis::relationship::{self, PairCorrelation};
use bmiscope_stats::correlation::CorrelationMatrix;

use super::Session;
use crate::{
    schema::CorrelationDoc,
    table::{self, TableRow},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CorrelationArg {
    /// Variable to correlate with the measurement [default: from configuration]
    #[arg(long)]
    variable: Option<String>,
}

pub(crate) fn run(session: &Session, arg: &CorrelationArg) -> anyhow::Result<()> {
    let variable = arg
        .variable
        .as_deref()
        .unwrap_or(&session.config.defaults.variable);
    let matrix = relationship::correlation_matrix(&session.dataset)?;
    let pair = relationship::correlate(&session.dataset, &session.config, variable)?;

    session.emit("correlation", CorrelationDoc::new(&matrix, &pair), |w| {
        write_correlation(w, &matrix, &pair)
    })
}

fn write_correlation<W>(
    w: &mut W,
    matrix: &CorrelationMatrix<String>,
    pair: &PairCorrelation,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    table::write_title(w, "Correlation Analysis")?;
    writeln!(w, "Pearson r, pairwise complete rows:")?;
    let names = matrix.names();
    let columns = names.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cells = (0..names.len())
                .map(|j| match matrix.get(i, j) {
                    Ok(c) => table::number(c.r, 3),
                    Err(err) => table::not_available(err),
                })
                .collect();
            TableRow::new(name.clone(), cells)
        })
        .collect::<Vec<_>>();
    table::write_table(w, "", &columns, &rows)?;
    writeln!(w)?;

    writeln!(w, "{} vs {}:", pair.measurement, pair.variable)?;
    let cells = match &pair.result {
        Ok(c) => vec![
            c.n.to_string(),
            table::number(c.r, 3),
            table::stat(&c.p_value, 4),
        ],
        Err(err) => vec!["-".to_owned(), table::not_available(err), "-".to_owned()],
    };
    table::write_table(
        w,
        "Variable",
        &["n", "r", "p-value"],
        &[TableRow::new(pair.variable.clone(), cells)],
    )
}
