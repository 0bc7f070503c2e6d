use std::{io, path::PathBuf};

use bmiscope_analysis::{config::DashboardConfig, dataset::Dataset};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    schema::Report,
    util::{self, Output},
};

use self::{
    correlation::CorrelationArg, group_wise::GroupWiseArg, interaction::InteractionArg,
    overview::OverviewArg, regression::RegressionArg,
};

mod correlation;
mod group_wise;
mod interaction;
mod overview;
mod regression;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// CSV data file; the built-in sample is used when omitted
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Dashboard configuration JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table or json)
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Output file path
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log debug details to stderr (overridden by BMISCOPE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dashboard section to show
    #[command(subcommand)]
    section: Option<Section>,
}

#[derive(Debug, Clone, Subcommand)]
enum Section {
    /// Column summaries and a preview of the data
    Overview(#[clap(flatten)] OverviewArg),
    /// Correlation matrix and the measurement against one variable
    Correlation(#[clap(flatten)] CorrelationArg),
    /// The measurement compared across the levels of a category
    GroupWise(#[clap(flatten)] GroupWiseArg),
    /// Least squares trend of the measurement on one variable
    Regression(#[clap(flatten)] RegressionArg),
    /// One trend line per level of a category
    Interaction(#[clap(flatten)] InteractionArg),
}

/// Loaded inputs shared by every section.
pub(crate) struct Session {
    pub config: DashboardConfig,
    pub dataset: Dataset,
    source: String,
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl Session {
    fn load(args: &CommandArgs) -> anyhow::Result<Self> {
        let config = util::read_config_file(args.config.as_deref())?;
        let dataset = util::read_data_file(args.data.as_deref(), &config)?;
        let source = args
            .data
            .as_ref()
            .map_or_else(|| "built-in sample".to_owned(), |p| p.display().to_string());
        tracing::debug!(%source, rows = dataset.row_count(), "session ready");
        Ok(Self {
            config,
            dataset,
            source,
            format: args.format,
            output: args.output.clone(),
        })
    }

    /// Writes a section either as a text table or as a JSON document.
    pub(crate) fn emit<T, F>(
        &self,
        section: &'static str,
        doc: T,
        write_table: F,
    ) -> anyhow::Result<()>
    where
        T: Serialize,
        F: FnOnce(&mut Output) -> io::Result<()>,
    {
        let output = Output::create(self.output.as_deref())?;
        match self.format {
            OutputFormat::Table => output.render("table", write_table),
            OutputFormat::Json => {
                output.render_json(&Report::new(self.source.clone(), section, doc))
            }
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);

    let session = Session::load(&args)?;
    match args
        .section
        .clone()
        .unwrap_or(Section::Overview(OverviewArg::default()))
    {
        Section::Overview(arg) => overview::run(&session, &arg)?,
        Section::Correlation(arg) => correlation::run(&session, &arg)?,
        Section::GroupWise(arg) => group_wise::run(&session, &arg)?,
        Section::Regression(arg) => regression::run(&session, &arg)?,
        Section::Interaction(arg) => interaction::run(&session, &arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_section() {
        let args = CommandArgs::try_parse_from([
            "bmiscope",
            "group-wise",
            "--category",
            "Race",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.verbose);
        assert!(matches!(args.section, Some(Section::GroupWise(_))));
    }

    #[test]
    fn test_defaults() {
        let args = CommandArgs::try_parse_from(["bmiscope"]).unwrap();
        assert_eq!(args.format, OutputFormat::Table);
        assert!(args.section.is_none());
        assert!(args.data.is_none());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(CommandArgs::try_parse_from(["bmiscope", "--format", "xml"]).is_err());
    }
}
