use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use bmiscope_analysis::{config::DashboardConfig, dataset::Dataset, load};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Where a section is rendered: stdout, or the file given by `--output`.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    fn target(&self) -> Cow<'_, str> {
        match self {
            Output::Stdout(_) => Cow::Borrowed("stdout"),
            Output::File { path, .. } => path.to_string_lossy(),
        }
    }

    /// Runs `render` against this output and flushes it.
    ///
    /// Failures name `what` was being written and where.
    pub fn render<F>(mut self, what: &str, render: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        render(&mut self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to write {what} to {}", self.target()))
    }

    /// Renders `document` as pretty-printed JSON followed by a newline.
    pub fn render_json<T>(self, document: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        self.render("JSON report", |w| {
            serde_json::to_writer_pretty(&mut *w, document)?;
            writeln!(w)
        })
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads and validates the dashboard configuration, or returns the default.
pub fn read_config_file(path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    let config = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open configuration file: {}", path.display()))?;
            let config: DashboardConfig = serde_json::from_reader(io::BufReader::new(file))
                .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid configuration file: {}", path.display()))?;
            config
        }
        None => DashboardConfig::default(),
    };
    Ok(config)
}

/// Reads survey data from a CSV file, or returns the built-in sample.
pub fn read_data_file(path: Option<&Path>, config: &DashboardConfig) -> anyhow::Result<Dataset> {
    let Some(path) = path else {
        tracing::info!("no data file given, using the built-in sample");
        return Ok(Dataset::demo());
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;
    load::read_csv(io::BufReader::new(file), config)
        .with_context(|| format!("Failed to load data file: {}", path.display()))
}

/// Installs the stderr log subscriber.
///
/// `BMISCOPE_LOG` takes `EnvFilter` directives; without it the level is
/// `warn`, or `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("BMISCOPE_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
