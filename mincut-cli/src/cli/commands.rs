//! Command implementations and argument parsing for the mincut CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use mincut_core::{
    ConcurrencyOverride as CoreConcurrencyOverride, CutReport, GraphSource, MincutError,
    Orchestrator, TrialConfigBuilder, Variant,
};
use mincut_providers_click::ClickGraphSource;
use mincut_providers_file::FileGraphSource;
use thiserror::Error;

const DEFAULT_PROCESSORS: usize = 4;
const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.9;
const DEFAULT_BASE_CASE_MULTIPLIER: f64 = 2.0;
const DEFAULT_CLICK_CLUSTERS: u64 = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "mincut", about = "Estimate the minimum edge cut of a weighted graph.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run against a plain-text weighted edge-list file.
    File(FileCommand),
    /// Run against a synthetically generated CLICK-model graph.
    Click(ClickCommand),
}

/// Options shared by every input source.
#[derive(Debug, Args, Clone)]
pub struct RunOptions {
    /// Number of simulated worker processes.
    #[arg(long, default_value_t = DEFAULT_PROCESSORS)]
    pub processors: usize,

    /// PRNG seed from which every worker's stream is mixed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Minimum acceptable probability that the reported cut is exact.
    #[arg(long, default_value_t = DEFAULT_SUCCESS_PROBABILITY)]
    pub success_probability: f64,

    /// Tuning constant `c` used by the ISS/RC target-size formulas.
    #[arg(long, default_value_t = DEFAULT_BASE_CASE_MULTIPLIER)]
    pub base_case_multiplier: f64,

    /// Force a specific concurrency variant instead of the automatic
    /// processors-vs-trials heuristic.
    #[arg(long, value_enum, default_value_t = ConcurrencyMode::Auto)]
    pub concurrency: ConcurrencyMode,
}

/// CLI-facing mirror of [`CoreConcurrencyOverride`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConcurrencyMode {
    /// Select LC/HC using the processors-vs-trials heuristic.
    Auto,
    /// Force low-concurrency mode.
    Lc,
    /// Force high-concurrency mode.
    Hc,
}

impl From<ConcurrencyMode> for CoreConcurrencyOverride {
    fn from(mode: ConcurrencyMode) -> Self {
        match mode {
            ConcurrencyMode::Auto => CoreConcurrencyOverride::Auto,
            ConcurrencyMode::Lc => CoreConcurrencyOverride::ForceLowConcurrency,
            ConcurrencyMode::Hc => CoreConcurrencyOverride::ForceHighConcurrency,
        }
    }
}

/// Arguments for the `file` command.
#[derive(Debug, Args, Clone)]
pub struct FileCommand {
    /// Path to a plain-text weighted edge-list file.
    pub path: PathBuf,

    /// Override name for the input (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub run: RunOptions,
}

/// Arguments for the `click` command.
#[derive(Debug, Args, Clone)]
pub struct ClickCommand {
    /// Number of vertices in the generated graph.
    pub vertices: u64,

    /// Number of clusters (vertices are grouped by `v mod clusters`).
    #[arg(long, default_value_t = DEFAULT_CLICK_CLUSTERS)]
    pub clusters: u64,

    /// Seed controlling the generated edge weights (distinct from
    /// `--seed`, which seeds the solver's own PRNG streams).
    #[arg(long, default_value_t = 42)]
    pub generator_seed: u64,

    #[command(flatten)]
    pub run: RunOptions,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Parsing the input graph failed.
    #[error(transparent)]
    GraphSource(#[from] mincut_core::GraphSourceError),
    /// Core orchestration failed.
    #[error(transparent)]
    Core(#[from] MincutError),
}

impl CliError {
    /// The stable machine-readable code for the underlying core error, if
    /// this variant wraps one.
    #[must_use]
    pub fn code(&self) -> Option<mincut_core::MincutErrorCode> {
        match self {
            Self::Core(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Summarizes the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the graph source implementation.
    pub input_name: String,
    /// Seed passed to the solver's PRNG streams.
    pub seed: u64,
    /// Number of simulated worker processes.
    pub processors: usize,
    /// The computed cut report.
    pub report: CutReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or running the solver fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::File(args) => run_file(args),
        Command::Click(args) => run_click(args),
    }
}

fn build_config(run: &RunOptions) -> Result<mincut_core::TrialConfig, CliError> {
    TrialConfigBuilder::new()
        .with_success_probability(run.success_probability)
        .with_base_seed(run.seed)
        .with_base_case_multiplier(run.base_case_multiplier)
        .with_concurrency_override(run.concurrency.into())
        .build()
        .map_err(CliError::from)
}

pub(super) fn run_file(args: FileCommand) -> Result<ExecutionSummary, CliError> {
    let FileCommand { path, name, run } = args;
    let chosen_name = derive_input_name(&path, name.as_deref());
    let file = std::fs::File::open(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    let source = FileGraphSource::from_reader(chosen_name, file)?;
    execute(&source, &run)
}

pub(super) fn run_click(args: ClickCommand) -> Result<ExecutionSummary, CliError> {
    let ClickCommand {
        vertices,
        clusters,
        generator_seed,
        run,
    } = args;
    let source = ClickGraphSource::new(vertices, clusters, generator_seed);
    execute(&source, &run)
}

fn execute(source: &dyn GraphSource, run: &RunOptions) -> Result<ExecutionSummary, CliError> {
    let config = build_config(run)?;
    let report = Orchestrator::run(source, run.processors, &config)?;
    Ok(ExecutionSummary {
        input_name: source.name().to_owned(),
        seed: run.seed,
        processors: run.processors,
        report,
    })
}

pub(super) fn derive_input_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "input".to_owned())
}

fn variant_tag(variant: Variant) -> &'static str {
    variant.tag()
}

/// Renders `summary` to `writer` as one comma-separated result line:
/// input name, seed, processor count, vertex count, edge count, cutting
/// time (seconds), time spent in collectives, trial count, variant tag, cut
/// weight.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use mincut_cli::cli::{ExecutionSummary, render_summary};
/// # use mincut_core::{CutReport, Orchestrator, GraphSource, TrialConfigBuilder};
/// # use mincut_providers_click::ClickGraphSource;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let source = ClickGraphSource::new(20, 4, 1);
/// let config = TrialConfigBuilder::new().build()?;
/// let report = Orchestrator::run(&source, 2, &config)?;
/// let summary = ExecutionSummary {
///     input_name: source.name().to_owned(),
///     seed: 0,
///     processors: 2,
///     report,
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert!(!buffer.into_inner().is_empty());
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    let fields = [
        summary.input_name.clone(),
        summary.seed.to_string(),
        summary.processors.to_string(),
        report.vertex_count().to_string(),
        report.edge_count().to_string(),
        format!("{:.6}", report.cutting_time().as_secs_f64()),
        format!("{:.6}", report.collective_time().as_secs_f64()),
        report.trial_count().to_string(),
        variant_tag(report.variant()).to_owned(),
        report.cut_weight().to_string(),
    ];
    writeln!(writer, "{}", fields.join(","))
}

#[cfg(test)]
mod tests;
