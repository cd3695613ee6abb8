//! Argument parsing, command execution and summary rendering.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use nodenet_core::{CandidateSampling, LinkInvariantViolation, NetworkBuilder, NetworkError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Number of node values listed by default.
pub const DEFAULT_TOP_VALUES: usize = 5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "nodenet", about = "Generate and summarise random networks.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a network with normally distributed values and random links.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub nodes: usize,

    /// Mean of the Poisson distribution used for per-node degrees.
    #[arg(long = "mean-degree")]
    pub mean_degree: f64,

    /// Seed for reproducible output; entropy is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How each node draws its link candidates.
    #[arg(long, value_enum, default_value_t = SamplingArg::WithoutReplacement)]
    pub sampling: SamplingArg,

    /// Number of highest node values to list.
    #[arg(long, default_value_t = DEFAULT_TOP_VALUES)]
    pub top: usize,
}

/// Candidate sampling strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingArg {
    /// Candidates are distinct nodes from a random permutation.
    WithoutReplacement,
    /// Candidates are independent uniform draws and may repeat.
    WithReplacement,
}

impl From<SamplingArg> for CandidateSampling {
    fn from(value: SamplingArg) -> Self {
        match value {
            SamplingArg::WithoutReplacement => Self::WithoutReplacement,
            SamplingArg::WithReplacement => Self::WithReplacement,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Network construction or connection failed.
    #[error(transparent)]
    Core(#[from] NetworkError),
    /// The generated network failed its consistency check.
    #[error("generated network is inconsistent: {0}")]
    Inconsistent(#[from] LinkInvariantViolation),
}

/// Outcome of a `generate` run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Node count of the generated network.
    pub nodes: usize,
    /// Seed used, when one was supplied.
    pub seed: Option<u64>,
    /// Number of undirected links created.
    pub links: usize,
    /// Realised mean degree, absent for an empty network.
    pub mean_degree: Option<f64>,
    /// Entry `d` counts the nodes of degree `d`.
    pub degree_histogram: Vec<usize>,
    /// Highest node values in descending order.
    pub top_values: Vec<f64>,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the network cannot be built or connected.
///
/// # Examples
/// ```
/// use nodenet_cli::cli::{Cli, Command, GenerateCommand, SamplingArg, run_cli};
///
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         nodes: 10,
///         mean_degree: 2.0,
///         seed: Some(7),
///         sampling: SamplingArg::WithoutReplacement,
///         top: 3,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.nodes, 10);
/// assert_eq!(summary.top_values.len(), 3);
/// # Ok::<(), nodenet_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            run_generate(generate)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(
        nodes = command.nodes,
        mean_degree = command.mean_degree,
        sampling = ?command.sampling,
        seed = field::Empty,
    ),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let mut builder = NetworkBuilder::new()
        .with_nodes(command.nodes)
        .with_candidate_sampling(command.sampling.into());
    if let Some(seed) = command.seed {
        Span::current().record("seed", seed);
        builder = builder.with_seed(seed);
    }
    let mut network = builder.build()?;
    let links = network.random_connect(command.mean_degree)?;
    network.check_invariants()?;

    let mut top_values = network.sorted_values();
    top_values.truncate(command.top);

    let summary = ExecutionSummary {
        nodes: network.size(),
        seed: command.seed,
        links,
        mean_degree: network.mean_degree(),
        degree_histogram: network.degree_distribution(),
        top_values,
    };
    info!(
        nodes = summary.nodes,
        links = summary.links,
        "generate completed"
    );
    Ok(summary)
}

/// Renders `summary` to `writer` as plain text.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// use nodenet_cli::cli::{ExecutionSummary, render_summary};
///
/// let summary = ExecutionSummary {
///     nodes: 2,
///     seed: None,
///     links: 1,
///     mean_degree: Some(1.0),
///     degree_histogram: vec![0, 2],
///     top_values: vec![0.5],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer).expect("output is UTF-8");
/// assert!(text.starts_with("nodes: 2\n"));
/// assert!(text.contains("mean degree: 1.000\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "nodes: {}", summary.nodes)?;
    if let Some(seed) = summary.seed {
        writeln!(writer, "seed: {seed}")?;
    }
    writeln!(writer, "links: {}", summary.links)?;
    match summary.mean_degree {
        Some(mean) => writeln!(writer, "mean degree: {mean:.3}")?,
        None => writeln!(writer, "mean degree: n/a")?,
    }
    writeln!(writer, "degree histogram:")?;
    for (degree, count) in summary.degree_histogram.iter().enumerate() {
        writeln!(writer, "{degree}\t{count}")?;
    }
    writeln!(writer, "top values:")?;
    for (rank, value) in summary.top_values.iter().enumerate() {
        writeln!(writer, "{rank}\t{value:.6}")?;
    }
    Ok(())
}
