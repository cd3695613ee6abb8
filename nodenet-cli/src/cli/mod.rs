//! Command-line interface for building random networks.
//!
//! The `generate` command sizes a network, connects it with Poisson-degree
//! random links, and summarises the resulting topology and node values.

mod commands;

pub use commands::{
    Cli, CliError, Command, DEFAULT_TOP_VALUES, ExecutionSummary, GenerateCommand, SamplingArg,
    render_summary, run_cli,
};
