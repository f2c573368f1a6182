//! Command-line interface orchestration for the mincut solver.
//!
//! Offers a `file` command that loads a plain-text weighted edge-list graph
//! and a `click` command that generates a synthetic CLICK-model graph,
//! running the distributed Monte-Carlo minimum-cut solver against either.

mod commands;

pub use commands::{
    Cli, CliError, ClickCommand, Command, ConcurrencyMode, ExecutionSummary, FileCommand,
    RunOptions, render_summary, run_cli,
};
