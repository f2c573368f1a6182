//! Unit tests for the CLI commands and input ingestion helpers.

use super::{
    Cli, CliError, ClickCommand, Command, ConcurrencyMode, FileCommand, RunOptions,
    derive_input_name, render_summary, run_cli, run_click, run_file,
};

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn default_run_options() -> RunOptions {
    RunOptions {
        processors: 2,
        seed: 7,
        success_probability: 0.9,
        base_case_multiplier: 2.0,
        concurrency: ConcurrencyMode::Auto,
    }
}

#[rstest]
#[case::override_name("/tmp/source.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/source.txt", None, "source")]
#[case::stem_without_extension("/tmp/source", None, "source")]
#[case::missing_stem("", None, "input")]
fn derive_input_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    let path = Path::new(raw_path);
    let name = derive_input_name(path, override_name);
    assert_eq!(name, expected);
}

#[rstest]
fn run_file_finds_the_triangle_min_cut() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "triangle.txt", "3 3\n0 1 1\n1 2 1\n0 2 1\n")?;
    let summary = run_file(FileCommand {
        path,
        name: None,
        run: default_run_options(),
    })?;
    assert_eq!(summary.report.cut_weight(), 2);
    assert_eq!(summary.input_name, "triangle");
    Ok(())
}

#[rstest]
fn run_file_reports_io_errors_for_missing_paths() {
    let err = run_file(FileCommand {
        path: PathBuf::from("/does/not/exist.txt"),
        name: None,
        run: default_run_options(),
    })
    .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));
}

#[rstest]
fn run_file_reports_malformed_graphs() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "bad.txt", "not a header\n")?;
    let err = run_file(FileCommand {
        path,
        name: None,
        run: default_run_options(),
    })
    .expect_err("malformed file must fail");
    assert!(matches!(err, CliError::GraphSource(_)));
    Ok(())
}

#[rstest]
fn run_click_is_deterministic_given_the_same_seeds() -> TestResult {
    let command = || ClickCommand {
        vertices: 40,
        clusters: 4,
        generator_seed: 11,
        run: default_run_options(),
    };
    let first = run_click(command())?;
    let second = run_click(command())?;
    assert_eq!(first.report.cut_weight(), second.report.cut_weight());
    Ok(())
}

#[rstest]
fn render_summary_outputs_a_single_csv_line() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "triangle.txt", "3 3\n0 1 1\n1 2 1\n0 2 1\n")?;
    let summary = run_file(FileCommand {
        path,
        name: Some("demo".into()),
        run: default_run_options(),
    })?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    let fields: Vec<&str> = text.trim_end().split(',').collect();
    assert_eq!(fields.len(), 10);
    assert_eq!(fields[0], "demo");
    assert_eq!(fields[9], "2");
    Ok(())
}

#[rstest]
fn clap_parses_the_file_command() {
    let args = ["mincut", "file", "graph.txt", "--processors", "8"];
    let cli = Cli::try_parse_from(args).expect("file command must parse");
    match cli.command {
        Command::File(command) => {
            assert_eq!(command.path, PathBuf::from("graph.txt"));
            assert_eq!(command.run.processors, 8);
        }
        Command::Click(_) => panic!("expected the file subcommand"),
    }
}

#[rstest]
fn clap_parses_the_click_command() {
    let args = ["mincut", "click", "200", "--clusters", "10", "--concurrency", "hc"];
    let cli = Cli::try_parse_from(args).expect("click command must parse");
    match cli.command {
        Command::Click(command) => {
            assert_eq!(command.vertices, 200);
            assert_eq!(command.clusters, 10);
            assert_eq!(command.run.concurrency, ConcurrencyMode::Hc);
        }
        Command::File(_) => panic!("expected the click subcommand"),
    }
}

#[rstest]
fn clap_rejects_an_unknown_concurrency_mode() {
    let args = ["mincut", "click", "50", "--concurrency", "unsupported"];
    let result = Cli::try_parse_from(args);
    assert!(result.is_err());
}

#[rstest]
fn run_cli_dispatches_to_the_click_command() -> TestResult {
    let cli = Cli {
        command: Command::Click(ClickCommand {
            vertices: 30,
            clusters: 3,
            generator_seed: 5,
            run: default_run_options(),
        }),
    };
    let summary = run_cli(cli)?;
    assert!(summary.input_name.starts_with("click-"));
    Ok(())
}
