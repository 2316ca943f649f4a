//! CLI entry point for tsconform.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! Orchestration lives in the `tsconform-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, ValueEnum};
use tsconform_app::{
    BuildStrategy, DirectBuild, DirectInput, Mode, SolutionBuild, format_rule_list, run_build,
    select_mode, write_report,
};
use tracing_subscriber::EnvFilter;
use tsconform_render::{render_github_annotations, render_text};
use tsconform_types::TsconformReport;

const LOG_ENV: &str = "TSCONFORM_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "tsconform",
    version,
    about = "Type-check-time conformance rules for TypeScript programs",
    after_help = "Run `tsconform -b [project]` to build a project and its references."
)]
struct Cli {
    /// Typed-tree files to check. When given, no tsconfig.json is loaded.
    files: Vec<Utf8PathBuf>,

    /// Project config file, or a directory containing tsconfig.json.
    #[arg(short = 'p', long)]
    project: Option<Utf8PathBuf>,

    /// Print the built-in rule catalog and exit.
    #[arg(long)]
    list_rules: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "tsconform -b",
    about = "Build a project and everything it references, then run conformance checks"
)]
struct BuildCli {
    /// At most one project (directory or config file). Defaults to the current directory.
    projects: Vec<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write a JSON report to this path.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Github,
}

fn main() {
    init_tracing();

    let code = match select_mode(std::env::args().skip(1)) {
        Mode::Build { projects } => cmd_build(projects),
        Mode::Direct { args } => cmd_direct(args),
    };
    std::process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn with_bin_name(args: Vec<String>) -> impl Iterator<Item = String> {
    std::iter::once("tsconform".to_string()).chain(args)
}

fn cmd_direct(args: Vec<String>) -> i32 {
    let cli = match Cli::try_parse_from(with_bin_name(args)) {
        Ok(cli) => cli,
        Err(err) => return usage_exit(err),
    };
    if cli.list_rules {
        print!("{}", format_rule_list());
        return 0;
    }

    let cwd = match current_dir() {
        Ok(cwd) => cwd,
        Err(err) => return fatal(err),
    };
    let strategy = DirectBuild::new(DirectInput {
        cwd,
        files: cli.files,
        project: cli.project,
    });
    run_strategy(&strategy, &cli.output)
}

fn cmd_build(args: Vec<String>) -> i32 {
    let cli = match BuildCli::try_parse_from(with_bin_name(args)) {
        Ok(cli) => cli,
        Err(err) => return usage_exit(err),
    };
    let cwd = match current_dir() {
        Ok(cwd) => cwd,
        Err(err) => return fatal(err),
    };
    let strategy = match SolutionBuild::new(&cwd, &cli.projects) {
        Ok(strategy) => strategy,
        Err(err) => {
            eprintln!("tsconform: {err}");
            return 1;
        }
    };
    run_strategy(&strategy, &cli.output)
}

fn run_strategy(strategy: &dyn BuildStrategy, output: &OutputArgs) -> i32 {
    let result = (|| -> anyhow::Result<i32> {
        let report = run_build(strategy)?;
        tracing::debug!(
            exit_code = report.exit_code,
            diagnostics = report.diagnostics.len(),
            "run finished"
        );
        print_report(&report, output.format);
        if let Some(path) = &output.report_out {
            write_report(path, &report).context("write report json")?;
        }
        Ok(report.exit_code)
    })();

    match result {
        Ok(code) => code,
        Err(err) => fatal(err),
    }
}

fn print_report(report: &TsconformReport, format: Format) {
    match format {
        Format::Text => {
            print!("{}", render_text(&report.diagnostics));
            if let Some(notice) = &report.notice {
                println!("{notice}");
            }
        }
        Format::Github => {
            for line in render_github_annotations(&report.diagnostics) {
                println!("{line}");
            }
            if let Some(notice) = &report.notice {
                println!("::error::{notice}");
            }
        }
    }
}

/// `--help` and `--version` succeed; anything else clap rejects is a malformed
/// invocation and exits 1.
fn usage_exit(err: clap::Error) -> i32 {
    let _ = err.print();
    if err.use_stderr() { 1 } else { 0 }
}

fn current_dir() -> anyhow::Result<Utf8PathBuf> {
    let dir = std::env::current_dir().context("read current directory")?;
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|p| anyhow::anyhow!("current directory is not UTF-8: {}", p.display()))
}

fn fatal(err: anyhow::Error) -> i32 {
    eprintln!("tsconform error: {err:#}");
    1
}
