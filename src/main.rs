//! Auditor: Test Quality Auditor CLI

use anyhow::{Context, Result};
use auditor::analyzer::AnalysisEngine;
use auditor::config::{default_config_json, load_config, Config, CONFIG_FILENAME};
use auditor::detector::ProjectLocator;
use auditor::reporter::{ConsoleReporter, JsonReporter};
use auditor::ProjectAnalysisResult;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Auditor: Test Quality Auditor for C#
#[derive(Parser, Debug)]
#[command(name = "auditor")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Test project (.csproj or directory) to analyze; with --all, a root to search
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Minimum average score 0-10 (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (per-test problems, debug logs)
    #[arg(long, short)]
    verbose: bool,

    /// Discover and analyze every test project under PATH
    #[arg(long)]
    all: bool,

    /// Path to config file (default: search .auditorrc.json in project dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the test projects found under a root directory
    Discover {
        /// Root directory to search
        root: PathBuf,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,
    },

    /// Create .auditorrc.json with sensible defaults
    Init {
        /// Minimum average score threshold (e.g. 6)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveredProject {
    path: PathBuf,
    project_kind: auditor::ProjectKind,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "auditor=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Discover { root, json } => run_discover(&root, json),
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
        };
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a project PATH is required (see --help)");
    };

    let work_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // CLI flags override config file
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);
    config.validate().map_err(anyhow::Error::msg)?;

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let engine = AnalysisEngine::new().with_config(&config)?;

    let results = if args.all {
        let results = engine.analyze_all(&path)?;
        if results.is_empty() {
            eprintln!(
                "{}: No test projects found under {}",
                "Warning".yellow(),
                path.display()
            );
            return Ok(ExitCode::from(2));
        }
        results
    } else {
        vec![engine.analyze_project(&path)?]
    };

    let stats = AnalysisEngine::aggregate_stats(&results);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        let json = if args.all {
            reporter.report_with_summary(&results, &stats)
        } else {
            reporter.report(&results[0])
        };
        emit(&json, args.output.as_deref(), args.quiet)?;
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in &results {
            reporter.report_quiet(result);
        }
    } else {
        if let Some(ref output) = args.output {
            // Files always get the JSON form
            let json = JsonReporter::new().pretty().report_many(&results);
            emit(&json, Some(output.as_path()), args.quiet)?;
        }
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(&results, &stats);
        }
    }

    warn_about_failures(&results, args.quiet || args.json);

    let score = if results.len() == 1 {
        results[0].average_score
    } else {
        stats.average_score
    };
    Ok(check_threshold(&config, score, args.quiet || args.json))
}

/// Exit 1 when the average score is below the configured threshold
fn check_threshold(config: &Config, score: f64, silent: bool) -> ExitCode {
    let Some(threshold) = config.threshold else {
        return ExitCode::SUCCESS;
    };
    if score < threshold {
        if !silent {
            eprintln!(
                "\n{}: Score {:.1} is below threshold {:.1}",
                "Failed".red().bold(),
                score,
                threshold
            );
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn warn_about_failures(results: &[ProjectAnalysisResult], silent: bool) {
    if silent {
        return;
    }
    let failed: usize = results.iter().map(|r| r.extraction_failures.len()).sum();
    if failed > 0 {
        eprintln!(
            "{}: {} file(s) could not be parsed and were skipped",
            "Warning".yellow(),
            failed
        );
    }
}

fn emit(report: &str, output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!("{}: Report written to {}", "Info".blue(), path.display());
            }
        }
        None => println!("{}", report),
    }
    Ok(())
}

fn run_discover(root: &Path, json: bool) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = if root.is_dir() { root } else { cwd.as_path() };
    let config = load_config(work_dir, None)?;
    let locator = ProjectLocator::with_config(&config)?;
    let projects = locator.discover_test_projects(root)?;

    if json {
        let listed: Vec<DiscoveredProject> = projects
            .iter()
            .map(|p| DiscoveredProject {
                path: p.clone(),
                project_kind: ProjectLocator::classify(p),
            })
            .collect();
        let out = serde_json::to_string_pretty(&listed).context("Failed to serialize projects")?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    if projects.is_empty() {
        eprintln!(
            "{}: No test projects found under {}",
            "Warning".yellow(),
            root.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    for project in &projects {
        println!(
            "{} {}",
            format!("[{}]", ProjectLocator::classify(project)).dimmed(),
            project.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(6.0);
    Config {
        threshold: Some(threshold_value),
        ..Default::default()
    }
    .validate()
    .map_err(anyhow::Error::msg)?;
    let json = default_config_json(threshold_value)?;

    std::fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}
