//! CLI entry point for importguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `importguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use importguard_app::{
    CheckInput, ExplainOutput, FixInput, format_explanation, format_not_found, parse_report_json,
    render_annotations, render_markdown, run_check, run_explain, run_fix, runtime_error_report,
    serialize_report, verdict_exit_code,
};
use importguard_settings::Overrides;
use importguard_types::ImportguardReport;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "IMPORTGUARD_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "importguard",
    version,
    about = "Import path policy guard for JavaScript and TypeScript sources"
)]
struct Cli {
    /// Directory to scan. Paths in reports are relative to it.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to importguard config TOML, relative to the repo root.
    #[arg(long, default_value = "importguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn).
    #[arg(long)]
    profile: Option<String>,

    /// Override the directory that root-relative paths start below.
    #[arg(long)]
    root_marker: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    /// More logging on stderr (-v info, -vv debug). `IMPORTGUARD_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate policy and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/importguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/importguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Rewrite relative import specifiers as root-relative ones.
    Fix {
        /// List the files that would change without writing them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/importguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/importguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "imports.no_relative_paths") or code (e.g., "relative_path").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.cmd {
        Commands::Check {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(&cli, report_out, *write_markdown, markdown_out),
        Commands::Fix { dry_run } => cmd_fix(&cli, *dry_run),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "importguard=warn",
        1 => "importguard=info",
        _ => "importguard=debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Canonical repo root plus the config text (empty when the file is missing).
fn load_inputs(cli: &Cli) -> anyhow::Result<(Utf8PathBuf, String)> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .with_context(|| format!("repo root does not exist: {}", cli.repo_root))?;

    let cfg_path = repo_root.join(&cli.config);
    let cfg_text = if cfg_path.exists() {
        std::fs::read_to_string(&cfg_path).with_context(|| format!("read config: {cfg_path}"))?
    } else {
        tracing::info!(path = %cfg_path, "no config file; using defaults");
        String::new()
    };

    Ok((repo_root, cfg_text))
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        root_marker: cli.root_marker.clone(),
        max_findings: cli.max_findings,
    }
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let (repo_root, cfg_text) = load_inputs(cli)?;

        let output = run_check(CheckInput {
            repo_root: &repo_root,
            config_text: &cfg_text,
            overrides: overrides(cli),
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if write_markdown {
            write_text_file(markdown_out, &render_markdown(&output.report))
                .context("write markdown")?;
        }

        let data = &output.report.data;
        eprintln!(
            "importguard: {:?}: {} finding(s) in {} file(s), {} fixable",
            output.report.verdict, data.findings_total, data.files_scanned, data.fixable
        );
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                tracing::warn!(error = %write_err, "could not write runtime error report");
            }
            eprintln!("importguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_fix(cli: &Cli, dry_run: bool) -> anyhow::Result<()> {
    let (repo_root, cfg_text) = load_inputs(cli)?;

    let output = run_fix(FixInput {
        repo_root: &repo_root,
        config_text: &cfg_text,
        overrides: overrides(cli),
        dry_run,
    })?;

    let verb = if dry_run { "would fix" } else { "fixed" };
    for file in &output.files {
        println!("{verb} {} ({} edit(s))", file.path, file.edits);
    }
    eprintln!(
        "importguard: {verb} {} specifier(s) in {} file(s); {} need manual attention",
        output.edits_total(),
        output.files.len(),
        output.unfixable
    );

    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &ImportguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<ImportguardReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let md = render_markdown(&read_report(report_path)?);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    for annotation in render_annotations(&read_report(report_path)?, max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found {
            identifier,
            explanation,
        } => {
            print!("{}", format_explanation(&identifier, &explanation));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
