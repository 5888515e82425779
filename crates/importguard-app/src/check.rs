//! The `check` use case: evaluate policy and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use importguard_domain::model::SourceModel;
use importguard_domain::report::DomainReport;
use importguard_settings::{Overrides, ResolvedConfig};
use importguard_types::{ImportguardReport, ReportEnvelope, SCHEMA_REPORT_V1, Verdict};
use time::OffsetDateTime;

use crate::report::tool_meta;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Repository root path. Should be absolute so the root marker can be found in file paths.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ImportguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, discover sources, evaluate policy, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = load_config(input.config_text, input.overrides)?;
    let (_, domain_report) = evaluate_repo(input.repo_root, &resolved)?;

    let DomainReport {
        verdict,
        findings,
        data,
        counts,
    } = domain_report;

    tracing::info!(
        verdict = ?verdict,
        errors = counts.error,
        warnings = counts.warning,
        infos = counts.info,
        "check finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Parse and resolve config text. Empty text means defaults.
pub(crate) fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        importguard_settings::ImportguardConfigV1::default()
    } else {
        importguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    importguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Scan the repository and run the engine against it.
pub(crate) fn evaluate_repo(
    repo_root: &Utf8Path,
    resolved: &ResolvedConfig,
) -> anyhow::Result<(SourceModel, DomainReport)> {
    let model = importguard_repo::build_source_model(
        repo_root,
        &resolved.sources.include,
        &resolved.sources.exclude,
    )
    .context("build source model")?;

    let report =
        importguard_domain::evaluate(&model, &resolved.effective).context("evaluate imports")?;
    Ok((model, report))
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
