use crate::checks;
use crate::model::SourceModel;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, SeverityCounts};
use crate::rules::PolicyError;
use importguard_types::{Finding, ImportguardData, Severity, Verdict};

pub fn evaluate(model: &SourceModel, cfg: &EffectiveConfig) -> Result<DomainReport, PolicyError> {
    let mut findings: Vec<Finding> = Vec::new();

    checks::run_all(model, cfg, &mut findings)?;

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = ImportguardData {
        profile: cfg.profile.clone(),
        root_marker: cfg.root_marker.display(),
        files_scanned: model.files.len() as u32,
        call_sites_scanned: model.call_site_count() as u32,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        fixable: emitted.iter().filter(|f| f.fix.is_some()).count() as u32,
        truncated_reason,
    };

    tracing::debug!(
        files = data.files_scanned,
        call_sites = data.call_sites_scanned,
        findings = total,
        ?verdict,
        "policy evaluated"
    );

    Ok(DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    })
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.line, then location.col (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let key = |f: &Finding| match &f.location {
        Some(l) => (
            l.path.as_str().to_string(),
            l.line.unwrap_or(u32::MAX),
            l.col.unwrap_or(u32::MAX),
        ),
        None => ("~".to_string(), u32::MAX, u32::MAX),
    };
    let (ap, al, ac) = key(a);
    let (bp, bl, bc) = key(b);

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ap.cmp(&bp))
        .then(al.cmp(&bl))
        .then(ac.cmp(&bc))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
