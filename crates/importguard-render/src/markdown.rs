use crate::{RenderableFinding, RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Importguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Files scanned: {}\n- Findings: {} (emitted) / {} (total)\n",
        verdict, report.data.files_scanned, report.data.findings_emitted, report.data.findings_total
    ));
    if report.data.fixable > 0 {
        out.push_str(&format!(
            "- Auto-fixable: {} (run `importguard fix`)\n",
            report.data.fixable
        ));
    }
    out.push('\n');

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    out.push_str("| Severity | Location | Rule | Message |\n");
    out.push_str("|---|---|---|---|\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };
        out.push_str(&format!(
            "| {} | {} | `{}` / `{}` | {} |\n",
            sev,
            location_cell(f),
            f.check_id,
            f.code,
            cell(&f.message)
        ));
    }

    let hints: Vec<&RenderableFinding> = report
        .findings
        .iter()
        .filter(|f| f.help.is_some() || f.fix.is_some())
        .collect();
    if !hints.is_empty() {
        out.push_str("\n## How to fix\n\n");
        for f in hints {
            out.push_str(&format!("- {}", location_cell(f)));
            if let Some(fix) = &f.fix {
                out.push_str(&format!(": use `{}`", fix));
            }
            if let Some(help) = &f.help {
                out.push_str(&format!(" ({})", help));
            }
            out.push('\n');
        }
    }

    out
}

fn location_cell(f: &RenderableFinding) -> String {
    match &f.location {
        Some(loc) => match loc.line {
            Some(line) => format!("`{}:{}`", loc.path, line),
            None => format!("`{}`", loc.path),
        },
        None => "-".to_string(),
    }
}

/// Keep table rows intact.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableLocation};

    fn data(emitted: u32, total: u32) -> RenderableData {
        RenderableData {
            files_scanned: 3,
            findings_emitted: emitted,
            findings_total: total,
            fixable: 0,
            truncated_reason: None,
        }
    }

    fn relative_finding() -> RenderableFinding {
        RenderableFinding {
            severity: RenderableSeverity::Error,
            check_id: "imports.no_relative_paths".to_string(),
            code: "relative_path".to_string(),
            message: "Use paths that resolve from webapp/ instead of relative paths: import b from '../b/B'"
                .to_string(),
            location: Some(RenderableLocation {
                path: "webapp/a/A.js".to_string(),
                line: Some(4),
                col: Some(1),
            }),
            help: None,
            fix: Some("\"b/B\"".to_string()),
        }
    }

    #[test]
    fn renders_empty_report() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Pass,
            findings: Vec::new(),
            data: data(0, 0),
        };
        let md = render_markdown(&report);
        assert!(md.starts_with("# Importguard report"));
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("Files scanned: 3"));
        assert!(md.contains("No findings"));
        assert!(!md.contains("Auto-fixable"));
    }

    #[test]
    fn renders_findings_table_fixes_and_truncation() {
        let mut d = data(1, 2);
        d.fixable = 1;
        d.truncated_reason = Some("findings truncated to 1".to_string());
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            findings: vec![relative_finding()],
            data: d,
        };

        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("Auto-fixable: 1"));
        assert!(md.contains("> Note: findings truncated to 1"));
        assert!(md.contains("| ERROR | `webapp/a/A.js:4` | `imports.no_relative_paths` / `relative_path` |"));
        assert!(md.contains("## How to fix"));
        assert!(md.contains("- `webapp/a/A.js:4`: use `\"b/B\"`"));
    }

    #[test]
    fn escapes_table_breaking_characters() {
        let mut f = relative_finding();
        f.message = "a | b\nc".to_string();
        f.fix = None;
        f.location = None;
        f.help = Some("see logs".to_string());
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Warn,
            findings: vec![f],
            data: data(1, 1),
        };

        let md = render_markdown(&report);
        assert!(md.contains("| - |"));
        assert!(md.contains("a \\| b c"));
        assert!(md.contains("- - (see logs)"));
    }
}
