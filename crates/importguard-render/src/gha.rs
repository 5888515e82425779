use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line},col={col}::{message}`
///
/// At most `max` annotations are produced; GitHub drops the rest anyway.
pub fn render_github_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    let mut out = Vec::new();

    for f in report.findings.iter().take(max) {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info => "notice",
        };

        let mut meta = String::new();
        if let Some(loc) = &f.location {
            meta.push_str(&format!("file={}", escape_property(&loc.path)));
            if let Some(line) = loc.line {
                meta.push_str(&format!(",line={}", line));
            }
            if let Some(col) = loc.col {
                meta.push_str(&format!(",col={}", col));
            }
        }
        if !meta.is_empty() {
            meta.push(',');
        }
        meta.push_str(&format!("title={}", escape_property(&f.check_id)));

        let message = escape_data(&format!("[{}] {}", f.code, f.message));
        out.push(format!("::{} {}::{}", level, meta, message));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
