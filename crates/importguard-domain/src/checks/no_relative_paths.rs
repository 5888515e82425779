use crate::checks::utils::location;
use crate::fingerprint::fingerprint_for_call_site;
use crate::fix::compute_fix;
use crate::model::SourceFile;
use crate::normalize::{is_relative, strip_loader_chain};
use crate::policy::EffectiveConfig;
use importguard_types::{Finding, FindingFix, ids};
use serde_json::json;

pub fn run(file: &SourceFile, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_IMPORTS_NO_RELATIVE_PATHS) else {
        return;
    };
    let marker = cfg.root_marker.display();

    for site in &file.call_sites {
        let Some(raw) = site.checked_specifier() else {
            continue;
        };
        if !is_relative(strip_loader_chain(raw)) {
            continue;
        }

        let payload = compute_fix(raw, &file.abs_path, &cfg.root_marker);
        let fix = match (payload, site.literal) {
            (Some(payload), Some(span)) => Some(FindingFix {
                start: span.start,
                end: span.end,
                replacement: payload.replacement_literal,
            }),
            _ => {
                tracing::debug!(
                    file = %file.path,
                    line = site.line,
                    specifier = raw,
                    "relative specifier reported without a fix"
                );
                None
            }
        };

        let help = if fix.is_some() {
            format!("Rewrite the specifier relative to {marker}/ (`importguard fix` can do this).")
        } else {
            format!("Rewrite the specifier relative to {marker}/ by hand.")
        };

        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_IMPORTS_NO_RELATIVE_PATHS.to_string(),
            code: ids::CODE_RELATIVE_PATH.to_string(),
            message: format!(
                "Use paths that resolve from {marker}/ instead of relative paths: {}",
                site.source_text
            ),
            location: Some(location(file, site)),
            help: Some(help),
            fingerprint: Some(fingerprint_for_call_site(
                ids::CHECK_IMPORTS_NO_RELATIVE_PATHS,
                ids::CODE_RELATIVE_PATH,
                file.path.as_str(),
                site.line,
                raw,
            )),
            data: json!({
                "specifier": raw,
                "kind": site.kind.as_str(),
                "replacement": fix.as_ref().map(|f| f.replacement.as_str()),
            }),
            fix,
        });
    }
}
