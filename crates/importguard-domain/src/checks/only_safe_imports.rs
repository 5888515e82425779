use crate::checks::utils::{importing_dir, location, self_path};
use crate::fingerprint::fingerprint_for_call_site;
use crate::model::SourceFile;
use crate::normalize::normalize_import_path;
use crate::policy::EffectiveConfig;
use crate::rules::ImportPolicy;
use importguard_types::{Finding, ids};
use serde_json::json;

pub fn run(file: &SourceFile, policy: &ImportPolicy, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(check) = cfg.check_policy(ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS) else {
        return;
    };

    let self_path = self_path(file, &cfg.root_marker);
    let dir = importing_dir(file);

    for site in file.call_sites.iter().filter(|s| s.kind.is_dependency_edge()) {
        let Some(raw) = site.checked_specifier() else {
            continue;
        };

        let import_path = normalize_import_path(raw, dir, &cfg.root_marker);
        let verdict = policy.evaluate(raw, &self_path, &import_path);
        if verdict.allowed {
            continue;
        }

        out.push(Finding {
            severity: check.severity,
            check_id: ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS.to_string(),
            code: ids::CODE_IMPORT_DISALLOWED.to_string(),
            message: verdict
                .message
                .unwrap_or_else(|| format!("Import disallowed by rules: {raw}")),
            location: Some(location(file, site)),
            help: Some(
                "Depend on a module the whitelisted-imports rules allow, or extend the rules."
                    .to_string(),
            ),
            fingerprint: Some(fingerprint_for_call_site(
                ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS,
                ids::CODE_IMPORT_DISALLOWED,
                file.path.as_str(),
                site.line,
                raw,
            )),
            fix: None,
            data: json!({
                "specifier": raw,
                "kind": site.kind.as_str(),
                "from": self_path,
                "to": import_path,
            }),
        });
    }
}
