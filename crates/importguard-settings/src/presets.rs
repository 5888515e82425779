use importguard_domain::RootMarker;
use importguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, ImportRules};
use importguard_types::Severity;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        root_marker: RootMarker::default(),
        import_rules: ImportRules::default(),
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        root_marker: RootMarker::default(),
        import_rules: ImportRules::default(),
        checks: default_checks(Severity::Warning),
    }
}

/// The layering check starts disabled; resolution turns it on once rules are configured.
fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    use importguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(
        CHECK_IMPORTS_NO_RELATIVE_PATHS.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_IMPORTS_ONLY_SAFE_IMPORTS.to_string(),
        CheckPolicy {
            enabled: false,
            severity: default_severity,
        },
    );

    m
}
