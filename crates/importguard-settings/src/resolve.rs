use crate::model::{ImportguardConfigV1, RuleConfig};
use crate::presets;
use anyhow::Context;
use globset::Glob;
use importguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, ImportRules};
use importguard_domain::{ImportPolicy, RootMarker, RuleSpec};
use importguard_types::{Severity, ids};

/// Extensions scanned when the config does not say otherwise.
pub const DEFAULT_INCLUDE: &[&str] = &[
    "**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs", "**/*.ts", "**/*.tsx",
];

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub root_marker: Option<String>,
    pub max_findings: Option<u32>,
}

/// Which files the repo adapter should scan. Patterns are validated globs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub sources: SourceFilter,
}

pub fn resolve_config(
    cfg: ImportguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // Root marker
    if let Some(marker) = overrides.root_marker.as_deref().or(cfg.root_marker.as_deref()) {
        effective.root_marker = RootMarker::new(marker).context("invalid root_marker")?;
    }

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // Import rules. Compile once up front so a bad pattern fails before any file is read.
    let import_rules = ImportRules {
        aliases: cfg.aliases.clone(),
        whitelist: rule_specs(cfg.whitelisted_imports.as_deref()),
        blacklist: rule_specs(cfg.blacklisted_imports.as_deref()),
    };
    ImportPolicy::compile(&import_rules).context("invalid import rules")?;
    if import_rules.is_configured()
        && let Some(check) = effective
            .checks
            .get_mut(ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS)
    {
        check.enabled = true;
    }
    effective.import_rules = import_rules;

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let sources = SourceFilter {
        include: if cfg.include.is_empty() {
            DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect()
        } else {
            cfg.include.clone()
        },
        exclude: cfg.exclude.clone(),
    };
    validate_globs("include", &sources.include)?;
    validate_globs("exclude", &sources.exclude)?;

    tracing::debug!(
        profile = %effective.profile,
        root_marker = %effective.root_marker.display(),
        whitelist = effective.import_rules.whitelist.len(),
        blacklist = effective.import_rules.blacklist.len(),
        "config resolved"
    );

    Ok(ResolvedConfig { effective, sources })
}

fn rule_specs(rules: Option<&[RuleConfig]>) -> Vec<RuleSpec> {
    rules
        .unwrap_or_default()
        .iter()
        .map(|r| RuleSpec::new(r.from.clone(), r.to.clone()))
        .collect()
}

fn validate_globs(key: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid {key} glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(text: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(text)?, Overrides::default())
    }

    #[test]
    fn empty_config_uses_strict_defaults() {
        let resolved = resolve("").expect("resolve");
        let eff = &resolved.effective;
        assert_eq!(eff.profile, "strict");
        assert_eq!(eff.fail_on, FailOn::Error);
        assert_eq!(eff.root_marker.display(), "webapp");
        assert!(eff.check_policy(ids::CHECK_IMPORTS_NO_RELATIVE_PATHS).is_some());
        assert!(eff.check_policy(ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS).is_none());
        assert_eq!(resolved.sources.include.len(), DEFAULT_INCLUDE.len());
    }

    #[test]
    fn configured_rules_enable_layering_check() {
        let resolved = resolve(r#"aliases = ["app"]"#).expect("resolve");
        let check = resolved
            .effective
            .check_policy(ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS)
            .expect("enabled");
        assert_eq!(check.severity, Severity::Error);
        assert_eq!(
            resolved.effective.import_rules.aliases,
            Some(vec!["app".to_string()])
        );
    }

    #[test]
    fn explicit_disable_beats_rule_presence() {
        let resolved = resolve(
            r#"
blacklisted-imports = [{ from = ".*", to = "^lodash$" }]

[checks."imports.only_safe_imports"]
enabled = false
"#,
        )
        .expect("resolve");
        assert!(
            resolved
                .effective
                .check_policy(ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS)
                .is_none()
        );
        assert_eq!(resolved.effective.import_rules.blacklist.len(), 1);
    }

    #[test]
    fn bad_rule_pattern_fails_resolution() {
        let err = resolve(r#"whitelisted-imports = [{ from = "(", to = ".*" }]"#)
            .expect_err("bad regex");
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid import rules"), "{msg}");
        assert!(msg.contains("whitelisted-imports[0]"), "{msg}");
    }

    #[test]
    fn overrides_beat_config() {
        let cfg = parse_config_toml(
            r#"
profile = "strict"
root_marker = "webapp"
max_findings = 10
"#,
        )
        .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                profile: Some("warn".to_string()),
                root_marker: Some("pinboard/webapp".to_string()),
                max_findings: Some(3),
            },
        )
        .expect("resolve");
        assert_eq!(resolved.effective.profile, "warn");
        assert_eq!(resolved.effective.fail_on, FailOn::Warning);
        assert_eq!(resolved.effective.root_marker.display(), "pinboard/webapp");
        assert_eq!(resolved.effective.max_findings, 3);
    }

    #[test]
    fn bad_root_marker_is_reported_as_a_marker_error() {
        let err = resolve(r#"root_marker = "../webapp""#).expect_err("bad marker");
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid root_marker"), "{msg}");
        assert!(msg.contains("invalid root marker: \"../webapp\""), "{msg}");
        assert!(!msg.contains("import rules"), "{msg}");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(resolve(r#"root_marker = "..""#).is_err());
        assert!(resolve(r#"fail_on = "sometimes""#).is_err());
        assert!(resolve(r#"include = ["a/[b"]"#).is_err());
        assert!(
            resolve(
                r#"
[checks."imports.no_relative_paths"]
severity = "fatal"
"#
            )
            .is_err()
        );
    }
}
