use crate::normalize::RootMarker;
use crate::rules::RuleSpec;
use importguard_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
        }
    }
}

/// Uncompiled import rules. Compiled into an [`ImportPolicy`](crate::ImportPolicy) per file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportRules {
    /// `None` means no alias system: the whitelist applies to every import.
    pub aliases: Option<Vec<String>>,
    pub whitelist: Vec<RuleSpec>,
    pub blacklist: Vec<RuleSpec>,
}

impl ImportRules {
    pub fn is_configured(&self) -> bool {
        self.aliases.is_some() || !self.whitelist.is_empty() || !self.blacklist.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub root_marker: RootMarker,
    pub import_rules: ImportRules,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
