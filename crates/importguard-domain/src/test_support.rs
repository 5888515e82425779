use crate::model::{CallSite, CallSiteKind, SourceFile, SourceModel, Span};
use crate::normalize::RootMarker;
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn, ImportRules};
use crate::rules::RuleSpec;
use camino::Utf8PathBuf;
use importguard_types::{RepoPath, Severity};
use std::collections::BTreeMap;

pub const REPO_ROOT: &str = "/repo";

/// A call site whose literal span is fabricated from the specifier length.
pub fn site(kind: CallSiteKind, specifier: &str, line: u32) -> CallSite {
    let start = 100 * line as usize;
    CallSite {
        kind,
        specifier: Some(specifier.to_string()),
        literal: Some(Span {
            start,
            end: start + specifier.len() + 2,
        }),
        line,
        col: 1,
        source_text: format!("{}('{}')", kind.as_str(), specifier),
    }
}

pub fn dynamic_site(kind: CallSiteKind, line: u32) -> CallSite {
    CallSite {
        kind,
        specifier: None,
        literal: None,
        line,
        col: 1,
        source_text: format!("{}(name)", kind.as_str()),
    }
}

/// `rel` is relative to [`REPO_ROOT`], e.g. `webapp/app/a/X.js`.
pub fn file(rel: &str, call_sites: Vec<CallSite>) -> SourceFile {
    SourceFile {
        path: RepoPath::new(rel),
        abs_path: Utf8PathBuf::from(format!("{REPO_ROOT}/{rel}")),
        call_sites,
    }
}

pub fn model(files: Vec<SourceFile>) -> SourceModel {
    SourceModel {
        repo_root: Utf8PathBuf::from(REPO_ROOT),
        files,
    }
}

pub fn rules(aliases: Option<&[&str]>, white: &[(&str, &str)], black: &[(&str, &str)]) -> ImportRules {
    ImportRules {
        aliases: aliases.map(|a| a.iter().map(|s| s.to_string()).collect()),
        whitelist: white.iter().map(|(f, t)| RuleSpec::new(*f, *t)).collect(),
        blacklist: black.iter().map(|(f, t)| RuleSpec::new(*f, *t)).collect(),
    }
}

pub fn config_with_checks(checks: &[(&str, Severity)], import_rules: ImportRules) -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        root_marker: RootMarker::default(),
        import_rules,
        checks: checks
            .iter()
            .map(|(id, sev)| (id.to_string(), CheckPolicy::enabled(*sev)))
            .collect::<BTreeMap<_, _>>(),
    }
}
