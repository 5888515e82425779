//! Whitelist/blacklist evaluation over root-relative paths.

use crate::alias::is_aliased_path;
use crate::policy::ImportRules;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid `{field}` pattern in {list}[{index}]: {pattern}")]
    InvalidPattern {
        list: RuleList,
        index: usize,
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleList {
    Whitelist,
    Blacklist,
}

impl std::fmt::Display for RuleList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RuleList::Whitelist => "whitelisted-imports",
            RuleList::Blacklist => "blacklisted-imports",
        })
    }
}

/// A rule as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub from: String,
    pub to: String,
}

impl RuleSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A compiled `(from, to)` pair. Both patterns search anywhere in the path unless anchored.
#[derive(Clone, Debug)]
pub struct Rule {
    from: Regex,
    to: Regex,
}

impl Rule {
    pub fn compile(spec: &RuleSpec, list: RuleList, index: usize) -> Result<Self, PolicyError> {
        let compile = |field: &'static str, pattern: &str| {
            Regex::new(pattern).map_err(|source| PolicyError::InvalidPattern {
                list,
                index,
                field,
                pattern: pattern.to_string(),
                source,
            })
        };
        Ok(Self {
            from: compile("from", &spec.from)?,
            to: compile("to", &spec.to)?,
        })
    }

    pub fn matches(&self, self_path: &str, import_path: &str) -> bool {
        self.from.is_match(self_path) && self.to.is_match(import_path)
    }
}

fn compile_list(specs: &[RuleSpec], list: RuleList) -> Result<Vec<Rule>, PolicyError> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| Rule::compile(spec, list, index))
        .collect()
}

/// True if some rule accepts the pair.
///
/// With aliases configured, a path outside every alias is an external package and passes
/// without consulting the rules.
pub fn satisfies_rule_set(
    rules: &[Rule],
    aliases: Option<&[String]>,
    self_path: &str,
    import_path: &str,
) -> bool {
    if aliases.is_some() && !is_aliased_path(import_path, aliases) {
        return true;
    }
    rules.iter().any(|rule| rule.matches(self_path, import_path))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportVerdict {
    pub allowed: bool,
    pub message: Option<String>,
}

impl ImportVerdict {
    fn allow() -> Self {
        Self {
            allowed: true,
            message: None,
        }
    }

    fn deny(raw_specifier: &str) -> Self {
        Self {
            allowed: false,
            message: Some(format!("Import disallowed by rules: {raw_specifier}")),
        }
    }
}

/// Compiled rule sets for one analyzed file. Immutable once built.
#[derive(Clone, Debug)]
pub struct ImportPolicy {
    aliases: Option<Vec<String>>,
    whitelist: Vec<Rule>,
    blacklist: Vec<Rule>,
}

impl ImportPolicy {
    pub fn compile(rules: &ImportRules) -> Result<Self, PolicyError> {
        Ok(Self {
            aliases: rules.aliases.clone(),
            whitelist: compile_list(&rules.whitelist, RuleList::Whitelist)?,
            blacklist: compile_list(&rules.blacklist, RuleList::Blacklist)?,
        })
    }

    pub fn aliases(&self) -> Option<&[String]> {
        self.aliases.as_deref()
    }

    /// Allowed iff the whitelist accepts the import and the blacklist does not.
    ///
    /// The blacklist ignores aliases, so it can forbid external packages too.
    pub fn evaluate(&self, raw_specifier: &str, self_path: &str, import_path: &str) -> ImportVerdict {
        let whitelisted = satisfies_rule_set(&self.whitelist, self.aliases(), self_path, import_path);
        let blacklisted = satisfies_rule_set(&self.blacklist, None, self_path, import_path);

        if whitelisted && !blacklisted {
            ImportVerdict::allow()
        } else {
            tracing::trace!(
                specifier = raw_specifier,
                self_path,
                import_path,
                whitelisted,
                blacklisted,
                "import denied"
            );
            ImportVerdict::deny(raw_specifier)
        }
    }
}
