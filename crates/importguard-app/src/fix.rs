//! The `fix` use case: rewrite relative specifiers in place.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use importguard_settings::Overrides;
use importguard_types::{FindingFix, RepoPath, ids};
use std::collections::BTreeMap;

use crate::check::{evaluate_repo, load_config};

#[derive(Clone, Debug)]
pub struct FixInput<'a> {
    pub repo_root: &'a Utf8Path,
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Compute the edits but leave files untouched.
    pub dry_run: bool,
}

/// One rewritten (or, in a dry run, rewritable) file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFix {
    pub path: RepoPath,
    pub edits: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixOutput {
    pub files: Vec<FileFix>,
    /// Relative-path findings that had no mechanical fix.
    pub unfixable: usize,
    pub dry_run: bool,
}

impl FixOutput {
    pub fn edits_total(&self) -> usize {
        self.files.iter().map(|f| f.edits).sum()
    }
}

/// A file whose new text has been computed but not yet written.
#[derive(Debug)]
struct PendingWrite {
    path: RepoPath,
    abs: Utf8PathBuf,
    text: String,
    edits: usize,
}

/// Check the repository, then apply every available fix.
///
/// Every rewritten text is computed before the first write, so a file that cannot be fixed
/// leaves the whole tree untouched. `max_findings` does not limit fixing: all findings are
/// considered.
pub fn run_fix(input: FixInput<'_>) -> anyhow::Result<FixOutput> {
    let mut resolved = load_config(input.config_text, input.overrides)?;
    resolved.effective.max_findings = usize::MAX;

    let (model, report) = evaluate_repo(input.repo_root, &resolved)?;

    let mut per_file: BTreeMap<RepoPath, Vec<FindingFix>> = BTreeMap::new();
    let mut unfixable = 0;
    for finding in report.findings {
        if finding.code != ids::CODE_RELATIVE_PATH {
            continue;
        }
        match (finding.fix, finding.location) {
            (Some(fix), Some(loc)) => per_file.entry(loc.path).or_default().push(fix),
            _ => unfixable += 1,
        }
    }

    let targets = per_file
        .into_iter()
        .map(|(path, edits)| {
            let abs = model
                .files
                .iter()
                .find(|f| f.path == path)
                .map(|f| f.abs_path.clone())
                .unwrap_or_else(|| input.repo_root.join(path.as_str()));
            (path, abs, edits)
        })
        .collect();
    let pending = prepare_writes(targets)?;

    if !input.dry_run {
        write_all(&pending)?;
    }

    let files = pending
        .into_iter()
        .map(|w| {
            tracing::info!(path = %w.path, edits = w.edits, dry_run = input.dry_run, "fixes applied");
            FileFix {
                path: w.path,
                edits: w.edits,
            }
        })
        .collect();

    Ok(FixOutput {
        files,
        unfixable,
        dry_run: input.dry_run,
    })
}

fn prepare_writes(
    targets: Vec<(RepoPath, Utf8PathBuf, Vec<FindingFix>)>,
) -> anyhow::Result<Vec<PendingWrite>> {
    targets
        .into_iter()
        .map(|(path, abs, edits)| {
            let text = std::fs::read_to_string(&abs).with_context(|| format!("read {abs}"))?;
            let fixed = importguard_domain::apply_fixes(&text, &edits)
                .with_context(|| format!("apply fixes to {path}; no files were changed"))?;
            Ok(PendingWrite {
                path,
                abs,
                text: fixed,
                edits: edits.len(),
            })
        })
        .collect()
}

fn write_all(pending: &[PendingWrite]) -> anyhow::Result<()> {
    for (done, w) in pending.iter().enumerate() {
        std::fs::write(&w.abs, &w.text).with_context(|| {
            let written: Vec<&str> = pending[..done].iter().map(|w| w.path.as_str()).collect();
            format!("write {}; already rewritten: [{}]", w.abs, written.join(", "))
        })?;
    }
    Ok(())
}
