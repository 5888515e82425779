use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// Directories never worth descending into.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Compiled include/exclude globs, matched against repo-relative paths.
#[derive(Clone, Debug)]
pub struct SourceGlobs {
    include: GlobSet,
    exclude: GlobSet,
}

impl SourceGlobs {
    pub fn new(include: &[String], exclude: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            include: build_globset(include).context("compile include globset")?,
            exclude: build_globset(exclude).context("compile exclude globset")?,
        })
    }

    pub fn is_match(&self, rel: &str) -> bool {
        self.include.is_match(rel) && !self.exclude.is_match(rel)
    }
}

/// Discover source files under `repo_root` selected by `globs`.
///
/// Returned paths are absolute and sorted.
pub fn discover_sources(repo_root: &Utf8Path, globs: &SourceGlobs) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !repo_root.is_dir() {
        anyhow::bail!("repo root is not a directory: {}", repo_root);
    }

    let mut out: Vec<Utf8PathBuf> = WalkDir::new(repo_root)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter(|abs| {
            let rel = abs
                .strip_prefix(repo_root)
                .unwrap_or(abs)
                .as_str()
                .replace('\\', "/");
            globs.is_match(&rel)
        })
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    tracing::info!(root = %repo_root, files = out.len(), "discovered source files");
    Ok(out)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
