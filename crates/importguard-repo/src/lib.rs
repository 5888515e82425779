//! Repository adapters: discover source files and scan them for import call sites.
//!
//! This crate is allowed to do filesystem IO. It never writes; fixes are applied by the app layer.

#![forbid(unsafe_code)]

mod discover;
mod scan;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use importguard_domain::model::{SourceFile, SourceModel};
use importguard_types::RepoPath;
use rayon::prelude::*;

pub use discover::{SourceGlobs, discover_sources};
pub use scan::{Dialect, scan_call_sites};

/// Scan one file's text. No filesystem access; the grammar follows the file extension.
pub fn scan_source(
    repo_root: &Utf8Path,
    abs_path: &Utf8Path,
    text: &str,
) -> anyhow::Result<SourceFile> {
    let call_sites = scan_call_sites(Dialect::from_path(abs_path), text)?;
    Ok(SourceFile {
        path: RepoPath::relative_to(repo_root, abs_path),
        abs_path: abs_path.to_path_buf(),
        call_sites,
    })
}

/// Build the in-memory source model used by the policy engine.
///
/// `repo_root` should be absolute so root-marker resolution sees the full path.
pub fn build_source_model(
    repo_root: &Utf8Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<SourceModel> {
    let globs = SourceGlobs::new(include, exclude)?;
    let paths = discover_sources(repo_root, &globs).context("discover sources")?;

    let mut files = paths
        .par_iter()
        .map(|abs| read_and_scan(repo_root, abs))
        .collect::<anyhow::Result<Vec<_>>>()?;
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let model = SourceModel {
        repo_root: repo_root.to_path_buf(),
        files,
    };
    tracing::info!(
        files = model.files.len(),
        call_sites = model.call_site_count(),
        "source model built"
    );
    Ok(model)
}

fn read_and_scan(repo_root: &Utf8Path, abs: &Utf8PathBuf) -> anyhow::Result<SourceFile> {
    let text = std::fs::read_to_string(abs).with_context(|| format!("read {abs}"))?;
    let file = scan_source(repo_root, abs, &text).with_context(|| format!("scan {abs}"))?;
    tracing::debug!(path = %file.path, call_sites = file.call_sites.len(), "scanned");
    Ok(file)
}
