//! Specifier normalization: loader chains, relative segments, and the root marker.
//!
//! Everything here is string algebra. Nothing touches the filesystem, and a path that cannot be
//! expressed relative to the root marker is reported as `None` rather than as an error.

use camino::Utf8Path;
use thiserror::Error;

pub const DEFAULT_ROOT_MARKER: &str = "webapp";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid root marker: {0:?} (expected one or more directory names)")]
pub struct InvalidRootMarker(pub String);

/// Directory name (or short run of names) that every root-relative path hangs from.
///
/// `webapp` matches `/repo/webapp/...`; `pinboard/webapp` only matches when `webapp` sits
/// directly under `pinboard`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootMarker {
    segments: Vec<String>,
}

impl Default for RootMarker {
    fn default() -> Self {
        Self {
            segments: vec![DEFAULT_ROOT_MARKER.to_string()],
        }
    }
}

impl RootMarker {
    pub fn new(marker: &str) -> Result<Self, InvalidRootMarker> {
        let segments: Vec<String> = marker
            .replace('\\', "/")
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let invalid = segments.is_empty() || segments.iter().any(|s| s == "." || s == "..");
        if invalid {
            return Err(InvalidRootMarker(marker.to_string()));
        }
        Ok(Self { segments })
    }

    /// The marker as written in messages (`pinboard/webapp`).
    pub fn display(&self) -> String {
        self.segments.join("/")
    }

    /// Everything after the first occurrence of the marker in `segments`.
    ///
    /// `None` when the marker is absent, or when nothing follows it.
    fn split_after<'a>(&self, segments: &[&'a str]) -> Option<Vec<&'a str>> {
        let width = self.segments.len();
        if segments.len() <= width {
            return None;
        }
        let start = (0..=segments.len() - width)
            .find(|&i| {
                segments[i..i + width]
                    .iter()
                    .zip(&self.segments)
                    .all(|(a, b)| *a == b.as_str())
            })?
            + width;
        let rest = &segments[start..];
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_vec())
    }
}

/// Drop bundler loader directives: `style!css!./a.css` names `./a.css`.
pub fn strip_loader_chain(specifier: &str) -> &str {
    // `rsplit` always yields at least one item.
    specifier.rsplit('!').next().unwrap_or(specifier)
}

pub fn is_loader_chain(specifier: &str) -> bool {
    specifier.contains('!')
}

pub fn is_relative(path: &str) -> bool {
    path.starts_with('.')
}

/// Join `base_dir` and `specifier`, then collapse `.` and `..` the way a path resolver does.
///
/// An absolute `specifier` replaces the base. `..` above the filesystem root is dropped; above a
/// relative base it is kept.
pub fn resolve_lexical(base_dir: &str, specifier: &str) -> String {
    let specifier = specifier.replace('\\', "/");
    let base_dir = base_dir.replace('\\', "/");

    let (absolute, joined) = if specifier.starts_with('/') {
        (true, specifier)
    } else {
        (base_dir.starts_with('/'), format!("{base_dir}/{specifier}"))
    };

    let mut stack: Vec<&str> = Vec::new();
    for seg in joined.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|last| *last != "..") {
                    stack.pop();
                } else if !absolute {
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }

    let body = stack.join("/");
    if absolute { format!("/{body}") } else { body }
}

/// Root-relative form of an already absolute path, e.g. the importing file itself.
pub fn root_relative_from_abs(abs_path: &str, marker: &RootMarker) -> Option<String> {
    let normalized = abs_path.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    marker.split_after(&segments).map(|rest| rest.join("/"))
}

/// Resolve `specifier` against the importing file's directory and express it from the marker.
///
/// A result with a leading `.` (`.storybook/config`) would read as relative again, so it counts
/// as unresolvable.
pub fn to_root_relative(
    specifier: &str,
    importing_dir: &Utf8Path,
    marker: &RootMarker,
) -> Option<String> {
    let resolved = resolve_lexical(importing_dir.as_str(), specifier);
    root_relative_from_abs(&resolved, marker).filter(|rooted| !is_relative(rooted))
}

/// The form the policy evaluator reasons about.
///
/// Loader directives are dropped and relative specifiers are rooted when possible. When rooting
/// fails the loader-stripped relative text is returned unchanged, so root-relative rule patterns
/// simply do not match it.
pub fn normalize_import_path(raw: &str, importing_dir: &Utf8Path, marker: &RootMarker) -> String {
    let path = strip_loader_chain(raw);
    if !is_relative(path) {
        return path.to_string();
    }
    match to_root_relative(path, importing_dir, marker) {
        Some(rooted) => rooted,
        None => {
            tracing::debug!(
                specifier = raw,
                dir = %importing_dir,
                marker = %marker.display(),
                "relative specifier does not resolve under the root marker"
            );
            path.to_string()
        }
    }
}
