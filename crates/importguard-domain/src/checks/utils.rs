use crate::model::{CallSite, SourceFile};
use crate::normalize::{RootMarker, root_relative_from_abs};
use camino::Utf8Path;
use importguard_types::Location;

pub fn location(file: &SourceFile, site: &CallSite) -> Location {
    Location {
        path: file.path.clone(),
        line: Some(site.line),
        col: Some(site.col),
    }
}

/// The importing file as the `from` side of a rule sees it.
///
/// Files outside the root marker fall back to their repo-relative path.
pub fn self_path(file: &SourceFile, marker: &RootMarker) -> String {
    root_relative_from_abs(file.abs_path.as_str(), marker)
        .unwrap_or_else(|| file.path.as_str().to_string())
}

pub fn importing_dir(file: &SourceFile) -> &Utf8Path {
    file.abs_path.parent().unwrap_or(Utf8Path::new(""))
}
