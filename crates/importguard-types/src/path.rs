use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical repo-relative path of a scanned source file.
///
/// Normalization is simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - never empty (`.` stands for the repo root itself)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while let Some(rest) = v.strip_prefix("./") {
            v = rest.to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    /// Express `abs` relative to `root`. Paths outside `root` keep their full text.
    pub fn relative_to(root: &Utf8Path, abs: &Utf8Path) -> Self {
        match abs.strip_prefix(root) {
            Ok(rel) => RepoPath::new(rel.as_str()),
            Err(_) => RepoPath::new(abs.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension without the dot, if any.
    pub fn extension(&self) -> Option<&str> {
        Utf8Path::new(&self.0).extension()
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}
