use camino::Utf8PathBuf;
use importguard_types::RepoPath;

/// Everything the engine needs to know about a scanned tree.
#[derive(Clone, Debug, Default)]
pub struct SourceModel {
    /// Absolute directory the scan started from.
    pub repo_root: Utf8PathBuf,
    pub files: Vec<SourceFile>,
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Repo-relative path, used for reporting.
    pub path: RepoPath,
    /// Absolute path, used for root-marker resolution.
    pub abs_path: Utf8PathBuf,
    pub call_sites: Vec<CallSite>,
}

/// The syntactic shapes that name another module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallSiteKind {
    /// `import x from '...'` / `import '...'`
    Import,
    /// `require('...')`
    Require,
    /// `jest.mock('...')`
    Mock,
    /// `jest.unmock('...')`
    Unmock,
}

impl CallSiteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallSiteKind::Import => "import",
            CallSiteKind::Require => "require",
            CallSiteKind::Mock => "jest.mock",
            CallSiteKind::Unmock => "jest.unmock",
        }
    }

    /// Whether the call site makes the file depend on the target at runtime.
    ///
    /// Mock registrations only redirect a dependency declared elsewhere.
    pub fn is_dependency_edge(self) -> bool {
        matches!(self, CallSiteKind::Import | CallSiteKind::Require)
    }
}

/// Byte range into the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug)]
pub struct CallSite {
    pub kind: CallSiteKind,
    /// Unquoted specifier. `None` when the argument is not a string literal.
    pub specifier: Option<String>,
    /// Span of the specifier literal including its quotes.
    pub literal: Option<Span>,
    /// 1-based position of the call site.
    pub line: u32,
    pub col: u32,
    /// Source text of the whole call site, for messages.
    pub source_text: String,
}

impl CallSite {
    /// The specifier when there is one worth checking.
    pub fn checked_specifier(&self) -> Option<&str> {
        self.specifier.as_deref().filter(|s| !s.is_empty())
    }
}

impl SourceModel {
    pub fn call_site_count(&self) -> usize {
        self.files.iter().map(|f| f.call_sites.len()).sum()
    }
}
