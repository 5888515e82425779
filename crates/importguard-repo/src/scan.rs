//! Call-site scanner for JavaScript/TypeScript sources.
//!
//! Sources are parsed with tree-sitter and the syntax tree is walked for static
//! `import` statements, `require(...)` calls (including TypeScript's
//! `import x = require(...)`) and `jest.mock(...)`/`jest.unmock(...)`
//! registrations. Literal spans are node byte ranges into the original text.

use anyhow::Context;
use camino::Utf8Path;
use importguard_domain::model::{CallSite, CallSiteKind, Span};
use tree_sitter::{Language, Node, Parser};

/// Grammar used to parse a source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// `.js`, `.jsx`, `.mjs`, `.cjs` (JSX included).
    JavaScript,
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx`
    Tsx,
}

impl Dialect {
    /// Pick the grammar from the file extension. Unknown extensions parse as JavaScript.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("ts" | "mts" | "cts") => Dialect::TypeScript,
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::JavaScript,
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Find every call site in `text`, ordered by position.
///
/// Statements the parser could not make sense of are skipped, so no fix is
/// ever anchored in a region with syntax errors.
pub fn scan_call_sites(dialect: Dialect, text: &str) -> anyhow::Result<Vec<CallSite>> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .with_context(|| format!("load {dialect:?} grammar"))?;
    let tree = parser
        .parse(text, None)
        .with_context(|| format!("parse {dialect:?} source"))?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(?dialect, "source has syntax errors; affected statements are skipped");
    }

    let lines = LineIndex::new(text);
    let mut found = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let site = match node.kind() {
            "import_statement" => import_site(node, text, &lines),
            "call_expression" => call_site(node, text, &lines),
            _ => None,
        };
        found.extend(site);

        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    found.sort_by_key(|(start, _)| *start);
    Ok(found.into_iter().map(|(_, site)| site).collect())
}

/// `import ... from '...'`, `import '...'` and `import x = require('...')`.
fn import_site(stmt: Node<'_>, text: &str, lines: &LineIndex) -> Option<(usize, CallSite)> {
    if stmt.has_error() {
        return None;
    }

    let (kind, source) = match stmt.child_by_field_name("source") {
        Some(source) => (CallSiteKind::Import, source),
        None => {
            let clause = named_children(stmt)
                .into_iter()
                .find(|n| n.kind() == "import_require_clause")?;
            let source = clause.child_by_field_name("source").or_else(|| {
                named_children(clause)
                    .into_iter()
                    .find(|n| n.kind() == "string")
            })?;
            (CallSiteKind::Require, source)
        }
    };
    if source.kind() != "string" {
        return None;
    }

    let start = stmt.start_byte();
    let (line, col) = lines.position(text, start);
    Some((
        start,
        CallSite {
            kind,
            specifier: Some(unquote(node_text(source, text))),
            literal: Some(span(source)),
            line,
            col,
            source_text: text.get(start..source.end_byte())?.to_string(),
        },
    ))
}

/// `require(...)`, `jest.mock(...)` and `jest.unmock(...)` with exactly one argument.
///
/// A non-literal argument yields a site without a specifier, which the checks skip.
fn call_site(call: Node<'_>, text: &str, lines: &LineIndex) -> Option<(usize, CallSite)> {
    if call.has_error() {
        return None;
    }

    let kind = callee_kind(call.child_by_field_name("function")?, text)?;
    let args = call.child_by_field_name("arguments")?;
    if args.kind() != "arguments" {
        return None;
    }

    let values: Vec<Node<'_>> = named_children(args)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect();
    let &[arg] = values.as_slice() else {
        return None;
    };

    let (specifier, literal) = if arg.kind() == "string" {
        (Some(unquote(node_text(arg, text))), Some(span(arg)))
    } else {
        (None, None)
    };

    let start = call.start_byte();
    let (line, col) = lines.position(text, start);
    Some((
        start,
        CallSite {
            kind,
            specifier,
            literal,
            line,
            col,
            source_text: node_text(call, text).to_string(),
        },
    ))
}

fn callee_kind(callee: Node<'_>, text: &str) -> Option<CallSiteKind> {
    match callee.kind() {
        "identifier" if node_text(callee, text) == "require" => Some(CallSiteKind::Require),
        "member_expression" => {
            let object = callee.child_by_field_name("object")?;
            let property = callee.child_by_field_name("property")?;
            if object.kind() != "identifier" || node_text(object, text) != "jest" {
                return None;
            }
            match node_text(property, text) {
                "mock" => Some(CallSiteKind::Mock),
                "unmock" => Some(CallSiteKind::Unmock),
                _ => None,
            }
        }
        _ => None,
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn node_text<'a>(node: Node<'_>, text: &'a str) -> &'a str {
    text.get(node.start_byte()..node.end_byte()).unwrap_or_default()
}

fn span(node: Node<'_>) -> Span {
    Span {
        start: node.start_byte(),
        end: node.end_byte(),
    }
}

/// Strip the quotes from a string literal and decode its escape sequences.
///
/// Malformed escapes are kept verbatim.
fn unquote(literal: &str) -> String {
    let inner = literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default();

    let mut out = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escape = &rest[pos + 1..];
        let (decoded, used) = decode_escape(escape);
        match decoded {
            Some(c) => out.push(c),
            None if used == 0 => out.push('\\'),
            None => {}
        }
        rest = &escape[used..];
    }
    out.push_str(rest);
    out
}

/// Decode the escape following a backslash. Returns the character (if any) and
/// the number of bytes consumed after the backslash.
fn decode_escape(s: &str) -> (Option<char>, usize) {
    let Some(first) = s.chars().next() else {
        return (None, 0);
    };
    let simple = match first {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'v' => Some('\u{b}'),
        '0' if !s[1..].starts_with(|c: char| c.is_ascii_digit()) => Some('\0'),
        _ => None,
    };
    if let Some(c) = simple {
        return (Some(c), 1);
    }

    match first {
        // Line continuation.
        '\n' => (None, 1),
        '\r' => (None, if s[1..].starts_with('\n') { 2 } else { 1 }),
        'x' => hex_char(s.get(1..3)).map_or((Some('x'), 1), |c| (Some(c), 3)),
        'u' if s[1..].starts_with('{') => match s[2..].find('}') {
            Some(close) => hex_char(Some(&s[2..2 + close]))
                .map_or((Some('u'), 1), |c| (Some(c), close + 3)),
            None => (Some('u'), 1),
        },
        'u' => decode_utf16(s).unwrap_or((Some('u'), 1)),
        other => (Some(other), other.len_utf8()),
    }
}

/// `\uXXXX`, joining a following `\uXXXX` low surrogate when present.
fn decode_utf16(s: &str) -> Option<(Option<char>, usize)> {
    let high = hex_u16(s.get(1..5)?)?;
    if let Some(c) = char::from_u32(u32::from(high)) {
        return Some((Some(c), 5));
    }
    let low = s
        .get(5..7)
        .filter(|marker| *marker == "\\u")
        .and_then(|_| hex_u16(s.get(7..11)?))?;
    let c = char::decode_utf16([high, low]).next()?.ok()?;
    Some((Some(c), 11))
}

fn hex_u16(digits: &str) -> Option<u16> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

fn hex_char(digits: Option<&str>) -> Option<char> {
    let digits = digits?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

/// Byte offsets of line starts, for offset -> (line, col) lookups.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// 1-based line and column; columns count characters.
    fn position(&self, text: &str, offset: usize) -> (u32, u32) {
        let idx = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        let line_start = self.starts[idx];
        let col = text.get(line_start..offset).map_or(0, |s| s.chars().count());
        (to_u32(idx + 1), to_u32(col + 1))
    }
}

fn to_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
