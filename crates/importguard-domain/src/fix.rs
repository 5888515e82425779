//! Autofix: rewrite relative specifiers as root-relative literals, and splice edits into text.

use crate::normalize::{RootMarker, is_loader_chain, is_relative, strip_loader_chain, to_root_relative};
use camino::Utf8Path;
use importguard_types::FindingFix;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixPayload {
    /// Quoted literal that replaces the original specifier token verbatim.
    pub replacement_literal: String,
}

/// Replacement literal for a relative specifier, if one can be produced safely.
///
/// Loader chains are never fixed: the directives in front of the module path have their own
/// syntax. Specifiers that do not resolve under the root marker get no fix either.
pub fn compute_fix(
    raw_specifier: &str,
    importing_file: &Utf8Path,
    marker: &RootMarker,
) -> Option<FixPayload> {
    if is_loader_chain(raw_specifier) || !is_relative(strip_loader_chain(raw_specifier)) {
        return None;
    }
    let dir = importing_file.parent().unwrap_or(Utf8Path::new(""));
    let rooted = to_root_relative(raw_specifier, dir, marker)?;
    let replacement_literal = serde_json::to_string(&rooted).ok()?;
    Some(FixPayload {
        replacement_literal,
    })
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixError {
    #[error("fix range {start}..{end} is outside the source ({len} bytes)")]
    OutOfRange { start: usize, end: usize, len: usize },

    #[error("fix range {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },

    #[error("fix ranges {first_start}..{first_end} and {second_start}..{second_end} overlap")]
    Overlap {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },
}

/// Apply non-overlapping edits to `source`. Edits may be given in any order.
pub fn apply_fixes(source: &str, fixes: &[FindingFix]) -> Result<String, FixError> {
    let mut ordered: Vec<&FindingFix> = fixes.iter().collect();
    ordered.sort_by_key(|f| (f.start, f.end));

    for f in &ordered {
        if f.start > f.end || f.end > source.len() {
            return Err(FixError::OutOfRange {
                start: f.start,
                end: f.end,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(f.start) || !source.is_char_boundary(f.end) {
            return Err(FixError::NotCharBoundary {
                start: f.start,
                end: f.end,
            });
        }
    }
    for pair in ordered.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(FixError::Overlap {
                first_start: pair[0].start,
                first_end: pair[0].end,
                second_start: pair[1].start,
                second_end: pair[1].end,
            });
        }
    }

    let mut out = source.to_string();
    for f in ordered.iter().rev() {
        out.replace_range(f.start..f.end, &f.replacement);
    }
    Ok(out)
}
