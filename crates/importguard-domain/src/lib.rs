//! Pure import policy evaluation (no IO).
//!
//! Input: a source model (files + call sites) constructed elsewhere.
//! Output: findings + verdict + summary data.
//!
//! The building blocks are usable on their own:
//! - [`normalize`]: loader-chain stripping and root-relative resolution
//! - [`alias`]: alias namespace classification
//! - [`rules`]: whitelist/blacklist evaluation
//! - [`fix`]: autofix literal generation and application

#![forbid(unsafe_code)]

pub mod alias;
pub mod fix;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod report;
pub mod rules;

mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use fix::{FixError, FixPayload, apply_fixes, compute_fix};
pub use normalize::{InvalidRootMarker, RootMarker, is_relative, normalize_import_path, strip_loader_chain};
pub use rules::{ImportPolicy, ImportVerdict, PolicyError, Rule, RuleList, RuleSpec};
