//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - loader-chain stripping and root-relative normalization
//! - autofix round-trips, including dot-prefixed directories
//! - blacklist evaluation ignoring the alias exemption

use crate::fix::compute_fix;
use crate::model::CallSiteKind;
use crate::normalize::{RootMarker, is_relative, normalize_import_path, strip_loader_chain};
use crate::policy::ImportRules;
use crate::rules::{ImportPolicy, RuleSpec};
use crate::test_support::{config_with_checks, file, site};
use camino::{Utf8Path, Utf8PathBuf};
use importguard_types::{Severity, ids};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A single plain path segment (never `.`/`..`, never a marker).
fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z0-9_-]{0,8}")
        .unwrap()
        .prop_filter("segment must not be the marker", |s| s != "webapp")
}

/// A segment that may be a dot directory (`.storybook`).
fn arb_maybe_dotted_segment() -> impl Strategy<Value = String> {
    (any::<bool>(), arb_segment()).prop_map(|(dot, seg)| if dot { format!(".{seg}") } else { seg })
}

fn arb_segments(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_segment(), 1..=max)
}

/// Directory of the importing file below the marker, plus a relative specifier that climbs at
/// most that many levels.
fn arb_relative_import() -> impl Strategy<Value = (Vec<String>, String)> {
    (arb_segments(4), arb_segments(3)).prop_flat_map(|(dirs, target)| {
        let max_up = dirs.len();
        (Just(dirs), Just(target), 0..=max_up).prop_map(|(dirs, target, up)| {
            let prefix = if up == 0 {
                "./".to_string()
            } else {
                "../".repeat(up)
            };
            (dirs, format!("{prefix}{}", target.join("/")))
        })
    })
}

fn importing_file(dirs: &[String]) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("/repo/webapp/{}/index.js", dirs.join("/")))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn strip_loader_chain_is_idempotent(s in "[a-z!./-]{0,24}") {
        let once = strip_loader_chain(&s);
        prop_assert_eq!(strip_loader_chain(once), once);
        prop_assert!(!once.contains('!'));
    }

    #[test]
    fn root_relative_paths_normalize_to_themselves(segments in arb_segments(5)) {
        let path = segments.join("/");
        let dir = Utf8Path::new("/repo/webapp/anywhere");
        prop_assert_eq!(normalize_import_path(&path, dir, &RootMarker::default()), path);
    }

    #[test]
    fn fix_round_trip_clears_relative_violation((dirs, specifier) in arb_relative_import()) {
        let abs = importing_file(&dirs);
        let marker = RootMarker::default();

        let payload = compute_fix(&specifier, &abs, &marker);
        prop_assert!(payload.is_some(), "no fix for {} in {}", specifier, abs);
        let literal = payload.map(|p| p.replacement_literal).unwrap_or_default();

        let rewritten: String = serde_json::from_str(&literal).unwrap();
        prop_assert!(!is_relative(&rewritten));

        // Re-normalizing the rewritten specifier is a no-op.
        let dir = abs.parent().unwrap();
        prop_assert_eq!(normalize_import_path(&rewritten, dir, &marker), rewritten.clone());
        prop_assert_eq!(normalize_import_path(&specifier, dir, &marker), rewritten.clone());

        // And the relative-path check has nothing left to say.
        let cfg = config_with_checks(
            &[(ids::CHECK_IMPORTS_NO_RELATIVE_PATHS, Severity::Error)],
            ImportRules::default(),
        );
        let rel = format!("webapp/{}/index.js", dirs.join("/"));
        let fixed = file(&rel, vec![site(CallSiteKind::Import, &rewritten, 1)]);
        let report = crate::evaluate(&crate::test_support::model(vec![fixed]), &cfg).unwrap();
        prop_assert!(report.findings.is_empty());
    }

    #[test]
    fn fixes_never_produce_relative_specifiers(
        dirs in prop::collection::vec(arb_segment(), 0..3),
        target in prop::collection::vec(arb_maybe_dotted_segment(), 1..4),
    ) {
        let abs = Utf8PathBuf::from(if dirs.is_empty() {
            "/repo/webapp/index.js".to_string()
        } else {
            format!("/repo/webapp/{}/index.js", dirs.join("/"))
        });
        let specifier = format!("./{}", target.join("/"));

        match compute_fix(&specifier, &abs, &RootMarker::default()) {
            Some(payload) => {
                let rewritten: String = serde_json::from_str(&payload.replacement_literal).unwrap();
                prop_assert!(!is_relative(&rewritten), "{} fixed to {}", specifier, rewritten);
                // A second pass has nothing to fix.
                prop_assert_eq!(compute_fix(&rewritten, &abs, &RootMarker::default()), None);
            }
            None => prop_assert!(dirs.is_empty() && target[0].starts_with('.')),
        }
    }

    #[test]
    fn blacklist_applies_regardless_of_aliases(
        pkg in "[a-z]{1,10}",
        aliases in prop::option::of(prop::collection::vec("[a-z]{1,6}", 0..3)),
    ) {
        let rules = ImportRules {
            aliases,
            whitelist: vec![RuleSpec::new(".*", ".*")],
            blacklist: vec![RuleSpec::new(".*", format!("^{pkg}$"))],
        };
        let policy = ImportPolicy::compile(&rules).unwrap();
        prop_assert!(!policy.evaluate(&pkg, "app/a/X.js", &pkg).allowed);
    }

    #[test]
    fn non_aliased_imports_always_pass_whitelist(
        pkg in "[a-z]{1,10}",
        white_to in "\\^[a-z]{1,6}/",
    ) {
        let rules = ImportRules {
            aliases: Some(vec!["app".to_string()]),
            whitelist: vec![RuleSpec::new(".*", white_to)],
            blacklist: Vec::new(),
        };
        let policy = ImportPolicy::compile(&rules).unwrap();
        prop_assert!(policy.evaluate(&pkg, "app/a/X.js", &pkg).allowed);
    }
}
