//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after code examples.
    pub examples: ExamplePair,
}

/// Before and after code examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Code that would trigger a finding.
    pub before: &'static str,
    /// Code that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_IMPORTS_NO_RELATIVE_PATHS => Some(explain_no_relative_paths()),
        ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS => Some(explain_only_safe_imports()),

        // Codes
        ids::CODE_RELATIVE_PATH => Some(explain_relative_path()),
        ids::CODE_IMPORT_DISALLOWED => Some(explain_import_disallowed()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_IMPORTS_NO_RELATIVE_PATHS,
        ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_RELATIVE_PATH, ids::CODE_IMPORT_DISALLOWED]
}

// --- Check-level explanations ---

fn explain_no_relative_paths() -> Explanation {
    Explanation {
        title: "No Relative Import Paths",
        description: "\
Detects import declarations, `require()` calls and `jest.mock()`/`jest.unmock()` calls whose
module specifier starts with `.` (for example `./Button` or `../../util/format`).

Relative specifiers break whenever a file moves: every import inside the moved file and every
import pointing at it must be rewritten. Paths that resolve from the project root marker stay
valid no matter where the importing file lives.

Bundler loader chains such as `raw-loader!./template.html` are checked on their last segment,
but they are never rewritten automatically.",
        remediation: "\
Rewrite the specifier so that it resolves from the project root marker:

    import Button from 'components/Button';

`importguard fix` applies this rewrite for every relative specifier it can resolve. Specifiers
that resolve outside the root marker, and loader chains, must be edited by hand.",
        examples: ExamplePair {
            before: r#"// webapp/feature/a/Widget.js
import Helper from '../b/Helper';
const styles = require('./Widget.css');"#,
            after: r#"// webapp/feature/a/Widget.js
import Helper from "feature/b/Helper";
const styles = require("feature/a/Widget.css");"#,
        },
    }
}

fn explain_only_safe_imports() -> Explanation {
    Explanation {
        title: "Only Safe Imports",
        description: "\
Enforces layering rules between modules. Every import is evaluated against two rule lists of
`{ from, to }` regular-expression pairs:

- `whitelisted-imports`: at least one rule must match the importing file (`from`) and the
  imported module (`to`).
- `blacklisted-imports`: no rule may match.

When `aliases` are configured, imports that do not start with an alias (for example `react`)
are treated as external packages and skip the whitelist. The blacklist always applies, so it
can forbid specific packages too.",
        remediation: "\
Import the module through a layer that the rules allow, or extend the rules in
importguard.toml when the dependency is intentional:

    whitelisted-imports = [{ from = \"^app/feature/\", to = \"^app/shared/\" }]",
        examples: ExamplePair {
            before: r#"// webapp/app/shared/format.js
import Widget from 'app/feature/Widget';  // shared must not depend on features
import _ from 'lodash';                    // blacklisted package"#,
            after: r#"// webapp/app/shared/format.js
import { pad } from 'app/shared/strings';"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_relative_path() -> Explanation {
    let mut exp = explain_no_relative_paths();
    exp.title = "Relative Path";
    exp
}

fn explain_import_disallowed() -> Explanation {
    let mut exp = explain_only_safe_imports();
    exp.title = "Import Disallowed";
    exp
}
