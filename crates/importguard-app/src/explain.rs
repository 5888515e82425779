//! The `explain` use case: look up check/code documentation.

use importguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        identifier: String,
        explanation: Explanation,
    },
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a check_id or code. Surrounding whitespace is ignored.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim();
    match explain::lookup_explanation(identifier) {
        Some(explanation) => ExplainOutput::Found {
            identifier: identifier.to_string(),
            explanation,
        },
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(identifier: &str, exp: &Explanation) -> String {
    let heading = format!("{identifier}: {}", exp.title);
    let mut out = String::new();

    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");

    section(&mut out, "How to fix");
    out.push_str(exp.remediation);
    out.push_str("\n\n");

    section(&mut out, "Before");
    code_block(&mut out, exp.examples.before);
    out.push('\n');
    section(&mut out, "After");
    code_block(&mut out, exp.examples.after);

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');
}

fn code_block(out: &mut String, code: &str) {
    out.push_str("```js\n");
    out.push_str(code.trim_end());
    out.push_str("\n```\n");
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, check_ids: &[&str], codes: &[&str]) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n\n");

    out.push_str("Checks:\n");
    for id in check_ids {
        out.push_str(&format!("  {id}\n"));
    }
    out.push_str("\nCodes:\n");
    for code in codes {
        out.push_str(&format!("  {code}\n"));
    }

    out
}
