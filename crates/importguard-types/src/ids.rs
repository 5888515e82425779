//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_IMPORTS_NO_RELATIVE_PATHS: &str = "imports.no_relative_paths";
pub const CHECK_IMPORTS_ONLY_SAFE_IMPORTS: &str = "imports.only_safe_imports";

// Codes: imports.no_relative_paths
pub const CODE_RELATIVE_PATH: &str = "relative_path";

// Codes: imports.only_safe_imports
pub const CODE_IMPORT_DISALLOWED: &str = "import_disallowed";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
