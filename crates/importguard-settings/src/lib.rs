//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CheckConfig, ImportguardConfigV1, RuleConfig};
pub use resolve::{Overrides, ResolvedConfig, SourceFilter};

/// Parse `importguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ImportguardConfigV1> {
    let cfg: ImportguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profiles + overrides + per-check config).
pub fn resolve_config(
    cfg: ImportguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON schema of the config file, for editor tooling.
pub fn config_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(ImportguardConfigV1);
    Ok(serde_json::to_string_pretty(&schema)?)
}
