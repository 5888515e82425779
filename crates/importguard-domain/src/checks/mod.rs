use crate::model::SourceModel;
use crate::policy::EffectiveConfig;
use crate::rules::{ImportPolicy, PolicyError};
use importguard_types::{Finding, ids};

mod no_relative_paths;
mod only_safe_imports;
mod utils;


/// Run every enabled check over every file.
///
/// The import policy is compiled per file, so a bad pattern aborts before any finding for that
/// file is produced.
pub fn run_all(
    model: &SourceModel,
    cfg: &EffectiveConfig,
    out: &mut Vec<Finding>,
) -> Result<(), PolicyError> {
    let policy_enabled = cfg
        .check_policy(ids::CHECK_IMPORTS_ONLY_SAFE_IMPORTS)
        .is_some();

    for file in &model.files {
        no_relative_paths::run(file, cfg, out);

        if policy_enabled {
            let policy = ImportPolicy::compile(&cfg.import_rules)?;
            only_safe_imports::run(file, &policy, cfg, out);
        }
    }
    Ok(())
}
