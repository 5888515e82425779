/// Whether `path` lives under one of the configured alias namespaces (`app/...`).
///
/// With no aliases configured nothing is aliased.
pub fn is_aliased_path(path: &str, aliases: Option<&[String]>) -> bool {
    aliases.unwrap_or_default().iter().any(|alias| {
        path.strip_prefix(alias.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    })
}
