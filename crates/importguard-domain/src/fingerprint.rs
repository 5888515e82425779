use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a call-site finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - file path (repo-relative)
/// - line
/// - raw specifier
pub fn fingerprint_for_call_site(
    check_id: &str,
    code: &str,
    file_path: &str,
    line: u32,
    specifier: &str,
) -> String {
    let line = line.to_string();
    let canonical = [check_id, code, file_path, line.as_str(), specifier].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_field_sensitive() {
        let a = fingerprint_for_call_site("c", "x", "a.js", 3, "./b");
        assert_eq!(a, fingerprint_for_call_site("c", "x", "a.js", 3, "./b"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, fingerprint_for_call_site("c", "x", "a.js", 4, "./b"));
        assert_ne!(a, fingerprint_for_call_site("c", "x", "a.js", 3, "./c"));
    }
}
