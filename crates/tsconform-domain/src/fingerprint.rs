use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a conformance diagnostic.
///
/// Identity fields: rule name, project-relative path, line, column, message.
pub fn fingerprint_for_finding(rule: &str, path: &str, line: u32, col: u32, message: &str) -> String {
    let line = line.to_string();
    let col = col.to_string();
    let canonical = [rule, path, line.as_str(), col.as_str(), message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
