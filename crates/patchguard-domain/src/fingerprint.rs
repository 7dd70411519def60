use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_type
/// - vendor file (canonical vendor-relative path)
/// - detail
pub fn fingerprint_for_finding(check_type: &str, vendor_file: &str, detail: &str) -> String {
    let canonical = [check_type, vendor_file, detail].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
