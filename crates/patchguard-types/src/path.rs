use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical vendor-relative path used in findings and reports.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - never empty (an empty input becomes `.`)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct VendorPath(String);

impl Default for VendorPath {
    fn default() -> Self {
        VendorPath::new(".")
    }
}

impl VendorPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    pub fn join(&self, segment: &str) -> VendorPath {
        let base = Utf8Path::new(self.as_str());
        VendorPath::new(base.join(segment).as_str())
    }

    /// File extension (without the dot), if any.
    pub fn extension(&self) -> Option<&str> {
        Utf8Path::new(self.as_str()).extension()
    }

    /// The remainder of this path after `prefix`, when `prefix` is a
    /// directory-boundary prefix of it.
    pub fn strip_prefix(&self, prefix: &VendorPath) -> Option<&str> {
        let rest = self.0.strip_prefix(prefix.as_str())?;
        rest.strip_prefix('/').or(if rest.is_empty() { Some("") } else { None })
    }
}

impl std::fmt::Display for VendorPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for VendorPath {
    fn from(value: &Utf8Path) -> Self {
        VendorPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for VendorPath {
    fn from(value: Utf8PathBuf) -> Self {
        VendorPath::new(value.as_str())
    }
}
