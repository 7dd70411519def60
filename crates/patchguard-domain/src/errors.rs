use patchguard_types::{UndiagnosableKind, VendorPath};

/// An alias ("virtual type") chain could not be resolved to a concrete
/// class. Reported upward, not silently ignored: it means the detector's
/// model of the configuration graph is incomplete for this file, and no
/// findings for it can be trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VirtualTypeError {
    #[error("alias chain {} ends in an undeclared class", chain.join(" -> "))]
    Dangling { chain: Vec<String> },

    #[error("alias chain {} loops back on itself", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

/// The method-to-plugin mapping is ambiguous, or a collaborator query needed
/// for it could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginDetectionError {
    #[error("cannot determine enclosing method for hunk at line {line} of {file}")]
    AmbiguousMethod { file: VendorPath, line: u32 },

    #[error("plugin analysis query failed for {file}: {message}")]
    Query { file: VendorPath, message: String },
}

/// Per-file failure, recovered by the classifier into the undiagnosable
/// bucket (or escalated by the caller in strict mode).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error(transparent)]
    VirtualType(#[from] VirtualTypeError),

    #[error(transparent)]
    PluginDetection(#[from] PluginDetectionError),
}

impl FileError {
    pub fn kind(&self) -> UndiagnosableKind {
        match self {
            FileError::VirtualType(_) => UndiagnosableKind::VirtualType,
            FileError::PluginDetection(_) => UndiagnosableKind::PluginDetection,
        }
    }
}
