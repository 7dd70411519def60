//! Platform collaborators for patchguard.
//!
//! The target platform's bootstrap (module registry, dependency-injection
//! configuration) is modeled as injected interfaces rather than ambient
//! global state, so the core can be tested with fakes. Production runs feed
//! the in-memory implementations from a TOML platform manifest.

#![forbid(unsafe_code)]

mod fs;
mod manifest;
mod memory;
mod model;
mod traits;

pub use fs::FsFileStore;
pub use manifest::{parse_manifest_toml, Platform};
pub use memory::{MemoryFileStore, MemoryGraph, MemoryRegistry};
pub use model::{AliasTarget, ModuleDescriptor, OverrideKind, PluginRef};
pub use traits::{ConfigGraph, FileStore, ModuleRegistry};
