//! The three override-mechanism checks.
//!
//! Each module exposes a pure classification entry point; reading files,
//! caching descriptors, and assembling findings is the classifier's job.

pub mod file_override;
pub mod plugin;
pub mod preference;
