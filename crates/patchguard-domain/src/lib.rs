//! Override-conflict classification.
//!
//! Input: parsed vendor patches plus the platform collaborators (module
//! registry, configuration graph, file store).
//! Output: findings + undiagnosable bucket + run summary. Per-file failures
//! never abort the batch; they land in the undiagnosable bucket as data.

#![forbid(unsafe_code)]

pub mod alias;
pub mod checks;
pub mod descriptor;
pub mod errors;
pub mod mapper;
pub mod report;
pub mod scan;

mod classifier;
mod fingerprint;

pub use classifier::{Classifier, ClassifyOptions};
pub use errors::{FileError, PluginDetectionError, VirtualTypeError};
pub use fingerprint::fingerprint_for_finding;
pub use report::DomainReport;
