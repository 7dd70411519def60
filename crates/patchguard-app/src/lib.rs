//! Use case orchestration for patchguard.
//!
//! This crate provides the application layer: use cases that coordinate the
//! diff, platform, domain, and render layers. It is intentionally thin and
//! delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod analyse;
mod explain;
mod render;

pub use analyse::{AnalyseInput, AnalyseOutput, run_analyse, status_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{renderable, run_junit, run_markdown, serialize_report, write_text};
