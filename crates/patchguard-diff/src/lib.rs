//! Unified-diff parsing and fuzz-tolerant reapplication.
//!
//! Input: the raw text of a `vendor.patch` (as produced by `diff -urN`).
//! Output: ordered, validated per-file patches that the domain engine
//! classifies, plus a best-effort applier for file-level overrides.

#![forbid(unsafe_code)]

mod fuzz;
mod model;
mod parser;
#[cfg(test)]
mod proptest;

pub use fuzz::{apply_hunk, apply_hunks, match_hunk, HunkMatch};
pub use model::{Hunk, LineKind, LineOp, PatchFile};
pub use parser::{parse, ParseError};
