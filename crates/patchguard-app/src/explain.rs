//! The `explain` use case: look up check-type documentation.

use patchguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes the known check types.
    NotFound {
        identifier: String,
        available: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: explain::all_check_types(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();
    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Review guidance\n");
    out.push_str("---------------\n");
    out.push_str(exp.review_guidance);
    out.push('\n');
    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&format!("unknown check type: {identifier}\n\n"));
    out.push_str("Known check types:\n");
    for id in available {
        out.push_str(&format!("  {id}\n"));
    }
    out
}
