//! Rendering for CI surfaces: GitLab-flavored Markdown tables and JUnit XML.

#![forbid(unsafe_code)]

mod junit;
mod markdown;
mod model;

pub use junit::render_junit_xml;
pub use markdown::render_markdown;
pub use model::RenderableReport;
