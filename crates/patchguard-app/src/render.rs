//! Render use cases: markdown / JUnit from in-memory reports, plus report
//! serialization and output-file helpers.

use anyhow::Context;
use camino::Utf8Path;
use patchguard_render::RenderableReport;
use patchguard_settings::EffectiveConfig;
use patchguard_types::ReportEnvelope;

/// Build the renderable view of a report with the presentation knobs from
/// the effective config applied.
pub fn renderable(report: &ReportEnvelope, effective: &EffectiveConfig) -> RenderableReport {
    RenderableReport {
        findings: report.findings.clone(),
        undiagnosable: report.undiagnosable.clone(),
        threeway: report.threeway.clone(),
        boot_warnings: report.boot_warnings.clone(),
        data: report.data,
        show_info: effective.show_info,
        show_ignore: effective.show_ignore,
        auto_apply: effective.auto_apply_fuzz.is_some(),
        docs_url: effective.docs_url.clone(),
    }
}

pub fn run_markdown(report: &RenderableReport) -> String {
    patchguard_render::render_markdown(report)
}

pub fn run_junit(report: &RenderableReport) -> String {
    patchguard_render::render_junit_xml(report)
}

pub fn serialize_report(report: &ReportEnvelope) -> anyhow::Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

/// Write a text artifact, creating parent directories as needed.
pub fn write_text(path: &Utf8Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {parent}"))?;
    }
    std::fs::write(path, content).with_context(|| format!("write {path}"))
}
