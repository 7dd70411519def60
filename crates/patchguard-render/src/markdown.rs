use crate::RenderableReport;

/// Render the findings table plus summary, GitLab-flavored.
pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Patchguard report\n\n");

    for warning in &report.boot_warnings {
        out.push_str(&format!("> warning: {warning}\n"));
    }
    if !report.boot_warnings.is_empty() {
        out.push('\n');
    }

    let counts = report.counts();
    let any_visible = report.visible_findings().next().is_some();
    if any_visible {
        if report.auto_apply {
            out.push_str("| Level | Type | File | To Check | Auto applied |\n");
            out.push_str("|-------|------|------|----------|--------------|\n");
        } else {
            out.push_str("| Level | Type | File | To Check |\n");
            out.push_str("|-------|------|------|----------|\n");
        }
        for f in report.visible_findings() {
            let level = f.level.as_str();
            let file = f.vendor_file.as_str();
            if report.auto_apply {
                let auto = f.auto_applied.map(|a| a.as_str()).unwrap_or("N/A");
                out.push_str(&format!(
                    "| {level} | {} | {file} | {} | {auto} |\n",
                    f.check_type, f.detail
                ));
            } else {
                out.push_str(&format!(
                    "| {level} | {} | {file} | {} |\n",
                    f.check_type, f.detail
                ));
            }
        }
        out.push('\n');
    } else if report.findings.is_empty() && report.undiagnosable.is_empty() {
        out.push_str("No findings.\n\n");
    }

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- {} WARN\n", counts.warn));
    if report.show_info {
        out.push_str(&format!("- {} INFO\n", counts.info));
    } else {
        out.push_str(&format!(
            "- {} INFO (hidden, re-run with --show-info)\n",
            counts.info
        ));
    }
    if report.show_ignore {
        out.push_str(&format!("- {} IGNORE\n", counts.ignore));
    } else {
        out.push_str(&format!(
            "- {} IGNORE (hidden, re-run with --show-ignore)\n",
            counts.ignore
        ));
    }
    out.push_str(&format!(
        "- Files: {} total, {} analysed, {} skipped\n",
        report.data.files_total, report.data.files_analysed, report.data.files_skipped
    ));

    if !report.undiagnosable.is_empty() {
        out.push_str("\n## Undiagnosable files\n\n");
        for failed in &report.undiagnosable {
            out.push_str(&format!(
                "- `{}` ({}): {}\n",
                failed.vendor_file.as_str(),
                failed.kind.as_str(),
                failed.message
            ));
        }
    }

    if !report.threeway.is_empty() {
        out.push_str("\n## Three-way diff commands\n\n");
        for hint in &report.threeway {
            out.push_str(&format!(
                "    diff3 {} {} {}\n",
                hint.local_file.as_str(),
                hint.vendor_file.as_str(),
                hint.base_file.as_str()
            ));
        }
    }

    if let Some(url) = &report.docs_url {
        out.push_str(&format!("\nSee {url} for guidance on each level.\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchguard_types::{
        AutoApplied, Finding, Level, RunData, ThreeWayDiffHint, UndiagnosableFile,
        UndiagnosableKind, VendorPath, ids,
    };

    fn finding(level: Level, check_type: &str, detail: &str) -> Finding {
        Finding {
            level,
            check_type: check_type.to_string(),
            vendor_file: VendorPath::new("vendor/acme/module-checkout/Model/Cart.php"),
            detail: detail.to_string(),
            auto_applied: None,
            fingerprint: None,
        }
    }

    fn base_report(findings: Vec<Finding>) -> RenderableReport {
        RenderableReport {
            findings,
            undiagnosable: Vec::new(),
            threeway: Vec::new(),
            boot_warnings: Vec::new(),
            data: RunData {
                files_total: 2,
                files_analysed: 2,
                files_skipped: 0,
            },
            show_info: false,
            show_ignore: false,
            auto_apply: false,
            docs_url: None,
        }
    }

    #[test]
    fn empty_report_says_no_findings() {
        let md = render_markdown(&base_report(Vec::new()));
        assert!(md.contains("No findings."));
        assert!(md.contains("- 0 WARN"));
    }

    #[test]
    fn warn_rows_render_and_hidden_levels_hint() {
        let report = base_report(vec![
            finding(Level::Warn, ids::CHECK_FILE_OVERRIDE, "app/code/Cart.php"),
            finding(Level::Info, ids::CHECK_PREFERENCE, "App\\Cart"),
        ]);
        let md = render_markdown(&report);
        assert!(md.contains("| Level | Type | File | To Check |"));
        assert!(md.contains("| WARN | override.file |"));
        assert!(!md.contains("| INFO |"));
        assert!(md.contains("1 INFO (hidden, re-run with --show-info)"));
        assert!(md.contains("0 IGNORE (hidden, re-run with --show-ignore)"));
    }

    #[test]
    fn show_info_reveals_info_rows() {
        let mut report = base_report(vec![finding(
            Level::Info,
            ids::CHECK_PREFERENCE,
            "App\\Cart",
        )]);
        report.show_info = true;
        let md = render_markdown(&report);
        assert!(md.contains("| INFO | override.preference |"));
        assert!(md.contains("- 1 INFO\n"));
    }

    #[test]
    fn auto_apply_adds_the_outcome_column() {
        let mut report = base_report(vec![{
            let mut f = finding(Level::Warn, ids::CHECK_FILE_OVERRIDE, "app/code/Cart.php");
            f.auto_applied = Some(AutoApplied::Applied);
            f
        }]);
        report.auto_apply = true;
        let md = render_markdown(&report);
        assert!(md.contains("| Auto applied |"));
        assert!(md.contains("| Yes |"));
    }

    #[test]
    fn undiagnosable_and_threeway_sections_render() {
        let mut report = base_report(Vec::new());
        report.undiagnosable = vec![UndiagnosableFile {
            vendor_file: VendorPath::new("vendor/acme/module-checkout/Model/Quote.php"),
            kind: UndiagnosableKind::VirtualType,
            message: "alias chain cartVirtual ends in an undeclared class".to_string(),
            patch: String::new(),
        }];
        report.threeway = vec![ThreeWayDiffHint {
            vendor_file: VendorPath::new("vendor/acme/module-checkout/view/cart.phtml"),
            local_file: VendorPath::new("app/design/cart.phtml"),
            base_file: VendorPath::new("vendor_orig/acme/module-checkout/view/cart.phtml"),
        }];
        report.docs_url = Some("https://example.com/docs".to_string());
        let md = render_markdown(&report);
        assert!(md.contains("## Undiagnosable files"));
        assert!(md.contains("virtual_type"));
        assert!(md.contains("diff3 app/design/cart.phtml"));
        assert!(md.contains("See https://example.com/docs"));
    }
}
