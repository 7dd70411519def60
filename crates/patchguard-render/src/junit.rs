use crate::RenderableReport;
use patchguard_types::{Finding, Level};
use std::collections::BTreeMap;

/// Render the full finding set as JUnit XML, one testsuite per check type.
///
/// WARN maps to `<failure>`, IGNORE to `<skipped>`, INFO to a passing case
/// with the detail in `<system-out>`. Undiagnosable files form their own
/// suite of `<error>` cases so CI surfaces them as hard problems.
pub fn render_junit_xml(report: &RenderableReport) -> String {
    let mut suites: BTreeMap<&str, Vec<&Finding>> = BTreeMap::new();
    for f in &report.findings {
        suites.entry(f.check_type.as_str()).or_default().push(f);
    }

    let failures: usize = report
        .findings
        .iter()
        .filter(|f| f.level == Level::Warn)
        .count();
    let skipped: usize = report
        .findings
        .iter()
        .filter(|f| f.level == Level::Ignore)
        .count();
    let errors = report.undiagnosable.len();
    let tests = report.findings.len() + errors;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<testsuites name=\"patchguard\" tests=\"{tests}\" failures=\"{failures}\" errors=\"{errors}\" skipped=\"{skipped}\">\n"
    ));

    for (check_type, findings) in &suites {
        let suite_failures = findings.iter().filter(|f| f.level == Level::Warn).count();
        let suite_skipped = findings.iter().filter(|f| f.level == Level::Ignore).count();
        out.push_str(&format!(
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{suite_failures}\" errors=\"0\" skipped=\"{suite_skipped}\">\n",
            escape(check_type),
            findings.len()
        ));
        for f in findings {
            out.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"{}\">\n",
                escape(f.vendor_file.as_str()),
                escape(check_type)
            ));
            match f.level {
                Level::Warn => out.push_str(&format!(
                    "      <failure message=\"{}\"/>\n",
                    escape(&f.detail)
                )),
                Level::Ignore => out.push_str(&format!(
                    "      <skipped message=\"{}\"/>\n",
                    escape(&f.detail)
                )),
                Level::Info => out.push_str(&format!(
                    "      <system-out>{}</system-out>\n",
                    escape(&f.detail)
                )),
            }
            out.push_str("    </testcase>\n");
        }
        out.push_str("  </testsuite>\n");
    }

    if !report.undiagnosable.is_empty() {
        out.push_str(&format!(
            "  <testsuite name=\"undiagnosable\" tests=\"{errors}\" failures=\"0\" errors=\"{errors}\" skipped=\"0\">\n"
        ));
        for failed in &report.undiagnosable {
            out.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"undiagnosable\">\n",
                escape(failed.vendor_file.as_str())
            ));
            out.push_str(&format!(
                "      <error type=\"{}\" message=\"{}\"/>\n",
                escape(failed.kind.as_str()),
                escape(&failed.message)
            ));
            out.push_str("    </testcase>\n");
        }
        out.push_str("  </testsuite>\n");
    }

    out.push_str("</testsuites>\n");
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchguard_types::{RunData, UndiagnosableFile, UndiagnosableKind, VendorPath, ids};

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

    fn report(findings: Vec<Finding>, undiagnosable: Vec<UndiagnosableFile>) -> RenderableReport {
        RenderableReport {
            findings,
            undiagnosable,
            threeway: Vec::new(),
            boot_warnings: Vec::new(),
            data: RunData::default(),
            show_info: false,
            show_ignore: false,
            auto_apply: false,
            docs_url: None,
        }
    }

    #[test]
    fn levels_map_to_junit_elements() {
        let xml = render_junit_xml(&report(
            vec![
                finding(Level::Warn, ids::CHECK_FILE_OVERRIDE, "app/code/Cart.php"),
                finding(Level::Info, ids::CHECK_PREFERENCE, "App\\Cart"),
                finding(Level::Ignore, ids::CHECK_PLUGIN, "plugin untouched"),
            ],
            Vec::new(),
        ));
        assert!(xml.contains("tests=\"3\" failures=\"1\" errors=\"0\" skipped=\"1\""));
        assert!(xml.contains("<testsuite name=\"override.file\""));
        assert!(xml.contains("<failure message=\"app/code/Cart.php\"/>"));
        assert!(xml.contains("<system-out>App\\Cart</system-out>"));
        assert!(xml.contains("<skipped message=\"plugin untouched\"/>"));
    }

    #[test]
    fn undiagnosable_files_become_errors() {
        let xml = render_junit_xml(&report(
            Vec::new(),
            vec![UndiagnosableFile {
                vendor_file: VendorPath::new("vendor/acme/module-checkout/Model/Quote.php"),
                kind: UndiagnosableKind::PluginDetection,
                message: "cannot determine enclosing method".to_string(),
                patch: String::new(),
            }],
        ));
        assert!(xml.contains("tests=\"1\" failures=\"0\" errors=\"1\" skipped=\"0\""));
        assert!(xml.contains("<testsuite name=\"undiagnosable\""));
        assert!(xml.contains("type=\"plugin_detection\""));
    }

    #[test]
    fn xml_entities_are_escaped() {
        let xml = render_junit_xml(&report(
            vec![finding(
                Level::Warn,
                ids::CHECK_PLUGIN,
                "plugin \"seo\" intercepts <getTotal> & more",
            )],
            Vec::new(),
        ));
        assert!(xml.contains("plugin &quot;seo&quot; intercepts &lt;getTotal&gt; &amp; more"));
    }
}
