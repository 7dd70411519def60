//! The `analyse` use case: classify a vendor diff and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use patchguard_diff::PatchFile;
use patchguard_domain::{Classifier, ClassifyOptions};
use patchguard_platform::{FsFileStore, ModuleRegistry, parse_manifest_toml};
use patchguard_settings::{EffectiveConfig, Overrides};
use patchguard_types::{Level, ReportEnvelope, RunStatus, SCHEMA_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

/// Input for the analyse use case.
#[derive(Clone, Debug)]
pub struct AnalyseInput<'a> {
    /// Project root; local override paths and auto-apply writes resolve
    /// against it.
    pub project_root: &'a Utf8Path,
    /// Unified diff of the vendor upgrade.
    pub patch_text: &'a str,
    /// Platform manifest contents.
    pub manifest_text: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the analyse use case.
#[derive(Clone, Debug)]
pub struct AnalyseOutput {
    pub report: ReportEnvelope,
    pub effective: EffectiveConfig,
    /// Re-serialized patches for files with at least one WARN finding,
    /// suitable for `vendor_files_to_check.patch`.
    pub to_check_patch: String,
    /// Patches of files that could not be analysed, suitable for
    /// `vendor_files_error.patch`.
    pub error_patch: String,
}

/// Run the analyse use case: parse config + manifest + diff, classify, and
/// assemble the report envelope.
pub fn run_analyse(input: AnalyseInput<'_>) -> anyhow::Result<AnalyseOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = if input.config_text.trim().is_empty() {
        patchguard_settings::PatchguardConfigV1::default()
    } else {
        patchguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let effective = patchguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let platform = parse_manifest_toml(input.manifest_text).context("parse platform manifest")?;

    let mut patches = patchguard_diff::parse(input.patch_text).context("parse vendor diff")?;
    if patches.is_empty() && !input.patch_text.trim().is_empty() {
        anyhow::bail!("vendor diff contains no recognizable file headers");
    }
    if let Some(filter) = &effective.filter {
        patches.retain(|p| p.path.as_str().contains(filter.as_str()));
    }

    let store = FsFileStore::new(input.project_root.to_path_buf());
    let options = ClassifyOptions {
        auto_apply_fuzz: effective.auto_apply_fuzz,
        threeway: effective.threeway,
        base_root: effective.base_root.clone(),
        vendor_namespaces: effective.vendor_namespaces.clone(),
    };
    let mut classifier = Classifier::new(&platform.registry, &platform.graph, &store, options);
    let mut domain_report = classifier.run(&patches);

    if effective.strict && !domain_report.undiagnosable.is_empty() {
        let first = &domain_report.undiagnosable[0];
        anyhow::bail!(
            "strict mode: {} of {} file(s) could not be analysed (first: {}: {})",
            domain_report.undiagnosable.len(),
            domain_report.data.files_total,
            first.vendor_file.as_str(),
            first.message
        );
    }

    sort_findings(&mut domain_report.findings, effective.sort_by_type);

    let to_check_patch = join_patches(patches.iter().filter(|p| {
        domain_report
            .findings
            .iter()
            .any(|f| f.level == Level::Warn && f.vendor_file == p.path)
    }));
    let error_patch = domain_report
        .undiagnosable
        .iter()
        .map(|failed| failed.patch.as_str())
        .collect::<String>();

    let status = domain_report.status();
    let counts = domain_report.counts();
    let finished_at = OffsetDateTime::now_utc();

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "patchguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        status,
        counts,
        findings: domain_report.findings,
        undiagnosable: domain_report.undiagnosable,
        boot_warnings: platform.registry.boot_warnings().to_vec(),
        threeway: domain_report.threeway,
        data: domain_report.data,
    };

    Ok(AnalyseOutput {
        report,
        effective,
        to_check_patch,
        error_patch,
    })
}

/// Default order is warnings first; `--sort-by-type` groups by check type
/// within each level. Both sorts are stable, so encounter order breaks ties.
fn sort_findings(findings: &mut [patchguard_types::Finding], by_type: bool) {
    if by_type {
        findings.sort_by(|a, b| {
            (a.level.rank(), &a.check_type, a.vendor_file.as_str(), &a.detail).cmp(&(
                b.level.rank(),
                &b.check_type,
                b.vendor_file.as_str(),
                &b.detail,
            ))
        });
    } else {
        findings.sort_by_key(|f| f.level.rank());
    }
}

fn join_patches<'a, I: Iterator<Item = &'a PatchFile>>(patches: I) -> String {
    patches.map(|p| p.to_string()).collect()
}

/// Map the run status to the process exit code contract:
/// 0 clean, 2 undiagnosable files present, 3 warnings present.
/// (1 is reserved for operational failures: unreadable inputs, unparseable
/// diff, strict-mode escalation.)
pub fn status_exit_code(status: RunStatus) -> i32 {
    match status {
        RunStatus::Clean => 0,
        RunStatus::Undiagnosable => 2,
        RunStatus::Findings => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[module]]
id = "Acme_Checkout"
namespace = "Acme\\Checkout"
vendor_root = "vendor/acme/module-checkout"

[module.override_roots]
file = "app/design/frontend/Acme_Checkout"
class = "app/code/Acme/Checkout"
"#;

    const PATCH: &str = "\
--- a/vendor/acme/module-checkout/view/cart.phtml
+++ b/vendor/acme/module-checkout/view/cart.phtml
@@ -1,2 +1,2 @@
 <div>
-old banner
+new banner
";

    fn utf8_root(tmp: &tempfile::TempDir) -> &Utf8Path {
        Utf8Path::from_path(tmp.path()).expect("utf8 path")
    }

    #[test]
    fn empty_diff_is_a_clean_run() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let output = run_analyse(AnalyseInput {
            project_root: utf8_root(&tmp),
            patch_text: "",
            manifest_text: MANIFEST,
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect("run_analyse");
        assert_eq!(output.report.status, RunStatus::Clean);
        assert_eq!(output.report.data.files_total, 0);
        assert_eq!(status_exit_code(output.report.status), 0);
    }

    #[test]
    fn garbage_diff_is_a_parse_failure() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let err = run_analyse(AnalyseInput {
            project_root: utf8_root(&tmp),
            patch_text: "this is not a diff\n",
            manifest_text: MANIFEST,
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect_err("should fail");
        assert!(err.to_string().contains("no recognizable file headers"));
    }

    #[test]
    fn drifted_override_warns_and_lands_in_to_check_patch() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = utf8_root(&tmp);
        let local_dir = root.join("app/design/frontend/Acme_Checkout/view");
        std::fs::create_dir_all(&local_dir).expect("create override dir");
        std::fs::write(
            local_dir.join("cart.phtml"),
            "<div class=\"custom\">\nold banner\n</div>\n",
        )
        .expect("write override");

        let output = run_analyse(AnalyseInput {
            project_root: root,
            patch_text: PATCH,
            manifest_text: MANIFEST,
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect("run_analyse");

        assert_eq!(output.report.status, RunStatus::Findings);
        assert_eq!(output.report.counts.warn, 1);
        assert!(
            output
                .to_check_patch
                .contains("vendor/acme/module-checkout/view/cart.phtml")
        );
        assert_eq!(status_exit_code(output.report.status), 3);
    }

    #[test]
    fn filter_skips_non_matching_files() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let output = run_analyse(AnalyseInput {
            project_root: utf8_root(&tmp),
            patch_text: PATCH,
            manifest_text: MANIFEST,
            config_text: "",
            overrides: Overrides {
                filter: Some("module-sales".to_string()),
                ..Overrides::default()
            },
        })
        .expect("run_analyse");
        assert_eq!(output.report.data.files_total, 0);
        assert_eq!(output.report.status, RunStatus::Clean);
    }

    #[test]
    fn strict_mode_escalates_undiagnosable_files() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = utf8_root(&tmp);
        let vendor_dir = root.join("vendor/acme/module-checkout/Model");
        std::fs::create_dir_all(&vendor_dir).expect("create vendor dir");
        std::fs::write(
            vendor_dir.join("Cart.php"),
            "<?php\nclass Cart\n{\n    public function getTotal()\n    {\n        return $this->total;\n    }\n}\n",
        )
        .expect("write vendor file");

        let manifest = format!(
            "{MANIFEST}\n[[preference]]\nfor = \"Acme\\\\Checkout\\\\Model\\\\Cart\"\ntype = \"cartVirtual\"\n\n[[alias]]\nname = \"cartVirtual\"\ntarget = \"missingTarget\"\n"
        );
        let patch = "\
--- a/vendor/acme/module-checkout/Model/Cart.php
+++ b/vendor/acme/module-checkout/Model/Cart.php
@@ -5,3 +5,3 @@
     {
-        return $this->total;
+        return $this->total + $this->fees;
     }
";

        let err = run_analyse(AnalyseInput {
            project_root: root,
            patch_text: patch,
            manifest_text: &manifest,
            config_text: "",
            overrides: Overrides {
                strict: true,
                ..Overrides::default()
            },
        })
        .expect_err("strict mode should fail");
        assert!(err.to_string().contains("strict mode"));
    }

    #[test]
    fn exit_codes_cover_all_statuses() {
        assert_eq!(status_exit_code(RunStatus::Clean), 0);
        assert_eq!(status_exit_code(RunStatus::Undiagnosable), 2);
        assert_eq!(status_exit_code(RunStatus::Findings), 3);
    }
}
