//! The classification driver: one patch set in, one domain report out.
//!
//! Files are processed independently. A resolution failure on one file
//! lands it in the undiagnosable bucket and the run carries on.

use patchguard_diff::{PatchFile, apply_hunks};
use patchguard_platform::{ConfigGraph, FileStore, ModuleRegistry, OverrideKind};
use patchguard_types::{
    AutoApplied, Finding, Level, RunData, ThreeWayDiffHint, UndiagnosableFile, VendorPath, ids,
};

use crate::checks::{file_override, plugin, preference};
use crate::descriptor::DescriptorCache;
use crate::errors::{FileError, PluginDetectionError};
use crate::fingerprint::fingerprint_for_finding;
use crate::mapper;
use crate::report::DomainReport;

/// Per-run knobs. All default to off; the CLI layer fills them in.
#[derive(Clone, Debug)]
pub struct ClassifyOptions {
    /// When set, warn-level file overrides are rewritten in place using
    /// fuzzy application with this maximum fuzz, and every finding carries
    /// an auto-applied outcome.
    pub auto_apply_fuzz: Option<usize>,
    /// Emit three-way merge hints for file-override candidates.
    pub threeway: bool,
    /// Root holding pristine pre-upgrade vendor sources, for three-way hints.
    pub base_root: VendorPath,
    /// When non-empty, preference and plugin findings are kept only if the
    /// overriding class lives under one of these namespaces.
    pub vendor_namespaces: Vec<String>,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        ClassifyOptions {
            auto_apply_fuzz: None,
            threeway: false,
            base_root: VendorPath::new("vendor_orig"),
            vendor_namespaces: Vec::new(),
        }
    }
}

pub struct Classifier<'a> {
    registry: &'a dyn ModuleRegistry,
    graph: &'a dyn ConfigGraph,
    store: &'a dyn FileStore,
    options: ClassifyOptions,
    cache: DescriptorCache,
}

struct FileOutcome {
    findings: Vec<Finding>,
    threeway: Vec<ThreeWayDiffHint>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        registry: &'a dyn ModuleRegistry,
        graph: &'a dyn ConfigGraph,
        store: &'a dyn FileStore,
        options: ClassifyOptions,
    ) -> Self {
        Classifier {
            registry,
            graph,
            store,
            options,
            cache: DescriptorCache::default(),
        }
    }

    /// Classify every patch and aggregate the results. Encounter order of
    /// the input is preserved in findings and in the undiagnosable bucket.
    pub fn run(&mut self, patches: &[PatchFile]) -> DomainReport {
        let mut report = DomainReport::default();
        report.data = RunData {
            files_total: patches.len() as u32,
            ..RunData::default()
        };

        for patch in patches {
            match self.classify_file(patch) {
                Ok(Some(outcome)) => {
                    report.data.files_analysed += 1;
                    report.findings.extend(outcome.findings);
                    report.threeway.extend(outcome.threeway);
                }
                Ok(None) => report.data.files_skipped += 1,
                Err(err) => report.undiagnosable.push(UndiagnosableFile {
                    vendor_file: patch.path.clone(),
                    kind: err.kind(),
                    message: err.to_string(),
                    patch: patch.to_string(),
                }),
            }
        }
        report
    }

    /// `Ok(None)` means the file cannot be attributed to any module and is
    /// skipped rather than reported.
    fn classify_file(&mut self, patch: &PatchFile) -> Result<Option<FileOutcome>, FileError> {
        let Some(mapped) = mapper::map_vendor_path(self.registry, &patch.path) else {
            return Ok(None);
        };

        let mut outcome = FileOutcome {
            findings: Vec::new(),
            threeway: Vec::new(),
        };

        if let Some(class) = &mapped.class {
            let descriptor = self.cache.get_or_build(self.graph, class)?.clone();

            for chain in &descriptor.alias_chains {
                let detail = chain.join(" -> ");
                outcome
                    .findings
                    .push(self.finding(Level::Info, ids::CHECK_ALIAS, &patch.path, detail));
            }

            // Vendor content backs both constructor attribution for the
            // preference check and method attribution for plugins.
            let needs_vendor =
                descriptor.preference.is_some() || !descriptor.plugins.is_empty();
            let vendor_content = if needs_vendor {
                self.read(&patch.path)?
            } else {
                None
            };

            if let Some(found) =
                preference::classify(patch, vendor_content.as_deref(), &descriptor)
                && self.namespace_allowed(&found.preference)
            {
                outcome.findings.push(self.finding(
                    found.level,
                    ids::CHECK_PREFERENCE,
                    &patch.path,
                    found.preference,
                ));
            }

            if !descriptor.plugins.is_empty() {
                let content = vendor_content.as_deref().ok_or_else(|| {
                    PluginDetectionError::Query {
                        file: patch.path.clone(),
                        message: "vendor file unavailable for plugin analysis".to_string(),
                    }
                })?;
                for found in plugin::run(patch, &descriptor, content)? {
                    if self.namespace_allowed(&found.plugin_class) {
                        outcome.findings.push(self.finding(
                            found.level,
                            ids::CHECK_PLUGIN,
                            &patch.path,
                            found.detail,
                        ));
                    }
                }
            }
        }

        for candidate in &mapped.candidates {
            if candidate.kind != OverrideKind::FileOverride {
                continue;
            }
            let Some(local) = self.read(&candidate.path)? else {
                continue;
            };
            let level = file_override::classify(&patch.hunks, &local);
            let auto = self.auto_apply(patch, &candidate.path, &local, level)?;
            let mut finding = self.finding(
                level,
                ids::CHECK_FILE_OVERRIDE,
                &patch.path,
                candidate.path.as_str().to_string(),
            );
            finding.auto_applied = auto;
            outcome.findings.push(finding);

            if self.options.threeway {
                outcome.threeway.push(ThreeWayDiffHint {
                    vendor_file: patch.path.clone(),
                    local_file: candidate.path.clone(),
                    base_file: self.base_path(&patch.path),
                });
            }
        }

        // Every other finding still reports an explicit outcome when the
        // run is in auto-apply mode.
        if self.options.auto_apply_fuzz.is_some() {
            for finding in &mut outcome.findings {
                if finding.auto_applied.is_none() {
                    finding.auto_applied = Some(AutoApplied::NotApplicable);
                }
            }
        }

        Ok(Some(outcome))
    }

    fn auto_apply(
        &self,
        patch: &PatchFile,
        local_path: &VendorPath,
        local: &str,
        level: Level,
    ) -> Result<Option<AutoApplied>, FileError> {
        let Some(fuzz) = self.options.auto_apply_fuzz else {
            return Ok(None);
        };
        if level != Level::Warn {
            return Ok(Some(AutoApplied::NotApplicable));
        }
        match apply_hunks(local, &patch.hunks, fuzz) {
            Some(patched) => {
                self.store
                    .write(local_path, &patched)
                    .map_err(|err| PluginDetectionError::Query {
                        file: local_path.clone(),
                        message: err.to_string(),
                    })?;
                Ok(Some(AutoApplied::Applied))
            }
            None => Ok(Some(AutoApplied::NotApplied)),
        }
    }

    fn read(&self, path: &VendorPath) -> Result<Option<String>, FileError> {
        self.store.read(path).map_err(|err| {
            FileError::from(PluginDetectionError::Query {
                file: path.clone(),
                message: err.to_string(),
            })
        })
    }

    fn namespace_allowed(&self, class: &str) -> bool {
        let namespaces = &self.options.vendor_namespaces;
        namespaces.is_empty()
            || namespaces
                .iter()
                .any(|ns| class == ns || class.starts_with(&format!("{ns}\\")))
    }

    fn finding(
        &self,
        level: Level,
        check_type: &str,
        vendor_file: &VendorPath,
        detail: String,
    ) -> Finding {
        let fingerprint = fingerprint_for_finding(check_type, vendor_file.as_str(), &detail);
        Finding {
            level,
            check_type: check_type.to_string(),
            vendor_file: vendor_file.clone(),
            detail,
            auto_applied: None,
            fingerprint: Some(fingerprint),
        }
    }

    fn base_path(&self, vendor_file: &VendorPath) -> VendorPath {
        let vendor_root = VendorPath::new("vendor");
        match vendor_file.strip_prefix(&vendor_root) {
            Some(rest) => self.options.base_root.join(rest),
            None => self.options.base_root.join(vendor_file.as_str()),
        }
    }
}
