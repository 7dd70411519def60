//! CLI entry point for patchguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All business logic lives in the `patchguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use patchguard_app::{
    AnalyseInput, ExplainOutput, format_explanation, format_not_found, renderable, run_analyse,
    run_explain, run_junit, run_markdown, serialize_report, status_exit_code, write_text,
};
use patchguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "patchguard",
    version,
    about = "Vendor upgrade override audit for module-based platforms"
)]
struct Cli {
    /// Project root (directory containing vendor/ and the override roots).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Path to patchguard config TOML, relative to the project root.
    #[arg(long, default_value = "patchguard.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a vendor diff against local overrides and write artifacts.
    Analyse {
        /// Unified diff of the vendor upgrade (default from config, else
        /// vendor.patch).
        #[arg(long)]
        patch_file: Option<Utf8PathBuf>,

        /// Platform manifest with modules, preferences, plugins, and
        /// aliases (default from config, else platform.toml).
        #[arg(long)]
        platform_manifest: Option<Utf8PathBuf>,

        /// Only analyse vendor files whose path contains this substring.
        #[arg(long)]
        filter: Option<String>,

        /// Restrict preference/plugin findings to classes under these
        /// namespaces (comma separated).
        #[arg(long, value_delimiter = ',')]
        vendor_namespaces: Vec<String>,

        /// Show INFO level findings in the output table.
        #[arg(long)]
        show_info: bool,

        /// Show IGNORE level findings in the output table.
        #[arg(long)]
        show_ignore: bool,

        /// Sort findings by check type instead of warnings-first.
        #[arg(long)]
        sort_by_type: bool,

        /// Re-apply WARN file-override hunks in place, tolerating up to
        /// FUZZ lines of context drift.
        #[arg(long, value_name = "FUZZ")]
        auto_theme_update: Option<u32>,

        /// Print three-way diff hint commands for file overrides.
        #[arg(long)]
        threeway_diff: bool,

        /// Escalate per-file analysis failures to a fatal run error.
        #[arg(long)]
        strict: bool,

        /// Root holding pristine pre-upgrade vendor sources.
        #[arg(long)]
        base_root: Option<String>,

        /// Where to write the JSON report, relative to the project root.
        #[arg(long, default_value = "patchguard-report.json")]
        report_out: Utf8PathBuf,

        /// Write a JUnit XML report to this path.
        #[arg(long)]
        junit_xml: Option<Utf8PathBuf>,

        /// Write the Markdown report to this path as well as stdout.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Explain a check type with review guidance.
    Explain {
        /// The check type to explain (e.g. "override.file").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Analyse {
            ref patch_file,
            ref platform_manifest,
            ref filter,
            ref vendor_namespaces,
            show_info,
            show_ignore,
            sort_by_type,
            auto_theme_update,
            threeway_diff,
            strict,
            ref base_root,
            ref report_out,
            ref junit_xml,
            ref markdown_out,
        } => {
            let overrides = Overrides {
                patch_file: patch_file.as_ref().map(|p| p.to_string()),
                platform_manifest: platform_manifest.as_ref().map(|p| p.to_string()),
                filter: filter.clone(),
                vendor_namespaces: vendor_namespaces.clone(),
                show_info,
                show_ignore,
                sort_by_type,
                auto_apply_fuzz: auto_theme_update,
                threeway: threeway_diff,
                strict,
                base_root: base_root.clone(),
            };
            cmd_analyse(
                &cli,
                overrides,
                report_out.clone(),
                junit_xml.clone(),
                markdown_out.clone(),
            )
        }
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn cmd_analyse(
    cli: &Cli,
    overrides: Overrides,
    report_out: Utf8PathBuf,
    junit_xml: Option<Utf8PathBuf>,
    markdown_out: Option<Utf8PathBuf>,
) -> anyhow::Result<()> {
    let project_root = cli
        .project_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.project_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !project_root.exists() {
            anyhow::bail!("project root does not exist: {project_root}");
        }

        // Missing config file is allowed; defaults apply.
        let cfg_path = project_root.join(&cli.config);
        let cfg_text = std::fs::read_to_string(&cfg_path).unwrap_or_default();

        // Resolve once up front so we know which input files to read; the
        // use case resolves again from the same inputs.
        let cfg = if cfg_text.trim().is_empty() {
            patchguard_settings::PatchguardConfigV1::default()
        } else {
            patchguard_settings::parse_config_toml(&cfg_text).context("parse config")?
        };
        let effective = patchguard_settings::resolve_config(cfg, overrides.clone())
            .context("resolve config")?;

        let patch_path = project_root.join(&effective.patch_file);
        let patch_text = std::fs::read_to_string(&patch_path)
            .with_context(|| format!("read vendor diff {patch_path}"))?;

        let manifest_path = project_root.join(&effective.platform_manifest);
        let manifest_text = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("read platform manifest {manifest_path}"))?;

        eprintln!(
            "patchguard: analysing {patch_path} against overrides in {project_root}"
        );

        let output = run_analyse(AnalyseInput {
            project_root: &project_root,
            patch_text: &patch_text,
            manifest_text: &manifest_text,
            config_text: &cfg_text,
            overrides,
        })?;

        let json = serialize_report(&output.report)?;
        write_text(&resolve_out(&project_root, &report_out), &json)
            .context("write report json")?;

        if !output.to_check_patch.is_empty() {
            write_text(
                &project_root.join("vendor_files_to_check.patch"),
                &output.to_check_patch,
            )
            .context("write vendor_files_to_check.patch")?;
        }
        if !output.error_patch.is_empty() {
            write_text(
                &project_root.join("vendor_files_error.patch"),
                &output.error_patch,
            )
            .context("write vendor_files_error.patch")?;
        }

        let view = renderable(&output.report, &output.effective);
        let markdown = run_markdown(&view);
        print!("{markdown}");
        if let Some(path) = markdown_out {
            write_text(&resolve_out(&project_root, &path), &markdown)
                .context("write markdown")?;
        }
        if let Some(path) = junit_xml {
            let xml = run_junit(&view);
            write_text(&resolve_out(&project_root, &path), &xml).context("write junit xml")?;
        }

        eprintln!(
            "patchguard: {} analysed, {} skipped, {} warnings, {} undiagnosable",
            output.report.data.files_analysed,
            output.report.data.files_skipped,
            output.report.counts.warn,
            output.report.undiagnosable.len()
        );

        Ok(status_exit_code(output.report.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("patchguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn resolve_out(project_root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", format_not_found(&identifier, available));
            std::process::exit(1);
        }
    }
}
