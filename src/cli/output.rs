//! Output formatting for scan, extract, convert and config results

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::PagecfgConfig;
use crate::convert::{BatchReport, PageStatus};
use crate::extract::ExtractionIssue;
use crate::synth::PageConfig;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Pages found by `pagecfg scan`
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutput {
    pub root: PathBuf,
    pub pages: Vec<PathBuf>,
}

/// Config extracted by `pagecfg extract`
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutput {
    pub path: PathBuf,
    pub config: PageConfig,
    pub issues: Vec<ExtractionIssue>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_scan(&self, scan: &ScanOutput) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(scan, "scan result"),
            OutputFormat::Yaml => to_yaml(scan, "scan result"),
            OutputFormat::Human => Ok(self.format_scan_human(scan)),
        }
    }

    pub fn format_extract(&self, extract: &ExtractOutput) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(extract, "extraction result"),
            OutputFormat::Yaml => to_yaml(extract, "extraction result"),
            OutputFormat::Human => self.format_extract_human(extract),
        }
    }

    pub fn format_batch(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "conversion report"),
            OutputFormat::Yaml => to_yaml(report, "conversion report"),
            OutputFormat::Human => Ok(self.format_batch_human(report)),
        }
    }

    pub fn format_config(&self, config: &PagecfgConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&config.to_display_map(), "config"),
            OutputFormat::Yaml => to_yaml(&config.to_display_map(), "config"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_scan_human(&self, scan: &ScanOutput) -> String {
        let mut output = String::new();

        output.push_str(&format!("Pages under {}\n", scan.root.display()));
        output.push_str(RULE);
        output.push_str("\n\n");

        for (i, page) in scan.pages.iter().enumerate() {
            let connector = if i + 1 == scan.pages.len() {
                "\u{2514}\u{2500}"
            } else {
                "\u{251C}\u{2500}"
            };
            output.push_str(&format!("{} {}\n", connector, relative(&scan.root, page)));
        }
        if !scan.pages.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!("{} page(s) found\n", scan.pages.len()));
        output
    }

    fn format_extract_human(&self, extract: &ExtractOutput) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Page Config: {}\n", extract.path.display()));
        output.push_str(RULE);
        output.push_str("\n\n");

        let sections = extract.config.sections();
        if sections.is_empty() {
            output.push_str("Sections: (none found, colors only)\n\n");
        } else {
            output.push_str("Sections:\n");
            for (i, entry) in sections.iter().enumerate() {
                let connector = if i + 1 == sections.len() {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251C}\u{2500}"
                };
                output.push_str(&format!("{} {:<16}{}\n", connector, entry.name.as_str(), describe(&entry.value)));
            }
            output.push('\n');
        }

        let json = serde_json::to_string_pretty(&extract.config)
            .context("Failed to serialize page config to JSON")?;
        output.push_str(&json);
        output.push('\n');

        if !extract.issues.is_empty() {
            output.push_str("\n\u{26A0} Skipped declarations:\n");
            for issue in &extract.issues {
                output.push_str(&format!(
                    "  - {} (line {}): {}\n",
                    issue.name, issue.line, issue.error
                ));
            }
        }

        Ok(output)
    }

    fn format_batch_human(&self, report: &BatchReport) -> String {
        let mut output = String::new();
        let summary = &report.summary;

        if report.has_failures() {
            output.push_str("\u{26A0} Conversion Report (with failures)\n");
        } else {
            output.push_str("\u{2713} Conversion Report\n");
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Root:       {}\n", report.root.display()));
        if report.dry_run {
            output.push_str("Mode:       dry run (no files written)\n");
        }
        output.push('\n');

        if !report.pages.is_empty() {
            output.push_str("Pages:\n");
            for (i, page) in report.pages.iter().enumerate() {
                let connector = if i + 1 == report.pages.len() {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251C}\u{2500}"
                };
                let detail = match page.status {
                    PageStatus::Converted => format!("converted  [{}]", page.keys.join(", ")),
                    PageStatus::Skipped { reason } => format!("skipped    ({})", reason),
                };
                output.push_str(&format!(
                    "{} {}  {}\n",
                    connector,
                    relative(&report.root, &page.path),
                    detail
                ));
            }
            output.push('\n');
        }

        if !report.failures.is_empty() {
            output.push_str("\u{26A0} Failed:\n");
            for failure in &report.failures {
                output.push_str(&format!(
                    "  - {}: {}\n",
                    relative(&report.root, &failure.path),
                    failure.error
                ));
            }
            output.push('\n');
        }

        output.push_str("Summary:\n");
        output.push_str(&format!("\u{251C}\u{2500} Located:   {}\n", summary.located));
        output.push_str(&format!("\u{251C}\u{2500} Converted: {}\n", summary.converted));
        output.push_str(&format!("\u{251C}\u{2500} Skipped:   {}\n", summary.skipped));
        output.push_str(&format!("\u{2514}\u{2500} Failed:    {}\n", summary.failed));

        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn describe(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Array(items) => format!("{} item(s)", items.len()),
        serde_json::Value::Object(fields) => format!("object, {} field(s)", fields.len()),
        other => other.to_string(),
    }
}
