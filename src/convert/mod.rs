//! Page conversion
//!
//! [`convert_source`] is the pure transformation: it decides whether a page
//! is skipped, extracts and synthesizes its config, and renders the new
//! text. [`PageConverter`] wraps it with file I/O over a [`FileSystem`], and
//! [`BatchConverter`] drives a whole catalog.
//!
//! Each page moves through
//! `Unprocessed -> (Skipped | Extracted) -> Synthesized -> Written`;
//! dry runs stop at `Synthesized`.

mod batch;
mod rewrite;

pub use batch::{BatchConverter, BatchReport, BatchSummary, PageFailure};
pub use rewrite::{declares_config, is_converted, prologue_end, CONFIG_BINDING, HEADER, MARKER};

use crate::extract::{ExtractionIssue, Extractor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::synth::{synthesize_config, PageConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Pages at the catalog root that are never rewritten, relative to the scan root
pub const DEFAULT_ROOT_PAGES: &[&str] = &["page.js", "app/page.js", "src/app/page.js"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The page carries the generated marker
    AlreadyConverted,
    /// The page is a catalog index
    RootIndex,
    /// The page binds `pageConfig` itself
    ExistingConfig,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AlreadyConverted => "already converted",
            SkipReason::RootIndex => "root index page",
            SkipReason::ExistingConfig => "declares its own pageConfig",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    Unprocessed,
    Skipped,
    Extracted,
    Synthesized,
    Written,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageStatus {
    Converted,
    Skipped { reason: SkipReason },
}

/// Outcome of the pure transformation
#[derive(Debug, Clone)]
pub struct Conversion {
    pub state: PageState,
    pub status: PageStatus,
    pub config: Option<PageConfig>,
    pub issues: Vec<ExtractionIssue>,
    /// Rewritten page text, present only for converted pages
    pub output: Option<String>,
}

impl Conversion {
    fn skipped(reason: SkipReason) -> Self {
        Self {
            state: PageState::Skipped,
            status: PageStatus::Skipped { reason },
            config: None,
            issues: Vec::new(),
            output: None,
        }
    }
}

/// Transforms page text without touching the filesystem
pub fn convert_source(source: &str, is_root_index: bool, extractor: &Extractor) -> Result<Conversion> {
    if is_converted(source) {
        return Ok(Conversion::skipped(SkipReason::AlreadyConverted));
    }
    if is_root_index {
        return Ok(Conversion::skipped(SkipReason::RootIndex));
    }
    if declares_config(source) {
        return Ok(Conversion::skipped(SkipReason::ExistingConfig));
    }

    let extraction = extractor.extract(source);
    let config = synthesize_config(extraction.entries);
    let block = rewrite::render_block(&config)?;

    Ok(Conversion {
        state: PageState::Synthesized,
        status: PageStatus::Converted,
        output: Some(rewrite::insert_block(source, &block)),
        config: Some(config),
        issues: extraction.issues,
    })
}

/// Per-page result
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub path: PathBuf,
    pub state: PageState,
    #[serde(flatten)]
    pub status: PageStatus,
    /// Top-level keys of the synthesized config
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ExtractionIssue>,
    #[serde(skip)]
    pub config: Option<PageConfig>,
}

impl PageReport {
    pub fn is_converted(&self) -> bool {
        self.status == PageStatus::Converted
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self.status {
            PageStatus::Skipped { reason } => Some(reason),
            PageStatus::Converted => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Scan root that root-index paths are relative to
    pub root: PathBuf,
    pub root_pages: Vec<String>,
    pub dry_run: bool,
}

impl ConvertOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_pages: DEFAULT_ROOT_PAGES.iter().map(|p| p.to_string()).collect(),
            dry_run: false,
        }
    }

    pub fn with_root_pages(mut self, root_pages: Vec<String>) -> Self {
        self.root_pages = root_pages;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_root_index(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        let relative = relative_key(relative);
        self.root_pages
            .iter()
            .any(|page| page.trim_start_matches("./") == relative)
    }
}

/// Slash-joined normal components, independent of platform separators
fn relative_key(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub struct PageConverter<F: FileSystem> {
    fs: F,
    options: ConvertOptions,
    extractor: Extractor,
}

impl<F: FileSystem> PageConverter<F> {
    pub fn new(fs: F, options: ConvertOptions) -> Self {
        Self {
            fs,
            options,
            extractor: Extractor::new(),
        }
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Reads, transforms and (unless dry-running) writes back one page
    ///
    /// Only I/O failures are errors; skips are reported in the status.
    pub fn convert_page(&self, path: &Path) -> Result<PageReport> {
        let source = self.fs.read_to_string(path)?;

        let conversion = convert_source(&source, self.options.is_root_index(path), &self.extractor)
            .with_context(|| format!("Failed to convert {}", path.display()))?;

        let mut state = conversion.state;
        if let Some(output) = &conversion.output {
            if self.options.dry_run {
                debug!(path = %path.display(), "Dry run, not writing");
            } else {
                self.fs.write(path, output)?;
                state = PageState::Written;
            }
        }

        let keys = conversion
            .config
            .as_ref()
            .map(|config| config.keys().into_iter().map(String::from).collect())
            .unwrap_or_default();

        debug!(path = %path.display(), state = ?state, keys = ?keys, "Page processed");

        Ok(PageReport {
            path: path.to_path_buf(),
            state,
            status: conversion.status,
            keys,
            issues: conversion.issues,
            config: conversion.config,
        })
    }
}

/// Converts one page on disk, treating `root` as the catalog root
pub fn convert_page(root: &Path, path: &Path) -> Result<PageReport> {
    PageConverter::new(RealFileSystem, ConvertOptions::new(root)).convert_page(path)
}
