use ignore::{DirEntry, WalkBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name every catalog page uses
pub const DEFAULT_PAGE_FILE: &str = "page.js";

/// Directories that hold tooling, dependencies or build output rather than pages
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "packages",
    "scripts",
    "build",
    "dist",
    "out",
    "coverage",
];

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Root path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to resolve root path {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Exact file name that marks a page
    pub page_file: String,
    /// Directory names pruned wherever they appear below the root
    pub excluded_dirs: Vec<String>,
    pub max_depth: usize,
    /// Visit entries in file name order instead of traversal order
    pub sorted: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            page_file: DEFAULT_PAGE_FILE.to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
            sorted: false,
        }
    }
}

pub struct PageLocator {
    root: PathBuf,
    config: LocatorConfig,
}

impl PageLocator {
    pub fn new(root: PathBuf) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let root = root
            .canonicalize()
            .map_err(|source| ScanError::Resolve {
                path: root.clone(),
                source,
            })?;

        debug!(root = %root.display(), "PageLocator initialized");

        Ok(Self {
            root,
            config: LocatorConfig::default(),
        })
    }

    pub fn with_config(mut self, config: LocatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Returns the path of every page below the root
    ///
    /// Order is traversal order unless [`LocatorConfig::sorted`] is set.
    pub fn locate(&self) -> Vec<PathBuf> {
        let start = Instant::now();

        info!(
            root = %self.root.display(),
            page_file = %self.config.page_file,
            max_depth = self.config.max_depth,
            "Locating pages"
        );

        let excluded = self.config.excluded_dirs.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .max_depth(Some(self.config.max_depth))
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .filter_entry(move |entry| !is_excluded_dir(entry, &excluded));
        if self.config.sorted {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }

        let mut pages = Vec::new();
        let mut skipped_entries = 0usize;

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    skipped_entries += 1;
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && entry.file_name() == self.config.page_file.as_str() {
                debug!(path = %entry.path().display(), "Found page");
                pages.push(entry.into_path());
            }
        }

        info!(
            pages_found = pages.len(),
            skipped_entries,
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Page scan completed"
        );

        pages
    }
}

fn is_excluded_dir(entry: &DirEntry, excluded: &[String]) -> bool {
    // The root itself is never pruned, whatever its name
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
    is_dir
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.iter().any(|e| e == name))
}

/// Locates pages below `root` with the default configuration
pub fn locate_pages(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    Ok(PageLocator::new(root.to_path_buf())?.locate())
}
