//! Configuration management for pagecfg
//!
//! Settings are read from environment variables with defaults matching a
//! standard catalog layout. Command-line flags override them.
//!
//! # Environment Variables
//!
//! - `PAGECFG_PAGE_FILE`: Page file name - default: "page.js"
//! - `PAGECFG_EXCLUDED_DIRS`: Comma-separated directory names pruned from the walk -
//!   default: "node_modules,.git,.next,packages,scripts,build,dist,out,coverage"
//! - `PAGECFG_ROOT_PAGES`: Comma-separated root index pages, relative to the scan root -
//!   default: "page.js,app/page.js,src/app/page.js"
//! - `PAGECFG_MAX_DEPTH`: Maximum walk depth (1-256) - default: "32"
//! - `PAGECFG_LOG_LEVEL`: Logging level - default: "info"
//! - `PAGECFG_LOG_JSON`: JSON log output (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use pagecfg::PagecfgConfig;
//! use std::env;
//!
//! env::set_var("PAGECFG_EXCLUDED_DIRS", "node_modules,.git,legacy");
//!
//! let config = PagecfgConfig::from_env().expect("Invalid configuration");
//! assert!(config.excluded_dirs.contains(&"legacy".to_string()));
//! ```

use crate::convert::{ConvertOptions, DEFAULT_ROOT_PAGES};
use crate::scan::{LocatorConfig, DEFAULT_EXCLUDED_DIRS, DEFAULT_MAX_DEPTH, DEFAULT_PAGE_FILE};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_PAGE_FILE: &str = "PAGECFG_PAGE_FILE";
pub const ENV_EXCLUDED_DIRS: &str = "PAGECFG_EXCLUDED_DIRS";
pub const ENV_ROOT_PAGES: &str = "PAGECFG_ROOT_PAGES";
pub const ENV_MAX_DEPTH: &str = "PAGECFG_MAX_DEPTH";
pub const ENV_LOG_LEVEL: &str = "PAGECFG_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "PAGECFG_LOG_JSON";

const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagecfgConfig {
    /// Exact file name of a page
    pub page_file: String,

    /// Directory names pruned wherever they appear
    pub excluded_dirs: Vec<String>,

    /// Root index pages that are never rewritten
    pub root_pages: Vec<String>,

    pub max_depth: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,
}

impl Default for PagecfgConfig {
    /// Loads from environment variables, falling back to defaults for
    /// anything missing or unparseable
    fn default() -> Self {
        let page_file = env::var(ENV_PAGE_FILE)
            .ok()
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_PAGE_FILE.to_string());

        let excluded_dirs = env::var(ENV_EXCLUDED_DIRS)
            .ok()
            .map(|v| split_list(&v))
            .unwrap_or_else(|| to_strings(DEFAULT_EXCLUDED_DIRS));

        let root_pages = env::var(ENV_ROOT_PAGES)
            .ok()
            .map(|v| split_list(&v))
            .unwrap_or_else(|| to_strings(DEFAULT_ROOT_PAGES));

        let max_depth = env::var(ENV_MAX_DEPTH)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DEPTH);

        let log_level = env::var(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var(ENV_LOG_JSON)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            page_file,
            excluded_dirs,
            root_pages,
            max_depth,
            log_level,
            log_json,
        }
    }
}

impl PagecfgConfig {
    /// Loads from the environment, rejecting unparseable or invalid values
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var(ENV_MAX_DEPTH) {
            config.max_depth = raw.trim().parse().map_err(|e| ConfigError::ParseError {
                field: ENV_MAX_DEPTH.to_string(),
                error: format!("{}", e),
            })?;
        }
        if let Ok(raw) = env::var(ENV_LOG_JSON) {
            config.log_json = raw.trim().parse().map_err(|e| ConfigError::ParseError {
                field: ENV_LOG_JSON.to_string(),
                error: format!("{}", e),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_file.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Page file name cannot be empty".to_string(),
            ));
        }
        if self.page_file.contains(['/', '\\']) {
            return Err(ConfigError::ValidationFailed(format!(
                "Page file must be a file name, not a path: {}",
                self.page_file
            )));
        }

        if let Some(dir) = self
            .excluded_dirs
            .iter()
            .find(|d| d.is_empty() || d.contains(['/', '\\']))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Excluded directory must be a single path component: '{}'",
                dir
            )));
        }

        if self.max_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be at least 1".to_string(),
            ));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::ValidationFailed(format!(
                "Max depth cannot exceed {}",
                MAX_DEPTH_LIMIT
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn locator_config(&self, sorted: bool) -> LocatorConfig {
        LocatorConfig {
            page_file: self.page_file.clone(),
            excluded_dirs: self.excluded_dirs.clone(),
            max_depth: self.max_depth,
            sorted,
        }
    }

    pub fn convert_options(&self, root: impl Into<PathBuf>, dry_run: bool) -> ConvertOptions {
        ConvertOptions::new(root)
            .with_root_pages(self.root_pages.clone())
            .with_dry_run(dry_run)
    }

    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        map.insert("page_file".to_string(), self.page_file.clone());
        map.insert("excluded_dirs".to_string(), self.excluded_dirs.join(","));
        map.insert("root_pages".to_string(), self.root_pages.join(","));
        map.insert("max_depth".to_string(), self.max_depth.to_string());
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());

        map
    }
}

impl fmt::Display for PagecfgConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pagecfg Configuration:")?;
        writeln!(f, "  Page File: {}", self.page_file)?;
        writeln!(f, "  Excluded Dirs: {}", self.excluded_dirs.join(", "))?;
        writeln!(f, "  Root Pages: {}", self.root_pages.join(", "))?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
