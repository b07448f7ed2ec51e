//! Page discovery
//!
//! Walks a catalog tree and returns every page file, pruning tooling and
//! build output directories. Unreadable directories are logged and skipped
//! so a single bad subtree never hides the rest of the catalog.

mod locator;

pub use locator::{
    locate_pages, LocatorConfig, PageLocator, ScanError, DEFAULT_EXCLUDED_DIRS, DEFAULT_MAX_DEPTH,
    DEFAULT_PAGE_FILE,
};
