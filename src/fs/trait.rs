//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Abstraction over the file operations a conversion pass performs
///
/// The converter only ever reads a page, decides, and optionally overwrites
/// the same page. Directory walking goes through [`crate::scan::PageLocator`]
/// which talks to the real tree directly.
pub trait FileSystem: Send + Sync {
    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace the contents of an existing file
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
