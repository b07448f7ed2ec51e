use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).context(format!("Failed to write file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("shop")).unwrap();
        fs::File::create(base.join("shop/page.js"))
            .unwrap()
            .write_all(b"const products = [];")
            .unwrap();

        dir
    }

    #[test]
    fn test_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_file(&temp.path().join("shop/page.js")));
        assert!(!fs.is_file(&temp.path().join("shop")));
        assert!(!fs.is_file(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("shop/page.js")).unwrap();
        assert_eq!(content, "const products = [];");
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let err = fs
            .read_to_string(&temp.path().join("missing/page.js"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_write_replaces_contents() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let page = temp.path().join("shop/page.js");

        fs.write(&page, "// rewritten\n").unwrap();
        assert_eq!(fs.read_to_string(&page).unwrap(), "// rewritten\n");
    }
}
