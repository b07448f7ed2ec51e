use super::{FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory file system used by converter tests
///
/// Relative paths are resolved against `root` (default `/mock`). Files can be
/// marked unreadable or read-only to exercise the batch error policy.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    read_only: RwLock<HashSet<PathBuf>>,
    writes: RwLock<Vec<PathBuf>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_only: RwLock::new(HashSet::new()),
            writes: RwLock::new(Vec::new()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            self.ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    /// Registers a file that exists but fails every read
    pub fn add_unreadable_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            self.ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: None,
                file_type: FileType::File,
            },
        );
    }

    /// Makes subsequent writes to `path` fail
    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.read_only.write().unwrap().insert(path);
    }

    /// Paths written so far, in write order
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes.read().unwrap().clone()
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(&self, files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.file_type == FileType::File)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        if entry.file_type != FileType::File {
            return Err(anyhow!("Not a file: {:?}", path));
        }

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Permission denied: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);
        if self.read_only.read().unwrap().contains(&path) {
            return Err(anyhow!("Read-only file: {:?}", path));
        }

        let mut files = self.files.write().unwrap();
        match files.get_mut(&path) {
            Some(entry) if entry.file_type == FileType::File => {
                entry.content = Some(contents.to_string());
            }
            Some(_) => return Err(anyhow!("Not a file: {:?}", path)),
            None => return Err(anyhow!("File not found: {:?}", path)),
        }

        self.writes.write().unwrap().push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("shop/page.js", "hello");

        assert!(fs.is_file(Path::new("/mock/shop/page.js")));
        assert!(!fs.is_file(Path::new("/mock/shop")));
        assert!(fs.read_to_string(Path::new("/mock/shop")).is_err());
    }

    #[test]
    fn test_read_to_string() {
        let fs = MockFileSystem::new();
        fs.add_file("page.js", "hello world");

        let content = fs.read_to_string(Path::new("/mock/page.js")).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_unreadable_file() {
        let fs = MockFileSystem::new();
        fs.add_unreadable_file("locked/page.js");

        assert!(fs.is_file(Path::new("/mock/locked/page.js")));
        assert!(fs.read_to_string(Path::new("/mock/locked/page.js")).is_err());
    }

    #[test]
    fn test_write_records_path() {
        let fs = MockFileSystem::new();
        fs.add_file("page.js", "before");

        fs.write(Path::new("page.js"), "after").unwrap();

        assert_eq!(fs.read_to_string(Path::new("page.js")).unwrap(), "after");
        assert_eq!(fs.written_paths(), vec![PathBuf::from("/mock/page.js")]);
    }

    #[test]
    fn test_write_missing_file_fails() {
        let fs = MockFileSystem::new();
        assert!(fs.write(Path::new("nope.js"), "x").is_err());
        assert!(fs.written_paths().is_empty());
    }

    #[test]
    fn test_read_only_file() {
        let fs = MockFileSystem::new();
        fs.add_file("page.js", "before");
        fs.set_read_only("page.js");

        assert!(fs.write(Path::new("page.js"), "after").is_err());
        assert_eq!(fs.read_to_string(Path::new("page.js")).unwrap(), "before");
    }

    #[test]
    fn test_with_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/catalog"));
        fs.add_file("app/cart/page.js", "const cartItems = [];");

        assert_eq!(fs.root(), Path::new("/catalog"));
        assert!(fs.is_file(Path::new("/catalog/app/cart/page.js")));
    }
}
