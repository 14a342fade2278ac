//! In-memory mock filesystem for testing samplers without a real `/proc`.

use crate::collector::traits::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores file contents in memory, allowing tests to simulate various
/// `/proc` states (including absent files) without Linux access.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(path.as_ref().to_path_buf(), content.into());
    }

    fn get(&self, path: &Path) -> io::Result<&String> {
        self.files.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.get(path).cloned()
    }

    fn read_first_line(&self, path: &Path) -> io::Result<String> {
        let content = self.get(path)?;
        Ok(content.lines().next().unwrap_or("").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_read_to_string() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 1000 kB\n");
        let content = fs.read_to_string(Path::new("/proc/meminfo")).unwrap();
        assert_eq!(content, "MemTotal: 1000 kB\n");
    }

    #[test]
    fn test_mock_fs_read_first_line() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu  1 2 3 4 5 6 7\ncpu0 1 2 3 4 5 6 7\n");
        let line = fs.read_first_line(Path::new("/proc/stat")).unwrap();
        assert_eq!(line, "cpu  1 2 3 4 5 6 7");
    }

    #[test]
    fn test_mock_fs_missing_file_is_not_found() {
        let fs = MockFs::new();
        let err = fs.read_to_string(Path::new("/proc/meminfo")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
