//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the sampler to work with both the real
//! `/proc` filesystem on Linux and mock implementations for testing.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Abstraction for reading pseudo-files.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Reads only the first line of a file, without the trailing newline.
    ///
    /// `/proc/stat` is consumed line-wise; only the aggregate "cpu" line
    /// at the top is needed.
    fn read_first_line(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_first_line(&self, path: &Path) -> io::Result<String> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_real_fs_read_to_string() {
        let fs = RealFs::new();
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        let content = fs.read_to_string(&cargo_toml).unwrap();
        assert!(content.contains("[package]"));
    }

    #[test]
    fn test_real_fs_read_first_line() {
        let fs = RealFs::new();
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        let line = fs.read_first_line(&cargo_toml).unwrap();
        assert_eq!(line, "[package]");
    }

    #[test]
    fn test_real_fs_missing_file() {
        let fs = RealFs::new();
        let err = fs.read_first_line(Path::new("/nonexistent/path/12345"));
        assert!(err.is_err());
    }
}
