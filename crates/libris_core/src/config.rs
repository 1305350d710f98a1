//! Library configuration.

use std::path::{Path, PathBuf};

/// Default snapshot file name.
pub const DEFAULT_DATA_FILE: &str = "library_data.json";

/// Configuration for opening a library.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the snapshot file.
    pub path: PathBuf,

    /// Whether to create missing parent directories of `path`.
    pub create_dirs: bool,

    /// Whether to take the exclusive advisory lock on the snapshot.
    pub lock: bool,

    /// Whether to pretty-print the JSON snapshot.
    pub pretty: bool,

    /// Whether checkouts must reference an existing user and book.
    pub enforce_references: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            create_dirs: false,
            lock: true,
            pretty: true,
            enforce_references: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the snapshot file path.
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }

    /// Sets whether to take the advisory lock.
    #[must_use]
    pub const fn lock(mut self, value: bool) -> Self {
        self.lock = value;
        self
    }

    /// Sets whether to pretty-print the snapshot.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Sets whether checkouts are validated against users and books.
    #[must_use]
    pub const fn enforce_references(mut self, value: bool) -> Self {
        self.enforce_references = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.path, PathBuf::from("library_data.json"));
        assert!(config.lock);
        assert!(config.pretty);
        assert!(!config.enforce_references);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .path("/tmp/catalog.json")
            .lock(false)
            .enforce_references(true);

        assert_eq!(config.path, PathBuf::from("/tmp/catalog.json"));
        assert!(!config.lock);
        assert!(config.enforce_references);
    }
}
