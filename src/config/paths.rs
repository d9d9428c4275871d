//! Path resolution for lapwatch configuration and data files.
//!
//! All lapwatch data is stored in `~/.lapwatch/`:
//! - `config.yaml` - Main configuration file
//! - `lapwatch.db` - SQLite database holding the session history blob
//! - `lapwatch.log` - Log output while the terminal UI is running

use std::path::PathBuf;

use crate::error::LapwatchError;

/// Paths to lapwatch configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.lapwatch/`
    pub root: PathBuf,
    /// Config file: `~/.lapwatch/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.lapwatch/lapwatch.db`
    pub database: PathBuf,
    /// Log file: `~/.lapwatch/lapwatch.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LapwatchError> {
        let home = std::env::var("HOME").map_err(|_| {
            LapwatchError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".lapwatch")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("lapwatch.db"),
            log_file: root.join("lapwatch.log"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), LapwatchError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                LapwatchError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-lapwatch");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("lapwatch.db"));
        assert_eq!(paths.log_file, root.join("lapwatch.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join(".lapwatch"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
