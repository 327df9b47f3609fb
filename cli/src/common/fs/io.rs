//! # magescaff Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the XML layer and the scaffold
//! context. They add path context to every I/O error so that the message
//! printed for a failed step names the file involved.
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) if missing and
//!   reports whether it had to. A path that exists but is not a directory is an error.
//! - **`read_file_to_string`**: reads a whole file.
//! - **`write_string_to_file`**: writes a whole file, creating parent directories first.
//!
//! ```rust
//! if io::ensure_dir_exists(&module_dir)? {
//!     ui::directory_created(&module_dir);
//! }
//! io::write_string_to_file(&module_dir.join("registration.php"), &php)?;
//! ```
//!
use crate::core::error::{Result, ScaffoldError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at `path`.
///
/// # Returns
///
/// * `Ok(true)` if the directory was created by this call, `Ok(false)` if it already existed.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        info!("Created directory: {}", path.display());
        Ok(true)
    } else if !path.is_dir() {
        anyhow::bail!(ScaffoldError::FileSystem(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    } else {
        debug!("Directory already exists: {}", path.display());
        Ok(false)
    }
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with context
/// indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Writes `content` to `path`, overwriting it if it exists.
///
/// The parent directory is created first if necessary.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or the write fails.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {}", path.display()))?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A missing directory is created together with its parents.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("app/code/Acme/Blog");
        assert!(!new_dir.exists());
        assert!(ensure_dir_exists(&new_dir)?);
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_already_exists() -> Result<()> {
        let base_dir = tempdir()?;
        let existing_dir = base_dir.path().join("etc");
        fs::create_dir(&existing_dir)?;
        assert!(!ensure_dir_exists(&existing_dir)?);
        assert!(existing_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("etc");
        fs::write(&file_path, "not a directory")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    /// Writing into a missing directory creates it; reading returns the same text.
    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("etc/frontend/routes.xml");
        let content = "<?xml version=\"1.0\"?>\n<config/>\n";
        write_string_to_file(&file_path, content)?;
        assert_eq!(read_file_to_string(&file_path)?, content);
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("missing.xml");
        let err = read_file_to_string(&file_path).unwrap_err();
        assert!(err.to_string().contains("missing.xml"));
        Ok(())
    }
}
