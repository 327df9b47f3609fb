//! # magescaff CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Every test
//! runs the compiled `magescaff` binary against a throwaway Magento root
//! created with `tempfile`:
//!
//! ```text
//! <tmp>/
//!   .git/                 stops the project config search
//!   app/code/Acme/Blog/   an existing module
//! ```
//!
//! The user configuration directory is pointed into the temp dir as well, so
//! a developer's own `config.toml` never leaks into a test run.
//!

// Different test crates use different helpers.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub use assert_cmd::Command;
use tempfile::TempDir;

/// Existing module every fixture starts with.
pub const MODULE: &str = "Acme_Blog";

/// Creates an `assert_cmd::Command` for the compiled `magescaff` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn magescaff_cmd() -> Command {
    Command::cargo_bin("magescaff").expect("Failed to find magescaff binary for testing")
}

/// A temporary Magento root holding the `Acme_Blog` module.
pub struct Shop {
    dir: TempDir,
}

impl Shop {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp Magento root");
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("app/code/Acme/Blog")).unwrap();
        Shop { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `relative` inside the `Acme_Blog` module.
    pub fn module_path(&self, relative: &str) -> PathBuf {
        self.root().join("app/code/Acme/Blog").join(relative)
    }

    /// Reads a file inside the `Acme_Blog` module.
    pub fn read(&self, relative: &str) -> String {
        let path = self.module_path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Writes a file relative to the Magento root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// `magescaff --root <tmp> <args...>`, run from inside the temp root.
    pub fn cmd<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = magescaff_cmd();
        cmd.current_dir(self.root())
            .env("XDG_CONFIG_HOME", self.root().join(".config"))
            .env("HOME", self.root())
            .env_remove("MAGESCAFF_ROOT")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.root())
            .args(args);
        cmd
    }
}
