//! # magescaff Scaffold Orchestration
//!
//! File: cli/src/scaffold/mod.rs
//!
//! ## Overview
//!
//! The scaffold layer sits between the command handlers and the XML engine.
//! It decides which file a piece of content belongs in, makes sure that file
//! exists, and reports every outcome to the user as one line.
//!
//! ## Architecture
//!
//! - **`ScaffoldContext`**: built once in `main` from the loaded `Config` and
//!   passed by reference to every handler. Holds the installation root, the
//!   code directory, XML formatting settings and the template stamper.
//! - **`ModuleRef`**: a resolved `Vendor_Module` with its directory and namespace.
//! - **`area`**: configuration areas and their directory names.
//! - **`catalog`**: root node / schema URN / area lookup for configuration files.
//! - **`config_file`**: create-if-absent and merge for configuration files and layout handles.
//! - **`inspect`**: target method lookup for plugins.
//! - **`php`**: PHP class and function skeletons rendered through the stamper.
//!
pub mod area;
pub mod catalog;
pub mod config_file;
pub mod inspect;
pub mod php;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::common::fs::io;
use crate::common::ui;
use crate::core::config::Config;
use crate::core::error::{Result, ScaffoldError};
use crate::core::templating::Stamper;
use crate::xml::{FragmentBuilder, MergeOptions};
use php::{class_segments, ClassName, PhpClass};

/// Everything a scaffold operation needs to know about the installation.
#[derive(Debug)]
pub struct ScaffoldContext {
    /// Absolute installation root.
    pub root: PathBuf,
    /// Absolute module code directory (`<root>/app/code` by default).
    pub code_dir: PathBuf,
    pub indent: usize,
    pub discover: bool,
    pub stamper: Stamper,
}

impl ScaffoldContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        let configured = PathBuf::from(&config.magento.root);
        let root = if configured.is_absolute() {
            configured
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(configured)
        };
        let code_dir = root.join(&config.magento.code_dir);
        debug!(
            "Scaffold context: root={}, code_dir={}",
            root.display(),
            code_dir.display()
        );
        Ok(ScaffoldContext {
            root,
            code_dir,
            indent: config.xml.indent,
            discover: config.catalog.discover,
            stamper: Stamper::new()?,
        })
    }

    /// Resolves an existing module from its `Vendor_Module` name.
    ///
    /// # Errors
    ///
    /// `ModuleMissing` when no name was given, `ModuleNotFound` when the
    /// directory does not exist in the code directory.
    pub fn module(&self, name: Option<&str>) -> Result<ModuleRef> {
        let name = name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ScaffoldError::ModuleMissing.into());
        }
        let not_found = || ScaffoldError::ModuleNotFound {
            name: name.to_string(),
        };
        let module = ModuleRef::from_name(&self.code_dir, name).ok_or_else(not_found)?;
        if !module.dir.is_dir() {
            return Err(not_found().into());
        }
        Ok(module)
    }

    /// Path shown to the user: relative to the installation root when possible.
    pub fn display(&self, path: &Path) -> String {
        match pathdiff::diff_paths(path, &self.root) {
            Some(relative) if !relative.starts_with("..") => relative.display().to_string(),
            _ => path.display().to_string(),
        }
    }

    /// Creates `dir` if needed, announcing it when it was created.
    pub fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if io::ensure_dir_exists(dir)? {
            ui::directory_created(&self.display(dir));
        }
        Ok(())
    }

    /// Writes `content` to `path` unless the file already exists.
    /// Returns whether the file was written.
    pub fn write_new_file(&self, path: &Path, content: &str) -> Result<bool> {
        if path.exists() {
            ui::file_exists(&self.display(path));
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            self.ensure_dir(dir)?;
        }
        io::write_string_to_file(path, content)?;
        ui::file_created(&self.display(path));
        Ok(true)
    }

    /// Renders `class` and writes it to `path` unless the file already exists.
    pub fn write_class(&self, path: &Path, class: &PhpClass) -> Result<bool> {
        if path.exists() {
            ui::file_exists(&self.display(path));
            return Ok(false);
        }
        let php = class.render(&self.stamper)?;
        self.write_new_file(path, &php)
    }

    pub fn merge_options(&self, builder: FragmentBuilder) -> MergeOptions {
        MergeOptions {
            indent: self.indent,
            builder,
        }
    }

    /// Directories searched for schema declarations when discovery is enabled.
    pub fn schema_search_roots(&self) -> Vec<PathBuf> {
        if !self.discover {
            return Vec::new();
        }
        vec![self.root.join("vendor").join("magento"), self.code_dir.clone()]
    }
}

/// A module in the code directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    /// `Vendor_Module`
    pub name: String,
    pub vendor: String,
    pub module: String,
    pub dir: PathBuf,
}

impl ModuleRef {
    /// Splits `Vendor_Module` at the first underscore. Does not touch the filesystem.
    pub fn from_name(code_dir: &Path, name: &str) -> Option<ModuleRef> {
        let (vendor, module) = name.split_once('_')?;
        if vendor.is_empty() || module.is_empty() {
            return None;
        }
        Some(ModuleRef {
            name: name.to_string(),
            vendor: vendor.to_string(),
            module: module.to_string(),
            dir: code_dir.join(vendor).join(module),
        })
    }

    /// `Vendor\Module`
    pub fn namespace(&self) -> String {
        format!("{}\\{}", self.vendor, self.module)
    }

    /// Locates a class below `folder` (e.g. `Controller/Adminhtml`) of this module.
    ///
    /// `relative` may use `/` or `\` separators. Returns `None` if it is not a valid class path.
    pub fn class_in(&self, folder: &str, relative: &str) -> Option<(ClassName, PathBuf)> {
        let mut segments: Vec<String> = folder
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        segments.extend(class_segments(relative)?);
        let short = segments.pop()?;

        let mut path = self.dir.clone();
        for segment in &segments {
            path.push(segment);
        }
        path.push(format!("{}.php", short));

        let mut namespace = self.namespace();
        for segment in &segments {
            namespace.push('\\');
            namespace.push_str(segment);
        }
        Some((ClassName { namespace, short }, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Config, MagentoConfig};
    use std::fs;
    use tempfile::tempdir;

    fn context(root: &Path) -> ScaffoldContext {
        let config = Config {
            magento: MagentoConfig {
                root: root.to_string_lossy().into_owned(),
                ..Default::default()
            },
            ..Default::default()
        };
        ScaffoldContext::from_config(&config).unwrap()
    }

    #[test]
    fn test_module_resolution() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("app/code/Acme/Blog")).unwrap();
        let ctx = context(temp.path());

        let module = ctx.module(Some("Acme_Blog")).unwrap();
        assert_eq!(module.vendor, "Acme");
        assert_eq!(module.namespace(), "Acme\\Blog");
        assert_eq!(module.dir, temp.path().join("app/code/Acme/Blog"));

        let missing = ctx.module(None).unwrap_err();
        assert_eq!(missing.to_string(), "Module name is missing!");
        assert!(ctx.module(Some("  ")).is_err());

        let not_found = ctx.module(Some("Acme_Shop")).unwrap_err();
        assert_eq!(not_found.to_string(), "Module doesn't exist in code directory!");
        assert!(ctx.module(Some("AcmeBlog")).is_err());
    }

    #[test]
    fn test_class_in_folder() {
        let module = ModuleRef::from_name(Path::new("/srv/app/code"), "Acme_Blog").unwrap();
        let (class, path) = module.class_in("Controller/Adminhtml", "Post/Edit").unwrap();
        assert_eq!(class.fqcn(), "Acme\\Blog\\Controller\\Adminhtml\\Post\\Edit");
        assert_eq!(
            path,
            Path::new("/srv/app/code/Acme/Blog/Controller/Adminhtml/Post/Edit.php")
        );

        let (helper, _) = module.class_in("Helper", "\\Data").unwrap();
        assert_eq!(helper.namespace, "Acme\\Blog\\Helper");

        let (root_class, root_path) = module.class_in("", "Model/Post").unwrap();
        assert_eq!(root_class.fqcn(), "Acme\\Blog\\Model\\Post");
        assert_eq!(root_path, Path::new("/srv/app/code/Acme/Blog/Model/Post.php"));

        assert!(module.class_in("Helper", "Bad-Name").is_none());
        assert!(module.class_in("Helper", "").is_none());
    }

    #[test]
    fn test_write_new_file_never_overwrites() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());
        let path = temp.path().join("app/code/Acme/Blog/registration.php");
        assert!(ctx.write_new_file(&path, "first").unwrap());
        assert!(!ctx.write_new_file(&path, "second").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_display_relative_to_root() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());
        assert_eq!(
            ctx.display(&temp.path().join("app/code/Acme/Blog/etc/di.xml")),
            "app/code/Acme/Blog/etc/di.xml"
        );
        assert_eq!(ctx.display(Path::new("/elsewhere/x.xml")), "/elsewhere/x.xml");
    }

    #[test]
    fn test_schema_search_roots_follow_discovery_flag() {
        let temp = tempdir().unwrap();
        let mut ctx = context(temp.path());
        assert_eq!(ctx.schema_search_roots().len(), 2);
        ctx.discover = false;
        assert!(ctx.schema_search_roots().is_empty());
    }
}
