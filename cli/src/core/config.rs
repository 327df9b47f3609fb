//! # magescaff Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration that tells
//! magescaff where the Magento installation lives and how generated XML is
//! formatted.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. The `--root` flag / `MAGESCAFF_ROOT` environment variable
//! 2. Project-specific `.magescaff.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `<config dir>/magescaff/config.toml`
//! 4. Default values defined in the code
//!
//! After merging, `~` in paths is expanded and the result is validated.
//!
//! ## Examples
//!
//! ```toml
//! [magento]
//! root = "~/sites/shop"
//! code_dir = "app/code"
//!
//! [xml]
//! indent = 4
//!
//! [catalog]
//! discover = true
//! ```
//!
//! ```rust
//! let cfg = config::load_config(cli.root.as_deref())?;
//! let code_dir = Path::new(&cfg.magento.root).join(&cfg.magento.code_dir);
//! ```
//!
use crate::core::error::{Result, ScaffoldError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub magento: MagentoConfig,
    #[serde(default)]
    pub xml: XmlConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Location of the Magento installation and its module code directory.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MagentoConfig {
    /// Installation root (can use ~). Will be expanded.
    #[serde(default = "default_root")]
    pub root: String,
    /// Module code directory, relative to `root`.
    #[serde(default = "default_code_dir")]
    pub code_dir: String,
}

/// Formatting of re-serialised XML files.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct XmlConfig {
    /// Spaces per nesting level.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

/// Schema catalog behaviour.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Scan the installation for schema declarations of configuration files.
    #[serde(default = "default_discover")]
    pub discover: bool,
}

impl Default for MagentoConfig {
    fn default() -> Self {
        MagentoConfig {
            root: default_root(),
            code_dir: default_code_dir(),
        }
    }
}

impl Default for XmlConfig {
    fn default() -> Self {
        XmlConfig {
            indent: default_indent(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            discover: default_discover(),
        }
    }
}

fn default_root() -> String {
    ".".to_string()
}
fn default_code_dir() -> String {
    "app/code".to_string()
}
fn default_indent() -> usize {
    4
}
fn default_discover() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".magescaff.toml";

/// Loads the merged configuration.
///
/// # Arguments
///
/// * `root_override` - Installation root from the command line, if given. Wins over every file.
///
/// # Errors
///
/// Returns an error if a configuration file cannot be read or parsed, or if the
/// merged result fails validation.
pub fn load_config(root_override: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    if let Some(root) = root_override {
        debug!("Installation root overridden on the command line: {}", root.display());
        merged_config.magento.root = root.to_string_lossy().into_owned();
    }
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "magescaff", "magescaff") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.magescaff.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.magento.root = if project_cfg.magento.root != default_root() {
        project_cfg.magento.root
    } else {
        user.magento.root
    };
    merged.magento.code_dir = if project_cfg.magento.code_dir != default_code_dir() {
        project_cfg.magento.code_dir
    } else {
        user.magento.code_dir
    };
    merged.xml.indent = if project_cfg.xml.indent != default_indent() {
        project_cfg.xml.indent
    } else {
        user.xml.indent
    };
    merged.catalog.discover = project_cfg.catalog.discover && user.catalog.discover;
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.magento.root = shellexpand::tilde(&config.magento.root).into_owned();
    debug!("Expanded installation root: {}", config.magento.root);
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.magento.root.trim().is_empty() {
        return Err(anyhow!(ScaffoldError::Config(
            "The Magento root cannot be empty.".to_string()
        )));
    }
    let root = PathBuf::from(&config.magento.root);
    if root.exists() && !root.is_dir() {
        return Err(anyhow!(ScaffoldError::Config(format!(
            "Configured Magento root '{}' exists but is not a directory.",
            root.display()
        ))));
    }
    let code_dir = Path::new(&config.magento.code_dir);
    if config.magento.code_dir.trim().is_empty() || code_dir.is_absolute() {
        return Err(anyhow!(ScaffoldError::Config(format!(
            "code_dir must be a non-empty path relative to the Magento root, got '{}'.",
            config.magento.code_dir
        ))));
    }
    if !(1..=8).contains(&config.xml.indent) {
        return Err(anyhow!(ScaffoldError::Config(format!(
            "xml.indent must be between 1 and 8, got {}.",
            config.xml.indent
        ))));
    }
    info!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [magento]
            root = "~/sites/shop"

            [xml]
            indent = 2

            [catalog]
            discover = false
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.magento.root, "~/sites/shop"); // Not yet expanded
        assert_eq!(config.magento.code_dir, "app/code"); // Default
        assert_eq!(config.xml.indent, 2);
        assert!(!config.catalog.discover);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.magento.root, ".");
        assert_eq!(config.xml.indent, 4);
        assert!(config.catalog.discover);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[magento]\nrooot = \"/x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            magento: MagentoConfig {
                root: "~/shop".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        expand_config_paths(&mut config);
        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(config.magento.root, home_dir.join("shop").to_string_lossy());

        let mut absolute = Config {
            magento: MagentoConfig {
                root: "/var/www/shop".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        expand_config_paths(&mut absolute);
        assert_eq!(absolute.magento.root, "/var/www/shop");
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            magento: MagentoConfig {
                root: "/srv/user".into(),
                code_dir: "src/code".into(),
            },
            xml: XmlConfig { indent: 2 },
            ..Default::default()
        };
        let project = Config {
            magento: MagentoConfig {
                root: "/srv/project".into(),
                ..Default::default()
            },
            catalog: CatalogConfig { discover: false },
            ..Default::default()
        };
        let merged = merge_configs(user.clone(), Some(project));
        assert_eq!(merged.magento.root, "/srv/project");
        assert_eq!(merged.magento.code_dir, "src/code");
        assert_eq!(merged.xml.indent, 2);
        assert!(!merged.catalog.discover);

        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("app/code/Acme");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(temp.path().join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir_all(repo.join("sub")).unwrap();
        assert_eq!(find_project_config_path(&repo.join("sub")), None);
    }

    #[test]
    fn test_validate_config_valid() {
        let temp = tempdir().unwrap();
        let config = Config {
            magento: MagentoConfig {
                root: temp.path().to_string_lossy().into_owned(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_indent() {
        let config = Config {
            xml: XmlConfig { indent: 0 },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("xml.indent must be between 1 and 8"));
    }

    #[test]
    fn test_validate_config_absolute_code_dir() {
        let config = Config {
            magento: MagentoConfig {
                code_dir: "/app/code".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_root_is_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();
        let config = Config {
            magento: MagentoConfig {
                root: file_path.to_string_lossy().into_owned(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }
}
