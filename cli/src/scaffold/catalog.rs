//! # Schema Catalog
//!
//! File: cli/src/scaffold/catalog.rs
//!
//! ## Overview
//!
//! Before a configuration file is created, magescaff needs to know its root
//! node, the schema URN to declare on it, and which areas it may live in. The
//! catalog answers that from two sources:
//!
//! - a built-in table of the configuration files the scaffold commands write;
//! - optionally, the schema declarations found in the installation itself
//!   (`vendor/magento` and the code directory), which covers any other file
//!   kind Magento knows about.
//!
//! A discovered declaration replaces the built-in entry for the same file and
//! area. Built-in entries for other areas stay available.
//!
//! ## Area selection
//!
//! - one candidate: it is used, whatever area was requested;
//! - several candidates: the requested area (global by default) must match one,
//!   otherwise "Invalid configuration file area!";
//! - no candidate: "Invalid configuration file!".
//!
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use super::area::Area;
use crate::core::error::{Result, ScaffoldError};
use crate::xml::SCHEMA_LOCATION_ATTRIBUTE;

const URN_PREFIX: &str = "urn:magento:";
const DISCOVERY_MAX_DEPTH: usize = 6;

/// What it takes to create one configuration file from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub file: String,
    pub root_node: String,
    pub urn: String,
    pub area: Area,
}

struct KnownFile {
    file: &'static str,
    root_node: &'static str,
    urn: &'static str,
    areas: &'static [Area],
}

const GLOBAL_ONLY: &[Area] = &[Area::Global];

const KNOWN_FILES: &[KnownFile] = &[
    KnownFile {
        file: "module.xml",
        root_node: "config",
        urn: "urn:magento:framework:Module/etc/module.xsd",
        areas: GLOBAL_ONLY,
    },
    KnownFile {
        file: "config.xml",
        root_node: "config",
        urn: "urn:magento:module:Magento_Store:etc/config.xsd",
        areas: GLOBAL_ONLY,
    },
    KnownFile {
        file: "routes.xml",
        root_node: "config",
        urn: "urn:magento:framework:App/etc/routes.xsd",
        areas: &[Area::Frontend, Area::Adminhtml],
    },
    KnownFile {
        file: "events.xml",
        root_node: "config",
        urn: "urn:magento:framework:Event/etc/events.xsd",
        areas: &Area::CONFIG,
    },
    KnownFile {
        file: "di.xml",
        root_node: "config",
        urn: "urn:magento:framework:ObjectManager/etc/config.xsd",
        areas: &Area::CONFIG,
    },
    KnownFile {
        file: "crontab.xml",
        root_node: "config",
        urn: "urn:magento:module:Magento_Cron:etc/crontab.xsd",
        areas: GLOBAL_ONLY,
    },
    KnownFile {
        file: "acl.xml",
        root_node: "config",
        urn: "urn:magento:framework:Acl/etc/acl.xsd",
        areas: GLOBAL_ONLY,
    },
    KnownFile {
        file: "webapi.xml",
        root_node: "routes",
        urn: "urn:magento:module:Magento_Webapi:etc/webapi.xsd",
        areas: GLOBAL_ONLY,
    },
    KnownFile {
        file: "db_schema.xml",
        root_node: "schema",
        urn: "urn:magento:framework:Setup/Declaration/Schema/etc/schema.xsd",
        areas: GLOBAL_ONLY,
    },
];

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<SchemaEntry>,
}

impl Catalog {
    /// The built-in table only.
    pub fn builtin() -> Self {
        let entries = KNOWN_FILES
            .iter()
            .flat_map(|known| {
                known.areas.iter().map(move |area| SchemaEntry {
                    file: known.file.to_string(),
                    root_node: known.root_node.to_string(),
                    urn: known.urn.to_string(),
                    area: *area,
                })
            })
            .collect();
        Catalog { entries }
    }

    /// The built-in table, overridden by declarations of `file` discovered under `search_roots`.
    pub fn with_discovered(file: &str, search_roots: &[PathBuf]) -> Self {
        let mut catalog = Catalog::builtin();
        for found in discover(file, search_roots) {
            catalog.insert(found);
        }
        catalog
    }

    /// Adds `entry`, replacing any entry for the same file and area.
    pub fn insert(&mut self, entry: SchemaEntry) {
        self.entries
            .retain(|existing| !(existing.file == entry.file && existing.area == entry.area));
        self.entries.push(entry);
    }

    pub fn candidates(&self, file: &str) -> Vec<&SchemaEntry> {
        self.entries.iter().filter(|e| e.file == file).collect()
    }

    /// Picks the entry for `file` in `area` (global when `None`).
    ///
    /// # Errors
    ///
    /// `ScaffoldError::InvalidInput` when the file is unknown or the area does not match.
    pub fn select(&self, file: &str, area: Option<Area>) -> Result<&SchemaEntry> {
        let candidates = self.candidates(file);
        match candidates.as_slice() {
            [] => Err(ScaffoldError::invalid("Invalid configuration file!").into()),
            [only] => Ok(*only),
            several => {
                let wanted = area.unwrap_or(Area::Global);
                several
                    .iter()
                    .find(|entry| entry.area == wanted)
                    .copied()
                    .ok_or_else(|| ScaffoldError::invalid("Invalid configuration file area!").into())
            }
        }
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.') || name == "Test" || name == "node_modules")
            .unwrap_or(false)
}

/// Walks `search_roots` for files named `file` under an `etc` directory and reads
/// their schema declarations. The first declaration seen for an area wins.
pub fn discover(file: &str, search_roots: &[PathBuf]) -> Vec<SchemaEntry> {
    let mut found: Vec<SchemaEntry> = Vec::new();
    for root in search_roots.iter().filter(|r| r.is_dir()) {
        debug!("Discovering {} declarations under {}", file, root.display());
        let walker = WalkDir::new(root)
            .max_depth(DISCOVERY_MAX_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.file_name() != file {
                continue;
            }
            let Some(area) = area_of(entry.path()) else {
                continue;
            };
            if found.iter().any(|e| e.area == area) {
                continue;
            }
            match read_schema_declaration(entry.path()) {
                Some((root_node, urn)) => {
                    trace!("{} declares <{}> {}", entry.path().display(), root_node, urn);
                    found.push(SchemaEntry {
                        file: file.to_string(),
                        root_node,
                        urn,
                        area,
                    });
                }
                None => debug!("No schema declaration in {}", entry.path().display()),
            }
        }
    }
    found
}

/// `.../etc/file` is global, `.../etc/<area>/file` is that area, anything else is not a config file.
fn area_of(path: &Path) -> Option<Area> {
    let parent = path.parent()?;
    let parent_name = parent.file_name()?.to_str()?;
    if parent_name == "etc" {
        return Some(Area::Global);
    }
    let grandparent = parent.parent()?.file_name()?.to_str()?;
    if grandparent == "etc" {
        Area::from_dir_name(parent_name)
    } else {
        None
    }
}

/// Reads the root element name and its `urn:magento:` schema location.
fn read_schema_declaration(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    let mut reader = Reader::from_str(&content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => return schema_of(&e),
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

fn schema_of(start: &BytesStart) -> Option<(String, String)> {
    let root_node = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let urn = start
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == SCHEMA_LOCATION_ATTRIBUTE.as_bytes())
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))?;
    urn.starts_with(URN_PREFIX).then_some((root_node, urn))
}
