//! Target method inspection for plugins.
//!
//! A plugin's `before`/`around`/`after` methods repeat the parameter list of
//! the method they intercept, and interception only works on public methods.
//! `MethodInspector` answers both questions for a class and method name.
//!
//! `SourceInspector` reads the class file from the code directory (PSR-4
//! layout, `Vendor/Module/Path/Class.php`) and scans it textually; it does not
//! look into `vendor/`. `FixedParams` skips inspection entirely and is used
//! when the parameters are given on the command line.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::debug;

use super::php::{is_identifier, ClassName};
use crate::common::fs::io;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub is_public: bool,
    /// Parameter names without the leading `$`.
    pub params: Vec<String>,
}

pub trait MethodInspector {
    fn inspect(&self, class: &ClassName, method: &str) -> Result<MethodInfo>;
}

#[derive(Debug, Clone)]
pub struct SourceInspector {
    code_dir: PathBuf,
}

impl SourceInspector {
    pub fn new(code_dir: impl Into<PathBuf>) -> Self {
        SourceInspector {
            code_dir: code_dir.into(),
        }
    }

    fn class_file(&self, class: &ClassName) -> PathBuf {
        let mut path = self.code_dir.clone();
        for segment in class.namespace.split('\\').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.php", class.short));
        path
    }
}

impl MethodInspector for SourceInspector {
    fn inspect(&self, class: &ClassName, method: &str) -> Result<MethodInfo> {
        let path = self.class_file(class);
        if !path.is_file() {
            return Err(anyhow!("Class \"{}\" does not exist", class.fqcn()));
        }
        debug!("Inspecting {} for {}()", path.display(), method);
        let source = io::read_file_to_string(&path)?;
        scan_method(&source, method)
            .ok_or_else(|| anyhow!("Method {}::{}() does not exist", class.fqcn(), method))
    }
}

/// Parameters supplied up front; the method is assumed to be public.
#[derive(Debug, Clone, Default)]
pub struct FixedParams {
    params: Vec<String>,
}

impl FixedParams {
    /// Parses a comma separated list such as `$product, qty`.
    pub fn parse(list: &str) -> Self {
        let params = list
            .split(',')
            .map(|p| p.trim().trim_start_matches('$').to_string())
            .filter(|p| is_identifier(p))
            .collect();
        FixedParams { params }
    }
}

impl MethodInspector for FixedParams {
    fn inspect(&self, _class: &ClassName, _method: &str) -> Result<MethodInfo> {
        Ok(MethodInfo {
            is_public: true,
            params: self.params.clone(),
        })
    }
}

/// Finds `function <method>(` in PHP source. Method names compare case-insensitively.
fn scan_method(source: &str, method: &str) -> Option<MethodInfo> {
    let mut offset = 0;
    while let Some(found) = source[offset..].find("function") {
        let start = offset + found;
        offset = start + "function".len();
        let rest = source[offset..].trim_start().trim_start_matches('&').trim_start();
        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if !rest[..name_len].eq_ignore_ascii_case(method) {
            continue;
        }
        let after_name = rest[name_len..].trim_start();
        let Some(params_src) = after_name.strip_prefix('(') else {
            continue;
        };
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let modifiers = &source[line_start..start];
        let is_public = !(modifiers.contains("private") || modifiers.contains("protected"));
        return Some(MethodInfo {
            is_public,
            params: parameter_names(params_src),
        });
    }
    None
}

/// Collects `$name` tokens from a parameter list, splitting on top-level commas
/// and stopping at the closing parenthesis.
fn parameter_names(params_src: &str) -> Vec<String> {
    let mut depth = 0usize;
    let mut current = String::new();
    let mut segments = Vec::new();
    for c in params_src.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' if depth == 0 => break,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    segments.push(current);
    segments
        .iter()
        .filter_map(|segment| {
            let dollar = segment.find('$')?;
            let name: String = segment[dollar + 1..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

/// Convenience for callers that only hold a path to the code directory.
pub fn inspector_for(code_dir: &Path, target_params: Option<&str>) -> Box<dyn MethodInspector> {
    match target_params {
        Some(list) => Box::new(FixedParams::parse(list)),
        None => Box::new(SourceInspector::new(code_dir)),
    }
}
