//! # magescaff Template Stamper
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module stamps out PHP source files from the Tera templates embedded in
//! the binary (`cli/templates/*.tera`). It knows nothing about classes or
//! modules itself: callers serialize a context struct and pick a template.
//!
//! ## Architecture
//!
//! - `Stamper` owns a `Tera` instance with every template registered at
//!   construction time. Autoescaping is disabled; the output is PHP, not HTML.
//! - `render` turns any `Serialize` value into a Tera context and renders.
//! - `indent_each_line` and `tidy` post-process rendered fragments so that
//!   nested functions line up inside a class body and optional template
//!   sections do not leave runs of blank lines behind.
//!
//! ## Examples
//!
//! ```rust
//! let stamper = Stamper::new()?;
//! let php = stamper.render(REGISTRATION_TEMPLATE, &Registration { module_name: "Acme_Blog" })?;
//! ```
//!
use crate::core::error::{Result, ScaffoldError};
use anyhow::Context;
use serde::Serialize;
use tera::Tera;
use tracing::{debug, trace};

pub const CLASS_TEMPLATE: &str = "class.php";
pub const FUNCTION_TEMPLATE: &str = "function.php";
pub const CONTROLLER_TEMPLATE: &str = "controller.php";
pub const REGISTRATION_TEMPLATE: &str = "registration.php";

/// Renders the embedded PHP templates.
#[derive(Debug)]
pub struct Stamper {
    tera: Tera,
}

impl Stamper {
    /// Builds a stamper with every embedded template registered.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::Template` if an embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (CLASS_TEMPLATE, include_str!("../../templates/class.php.tera")),
            (FUNCTION_TEMPLATE, include_str!("../../templates/function.php.tera")),
            (CONTROLLER_TEMPLATE, include_str!("../../templates/controller.php.tera")),
            (REGISTRATION_TEMPLATE, include_str!("../../templates/registration.php.tera")),
        ])
        .map_err(ScaffoldError::from)
        .context("Failed to register embedded templates")?;
        debug!("Registered {} templates", tera.get_template_names().count());
        Ok(Stamper { tera })
    }

    /// Renders `template` with the serialized fields of `value` as its context.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::Template` if the context cannot be built or rendering fails.
    pub fn render<T: Serialize>(&self, template: &str, value: &T) -> Result<String> {
        trace!("Rendering template '{}'", template);
        let context = tera::Context::from_serialize(value).map_err(ScaffoldError::from)?;
        let rendered = self
            .tera
            .render(template, &context)
            .map_err(ScaffoldError::from)
            .with_context(|| format!("Tera rendering failed for template '{}'", template))?;
        Ok(rendered)
    }
}

/// Prefixes every non-empty line with four spaces.
pub fn indent_each_line(code: &str) -> String {
    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("    {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalizes rendered PHP.
///
/// Trailing whitespace is stripped, runs of blank lines collapse to one, blank
/// lines directly after an opening brace or directly before a closing brace are
/// removed, and the result ends with a single newline.
pub fn tidy(code: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in code.lines().map(str::trim_end) {
        let blank = line.is_empty();
        match lines.last() {
            Some(previous) if blank && (previous.is_empty() || previous.ends_with('{')) => continue,
            _ => {}
        }
        if !blank && line.trim_start().starts_with('}') {
            while lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
