//! # magescaff UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Every scaffold outcome is reported to the user as exactly one human-readable
//! line. This module owns those lines so that the wording is identical across
//! commands. Status lines go to stdout, failures to stderr. Diagnostic logging
//! (`tracing`) is separate and goes to stderr only when enabled with `-v`.
//!
//! Paths passed in are already shortened for display by the caller
//! (see `ScaffoldContext::display`).
//!
//! ```rust
//! ui::file_created(&ctx.display(&path));
//! ui::content_not_added(&ctx.display(&path), "Failed to write to file ...");
//! ```
//!
use std::fmt::Display;

/// Prints a status line to stdout.
pub fn status(message: impl Display) {
    println!("{}", message);
}

/// Prints an error line to stderr.
pub fn error(message: impl Display) {
    eprintln!("{}", message);
}

pub fn directory_created(path: &str) {
    status(format!("Directory {} is successfully created!", path));
}

pub fn file_created(path: &str) {
    status(format!("File {} is successfully created!", path));
}

pub fn file_exists(path: &str) {
    status(format!("Skipping file creation. File {} already exist!", path));
}

pub fn xml_exists(path: &str) {
    status(format!("Skipping XML generation. File {} already exists!", path));
}

pub fn content_added(path: &str) {
    status(format!("Content is added to the {}!", path));
}

pub fn no_additional_content(path: &str) {
    status(format!("No additional content is added to the {}!", path));
}

/// Reports a failed merge followed by the underlying reason.
pub fn content_not_added(path: &str, reason: impl Display) {
    error(content_not_added_line(path));
    error(reason);
}

fn content_not_added_line(path: &str) -> String {
    format!("Content can't be added to the {}!", path)
}
