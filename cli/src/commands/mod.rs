//! # magescaff Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the scaffold subcommands of the magescaff CLI. Each
//! submodule defines an `Args` struct parsed by `clap` and a
//! `handle_<name>(ctx, args)` function called from `main.rs`.
//!
//! ## Architecture
//!
//! A handler does its work in one or more *steps*. `run_step` executes a step
//! and turns its failure into a printed line instead of an error, so that:
//!
//! - invalid or missing input prints the exact message (e.g. `Invalid route id!`)
//!   and the process still exits successfully;
//! - filesystem and XML failures print the error chain and abandon that step only;
//! - composite commands (`route-full`) keep going with their remaining steps.
//!
//! ## Commands
//!
//! - `module`: new module skeleton (`etc/module.xml`, `registration.php`)
//! - `config`: generic configuration file creation and fragment merge
//! - `route`, `route-full`: routing table entries, optionally with controller and layout
//! - `handle`: layout handle files
//! - `controller`, `observer`, `plugin`, `cron`, `command`, `helper`, `patch`, `models`: class skeletons
//!   plus the configuration entries that wire them up
//!
pub mod command;
pub mod config;
pub mod controller;
pub mod cron;
pub mod handle;
pub mod helper;
pub mod models;
pub mod module;
pub mod observer;
pub mod patch;
pub mod plugin;
pub mod route;
pub mod route_full;

use crate::common::ui;
use crate::core::error::{Result, ScaffoldError};
use tracing::{debug, error};

/// Runs one scaffold step and reports its failure to the user.
///
/// Returns `true` if the step succeeded.
pub fn run_step(label: &str, step: impl FnOnce() -> Result<()>) -> bool {
    debug!("Running step: {}", label);
    match step() {
        Ok(()) => true,
        Err(e) => {
            match e.downcast_ref::<ScaffoldError>() {
                Some(user_error) if user_error.is_user_input() => ui::error(user_error),
                _ => {
                    error!("Step '{}' failed: {:?}", label, e);
                    ui::error(format!("{:#}", e));
                }
            }
            false
        }
    }
}

/// Returns the trimmed value, or `InvalidInput(message)` if it is missing or blank.
pub fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ScaffoldError::invalid(message).into()),
    }
}

/// Upper-cases the first character (`blog` -> `Blog`).
pub fn first_upper(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
