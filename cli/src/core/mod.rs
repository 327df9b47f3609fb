//! # magescaff Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by every command:
//! configuration, error types and the template stamper.
//!
//! ## Architecture
//!
//! - `config`: Layered configuration loading, merging, and validation
//! - `error`: `ScaffoldError` and the crate-wide `Result` alias
//! - `templating`: Tera-backed rendering of PHP skeleton files
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, ScaffoldError}; // For error handling
//! use crate::core::templating::Stamper; // For rendering PHP skeletons
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
