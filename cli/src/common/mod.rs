//! # magescaff Common Utilities Module
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used across commands that do not belong to the XML layer or
//! the scaffold orchestration:
//!
//! - **`fs`**: filesystem I/O with contextual errors.
//! - **`ui`**: the user-facing status lines printed for each scaffold outcome.
//!
pub mod fs;
pub mod ui;
