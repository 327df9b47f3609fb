//! # magescaff Filesystem Utilities Module (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups the filesystem helpers shared by the XML layer and the scaffold
//! operations. Only whole-file I/O is needed: every scaffold step reads a file,
//! transforms it in memory and writes it back.
//!
//! - **`io`**: directory creation, whole-file reads and writes with error context.
//!
pub mod io;
