//! # magescaff Layout Handle Command
//!
//! File: cli/src/commands/handle.rs
//!
//! ## Overview
//!
//! Implements `magescaff handle`, which creates
//! `view/<area>/layout/<handle>.xml` with a `<page>` root declaring the page
//! configuration schema, then merges an optional XML snippet into it.
//!
//! ## Usage
//!
//! ```bash
//! magescaff handle --module Acme_Blog --name blog_index_index
//! magescaff handle --module Acme_Blog --name blog_post_view --content blocks.xml
//! ```
//!
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::config_file::{fill, generate_xml, layout_path, PAGE_CONFIGURATION_URN};
use crate::scaffold::{ModuleRef, ScaffoldContext};
use crate::xml::{self, ContentFragment, FragmentBuilder};

#[derive(Parser, Debug)]
#[command(about = "Create a layout handle file")]
pub struct HandleArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Handle name, e.g. `blog_index_index`.
    #[arg(long, short)]
    name: Option<String>,

    /// Handle area: frontend, adminhtml or base.
    #[arg(long, short, default_value = "frontend")]
    area: String,

    /// XML snippet file merged into the `<page>` root.
    #[arg(long, short)]
    content: Option<PathBuf>,
}

pub fn handle_handle(ctx: &ScaffoldContext, args: HandleArgs) -> Result<()> {
    info!(
        "Handling layout handle command (Module: {:?}, Name: {:?}, Area: {})",
        args.module, args.name, args.area
    );
    run_step("create layout handle", || {
        let module = ctx.module(args.module.as_deref())?;
        let name = required(&args.name, "Invalid handle name!")?;
        let area = handle_area(&args.area)?;
        let content = match &args.content {
            Some(path) => ContentFragment::from_file(path)?,
            None => ContentFragment::empty(),
        };
        create_handle(ctx, &module, name, area, &content)
    });
    Ok(())
}

pub fn handle_area(value: &str) -> Result<Area> {
    match Area::parse(value) {
        Some(area @ (Area::Frontend | Area::Adminhtml | Area::Base)) => Ok(area),
        _ => Err(ScaffoldError::invalid("Invalid handle area!").into()),
    }
}

pub fn create_handle(
    ctx: &ScaffoldContext,
    module: &ModuleRef,
    name: &str,
    area: Area,
    content: &ContentFragment,
) -> Result<()> {
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(ScaffoldError::invalid("Invalid handle name!").into());
    }
    let path = layout_path(module, area, name);
    generate_xml(ctx, &path, xml::schema_root("page", PAGE_CONFIGURATION_URN))?;
    fill(ctx, &path, content, FragmentBuilder::default())?;
    Ok(())
}
