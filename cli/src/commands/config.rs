//! # magescaff Config Command
//!
//! File: cli/src/commands/config.rs
//!
//! ## Overview
//!
//! Implements `magescaff config`, the generic "create configuration file"
//! operation. The file kind is looked up in the schema catalog, the file is
//! created with a schema-declaring root element if it does not exist, and an
//! optional XML snippet is merged into it.
//!
//! ## Usage
//!
//! ```bash
//! # Create an empty etc/acl.xml
//! magescaff config --module Acme_Blog --file acl.xml
//!
//! # Merge a snippet into etc/adminhtml/di.xml
//! magescaff config --module Acme_Blog --file di.xml --area adminhtml --content plugin.xml
//! ```
//!
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::config_file::create_configuration;
use crate::scaffold::ScaffoldContext;
use crate::xml::ContentFragment;

#[derive(Parser, Debug)]
#[command(about = "Create a module configuration file and merge content into it")]
pub struct ConfigArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Configuration file name, e.g. `di.xml`.
    #[arg(long, short)]
    file: Option<String>,

    /// Area of the file (global, frontend, adminhtml, webapi_rest, webapi_soap, graphql, crontab).
    #[arg(long, short, default_value = "global")]
    area: String,

    /// XML snippet file whose root element is merged into the configuration file.
    #[arg(long, short)]
    content: Option<PathBuf>,
}

pub fn handle_config(ctx: &ScaffoldContext, args: ConfigArgs) -> Result<()> {
    info!(
        "Handling config command (Module: {:?}, File: {:?}, Area: {})",
        args.module, args.file, args.area
    );
    run_step("create configuration file", || {
        let module = ctx.module(args.module.as_deref())?;
        let file = required(&args.file, "Invalid configuration file!")?;
        let area = Area::parse(&args.area)
            .ok_or_else(|| ScaffoldError::invalid("Invalid configuration file area!"))?;
        let content = match &args.content {
            Some(path) => ContentFragment::from_file(path)?,
            None => ContentFragment::empty(),
        };
        create_configuration(ctx, &module, file, Some(area), &content)?;
        Ok(())
    });
    Ok(())
}
