//! # magescaff Patch Command
//!
//! File: cli/src/commands/patch.rs
//!
//! ## Overview
//!
//! Implements `magescaff patch`, which writes a data or schema patch class under
//! `Setup/Patch/Data` or `Setup/Patch/Schema`. The constructor receives the setup
//! object matching the patch type; `--revertible` adds `PatchRevertableInterface`
//! and an empty `revert()`.
//!
//! ## Usage
//!
//! ```bash
//! magescaff patch --module Acme_Blog --name AddDefaultPosts --type data
//! magescaff patch --module Acme_Blog --name AddPostIndex --type schema --revertible
//! ```
//!
use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::php::{ClassName, PhpClass, PhpFunction};
use crate::scaffold::ScaffoldContext;

const REVERTABLE_INTERFACE: &str = "Magento\\Framework\\Setup\\Patch\\PatchRevertableInterface";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchType {
    Data,
    Schema,
}

/// What a patch type contributes to the generated class.
struct PatchKind {
    folder: &'static str,
    interface: &'static str,
    setup: &'static str,
    property: &'static str,
}

impl PatchType {
    pub fn parse(value: &str) -> Option<PatchType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "data" => Some(PatchType::Data),
            "schema" => Some(PatchType::Schema),
            _ => None,
        }
    }

    fn kind(self) -> PatchKind {
        match self {
            PatchType::Data => PatchKind {
                folder: "Setup/Patch/Data",
                interface: "Magento\\Framework\\Setup\\Patch\\DataPatchInterface",
                setup: "Magento\\Framework\\Setup\\ModuleDataSetupInterface",
                property: "moduleDataSetup",
            },
            PatchType::Schema => PatchKind {
                folder: "Setup/Patch/Schema",
                interface: "Magento\\Framework\\Setup\\Patch\\SchemaPatchInterface",
                setup: "Magento\\Framework\\Setup\\SchemaSetupInterface",
                property: "schemaSetup",
            },
        }
    }
}

fn short(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

#[derive(Parser, Debug)]
#[command(about = "Create a data or schema patch class")]
pub struct PatchArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Patch class name.
    #[arg(long, short)]
    name: Option<String>,

    /// Patch type: data or schema.
    #[arg(long = "type", short)]
    patch_type: Option<String>,

    /// Implement `PatchRevertableInterface`.
    #[arg(long)]
    revertible: bool,
}

pub fn handle_patch(ctx: &ScaffoldContext, args: PatchArgs) -> Result<()> {
    info!(
        "Handling patch command (Module: {:?}, Name: {:?}, Type: {:?})",
        args.module, args.name, args.patch_type
    );
    run_step("create patch", || {
        let module = ctx.module(args.module.as_deref())?;
        let name = required(&args.name, "Invalid patch name!")?;
        let patch_type = args
            .patch_type
            .as_deref()
            .and_then(PatchType::parse)
            .ok_or_else(|| ScaffoldError::invalid("Invalid patch type!"))?;
        let (class_name, file) = module
            .class_in(patch_type.kind().folder, name)
            .ok_or_else(|| ScaffoldError::invalid("Invalid patch name!"))?;
        ctx.write_class(&file, &patch_class(&class_name, patch_type, args.revertible))?;
        Ok(())
    });
    Ok(())
}

fn patch_class(class_name: &ClassName, patch_type: PatchType, revertible: bool) -> PhpClass {
    let kind = patch_type.kind();
    let mut class = PhpClass::new(class_name)
        .import(kind.setup)
        .import(kind.interface)
        .implements(short(kind.interface))
        .property(format!("protected ${};", kind.property))
        .function(
            PhpFunction::public("__construct")
                .arg(format!("{} ${}", short(kind.setup), kind.property))
                .line(format!("$this->{0} = ${0};", kind.property)),
        )
        .function(PhpFunction::public("apply"))
        .function(PhpFunction::new("public static", "getDependencies").line("return [];"))
        .function(PhpFunction::public("getAliases").line("return [];"));
    if revertible {
        class = class
            .import(REVERTABLE_INTERFACE)
            .implements(short(REVERTABLE_INTERFACE))
            .function(PhpFunction::public("revert"));
    }
    class
}
