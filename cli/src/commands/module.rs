//! # magescaff Module Command
//!
//! File: cli/src/commands/module.rs
//!
//! ## Overview
//!
//! Implements `magescaff module`, which creates a new, empty module in the code
//! directory: the `Vendor/Module` directory, `etc/module.xml` with optional
//! load-order dependencies, and `registration.php`.
//!
//! ## Usage
//!
//! ```bash
//! magescaff module --module Acme_Blog
//! magescaff module --module acme_blog --deps Magento_Catalog,Magento_Store
//! ```
//!
//! Both parts of the name get an upper-case first letter, so `acme_blog`
//! creates `Acme/Blog` registered as `Acme_Blog`.
//!
use clap::Parser;
use serde::Serialize;
use tracing::info;

use super::{first_upper, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::core::templating::REGISTRATION_TEMPLATE;
use crate::scaffold::catalog::Catalog;
use crate::scaffold::config_file::{config_path, generate_xml};
use crate::scaffold::{area::Area, ModuleRef, ScaffoldContext};
use crate::xml::{self, FragmentBuilder, FragmentNode};

#[derive(Parser, Debug)]
#[command(about = "Create a new module skeleton in the code directory")]
pub struct ModuleArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Modules to load before this one, comma separated (e.g. `Magento_Catalog,Magento_Store`).
    #[arg(long, value_delimiter = ',')]
    deps: Vec<String>,
}

#[derive(Serialize)]
struct Registration<'a> {
    module_name: &'a str,
}

pub fn handle_module(ctx: &ScaffoldContext, args: ModuleArgs) -> Result<()> {
    info!("Handling module command (Module: {:?}, Deps: {:?})", args.module, args.deps);
    run_step("create module", || create_module(ctx, &args));
    Ok(())
}

/// `^[A-Za-z]+_[A-Za-z]+$`
fn is_valid_module_name(name: &str) -> bool {
    match name.split_once('_') {
        Some((vendor, module)) => {
            let letters = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
            letters(vendor) && letters(module)
        }
        None => false,
    }
}

fn create_module(ctx: &ScaffoldContext, args: &ModuleArgs) -> Result<()> {
    let input = args.module.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err(ScaffoldError::ModuleMissing.into());
    }
    if !is_valid_module_name(input) {
        return Err(ScaffoldError::invalid("Module name is not valid!").into());
    }
    let name = input.split('_').map(first_upper).collect::<Vec<_>>().join("_");
    let module = ModuleRef::from_name(&ctx.code_dir, &name)
        .ok_or_else(|| ScaffoldError::invalid("Module name is not valid!"))?;
    if module.dir.exists() {
        return Err(ScaffoldError::invalid("Module already exist in code directory!").into());
    }

    ctx.ensure_dir(&module.dir)?;
    write_module_xml(ctx, &module, &args.deps)?;
    let registration = ctx.stamper.render(
        REGISTRATION_TEMPLATE,
        &Registration {
            module_name: &module.name,
        },
    )?;
    ctx.write_new_file(&module.dir.join("registration.php"), &registration)?;
    Ok(())
}

fn write_module_xml(ctx: &ScaffoldContext, module: &ModuleRef, deps: &[String]) -> Result<()> {
    let catalog = Catalog::builtin();
    let entry = catalog.select("module.xml", Some(Area::Global))?;
    let sequence: Vec<FragmentNode> = deps
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| FragmentNode::item().attr("name", d))
        .collect();
    let mut declaration = FragmentNode::new("module").attr("name", &module.name);
    if !sequence.is_empty() {
        declaration = declaration.child(FragmentNode::new("sequence").items(sequence));
    }
    let root = xml::schema_root(&entry.root_node, &entry.urn)
        .with_child(FragmentBuilder::new("module").render(&declaration));
    generate_xml(ctx, &config_path(module, Area::Global, "module.xml"), root)?;
    Ok(())
}
