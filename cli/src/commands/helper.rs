//! `magescaff helper`: writes a helper class under the module's `Helper` folder.
use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::php::PhpClass;
use crate::scaffold::ScaffoldContext;

const ABSTRACT_HELPER: &str = "Magento\\Framework\\App\\Helper\\AbstractHelper";

#[derive(Parser, Debug)]
#[command(about = "Create a helper class")]
pub struct HelperArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Helper class below the module's `Helper` folder.
    #[arg(long, short, default_value = "Data")]
    class: Option<String>,
}

pub fn handle_helper(ctx: &ScaffoldContext, args: HelperArgs) -> Result<()> {
    info!(
        "Handling helper command (Module: {:?}, Class: {:?})",
        args.module, args.class
    );
    run_step("create helper", || {
        let module = ctx.module(args.module.as_deref())?;
        let class = required(&args.class, "Invalid helper class!")?;
        let (class_name, file) = module
            .class_in("Helper", class)
            .ok_or_else(|| ScaffoldError::invalid("Invalid helper class!"))?;
        let helper = PhpClass::new(&class_name)
            .import(ABSTRACT_HELPER)
            .extends("AbstractHelper");
        ctx.write_class(&file, &helper)?;
        Ok(())
    });
    Ok(())
}
