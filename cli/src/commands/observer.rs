//! # magescaff Observer Command
//!
//! File: cli/src/commands/observer.rs
//!
//! ## Overview
//!
//! Implements `magescaff observer`: binds an observer to an event in
//! `events.xml` and writes the observer class (under the module's `Observer`
//! folder) implementing `ObserverInterface`.
//!
//! ## Usage
//!
//! ```bash
//! magescaff observer --module Acme_Blog --event checkout_submit_all_after \
//!     --name acme_blog_order_placed --instance Order/Placed
//! magescaff observer --module Acme_Blog --event customer_login --name acme_login \
//!     --instance Login --area frontend --disabled
//! ```
//!
use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::config_file::create_configuration;
use crate::scaffold::php::{PhpClass, PhpFunction};
use crate::scaffold::ScaffoldContext;
use crate::xml::{ContentFragment, FragmentNode};

#[derive(Parser, Debug)]
#[command(about = "Create an event observer and bind it in events.xml")]
pub struct ObserverArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Event to observe.
    #[arg(long, short)]
    event: Option<String>,

    /// Observer name, unique per event.
    #[arg(long, short)]
    name: Option<String>,

    /// Observer class below the module's `Observer` folder, e.g. `Order/Placed`.
    #[arg(long, short)]
    instance: Option<String>,

    /// Area of events.xml.
    #[arg(long, short, default_value = "global")]
    area: String,

    /// Declare the observer disabled.
    #[arg(long)]
    disabled: bool,

    /// Declare the observer shared.
    #[arg(long)]
    shared: bool,
}

pub fn handle_observer(ctx: &ScaffoldContext, args: ObserverArgs) -> Result<()> {
    info!(
        "Handling observer command (Module: {:?}, Event: {:?}, Name: {:?})",
        args.module, args.event, args.name
    );
    run_step("create observer", || {
        let module = ctx.module(args.module.as_deref())?;
        let event = required(&args.event, "Invalid event name!")?;
        let name = required(&args.name, "Invalid observer name!")?;
        let instance = required(&args.instance, "Invalid observer instance!")?;
        let (class_name, file) = module
            .class_in("Observer", instance)
            .ok_or_else(|| ScaffoldError::invalid("Invalid observer instance!"))?;
        let area = Area::parse(&args.area)
            .ok_or_else(|| ScaffoldError::invalid("Invalid configuration file area!"))?;

        let observer = FragmentNode::new("observer")
            .attr("name", name)
            .attr("instance", class_name.fqcn())
            .attr_opt("disabled", args.disabled.then_some("true"))
            .attr_opt("shared", args.shared.then_some("true"));
        let content =
            ContentFragment::single(FragmentNode::new("event").attr("name", event).child(observer));
        create_configuration(ctx, &module, "events.xml", Some(area), &content)?;

        let class = PhpClass::new(&class_name)
            .import("Magento\\Framework\\Event\\ObserverInterface")
            .import("Magento\\Framework\\Event\\Observer")
            .implements("ObserverInterface")
            .function(
                PhpFunction::public("execute")
                    .doc("@param Observer $observer")
                    .doc("@return void")
                    .arg("Observer $observer")
                    .line("// Observer execution code..."),
            );
        ctx.write_class(&file, &class)?;
        Ok(())
    });
    Ok(())
}
