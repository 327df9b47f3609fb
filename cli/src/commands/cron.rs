//! # magescaff Cron Command
//!
//! File: cli/src/commands/cron.rs
//!
//! ## Overview
//!
//! Implements `magescaff cron`: schedules a job in `etc/crontab.xml` and writes
//! the job class (under the module's `Cron` folder) with an empty method to run.
//!
//! ## Usage
//!
//! ```bash
//! magescaff cron --module Acme_Blog --name acme_blog_cleanup --instance Cleanup
//! magescaff cron --module Acme_Blog --group index --name acme_blog_reindex \
//!     --instance Index/Posts --method reindex --schedule '0 3 * * *'
//! ```
//!
use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::config_file::create_configuration;
use crate::scaffold::php::{is_identifier, PhpClass, PhpFunction};
use crate::scaffold::ScaffoldContext;
use crate::xml::{ContentFragment, FragmentNode};

#[derive(Parser, Debug)]
#[command(about = "Create a cron job and schedule it in crontab.xml")]
pub struct CronArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Cron group id.
    #[arg(long, short, default_value = "default")]
    group: Option<String>,

    /// Job name.
    #[arg(long, short)]
    name: Option<String>,

    /// Job class below the module's `Cron` folder, e.g. `Index/Posts`.
    #[arg(long, short)]
    instance: Option<String>,

    /// Method called on the job class.
    #[arg(long, default_value = "execute")]
    method: Option<String>,

    /// Cron expression.
    #[arg(long, short, default_value = "* * * * *")]
    schedule: Option<String>,
}

pub fn handle_cron(ctx: &ScaffoldContext, args: CronArgs) -> Result<()> {
    info!(
        "Handling cron command (Module: {:?}, Group: {:?}, Name: {:?})",
        args.module, args.group, args.name
    );
    run_step("create cron job", || {
        let module = ctx.module(args.module.as_deref())?;
        let group = required(&args.group, "Invalid cron group!")?;
        let name = required(&args.name, "Invalid cron name!")?;
        let instance = required(&args.instance, "Invalid cron instance!")?;
        let method = required(&args.method, "Invalid cron method!")?;
        let schedule = required(&args.schedule, "Invalid cron schedule!")?;
        if !is_identifier(method) {
            return Err(ScaffoldError::invalid("Invalid cron method!").into());
        }
        let (class_name, file) = module
            .class_in("Cron", instance)
            .ok_or_else(|| ScaffoldError::invalid("Invalid cron instance!"))?;

        let content = ContentFragment::single(
            FragmentNode::new("group").attr("id", group).child(
                FragmentNode::new("job")
                    .attr("name", name)
                    .attr("instance", class_name.fqcn())
                    .attr("method", method)
                    .child(FragmentNode::new("schedule").text(schedule)),
            ),
        );
        create_configuration(ctx, &module, "crontab.xml", None, &content)?;

        let class = PhpClass::new(&class_name).function(PhpFunction::public(method));
        ctx.write_class(&file, &class)?;
        Ok(())
    });
    Ok(())
}
