//! # magescaff Full Route Command
//!
//! File: cli/src/commands/route_full.rs
//!
//! ## Overview
//!
//! Implements `magescaff route-full`, which wires up a working page in one go:
//!
//! 1. an `Index/Index` controller accepting GET requests,
//! 2. the route in `routes.xml` (router `standard` or `admin` by area),
//! 3. the layout handle `<route id>_index_index`.
//!
//! Each step runs on its own: a failure is printed and the next step still runs.
//!
//! ## Usage
//!
//! ```bash
//! magescaff route-full --module Acme_Blog --route-id blog --front-name blog
//! ```
//!
use clap::Parser;
use tracing::info;

use super::controller::{create_controller, HttpMethod};
use super::handle::create_handle;
use super::route::{create_route, route_area};
use super::{required, run_step};
use crate::core::error::Result;
use crate::scaffold::area::Area;
use crate::scaffold::ScaffoldContext;
use crate::xml::ContentFragment;

#[derive(Parser, Debug)]
#[command(about = "Create a controller, route and layout handle together")]
pub struct RouteFullArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Route area: frontend or adminhtml.
    #[arg(long, short, default_value = "frontend")]
    area: String,

    /// Route id; also the prefix of the layout handle.
    #[arg(long)]
    route_id: Option<String>,

    /// URL front name.
    #[arg(long)]
    front_name: Option<String>,
}

fn default_router(area: Area) -> &'static str {
    match area {
        Area::Adminhtml => "admin",
        _ => "standard",
    }
}

pub fn handle_route_full(ctx: &ScaffoldContext, args: RouteFullArgs) -> Result<()> {
    info!(
        "Handling full route command (Module: {:?}, Area: {}, Route: {:?})",
        args.module, args.area, args.route_id
    );
    let mut inputs = None;
    run_step("validate full route", || {
        let module = ctx.module(args.module.as_deref())?;
        let route_id = required(&args.route_id, "Invalid route id!")?;
        let area = route_area(&args.area)?;
        let front_name = required(&args.front_name, "Invalid route front name!")?;
        inputs = Some((module, route_id, area, front_name));
        Ok(())
    });
    let Some((module, route_id, area, front_name)) = inputs else {
        return Ok(());
    };

    run_step("create index controller", || {
        create_controller(ctx, &module, "Index/Index", area, &[HttpMethod::Get])
    });
    run_step("create route", || {
        create_route(
            ctx,
            &module,
            area,
            Some(default_router(area)),
            route_id,
            front_name,
        )
    });
    run_step("create layout handle", || {
        let handle = format!("{}_index_index", route_id);
        create_handle(ctx, &module, &handle, area, &ContentFragment::empty())
    });
    Ok(())
}
