//! # magescaff Route Command
//!
//! File: cli/src/commands/route.rs
//!
//! ## Overview
//!
//! Implements `magescaff route`, which adds
//! `<router id><route id frontName><module name/></route></router>` to the
//! module's `etc/<area>/routes.xml`, creating the file if needed. Routes that
//! share a router end up under the same `<router>` element.
//!
//! ## Usage
//!
//! ```bash
//! magescaff route --module Acme_Blog --route-id blog --front-name blog
//! magescaff route --module Acme_Blog --area adminhtml --route-id blog --front-name blog
//! ```
//!
//! Without `--router-id` the storefront uses `standard` and the admin uses `admin`.
//!
use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::config_file::create_configuration;
use crate::scaffold::{ModuleRef, ScaffoldContext};
use crate::xml::{ContentFragment, FragmentNode};

const FRONT_ROUTERS: &[&str] = &["robots", "urlrewrite", "standard", "cms", "default"];
const ADMIN_ROUTERS: &[&str] = &["admin", "default"];

#[derive(Parser, Debug)]
#[command(about = "Add a route to routes.xml")]
pub struct RouteArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Route area: frontend or adminhtml.
    #[arg(long, short, default_value = "frontend")]
    area: String,

    /// Router id (defaults: standard for frontend, admin for adminhtml).
    #[arg(long)]
    router_id: Option<String>,

    /// Route id.
    #[arg(long)]
    route_id: Option<String>,

    /// URL front name.
    #[arg(long)]
    front_name: Option<String>,
}

pub fn handle_route(ctx: &ScaffoldContext, args: RouteArgs) -> Result<()> {
    info!(
        "Handling route command (Module: {:?}, Area: {}, Route: {:?})",
        args.module, args.area, args.route_id
    );
    run_step("create route", || {
        let module = ctx.module(args.module.as_deref())?;
        let route_id = required(&args.route_id, "Invalid route id!")?;
        let front_name = required(&args.front_name, "Invalid route front name!")?;
        let area = route_area(&args.area)?;
        create_route(
            ctx,
            &module,
            area,
            args.router_id.as_deref(),
            route_id,
            front_name,
        )
    });
    Ok(())
}

/// Parses a route area; only the storefront and the admin have routers.
pub fn route_area(value: &str) -> Result<Area> {
    match Area::parse(value) {
        Some(area @ (Area::Frontend | Area::Adminhtml)) => Ok(area),
        _ => Err(ScaffoldError::invalid("Invalid route area!").into()),
    }
}

/// Resolves the router id for `area`, falling back to the area's default router.
pub fn router_for(area: Area, router_id: Option<&str>) -> Result<&str> {
    let (known, default) = match area {
        Area::Adminhtml => (ADMIN_ROUTERS, "admin"),
        _ => (FRONT_ROUTERS, "standard"),
    };
    match router_id.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(default),
        Some(router) if known.contains(&router) => Ok(router),
        Some(_) => Err(ScaffoldError::invalid("Invalid router id!").into()),
    }
}

pub fn route_fragment(module: &ModuleRef, router: &str, route_id: &str, front_name: &str) -> ContentFragment {
    ContentFragment::single(
        FragmentNode::new("router").attr("id", router).child(
            FragmentNode::new("route")
                .attr("id", route_id)
                .attr("frontName", front_name)
                .child(FragmentNode::new("module").attr("name", &module.name)),
        ),
    )
}

pub fn create_route(
    ctx: &ScaffoldContext,
    module: &ModuleRef,
    area: Area,
    router_id: Option<&str>,
    route_id: &str,
    front_name: &str,
) -> Result<()> {
    let router = router_for(area, router_id)?;
    let content = route_fragment(module, router, route_id, front_name);
    create_configuration(ctx, module, "routes.xml", Some(area), &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_route_args() {
        let args = RouteArgs::try_parse_from([
            "route",
            "--module",
            "Acme_Blog",
            "--route-id",
            "blog",
            "--front-name",
            "news",
        ])
        .unwrap();
        assert_eq!(args.area, "frontend");
        assert_eq!(args.route_id.as_deref(), Some("blog"));
        assert_eq!(args.front_name.as_deref(), Some("news"));
        assert!(args.router_id.is_none());
    }

    #[test]
    fn test_router_defaults_and_validation() {
        assert_eq!(router_for(Area::Frontend, None).unwrap(), "standard");
        assert_eq!(router_for(Area::Adminhtml, Some(" ")).unwrap(), "admin");
        assert_eq!(router_for(Area::Frontend, Some("cms")).unwrap(), "cms");
        assert_eq!(
            router_for(Area::Adminhtml, Some("standard")).unwrap_err().to_string(),
            "Invalid router id!"
        );
    }

    #[test]
    fn test_route_area() {
        assert_eq!(route_area("adminhtml").unwrap(), Area::Adminhtml);
        assert_eq!(
            route_area("global").unwrap_err().to_string(),
            "Invalid route area!"
        );
        assert!(route_area("base").is_err());
    }
}
