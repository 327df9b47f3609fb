//! # magescaff Controller Command
//!
//! File: cli/src/commands/controller.rs
//!
//! ## Overview
//!
//! Implements `magescaff controller`, which writes an action controller class.
//! Storefront controllers live under `Controller/` and extend
//! `Magento\Framework\App\Action\Action`; admin controllers live under
//! `Controller/Adminhtml/` and extend `Magento\Backend\App\Action`. Each
//! requested HTTP method adds the matching `Http<Method>ActionInterface`.
//!
//! ## Usage
//!
//! ```bash
//! magescaff controller --module Acme_Blog --path Post/View --requests get,post
//! magescaff controller --module Acme_Blog --path Post/Edit --area adminhtml
//! ```
//!
use clap::Parser;
use tracing::{info, warn};

use super::{required, run_step};
use crate::common::ui;
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::php::ControllerClass;
use crate::scaffold::{ModuleRef, ScaffoldContext};

/// Request methods a controller can declare support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn parse(value: &str) -> Option<HttpMethod> {
        match value.trim().to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    /// Fully qualified action interface for this method.
    pub fn interface(self) -> &'static str {
        match self {
            HttpMethod::Get => "Magento\\Framework\\App\\Action\\HttpGetActionInterface",
            HttpMethod::Post => "Magento\\Framework\\App\\Action\\HttpPostActionInterface",
            HttpMethod::Put => "Magento\\Framework\\App\\Action\\HttpPutActionInterface",
            HttpMethod::Delete => "Magento\\Framework\\App\\Action\\HttpDeleteActionInterface",
        }
    }
}

/// Folder and parent class per controller area.
struct ControllerKind {
    folder: &'static str,
    parent: &'static str,
}

fn controller_kind(area: Area) -> Option<ControllerKind> {
    match area {
        Area::Frontend => Some(ControllerKind {
            folder: "Controller",
            parent: "Magento\\Framework\\App\\Action\\Action",
        }),
        Area::Adminhtml => Some(ControllerKind {
            folder: "Controller/Adminhtml",
            parent: "Magento\\Backend\\App\\Action",
        }),
        _ => None,
    }
}

fn short_name(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

#[derive(Parser, Debug)]
#[command(about = "Create an action controller class")]
pub struct ControllerArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Controller path below the controller folder, e.g. `Index/Index`.
    #[arg(long, short)]
    path: Option<String>,

    /// Controller area: frontend or adminhtml.
    #[arg(long, short, default_value = "frontend")]
    area: String,

    /// Supported request methods, comma separated (get, post, put, delete).
    #[arg(long, short, value_delimiter = ',')]
    requests: Vec<String>,
}

pub fn handle_controller(ctx: &ScaffoldContext, args: ControllerArgs) -> Result<()> {
    info!(
        "Handling controller command (Module: {:?}, Path: {:?}, Area: {})",
        args.module, args.path, args.area
    );
    run_step("create controller", || {
        let module = ctx.module(args.module.as_deref())?;
        let path = required(&args.path, "Invalid controller path!")?;
        let area = Area::parse(&args.area)
            .ok_or_else(|| ScaffoldError::invalid("Invalid controller area!"))?;
        let methods: Vec<HttpMethod> = args
            .requests
            .iter()
            .filter_map(|r| {
                let method = HttpMethod::parse(r);
                if method.is_none() {
                    warn!("Ignoring unknown request method '{}'", r);
                }
                method
            })
            .collect();
        create_controller(ctx, &module, path, area, &methods)
    });
    Ok(())
}

pub fn create_controller(
    ctx: &ScaffoldContext,
    module: &ModuleRef,
    path: &str,
    area: Area,
    methods: &[HttpMethod],
) -> Result<()> {
    let kind =
        controller_kind(area).ok_or_else(|| ScaffoldError::invalid("Invalid controller area!"))?;
    let (class_name, file) = module
        .class_in(kind.folder, path)
        .ok_or_else(|| ScaffoldError::invalid("Invalid controller path!"))?;

    let mut imports = vec![kind.parent.to_string()];
    let mut interfaces = Vec::new();
    for method in methods {
        let interface = short_name(method.interface()).to_string();
        if !interfaces.contains(&interface) {
            imports.push(method.interface().to_string());
            interfaces.push(interface);
        }
    }
    let controller = ControllerClass {
        namespace: class_name.namespace,
        imports,
        name: class_name.short,
        parent: short_name(kind.parent).to_string(),
        interfaces,
    };

    if file.exists() {
        ui::file_exists(&ctx.display(&file));
        return Ok(());
    }
    let php = controller.render(&ctx.stamper)?;
    ctx.write_new_file(&file, &php)?;
    Ok(())
}
