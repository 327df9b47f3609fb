//! # magescaff Models Command
//!
//! File: cli/src/commands/models.rs
//!
//! ## Overview
//!
//! Implements `magescaff models`, which writes the CRUD triple for a table:
//!
//! - `Model/<Name>.php` extending `AbstractModel` (or `AbstractExtensibleModel`),
//! - `Model/ResourceModel/<Name>.php` extending `AbstractDb`,
//! - `Model/ResourceModel/<Name>/Collection.php` extending `AbstractCollection`.
//!
//! `--identity` adds `IdentityInterface` with a `CACHE_TAG` constant and
//! `getIdentities()`. Each file is skipped on its own if it already exists.
//!
//! ## Usage
//!
//! ```bash
//! magescaff models --module Acme_Blog --name Post --table acme_blog_post --id-field post_id
//! magescaff models --module Acme_Blog --name Tag --table acme_blog_tag --id-field tag_id --identity
//! ```
//!
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::php::{is_identifier, ClassName, PhpClass, PhpFunction};
use crate::scaffold::{ModuleRef, ScaffoldContext};

const MODEL_PARENT: &str = "Magento\\Framework\\Model\\AbstractModel";
const MODEL_PARENT_EXTENSIBLE: &str = "Magento\\Framework\\Model\\AbstractExtensibleModel";
const IDENTITY_INTERFACE: &str = "Magento\\Framework\\DataObject\\IdentityInterface";
const EXTENSIBLE_INTERFACE: &str = "Magento\\Framework\\Api\\ExtensibleDataInterface";
const RESOURCE_MODEL_PARENT: &str = "Magento\\Framework\\Model\\ResourceModel\\Db\\AbstractDb";
const COLLECTION_PARENT: &str =
    "Magento\\Framework\\Model\\ResourceModel\\Db\\Collection\\AbstractCollection";

#[derive(Parser, Debug)]
#[command(about = "Create model, resource model and collection classes")]
pub struct ModelsArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Model class name, e.g. `Post`.
    #[arg(long, short)]
    name: Option<String>,

    /// Database table.
    #[arg(long, short)]
    table: Option<String>,

    /// Primary key column.
    #[arg(long, short)]
    id_field: Option<String>,

    /// Extend `AbstractExtensibleModel` and implement `ExtensibleDataInterface`.
    #[arg(long)]
    extensible: bool,

    /// Implement `IdentityInterface`.
    #[arg(long)]
    identity: bool,
}

/// Validated inputs shared by the three generated classes.
struct ModelSpec<'a> {
    name: &'a str,
    table: &'a str,
    id_field: &'a str,
    extensible: bool,
    identity: bool,
}

pub fn handle_models(ctx: &ScaffoldContext, args: ModelsArgs) -> Result<()> {
    info!(
        "Handling models command (Module: {:?}, Name: {:?}, Table: {:?})",
        args.module, args.name, args.table
    );
    run_step("create models", || {
        let module = ctx.module(args.module.as_deref())?;
        let name = required(&args.name, "Invalid model name!")?;
        if !is_identifier(name) {
            return Err(ScaffoldError::invalid("Invalid model name!").into());
        }
        let spec = ModelSpec {
            name,
            table: required(&args.table, "Invalid db name!")?,
            id_field: required(&args.id_field, "Invalid db primary id!")?,
            extensible: args.extensible,
            identity: args.identity,
        };

        let [model, resource, collection] = model_files(&module, spec.name)?;
        ctx.write_class(&model.1, &model_class(&model.0, &spec))?;
        ctx.write_class(&resource.1, &resource_model_class(&resource.0, &spec))?;
        ctx.write_class(&collection.1, &collection_class(&collection.0, &module, &spec))?;
        Ok(())
    });
    Ok(())
}

/// Class names and paths of the model, resource model and collection, in that order.
fn model_files(module: &ModuleRef, name: &str) -> Result<[(ClassName, PathBuf); 3]> {
    let locate = |relative: String| {
        module
            .class_in("Model", &relative)
            .ok_or_else(|| ScaffoldError::invalid("Invalid model name!"))
    };
    Ok([
        locate(name.to_string())?,
        locate(format!("ResourceModel/{}", name))?,
        locate(format!("ResourceModel/{}/Collection", name))?,
    ])
}

fn short(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

fn model_class(class_name: &ClassName, spec: &ModelSpec) -> PhpClass {
    let parent = if spec.extensible {
        MODEL_PARENT_EXTENSIBLE
    } else {
        MODEL_PARENT
    };
    let mut class = PhpClass::new(class_name).import(parent).extends(short(parent));
    if spec.identity {
        class = class
            .import(IDENTITY_INTERFACE)
            .implements(short(IDENTITY_INTERFACE))
            .property(format!("const CACHE_TAG = '{}';", spec.table));
    }
    if spec.extensible {
        class = class
            .import(EXTENSIBLE_INTERFACE)
            .implements(short(EXTENSIBLE_INTERFACE));
    }
    class = class
        .property(format!("protected $_cacheTag = '{}';", spec.table))
        .property(format!("protected $_eventPrefix = '{}';", spec.table))
        .function(
            PhpFunction::new("protected", "_construct")
                .line(format!("$this->_init(ResourceModel\\{}::class);", spec.name)),
        );
    if spec.identity {
        class = class.function(
            PhpFunction::public("getIdentities")
                .line("return [self::CACHE_TAG . '_' . $this->getId()];"),
        );
    }
    class
}

fn resource_model_class(class_name: &ClassName, spec: &ModelSpec) -> PhpClass {
    PhpClass::new(class_name)
        .import(RESOURCE_MODEL_PARENT)
        .extends(short(RESOURCE_MODEL_PARENT))
        .function(
            PhpFunction::new("protected", "_construct")
                .line(format!("$this->_init('{}', '{}');", spec.table, spec.id_field)),
        )
}

fn collection_class(class_name: &ClassName, module: &ModuleRef, spec: &ModelSpec) -> PhpClass {
    let model_ns = format!("{}\\Model", module.namespace());
    PhpClass::new(class_name)
        .import(COLLECTION_PARENT)
        .import(format!("{}\\{} as {}Model", model_ns, spec.name, spec.name))
        .import(format!(
            "{}\\ResourceModel\\{} as {}Resource",
            model_ns, spec.name, spec.name
        ))
        .extends(short(COLLECTION_PARENT))
        .property(format!("protected $_eventPrefix = '{}_collection';", spec.table))
        .property(format!("protected $_eventObject = '{}_collection';", spec.table))
        .function(PhpFunction::new("protected", "_construct").line(format!(
            "$this->_init({0}Model::class, {0}Resource::class);",
            spec.name
        )))
}
