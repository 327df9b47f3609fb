//! # magescaff Plugin Command
//!
//! File: cli/src/commands/plugin.rs
//!
//! ## Overview
//!
//! Implements `magescaff plugin`: declares an interceptor for a public method
//! in `di.xml` and writes the plugin class (under the module's `Plugin` folder)
//! with `before`, `around` and `after` methods matching the target's parameters.
//!
//! The target method is inspected in the module sources under the code
//! directory. Classes that live elsewhere (e.g. in `vendor/`) need
//! `--target-params` to spell out the parameter list.
//!
//! ## Usage
//!
//! ```bash
//! magescaff plugin --module Acme_Blog --class Post/Repository \
//!     --target-class Acme/Blog/Model/PostRepository --target-method save --name acme_blog_post_save
//! magescaff plugin --module Acme_Blog --class Product/Name \
//!     --target-class 'Magento\Catalog\Model\Product' --target-method getName \
//!     --target-params '' --name acme_product_name --sort-order 10
//! ```
//!
use clap::Parser;
use tracing::{debug, info};

use super::{first_upper, required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::config_file::create_configuration;
use crate::scaffold::inspect::{inspector_for, MethodInfo};
use crate::scaffold::php::{ClassName, PhpClass, PhpFunction};
use crate::scaffold::ScaffoldContext;
use crate::xml::{ContentFragment, FragmentNode};

#[derive(Parser, Debug)]
#[command(about = "Create a plugin (interceptor) for a public method")]
pub struct PluginArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Plugin class below the module's `Plugin` folder, e.g. `Post/Repository`.
    #[arg(long, short)]
    class: Option<String>,

    /// Fully qualified class being intercepted.
    #[arg(long)]
    target_class: Option<String>,

    /// Public method being intercepted.
    #[arg(long)]
    target_method: Option<String>,

    /// Parameter list of the target method; skips source inspection.
    #[arg(long)]
    target_params: Option<String>,

    /// Plugin name, unique per target class.
    #[arg(long, short)]
    name: Option<String>,

    /// Sort order; ignored unless numeric.
    #[arg(long)]
    sort_order: Option<String>,

    /// Declare the plugin disabled.
    #[arg(long)]
    disabled: bool,

    /// Area of di.xml.
    #[arg(long, short, default_value = "global")]
    area: String,
}

pub fn handle_plugin(ctx: &ScaffoldContext, args: PluginArgs) -> Result<()> {
    info!(
        "Handling plugin command (Module: {:?}, Target: {:?}::{:?})",
        args.module, args.target_class, args.target_method
    );
    run_step("create plugin", || {
        let module = ctx.module(args.module.as_deref())?;
        let plugin = required(&args.class, "Invalid plugin class!")?;
        let target = required(&args.target_class, "Invalid plugin target class!")?;
        let method = required(&args.target_method, "Invalid plugin target method!")?;
        let name = required(&args.name, "Invalid plugin name!")?;

        let target = ClassName::parse(target)
            .ok_or_else(|| ScaffoldError::invalid("Invalid plugin target class!"))?;
        let (plugin_class, file) = module
            .class_in("Plugin", plugin)
            .ok_or_else(|| ScaffoldError::invalid("Invalid plugin class!"))?;
        let area = Area::parse(&args.area)
            .ok_or_else(|| ScaffoldError::invalid("Invalid configuration file area!"))?;

        let info = inspector_for(&ctx.code_dir, args.target_params.as_deref())
            .inspect(&target, method)?;
        if !info.is_public {
            return Err(ScaffoldError::invalid("Method is not public!").into());
        }
        debug!("Target parameters: {:?}", info.params);

        let content = plugin_fragment(
            &target,
            &plugin_class,
            name,
            args.sort_order.as_deref(),
            args.disabled,
        );
        create_configuration(ctx, &module, "di.xml", Some(area), &content)?;

        let mut class = PhpClass::new(&plugin_class).import(target.fqcn());
        for function in interceptors(&target, method, &info) {
            class = class.function(function);
        }
        ctx.write_class(&file, &class)?;
        Ok(())
    });
    Ok(())
}

fn plugin_fragment(
    target: &ClassName,
    plugin: &ClassName,
    name: &str,
    sort_order: Option<&str>,
    disabled: bool,
) -> ContentFragment {
    let sort_order = sort_order
        .map(str::trim)
        .filter(|s| s.parse::<f64>().is_ok_and(f64::is_finite));
    ContentFragment::single(
        FragmentNode::new("type").attr("name", target.fqcn()).child(
            FragmentNode::new("plugin")
                .attr("name", name)
                .attr("type", plugin.fqcn())
                .attr_opt("sortOrder", sort_order)
                .attr_opt("disabled", disabled.then_some("true")),
        ),
    )
}

/// `before`, `around` and `after` methods for `method` of `target`.
fn interceptors(target: &ClassName, method: &str, info: &MethodInfo) -> Vec<PhpFunction> {
    let subject = format!("{} $subject", target.short);
    let params: Vec<String> = info.params.iter().map(|p| format!("${}", p)).collect();
    let passed = params.join(", ");
    let suffix = first_upper(method);

    vec![
        PhpFunction::public(format!("before{}", suffix))
            .arg(&subject)
            .args(params.iter().cloned())
            .line(format!("return [{}];", passed)),
        PhpFunction::public(format!("around{}", suffix))
            .arg(&subject)
            .arg("\\Closure $proceed")
            .args(params.iter().cloned())
            .line(format!("return $proceed({});", passed)),
        PhpFunction::public(format!("after{}", suffix))
            .arg(&subject)
            .arg("$result")
            .args(params.iter().cloned())
            .line("return $result;"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templating::Stamper;
    use crate::xml::FragmentBuilder;

    fn target() -> ClassName {
        ClassName::parse("Magento\\Catalog\\Model\\Product").unwrap()
    }

    #[test]
    fn test_parses_plugin_args() {
        let args = PluginArgs::try_parse_from([
            "plugin",
            "-m",
            "Acme_Blog",
            "--class",
            "Product/Name",
            "--target-class",
            "Magento/Catalog/Model/Product",
            "--target-method",
            "getName",
            "--target-params",
            "",
            "--name",
            "acme_product_name",
            "--disabled",
        ])
        .unwrap();
        assert_eq!(args.target_params.as_deref(), Some(""));
        assert!(args.disabled);
        assert_eq!(args.area, "global");
    }

    #[test]
    fn test_interceptor_methods() {
        let info = MethodInfo {
            is_public: true,
            params: vec!["qty".into(), "store".into()],
        };
        let stamper = Stamper::new().unwrap();
        let rendered: Vec<String> = interceptors(&target(), "setQty", &info)
            .iter()
            .map(|f| f.render(&stamper).unwrap())
            .collect();
        assert!(rendered[0].contains("public function beforeSetQty(Product $subject, $qty, $store)"));
        assert!(rendered[0].contains("return [$qty, $store];"));
        assert!(rendered[1]
            .contains("public function aroundSetQty(Product $subject, \\Closure $proceed, $qty, $store)"));
        assert!(rendered[1].contains("return $proceed($qty, $store);"));
        assert!(rendered[2].contains("public function afterSetQty(Product $subject, $result, $qty, $store)"));
    }

    #[test]
    fn test_plugin_fragment_attributes() {
        let plugin = ClassName::parse("Acme\\Blog\\Plugin\\Product\\Name").unwrap();
        let fragment = plugin_fragment(&target(), &plugin, "acme_name", Some("abc"), true);
        let element = FragmentBuilder::default()
            .render_first(&fragment)
            .unwrap();
        assert_eq!(element.attribute("name"), Some("Magento\\Catalog\\Model\\Product"));
        let plugin_el = element.child_elements().next().unwrap();
        assert_eq!(plugin_el.attribute("type"), Some("Acme\\Blog\\Plugin\\Product\\Name"));
        assert_eq!(plugin_el.attribute("sortOrder"), None);
        assert_eq!(plugin_el.attribute("disabled"), Some("true"));

        let fragment = plugin_fragment(&target(), &plugin, "acme_name", Some("10"), false);
        let element = FragmentBuilder::default().render_first(&fragment).unwrap();
        let plugin_el = element.child_elements().next().unwrap();
        assert_eq!(plugin_el.attribute("sortOrder"), Some("10"));
        assert_eq!(plugin_el.attribute("disabled"), None);
    }
}
