//! Configuration file creation and filling.
//!
//! Every XML-writing command goes through here: pick the schema entry for the
//! file and area, create the file with a schema-declaring root element if it is
//! absent, then merge the command's fragment into it and report the outcome.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::area::Area;
use super::catalog::Catalog;
use super::{ModuleRef, ScaffoldContext};
use crate::common::ui;
use crate::core::error::Result;
use crate::xml::{self, ContentFragment, Document, FragmentBuilder, MergeResult, XmlElement};

/// Layout handles declare this schema on their `<page>` root.
pub const PAGE_CONFIGURATION_URN: &str =
    "urn:magento:framework:View/Layout/etc/page_configuration.xsd";

/// `<module dir>/etc[/<area>]/<file>`
pub fn config_path(module: &ModuleRef, area: Area, file: &str) -> PathBuf {
    let mut path = module.dir.join("etc");
    if !area.dir_name().is_empty() {
        path.push(area.dir_name());
    }
    path.push(file);
    path
}

/// `<module dir>/view/<area>/layout/<handle>.xml`
pub fn layout_path(module: &ModuleRef, area: Area, handle: &str) -> PathBuf {
    module
        .dir
        .join("view")
        .join(area.name())
        .join("layout")
        .join(format!("{}.xml", handle))
}

/// Creates (if needed) and fills a module configuration file.
///
/// # Arguments
///
/// * `file` - Configuration file name, e.g. `routes.xml`.
/// * `area` - Requested area; `None` means global.
/// * `content` - Fragment to merge. An empty fragment only creates the file.
///
/// # Errors
///
/// Returns an error for an unknown file or area and for I/O or parse failures.
/// A failed write of the merged document is reported, not returned.
pub fn create_configuration(
    ctx: &ScaffoldContext,
    module: &ModuleRef,
    file: &str,
    area: Option<Area>,
    content: &ContentFragment,
) -> Result<PathBuf> {
    create_configuration_with(ctx, module, file, area, content, FragmentBuilder::default())
}

/// `create_configuration` with a custom indexed item tag.
pub fn create_configuration_with(
    ctx: &ScaffoldContext,
    module: &ModuleRef,
    file: &str,
    area: Option<Area>,
    content: &ContentFragment,
    builder: FragmentBuilder,
) -> Result<PathBuf> {
    let file = file.trim();
    let catalog = Catalog::with_discovered(file, &ctx.schema_search_roots());
    let entry = catalog.select(file, area)?;
    debug!(
        "Configuration {} resolved to <{}> {} ({})",
        file, entry.root_node, entry.urn, entry.area
    );
    let path = config_path(module, entry.area, file);
    generate_xml(ctx, &path, xml::schema_root(&entry.root_node, &entry.urn))?;
    fill(ctx, &path, content, builder)?;
    Ok(path)
}

/// Writes a new XML file holding `root`, unless the file already exists.
/// Returns whether the file was written.
pub fn generate_xml(ctx: &ScaffoldContext, path: &Path, root: XmlElement) -> Result<bool> {
    if path.exists() {
        ui::xml_exists(&ctx.display(path));
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        ctx.ensure_dir(dir)?;
    }
    Document::new(root).save(path, ctx.indent)?;
    ui::file_created(&ctx.display(path));
    Ok(true)
}

/// Merges `content` into the existing file at `path` and reports the outcome.
pub fn fill(
    ctx: &ScaffoldContext,
    path: &Path,
    content: &ContentFragment,
    builder: FragmentBuilder,
) -> Result<MergeResult> {
    let result = xml::merge_file(path, content, &ctx.merge_options(builder))?;
    report(ctx, path, &result);
    Ok(result)
}

fn report(ctx: &ScaffoldContext, path: &Path, result: &MergeResult) {
    let shown = ctx.display(path);
    match result {
        MergeResult::Grafted => {
            info!("Grafted content into {}", path.display());
            ui::content_added(&shown);
        }
        MergeResult::NoContent => ui::no_additional_content(&shown),
        MergeResult::WriteFailed(reason) => {
            warn!("Saving {} failed", path.display());
            ui::content_not_added(&shown, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CatalogConfig, Config, MagentoConfig};
    use crate::xml::FragmentNode;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn fixture() -> (TempDir, ScaffoldContext, ModuleRef) {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("app/code/Acme/Blog")).unwrap();
        let config = Config {
            magento: MagentoConfig {
                root: temp.path().to_string_lossy().into_owned(),
                ..Default::default()
            },
            catalog: CatalogConfig { discover: false },
            ..Default::default()
        };
        let ctx = ScaffoldContext::from_config(&config).unwrap();
        let module = ctx.module(Some("Acme_Blog")).unwrap();
        (temp, ctx, module)
    }

    fn route(front_name: &str) -> ContentFragment {
        ContentFragment::single(
            FragmentNode::new("router").attr("id", "standard").child(
                FragmentNode::new("route")
                    .attr("id", front_name)
                    .attr("frontName", front_name)
                    .child(FragmentNode::new("module").attr("name", "Acme_Blog")),
            ),
        )
    }

    #[test]
    fn test_paths() {
        let module = ModuleRef::from_name(Path::new("/c"), "Acme_Blog").unwrap();
        assert_eq!(
            config_path(&module, Area::Global, "di.xml"),
            Path::new("/c/Acme/Blog/etc/di.xml")
        );
        assert_eq!(
            config_path(&module, Area::WebapiRest, "di.xml"),
            Path::new("/c/Acme/Blog/etc/webapi_rest/di.xml")
        );
        assert_eq!(
            layout_path(&module, Area::Base, "blog_index_index"),
            Path::new("/c/Acme/Blog/view/base/layout/blog_index_index.xml")
        );
    }

    #[test]
    fn test_create_then_fill_routes() {
        let (_temp, ctx, module) = fixture();
        let path =
            create_configuration(&ctx, &module, "routes.xml", Some(Area::Frontend), &route("blog"))
                .unwrap();
        assert!(path.ends_with("etc/frontend/routes.xml"));
        let expected = [
            "<?xml version=\"1.0\"?>",
            "<config xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:noNamespaceSchemaLocation=\"urn:magento:framework:App/etc/routes.xsd\">",
            "    <router id=\"standard\">",
            "        <route id=\"blog\" frontName=\"blog\">",
            "            <module name=\"Acme_Blog\"/>",
            "        </route>",
            "    </router>",
            "</config>",
            "",
        ]
        .join("\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);

        // A second route lands under the same router.
        create_configuration(&ctx, &module, "routes.xml", Some(Area::Frontend), &route("news"))
            .unwrap();
        let document = Document::load(&path).unwrap();
        let router = document.root.first_child_element().unwrap();
        assert_eq!(document.root.child_elements().count(), 1);
        assert_eq!(document.root.element_count(), 6);
        assert_eq!(router.child_elements().count(), 2);
    }

    #[test]
    fn test_duplicate_content_leaves_file_untouched() {
        let (_temp, ctx, module) = fixture();
        let path =
            create_configuration(&ctx, &module, "routes.xml", Some(Area::Adminhtml), &route("blog"))
                .unwrap();
        let before = fs::read_to_string(&path).unwrap();
        let content = ContentFragment::single(FragmentNode::new("router").attr("id", "standard"));
        let result = fill(&ctx, &path, &content, FragmentBuilder::default()).unwrap();
        assert_eq!(result, MergeResult::NoContent);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_invalid_file_or_area_creates_nothing() {
        let (_temp, ctx, module) = fixture();
        let err = create_configuration(&ctx, &module, "routes.xml", None, &ContentFragment::empty())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration file area!");
        let err = create_configuration(&ctx, &module, "nope.xml", None, &ContentFragment::empty())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration file!");
        assert!(!module.dir.join("etc").exists());
    }

    #[test]
    fn test_generate_xml_skips_existing() {
        let (_temp, ctx, module) = fixture();
        let path = layout_path(&module, Area::Frontend, "blog_index_index");
        assert!(generate_xml(&ctx, &path, xml::schema_root("page", PAGE_CONFIGURATION_URN)).unwrap());
        assert!(!generate_xml(&ctx, &path, XmlElement::new("other")).unwrap());
        assert_eq!(Document::load(&path).unwrap().root.name, "page");
    }

    #[test]
    fn test_failed_save_is_reported_not_returned() {
        let (_temp, ctx, module) = fixture();
        let path = create_configuration(&ctx, &module, "di.xml", None, &ContentFragment::empty())
            .unwrap();
        let content = ContentFragment::single(
            FragmentNode::new("preference").attr("for", "A").attr("type", "B"),
        );
        let result = xml::merge::merge_into(
            &path,
            &path.join("blocked.xml"),
            &content,
            &ctx.merge_options(FragmentBuilder::default()),
        )
        .unwrap();
        assert!(matches!(result, MergeResult::WriteFailed(_)));
        report(&ctx, &path, &result);
        assert!(!fs::read_to_string(&path).unwrap().contains("preference"));
    }
}
