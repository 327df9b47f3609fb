//! # magescaff CLI Wiring Integration Tests
//!
//! File: cli/tests/wiring.rs
//!
//! ## Overview
//!
//! Integration tests for the commands that write a class and register it in a
//! configuration file: `observer`, `plugin`, `cron` and `command`.
//!
mod common;
use common::*;
use predicates::prelude::*;

const REPOSITORY: &str = r#"<?php

namespace Acme\Blog\Model;

class PostRepository
{
    public function save(PostInterface $post, array $options = [])
    {
    }

    private function hydrate($row)
    {
    }
}
"#;

#[test]
fn test_observer_binds_event() {
    let shop = Shop::new();
    shop.cmd([
        "observer",
        "--module",
        MODULE,
        "--event",
        "customer_login",
        "--name",
        "acme_blog_login",
        "--instance",
        "Customer/Login",
        "--disabled",
    ])
    .assert()
    .success();

    let events = shop.read("etc/events.xml");
    assert!(events.contains("    <event name=\"customer_login\">\n"));
    assert!(events.contains(
        "<observer name=\"acme_blog_login\" instance=\"Acme\\Blog\\Observer\\Customer\\Login\" disabled=\"true\"/>"
    ));

    let php = shop.read("Observer/Customer/Login.php");
    assert!(php.contains("namespace Acme\\Blog\\Observer\\Customer;"));
    assert!(php.contains("class Login implements ObserverInterface"));
    assert!(php.contains(
        "    /**\n     * @param Observer $observer\n     * @return void\n     */\n    public function execute(Observer $observer)"
    ));
    assert!(php.contains("        // Observer execution code..."));
}

#[test]
fn test_second_observer_shares_event() {
    let shop = Shop::new();
    for (name, instance) in [("first", "First"), ("second", "Second")] {
        shop.cmd([
            "observer", "--module", MODULE, "--event", "customer_login", "--name", name,
            "--instance", instance,
        ])
        .assert()
        .success();
    }
    let events = shop.read("etc/events.xml");
    assert_eq!(events.matches("<event name=\"customer_login\">").count(), 1);
    assert_eq!(events.matches("<observer ").count(), 2);
}

#[test]
fn test_observer_in_area_file() {
    let shop = Shop::new();
    shop.cmd([
        "observer", "--module", MODULE, "--event", "layout_load_before", "--name", "acme_layout",
        "--instance", "Layout", "--area", "frontend",
    ])
    .assert()
    .success();
    assert!(shop.module_path("etc/frontend/events.xml").exists());
    assert!(!shop.module_path("etc/events.xml").exists());
}

#[test]
fn test_observer_validation_order() {
    let shop = Shop::new();
    shop.cmd(["observer", "--module", MODULE, "--name", "x", "--instance", "X"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid event name!"));
    shop.cmd(["observer", "--module", MODULE, "--event", "e", "--instance", "X"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid observer name!"));
    shop.cmd(["observer", "--module", MODULE, "--event", "e", "--name", "x", "--instance", "9x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid observer instance!"));
}

#[test]
fn test_plugin_inspects_target_method() {
    let shop = Shop::new();
    shop.write("app/code/Acme/Blog/Model/PostRepository.php", REPOSITORY);
    shop.cmd([
        "plugin",
        "--module",
        MODULE,
        "--class",
        "Post/RepositoryPlugin",
        "--target-class",
        "Acme/Blog/Model/PostRepository",
        "--target-method",
        "save",
        "--name",
        "acme_blog_post_save",
        "--sort-order",
        "20",
    ])
    .assert()
    .success();

    let di = shop.read("etc/di.xml");
    assert!(di.contains("    <type name=\"Acme\\Blog\\Model\\PostRepository\">\n"));
    assert!(di.contains(
        "<plugin name=\"acme_blog_post_save\" type=\"Acme\\Blog\\Plugin\\Post\\RepositoryPlugin\" sortOrder=\"20\"/>"
    ));

    let php = shop.read("Plugin/Post/RepositoryPlugin.php");
    assert!(php.contains("use Acme\\Blog\\Model\\PostRepository;"));
    assert!(php.contains(
        "public function beforeSave(PostRepository $subject, $post, $options)"
    ));
    assert!(php.contains(
        "public function aroundSave(PostRepository $subject, \\Closure $proceed, $post, $options)"
    ));
    assert!(php.contains("public function afterSave(PostRepository $subject, $result, $post, $options)"));
}

#[test]
fn test_plugin_on_private_method_is_refused() {
    let shop = Shop::new();
    shop.write("app/code/Acme/Blog/Model/PostRepository.php", REPOSITORY);
    shop.cmd([
        "plugin", "--module", MODULE, "--class", "Hydrate", "--target-class",
        "Acme\\Blog\\Model\\PostRepository", "--target-method", "hydrate", "--name", "acme_hydrate",
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("Method is not public!"));
    assert!(!shop.module_path("etc/di.xml").exists());
    assert!(!shop.module_path("Plugin/Hydrate.php").exists());
}

#[test]
fn test_plugin_with_explicit_params_skips_inspection() {
    let shop = Shop::new();
    shop.cmd([
        "plugin",
        "--module",
        MODULE,
        "--class",
        "Product/Name",
        "--target-class",
        "Magento\\Catalog\\Model\\Product",
        "--target-method",
        "getName",
        "--target-params",
        "",
        "--name",
        "acme_product_name",
        "--disabled",
    ])
    .assert()
    .success();
    assert!(shop.read("etc/di.xml").contains("disabled=\"true\""));
    assert!(shop
        .read("Plugin/Product/Name.php")
        .contains("public function beforeGetName(Product $subject)"));
}

#[test]
fn test_plugin_unknown_target_class() {
    let shop = Shop::new();
    shop.cmd([
        "plugin", "--module", MODULE, "--class", "Missing", "--target-class",
        "Acme\\Blog\\Model\\Missing", "--target-method", "run", "--name", "acme_missing",
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("Class \"Acme\\Blog\\Model\\Missing\" does not exist"));
}

#[test]
fn test_cron_schedules_job() {
    let shop = Shop::new();
    shop.cmd([
        "cron",
        "--module",
        MODULE,
        "--name",
        "acme_blog_cleanup",
        "--instance",
        "Cleanup",
        "--schedule",
        "0 3 * * *",
    ])
    .assert()
    .success();

    let expected = [
        "    <group id=\"default\">",
        "        <job name=\"acme_blog_cleanup\" instance=\"Acme\\Blog\\Cron\\Cleanup\" method=\"execute\">",
        "            <schedule>0 3 * * *</schedule>",
        "        </job>",
        "    </group>",
    ]
    .join("\n");
    assert!(shop.read("etc/crontab.xml").contains(&expected));
    assert!(shop.read("Cron/Cleanup.php").contains("    public function execute()\n    {\n    }"));
}

#[test]
fn test_cron_rejects_bad_method() {
    let shop = Shop::new();
    shop.cmd([
        "cron", "--module", MODULE, "--name", "acme", "--instance", "Cleanup", "--method", "run-now",
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("Invalid cron method!"));
}

#[test]
fn test_console_command_registration() {
    let shop = Shop::new();
    shop.cmd([
        "command",
        "--module",
        MODULE,
        "--xml-name",
        "acme_blog_publish",
        "--cli-name",
        "acme:blog:publish",
        "--class",
        "Publish",
    ])
    .assert()
    .success();

    let di = shop.read("etc/di.xml");
    assert!(di.contains("<type name=\"Magento\\Framework\\Console\\CommandListInterface\">"));
    assert!(di.contains("<argument name=\"commands\" xsi:type=\"array\">"));
    assert!(di.contains(
        "<item name=\"acme_blog_publish\" xsi:type=\"object\">Acme\\Blog\\Console\\Command\\Publish</item>"
    ));
    assert!(shop
        .read("Console/Command/Publish.php")
        .contains("$this->setName('acme:blog:publish');"));
}

#[test]
fn test_plugin_and_command_share_di_xml() {
    let shop = Shop::new();
    shop.cmd([
        "command", "--module", MODULE, "--xml-name", "acme_sync", "--cli-name", "acme:sync",
        "--class", "Sync",
    ])
    .assert()
    .success();
    shop.cmd([
        "plugin", "--module", MODULE, "--class", "Name", "--target-class",
        "Magento\\Catalog\\Model\\Product", "--target-method", "getName", "--target-params", "",
        "--name", "acme_name",
    ])
    .assert()
    .success();
    let di = shop.read("etc/di.xml");
    assert!(di.contains("CommandListInterface"));
    assert!(di.contains("<plugin name=\"acme_name\""));
    assert_eq!(di.matches("<config ").count(), 1);
}
