//! # magescaff Console Command
//!
//! File: cli/src/commands/command.rs
//!
//! ## Overview
//!
//! Implements `magescaff command`: registers a console command with
//! `CommandListInterface` in the global `di.xml` and writes the command class
//! (under `Console/Command`) extending Symfony's `Command`.
//!
//! ## Usage
//!
//! ```bash
//! magescaff command --module Acme_Blog --xml-name acme_blog_publish \
//!     --cli-name acme:blog:publish --class Publish
//! ```
//!
use clap::Parser;
use tracing::info;

use super::{required, run_step};
use crate::core::error::{Result, ScaffoldError};
use crate::scaffold::area::Area;
use crate::scaffold::config_file::create_configuration;
use crate::scaffold::php::{ClassName, PhpClass, PhpFunction};
use crate::scaffold::ScaffoldContext;
use crate::xml::{ContentFragment, FragmentNode};

const COMMAND_LIST_INTERFACE: &str = "Magento\\Framework\\Console\\CommandListInterface";
const PARENT_COMMAND: &str = "Symfony\\Component\\Console\\Command\\Command";
const INPUT_INTERFACE: &str = "Symfony\\Component\\Console\\Input\\InputInterface";
const OUTPUT_INTERFACE: &str = "Symfony\\Component\\Console\\Output\\OutputInterface";

#[derive(Parser, Debug)]
#[command(about = "Create a console command and register it in di.xml")]
pub struct CommandArgs {
    /// Module name in `Vendor_Module` form.
    #[arg(long, short)]
    module: Option<String>,

    /// Item name of the command in di.xml.
    #[arg(long, short)]
    xml_name: Option<String>,

    /// Name the command is invoked by, e.g. `acme:blog:publish`.
    #[arg(long, short = 'e')]
    cli_name: Option<String>,

    /// Command class below the module's `Console/Command` folder.
    #[arg(long, short)]
    class: Option<String>,
}

pub fn handle_command(ctx: &ScaffoldContext, args: CommandArgs) -> Result<()> {
    info!(
        "Handling console command (Module: {:?}, Name: {:?}, Class: {:?})",
        args.module, args.cli_name, args.class
    );
    run_step("create console command", || {
        let module = ctx.module(args.module.as_deref())?;
        let xml_name = required(&args.xml_name, "Invalid xml command name!")?;
        let class = required(&args.class, "Invalid command class name!")?;
        let cli_name = required(&args.cli_name, "Invalid command execute name!")?;
        let (class_name, file) = module
            .class_in("Console/Command", class)
            .ok_or_else(|| ScaffoldError::invalid("Invalid command class name!"))?;

        let content = command_fragment(xml_name, &class_name);
        create_configuration(ctx, &module, "di.xml", Some(Area::Global), &content)?;
        ctx.write_class(&file, &command_class(&class_name, cli_name))?;
        Ok(())
    });
    Ok(())
}

fn command_fragment(xml_name: &str, class_name: &ClassName) -> ContentFragment {
    let item = FragmentNode::new("item")
        .attr("name", xml_name)
        .attr("xsi:type", "object")
        .text(class_name.fqcn());
    ContentFragment::single(
        FragmentNode::new("type")
            .attr("name", COMMAND_LIST_INTERFACE)
            .child(
                FragmentNode::new("arguments").child(
                    FragmentNode::new("argument")
                        .attr("name", "commands")
                        .attr("xsi:type", "array")
                        .child(item),
                ),
            ),
    )
}

fn command_class(class_name: &ClassName, cli_name: &str) -> PhpClass {
    let cli_name = cli_name.replace('\'', "\\'");
    PhpClass::new(class_name)
        .import(INPUT_INTERFACE)
        .import(OUTPUT_INTERFACE)
        .import(PARENT_COMMAND)
        .extends("Command")
        .function(
            PhpFunction::new("protected", "configure")
                .line(format!("$this->setName('{}');", cli_name))
                .line("$this->setDefinition([]);")
                .line("parent::configure();"),
        )
        .function(
            PhpFunction::new("protected", "execute")
                .arg("InputInterface $input")
                .arg("OutputInterface $output")
                .line("// Command execution logic")
                .line("return 0;"),
        )
}
