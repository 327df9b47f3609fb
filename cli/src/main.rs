//! # magescaff Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the magescaff CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and resolving the Magento root and code directory
//! - Routing execution to the scaffold command handlers
//!
//! ## Architecture
//!
//! - Each scaffold operation is a variant of the `Commands` enum
//! - Commands map to `handle_<name>` functions in `commands/`
//! - Handlers report invalid input and failed steps themselves; only a broken
//!   configuration or an unusable Magento root reaches this level and exits with 1
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! magescaff --help
//!
//! # Create a module in another Magento checkout, with debug logging
//! magescaff -vv --root ~/shop module --module Acme_Blog
//! ```
//!
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Scaffold subcommands (module, route, plugin, etc.)
mod common; // Shared utilities (fs, ui)
mod core; // Core infrastructure (errors, config, templating)
mod scaffold; // Module resolution, schema catalog, PHP class model
mod xml; // XML tree, fragments and the merge engine

use crate::scaffold::ScaffoldContext;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "magescaff",
    about = "Magento module scaffolding: classes, controllers and configuration XML",
    long_about = "Generate Magento 2 module skeletons and merge configuration entries\n\
                  (routes, observers, plugins, cron jobs, commands) into their XML files.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Magento root directory (overrides configuration).
    #[arg(long, global = true, env = "MAGESCAFF_ROOT")]
    root: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    Module(commands::module::ModuleArgs),
    Config(commands::config::ConfigArgs),
    Route(commands::route::RouteArgs),
    #[command(name = "route-full")]
    RouteFull(commands::route_full::RouteFullArgs),
    Handle(commands::handle::HandleArgs),
    Controller(commands::controller::ControllerArgs),
    Observer(commands::observer::ObserverArgs),
    Plugin(commands::plugin::PluginArgs),
    Cron(commands::cron::CronArgs),
    Command(commands::command::CommandArgs),
    Helper(commands::helper::HelperArgs),
    Patch(commands::patch::PatchArgs),
    Models(commands::models::ModelsArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::core::config::load_config(cli.root.as_deref())?;
    let ctx = ScaffoldContext::from_config(&config)?;

    match cli.command {
        Commands::Module(args) => commands::module::handle_module(&ctx, args),
        Commands::Config(args) => commands::config::handle_config(&ctx, args),
        Commands::Route(args) => commands::route::handle_route(&ctx, args),
        Commands::RouteFull(args) => commands::route_full::handle_route_full(&ctx, args),
        Commands::Handle(args) => commands::handle::handle_handle(&ctx, args),
        Commands::Controller(args) => commands::controller::handle_controller(&ctx, args),
        Commands::Observer(args) => commands::observer::handle_observer(&ctx, args),
        Commands::Plugin(args) => commands::plugin::handle_plugin(&ctx, args),
        Commands::Cron(args) => commands::cron::handle_cron(&ctx, args),
        Commands::Command(args) => commands::command::handle_command(&ctx, args),
        Commands::Helper(args) => commands::helper::handle_helper(&ctx, args),
        Commands::Patch(args) => commands::patch::handle_patch(&ctx, args),
        Commands::Models(args) => commands::models::handle_models(&ctx, args),
    }
}
