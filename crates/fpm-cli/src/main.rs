//! Framer package manager CLI
//!
//! Installs Framer modules from trusted origins, manages the local module
//! tree, and publishes it as an origin of its own.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod signal;

use clap::Parser;
use colored::Colorize;
use fpm_registry::CancelFlag;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ModuleAction, OriginAction};
use context::Context;
use error::Result;
use interactive::SelectChooser;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `-v` selects debug output and the default
/// only shows warnings.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("{} Framer package manager", "framer".green().bold());
        println!();
        println!("Run {} for available commands.", "framer --help".cyan());
        return Ok(());
    };

    let cancel = CancelFlag::new();
    signal::spawn_interrupt_watcher(cancel.clone());
    let ctx = Context::new(&cli.project, cli.retries, cancel);
    execute_command(&ctx, command)
}

fn execute_command(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Init => commands::run_init(ctx),
        Commands::Origin { action } => execute_origin(ctx, action),
        Commands::Module { action } => execute_module(ctx, action),
    }
}

fn execute_origin(ctx: &Context, action: OriginAction) -> Result<()> {
    match action {
        OriginAction::Add { url } => commands::run_origin_add(ctx, &url),
        OriginAction::Del { url } => commands::run_origin_del(ctx, &url),
        OriginAction::List => commands::run_origin_list(ctx),
        OriginAction::Sync => commands::run_origin_sync(ctx),
        OriginAction::Make { name, base } => commands::run_origin_make(ctx, name, base),
    }
}

fn execute_module(ctx: &Context, action: ModuleAction) -> Result<()> {
    match action {
        ModuleAction::List => commands::run_module_list(ctx),
        ModuleAction::Info { name } => commands::run_module_info(ctx, &name),
        ModuleAction::Enable { name } => commands::run_module_enable(ctx, &name),
        ModuleAction::Disable { name } => commands::run_module_disable(ctx, &name),
        ModuleAction::Del { name } => commands::run_module_del(ctx, &name),
        ModuleAction::Search { keyword } => commands::run_module_search(ctx, &keyword),
        ModuleAction::Install {
            reference,
            overwrite,
        } => commands::run_module_install(ctx, &reference, overwrite, &mut SelectChooser),
        ModuleAction::SyncPkg => commands::run_module_sync_pkg(ctx),
        ModuleAction::SyncBack { overwrite } => {
            commands::run_module_sync_back(ctx, overwrite, &mut SelectChooser)
        }
        ModuleAction::Create { name } => commands::run_module_create(ctx, &name),
    }
}
