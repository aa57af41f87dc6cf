//! Module command implementations

use colored::Colorize;
use fpm_core::{Disambiguate, InstallOptions, InstallOutcome, InstallReport, Installer};

use crate::context::Context;
use crate::error::Result;

pub fn run_module_list(ctx: &Context) -> Result<()> {
    let installed = ctx.project.installed_modules()?;
    if installed.is_empty() {
        println!("{}", "No modules installed.".dimmed());
        return Ok(());
    }

    let manifest = ctx.project.manifest_store().load()?;
    println!("{}", "Installed modules:".bold());
    for name in &installed {
        if manifest.is_disabled(name) {
            println!("  - {} {}", name, "(disabled)".yellow());
        } else {
            println!("  - {}", name.cyan());
        }
    }
    Ok(())
}

/// Print the metadata and declared dependencies of an installed module.
pub fn run_module_info(ctx: &Context, name: &str) -> Result<()> {
    let info = ctx.project.read_module_info(name)?;
    let require = ctx.project.read_module_require(name)?;

    println!("{}", name.bold());
    println!(
        "  {}: {}",
        "Author".dimmed(),
        info.author.as_deref().unwrap_or("-")
    );
    println!(
        "  {}: {}",
        "Description".dimmed(),
        info.description.as_deref().unwrap_or("-")
    );
    println!(
        "  {}: {}",
        "Hooker".dimmed(),
        info.hooker.map_or("-".to_string(), |h| h.to_string())
    );
    for (label, list) in [
        ("Dependencies", &require.dependencies),
        ("Optional", &require.option_dependencies),
        ("Pip", &require.pip_dependencies),
    ] {
        if !list.is_empty() {
            println!("  {}: {}", label.dimmed(), list.join(", "));
        }
    }
    Ok(())
}

pub fn run_module_enable(ctx: &Context, name: &str) -> Result<()> {
    ctx.project.manifest_store().update(|m| m.enable(name))?;
    println!("{} Enabled {}", "OK".green().bold(), name.cyan());
    Ok(())
}

pub fn run_module_disable(ctx: &Context, name: &str) -> Result<()> {
    ctx.project.manifest_store().update(|m| m.disable(name))?;
    println!("{} Disabled {}", "OK".green().bold(), name.cyan());
    Ok(())
}

pub fn run_module_del(ctx: &Context, name: &str) -> Result<()> {
    if fpm_core::uninstall(&ctx.project, name)? {
        println!("{} Removed {}", "OK".green().bold(), name.cyan());
    } else {
        println!("{} Module {} is not installed", "=>".blue().bold(), name.yellow());
    }
    Ok(())
}

pub fn run_module_search(ctx: &Context, keyword: &str) -> Result<()> {
    let fetcher = ctx.fetcher()?;
    let cache = ctx.cache(&fetcher)?;
    let results = fpm_registry::search(&cache, keyword);

    if results.is_empty() {
        println!("{}", "No match.".dimmed());
        return Ok(());
    }
    println!("{}", "Search results:".bold());
    for qualified in &results {
        let description = cache
            .get(qualified)
            .and_then(|entry| entry.info.description.as_deref())
            .unwrap_or("");
        println!("  - {} {}", qualified.cyan(), description.dimmed());
    }
    Ok(())
}

/// Install a module. A reference that matches nothing is a warning, not an
/// error.
pub fn run_module_install(
    ctx: &Context,
    reference: &str,
    overwrite: bool,
    chooser: &mut dyn Disambiguate,
) -> Result<()> {
    let fetcher = ctx.fetcher()?;
    let cache = ctx.cache(&fetcher)?;
    println!("{} Installing {}...", "=>".blue().bold(), reference.cyan());

    let result = Installer::new(&ctx.project, &cache, &fetcher, chooser)
        .install(reference, InstallOptions { overwrite });
    match result {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(fpm_core::Error::NotFound { reference }) => {
            println!(
                "{} Module {} not found",
                "warning:".yellow().bold(),
                reference.yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_module_sync_pkg(ctx: &Context) -> Result<()> {
    let modules = fpm_core::resync_manifest(&ctx.project)?;
    println!(
        "{} Manifest lists {} module(s)",
        "OK".green().bold(),
        modules.len()
    );
    Ok(())
}

/// Reinstall everything the manifest lists.
pub fn run_module_sync_back(
    ctx: &Context,
    overwrite: bool,
    chooser: &mut dyn Disambiguate,
) -> Result<()> {
    println!("{} Restoring modules from manifest...", "=>".blue().bold());
    let fetcher = ctx.fetcher()?;
    let report = fpm_core::restore(&ctx.project, &fetcher, chooser, InstallOptions { overwrite })?;
    print_report(&report);
    Ok(())
}

pub fn run_module_create(ctx: &Context, name: &str) -> Result<()> {
    if fpm_core::create(&ctx.project, name)? {
        println!("{} Created module {}", "OK".green().bold(), name.cyan());
    } else {
        println!("{} Module {} already exists", "=>".blue().bold(), name.yellow());
    }
    Ok(())
}

fn print_report(report: &InstallReport) {
    if report.is_empty() {
        println!("{}", "Nothing to install.".dimmed());
        return;
    }
    for record in report.records() {
        match record.outcome {
            InstallOutcome::Installed => {
                println!("  {} {}", "+".green(), record.module);
            }
            InstallOutcome::Skipped => {
                println!("  {} {} {}", "=".blue(), record.module, "(already installed)".dimmed());
            }
            InstallOutcome::Missing => {
                println!(
                    "  {} {} {}",
                    "!".yellow(),
                    record.module.yellow(),
                    "(not found in any origin)".dimmed()
                );
            }
        }
    }
    println!(
        "{} {} installed, {} skipped, {} missing",
        "OK".green().bold(),
        report.installed().len(),
        report.skipped().len(),
        report.missing().len()
    );
}
