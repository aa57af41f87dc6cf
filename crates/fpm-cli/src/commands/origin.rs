//! Origin command implementations

use colored::Colorize;
use fpm_meta::MakerConfig;

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

/// Trust an origin.
pub fn run_origin_add(ctx: &Context, url: &str) -> Result<()> {
    if ctx.project.manifest_store().update(|m| m.add_origin(url))? {
        println!("{} Added origin {}", "OK".green().bold(), url.cyan());
        println!("   Run {} to refresh the registry cache.", "framer origin sync".cyan());
    } else {
        println!("{} Origin {} already trusted", "=>".blue().bold(), url.cyan());
    }
    Ok(())
}

/// Stop trusting an origin.
pub fn run_origin_del(ctx: &Context, url: &str) -> Result<()> {
    if ctx.project.manifest_store().update(|m| m.remove_origin(url))? {
        println!("{} Removed origin {}", "OK".green().bold(), url.cyan());
    } else {
        println!("{} Origin {} not trusted", "=>".blue().bold(), url.yellow());
    }
    Ok(())
}

pub fn run_origin_list(ctx: &Context) -> Result<()> {
    let manifest = ctx.project.manifest_store().load()?;
    if manifest.origins.is_empty() {
        println!("{}", "No origins configured.".dimmed());
        return Ok(());
    }
    println!("{}", "Origins:".bold());
    for origin in &manifest.origins {
        println!("  - {}", origin.cyan());
    }
    Ok(())
}

/// Rebuild the registry cache from every trusted origin.
pub fn run_origin_sync(ctx: &Context) -> Result<()> {
    println!("{} Syncing origins...", "=>".blue().bold());
    let fetcher = ctx.fetcher()?;
    let cache = fpm_registry::sync_project(&ctx.project, &fetcher)?;
    println!(
        "{} Registry cache holds {} module(s)",
        "OK".green().bold(),
        cache.len()
    );
    Ok(())
}

/// Publish the installed modules into `maker_release/`.
pub fn run_origin_make(ctx: &Context, name: Option<String>, base: Option<String>) -> Result<()> {
    let saved = MakerConfig::load(&ctx.project)?;
    let config = resolve_maker_config(name, base, saved.clone())?;
    if config.name.trim().is_empty() || config.name.contains('@') {
        return Err(CliError::user(format!(
            "Invalid origin name '{}': must be non-empty and must not contain '@'",
            config.name
        )));
    }
    if saved.as_ref() != Some(&config) {
        config.save(&ctx.project)?;
        tracing::debug!(name = %config.name, base = %config.base, "saved publisher config");
    }

    println!(
        "{} Publishing as {} ({})",
        "=>".blue().bold(),
        config.name.cyan(),
        config.base.dimmed()
    );
    let report = fpm_core::publish(&ctx.project, &config)?;
    for module in &report.modules {
        println!(
            "   {} {} {}",
            "+".green(),
            module.name,
            module.checksum.dimmed()
        );
    }
    println!(
        "{} Release written to {}",
        "OK".green().bold(),
        report.release_dir.as_str().cyan()
    );
    Ok(())
}

/// Flags win over the saved config; only what is still missing is prompted for.
fn resolve_maker_config(
    name: Option<String>,
    base: Option<String>,
    saved: Option<MakerConfig>,
) -> Result<MakerConfig> {
    match (name, base, saved) {
        (Some(name), Some(base), _) => Ok(MakerConfig::new(name, base)),
        (name, base, Some(saved)) => Ok(MakerConfig::new(
            name.unwrap_or(saved.name),
            base.unwrap_or(saved.base),
        )),
        (name, base, None) => interactive::prompt_maker_config(name, base),
    }
}
