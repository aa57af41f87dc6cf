//! Init command implementation

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Create the manifest and module root if they do not exist yet.
pub fn run_init(ctx: &Context) -> Result<()> {
    let created = ctx.project.init()?;
    if created {
        println!(
            "{} Initialized Framer project in {}",
            "OK".green().bold(),
            ctx.project.root().as_str().cyan()
        );
    } else {
        println!("{} Project already initialized", "=>".blue().bold());
    }
    Ok(())
}
