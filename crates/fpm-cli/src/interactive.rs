//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection and input.

use colored::Colorize;
use dialoguer::{Input, Select};
use fpm_core::Disambiguate;
use fpm_meta::MakerConfig;

use crate::error::Result;

/// Asks the user which module to install when a reference is ambiguous.
#[derive(Debug, Default)]
pub struct SelectChooser;

impl Disambiguate for SelectChooser {
    fn choose(&mut self, reference: &str, candidates: &[String]) -> fpm_core::Result<usize> {
        println!(
            "{} '{}' matches {} modules",
            "?".yellow().bold(),
            reference.cyan(),
            candidates.len()
        );
        Select::new()
            .with_prompt("Install")
            .items(candidates)
            .default(0)
            .interact_opt()
            .map_err(|e| fpm_core::Error::Prompt {
                message: e.to_string(),
            })?
            .ok_or(fpm_core::Error::Interrupted)
    }
}

/// Ask for whatever part of the publisher config was not given.
pub fn prompt_maker_config(name: Option<String>, base: Option<String>) -> Result<MakerConfig> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Origin name").interact_text()?,
    };
    let base = match base {
        Some(base) => base,
        None => Input::<String>::new()
            .with_prompt("Base URL the release will be served from")
            .interact_text()?,
    };
    Ok(MakerConfig::new(name, base))
}
