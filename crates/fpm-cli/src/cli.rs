//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fpm_registry::DEFAULT_ATTEMPTS;

/// Framer package manager - install, publish and manage Framer modules
#[derive(Parser, Debug)]
#[command(name = "framer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory
    #[arg(long, global = true, env = "FRAMER_PROJECT", default_value = ".")]
    pub project: PathBuf,

    /// Attempts per document fetch
    #[arg(
        long,
        global = true,
        env = "FRAMER_RETRIES",
        default_value_t = DEFAULT_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub retries: u32,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create framerpkg.json and framer_modules/ if missing
    Init,

    /// Manage trusted origins and publish this project as one
    Origin {
        #[command(subcommand)]
        action: OriginAction,
    },

    /// Manage installed modules
    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },
}

/// Origin subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OriginAction {
    /// Trust an origin
    Add {
        /// Origin base URL (http(s)://, file:// or a local directory)
        url: String,
    },

    /// Stop trusting an origin
    Del {
        /// Origin base URL as listed by `origin list`
        url: String,
    },

    /// List trusted origins
    List,

    /// Rebuild origin-cache.json from every trusted origin
    Sync,

    /// Publish the installed modules into maker_release/
    ///
    /// The origin name and base URL are read from origin-maker.json.
    /// Flags override the saved values; anything still missing is
    /// prompted for, and the result is saved back.
    Make {
        /// Origin name
        #[arg(long)]
        name: Option<String>,

        /// Base URL the release will be served from
        #[arg(long)]
        base: Option<String>,
    },
}

/// Module subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ModuleAction {
    /// List installed modules
    List,

    /// Show the metadata of an installed module
    Info {
        /// Module name
        name: String,
    },

    /// Let the framework load a module again
    Enable {
        /// Module name
        name: String,
    },

    /// Keep the framework from loading a module
    Disable {
        /// Module name
        name: String,
    },

    /// Remove an installed module
    Del {
        /// Module name
        name: String,
    },

    /// Search the registry cache
    ///
    /// Examples:
    ///   framer module search log       # every module whose name contains "log"
    ///   framer module search log@core  # only from origins matching "core"
    Search {
        /// Keyword, optionally followed by @origin
        keyword: String,
    },

    /// Install a module and its dependencies
    Install {
        /// Module reference: name, name@origin, or a keyword
        reference: String,

        /// Replace modules that are already installed
        #[arg(long)]
        overwrite: bool,
    },

    /// Rewrite the manifest module list from framer_modules/
    SyncPkg,

    /// Reinstall every module listed in the manifest
    SyncBack {
        /// Replace modules that are already installed
        #[arg(long)]
        overwrite: bool,
    },

    /// Scaffold a new module
    Create {
        /// Module name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_with_overwrite() {
        let cli = Cli::parse_from(["framer", "module", "install", "alpha@O", "--overwrite"]);
        assert_eq!(
            cli.command,
            Some(Commands::Module {
                action: ModuleAction::Install {
                    reference: "alpha@O".to_string(),
                    overwrite: true,
                }
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["framer", "origin", "sync", "--retries", "5", "-v"]);
        assert_eq!(cli.retries, 5);
        assert!(cli.verbose);
    }

    #[test]
    fn zero_retries_rejected() {
        assert!(Cli::try_parse_from(["framer", "--retries", "0", "origin", "sync"]).is_err());
    }

    #[test]
    fn make_flags_are_optional() {
        let cli = Cli::parse_from(["framer", "origin", "make", "--name", "core"]);
        assert_eq!(
            cli.command,
            Some(Commands::Origin {
                action: OriginAction::Make {
                    name: Some("core".to_string()),
                    base: None,
                }
            })
        );
    }
}
