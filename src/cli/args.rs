//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `collect`: Add missing translation keys to the locale catalogs
//! - `check`: Report missing translation keys without writing anything
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Collect(args)) | Some(Command::Check(args)) => args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the scanning commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Locale to collect into (overrides config file)
    #[arg(long, env = "TRANS_COLLECT_LOCALE")]
    pub locale: Option<String>,

    /// Project root directory (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Language catalogs directory (overrides config file)
    #[arg(long)]
    pub lang_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add every missing translation key to the current locale as an empty string
    Collect(CommonArgs),
    /// Report missing translation keys without modifying any catalog
    Check(CommonArgs),
    /// Initialize a new .transcollect.json configuration file
    Init,
}
