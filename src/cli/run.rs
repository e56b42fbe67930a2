use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, collect::collect, init::init},
};

/// Dispatch to the command handler selected by the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Collect(args)) => collect(&args),
        Some(Command::Check(args)) => check(&args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
