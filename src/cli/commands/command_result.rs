use crate::{
    cli::exit_status::ExitStatus,
    core::{MissingKeyUsage, WrittenCatalog},
};

#[derive(Debug)]
pub enum CommandSummary {
    Collect(CollectSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CollectSummary {
    pub locale: String,
    /// Catalog files that received new keys, in group order.
    pub written: Vec<WrittenCatalog>,
    pub key_count: usize,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub locale: String,
    pub key_count: usize,
    /// Every reference to a missing key, sorted by location.
    pub usages: Vec<MissingKeyUsage>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of source files that were scanned.
    pub files_scanned: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Collect(_) => ExitStatus::Success,
            CommandSummary::Check(summary) if summary.key_count > 0 => ExitStatus::Failure,
            CommandSummary::Check(_) => ExitStatus::Success,
            CommandSummary::Init(summary) if !summary.created => ExitStatus::Failure,
            CommandSummary::Init(_) => ExitStatus::Success,
        }
    }
}
