use anyhow::Result;

use super::{CheckSummary, CommandResult, CommandSummary, context::CollectContext};
use crate::cli::args::CommonArgs;

/// Scan the project and report the missing keys; catalogs are left untouched.
pub fn check(args: &CommonArgs) -> Result<CommandResult> {
    let CollectContext {
        mut collector,
        locale,
        scan_dirs,
    } = CollectContext::new(args)?;

    let outcome = collector.collect_dirs(&scan_dirs, &locale)?;

    Ok(CommandResult {
        summary: CommandSummary::Check(CheckSummary {
            locale,
            key_count: outcome.missing.key_count(),
            usages: outcome.usages,
        }),
        files_scanned: outcome.files_scanned,
    })
}
