use anyhow::Result;

use super::{CollectSummary, CommandResult, CommandSummary, context::CollectContext};
use crate::cli::args::CommonArgs;

/// Scan the project and write every missing key into the locale catalogs.
pub fn collect(args: &CommonArgs) -> Result<CommandResult> {
    let CollectContext {
        mut collector,
        locale,
        scan_dirs,
    } = CollectContext::new(args)?;

    let outcome = collector.collect_dirs(&scan_dirs, &locale)?;
    let written = collector.write_missing(&locale, &outcome.missing)?;

    Ok(CommandResult {
        summary: CommandSummary::Collect(CollectSummary {
            locale,
            written,
            key_count: outcome.missing.key_count(),
        }),
        files_scanned: outcome.files_scanned,
    })
}
