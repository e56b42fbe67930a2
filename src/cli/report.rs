//! Report formatting and printing utilities.
//!
//! Missing keys are displayed in cargo-style format. Kept apart from the
//! core so the collector can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CheckSummary, CollectSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::MissingKeyUsage;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const MISSING_KEY_RULE: &str = "missing-key";

pub fn print(result: &CommandResult) {
    let mut out = io::stdout().lock();
    match &result.summary {
        CommandSummary::Collect(summary) => {
            print_collect_to(summary, result.files_scanned, &mut out)
        }
        CommandSummary::Check(summary) => print_check_to(summary, result.files_scanned, &mut out),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print one `Updated file:` line per written catalog.
pub fn print_collect_to<W: Write>(summary: &CollectSummary, files_scanned: usize, writer: &mut W) {
    if summary.written.is_empty() {
        print_success_to(files_scanned, &summary.locale, writer);
        return;
    }

    for written in &summary.written {
        let _ = writeln!(
            writer,
            "{} {}",
            "Updated file:".green().bold(),
            written.path.display()
        );
    }
}

/// Print every missing key usage followed by a summary line.
pub fn print_check_to<W: Write>(summary: &CheckSummary, files_scanned: usize, writer: &mut W) {
    if summary.usages.is_empty() {
        print_success_to(files_scanned, &summary.locale, writer);
        return;
    }

    let max_line_width = summary
        .usages
        .iter()
        .map(|u| u.location.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for usage in &summary.usages {
        print_usage(usage, &summary.locale, writer, max_line_width);
    }

    let _ = writeln!(
        writer,
        "{} {} missing {} in locale \"{}\" ({} {})",
        FAILURE_MARK.red(),
        summary.key_count,
        if summary.key_count == 1 { "key" } else { "keys" }.red(),
        summary.locale,
        summary.usages.len(),
        if summary.usages.len() == 1 {
            "usage"
        } else {
            "usages"
        }
    );
}

/// Print a success message when nothing is missing.
pub fn print_success_to<W: Write>(files_scanned: usize, locale: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no missing keys in locale \"{}\"",
            files_scanned,
            if files_scanned == 1 { "file" } else { "files" },
            locale
        )
        .green()
    );
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

fn print_usage<W: Write>(
    usage: &MissingKeyUsage,
    locale: &str,
    writer: &mut W,
    max_line_width: usize,
) {
    let loc = &usage.location;

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        "error".bold().red(),
        usage.key,
        MISSING_KEY_RULE.dimmed().cyan()
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        loc.file_path().display(),
        loc.line,
        loc.col
    );

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        loc.line.to_string().blue(),
        "|".blue(),
        usage.source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = usage.source_line.chars().take(loc.col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".red(),
        width = max_line_width,
        padding = caret_padding
    );

    let _ = writeln!(
        writer,
        "{:>width$} {} {} not in locale \"{}\"",
        "",
        "=".blue(),
        "note:".bold(),
        locale,
        width = max_line_width
    );
    let _ = writeln!(writer);
}
