//! @ai:module:intent Format scan results and export summaries (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_scan_result, format_export_summary
//! @ai:module:depends_on discovery, assembly, record
//! @ai:module:stateless true

use crate::assembly::DeckCollection;
use crate::discovery::ScanResult;
use crate::record::SourceRecord;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

#[derive(Serialize)]
struct ScanReport<'a> {
    files_checked: usize,
    codeblocks: &'a [SourceRecord],
    callouts: &'a [SourceRecord],
}

/// @ai:intent Format scan results as a string
/// @ai:effects pure
pub fn format_scan_result(result: &ScanResult, format: OutputFormat) -> String {
    let report = ScanReport {
        files_checked: result.files_checked,
        codeblocks: &result.records.codeblocks,
        callouts: &result.records.callouts,
    };

    match format {
        OutputFormat::Json => serde_json::to_string(&report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report).unwrap_or_default(),
        OutputFormat::Text => format_scan_result_text(result),
    }
}

/// @ai:intent Format scan results as human-readable text
/// @ai:effects pure
fn format_scan_result_text(result: &ScanResult) -> String {
    let mut output = String::new();

    for record in result
        .records
        .codeblocks
        .iter()
        .chain(result.records.callouts.iter())
    {
        output.push_str(&format!(
            "{} {} {}\n",
            record.kind.name().cyan().bold(),
            record.record_type.bold(),
            record.location.to_string().dimmed()
        ));

        output.push_str(&format!(
            "  {} {}\n",
            "headers:".yellow(),
            record.headers.join(" ")
        ));

        for line in record.content.lines() {
            output.push_str(&format!("  {} {}\n", "|".dimmed(), line));
        }
    }

    output.push('\n');
    output.push_str(&format_counts(result));

    output
}

/// @ai:intent Summarize how many records were found
/// @ai:effects pure
pub fn format_counts(result: &ScanResult) -> String {
    format!(
        "Checked {} files\nFound {} codeblocks\nFound {} callouts\n",
        result.files_checked,
        result.records.codeblocks.len(),
        result.records.callouts.len()
    )
}

/// @ai:intent Format the outcome of a package export
/// @ai:effects pure
pub fn format_export_summary(decks: &DeckCollection, package_path: &Path) -> String {
    let mut output = String::new();

    for deck in decks.decks() {
        output.push_str(&format!(
            "  {} ({} notes)\n",
            deck.name.cyan(),
            deck.notes.len()
        ));
    }

    output.push_str(&format!(
        "{} Created {}\n",
        "OK".green().bold(),
        package_path.display()
    ));

    output
}
