//! Artifact layout and the format statistics report.
//!
//! The combined artifact is the rendered tree, an optional "Filters applied"
//! block, an 80-dash separator, then one `== path ==` section per file.

use crate::error::CombineError;
use crate::options::FilterConfig;
use crate::tree::{TreeNode, render_tree};
use crate::types::FormatStatistics;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Width of the dash rule between the header and the file sections.
pub const SEPARATOR_WIDTH: usize = 80;
const STATS_RULE_WIDTH: usize = 36;

/// Supported statistics report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Text,
    Json,
}

/// Lists the active filters, one line per non-empty category, or `None` when
/// no filter is active.
pub fn filters_summary(config: &FilterConfig) -> Option<String> {
    if !config.is_active() {
        return None;
    }
    let mut out = String::from("Filters applied:\n");
    if !config.include_extensions.is_empty() {
        out.push_str(&format!(
            "- Including only: {}\n",
            config.include_extensions.join(", ")
        ));
    }
    if !config.exclude_extensions.is_empty() {
        out.push_str(&format!(
            "- Excluding extensions: {}\n",
            config.exclude_extensions.join(", ")
        ));
    }
    if !config.exclude_paths.is_empty() {
        out.push_str(&format!(
            "- Excluding paths: {}\n",
            config.exclude_paths.join(", ")
        ));
    }
    if let Some(pattern) = config.pattern() {
        out.push_str(&format!("- Only files containing: \"{}\"\n", pattern));
    }
    Some(out)
}

/// Tree, optional filters block and the separator.
pub fn format_header(tree: &TreeNode, config: &FilterConfig) -> String {
    let mut out = render_tree(tree);
    if let Some(summary) = filters_summary(config) {
        out.push('\n');
        out.push_str(&summary);
    }
    out.push('\n');
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push_str("\n\n");
    out
}

pub(crate) fn write_file_section<W: Write>(
    writer: &mut W,
    relative: &str,
    body: &[u8],
) -> io::Result<()> {
    writeln!(writer, "== {} ==", relative)?;
    writer.write_all(body)?;
    writer.write_all(b"\n\n")
}

#[derive(Serialize)]
struct StatsRow<'a> {
    extension: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    root: String,
    filters: &'a FilterConfig,
    extensions: Vec<StatsRow<'a>>,
    total: usize,
}

/// Formats the per-extension counts for `root`.
pub fn format_stats_report(
    stats: &FormatStatistics,
    root: &Path,
    config: &FilterConfig,
    format: StatsFormat,
) -> Result<String, CombineError> {
    match format {
        StatsFormat::Text => Ok(format_stats_text(stats, root, config)),
        StatsFormat::Json => {
            let report = StatsReport {
                root: root.display().to_string(),
                filters: config,
                extensions: stats
                    .sorted()
                    .into_iter()
                    .map(|(extension, count)| StatsRow { extension, count })
                    .collect(),
                total: stats.total(),
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn format_stats_text(stats: &FormatStatistics, root: &Path, config: &FilterConfig) -> String {
    let mut out = String::with_capacity(512);
    if let Some(summary) = filters_summary(config) {
        out.push_str(&summary);
        out.push('\n');
    }
    let rule = "-".repeat(STATS_RULE_WIDTH);
    out.push_str(&format!("File format statistics for {}:\n", root.display()));
    out.push_str(&rule);
    out.push('\n');
    for (label, count) in stats.sorted() {
        out.push_str(&format!("{:5} {} files\n", count, label));
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Total: {} files\n", stats.total()));
    out
}
