use crate::compact::compact_bytes;
use crate::error::CombineError;
use crate::filter::{FilterChain, base_name, extension_of};
use crate::options::{BinaryDetection, CombineOptions, FilterConfig};
use crate::output::{format_header, write_file_section};
use crate::tree::build_tree_with;
use crate::types::{CombineSummary, FormatStatistics};
use crate::walk::Walker;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Creates `options.output` and writes the combined artifact into it.
///
/// The output file is excluded from both walks, so it may live inside the
/// scanned directory.
///
/// # Errors
///
/// [`CombineError::OutputCreate`] is returned before any traversal starts.
/// Traversal, read and write failures abort the run; whatever was already
/// written stays in the file.
pub fn combine(options: &CombineOptions) -> Result<CombineSummary, CombineError> {
    let file = File::create(&options.output).map_err(|e| CombineError::OutputCreate {
        path: options.output.clone(),
        source: e,
    })?;
    let output_abs =
        fs::canonicalize(&options.output).map_err(|e| CombineError::io(&options.output, e))?;
    let mut writer = BufWriter::new(file);
    let summary = combine_into(options, &mut writer, Some(&output_abs))?;
    writer
        .flush()
        .map_err(|e| CombineError::io(&options.output, e))?;
    Ok(summary)
}

/// Writes the combined artifact to `writer`. `options.output` is ignored.
pub fn combine_to_writer<W: Write>(
    options: &CombineOptions,
    writer: &mut W,
) -> Result<CombineSummary, CombineError> {
    combine_into(options, writer, None)
}

fn combine_into<W: Write>(
    options: &CombineOptions,
    writer: &mut W,
    output: Option<&Path>,
) -> Result<CombineSummary, CombineError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Starting combine with root: {}", options.root.display());
    let chain = FilterChain::new(
        &options.root,
        &options.filters,
        options.binary_detection,
        output,
    )?;
    let tree = build_tree_with(&options.root, &chain)?;
    writer
        .write_all(format_header(&tree, &options.filters).as_bytes())
        .map_err(CombineError::Write)?;

    let mut files = Vec::new();
    for entry in Walker::new(&options.root, chain.matcher())?.files() {
        let (path, relative) = entry?;
        if !chain.admits_file(&relative, &path) {
            continue;
        }
        let content = fs::read(&path).map_err(|e| CombineError::io(&path, e))?;
        let body: Cow<'_, [u8]> = if options.compact {
            Cow::Owned(compact_bytes(&content))
        } else {
            Cow::Borrowed(&content)
        };
        write_file_section(writer, &relative, &body).map_err(CombineError::Write)?;
        #[cfg(feature = "logging")]
        tracing::debug!("Wrote {} ({} bytes)", relative, body.len());
        files.push(relative);
    }
    Ok(CombineSummary { tree, files })
}

/// Counts files per extension label. Path exclusion, extension filters and
/// the content pattern apply; binary files are counted as well.
pub fn collect_format_stats(
    root: &Path,
    filters: &FilterConfig,
) -> Result<FormatStatistics, CombineError> {
    let chain = FilterChain::new(root, filters, BinaryDetection::default(), None)?;
    let mut stats = FormatStatistics::default();
    for entry in Walker::new(root, chain.matcher())?.files() {
        let (path, relative) = entry?;
        if chain.admits_for_stats(&relative, &path) {
            stats.record(&extension_of(base_name(&relative)));
        }
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Counted {} files under {}", stats.total(), root.display());
    Ok(stats)
}
