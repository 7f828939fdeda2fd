//! # combine-text
//!
//! `combine_text` walks a directory tree, keeps the text files that pass a
//! set of filters (extension allow/deny lists, path exclusion rules, a literal
//! content pattern) and writes them into one artifact headed by a rendering of
//! the surviving directory structure.
//!
//! The tree header and the emitted files always agree: both are decided by
//! the same filter chain. File content is written verbatim or compacted into
//! a single line that keeps a coarse indentation signal (see [`compact`]).
//!
//! # Features
//!
//! - `logging` (default): debug events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use combine_text::{CombineBuilder, combine};
//!
//! let options = CombineBuilder::new("./project")
//!     .output("combined_text.txt")
//!     .include_extensions(["rs", "toml"])
//!     .exclude_paths([".git", "target"])
//!     .content_pattern(Some("fn ".to_string()))
//!     .build();
//!
//! let summary = combine(&options).expect("Failed to combine directory");
//! for path in &summary.files {
//!     println!("{}", path);
//! }
//! ```

mod compact;
mod engine;
mod error;
mod filter;
mod matcher;
mod options;
mod output;
mod tree;
mod types;
mod walk;

pub use compact::{compact, compact_bytes};
pub use engine::{collect_format_stats, combine, combine_to_writer};
pub use error::CombineError;
pub use filter::{
    contains_pattern, extension_included, extension_of, is_text_file, is_text_window,
};
pub use matcher::PathMatcher;
pub use options::{
    BinaryDetection, CombineBuilder, CombineOptions, DEFAULT_EXCLUDE_PATH, DEFAULT_OUTPUT,
    FilterConfig, normalize_extensions, normalize_rules,
};
pub use output::{
    SEPARATOR_WIDTH, StatsFormat, filters_summary, format_header, format_stats_report,
};
pub use tree::{TREE_BANNER, TreeNode, build_tree, render_tree};
pub use types::{CombineSummary, FormatStatistics, NO_EXTENSION};
