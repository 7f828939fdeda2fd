use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output file written by [`crate::combine`] when none is configured.
pub const DEFAULT_OUTPUT: &str = "combined_text.txt";
/// Exclusion rule active when none is configured.
pub const DEFAULT_EXCLUDE_PATH: &str = ".git";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Null-byte and UTF-8 validity check over the first 512 bytes.
    #[default]
    Simple,
    /// `Simple`, and additionally rejects windows `content_inspector` reports as binary.
    Accurate,
}

/// The active filter set for one invocation.
///
/// Extensions are compared case-insensitively; exclusion rules are matched
/// against forward-slash relative paths (see [`crate::PathMatcher`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub include_extensions: Vec<String>,
    pub exclude_extensions: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub content_pattern: Option<String>,
}

impl FilterConfig {
    /// The content pattern, treating an empty string as "no pattern".
    pub fn pattern(&self) -> Option<&str> {
        self.content_pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Whether any filter category is non-empty.
    pub fn is_active(&self) -> bool {
        !self.include_extensions.is_empty()
            || !self.exclude_extensions.is_empty()
            || !self.exclude_paths.is_empty()
            || self.pattern().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub filters: FilterConfig,
    pub compact: bool,
    pub binary_detection: BinaryDetection,
}
impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            filters: FilterConfig {
                exclude_paths: vec![DEFAULT_EXCLUDE_PATH.to_string()],
                ..Default::default()
            },
            compact: true,
            binary_detection: BinaryDetection::Simple,
        }
    }
}

#[derive(Debug, Default)]
pub struct CombineBuilder {
    options: CombineOptions,
}
impl CombineBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: CombineOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }
    pub fn include_extensions<S: AsRef<str>>(mut self, exts: impl IntoIterator<Item = S>) -> Self {
        self.options.filters.include_extensions = normalize_extensions(exts);
        self
    }
    pub fn exclude_extensions<S: AsRef<str>>(mut self, exts: impl IntoIterator<Item = S>) -> Self {
        self.options.filters.exclude_extensions = normalize_extensions(exts);
        self
    }
    /// Replaces the exclusion rules, including the default `.git` rule.
    pub fn exclude_paths<S: AsRef<str>>(mut self, rules: impl IntoIterator<Item = S>) -> Self {
        self.options.filters.exclude_paths = normalize_rules(rules);
        self
    }
    pub fn content_pattern(mut self, pattern: Option<String>) -> Self {
        self.options.filters.content_pattern = pattern.filter(|p| !p.is_empty());
        self
    }
    pub fn compact(mut self, yes: bool) -> Self {
        self.options.compact = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> CombineOptions {
        self.options
    }
}

/// Trims, strips a leading dot, lowercases and drops empty entries.
pub fn normalize_extensions<S: AsRef<str>>(exts: impl IntoIterator<Item = S>) -> Vec<String> {
    exts.into_iter()
        .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Trims, strips a leading `./` and trailing slashes, drops empty entries.
pub fn normalize_rules<S: AsRef<str>>(rules: impl IntoIterator<Item = S>) -> Vec<String> {
    rules
        .into_iter()
        .map(|r| {
            let r = r.as_ref().trim();
            let r = r.strip_prefix("./").unwrap_or(r);
            r.trim_end_matches('/').to_string()
        })
        .filter(|r| !r.is_empty())
        .collect()
}
