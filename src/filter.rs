//! Per-file predicates and the filter chain shared by every walk.

use crate::error::CombineError;
use crate::matcher::PathMatcher;
use crate::options::{BinaryDetection, FilterConfig};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

const SNIFF_LEN: u64 = 512;

/// Whether the file looks like text: its first 512 bytes hold no null byte
/// and are valid UTF-8. Unopenable or unreadable files are not text.
pub fn is_text_file(path: &Path, detection: BinaryDetection) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_e) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Cannot open {}: {}", path.display(), _e);
            return false;
        }
    };
    let mut window = Vec::with_capacity(SNIFF_LEN as usize);
    if let Err(_e) = file.take(SNIFF_LEN).read_to_end(&mut window) {
        #[cfg(feature = "logging")]
        tracing::debug!("Cannot read {}: {}", path.display(), _e);
        return false;
    }
    is_text_window(&window, detection)
}

/// Classifies an already-read window of leading bytes.
pub fn is_text_window(window: &[u8], detection: BinaryDetection) -> bool {
    if window.contains(&0) || std::str::from_utf8(window).is_err() {
        return false;
    }
    match detection {
        BinaryDetection::Simple => true,
        BinaryDetection::Accurate => !content_inspector::inspect(window).is_binary(),
    }
}

/// Lowercased text after the final `.` of the base name; empty when there is none.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Include list is a whitelist (when non-empty), exclude list an overriding blacklist.
pub fn extension_included<S: AsRef<str>>(ext: &str, include: &[S], exclude: &[S]) -> bool {
    let ext = ext.to_lowercase();
    let listed = |set: &[S]| set.iter().any(|e| e.as_ref().to_lowercase() == ext);
    if !include.is_empty() && !listed(include) {
        return false;
    }
    exclude.is_empty() || !listed(exclude)
}

/// Literal, case-sensitive substring search over the whole file.
/// An empty pattern always matches; a read failure never does.
pub fn contains_pattern(path: &Path, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    match fs::read(path) {
        Ok(content) => content
            .windows(pattern.len())
            .any(|window| window == pattern.as_bytes()),
        Err(_e) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Cannot scan {}: {}", path.display(), _e);
            false
        }
    }
}

/// Forward-slash path of `path` relative to `root`.
pub(crate) fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

pub(crate) fn base_name(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

/// The predicate chain applied identically by tree assembly and emission:
/// output-file skip, path exclusion, extension filter, text classification
/// and, last, the content pattern. Statistics skip the text classification.
pub(crate) struct FilterChain<'a> {
    config: &'a FilterConfig,
    matcher: PathMatcher,
    detection: BinaryDetection,
    /// Canonical scan root and canonical output file.
    output: Option<(PathBuf, PathBuf)>,
}

impl<'a> FilterChain<'a> {
    pub(crate) fn new(
        root: &Path,
        config: &'a FilterConfig,
        detection: BinaryDetection,
        output: Option<&Path>,
    ) -> Result<Self, CombineError> {
        let matcher = PathMatcher::new(&config.exclude_paths)?;
        let output = match output {
            Some(out) => {
                let root_abs = fs::canonicalize(root).map_err(|e| CombineError::io(root, e))?;
                Some((root_abs, out.to_path_buf()))
            }
            None => None,
        };
        Ok(Self {
            config,
            matcher,
            detection,
            output,
        })
    }

    pub(crate) fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    pub(crate) fn pattern(&self) -> Option<&str> {
        self.config.pattern()
    }

    pub(crate) fn excludes(&self, relative: &str) -> bool {
        self.matcher.is_excluded(relative)
    }

    fn is_output(&self, relative: &str) -> bool {
        self.output
            .as_ref()
            .is_some_and(|(root, out)| root.join(relative) == *out)
    }

    /// Output-file skip, path exclusion and extension filter.
    fn passes_name_filters(&self, relative: &str) -> bool {
        !self.is_output(relative)
            && !self.excludes(relative)
            && extension_included(
                &extension_of(base_name(relative)),
                &self.config.include_extensions,
                &self.config.exclude_extensions,
            )
    }

    /// Every check except the content pattern.
    pub(crate) fn passes_file_filters(&self, relative: &str, path: &Path) -> bool {
        self.passes_name_filters(relative) && is_text_file(path, self.detection)
    }

    pub(crate) fn admits_file(&self, relative: &str, path: &Path) -> bool {
        self.passes_file_filters(relative, path)
            && self.pattern().is_none_or(|p| contains_pattern(path, p))
    }

    /// The chain without text classification: statistics count binary
    /// formats too, so they can be picked for exclusion.
    pub(crate) fn admits_for_stats(&self, relative: &str, path: &Path) -> bool {
        self.passes_name_filters(relative)
            && self.pattern().is_none_or(|p| contains_pattern(path, p))
    }
}
