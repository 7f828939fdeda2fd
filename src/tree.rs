//! Building and rendering the filtered directory tree.

use crate::error::CombineError;
use crate::filter::{FilterChain, relative_path};
use crate::options::{BinaryDetection, FilterConfig};
use crate::walk::{Walker, ensure_dir};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Banner that stands in for the scanned root in a rendered tree.
pub const TREE_BANNER: &str = "Directory Structure:";

/// One entry that survived every filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub is_dir: bool,
    /// Directories first, then by name. Always empty for files.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            children: Vec::new(),
        }
    }
    pub fn dir(name: impl Into<String>, mut children: Vec<TreeNode>) -> Self {
        sort_children(&mut children);
        Self {
            name: name.into(),
            is_dir: true,
            children,
        }
    }

    /// Forward-slash paths of every file below this node, depth first.
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for child in &self.children {
            child.collect_paths("", &mut paths);
        }
        paths
    }
    fn collect_paths(&self, parent: &str, out: &mut Vec<String>) {
        let path = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", parent, self.name)
        };
        if self.is_dir {
            for child in &self.children {
                child.collect_paths(&path, out);
            }
        } else {
            out.push(path);
        }
    }
}

fn sort_children(children: &mut [TreeNode]) {
    children.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
}

/// Builds the tree of entries under `root` that the filters let through.
///
/// Directories are kept unless an exclusion rule prunes them, even when none
/// of their files survive. Files appear exactly when they would be emitted by
/// [`crate::combine_to_writer`] under the same configuration.
///
/// # Errors
///
/// Fails on an invalid exclusion rule or on any traversal I/O error.
pub fn build_tree(
    root: &Path,
    filters: &FilterConfig,
    detection: BinaryDetection,
) -> Result<TreeNode, CombineError> {
    let chain = FilterChain::new(root, filters, detection, None)?;
    build_tree_with(root, &chain)
}

pub(crate) fn build_tree_with(root: &Path, chain: &FilterChain) -> Result<TreeNode, CombineError> {
    ensure_dir(root)?;
    let matched = match chain.pattern() {
        Some(_) => Some(scan_matches(root, chain)?),
        None => None,
    };
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());
    let children = assemble(root, root, chain, matched.as_ref())?;
    Ok(TreeNode::dir(name, children))
}

/// First pass: relative paths of every file passing the whole chain, pattern included.
fn scan_matches(root: &Path, chain: &FilterChain) -> Result<HashSet<String>, CombineError> {
    let mut matched = HashSet::new();
    for entry in Walker::new(root, chain.matcher())?.files() {
        let (path, relative) = entry?;
        if chain.admits_file(&relative, &path) {
            matched.insert(relative);
        }
    }
    #[cfg(feature = "logging")]
    tracing::debug!("{} files contain the pattern", matched.len());
    Ok(matched)
}

/// Second pass: one directory's surviving children, recursing into subdirectories.
fn assemble(
    root: &Path,
    dir: &Path,
    chain: &FilterChain,
    matched: Option<&HashSet<String>>,
) -> Result<Vec<TreeNode>, CombineError> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CombineError::io(dir, e))? {
        let entry = entry.map_err(|e| CombineError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| CombineError::io(&path, e))?;
        let relative = relative_path(root, &path);
        let name = entry.file_name().to_string_lossy().into_owned();
        if file_type.is_dir() {
            if chain.excludes(&relative) {
                continue;
            }
            let grandchildren = assemble(root, &path, chain, matched)?;
            children.push(TreeNode::dir(name, grandchildren));
            continue;
        }
        // The match set already holds only files that passed every filter.
        let keep = match matched {
            Some(set) => set.contains(&relative),
            None => chain.passes_file_filters(&relative, &path),
        };
        if keep {
            children.push(TreeNode::file(name));
        }
    }
    sort_children(&mut children);
    Ok(children)
}

/// Renders the children of `root` below the [`TREE_BANNER`] line using
/// box-drawing connectors; directories carry a trailing `/`.
pub fn render_tree(root: &TreeNode) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(TREE_BANNER);
    out.push('\n');
    render_children(&root.children, "", &mut out);
    out
}

fn render_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let (connector, continuation) = if is_last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.name);
        if child.is_dir {
            out.push('/');
        }
        out.push('\n');
        if !child.children.is_empty() {
            render_children(&child.children, &format!("{prefix}{continuation}"), out);
        }
    }
}
