use crate::error::CombineError;
use crate::filter::relative_path;
use crate::matcher::PathMatcher;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Depth-first walk over every file under `root`, in lexical name order,
/// with excluded directories pruned before descent.
pub(crate) struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
}
impl Walker {
    pub(crate) fn new(root: &Path, matcher: &PathMatcher) -> Result<Self, CombineError> {
        ensure_dir(root)?;
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        if !matcher.is_empty() {
            let matcher = matcher.clone();
            let base = root.to_path_buf();
            builder.filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !is_dir || !matcher.is_excluded(&relative_path(&base, entry.path()))
            });
        }
        Ok(Self {
            inner: builder.build(),
            root: root.to_path_buf(),
        })
    }
    /// Yields `(path, relative path)` for every non-directory entry.
    pub(crate) fn files(self) -> impl Iterator<Item = Result<(PathBuf, String), CombineError>> {
        let root = self.root;
        self.inner.filter_map(move |result| match result {
            Ok(entry) if entry.depth() == 0 => None,
            Ok(entry) if entry.file_type().is_some_and(|t| t.is_dir()) => None,
            Ok(entry) => {
                let relative = relative_path(&root, entry.path());
                Some(Ok((entry.into_path(), relative)))
            }
            Err(e) => Some(Err(CombineError::Walk(e.to_string()))),
        })
    }
}

pub(crate) fn ensure_dir(root: &Path) -> Result<(), CombineError> {
    let metadata = fs::metadata(root).map_err(|e| CombineError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(CombineError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    Ok(())
}
