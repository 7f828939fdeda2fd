use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label counted for files whose name has no `.`.
pub const NO_EXTENSION: &str = "no-extension";

/// Extension label to file count, accumulated over one filtered walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatStatistics {
    counts: HashMap<String, usize>,
}

impl FormatStatistics {
    /// Counts one file with the given (already lowercased) extension.
    pub fn record(&mut self, ext: &str) {
        let label = if ext.is_empty() { NO_EXTENSION } else { ext };
        *self.counts.entry(label.to_string()).or_default() += 1;
    }
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Rows by descending count, ties broken alphabetically.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut rows: Vec<_> = self
            .counts
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

/// What one combine run produced.
#[derive(Debug, Serialize, Deserialize)]
pub struct CombineSummary {
    /// The tree rendered in the artifact header.
    pub tree: TreeNode,
    /// Relative paths of the emitted files, in emission order.
    pub files: Vec<String>,
}
