//! Path exclusion rules.
//!
//! Every configured rule string is compiled into up to three [`PathRule`]s:
//! an exact match, a directory-prefix match (`rule/…`), and, when the rule
//! contains glob metacharacters, a single-segment glob. Any positive match
//! excludes the path.

use crate::error::CombineError;
use globset::{GlobBuilder, GlobMatcher};
use std::borrow::Cow;
use std::path::MAIN_SEPARATOR;

#[derive(Debug, Clone)]
enum PathRule {
    Exact(String),
    /// Stored with its trailing `/`.
    Prefix(String),
    Glob(GlobMatcher),
}

impl PathRule {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathRule::Exact(rule) => path == rule,
            PathRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
            PathRule::Glob(matcher) => matcher.is_match(path),
        }
    }
}

/// Decides whether a path relative to the scan root is excluded.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    rules: Vec<PathRule>,
}

impl PathMatcher {
    /// Compiles the rules in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CombineError::InvalidPattern`] when a rule containing glob
    /// metacharacters does not parse as a glob.
    pub fn new<S: AsRef<str>>(rules: &[S]) -> Result<Self, CombineError> {
        let mut compiled = Vec::with_capacity(rules.len() * 2);
        for raw in rules {
            let rule = to_slash(raw.as_ref());
            if rule.is_empty() {
                continue;
            }
            compiled.push(PathRule::Exact(rule.to_string()));
            compiled.push(PathRule::Prefix(format!("{rule}/")));
            if is_glob(&rule) {
                compiled.push(PathRule::Glob(compile_glob(&rule)?));
            }
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_excluded(&self, relative_path: &str) -> bool {
        let path = to_slash(relative_path);
        self.rules.iter().any(|rule| rule.matches(&path))
    }
}

fn to_slash(path: &str) -> Cow<'_, str> {
    if MAIN_SEPARATOR == '/' {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.replace(MAIN_SEPARATOR, "/"))
    }
}

fn is_glob(rule: &str) -> bool {
    rule.contains(['*', '?', '['])
}

fn compile_glob(rule: &str) -> Result<GlobMatcher, CombineError> {
    let pattern = to_shell_glob(rule);
    GlobBuilder::new(&pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| CombineError::InvalidPattern {
            pattern: rule.to_string(),
            reason: e.to_string(),
        })
}

/// Rewrites a shell-style rule into globset syntax with the same meaning.
/// Runs of `*` fold into one so `**` never spans segments, braces and commas
/// stay literal, and a leading `!` in a class is a member, not a negation.
fn to_shell_glob(rule: &str) -> String {
    let chars: Vec<char> = rule.chars().collect();
    let mut out = String::with_capacity(rule.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                out.push(c);
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                    i += 1;
                }
            }
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '{' | '}' | ',' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&chars[i + 1..end], &mut out);
                    i = end;
                }
                None => out.push(c),
            },
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `open`. A `]` directly after
/// the bracket (or after a `^`) is a member.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if chars.get(i) == Some(&'^') {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    let start = i.min(chars.len());
    chars[start..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| start + offset)
}

fn push_class(members: &[char], out: &mut String) {
    match members.split_first() {
        Some((&'!', [])) => out.push('!'),
        Some((&'!', rest)) => {
            // Moved behind the first member, where globset reads it literally.
            let first = if rest.len() > 2 && rest[1] == '-' { 3 } else { 1 };
            out.push('[');
            out.extend(&rest[..first]);
            out.push('!');
            out.extend(&rest[first..]);
            out.push(']');
        }
        _ => {
            out.push('[');
            out.extend(members);
            out.push(']');
        }
    }
}
