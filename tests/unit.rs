use combine_text::{
    BinaryDetection, FilterConfig, FormatStatistics, PathMatcher, StatsFormat, TreeNode, compact,
    compact_bytes, contains_pattern, extension_included, extension_of, filters_summary,
    format_stats_report, is_text_file, is_text_window, normalize_extensions, normalize_rules,
    render_tree,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_compact_indented_function() {
    let input = "def f():\n    x = 1\n\n    return x\n";
    assert_eq!(compact(input), "def f():   x = 1   return x");
}
#[test]
fn test_compact_blank_only() {
    assert_eq!(compact("\n   \n\t\n\r\n"), "");
    assert_eq!(compact(""), "");
}
#[test]
fn test_compact_tabs_and_line_endings() {
    let input = "a\r\n\tb\r\t\tc\n        d";
    // tab = 4 -> 2 spaces, two tabs = 8 -> 3 spaces, eight spaces -> 3 spaces
    assert_eq!(compact(input), "a   b    c    d");
}
#[test]
fn test_compact_first_line_indented() {
    assert_eq!(compact("  x\ny"), " x y");
}
#[test]
fn test_compact_keeps_inner_whitespace() {
    assert_eq!(compact("let  a =\t1;   \n"), "let  a =\t1;");
}

#[test]
fn test_compact_bytes_keeps_invalid_utf8_after_window() {
    let mut content = vec![b'a'; 600];
    content.extend_from_slice(b"\n  \xff tail\n");
    let compacted = compact_bytes(&content);
    assert!(compacted.ends_with(b"a  \xff tail"));
    assert!(!compacted.windows(3).any(|w| w == "\u{FFFD}".as_bytes()));
}
#[test]
fn test_path_matcher_directory_prefix() {
    let matcher = PathMatcher::new(&["node_modules"]).unwrap();
    assert!(matcher.is_excluded("node_modules"));
    assert!(matcher.is_excluded("node_modules/x.js"));
    assert!(matcher.is_excluded("node_modules/a/b/c.js"));
    assert!(!matcher.is_excluded("node_modules2/x.js"));
    assert!(!matcher.is_excluded("src/node_modules"));
}
#[test]
fn test_path_matcher_glob_is_single_segment() {
    let matcher = PathMatcher::new(&["*.log"]).unwrap();
    assert!(matcher.is_excluded("debug.log"));
    assert!(!matcher.is_excluded("logs/debug.log"));

    let matcher = PathMatcher::new(&["src/*.rs"]).unwrap();
    assert!(matcher.is_excluded("src/main.rs"));
    assert!(!matcher.is_excluded("src/bin/main.rs"));
}
#[test]
fn test_path_matcher_double_star_is_not_recursive() {
    let matcher = PathMatcher::new(&["**/*.tmp"]).unwrap();
    assert!(matcher.is_excluded("a/x.tmp"));
    assert!(!matcher.is_excluded("a/b/x.tmp"));
    assert!(!matcher.is_excluded("x.tmp"));
}
#[test]
fn test_path_matcher_glob_matching_directory_prunes_descendants() {
    let matcher = PathMatcher::new(&["build*"]).unwrap();
    assert!(matcher.is_excluded("build-out"));
    assert!(!matcher.is_excluded("src/build.rs"));
}
#[test]
fn test_path_matcher_any_rule_excludes() {
    let matcher = PathMatcher::new(&["dist", "temp.txt", "*.bak"]).unwrap();
    assert!(matcher.is_excluded("dist/app.js"));
    assert!(matcher.is_excluded("temp.txt"));
    assert!(matcher.is_excluded("old.bak"));
    assert!(!matcher.is_excluded("src/temp.txt"));
}
#[test]
fn test_path_matcher_braces_are_literal() {
    let matcher = PathMatcher::new(&["*.{js,ts}"]).unwrap();
    assert!(!matcher.is_excluded("a.js"));
    assert!(!matcher.is_excluded("a.ts"));
    assert!(matcher.is_excluded("a.{js,ts}"));
}
#[test]
fn test_path_matcher_bang_is_class_member() {
    let matcher = PathMatcher::new(&["[!a].txt"]).unwrap();
    assert!(!matcher.is_excluded("b.txt"));
    assert!(matcher.is_excluded("a.txt"));
    assert!(matcher.is_excluded("!.txt"));
    let ranged = PathMatcher::new(&["[!a-c]x"]).unwrap();
    assert!(ranged.is_excluded("bx"));
    assert!(ranged.is_excluded("!x"));
    assert!(!ranged.is_excluded("dx"));
}
#[test]
fn test_path_matcher_caret_negates_class() {
    let matcher = PathMatcher::new(&["[^a].txt"]).unwrap();
    assert!(matcher.is_excluded("b.txt"));
    assert!(!matcher.is_excluded("a.txt"));
}
#[test]
fn test_path_matcher_invalid_glob() {
    assert!(PathMatcher::new(&["[abc"]).is_err());
}
#[test]
fn test_path_matcher_empty() {
    let matcher = PathMatcher::new::<&str>(&[]).unwrap();
    assert!(matcher.is_empty());
    assert!(!matcher.is_excluded("anything"));
}

#[test]
fn test_extension_of() {
    assert_eq!(extension_of("main.RS"), "rs");
    assert_eq!(extension_of("archive.tar.gz"), "gz");
    assert_eq!(extension_of("Makefile"), "");
    assert_eq!(extension_of(".bashrc"), "bashrc");
    assert_eq!(extension_of("trailing."), "");
}
#[test]
fn test_extension_filter() {
    let include = ["py"];
    let exclude = ["pyc"];
    assert!(extension_included(&extension_of("a.py"), &include, &exclude));
    assert!(!extension_included(&extension_of("a.pyc"), &include, &exclude));
    assert!(!extension_included(&extension_of("a.txt"), &include, &exclude));
}
#[test]
fn test_extension_filter_exclude_wins() {
    assert!(!extension_included("py", &["py"], &["PY"]));
    assert!(extension_included("PY", &["py"], &[]));
    assert!(extension_included("", &[], &["exe"]));
    assert!(!extension_included("", &["txt"], &[]));
}
#[test]
fn test_normalize_lists() {
    assert_eq!(normalize_extensions([" .PY", "txt", ""]), vec!["py", "txt"]);
    assert_eq!(
        normalize_rules(["./dist/", " node_modules ", "", "a/b"]),
        vec!["dist", "node_modules", "a/b"]
    );
}

#[test]
fn test_text_classification() {
    let dir = tempdir().unwrap();
    let text = dir.path().join("a.txt");
    let nul = dir.path().join("b.bin");
    let latin1 = dir.path().join("c.txt");
    let empty = dir.path().join("d.txt");
    fs::write(&text, "héllo\n").unwrap();
    fs::write(&nul, b"ab\0cd").unwrap();
    fs::write(&latin1, [0x68u8, 0xe9, 0x6c]).unwrap();
    fs::write(&empty, "").unwrap();
    assert!(is_text_file(&text, BinaryDetection::Simple));
    assert!(!is_text_file(&nul, BinaryDetection::Simple));
    assert!(!is_text_file(&latin1, BinaryDetection::Simple));
    assert!(is_text_file(&empty, BinaryDetection::Simple));
    assert!(!is_text_file(&dir.path().join("missing"), BinaryDetection::Simple));
    assert!(!is_text_file(dir.path(), BinaryDetection::Simple));
}
#[test]
fn test_text_classification_window_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("late_nul.txt");
    let mut content = "a".repeat(600).into_bytes();
    content.push(0);
    fs::write(&path, content).unwrap();
    assert!(is_text_file(&path, BinaryDetection::Simple));
}
#[test]
fn test_text_window_accurate() {
    assert!(is_text_window(b"plain text", BinaryDetection::Accurate));
    assert!(!is_text_window(b"\x00\x01", BinaryDetection::Accurate));
}

#[test]
fn test_contains_pattern() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "fn main() { TODO }").unwrap();
    assert!(contains_pattern(&path, "TODO"));
    assert!(!contains_pattern(&path, "todo"));
    assert!(!contains_pattern(&path, "T.DO"));
    assert!(contains_pattern(&path, ""));
    assert!(!contains_pattern(&dir.path().join("missing"), "TODO"));
    assert!(contains_pattern(&dir.path().join("missing"), ""));
}

#[test]
fn test_render_tree_directory_before_file() {
    let root = TreeNode::dir(
        ".",
        vec![
            TreeNode::file("a.txt"),
            TreeNode::dir("zdir", vec![TreeNode::file("inner.txt")]),
        ],
    );
    assert_eq!(
        render_tree(&root),
        "Directory Structure:\n├── zdir/\n│   └── inner.txt\n└── a.txt\n"
    );
}
#[test]
fn test_render_tree_last_child_has_no_bar() {
    let root = TreeNode::dir(
        "project",
        vec![
            TreeNode::dir("a", vec![TreeNode::file("x")]),
            TreeNode::dir(
                "b",
                vec![TreeNode::dir("c", vec![TreeNode::file("y"), TreeNode::file("z")])],
            ),
        ],
    );
    let expected = "Directory Structure:\n\
                    ├── a/\n\
                    │   └── x\n\
                    └── b/\n\
                    \u{20}   └── c/\n\
                    \u{20}       ├── y\n\
                    \u{20}       └── z\n";
    assert_eq!(render_tree(&root), expected);
}
#[test]
fn test_render_tree_empty_root() {
    assert_eq!(render_tree(&TreeNode::dir("x", vec![])), "Directory Structure:\n");
}
#[test]
fn test_tree_node_file_paths() {
    let root = TreeNode::dir(
        ".",
        vec![
            TreeNode::file("b.txt"),
            TreeNode::dir("src", vec![TreeNode::file("lib.rs")]),
        ],
    );
    assert_eq!(root.file_paths(), vec!["src/lib.rs", "b.txt"]);
}

#[test]
fn test_format_statistics_sorted() {
    let mut stats = FormatStatistics::default();
    for ext in ["go", "go", "", "md", "go", ""] {
        stats.record(ext);
    }
    stats.record("c");
    stats.record("md");
    assert_eq!(stats.get("go"), 3);
    assert_eq!(stats.get("no-extension"), 2);
    assert_eq!(stats.total(), 8);
    assert_eq!(
        stats.sorted(),
        vec![("go", 3), ("md", 2), ("no-extension", 2), ("c", 1)]
    );
}

#[test]
fn test_filters_summary() {
    assert_eq!(filters_summary(&FilterConfig::default()), None);
    let config = FilterConfig {
        include_extensions: vec!["py".into(), "txt".into()],
        exclude_extensions: vec![],
        exclude_paths: vec![".git".into(), "dist".into()],
        content_pattern: Some("TODO".into()),
    };
    assert_eq!(
        filters_summary(&config).unwrap(),
        concat!(
            "Filters applied:\n",
            "- Including only: py, txt\n",
            "- Excluding paths: .git, dist\n",
            "- Only files containing: \"TODO\"\n",
        )
    );
    let empty_pattern = FilterConfig {
        content_pattern: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(filters_summary(&empty_pattern), None);
}
#[test]
fn test_stats_report_text() {
    let mut stats = FormatStatistics::default();
    stats.record("rs");
    stats.record("rs");
    stats.record("");
    let report = format_stats_report(
        &stats,
        Path::new("proj"),
        &FilterConfig::default(),
        StatsFormat::Text,
    )
    .unwrap();
    let rule = "-".repeat(36);
    assert_eq!(
        report,
        format!(
            "File format statistics for proj:\n{rule}\n{}{rule}\nTotal: 3 files\n",
            "    2 rs files\n    1 no-extension files\n"
        )
    );
}
#[test]
fn test_stats_report_json() {
    let mut stats = FormatStatistics::default();
    stats.record("toml");
    let report = format_stats_report(
        &stats,
        Path::new("proj"),
        &FilterConfig::default(),
        StatsFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["total"], 1);
    assert_eq!(value["extensions"][0]["extension"], "toml");
    assert_eq!(value["root"], "proj");
}
