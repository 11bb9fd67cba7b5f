// Tests for comment module

use pathstamp::stamp::comment::{annotate, annotation_line, has_annotation, normalized_relative_path, CommentStyle};
use std::path::Path;

#[test]
fn test_style_by_extension() {
    assert_eq!(CommentStyle::for_path(Path::new("app.py")), CommentStyle::Hash);
    assert_eq!(CommentStyle::for_path(Path::new("deploy.YAML")), CommentStyle::Hash);
    assert_eq!(CommentStyle::for_path(Path::new("Cargo.toml")), CommentStyle::Hash);
    assert_eq!(CommentStyle::for_path(Path::new("app.ts")), CommentStyle::Slash);
    assert_eq!(CommentStyle::for_path(Path::new("Makefile")), CommentStyle::Slash);
}

#[test]
fn test_relative_path_uses_forward_slashes() {
    let root = Path::new("/work/project");
    let file = root.join("src").join("lib").join("app.ts");
    assert_eq!(normalized_relative_path(&file, root), "src/lib/app.ts");
}

#[test]
fn test_relative_path_at_root_level() {
    let root = Path::new("/work/project");
    assert_eq!(normalized_relative_path(&root.join("app.py"), root), "app.py");
}

#[test]
fn test_backslashes_in_names_are_normalized() {
    let root = Path::new("/work");
    let file = Path::new("/work/odd\\name.ts");
    assert_eq!(normalized_relative_path(file, root), "odd/name.ts");
}

#[test]
fn test_annotate_prepends_comment_and_blank_line() {
    let out = annotate("print('x')\n", CommentStyle::Hash, "app.py");
    assert_eq!(out, "# app.py\n\nprint('x')\n");
}

#[test]
fn test_annotate_keeps_crlf_content() {
    let out = annotate("a\r\nb\r\n", CommentStyle::Slash, "src/app.ts");
    assert_eq!(out, "// src/app.ts\n\na\r\nb\r\n");
}

#[test]
fn test_detects_own_annotation_in_either_style() {
    assert!(has_annotation("// src/app.ts\n\ncode", "src/app.ts"));
    assert!(has_annotation("# src/app.ts\ncode", "src/app.ts"));
    assert!(has_annotation("   // src/app.ts   \ncode", "src/app.ts"));
}

#[test]
fn test_detects_foreign_markers() {
    assert!(has_annotation("// File: somewhere/else.ts\n", "src/app.ts"));
    assert!(has_annotation("# File: x.py\n", "app.py"));
}

#[test]
fn test_annotation_for_other_path_not_detected() {
    assert!(!has_annotation("// src/other.ts\ncode", "src/app.ts"));
    assert!(!has_annotation("code\n// src/app.ts\n", "src/app.ts"));
}

#[test]
fn test_annotation_line() {
    assert_eq!(annotation_line(CommentStyle::Slash, "a/b.go"), "// a/b.go");
    assert_eq!(annotation_line(CommentStyle::Hash, "run.sh"), "# run.sh");
}
