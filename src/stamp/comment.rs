// Annotation construction and detection
// Builds the `<marker> <relative path>` header and recognizes existing ones

use std::path::{Component, Path};

use super::rules::{has_extension_in, HASH_COMMENT_EXTENSIONS};

/// Generic prefixes left by other path-stamping tools
pub const FOREIGN_MARKERS: &[&str] = &["// File:", "# File:"];

/// Comment marker used for the annotation line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `#`, for scripting and config languages
    Hash,
    /// `//`, for everything else
    Slash,
}

impl CommentStyle {
    pub fn for_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if has_extension_in(&name, HASH_COMMENT_EXTENSIONS) {
            CommentStyle::Hash
        } else {
            CommentStyle::Slash
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            CommentStyle::Hash => "#",
            CommentStyle::Slash => "//",
        }
    }
}

/// Relative path of `path` under `root` with `/` separators on every host.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn normalized_relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect();
    parts.join("/").replace('\\', "/")
}

/// Annotation line for a file, without the trailing newline
pub fn annotation_line(style: CommentStyle, relative: &str) -> String {
    format!("{} {}", style.marker(), relative)
}

/// Content with the annotation and a blank line prepended.
/// Line endings of the original content are left as they are.
pub fn annotate(content: &str, style: CommentStyle, relative: &str) -> String {
    format!("{}\n\n{}", annotation_line(style, relative), content)
}

/// Whether the first line already carries an annotation for `relative`
/// in either style, or a marker from another tool
pub fn has_annotation(content: &str, relative: &str) -> bool {
    let first_line = content.split('\n').next().unwrap_or("").trim();
    let own = [
        annotation_line(CommentStyle::Slash, relative),
        annotation_line(CommentStyle::Hash, relative),
    ];
    own.iter().any(|line| first_line.starts_with(line.as_str()))
        || FOREIGN_MARKERS.iter().any(|marker| first_line.starts_with(marker))
}
