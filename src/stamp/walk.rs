// Directory walking module
// Enumerates regular files under a root, pruning ignored directories before descent

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::StampError;
use super::rules::{IgnoreRules, IGNORE_FILE_NAME};

/// Lazily enumerate the regular files under `root`.
///
/// Directories named in the ignore set are pruned, so nothing below them is
/// ever read. Siblings come out sorted by file name. Symbolic links are not
/// followed and not yielded, file links included: restoring through a rename
/// would turn the link into a regular file. `os.walk`-style tools that list
/// file links and write through them annotate their targets; this walker
/// does not. With `use_ignore_files`, paths matched by
/// `.stampignore` files in the tree or its ancestors are excluded as well.
pub fn walk_files(
    root: &Path,
    rules: Arc<IgnoreRules>,
    use_ignore_files: bool,
) -> impl Iterator<Item = Result<PathBuf, StampError>> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    if use_ignore_files {
        builder.add_custom_ignore_filename(IGNORE_FILE_NAME);
        builder.parents(true);
    }

    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        !(is_dir && rules.is_ignored_dir(&entry.file_name().to_string_lossy()))
    });

    builder.build().filter_map(|result| match result {
        Ok(entry) => {
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            is_file.then(|| Ok(entry.into_path()))
        }
        Err(e) => Some(Err(StampError::WalkFailed {
            reason: e.to_string(),
        })),
    })
}

/// Collect every file [`walk_files`] yields, failing on the first walk error
pub fn collect_files(
    root: &Path,
    rules: Arc<IgnoreRules>,
    use_ignore_files: bool,
) -> Result<Vec<PathBuf>, StampError> {
    walk_files(root, rules, use_ignore_files).collect()
}
