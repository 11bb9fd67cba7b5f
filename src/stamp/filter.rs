// Eligibility filter
// Decides from name, extension and size whether a file is worth transforming

use humansize::{format_size, BINARY};
use std::fs;
use std::path::Path;
use tracing::warn;

use super::outcome::SkipReason;
use super::rules::{IgnoreRules, BACKUP_SUFFIXES};

/// Check whether `path` should be handed to the transform
///
/// Returns the reason when it should not. Only the size checks touch
/// the filesystem.
pub fn check_eligibility(path: &Path, rules: &IgnoreRules) -> Result<(), SkipReason> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    if BACKUP_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return Err(SkipReason::BackupArtifact);
    }
    if rules.is_ignored_file(&name) {
        return Err(SkipReason::IgnoredName);
    }
    if rules.is_ignored_extension(&name) {
        return Err(SkipReason::IgnoredExtension);
    }

    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > rules.max_file_size() => {
            warn!(
                path = %path.display(),
                size = %format_size(metadata.len(), BINARY),
                limit = %format_size(rules.max_file_size(), BINARY),
                "Skipping large file"
            );
            Err(SkipReason::TooLarge)
        }
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read file size");
            Err(SkipReason::Unreadable)
        }
    }
}

/// Boolean form of [`check_eligibility`]
pub fn should_process(path: &Path, rules: &IgnoreRules) -> bool {
    check_eligibility(path, rules).is_ok()
}
