// Safe per-file transform
// backup -> classify -> decode -> check -> mutate -> write, restoring on unexpected failure

use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};

use super::backup::Backup;
use super::classify::is_binary_file;
use super::comment::{annotate, annotation_line, has_annotation, normalized_relative_path, CommentStyle};
use super::encoding;
use super::error::StampError;
use super::outcome::{FileOutcome, SkipReason};

/// Prepend the path comment to one file
///
/// `root` is the directory the comment path is relative to. The file is
/// written at most once. Its backup artifact is gone when this returns,
/// unless the outcome is [`FileOutcome::RestoreFailed`].
pub fn annotate_file(path: &Path, root: &Path) -> FileOutcome {
    let backup = match Backup::create(path) {
        Ok(backup) => backup,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to create backup");
            return FileOutcome::Skipped(SkipReason::BackupFailed);
        }
    };

    match transform(path, root) {
        Ok(outcome) => {
            drop(backup);
            outcome
        }
        Err(e) if e.is_permission_denied() => {
            warn!(path = %path.display(), "Permission denied");
            FileOutcome::Skipped(SkipReason::PermissionDenied)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error processing file");
            let backup_path = backup.path().to_path_buf();
            match backup.restore() {
                Ok(()) => {
                    info!(path = %path.display(), "Restored backup");
                    FileOutcome::Restored { error: e.to_string() }
                }
                Err(restore_error) => {
                    error!(
                        path = %path.display(),
                        backup = %backup_path.display(),
                        error = %restore_error,
                        "Failed to restore backup"
                    );
                    FileOutcome::RestoreFailed {
                        error: e.to_string(),
                        restore_error: restore_error.to_string(),
                    }
                }
            }
        }
    }
}

/// Everything between backup and cleanup. Skips are `Ok`; only genuine
/// failures come back as `Err`.
fn transform(path: &Path, root: &Path) -> Result<FileOutcome, StampError> {
    if is_binary_file(path) {
        debug!(path = %path.display(), "Skipping binary file");
        return Ok(FileOutcome::Skipped(SkipReason::Binary));
    }

    let bytes = fs::read(path)
        .map_err(|e| StampError::from_io_error(e, "reading", Some(path.to_path_buf())))?;

    let Some(decoded) = encoding::decode(&bytes) else {
        info!(path = %path.display(), "Unable to read file with supported encodings");
        return Ok(FileOutcome::Skipped(SkipReason::Undecodable));
    };

    if decoded.text.trim().is_empty() {
        debug!(path = %path.display(), "Skipping empty file");
        return Ok(FileOutcome::Skipped(SkipReason::Empty));
    }

    let relative = normalized_relative_path(path, root);
    if has_annotation(&decoded.text, &relative) {
        info!(path = %relative, "File already has path comment");
        return Ok(FileOutcome::Skipped(SkipReason::AlreadyAnnotated));
    }

    let style = CommentStyle::for_path(path);
    let annotated = annotate(&decoded.text, style, &relative);
    let bytes = decoded
        .encoding
        .encode(&annotated)
        .ok_or_else(|| StampError::EncodeFailed {
            path: path.to_path_buf(),
            encoding: decoded.encoding,
        })?;

    fs::write(path, bytes)
        .map_err(|e| StampError::from_io_error(e, "writing", Some(path.to_path_buf())))?;

    info!(path = %path.display(), encoding = decoded.encoding.label(), "Added path comment");
    Ok(FileOutcome::Annotated {
        comment: annotation_line(style, &relative),
    })
}
