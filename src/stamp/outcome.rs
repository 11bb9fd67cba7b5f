// Per-file results of the annotation pipeline

use serde::Serialize;
use std::fmt;

/// Why a file was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Name ends with a backup or temporary suffix
    BackupArtifact,
    IgnoredName,
    IgnoredExtension,
    TooLarge,
    /// File size could not be read
    Unreadable,
    BackupFailed,
    Binary,
    Undecodable,
    Empty,
    AlreadyAnnotated,
    PermissionDenied,
}

impl SkipReason {
    /// Rejected by the eligibility filter before any disk activity
    pub fn is_ineligible(&self) -> bool {
        matches!(
            self,
            SkipReason::BackupArtifact
                | SkipReason::IgnoredName
                | SkipReason::IgnoredExtension
                | SkipReason::TooLarge
                | SkipReason::Unreadable
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::BackupArtifact => "backup or temporary file",
            SkipReason::IgnoredName => "ignored file name",
            SkipReason::IgnoredExtension => "ignored extension",
            SkipReason::TooLarge => "file too large",
            SkipReason::Unreadable => "cannot read file size",
            SkipReason::BackupFailed => "backup could not be created",
            SkipReason::Binary => "binary file",
            SkipReason::Undecodable => "no supported encoding",
            SkipReason::Empty => "empty file",
            SkipReason::AlreadyAnnotated => "already has path comment",
            SkipReason::PermissionDenied => "permission denied",
        };
        f.write_str(text)
    }
}

/// Terminal state of one file's transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Comment inserted and written back
    Annotated { comment: String },
    Skipped(SkipReason),
    /// An unexpected error occurred and the original bytes were put back
    Restored { error: String },
    /// Restoring failed too; the backup artifact is left on disk
    RestoreFailed { error: String, restore_error: String },
}

impl FileOutcome {
    pub fn is_annotated(&self) -> bool {
        matches!(self, FileOutcome::Annotated { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            FileOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}
