// Centralized error handling module
// Provides error types with path and operation context for every stage of a run

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::encoding::TextEncoding;

/// Main error type for the annotator
/// Carries the path and the operation that failed so diagnostics stay actionable
#[derive(Debug)]
pub enum StampError {
    /// File system errors with context
    FileNotFound { path: PathBuf },
    DirectoryNotFound { path: PathBuf },
    NotADirectory { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Text could not be re-encoded with the encoding it was decoded with
    EncodeFailed { path: PathBuf, encoding: TextEncoding },

    /// Directory enumeration errors
    WalkFailed { reason: String },
}

impl fmt::Display for StampError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StampError::FileNotFound { path } => {
                write!(f, "File not found: {}\n", path.display())?;
                write!(f, "Suggestion: The file may have been moved or deleted during the run")
            }
            StampError::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}\n", path.display())?;
                write!(f, "Suggestion: Check that the directory path is correct and the directory exists")
            }
            StampError::NotADirectory { path } => {
                write!(f, "Not a directory: {}\n", path.display())?;
                write!(f, "Suggestion: Pass the folder that contains the files to annotate")
            }
            StampError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} file: {}\n", operation, path.display())?;
                write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
            }
            StampError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} file {}: {}\n", operation, p.display(), source)?;
                } else {
                    write!(f, "I/O error while {}: {}\n", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk space")
            }
            StampError::EncodeFailed { path, encoding } => {
                write!(
                    f,
                    "Cannot encode annotated content of {} as {}\n",
                    path.display(),
                    encoding.label()
                )?;
                write!(f, "Suggestion: The relative path contains characters the file's encoding cannot represent")
            }
            StampError::WalkFailed { reason } => {
                write!(f, "Directory walk failed: {}\n", reason)?;
                write!(f, "Suggestion: Check that every directory under the root is readable")
            }
        }
    }
}

impl std::error::Error for StampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StampError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StampError {
    /// Create an error with context about the operation and optional path,
    /// mapping well-known I/O error kinds onto dedicated variants
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(p)) => {
                if operation.contains("directory") {
                    StampError::DirectoryNotFound { path: p }
                } else {
                    StampError::FileNotFound { path: p }
                }
            }
            (io::ErrorKind::PermissionDenied, Some(p)) => StampError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            (_, path) => StampError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }

    /// Permission problems are terminal skips: the file is known to be unmodified
    pub fn is_permission_denied(&self) -> bool {
        match self {
            StampError::PermissionDenied { .. } => true,
            StampError::IoError { source, .. } => source.kind() == io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}
