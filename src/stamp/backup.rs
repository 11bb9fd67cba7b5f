//! Scoped backup artifacts.
//!
//! A [`Backup`] copies a file's bytes to `<path>.bak` on creation and removes
//! that copy when dropped, so every early return of the transform cleans up.
//! The only way to leave the artifact on disk is a failed [`Backup::restore`].

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::StampError;
use super::rules::BACKUP_SUFFIX;

#[derive(Debug)]
pub struct Backup {
    original: PathBuf,
    path: PathBuf,
    /// Set once the artifact no longer needs removal, or must be kept
    released: bool,
}

impl Backup {
    /// Backup path for `original`: the full path with the suffix appended
    pub fn path_for(original: &Path) -> PathBuf {
        let mut name = OsString::from(original.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Copy `original` to its backup path, replacing a stale backup
    pub fn create(original: &Path) -> Result<Self, StampError> {
        let path = Self::path_for(original);

        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Removed stale backup"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StampError::from_io_error(
                    e,
                    "removing stale backup of",
                    Some(original.to_path_buf()),
                ))
            }
        }

        if let Err(e) = fs::copy(original, &path) {
            // drop any partial copy
            let _ = fs::remove_file(&path);
            return Err(StampError::from_io_error(
                e,
                "backing up",
                Some(original.to_path_buf()),
            ));
        }

        Ok(Self {
            original: original.to_path_buf(),
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically move the backup over the original file.
    ///
    /// On failure the backup is left on disk for manual recovery.
    pub fn restore(mut self) -> Result<(), StampError> {
        self.released = true;
        fs::rename(&self.path, &self.original).map_err(|e| {
            StampError::from_io_error(e, "restoring", Some(self.original.clone()))
        })
    }
}

impl Drop for Backup {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.original.display(),
                error = %e,
                "Failed to clean up backup"
            ),
        }
    }
}
