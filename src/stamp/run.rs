// Run driver
// Walks a root, filters and transforms every file, and accumulates counters

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::config::Config;
use super::error::StampError;
use super::filter::check_eligibility;
use super::outcome::{FileOutcome, SkipReason};
use super::rules::IgnoreRules;
use super::transform::annotate_file;
use super::walk::walk_files;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RunOutcome {
    /// Every file under the root was visited
    Completed,
    /// The cancellation flag was raised between two files
    Interrupted,
    /// Directory enumeration failed; counters cover the files seen before
    Aborted { reason: String },
}

/// Counters collected during a run
///
/// Files inside pruned directories are never visited and appear in none of
/// the counters. Files rejected by the eligibility filter count as skipped
/// too, so the skipped total is not just a tally of transform outcomes.
/// Restored and restore-failed files count as skipped.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub root: PathBuf,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_restored: usize,
    pub restore_failures: usize,
    pub skip_reasons: BTreeMap<SkipReason, usize>,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    pub outcome: RunOutcome,
}

// Helper function to serialize Duration as seconds
fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

impl RunStats {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            files_processed: 0,
            files_skipped: 0,
            files_restored: 0,
            restore_failures: 0,
            skip_reasons: BTreeMap::new(),
            duration: Duration::ZERO,
            outcome: RunOutcome::Completed,
        }
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Annotated { .. } => self.files_processed += 1,
            FileOutcome::Skipped(reason) => {
                self.files_skipped += 1;
                *self.skip_reasons.entry(*reason).or_insert(0) += 1;
            }
            FileOutcome::Restored { .. } => {
                self.files_skipped += 1;
                self.files_restored += 1;
            }
            FileOutcome::RestoreFailed { .. } => {
                self.files_skipped += 1;
                self.restore_failures += 1;
            }
        }
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skip_reasons.get(&reason).copied().unwrap_or(0)
    }
}

/// Filter then transform a single file found under `root`
pub fn process_file(path: &Path, root: &Path, rules: &IgnoreRules) -> FileOutcome {
    match check_eligibility(path, rules) {
        Ok(()) => annotate_file(path, root),
        Err(reason) => {
            debug!(path = %path.display(), %reason, "Skipping file");
            FileOutcome::Skipped(reason)
        }
    }
}

/// Annotates every eligible file under one root directory
pub struct Annotator {
    root: PathBuf,
    rules: Arc<IgnoreRules>,
    use_ignore_files: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl Annotator {
    /// Create an Annotator with the built-in ignore rules
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: Arc::new(IgnoreRules::default()),
            use_ignore_files: true,
            cancel: None,
        }
    }

    /// Create an Annotator whose rules and options come from `config`
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root)
            .with_rules(IgnoreRules::from_config(config))
            .with_ignore_files(config.use_ignore_files)
    }

    pub fn with_rules(mut self, rules: IgnoreRules) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Enable or disable `.stampignore` support
    pub fn with_ignore_files(mut self, use_ignore_files: bool) -> Self {
        self.use_ignore_files = use_ignore_files;
        self
    }

    /// Stop between files once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Walk the root and annotate every eligible file
    ///
    /// Only an unusable root is an error. Interruption and walk failures end
    /// the run early with the counters gathered so far.
    pub fn run(&self) -> Result<RunStats, StampError> {
        let start_time = Instant::now();

        let root = self.root.canonicalize().map_err(|e| {
            StampError::from_io_error(e, "scanning directory", Some(self.root.clone()))
        })?;
        if !root.is_dir() {
            return Err(StampError::NotADirectory { path: root });
        }

        info!(root = %root.display(), "Processing files");
        let mut stats = RunStats::new(root.clone());

        for entry in walk_files(&root, Arc::clone(&self.rules), self.use_ignore_files) {
            if self.cancelled() {
                warn!("Run interrupted by user");
                stats.outcome = RunOutcome::Interrupted;
                break;
            }

            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!(error = %e, "Stopping walk");
                    stats.outcome = RunOutcome::Aborted {
                        reason: e.to_string(),
                    };
                    break;
                }
            };

            let outcome = process_file(&path, &root, &self.rules);
            stats.record(&outcome);
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }
}

/// Annotate everything under `root` with the built-in rules
pub fn process_directory(root: &Path) -> Result<RunStats, StampError> {
    Annotator::new(root).run()
}
