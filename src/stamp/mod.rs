// Path annotation library
// Walks a tree and prepends a relative-path comment to every eligible text file

pub mod backup;
pub mod classify;
pub mod comment;
pub mod config;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod outcome;
pub mod rules;
pub mod run;
pub mod transform;
pub mod walk;

// Re-export commonly used types for convenience
pub use backup::Backup;
pub use classify::{is_binary_file, is_binary_sample};
pub use comment::{has_annotation, normalized_relative_path, CommentStyle};
pub use config::Config;
pub use encoding::{DecodedText, TextEncoding};
pub use error::StampError;
pub use filter::{check_eligibility, should_process};
pub use outcome::{FileOutcome, SkipReason};
pub use rules::IgnoreRules;
pub use run::{process_directory, process_file, Annotator, RunOutcome, RunStats};
pub use transform::annotate_file;
pub use walk::{collect_files, walk_files};
