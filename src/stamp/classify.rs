// Binary/text classification
// Extension allow-list first, then a content sniff of the leading bytes

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::rules::{has_extension_in, TEXT_FILE_EXTENSIONS};

/// Number of leading bytes inspected by the content sniff
pub const SAMPLE_SIZE: usize = 8192;

/// Share of control bytes above which a sample is considered binary
pub const CONTROL_RATIO_THRESHOLD: f64 = 0.3;

/// Classify a file as binary
///
/// Known text extensions are trusted without reading. Any read error
/// classifies the file as binary so it gets skipped.
pub fn is_binary_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if has_extension_in(&name, TEXT_FILE_EXTENSIONS) {
        return false;
    }

    match read_sample(path) {
        Ok(sample) => is_binary_sample(&sample),
        Err(_) => true,
    }
}

/// Content heuristic: any NUL byte, or more than 30% control bytes
/// (tab, LF and CR excluded). An empty sample is text.
pub fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return true;
    }
    if sample.is_empty() {
        return false;
    }
    let control = sample
        .iter()
        .filter(|&&b| b < 32 && !matches!(b, b'\t' | b'\n' | b'\r'))
        .count();
    control as f64 / sample.len() as f64 > CONTROL_RATIO_THRESHOLD
}

fn read_sample(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64).read_to_end(&mut sample)?;
    Ok(sample)
}
