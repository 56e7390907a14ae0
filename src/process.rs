//! Directory sweep and resize orchestration.
//!
//! One linear pass: for each configured path, list its direct children
//! (non-recursive, filesystem order), run every entry through the filter
//! chain, and resize the survivors.
//!
//! ## Filter chain
//!
//! Checked in this order, short-circuiting on the first match; each skip is
//! debug-logged with its reason and no resize is attempted:
//!
//! 1. not a regular file (directories and symlinks — the symlink check does
//!    not follow the link, so a symlink *to* a file is still skipped);
//! 2. stale: last modified more than `max_age` minutes before the scan;
//! 3. already processed: stem ends with the configured output suffix;
//! 4. not an image: content signature unrecognized by the codec.
//!
//! A missing configured path is a warning and the next path is tried; any
//! other failure (unreadable directory, corrupt image, failed write) aborts
//! the run. Outputs already written stay in place — there is no rollback and
//! no retry.

use crate::codec::{DecodeError, EncodeError, ImageCodec, Quality};
use crate::naming;
use crate::planner::{self, InvalidDimension};
use crate::settings::Settings;
use std::fmt;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Plan(#[from] InvalidDimension),
}

/// Why an entry was excluded from processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAFile,
    TooOld,
    HasSuffix,
    NotAnImage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NotAFile => "not a regular file",
            SkipReason::TooOld => "too old",
            SkipReason::HasSuffix => "ends with output suffix",
            SkipReason::NotAnImage => "not an image",
        };
        f.write_str(reason)
    }
}

/// Counters for one run, reported by the binary when the sweep finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub resized: usize,
    pub skipped: usize,
    pub missing_paths: usize,
}

/// Sweep every configured path and write a resized copy for each surviving
/// entry. Strictly sequential; stops at the first fatal error.
pub fn run<C: ImageCodec>(codec: &C, settings: &Settings) -> Result<RunStats, ProcessError> {
    let mut stats = RunStats::default();

    for path in &settings.paths {
        if !path.exists() {
            warn!(path = %path.display(), "configured path does not exist, skipping");
            stats.missing_paths += 1;
            continue;
        }
        process_directory(codec, path, settings, &mut stats)?;
    }

    Ok(stats)
}

fn process_directory<C: ImageCodec>(
    codec: &C,
    dir: &Path,
    settings: &Settings,
    stats: &mut RunStats,
) -> Result<(), ProcessError> {
    let now = SystemTime::now();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(reason) = metadata_skip(&entry, now, settings)? {
            debug!(path = %path.display(), %reason, "skipped");
            stats.skipped += 1;
            continue;
        }

        // Decode before planning: only the codec can tell a candidate from
        // a text file that happens to sit in a watched directory.
        let image = match codec.decode(&path) {
            Ok(image) => image,
            Err(DecodeError::NotAnImage(_)) => {
                debug!(path = %path.display(), reason = %SkipReason::NotAnImage, "skipped");
                stats.skipped += 1;
                continue;
            }
            Err(fatal) => return Err(fatal.into()),
        };

        let source_dims = codec.dimensions(&image);
        let target = planner::plan(
            source_dims,
            settings.new_image.max_width,
            settings.new_image.max_height,
        )?;

        let output = naming::derived_path(&path, &settings.new_image.suffix);
        debug!(
            path = %path.display(),
            output = %output.display(),
            from = %source_dims,
            to = %target,
            "resizing"
        );
        codec.encode_jpeg(
            &image,
            target,
            Quality::new(settings.new_image.jpeg_quality),
            &output,
        )?;
        stats.resized += 1;
    }

    Ok(())
}

/// Filters decidable from metadata alone, in chain order. `Ok(None)` means
/// the entry goes on to the decode stage.
fn metadata_skip(
    entry: &std::fs::DirEntry,
    now: SystemTime,
    settings: &Settings,
) -> Result<Option<SkipReason>, ProcessError> {
    // DirEntry::file_type does not traverse symlinks
    if !entry.file_type()?.is_file() {
        return Ok(Some(SkipReason::NotAFile));
    }

    let modified = entry.metadata()?.modified()?;
    if is_stale(modified, now, settings.max_age()) {
        return Ok(Some(SkipReason::TooOld));
    }

    if naming::is_derived(&entry.path(), &settings.new_image.suffix) {
        return Ok(Some(SkipReason::HasSuffix));
    }

    Ok(None)
}

/// True if `modified` lies more than `max_age` before `now`. A modification
/// time in the future counts as age zero.
fn is_stale(modified: SystemTime, now: SystemTime, max_age: std::time::Duration) -> bool {
    now.duration_since(modified).unwrap_or_default() > max_age
}
