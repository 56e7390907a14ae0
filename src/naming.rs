//! Centralized filename handling for the output-suffix convention.
//!
//! Every resized copy gets a fixed token appended to its stem
//! (`photo.png` + `_small` → `photo_small.png`), and any file whose stem
//! already ends with that token is excluded from future scans. Keeping both
//! sides of the convention in one module is what makes the recursion guard
//! airtight: the detector and the generator can't drift apart.
//!
//! Only the final `.`-delimited extension counts as the extension, so
//! `archive.tar.gz` has stem `archive.tar` — a stem ending in the suffix by
//! way of an inner extension is still treated as derived.

use std::path::{Path, PathBuf};

/// True if `path`'s file stem ends with `suffix`, i.e. the file is a prior
/// output of this tool and must not be reprocessed.
pub fn is_derived(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}

/// Build the output path for a source file: `suffix` inserted before the
/// final extension, alongside the original.
///
/// The original extension is kept as-is even though the written bytes are
/// always JPEG — consumers of this tool's output rely on that naming. A file
/// without any extension gets the suffix appended to the end of its name.
pub fn derived_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match path.extension() {
        Some(ext) => path.with_file_name(format!("{stem}{suffix}.{}", ext.to_string_lossy())),
        None => path.with_file_name(format!("{stem}{suffix}")),
    }
}
