//! Typed run settings loaded from a TOML file.
//!
//! The settings object is immutable once loaded and is the only configuration
//! the pipeline ever sees. All validation happens here, at the load boundary;
//! downstream code does not re-validate beyond dimension positivity.
//!
//! ## File format
//!
//! ```toml
//! paths = ["/srv/camera/%Y-%m-%d", "/srv/inbox"]
//! max_age = 60            # minutes
//!
//! [new_image]
//! suffix = "_small"
//! max_width = 1920
//! max_height = 1080
//! jpeg_quality = 80
//! ```
//!
//! Paths may contain `strftime` directives (`%Y`, `%m`, …). They are resolved
//! exactly once, against the local clock at load time, so a run that straddles
//! midnight keeps scanning the directories it started with.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid time format directive in path '{0}'")]
    TimeFormat(String),
    #[error("jpeg_quality must be between 1 and 100, got {0}")]
    QualityOutOfRange(u8),
    #[error("max_width and max_height must be positive, got {max_width}x{max_height}")]
    ZeroDimension { max_width: u32, max_height: u32 },
    #[error("new_image.suffix must not be empty")]
    EmptySuffix,
}

/// Immutable settings for one run.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directories to scan, in order. May be empty (the run is a no-op).
    pub paths: Vec<PathBuf>,
    /// Files last modified more than this many minutes ago are skipped.
    pub max_age: u64,
    pub new_image: NewImageSettings,
}

/// The `[new_image]` group: how resized copies are produced and named.
#[derive(Debug, Clone, Deserialize)]
pub struct NewImageSettings {
    /// Token appended to the stem of every output; files already carrying it
    /// are excluded from scans.
    pub suffix: String,
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
}

impl Settings {
    /// Load settings from a TOML file, resolve time placeholders in paths,
    /// and validate.
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw, Local::now())
    }

    /// Parse and validate settings from TOML text, resolving path
    /// placeholders against `now`. Split out from [`Settings::load`] so tests
    /// can pin the clock.
    pub fn from_toml(raw: &str, now: DateTime<Local>) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(raw)?;

        settings.paths = settings
            .paths
            .iter()
            .map(|p| resolve_time_placeholders(p, &now))
            .collect::<Result<_, _>>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Staleness threshold as a duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age * 60)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let img = &self.new_image;
        if !(1..=100).contains(&img.jpeg_quality) {
            return Err(SettingsError::QualityOutOfRange(img.jpeg_quality));
        }
        if img.max_width == 0 || img.max_height == 0 {
            return Err(SettingsError::ZeroDimension {
                max_width: img.max_width,
                max_height: img.max_height,
            });
        }
        // An empty suffix would match every stem and skip every file.
        if img.suffix.is_empty() {
            return Err(SettingsError::EmptySuffix);
        }
        Ok(())
    }
}

/// Expand `strftime` directives in a configured path against `now`.
///
/// Parsed via `StrftimeItems` first so an invalid directive becomes a typed
/// error instead of a panic inside `Display`.
fn resolve_time_placeholders(
    path: &std::path::Path,
    now: &DateTime<Local>,
) -> Result<PathBuf, SettingsError> {
    let raw = path.to_string_lossy();
    let items: Vec<Item<'_>> = StrftimeItems::new(&raw).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(SettingsError::TimeFormat(raw.into_owned()));
    }
    Ok(PathBuf::from(
        now.format_with_items(items.into_iter()).to_string(),
    ))
}
