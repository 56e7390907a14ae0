//! Pure dimension planning for proportional resizes.
//!
//! Everything here is calculation only — no I/O, no images — so the resize
//! math is unit testable with plain numbers.
//!
//! The plan applies the two configured limits **sequentially**, not as one
//! simultaneous fit: the width limit first, then the height limit against the
//! height that stage one produced. Downstream consumers depend on the exact
//! numbers this ordering yields, so it is kept as-is even where a single
//! fit-within-box computation would shrink differently.

use thiserror::Error;

/// A width/height pair in pixels.
///
/// Named fields instead of a bare tuple — the two-stage plan swaps which
/// dimension is recomputed, and transposed arguments are too easy to miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A zero showed up where only positive pixel counts make sense.
///
/// Corrupt files can report 0x0; letting that reach the proportional math
/// would divide by zero, so planning fails fast instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid dimensions: source {source_width}x{source_height}, limits {max_width}x{max_height} (all values must be positive)")]
pub struct InvalidDimension {
    pub source_width: u32,
    pub source_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

/// Compute target dimensions for a source image under two size limits.
///
/// Stage one: if the width reaches `max_width`, clamp it and scale the height
/// by the original aspect ratio. Stage two: if the (possibly already scaled)
/// height reaches `max_height`, clamp it and scale the width — using the
/// stage-one values as the basis, not the originals. Fractions truncate
/// toward zero at each stage.
///
/// If neither limit is reached the source dimensions pass through unchanged.
pub fn plan(
    source: Dimensions,
    max_width: u32,
    max_height: u32,
) -> Result<Dimensions, InvalidDimension> {
    if source.width == 0 || source.height == 0 || max_width == 0 || max_height == 0 {
        return Err(InvalidDimension {
            source_width: source.width,
            source_height: source.height,
            max_width,
            max_height,
        });
    }

    let mut result = source;

    if source.width >= max_width {
        result = Dimensions {
            width: max_width,
            height: scale(source.width, max_width, source.height),
        };
    }

    // Deliberately re-checks the stage-one height, and scales from the
    // stage-one values rather than the source.
    if result.height >= max_height {
        result = Dimensions {
            width: scale(result.height, max_height, result.width),
            height: max_height,
        };
    }

    Ok(result)
}

/// Scale `other_dimension` by the ratio `new_size / old_size`, truncating
/// toward zero.
fn scale(old_size: u32, new_size: u32, other_dimension: u32) -> u32 {
    (new_size as f64 / old_size as f64 * other_dimension as f64) as u32
}
