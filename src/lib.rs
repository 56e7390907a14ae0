//! # snapsize
//!
//! Batch image resizer for watched directories. Point it at one or more
//! paths and it writes a proportionally-shrunk JPEG copy next to every
//! fresh image it finds, tagging outputs with a filename suffix so they are
//! never picked up again.
//!
//! # Pipeline
//!
//! ```text
//! settings.toml → sweep paths → filter chain → decode → plan → encode JPEG
//! ```
//!
//! Each run is stateless: directories are re-scanned and images re-decoded
//! from scratch, and idempotence comes purely from the suffix convention on
//! output filenames. Processing is strictly sequential — one path, one
//! entry, one image at a time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`settings`] | Typed immutable settings from TOML, strftime path placeholders, load-time validation |
//! | [`process`] | Directory sweep, ordered filter chain, resize orchestration |
//! | [`planner`] | Pure two-stage proportional dimension math |
//! | [`codec`] | Decode/encode seam: `ImageCodec` trait + `image`-crate codec |
//! | [`naming`] | Output-suffix convention: recursion guard + derived paths |
//!
//! # Design Decisions
//!
//! ## Sequential two-limit shrink
//!
//! [`planner::plan`] applies `max_width` first and then checks `max_height`
//! against the already-shrunk height, scaling from the intermediate values.
//! That is not the same as one simultaneous fit-within-box computation, and
//! it is kept that way on purpose: downstream consumers depend on the exact
//! dimensions this ordering produces.
//!
//! ## Content sniffing over extensions
//!
//! Whether a file is an image is decided by decoding it, not by its
//! extension. A text file named `notes.jpg` is quietly skipped; a real image
//! named `shot.dat` is processed. Only an unrecognized content signature is
//! recoverable — a recognized format that fails to decode aborts the run,
//! because silently skipping corrupt camera output would hide real problems.
//!
//! ## JPEG bytes behind the original extension
//!
//! Outputs keep the source extension (`photo.png` → `photo_small.png`) while
//! the content is always JPEG at the configured quality. Long-standing
//! behavior that existing consumers rely on.

pub mod codec;
pub mod naming;
pub mod planner;
pub mod process;
pub mod settings;
