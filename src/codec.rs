//! Image decode/encode seam.
//!
//! The [`ImageCodec`] trait is the boundary between the directory pipeline
//! (which decides *what* to resize) and the pixel work (which does it). The
//! production implementation is [`RustCodec`] on the `image` crate — pure
//! Rust, statically linked. Tests swap in a mock that records operations.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Sniff format | `ImageReader::with_guessed_format` (magic bytes, not extension) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate decoders |
//! | Resample | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use crate::planner::Dimensions;
use image::ImageReader;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a file could not be decoded.
///
/// [`DecodeError::NotAnImage`] is the only recoverable variant: the content
/// signature is not a recognized image format, so the file is simply not a
/// candidate. Everything else means a file that *should* have decoded did
/// not, and aborts the run.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("not an image: {0}")]
    NotAnImage(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// JPEG quality setting (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Decode and encode capability used by the pipeline.
///
/// The associated `Image` type keeps decoded pixel data opaque to the
/// pipeline: it only ever asks for dimensions and hands the image back for
/// encoding, so a mock can use a unit-ish type and never touch pixels.
pub trait ImageCodec {
    type Image;

    /// Decode the file at `path`, distinguishing unrecognized content
    /// ([`DecodeError::NotAnImage`]) from real decode failures.
    fn decode(&self, path: &Path) -> Result<Self::Image, DecodeError>;

    /// Pixel dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resample `image` to `target` and write it to `output` as JPEG bytes
    /// at `quality`, regardless of the output path's extension.
    fn encode_jpeg(
        &self,
        image: &Self::Image,
        target: Dimensions,
        quality: Quality,
        output: &Path,
    ) -> Result<(), EncodeError>;
}

/// Production codec on the `image` crate.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec for RustCodec {
    type Image = image::DynamicImage;

    fn decode(&self, path: &Path) -> Result<Self::Image, DecodeError> {
        // Built from a plain file handle, not `ImageReader::open`: the
        // latter pre-sets the format from the extension and keeps it when
        // sniffing fails, which would send text bytes named `.jpg` down the
        // decode path. Only the content guess may count here.
        let reader = std::fs::File::open(path)
            .map(|file| ImageReader::new(std::io::BufReader::new(file)))
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| DecodeError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        // Format is sniffed from magic bytes. No recognizable signature
        // (text files, zero-byte files) means this is not an image at all,
        // whatever the extension says; a recognized signature that fails to
        // decode is corrupt data.
        if reader.format().is_none() {
            return Err(DecodeError::NotAnImage(path.to_path_buf()));
        }

        reader.decode().map_err(|source| DecodeError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    fn dimensions(&self, image: &Self::Image) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn encode_jpeg(
        &self,
        image: &Self::Image,
        target: Dimensions,
        quality: Quality,
        output: &Path,
    ) -> Result<(), EncodeError> {
        let resized = image.resize_exact(target.width, target.height, FilterType::Lanczos3);

        let file = std::fs::File::create(output).map_err(|source| EncodeError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        let writer = std::io::BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(writer, quality.value());
        resized
            .write_with_encoder(encoder)
            .map_err(|source| EncodeError::Encode {
                path: output.to_path_buf(),
                source,
            })
    }
}
