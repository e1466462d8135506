//! Kernel image decompression contract

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// gzip member header magic
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check if `image` starts with a gzip header
pub fn is_gzip_image(image: &[u8]) -> bool {
    image.starts_with(&GZIP_MAGIC)
}

/// Decompression failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecompressError {
    /// The image format is recognized but no decoder is available
    Unsupported,
    /// The compressed stream is damaged
    Corrupt(String),
    /// The output would not fit the destination. Returned by platform
    /// decoders that unpack into a fixed load region.
    TooLarge { limit: usize },
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::Unsupported => write!(f, "compressed image not supported"),
            DecompressError::Corrupt(msg) => write!(f, "corrupt compressed image: {}", msg),
            DecompressError::TooLarge { limit } => {
                write!(f, "decompressed image exceeds {} bytes", limit)
            }
        }
    }
}

impl core::error::Error for DecompressError {}

/// Detects and unpacks compressed kernel images
#[cfg_attr(test, mockall::automock)]
pub trait ImageDecompressor {
    /// Check if `image` needs to be decompressed before boot
    fn is_compressed(&self, image: &[u8]) -> bool;

    /// Unpack a compressed image
    fn decompress(&self, image: &[u8]) -> Result<Vec<u8>, DecompressError>;
}

/// Decompressor for platforms without a decoder
///
/// Recognizes gzip images so they are rejected instead of being booted
/// as if they were raw kernels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecompression;

impl ImageDecompressor for NoDecompression {
    fn is_compressed(&self, image: &[u8]) -> bool {
        is_gzip_image(image)
    }

    fn decompress(&self, _image: &[u8]) -> Result<Vec<u8>, DecompressError> {
        Err(DecompressError::Unsupported)
    }
}
