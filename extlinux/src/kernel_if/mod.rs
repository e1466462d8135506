//! Kernel Interface - Loading and hand-off collaborators
//!
//! The platform decides how images are decompressed and how control is
//! transferred; this module only defines the contracts and the payload.

pub mod decompress;
pub mod handoff;

pub use decompress::{DecompressError, ImageDecompressor, NoDecompression, is_gzip_image};
pub use handoff::{BootPayload, KernelHandoff};
