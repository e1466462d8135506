//! NOS extlinux Library - Boot label resolution
//!
//! Resolves the single implicit boot label of an `extlinux.conf` file into
//! verified kernel, device tree and initramfs paths plus a command line,
//! then loads those artifacts for the kernel hand-off.
//!
//! Layered like the rest of the bootloader:
//! - `parser` turns the raw file bytes into a raw (borrowed) label
//! - `domain` holds the label types and the expander/validator
//! - `infrastructure` provides filesystem implementations
//! - `kernel_if` defines the load and hand-off collaborators
//! - `application` orchestrates one resolution and boot attempt

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

/// Error types shared by the boot orchestration
pub mod error;

/// Domain layer - Labels, device descriptor, resolver configuration, expander
pub mod domain;

/// Parser - Cursor, line tokenizer and directive dispatcher
pub mod parser;

/// Infrastructure layer - Filesystem implementations
pub mod infrastructure;

/// Kernel interface - Decompression and hand-off collaborators
pub mod kernel_if;

/// Application layer - extlinux boot use case
pub mod application;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use application::ExtlinuxBootService;
pub use domain::{
    BootLabel, ConfigExpander, DeviceDescriptor, DirectiveKind, DtbPolicy, ExpandError,
    Filesystem, FsError, RawLabel, ResolverConfig, ValidationGate, join_root,
};
pub use error::{BootError, Result};
pub use infrastructure::MemoryFilesystem;
#[cfg(feature = "std")]
pub use infrastructure::StdFilesystem;
pub use kernel_if::{
    BootPayload, DecompressError, ImageDecompressor, KernelHandoff, NoDecompression,
};
pub use parser::{Cursor, Directive, Termination, Tokenizer, parse_conf};
