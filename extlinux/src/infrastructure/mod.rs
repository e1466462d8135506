//! Infrastructure Layer - Filesystem implementations
//!
//! Concrete backends for the domain `Filesystem` interface.

pub mod memory_fs;
#[cfg(feature = "std")]
pub mod std_fs;

pub use memory_fs::MemoryFilesystem;
#[cfg(feature = "std")]
pub use std_fs::StdFilesystem;
