//! Filesystem Interface - Boot partition access abstraction
//!
//! The expander only needs to know whether a file exists; the boot
//! service also reads whole files. Implementations are in the
//! infrastructure layer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Filesystem error types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsError {
    /// No file at the given path
    NotFound,
    /// The file exists but could not be read
    Io(String),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound => write!(f, "file not found"),
            FsError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl core::error::Error for FsError {}

/// Read-only access to the boot filesystem
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    /// Check if a file can be opened at `path`
    fn exists(&self, path: &str) -> bool;

    /// Read the complete contents of the file at `path`
    fn read(&self, path: &str) -> Result<Vec<u8>, FsError>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        (**self).read(path)
    }
}
