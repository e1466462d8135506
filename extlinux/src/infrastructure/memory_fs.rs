//! In-memory filesystem
//!
//! Holds whole files keyed by absolute path. Used for boot partitions that
//! were already read into memory, and by tests.

use crate::domain::filesystem::{Filesystem, FsError};
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Filesystem backed by a path -> contents map
#[derive(Clone, Debug, Default)]
pub struct MemoryFilesystem {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFilesystem {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style
    pub fn with_file(mut self, path: impl Into<String>, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<String>, contents: impl AsRef<[u8]>) {
        self.files.insert(path.into(), contents.as_ref().to_vec());
    }

    /// Remove a file, returning its contents
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if there are no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.files.get(path).cloned().ok_or(FsError::NotFound)
    }
}
