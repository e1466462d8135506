//! Host filesystem backed by `std::fs`

use crate::domain::filesystem::{Filesystem, FsError};
use std::io::ErrorKind;
use std::path::Path;

/// Filesystem that reads directly from the host
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFilesystem;

impl StdFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FsError::NotFound,
            _ => FsError::Io(e.to_string()),
        })
    }
}
