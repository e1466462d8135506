//! Device descriptor
//!
//! Describes the running board to the expander. The ordered dtb file list
//! is only consulted when the label uses `fdtdir`.

use alloc::string::String;
use alloc::vec::Vec;

/// Board information needed to pick a device tree
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Human readable board model, used in diagnostics
    pub model: Option<String>,
    /// Device tree file names for this board, most specific first
    pub dtbfiles: Option<Vec<String>>,
}

impl DeviceDescriptor {
    /// Create a descriptor without a dtb list
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the ordered dtb candidate list
    pub fn with_dtbfiles<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dtbfiles = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Candidate list, or `None` if it is missing or empty
    pub fn dtb_candidates(&self) -> Option<&[String]> {
        self.dtbfiles.as_deref().filter(|files| !files.is_empty())
    }

    /// Model name for log messages
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or("unknown device")
    }
}
