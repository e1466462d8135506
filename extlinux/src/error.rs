//! extlinux boot error handling
//!
//! Errors of one configuration resolution and boot attempt. Every error
//! is terminal for the attempt; falling back to another boot source is up
//! to the caller.

use crate::domain::expander::ExpandError;
use crate::domain::filesystem::FsError;
use crate::kernel_if::DecompressError;
use alloc::string::String;
use core::fmt;

/// Boot attempt error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootError {
    /// Invalid resolver configuration
    ConfigurationError(&'static str),

    /// No extlinux.conf below the root
    ConfigNotFound { path: String },
    /// extlinux.conf exists but could not be read
    ConfigReadFailed { path: String, error: FsError },

    /// The label failed one of the validation gates
    Validation(ExpandError),

    /// `fdtdir` left the device tree unresolved
    DeviceTreeUnresolved,

    /// Artifact loading errors
    KernelLoadFailed { path: String, error: FsError },
    DeviceTreeLoadFailed { path: String, error: FsError },
    InitramfsLoadFailed { path: String, error: FsError },

    /// The kernel image could not be decompressed
    DecompressFailed(DecompressError),

    /// Kernel hand-off errors, returned by platform `KernelHandoff`
    /// implementations
    HandoffFailed(&'static str),
    KernelReturned,
}

impl BootError {
    /// Convert to an error code suitable for reporting to the caller
    pub fn as_error_code(&self) -> u32 {
        match self {
            BootError::ConfigurationError(_) => 0xA001,
            BootError::ConfigNotFound { .. } => 0xA002,
            BootError::ConfigReadFailed { .. } => 0xA003,
            BootError::Validation(err) => 0xA100 + err.gate() as u32,
            BootError::DeviceTreeUnresolved => 0xA200,
            BootError::KernelLoadFailed { .. } => 0x9001,
            BootError::DeviceTreeLoadFailed { .. } => 0x9002,
            BootError::InitramfsLoadFailed { .. } => 0x9003,
            BootError::DecompressFailed(_) => 0x9004,
            BootError::HandoffFailed(_) => 0xF000,
            BootError::KernelReturned => 0xF001,
        }
    }

    /// Get a human-readable description of the error
    pub fn description(&self) -> &'static str {
        match self {
            BootError::ConfigurationError(msg) => *msg,
            BootError::ConfigNotFound { .. } => "No extlinux config",
            BootError::ConfigReadFailed { .. } => "Failed to read extlinux config",
            BootError::Validation(err) => err.description(),
            BootError::DeviceTreeUnresolved => "Device tree was not resolved",
            BootError::KernelLoadFailed { .. } => "Failed to load the kernel",
            BootError::DeviceTreeLoadFailed { .. } => "Failed to load the dtb",
            BootError::InitramfsLoadFailed { .. } => "Failed to load the initramfs",
            BootError::DecompressFailed(_) => "Failed to decompress the kernel",
            BootError::HandoffFailed(msg) => *msg,
            BootError::KernelReturned => "Kernel unexpectedly returned",
        }
    }

    /// Check if the configuration was present but unusable
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BootError::ConfigReadFailed { .. }
                | BootError::Validation(_)
                | BootError::DeviceTreeUnresolved
        )
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::ConfigNotFound { path } => write!(f, "{} at {}", self.description(), path),
            BootError::Validation(err) => write!(f, "{}", err),
            BootError::ConfigReadFailed { path, error }
            | BootError::KernelLoadFailed { path, error }
            | BootError::DeviceTreeLoadFailed { path, error }
            | BootError::InitramfsLoadFailed { path, error } => {
                write!(f, "{} {}: {}", self.description(), path, error)
            }
            BootError::DecompressFailed(err) => write!(f, "{}: {}", self.description(), err),
            _ => write!(f, "{}", self.description()),
        }
    }
}

impl core::error::Error for BootError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            BootError::Validation(err) => Some(err),
            BootError::DecompressFailed(err) => Some(err),
            BootError::ConfigReadFailed { error, .. }
            | BootError::KernelLoadFailed { error, .. }
            | BootError::DeviceTreeLoadFailed { error, .. }
            | BootError::InitramfsLoadFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ExpandError> for BootError {
    fn from(err: ExpandError) -> Self {
        BootError::Validation(err)
    }
}

impl From<DecompressError> for BootError {
    fn from(err: DecompressError) -> Self {
        BootError::DecompressFailed(err)
    }
}

/// Result type for boot operations
pub type Result<T> = core::result::Result<T, BootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_codes_follow_gate_order() {
        let missing = BootError::from(ExpandError::MissingKernel);
        let initramfs =
            BootError::from(ExpandError::InitramfsNotFound { path: String::from("/initrd") });
        assert_eq!(missing.as_error_code(), 0xA100);
        assert!(initramfs.as_error_code() > missing.as_error_code());
        assert!(missing.is_config_error());
    }

    #[test]
    fn test_display() {
        let err = BootError::KernelLoadFailed {
            path: String::from("/boot/zImage"),
            error: FsError::Io(String::from("short read")),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load the kernel /boot/zImage: I/O error: short read"
        );

        let err = BootError::from(ExpandError::MissingDeviceTree);
        assert_eq!(err.to_string(), "no device tree specified");
        assert!(!BootError::ConfigNotFound { path: String::new() }.is_config_error());
    }

    #[test]
    fn test_handoff_errors() {
        let err = BootError::HandoffFailed("Relocation of the dtb failed");
        assert_eq!(err.as_error_code(), 0xF000);
        assert_eq!(err.to_string(), "Relocation of the dtb failed");
        assert!(!err.is_config_error());

        let err = BootError::from(DecompressError::TooLarge { limit: 0x0400_0000 });
        assert_eq!(
            err.to_string(),
            "Failed to decompress the kernel: decompressed image exceeds 67108864 bytes"
        );
    }
}
