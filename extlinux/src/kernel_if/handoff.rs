//! Kernel hand-off contract
//!
//! The payload carries everything the platform needs to start a Linux
//! image. Placing it at load addresses is the platform's business.

use crate::error::BootError;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Loaded boot artifacts
#[derive(Clone, PartialEq, Eq)]
pub struct BootPayload {
    /// Kernel image, already decompressed
    pub kernel: Vec<u8>,
    /// Device tree blob
    pub dtb: Vec<u8>,
    pub initramfs: Option<Vec<u8>>,
    pub cmdline: String,
    /// The kernel file was compressed on disk
    pub kernel_decompressed: bool,
}

impl BootPayload {
    /// Size of the initramfs, 0 if there is none
    pub fn initramfs_size(&self) -> usize {
        self.initramfs.as_ref().map_or(0, Vec::len)
    }
}

impl fmt::Debug for BootPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootPayload")
            .field("kernel_size", &self.kernel.len())
            .field("dtb_size", &self.dtb.len())
            .field("initramfs_size", &self.initramfs_size())
            .field("cmdline", &self.cmdline)
            .field("kernel_decompressed", &self.kernel_decompressed)
            .finish()
    }
}

/// Transfers control to the loaded kernel
///
/// On real hardware `boot_linux` does not return. A hosted implementation
/// may return `Ok(())` after recording the payload.
#[cfg_attr(test, mockall::automock)]
pub trait KernelHandoff {
    fn boot_linux(&mut self, payload: BootPayload) -> Result<(), BootError>;
}
