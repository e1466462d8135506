//! Config Expander - Domain Service
//!
//! Checks a parsed label and rewrites it into a bootable one: every path
//! is prefixed with the root directory and must exist, `fdtdir` is
//! resolved to a concrete dtb through the device's candidate list, and
//! the command line defaults to empty.
//!
//! The gates run in a fixed order and the first failing gate is reported:
//!
//! 1. kernel specified
//! 2. kernel exists
//! 3. fdt or fdtdir specified
//! 4. fdtdir: candidate list available, first existing candidate wins
//! 5. fdt (without fdtdir) exists
//! 6. initrd exists, if specified
//! 7. append defaults to ""

use super::boot_config::{DtbPolicy, ResolverConfig};
use super::device::DeviceDescriptor;
use super::filesystem::Filesystem;
use super::label::{BootLabel, RawLabel};
use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

/// Validation gate identifiers, in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationGate {
    KernelSpecified,
    KernelExists,
    DeviceTreeSpecified,
    DeviceTreeCandidates,
    DeviceTreeExists,
    InitramfsExists,
}

/// Reason a label cannot be booted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpandError {
    /// No `kernel` directive
    MissingKernel,
    /// The kernel path does not exist
    KernelNotFound { path: String },
    /// Neither `fdt` nor `fdtdir` was given
    MissingDeviceTree,
    /// `fdtdir` was given but the device has no dtb file list
    NoDtbCandidates { device: String },
    /// No candidate exists below `fdtdir`
    NoMatchingDeviceTree { dtbdir: String },
    /// The explicit `fdt` path does not exist
    DeviceTreeNotFound { path: String },
    /// The `initrd` path does not exist
    InitramfsNotFound { path: String },
}

impl ExpandError {
    /// Gate that produced this error
    pub fn gate(&self) -> ValidationGate {
        match self {
            ExpandError::MissingKernel => ValidationGate::KernelSpecified,
            ExpandError::KernelNotFound { .. } => ValidationGate::KernelExists,
            ExpandError::MissingDeviceTree => ValidationGate::DeviceTreeSpecified,
            ExpandError::NoDtbCandidates { .. } | ExpandError::NoMatchingDeviceTree { .. } => {
                ValidationGate::DeviceTreeCandidates
            }
            ExpandError::DeviceTreeNotFound { .. } => ValidationGate::DeviceTreeExists,
            ExpandError::InitramfsNotFound { .. } => ValidationGate::InitramfsExists,
        }
    }

    /// Path or directory involved in the failure, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            ExpandError::KernelNotFound { path }
            | ExpandError::DeviceTreeNotFound { path }
            | ExpandError::InitramfsNotFound { path } => Some(path.as_str()),
            ExpandError::NoMatchingDeviceTree { dtbdir } => Some(dtbdir.as_str()),
            ExpandError::MissingKernel
            | ExpandError::MissingDeviceTree
            | ExpandError::NoDtbCandidates { .. } => None,
        }
    }

    /// Get a human-readable description of the error
    pub fn description(&self) -> &'static str {
        match self {
            ExpandError::MissingKernel => "no kernel specified",
            ExpandError::KernelNotFound { .. } => "kernel not found",
            ExpandError::MissingDeviceTree => "no device tree specified",
            ExpandError::NoDtbCandidates { .. } => "no device tree candidates for device",
            ExpandError::NoMatchingDeviceTree { .. } => "no matching device tree candidate found",
            ExpandError::DeviceTreeNotFound { .. } => "device tree not found",
            ExpandError::InitramfsNotFound { .. } => "initramfs not found",
        }
    }
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::NoDtbCandidates { device } => {
                write!(f, "{} {}", self.description(), device)
            }
            ExpandError::NoMatchingDeviceTree { dtbdir } => {
                write!(f, "{} in {}", self.description(), dtbdir)
            }
            _ => match self.path() {
                Some(path) => write!(f, "{}: {}", self.description(), path),
                None => write!(f, "{}", self.description()),
            },
        }
    }
}

impl core::error::Error for ExpandError {}

/// Join `path` below `root`.
///
/// Paths in extlinux.conf are usually absolute to the boot partition, so
/// the separator is never doubled. The path is always taken relative to
/// `root`, even when it happens to start with the root string.
pub fn join_root(root: &str, path: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Expands a [`RawLabel`] against a root directory
pub struct ConfigExpander<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    device: &'a DeviceDescriptor,
    dtb_policy: DtbPolicy,
}

impl<'a, F: Filesystem + ?Sized> ConfigExpander<'a, F> {
    /// Create an expander with the strict dtb policy
    pub fn new(fs: &'a F, device: &'a DeviceDescriptor) -> Self {
        Self {
            fs,
            device,
            dtb_policy: DtbPolicy::Strict,
        }
    }

    /// Create an expander using the policies from `config`
    pub fn with_config(fs: &'a F, device: &'a DeviceDescriptor, config: &ResolverConfig) -> Self {
        Self {
            fs,
            device,
            dtb_policy: config.dtb_policy,
        }
    }

    /// Sanity check the label and rewrite it into owned, root-prefixed paths.
    pub fn expand(&self, label: &RawLabel<'_>, root: &str) -> Result<BootLabel, ExpandError> {
        // Can't boot without a kernel.
        let Some(kernel) = label.kernel else {
            log::info!("Kernel is not specified");
            return Err(ExpandError::MissingKernel);
        };

        let kernel = join_root(root, kernel);
        if !self.fs.exists(&kernel) {
            log::info!("Kernel {} does not exist", kernel);
            return Err(ExpandError::KernelNotFound { path: kernel });
        }

        // The dtb has to be patched before boot, so one is mandatory.
        if label.dtb.is_none() && label.dtbdir.is_none() {
            log::info!("Neither fdt nor fdtdir is specified");
            return Err(ExpandError::MissingDeviceTree);
        }

        let dtb = match (label.dtbdir, label.dtb) {
            (Some(dtbdir), _) => self.resolve_dtbdir(root, dtbdir)?,
            (None, Some(dtb)) => {
                let dtb = join_root(root, dtb);
                if !self.fs.exists(&dtb) {
                    log::info!("FDT {} does not exist", dtb);
                    return Err(ExpandError::DeviceTreeNotFound { path: dtb });
                }
                Some(dtb)
            }
            (None, None) => None,
        };

        let initramfs = match label.initramfs {
            Some(initramfs) => {
                let initramfs = join_root(root, initramfs);
                if !self.fs.exists(&initramfs) {
                    log::info!("Initramfs {} does not exist", initramfs);
                    return Err(ExpandError::InitramfsNotFound { path: initramfs });
                }
                Some(initramfs)
            }
            None => None,
        };

        Ok(BootLabel {
            kernel,
            dtb,
            dtbdir: label.dtbdir.map(String::from),
            initramfs,
            cmdline: String::from(label.cmdline.unwrap_or("")),
        })
    }

    /// Check an already expanded label again, without joining the root.
    ///
    /// Every path is used as is and must still exist. A missing `dtb` is
    /// only accepted where `expand` would have left it unresolved.
    pub fn revalidate(&self, label: &BootLabel) -> Result<BootLabel, ExpandError> {
        if !self.fs.exists(&label.kernel) {
            log::info!("Kernel {} does not exist", label.kernel);
            return Err(ExpandError::KernelNotFound { path: label.kernel.clone() });
        }

        match (&label.dtb, &label.dtbdir) {
            (Some(dtb), _) if !self.fs.exists(dtb) => {
                log::info!("FDT {} does not exist", dtb);
                return Err(ExpandError::DeviceTreeNotFound { path: dtb.clone() });
            }
            (Some(_), _) => {}
            (None, None) => return Err(ExpandError::MissingDeviceTree),
            (None, Some(dtbdir)) => {
                if self.dtb_policy == DtbPolicy::Strict {
                    return Err(ExpandError::NoMatchingDeviceTree { dtbdir: dtbdir.clone() });
                }
            }
        }

        if let Some(initramfs) = &label.initramfs {
            if !self.fs.exists(initramfs) {
                log::info!("Initramfs {} does not exist", initramfs);
                return Err(ExpandError::InitramfsNotFound { path: initramfs.clone() });
            }
        }

        Ok(label.clone())
    }

    /// Pick the first device candidate that exists below `root/dtbdir`.
    fn resolve_dtbdir(&self, root: &str, dtbdir: &str) -> Result<Option<String>, ExpandError> {
        let Some(candidates) = self.device.dtb_candidates() else {
            log::info!("The dtb-files for this device is not set");
            return Err(ExpandError::NoDtbCandidates {
                device: self.device.model_name().to_string(),
            });
        };

        let dir = join_root(root, dtbdir);
        for candidate in candidates {
            let path = format!("{}/{}", dir.trim_end_matches('/'), candidate);
            log::debug!("Check: {}", path);
            if self.fs.exists(&path) {
                return Ok(Some(path));
            }
        }

        match self.dtb_policy {
            DtbPolicy::Strict => {
                log::info!("No dtb for {} found in {}", self.device.model_name(), dir);
                Err(ExpandError::NoMatchingDeviceTree { dtbdir: dir })
            }
            DtbPolicy::Passthrough => {
                log::warn!(
                    "No dtb for {} found in {}, leaving it unresolved",
                    self.device.model_name(),
                    dir
                );
                Ok(None)
            }
        }
    }
}
