//! extlinux Boot Service - Coordinates one extlinux boot attempt
//!
//! Implements the use case by orchestrating:
//! 1. Reading extlinux.conf below the root directory
//! 2. Parsing the default label
//! 3. Expanding and validating it
//! 4. Loading kernel, device tree and initramfs
//! 5. Handing the payload to the platform

use crate::domain::boot_config::ResolverConfig;
use crate::domain::device::DeviceDescriptor;
use crate::domain::expander::{ConfigExpander, join_root};
use crate::domain::filesystem::{Filesystem, FsError};
use crate::domain::label::BootLabel;
use crate::error::{BootError, Result as BootResult};
use crate::kernel_if::{BootPayload, ImageDecompressor, KernelHandoff};
use crate::parser::parse_conf;
use alloc::string::String;

/// extlinux Boot Service
///
/// Holds the collaborators for a single resolution attempt. Nothing is
/// cached between calls.
pub struct ExtlinuxBootService<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    device: &'a DeviceDescriptor,
    config: ResolverConfig,
}

impl<'a, F: Filesystem + ?Sized> ExtlinuxBootService<'a, F> {
    /// Create a boot service with the default configuration
    pub fn new(fs: &'a F, device: &'a DeviceDescriptor) -> Self {
        Self {
            fs,
            device,
            config: ResolverConfig::default(),
        }
    }

    /// Create a boot service with a custom configuration
    ///
    /// # Returns
    /// The service, or an error if the configuration is invalid
    pub fn with_config(
        fs: &'a F,
        device: &'a DeviceDescriptor,
        config: ResolverConfig,
    ) -> BootResult<Self> {
        config.validate().map_err(BootError::ConfigurationError)?;
        Ok(Self { fs, device, config })
    }

    /// Active resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Location of the directive file for `root`
    pub fn config_file(&self, root: &str) -> String {
        join_root(root, &self.config.config_path)
    }

    /// Read, parse and validate the configuration below `root`
    ///
    /// # Returns
    /// The verified label. The file buffer is released before returning.
    pub fn resolve(&self, root: &str) -> BootResult<BootLabel> {
        let path = self.config_file(root);

        let data = self.fs.read(&path).map_err(|error| match error {
            FsError::NotFound => {
                log::info!("No extlinux config in {}", root);
                BootError::ConfigNotFound { path: path.clone() }
            }
            error => BootError::ConfigReadFailed { path: path.clone(), error },
        })?;

        let label = {
            let raw = parse_conf(&data);
            ConfigExpander::with_config(self.fs, self.device, &self.config)
                .expand(&raw, root)
                .inspect_err(|_| log::info!("Failed to parse extlinux.conf"))?
        };
        drop(data);

        log::info!("Parsed {}", path);
        log::info!("kernel    = {}", label.kernel);
        log::info!("dtb       = {}", label.dtb.as_deref().unwrap_or("(unresolved)"));
        log::info!("dtbdir    = {}", label.dtbdir.as_deref().unwrap_or("(none)"));
        log::info!("initramfs = {}", label.initramfs.as_deref().unwrap_or("(none)"));
        log::info!("cmdline   = {}", label.cmdline);

        Ok(label)
    }

    /// Load every file named by a verified label
    ///
    /// The kernel is decompressed when `decompressor` recognizes it as
    /// compressed.
    pub fn load<D>(&self, label: &BootLabel, decompressor: &D) -> BootResult<BootPayload>
    where
        D: ImageDecompressor + ?Sized,
    {
        let dtb_path = label.dtb.as_deref().ok_or(BootError::DeviceTreeUnresolved)?;

        let image = self.fs.read(&label.kernel).map_err(|error| BootError::KernelLoadFailed {
            path: label.kernel.clone(),
            error,
        })?;

        let kernel_decompressed = decompressor.is_compressed(&image);
        let kernel = if kernel_decompressed {
            log::info!("Decompressing the kernel...");
            decompressor.decompress(&image)?
        } else {
            log::info!("Copying uncompressed kernel...");
            image
        };

        let dtb = self.fs.read(dtb_path).map_err(|error| BootError::DeviceTreeLoadFailed {
            path: dtb_path.into(),
            error,
        })?;

        let initramfs = match &label.initramfs {
            Some(path) => Some(self.fs.read(path).map_err(|error| BootError::InitramfsLoadFailed {
                path: path.clone(),
                error,
            })?),
            None => None,
        };

        Ok(BootPayload {
            kernel,
            dtb,
            initramfs,
            cmdline: label.cmdline.clone(),
            kernel_decompressed,
        })
    }

    /// Try to boot with extlinux from `root`
    ///
    /// Resolves the label, loads it and hands it to `handoff`. Returns only
    /// if any step fails or the hand-off itself returns.
    pub fn try_extlinux<D, H>(
        &self,
        root: &str,
        decompressor: &D,
        handoff: &mut H,
    ) -> BootResult<()>
    where
        D: ImageDecompressor + ?Sized,
        H: KernelHandoff + ?Sized,
    {
        let label = self.resolve(root)?;
        let payload = self.load(&label, decompressor).inspect_err(|e| log::info!("{}", e))?;

        log::debug!("extlinux: handing off {:?}", payload);
        handoff.boot_linux(payload)
    }
}
