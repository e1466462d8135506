//! Resolver Configuration - Pure Value Object
//!
//! Knobs for one extlinux resolution attempt. Does NOT contain any
//! resolution logic beyond validation and construction.
//!
//! # Examples
//!
//! ```
//! # use nos_extlinux::domain::boot_config::{DtbPolicy, ResolverConfig};
//! let config = ResolverConfig::default().with_dtb_policy(DtbPolicy::Passthrough);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.config_path, "extlinux/extlinux.conf");
//! ```

use alloc::string::String;
use core::fmt;

/// Default location of the directive file below the root directory
pub const DEFAULT_CONFIG_PATH: &str = "extlinux/extlinux.conf";

/// What to do when `fdtdir` is set but no candidate file exists
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DtbPolicy {
    /// Fail validation with `NoMatchingDeviceTree`
    #[default]
    Strict,
    /// Leave the dtb unresolved and keep validating; loading fails later
    Passthrough,
}

/// Resolver configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Directive file path, relative to the root directory
    pub config_path: String,
    pub dtb_policy: DtbPolicy,
}

impl ResolverConfig {
    /// Create default resolver configuration
    pub fn new() -> Self {
        Self {
            config_path: String::from(DEFAULT_CONFIG_PATH),
            dtb_policy: DtbPolicy::Strict,
        }
    }

    /// Use a different directive file path
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Set the unmatched-`fdtdir` policy
    pub fn with_dtb_policy(mut self, policy: DtbPolicy) -> Self {
        self.dtb_policy = policy;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.config_path.is_empty() {
            return Err("Config path cannot be empty");
        }

        if self.config_path.starts_with('/') {
            return Err("Config path must be relative to the root directory");
        }

        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resolver Configuration:")?;
        writeln!(f, "  Config Path: {}", self.config_path)?;
        write!(f, "  DTB Policy: {:?}", self.dtb_policy)
    }
}
