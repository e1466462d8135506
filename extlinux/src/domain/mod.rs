//! Domain Layer - extlinux boot label concepts and rules
//!
//! Pure domain objects, independent of how the boot partition is accessed
//! or how the kernel is finally started.
//!
//! Key concepts:
//! - **Labels**: the raw label borrowed from the file, the verified boot label
//! - **Device descriptor**: board model and its ordered dtb file names
//! - **Resolver configuration**: config file location and dtb policy
//! - **Filesystem interface**: implemented in the infrastructure layer
//! - **Config expander**: the validation gates and path resolution

pub mod boot_config;
pub mod device;
pub mod expander;
pub mod filesystem;
pub mod label;

pub use boot_config::{DEFAULT_CONFIG_PATH, DtbPolicy, ResolverConfig};
pub use device::DeviceDescriptor;
pub use expander::{ConfigExpander, ExpandError, ValidationGate, join_root};
pub use filesystem::{Filesystem, FsError};
pub use label::{BootLabel, DirectiveKind, RawLabel};
