//! Application Layer - extlinux boot use case

pub mod boot_orchestrator;

pub use boot_orchestrator::ExtlinuxBootService;
