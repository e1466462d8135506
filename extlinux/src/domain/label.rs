//! Boot labels
//!
//! A [`RawLabel`] borrows its values from the configuration buffer and is
//! never validated. The expander turns it into an owned [`BootLabel`]
//! whose paths were checked to exist, so the buffer can be released.

use crate::parser::Directive;
use alloc::string::String;
use core::fmt;

/// Recognized extlinux commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `kernel <path>`
    Kernel,
    /// `append <cmdline>`
    Append,
    /// `initrd <path>`
    Initrd,
    /// `fdt <path>`
    Fdt,
    /// `fdtdir <dir>`
    FdtDir,
    /// Any other command; accepted and ignored
    Unknown,
}

impl DirectiveKind {
    /// Map a command keyword (exact, case-sensitive) to its kind
    pub fn from_command(command: &str) -> Self {
        match command {
            "kernel" => Self::Kernel,
            "append" => Self::Append,
            "initrd" => Self::Initrd,
            "fdt" => Self::Fdt,
            "fdtdir" => Self::FdtDir,
            _ => Self::Unknown,
        }
    }

    /// Keyword as written in extlinux.conf
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Kernel => Some("kernel"),
            Self::Append => Some("append"),
            Self::Initrd => Some("initrd"),
            Self::Fdt => Some("fdt"),
            Self::FdtDir => Some("fdtdir"),
            Self::Unknown => None,
        }
    }
}

/// Label as written in the file, before any checks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawLabel<'a> {
    pub kernel: Option<&'a str>,
    pub initramfs: Option<&'a str>,
    pub dtb: Option<&'a str>,
    pub dtbdir: Option<&'a str>,
    pub cmdline: Option<&'a str>,
}

impl<'a> RawLabel<'a> {
    /// Store a directive's value in the matching field, replacing any
    /// previous value. Returns the kind the command mapped to.
    pub fn apply(&mut self, directive: &Directive<'a>) -> DirectiveKind {
        let kind = DirectiveKind::from_command(directive.command);
        let value = Some(directive.value);

        match kind {
            DirectiveKind::Kernel => self.kernel = value,
            DirectiveKind::Append => self.cmdline = value,
            DirectiveKind::Initrd => self.initramfs = value,
            DirectiveKind::Fdt => self.dtb = value,
            DirectiveKind::FdtDir => self.dtbdir = value,
            DirectiveKind::Unknown => {}
        }

        kind
    }

    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.kernel.is_none()
            && self.initramfs.is_none()
            && self.dtb.is_none()
            && self.dtbdir.is_none()
            && self.cmdline.is_none()
    }
}

/// Verified label, ready for loading
///
/// `kernel`, `dtb` and `initramfs` are root-prefixed paths that existed
/// when the label was validated. Nothing guarantees they still exist when
/// the files are loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootLabel {
    pub kernel: String,
    /// Resolved device tree. Only `None` under `DtbPolicy::Passthrough`
    /// when no `fdtdir` candidate matched.
    pub dtb: Option<String>,
    /// The `fdtdir` value the dtb was resolved from, as written
    pub dtbdir: Option<String>,
    pub initramfs: Option<String>,
    /// Kernel command line, empty when the file has no `append`
    pub cmdline: String,
}

impl fmt::Display for BootLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kernel    = {}", self.kernel)?;
        writeln!(f, "dtb       = {}", self.dtb.as_deref().unwrap_or("(unresolved)"))?;
        writeln!(f, "dtbdir    = {}", self.dtbdir.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "initramfs = {}", self.initramfs.as_deref().unwrap_or("(none)"))?;
        write!(f, "cmdline   = {}", self.cmdline)
    }
}
