//! extlinux resolution integration tests
//!
//! Drives the public API from raw extlinux.conf bytes to a verified label
//! and a handed-off payload.

use mockall::predicate::eq;
use mockall::{Sequence, mock};
use nos_extlinux::kernel_if::is_gzip_image;
use nos_extlinux::{
    BootError, BootLabel, BootPayload, ConfigExpander, DeviceDescriptor, Directive, ExpandError,
    ExtlinuxBootService, Filesystem, FsError, KernelHandoff, MemoryFilesystem, NoDecompression,
    Tokenizer, ValidationGate, parse_conf,
};
use proptest::prelude::*;

mock! {
    pub Fs {}

    impl Filesystem for Fs {
        fn exists(&self, path: &str) -> bool;
        fn read(&self, path: &str) -> Result<Vec<u8>, FsError>;
    }
}

/// Hosted hand-off that keeps the payload instead of jumping to it
#[derive(Default)]
struct RecordingHandoff {
    payload: Option<BootPayload>,
}

impl KernelHandoff for RecordingHandoff {
    fn boot_linux(&mut self, payload: BootPayload) -> Result<(), BootError> {
        self.payload = Some(payload);
        Ok(())
    }
}

const ROOT: &str = "/fs/mmc0p1";

fn msm8916_device() -> DeviceDescriptor {
    DeviceDescriptor::new()
        .with_model("Wileyfox Swift")
        .with_dtbfiles(["qcom/msm8916-wingtech-wt88047.dtb", "qcom/msm8916-longcheer-l8150.dtb"])
}

fn postmarketos_partition() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(
            "/fs/mmc0p1/extlinux/extlinux.conf",
            "\
# postmarketOS extlinux.conf
timeout 1
default pmos

label pmos
\tkernel /vmlinuz
\tinitrd /initramfs
\tfdtdir /dtbs
\tappend console=ttyMSM0,115200 PMOS_NO_OUTPUT_REDIRECT pmos_boot_uuid=1234",
        )
        .with_file("/fs/mmc0p1/vmlinuz", b"\x1f\x8b\x08\x00")
        .with_file("/fs/mmc0p1/initramfs", b"initramfs")
        .with_file("/fs/mmc0p1/dtbs/qcom/msm8916-longcheer-l8150.dtb", b"\xd0\x0d\xfe\xed")
}

fn resolve(
    conf: &[u8],
    fs: &MemoryFilesystem,
    device: &DeviceDescriptor,
) -> Result<BootLabel, ExpandError> {
    ConfigExpander::new(fs, device).expand(&parse_conf(conf), ROOT)
}

#[test]
fn test_comment_only_file_has_no_kernel() {
    let data = b"# hi\n\n  \n";
    assert_eq!(Tokenizer::new(data).count(), 0);

    let err = resolve(data, &MemoryFilesystem::new(), &msm8916_device()).unwrap_err();
    assert_eq!(err, ExpandError::MissingKernel);
    assert_eq!(err.to_string(), "no kernel specified");
}

#[test]
fn test_unknown_directive_does_not_disturb_resolution() {
    let fs = MemoryFilesystem::new()
        .with_file("/fs/mmc0p1/z", b"kernel")
        .with_file("/fs/mmc0p1/d", b"dtb");
    let label = resolve(b"foo bar\nkernel z\nfdt d\n", &fs, &DeviceDescriptor::new()).unwrap();
    assert_eq!(label.kernel, "/fs/mmc0p1/z");
    assert_eq!(label.dtb.as_deref(), Some("/fs/mmc0p1/d"));
}

#[test]
fn test_kernel_only_fails_on_device_tree_gate() {
    let fs = MemoryFilesystem::new().with_file("/fs/mmc0p1/zImage", b"kernel");
    let err = resolve(b"kernel zImage\n", &fs, &msm8916_device()).unwrap_err();
    assert_eq!(err.gate(), ValidationGate::DeviceTreeSpecified);
}

#[test]
fn test_candidates_are_probed_in_device_order() {
    let mut fs = MockFs::new();
    let mut seq = Sequence::new();
    for (path, found) in [
        ("/fs/mmc0p1/zImage", true),
        ("/fs/mmc0p1/dtbs/a.dtb", false),
        ("/fs/mmc0p1/dtbs/b.dtb", true),
    ] {
        fs.expect_exists()
            .with(eq(path))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(found);
    }

    let device = DeviceDescriptor::new().with_dtbfiles(["a.dtb", "b.dtb"]);
    let label = ConfigExpander::new(&fs, &device)
        .expand(&parse_conf(b"kernel zImage\nfdtdir dtbs\n"), ROOT)
        .unwrap();
    assert_eq!(label.dtb.as_deref(), Some("/fs/mmc0p1/dtbs/b.dtb"));
}

#[test]
fn test_validation_stops_at_first_failure() {
    let mut fs = MockFs::new();
    fs.expect_exists().with(eq("/fs/mmc0p1/zImage")).times(1).return_const(false);

    let err = ConfigExpander::new(&fs, &msm8916_device())
        .expand(&parse_conf(b"kernel zImage\nfdt board.dtb\ninitrd initrd.img\n"), ROOT)
        .unwrap_err();
    assert_eq!(err, ExpandError::KernelNotFound { path: String::from("/fs/mmc0p1/zImage") });
}

#[test]
fn test_cmdline_default_and_verbatim() {
    let fs = MemoryFilesystem::new()
        .with_file("/fs/mmc0p1/k", b"kernel")
        .with_file("/fs/mmc0p1/d", b"dtb");
    let device = DeviceDescriptor::new();

    let label = resolve(b"kernel k\nfdt d\n", &fs, &device).unwrap();
    assert_eq!(label.cmdline, "");

    let conf = b"kernel k\nfdt d\nappend  root=/dev/sda2   rw\tquiet";
    let label = resolve(conf, &fs, &device).unwrap();
    assert_eq!(label.cmdline, "root=/dev/sda2   rw\tquiet");
}

#[test]
fn test_revalidating_a_verified_label_is_a_no_op() {
    let fs = postmarketos_partition();
    let device = msm8916_device();
    let expander = ConfigExpander::new(&fs, &device);

    let data = fs.read("/fs/mmc0p1/extlinux/extlinux.conf").unwrap();
    let verified = expander.expand(&parse_conf(&data), ROOT).unwrap();
    drop(data);

    assert_eq!(expander.revalidate(&verified).unwrap(), verified);
}

#[test]
fn test_postmarketos_boot() {
    let fs = postmarketos_partition();
    let device = msm8916_device();
    let service = ExtlinuxBootService::new(&fs, &device);

    let label = service.resolve(ROOT).unwrap();
    assert_eq!(label.kernel, "/fs/mmc0p1/vmlinuz");
    assert_eq!(label.dtb.as_deref(), Some("/fs/mmc0p1/dtbs/qcom/msm8916-longcheer-l8150.dtb"));
    assert_eq!(label.initramfs.as_deref(), Some("/fs/mmc0p1/initramfs"));
    assert_eq!(label.cmdline, "console=ttyMSM0,115200 PMOS_NO_OUTPUT_REDIRECT pmos_boot_uuid=1234");

    // The kernel is gzip compressed and this platform has no decoder.
    let mut handoff = RecordingHandoff::default();
    let err = service.try_extlinux(ROOT, &NoDecompression, &mut handoff).unwrap_err();
    assert!(matches!(err, BootError::DecompressFailed(_)));
    assert!(handoff.payload.is_none());
}

#[test]
fn test_uncompressed_boot_hands_off_payload() {
    let mut fs = postmarketos_partition();
    fs.insert("/fs/mmc0p1/vmlinuz", b"ARMd");
    let device = msm8916_device();

    let mut handoff = RecordingHandoff::default();
    ExtlinuxBootService::new(&fs, &device)
        .try_extlinux(ROOT, &NoDecompression, &mut handoff)
        .unwrap();

    let payload = handoff.payload.unwrap();
    assert!(!is_gzip_image(&payload.kernel));
    assert_eq!(payload.kernel, b"ARMd");
    assert_eq!(payload.dtb, b"\xd0\x0d\xfe\xed");
    assert_eq!(payload.initramfs_size(), b"initramfs".len());
}

#[test]
fn test_missing_config_is_reported() {
    let device = msm8916_device();
    let fs = MemoryFilesystem::new();
    let err = ExtlinuxBootService::new(&fs, &device).resolve(ROOT).unwrap_err();
    let path = String::from("/fs/mmc0p1/extlinux/extlinux.conf");
    assert_eq!(err, BootError::ConfigNotFound { path });
}

#[test]
fn test_unreadable_config_is_reported() {
    let mut fs = MockFs::new();
    fs.expect_read()
        .with(eq("/fs/mmc0p1/extlinux/extlinux.conf"))
        .returning(|_| Err(FsError::Io(String::from("media error"))));
    let device = msm8916_device();

    let err = ExtlinuxBootService::new(&fs, &device).resolve(ROOT).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("media error"));
}

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        "(kernel|append|initrd|fdt|fdtdir|label|menu)[ \t]+[a-z0-9/=. ]{1,24}",
        "[ \t]*#[ -~]{0,24}",
        "[ \t]*",
    ]
}

proptest! {
    #[test]
    fn prop_tokenizer_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut tokens = Tokenizer::new(&data);
        for directive in tokens.by_ref() {
            prop_assert!(!directive.command.is_empty());
            prop_assert!(!directive.value.contains('\n'));
        }
        prop_assert!(tokens.termination().is_some());
    }

    #[test]
    fn prop_comments_yield_nothing(
        comments in proptest::collection::vec("[ \t]*(#[ -~]*)?", 0..8)
    ) {
        let data = comments.join("\n");
        prop_assert_eq!(Tokenizer::new(data.as_bytes()).count(), 0);
        prop_assert!(parse_conf(data.as_bytes()).is_empty());
    }

    #[test]
    fn prop_last_directive_wins(lines in proptest::collection::vec(line(), 1..12)) {
        let data = lines.join("\n");
        let directives: Vec<Directive<'_>> = Tokenizer::new(data.as_bytes()).collect();
        let label = parse_conf(data.as_bytes());

        let last = |cmd: &str| directives.iter().rev().find(|d| d.command == cmd).map(|d| d.value);
        prop_assert_eq!(label.kernel, last("kernel"));
        prop_assert_eq!(label.cmdline, last("append"));
        prop_assert_eq!(label.initramfs, last("initrd"));
        prop_assert_eq!(label.dtb, last("fdt"));
        prop_assert_eq!(label.dtbdir, last("fdtdir"));
    }
}
