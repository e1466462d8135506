//! extlinux-probe - resolve an extlinux.conf on the host
//!
//! Runs the same parsing and validation as the bootloader against a
//! mounted boot partition and prints the label it would boot.

use anyhow::{Context, Result, bail};
use nos_extlinux::{DeviceDescriptor, DtbPolicy, ExtlinuxBootService, ResolverConfig, StdFilesystem};

struct Args {
    root: String,
    model: Option<String>,
    policy: DtbPolicy,
    config_path: Option<String>,
    dtbfiles: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut root = None;
    let mut model = None;
    let mut policy = DtbPolicy::Strict;
    let mut config_path = None;
    let mut dtbfiles = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--model" => model = Some(args.next().context("--model needs a value")?),
            "--config" => config_path = Some(args.next().context("--config needs a value")?),
            "--strict" => policy = DtbPolicy::Strict,
            "--passthrough" => policy = DtbPolicy::Passthrough,
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            _ if root.is_none() => root = Some(arg.clone()),
            _ => dtbfiles.push(arg.clone()),
        }
    }

    let Some(root) = root else {
        return Ok(None);
    };

    Ok(Some(Args { root, model, policy, config_path, dtbfiles }))
}

fn print_help() {
    println!(
        "extlinux-probe usage:\n  extlinux-probe <root> [--model NAME] [--config PATH] \
         [--strict|--passthrough] [dtb ...]"
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        print_help();
        return Ok(());
    };

    let mut device = DeviceDescriptor::new();
    if let Some(model) = args.model {
        device = device.with_model(model);
    }
    if !args.dtbfiles.is_empty() {
        device = device.with_dtbfiles(args.dtbfiles);
    }

    let mut config = ResolverConfig::new().with_dtb_policy(args.policy);
    if let Some(path) = args.config_path {
        config = config.with_config_path(path);
    }

    let fs = StdFilesystem::new();
    let service = ExtlinuxBootService::with_config(&fs, &device, config)?;
    let label = service
        .resolve(&args.root)
        .with_context(|| format!("failed to resolve {}", service.config_file(&args.root)))?;

    println!("{}", label);
    Ok(())
}
