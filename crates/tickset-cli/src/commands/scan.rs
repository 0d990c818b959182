//! Scan command: run a resolve strategy over a dumped module image.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use tickset_core::{
    LinuxStrategy, MacStrategy, ModuleView, ResolveStrategy, WindowsStrategy,
};

use super::parse_hex_address;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Platform {
    Windows,
    Linux,
    Macos,
}

impl Platform {
    fn strategy(self) -> &'static dyn ResolveStrategy {
        match self {
            Platform::Windows => &WindowsStrategy,
            Platform::Linux => &LinuxStrategy,
            Platform::Macos => &MacStrategy,
        }
    }
}

pub fn run(file: &Path, platform: Platform, base: &str) -> Result<()> {
    let base = parse_hex_address(base)?;
    let image = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    info!("Loaded {} bytes from {}", image.len(), file.display());

    let view = ModuleView::new(base, &image);
    let strategy = platform.strategy();

    println!("Image:    {} ({} bytes)", file.display(), image.len());
    println!("Base:     0x{:X}", base);
    println!("Strategy: {}", strategy.name());
    println!();

    match strategy.resolve(&view) {
        Ok(target) => {
            println!("Resolved target: 0x{:X}", target);
            println!("Module offset:   0x{:X}", target.wrapping_sub(base));
            Ok(())
        }
        Err(e) => {
            println!("Resolution failed: {}", e);
            // Not an IO error; exit cleanly so scripted sweeps can continue.
            Ok(())
        }
    }
}
