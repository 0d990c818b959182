//! Find command: raw signature search over a dumped module image.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use tickset_core::Signature;

pub fn run(file: &Path, pattern: &str, all: bool) -> Result<()> {
    let signature = Signature::parse(pattern)?;
    let image = fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    println!("Signature: {}", signature);
    println!("Image:     {} ({} bytes)", file.display(), image.len());
    println!();

    let mut region = &image[..];
    let mut offset = 0usize;
    let mut found = 0usize;

    while let Some(pos) = signature.find_in(region) {
        found += 1;
        println!("Match at offset 0x{:X}", offset + pos);

        if !all {
            break;
        }
        region = &region[pos + 1..];
        offset += pos + 1;
    }

    if found == 0 {
        println!("No matches");
    } else if all {
        println!();
        println!("Total matches: {}", found);
    }

    Ok(())
}
