use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tickset")]
#[command(about = "Offline signature tooling for the engine tick-interval patch")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a platform resolve strategy over a dumped module image
    Scan {
        /// Path to the dumped module image
        file: std::path::PathBuf,

        /// Which platform's strategy to run
        #[arg(short, long, default_value = "windows")]
        platform: commands::scan::Platform,

        /// Base address the image was mapped at (hex, with or without 0x)
        #[arg(short, long, default_value = "0")]
        base: String,
    },

    /// Search a dumped module image for a raw signature
    Find {
        /// Path to the dumped module image
        file: std::path::PathBuf,

        /// Signature text, e.g. "C7 05 ?? ?? ?? ?? 8F C2 75 3C E8"
        #[arg(short, long)]
        pattern: String,

        /// Report every match instead of the first
        #[arg(short, long)]
        all: bool,
    },

    /// Print the named rate table, or convert a rate/interval value
    Rates {
        /// A ticks-per-second value (or an interval with --interval)
        value: Option<f32>,

        /// Treat the value as an interval in seconds
        #[arg(short, long)]
        interval: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tickset=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Scan {
            file,
            platform,
            base,
        } => commands::scan::run(&file, platform, &base),
        Command::Find { file, pattern, all } => commands::find::run(&file, &pattern, all),
        Command::Rates { value, interval } => commands::rates::run(value, interval),
    }
}
