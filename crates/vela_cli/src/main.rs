//! Vela CLI
//!
//! Inspect and sample animation set descriptions.

mod sample;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vela_animation::{Animation, AnimationSet, SetConfig};

#[derive(Parser)]
#[command(name = "vela", version, about = "Vela animation set tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a set frame by frame until it finishes
    Sample {
        /// Set description (TOML)
        file: PathBuf,
        #[command(flatten)]
        bounds: Bounds,
        /// Frame step in milliseconds
        #[arg(long, default_value_t = 16)]
        step: u32,
        /// Stop after this many frames even if the set is still running
        #[arg(long, default_value_t = 10_000)]
        max_frames: usize,
        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Print duration, duration hint and flags of a set
    Info {
        /// Set description (TOML)
        file: PathBuf,
    },
}

/// Element and parent size used to resolve relative values
#[derive(Args, Clone, Copy)]
pub struct Bounds {
    #[arg(long, default_value_t = 100.0)]
    pub width: f32,
    #[arg(long, default_value_t = 100.0)]
    pub height: f32,
    #[arg(long, default_value_t = 400.0)]
    pub parent_width: f32,
    #[arg(long, default_value_t = 400.0)]
    pub parent_height: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Sample {
            file,
            bounds,
            step,
            max_frames,
            json,
        } => {
            let set = load_set(&file)?;
            let options = sample::SampleOptions {
                bounds,
                step_ms: step.max(1) as i64,
                max_frames,
            };
            let frames = sample::sample(set, &options);
            let mut stdout = std::io::stdout().lock();
            sample::print_frames(&mut stdout, &frames, json)?;
        }
        Command::Info { file } => {
            let set = load_set(&file)?;
            let hint = set
                .compute_duration_hint()
                .map_or_else(|| "unbounded".to_string(), |h| format!("{h} ms"));
            println!("members:       {}", set.len());
            println!("duration:      {} ms", set.duration());
            println!("duration hint: {hint}");
            println!("start offset:  {} ms", set.start_offset());
            println!("flags:         {:?}", set.flags());
        }
    }

    Ok(())
}

fn load_set(path: &std::path::Path) -> Result<AnimationSet> {
    let config = SetConfig::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let set = config
        .build()
        .with_context(|| format!("Failed to build set from {}", path.display()))?;
    tracing::info!(file = %path.display(), members = set.len(), "loaded animation set");
    Ok(set)
}
