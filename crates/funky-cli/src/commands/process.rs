//! File-based auto-wah processing command.

use super::common::{build_params, parse_key_val};
use crate::wav::{read_stereo, write_float};
use anyhow::Context;
use clap::Args;
use funky_core::{TransportState, linear_to_db};
use funky_engine::AutoWah;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (32-bit float)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides by string id (e.g., "BPM=96", "UseNoteDuration=on")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let mut audio =
        read_stereo(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = audio.sample_rate as f32;

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        audio.frames(),
        audio.channels,
        audio.sample_rate,
        audio.frames() as f32 / sample_rate
    );

    let params = build_params(args.preset.as_deref(), &args.param)?;
    let mut wah = AutoWah::with_params(params);
    wah.prepare(sample_rate, args.block_size);

    let input_rms = rms(&audio.left);
    let input_peak = peak(&audio.left);

    let pb = ProgressBar::new(audio.frames() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let total = audio.frames();
    for (i, (left, right)) in audio
        .left
        .chunks_mut(args.block_size)
        .zip(audio.right.chunks_mut(args.block_size))
        .enumerate()
    {
        wah.process_block(left, right, TransportState::Playing);
        pb.set_position(((i + 1) * args.block_size).min(total) as u64);
    }
    pb.finish_with_message("done");

    tracing::debug!(
        center_hz = wah.current_filter_frequency(),
        phase = wah.phase(),
        "final sweep position"
    );
    wah.release();

    println!("\nStats (left channel):");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&audio.left)),
        linear_to_db(peak(&audio.left))
    );

    println!("\nWriting {}...", args.output.display());
    write_float(&args.output, &audio, audio.channels)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
