//! Magnitude response dump.

use super::common::{build_params, parse_key_val};
use clap::Args;
use funky_core::TransportState;
use funky_engine::{AutoWah, ResponseCurve};

#[derive(Args)]
pub struct ResponseArgs {
    /// Number of log-spaced points between 20 Hz and 20 kHz
    #[arg(long, default_value = "32")]
    points: usize,

    /// Silent blocks to run before sampling the filter
    #[arg(long, default_value = "0")]
    blocks: usize,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: f32,

    /// Block size in samples
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Preset name or TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides by string id (e.g., "FilterQuality=4")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    if args.block_size == 0 || args.points == 0 {
        anyhow::bail!("block size and point count must be at least 1");
    }
    if !(args.sample_rate.is_finite() && args.sample_rate > 0.0) {
        anyhow::bail!("sample rate must be positive");
    }

    let params = build_params(args.preset.as_deref(), &args.param)?;
    let mut wah = AutoWah::with_params(params.clone());
    let view = wah.response_view();
    wah.prepare(args.sample_rate, args.block_size);

    let mut left = vec![0.0f32; args.block_size];
    let mut right = vec![0.0f32; args.block_size];
    for _ in 0..args.blocks {
        wah.process_block(&mut left, &mut right, TransportState::Playing);
    }

    let mut curve = ResponseCurve::new(args.points);
    curve.refresh(&view, &params);

    println!(
        "Filter frequency: {:.1} Hz (after {} block(s), phase {:.3})",
        curve.center_frequency(),
        args.blocks,
        wah.phase()
    );
    if !curve.sweep_range_valid() {
        println!(
            "Warning: sweep range invalid ({:.1} Hz >= {:.1} Hz)",
            curve.minimum_frequency(),
            curve.maximum_frequency()
        );
    }
    println!();
    println!("{:>10}  {:>9}", "Hz", "dB");
    for point in curve.points() {
        println!("{:>10.1}  {:>9.2}", point.frequency, point.magnitude_db);
    }

    Ok(())
}
