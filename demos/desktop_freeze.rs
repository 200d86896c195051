//! Desktop file processing demo
//!
//! A small CLI driving [`spectrice::SpectriceState`] block-by-block over a
//! WAV file, mirroring `Spectrice.c`'s `main`: it pre-pads the input so that
//! `freeze_point` always lands on a block boundary for the core, then
//! shifts the output back by the same amount before writing it out.

use hound::{WavReader, WavSpec, WavWriter};
use spectrice::{SpectriceConfig, SpectriceState, WindowType};
use std::env;
use std::error::Error;
use std::process::ExitCode;

struct Args {
    input: String,
    output: String,
    n_chan: usize,
    block_size: usize,
    n_hops: usize,
    window_type: WindowType,
    freeze_xfade: usize,
    freeze_point: usize,
    freeze_factor: f32,
    freeze_amp: bool,
    freeze_phase: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            n_chan: 1,
            block_size: 8192,
            n_hops: 8,
            window_type: WindowType::Nuttall,
            freeze_xfade: 0,
            freeze_point: 0,
            freeze_factor: 1.0,
            freeze_amp: true,
            freeze_phase: false,
        }
    }
}

fn usage() {
    eprintln!(
        "spectrice - Spectral Freezing Tool\n\
         Usage:\n\
         \u{20}spectrice input output [opt]\n\
         Options:\n\
         \u{20}-nc:1             Set number of channels.\n\
         \u{20}-blocksize:8192   Set number of coefficients per block (must be a power of 2).\n\
         \u{20}-nhops:8          Set number of evenly-divided hops per block (must be 2^n).\n\
         \u{20}-window:nuttall   sine|hann|hamming|blackman|nuttall\n\
         \u{20}-freezexfade:0    Samples to crossfade/blend prior to freezing (rounded to blocks).\n\
         \u{20}-freezepoint:X    Freezing point, in samples.\n\
         \u{20}-freezefactor:1.0 Amount of freezing to apply. 0.0 = no change, 1.0 = freeze.\n\
         \u{20}-nofreezeamp      Don't freeze amplitude.\n\
         \u{20}-freezephase      Freeze phase step.\n\
         Multi-channel data must be interleaved (packed)."
    );
}

fn parse_args() -> Option<Args> {
    let raw: Vec<String> = env::args().collect();
    if raw.len() < 3 {
        return None;
    }

    let mut args = Args {
        input: raw[1].clone(),
        output: raw[2].clone(),
        ..Default::default()
    };

    for arg in &raw[3..] {
        if let Some(v) = arg.strip_prefix("-nc:") {
            args.n_chan = v.parse().unwrap_or(args.n_chan);
        } else if let Some(v) = arg.strip_prefix("-blocksize:") {
            args.block_size = v.parse().unwrap_or(args.block_size);
        } else if let Some(v) = arg.strip_prefix("-nhops:") {
            args.n_hops = v.parse().unwrap_or(args.n_hops);
        } else if let Some(v) = arg.strip_prefix("-window:") {
            args.window_type = match v {
                "sine" => WindowType::Sine,
                "hann" => WindowType::Hann,
                "hamming" => WindowType::Hamming,
                "blackman" => WindowType::Blackman,
                "nuttall" => WindowType::Nuttall,
                other => {
                    eprintln!("WARNING: ignoring unknown window type ({other})");
                    args.window_type
                }
            };
        } else if let Some(v) = arg.strip_prefix("-freezexfade:") {
            args.freeze_xfade = v.parse().unwrap_or(args.freeze_xfade);
        } else if let Some(v) = arg.strip_prefix("-freezepoint:") {
            args.freeze_point = v.parse().unwrap_or(args.freeze_point);
        } else if let Some(v) = arg.strip_prefix("-freezefactor:") {
            args.freeze_factor = v.parse().unwrap_or(args.freeze_factor);
        } else if arg == "-nofreezeamp" {
            args.freeze_amp = false;
        } else if arg == "-freezephase" {
            args.freeze_phase = true;
        } else {
            eprintln!("WARNING: ignoring unknown argument ({arg})");
        }
    }

    Some(args)
}

/// Number of samples to prepend so that `freeze_point` lands on a block
/// boundary for the core, per `Spectrice.c`'s `InputPrePad`.
fn input_pre_pad(block_size: usize, freeze_point: usize) -> usize {
    block_size - (freeze_point % block_size)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut reader = WavReader::open(&args.input)?;
    let in_spec = reader.spec();
    let out_spec = WavSpec {
        channels: args.n_chan as u16,
        sample_rate: in_spec.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let pre_pad = input_pre_pad(args.block_size, args.freeze_point);
    let freeze_start = args
        .freeze_point
        .saturating_sub(args.freeze_xfade)
        + pre_pad;
    let freeze_point = args.freeze_point + pre_pad;

    let config = SpectriceConfig {
        n_chan: args.n_chan,
        block_size: args.block_size,
        n_hops: args.n_hops,
        window_type: args.window_type,
        freeze_start,
        freeze_point,
        freeze_factor: args.freeze_factor,
        freeze_amp: args.freeze_amp,
        freeze_phase: args.freeze_phase,
    };
    let mut state = SpectriceState::init(config, None, None)?;

    let samples: Vec<f32> = reader
        .samples::<i32>()
        .map(|s| s.map(|v| v as f32))
        .collect::<Result<_, _>>()?;

    // Pre-pad with silence so freeze_point is block-aligned, then delay the
    // output by BlockSize (iSTFT latency) plus that same pre-padding.
    let frame_len = args.block_size * args.n_chan;
    let mut padded = vec![0.0f32; pre_pad * args.n_chan];
    padded.extend_from_slice(&samples);

    let output_delay = args.block_size + pre_pad;
    let n_blocks = (padded.len() / args.n_chan).div_ceil(args.block_size).max(1);

    let mut writer = WavWriter::create(&args.output, out_spec)?;
    let mut produced = 0usize;
    let target_samples = samples.len() / args.n_chan;

    for block_idx in 0..n_blocks {
        let mut block = vec![0.0f32; frame_len];
        let start = block_idx * frame_len;
        let avail = padded.len().saturating_sub(start).min(frame_len);
        block[..avail].copy_from_slice(&padded[start..start + avail]);

        let mut out = vec![0.0f32; frame_len];
        state.process(Some(&mut out), &block)?;

        // Skip the iSTFT-delay-plus-prepad worth of leading silence, then
        // write whatever remains up to the original sample count.
        let block_start_sample = block_idx * args.block_size;
        for (k, frame) in out.chunks(args.n_chan).enumerate() {
            let global = block_start_sample + k;
            if global < output_delay {
                continue;
            }
            if produced >= target_samples {
                break;
            }
            for &s in frame {
                let clamped = s.round().clamp(-32768.0, 32767.0) as i32;
                writer.write_sample(clamped)?;
            }
            produced += 1;
        }
    }

    writer.finalize()?;
    state.destroy();
    Ok(())
}

fn main() -> ExitCode {
    let Some(args) = parse_args() else {
        usage();
        return ExitCode::FAILURE;
    };

    match run(&args) {
        Ok(()) => {
            println!("Ok.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
