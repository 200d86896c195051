//! Integration tests for the spectrice library

use approx::assert_relative_eq;
use spectrice::{SpectriceConfig, SpectriceError, SpectriceState, WindowType};

fn run_blocks(config: SpectriceConfig, input: &[f32]) -> Vec<f32> {
    let mut state = SpectriceState::init(config, None, None).unwrap();
    let mut output = Vec::new();
    for block in input.chunks(config.block_size * config.n_chan) {
        let mut padded = vec![0.0f32; config.block_size * config.n_chan];
        padded[..block.len()].copy_from_slice(block);
        let mut out = vec![0.0f32; config.block_size * config.n_chan];
        state.process(Some(&mut out), &padded).unwrap();
        output.extend(out);
    }
    output
}

#[test]
fn s1_identity_ramp_passthrough() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 16,
        n_hops: 4,
        window_type: WindowType::Sine,
        freeze_start: 0,
        freeze_point: 1_000_000_000,
        freeze_factor: 0.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let input: Vec<f32> = (0..64).map(|i| i as f32).collect();
    let output = run_blocks(config, &input);

    for i in 0..48 {
        assert_relative_eq!(output[i + 16], input[i], epsilon = 1e-3);
    }
}

#[test]
fn s2_freeze_from_dc() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 32,
        n_hops: 8,
        window_type: WindowType::Hann,
        freeze_start: 32,
        freeze_point: 64,
        freeze_factor: 1.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let input = vec![0.5f32; 512];
    let output = run_blocks(config, &input);

    for &s in &output[config.block_size + 32..] {
        assert_relative_eq!(s, 0.5, epsilon = 1e-3);
    }
}

#[test]
fn s3_sine_freeze_rms_stationary() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 64,
        n_hops: 8,
        window_type: WindowType::Nuttall,
        freeze_start: 64,
        freeze_point: 128,
        freeze_factor: 1.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let n = 2048usize;
    let input: Vec<f32> = (0..n)
        .map(|i| (2.0 * std::f32::consts::PI * 4.5 * i as f32 / 64.0).sin())
        .collect();
    let output = run_blocks(config, &input);

    let rms_of = |win: &[f32]| -> f32 {
        (win.iter().map(|x| x * x).sum::<f32>() / win.len() as f32).sqrt()
    };

    let post_freeze = &output[config.block_size + 128..];
    let rms_windows: Vec<f32> = post_freeze.chunks(64).filter(|c| c.len() == 64).map(rms_of).collect();
    let first_rms = rms_windows[0];
    for &r in &rms_windows {
        assert_relative_eq!(r, first_rms, epsilon = 1e-2);
    }
}

#[test]
fn s4_snapshot_overrides_magnitude() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 32,
        n_hops: 8,
        window_type: WindowType::Hann,
        freeze_start: 0,
        freeze_point: 0,
        freeze_factor: 1.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let snapshot: Vec<f32> = (0..config.block_size)
        .map(|i| (2.0 * std::f32::consts::PI * 3.5 * i as f32 / config.block_size as f32).cos())
        .collect();
    let mut state = SpectriceState::init(config, None, Some(&snapshot)).unwrap();
    assert!(state.has_snapshot());

    let ramp: Vec<f32> = (0..256).map(|i| i as f32 * 0.01).collect();
    let mut first_block_out = vec![0.0f32; config.block_size];
    state
        .process(Some(&mut first_block_out), &ramp[..config.block_size])
        .unwrap();
    let mut second_block_out = vec![0.0f32; config.block_size];
    state
        .process(
            Some(&mut second_block_out),
            &ramp[config.block_size..2 * config.block_size],
        )
        .unwrap();

    // The frozen magnitude target must not drift across blocks once a
    // snapshot is in effect: with freeze_point == 0, every hop mixes fully
    // toward the snapshot, so RMS energy should stay stationary even though
    // the live input (a ramp) keeps changing.
    assert!(state.has_snapshot());
    let rms = |buf: &[f32]| -> f32 { (buf.iter().map(|x| x * x).sum::<f32>() / buf.len() as f32).sqrt() };
    assert_relative_eq!(rms(&first_block_out), rms(&second_block_out), epsilon = 1e-2);
}

#[test]
fn s5_two_channel_independence() {
    let config = SpectriceConfig {
        n_chan: 2,
        block_size: 32,
        n_hops: 4,
        window_type: WindowType::Hann,
        freeze_start: 64,
        freeze_point: 128,
        freeze_factor: 1.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let n = 512usize;
    let mut input = vec![0.0f32; n * 2];
    for i in 0..n {
        input[i * 2] = (2.0 * std::f32::consts::PI * 4.5 * i as f32 / 32.0).sin();
        input[i * 2 + 1] = 0.0;
    }
    let output = run_blocks(config, &input);

    for frame in output.chunks(2) {
        assert_relative_eq!(frame[1], 0.0, epsilon = 1e-4);
    }
}

#[test]
fn s6_factor_zero_is_noop_even_with_snapshot() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 32,
        n_hops: 4,
        window_type: WindowType::Hann,
        freeze_start: 0,
        freeze_point: 1_000_000_000,
        freeze_factor: 0.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let snapshot = vec![0.0f32; config.block_size];
    let mut state = SpectriceState::init(config, None, Some(&snapshot)).unwrap();

    let input: Vec<f32> = (0..64).map(|i| i as f32).collect();
    let mut output = Vec::new();
    for block in input.chunks(config.block_size) {
        let mut out = vec![0.0f32; config.block_size];
        state.process(Some(&mut out), block).unwrap();
        output.extend(out);
    }

    for i in 0..32 {
        assert_relative_eq!(output[i + config.block_size], input[i], epsilon = 1e-3);
    }
}

#[test]
fn invariant_window_normalization() {
    for (wt, hops) in [
        (WindowType::Sine, 2),
        (WindowType::Hann, 4),
        (WindowType::Hamming, 4),
        (WindowType::Blackman, 8),
        (WindowType::Nuttall, 8),
    ] {
        let config = SpectriceConfig {
            n_chan: 1,
            block_size: 64,
            n_hops: hops,
            window_type: wt,
            freeze_start: 0,
            freeze_point: 0,
            freeze_factor: 0.0,
            freeze_amp: true,
            freeze_phase: false,
        };
        assert!(SpectriceState::init(config, None, None).is_ok());
    }
}

#[test]
fn invariant_snapshot_and_phase_freeze_are_incompatible() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 32,
        n_hops: 8,
        window_type: WindowType::Hann,
        freeze_start: 0,
        freeze_point: 0,
        freeze_factor: 1.0,
        freeze_amp: true,
        freeze_phase: true,
    };
    let snapshot = vec![0.0f32; config.block_size];
    assert_eq!(
        SpectriceState::init(config, None, Some(&snapshot)).unwrap_err(),
        SpectriceError::PhaseFreezeIncompatibleWithSnapshot
    );
}

#[test]
fn invariant_buffer_size_mismatch_is_reported() {
    let config = SpectriceConfig {
        n_chan: 1,
        block_size: 32,
        n_hops: 8,
        window_type: WindowType::Hann,
        freeze_start: 0,
        freeze_point: 0,
        freeze_factor: 0.0,
        freeze_amp: true,
        freeze_phase: false,
    };
    let mut state = SpectriceState::init(config, None, None).unwrap();
    let bad_input = vec![0.0f32; 10];
    assert_eq!(
        state.process(None, &bad_input).unwrap_err(),
        SpectriceError::BufferSizeMismatch
    );
}
