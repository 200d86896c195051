//! Per-bin phase-step freeze tracking
//!
//! Phase arithmetic is carried in "turns" (a full cycle = 1.0) rather than
//! radians throughout: wrapping to `[0, 1)` is then a fractional part
//! instead of a modulo-2pi, which is both cheaper and more accurate. This
//! convention is load-bearing and must not be reintroduced as radians
//! anywhere in the freeze path.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Per-channel, per-bin phase memory: last observed phase, the accumulated
/// synthesis phase, and the frozen/tracked per-hop phase advance.
pub struct PhaseState {
    pub prev_arg: Vec<f32>,
    pub arg_accum: Vec<f32>,
    pub arg_step: Vec<f32>,
}

impl PhaseState {
    pub fn new(n_chan: usize, bins: usize) -> Self {
        let len = n_chan * bins;
        Self {
            prev_arg: vec![0.0; len],
            arg_accum: vec![0.0; len],
            arg_step: vec![0.0; len],
        }
    }
}

/// Advance bin `n`'s phase-step state by one hop and return the phase (in
/// turns) to synthesize with.
///
/// `prev_arg`/`arg_accum`/`arg_step` are the per-channel slices (length
/// `bins`) for this bin's channel; `n_hops` is the block's hop count;
/// `mix_ratio` is the freeze crossfade scalar for this hop; `arg` is the
/// freshly analyzed phase (in turns) for this bin.
pub fn advance(
    prev_arg: &mut [f32],
    arg_accum: &mut [f32],
    arg_step: &mut [f32],
    n: usize,
    n_hops: usize,
    mix_ratio: f32,
    arg: f32,
) -> f32 {
    let expected_drift = n as f32 / n_hops as f32;

    let mut d_arg = arg - prev_arg[n];
    prev_arg[n] = arg;

    d_arg += expected_drift;
    d_arg -= libm::truncf(d_arg);
    if d_arg < 0.0 {
        d_arg += 1.0;
    }

    arg_step[n] = mix_ratio * arg_step[n] + (1.0 - mix_ratio) * d_arg;

    let d_arg = arg_step[n] - expected_drift;
    arg_accum[n] += d_arg;
    arg_accum[n] -= libm::truncf(arg_accum[n]);

    arg_accum[n]
}
