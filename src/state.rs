//! Spectrice state: the single object exposing Init/Process/Destroy
//!
//! The reference implementation packs every scratch buffer into one
//! 64-byte-aligned allocation. This port instead holds each buffer as an
//! independent `Vec<f32>` (an allowance the specification's design notes
//! explicitly grant, since the scalar-only kernels here never depend on
//! byte alignment for correctness -- see DESIGN.md).

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f32::consts::PI;

use crate::config::SpectriceConfig;
use crate::error::SpectriceError;
use crate::fft::centered::{fft_recenter, ifft_recenter};
use crate::phase::{self, PhaseState};
use crate::utils::math::clamp;
use crate::window;

/// Always align memory to 64-byte boundaries (preparation for wide SIMD),
/// matching `SPECTRICE_BUFFER_ALIGNMENT` in the reference source. Recorded
/// here for documentation parity; see the module comment for why it is not
/// structurally enforced on the `Vec<f32>` buffers below.
pub const BUFFER_ALIGNMENT: usize = 64;

/// Owns every buffer the hop processor touches and the block/hop index.
///
/// Constructed by [`SpectriceState::init`]; there is no way to obtain one
/// in a partially-initialized state in safe Rust, so the "destroy a failed
/// Init" contract from the reference ABI is automatically satisfied: a
/// failed `init` never returns a `SpectriceState` at all.
pub struct SpectriceState {
    config: SpectriceConfig,
    window: Vec<f32>,
    /// Scratch for one hop's FFT: `[0, BlockSize)` holds the windowed time
    /// block / spectral lines being processed, `[BlockSize, 2*BlockSize)`
    /// is the transform's own working area.
    bf_temp: Vec<f32>,
    fwd_lap: Vec<f32>,
    inv_lap: Vec<f32>,
    /// Running or snapshot-frozen per-bin magnitude target, channel-major.
    abs: Vec<f32>,
    phase: Option<PhaseState>,
    have_snapshot: bool,
    block_idx: u64,
}

impl SpectriceState {
    /// Validate `config`, allocate scratch, and optionally warm the state
    /// with a priming block and/or a snapshot spectrum.
    ///
    /// `priming_input` and `snapshot`, if present, must each be
    /// `BlockSize * nChan` interleaved samples (the layout `process` also
    /// uses). Providing a snapshot together with `config.freeze_phase` is
    /// rejected: the reference source leaves combining the two to "a future
    /// update", so this port keeps that restriction rather than guessing
    /// at the missing semantics.
    pub fn init(
        config: SpectriceConfig,
        priming_input: Option<&[f32]>,
        snapshot: Option<&[f32]>,
    ) -> Result<Self, SpectriceError> {
        config.validate()?;

        if snapshot.is_some() && config.freeze_phase {
            return Err(SpectriceError::PhaseFreezeIncompatibleWithSnapshot);
        }

        let block_size = config.block_size;
        let n_chan = config.n_chan;
        let bins = config.spectrum_size();
        let frame_len = block_size * n_chan;

        if let Some(buf) = priming_input {
            if buf.len() != frame_len {
                return Err(SpectriceError::BufferSizeMismatch);
            }
        }
        if let Some(buf) = snapshot {
            if buf.len() != frame_len {
                return Err(SpectriceError::BufferSizeMismatch);
            }
        }

        let window = window::generate(config.window_type, block_size, config.n_hops)?;

        let phase = if config.freeze_phase {
            Some(PhaseState::new(n_chan, bins))
        } else {
            None
        };

        let mut state = SpectriceState {
            config,
            window,
            bf_temp: vec![0.0; block_size * 2],
            fwd_lap: vec![0.0; n_chan * block_size],
            inv_lap: vec![0.0; n_chan * block_size],
            abs: vec![0.0; n_chan * bins],
            phase,
            have_snapshot: false,
            block_idx: 0,
        };

        if let Some(snap) = snapshot {
            state.capture_snapshot(snap);
            state.have_snapshot = true;
        }

        if let Some(priming) = priming_input {
            // A process call with no output, advancing block_idx to 1; the
            // caller is expected to have chosen freeze_start/freeze_point in
            // that post-priming frame already.
            state.process(None, priming)?;
        }

        #[cfg(feature = "debug-logging")]
        log::debug!(
            "Spectrice::init ok: n_chan={} block_size={} n_hops={} have_snapshot={}",
            n_chan,
            block_size,
            config.n_hops,
            state.have_snapshot
        );

        Ok(state)
    }

    fn capture_snapshot(&mut self, snapshot: &[f32]) {
        let block_size = self.config.block_size;
        let n_chan = self.config.n_chan;
        let bins = self.config.spectrum_size();

        let (bf_dft, fft_scratch) = self.bf_temp.split_at_mut(block_size);
        for chan in 0..n_chan {
            for n in 0..bins {
                bf_dft[n] = self.window[n] * snapshot[n * n_chan + chan];
                bf_dft[block_size - 1 - n] =
                    self.window[n] * snapshot[(block_size - 1 - n) * n_chan + chan];
            }
            fft_recenter(bf_dft, fft_scratch);

            let a = &mut self.abs[chan * bins..(chan + 1) * bins];
            for (n, a_n) in a.iter_mut().enumerate() {
                let re = bf_dft[2 * n];
                let im = bf_dft[2 * n + 1];
                *a_n = libm::sqrtf(re * re + im * im);
            }
        }
    }

    /// Whether `A[c][n]` is an immutable snapshot target rather than a
    /// running magnitude updated each hop.
    pub fn has_snapshot(&self) -> bool {
        self.have_snapshot
    }

    /// Number of whole blocks processed so far.
    pub fn block_idx(&self) -> u64 {
        self.block_idx
    }

    pub fn config(&self) -> &SpectriceConfig {
        &self.config
    }

    /// Consume `input` (one block of `BlockSize * nChan` interleaved
    /// samples) and, if `output` is `Some`, write one block of reconstructed
    /// samples into it. `process` is infallible once `init` has succeeded
    /// for well-formed, correctly-sized buffers; a length mismatch is a
    /// precondition violation surfaced as [`SpectriceError::BufferSizeMismatch`]
    /// rather than a panic.
    pub fn process(
        &mut self,
        mut output: Option<&mut [f32]>,
        input: &[f32],
    ) -> Result<(), SpectriceError> {
        let n_chan = self.config.n_chan;
        let block_size = self.config.block_size;
        let n_hops = self.config.n_hops;
        let hop_size = self.config.hop_size();
        let bins = self.config.spectrum_size();
        let frame_len = block_size * n_chan;

        if input.len() != frame_len {
            return Err(SpectriceError::BufferSizeMismatch);
        }
        if let Some(ref out) = output {
            if out.len() != frame_len {
                return Err(SpectriceError::BufferSizeMismatch);
            }
        }

        // Disjoint-field destructure: each binding becomes an independent
        // `&mut` into `self` via default binding modes (RFC 2005), so the
        // per-channel loop below can hold simultaneous mutable slices of
        // `fwd_lap`, `inv_lap`, `abs` and `phase` without fighting the
        // borrow checker or reaching for `unsafe`.
        let SpectriceState {
            config,
            window,
            bf_temp,
            fwd_lap,
            inv_lap,
            abs,
            phase,
            have_snapshot,
            block_idx,
        } = self;

        let (bf_dft, fft_scratch) = bf_temp.split_at_mut(block_size);

        for chan in 0..n_chan {
            let fwd = &mut fwd_lap[chan * block_size..(chan + 1) * block_size];
            let inv = &mut inv_lap[chan * block_size..(chan + 1) * block_size];
            let a = &mut abs[chan * bins..(chan + 1) * bins];

            let mut phase_slices = phase.as_mut().map(|p| {
                (
                    &mut p.prev_arg[chan * bins..(chan + 1) * bins],
                    &mut p.arg_accum[chan * bins..(chan + 1) * bins],
                    &mut p.arg_step[chan * bins..(chan + 1) * bins],
                )
            });

            for hop in 0..n_hops {
                // 1. Windowed assembly
                for n in 0..bins {
                    bf_dft[n] = window[n] * fwd[n];
                    bf_dft[block_size - 1 - n] = window[n] * fwd[block_size - 1 - n];
                }

                // 2. Forward centered FFT
                fft_recenter(bf_dft, fft_scratch);

                // 3. Mix-ratio computation
                let idx = (*block_idx as f32 + hop as f32 / n_hops as f32) * block_size as f32;
                let beg = config.freeze_start as f32;
                let end = config.freeze_point as f32;
                let mut mix_ratio = if idx >= end {
                    1.0
                } else if end > beg {
                    (idx - beg) / (end - beg)
                } else {
                    // freeze_start == freeze_point: a degenerate crossfade
                    // region. Treat it as "not yet frozen" rather than
                    // dividing by zero (see SPEC_FULL.md section 9 / 10.6).
                    0.0
                };
                mix_ratio *= config.freeze_factor;
                let mix_ratio = clamp(mix_ratio, 0.0, 1.0);

                // 4. Per-bin amplitude/phase freeze
                for n in 0..bins {
                    let re = bf_dft[2 * n];
                    let im = bf_dft[2 * n + 1];
                    let mag = libm::sqrtf(re * re + im * im);
                    let mut arg = libm::atan2f(im, re) * (1.0 / (2.0 * PI));

                    let mag = if config.freeze_amp {
                        let mixed = mix_ratio * a[n] + (1.0 - mix_ratio) * mag;
                        if !*have_snapshot {
                            a[n] = mixed;
                        }
                        mixed
                    } else {
                        mag
                    };

                    if config.freeze_phase {
                        if let Some((prev_arg, arg_accum, arg_step)) = phase_slices.as_mut() {
                            arg = phase::advance(
                                prev_arg, arg_accum, arg_step, n, n_hops, mix_ratio, arg,
                            );
                        }
                    }

                    bf_dft[2 * n] = mag * libm::cosf(arg * 2.0 * PI);
                    bf_dft[2 * n + 1] = mag * libm::sinf(arg * 2.0 * PI);
                }

                // 5. Inverse centered FFT
                ifft_recenter(bf_dft, fft_scratch);

                // 6. Windowed accumulation
                for n in 0..bins {
                    inv[n] += window[n] * bf_dft[n];
                    inv[block_size - 1 - n] += window[n] * bf_dft[block_size - 1 - n];
                }

                // 7. Output and shift
                if let Some(out) = output.as_mut() {
                    for k in 0..hop_size {
                        out[(hop * hop_size + k) * n_chan + chan] = inv[k];
                    }
                }

                fwd.copy_within(hop_size..block_size, 0);
                inv.copy_within(hop_size..block_size, 0);
                for slot in inv.iter_mut().skip(block_size - hop_size) {
                    *slot = 0.0;
                }
                for k in 0..hop_size {
                    fwd[block_size - hop_size + k] = input[(hop * hop_size + k) * n_chan + chan];
                }
            }
        }

        *block_idx += 1;
        Ok(())
    }

    /// Releases the state. Taking `self` by value makes a double-destroy a
    /// compile error rather than relying on a runtime null-pointer check,
    /// which is the idiomatic Rust tightening of the reference ABI's
    /// "idempotent on the already-destroyed sentinel" contract.
    pub fn destroy(self) {}
}
