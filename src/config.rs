//! Configuration types for the Spectrice library

use crate::error::SpectriceError;
use crate::utils::math::is_power_of_two;
use crate::window::WindowType;

const MIN_CHANS: usize = 1;
const MAX_CHANS: usize = 255;
const MIN_BANDS: usize = 8;
const MAX_BANDS: usize = 65536;

/// Immutable-after-[`crate::state::SpectriceState::init`] configuration of a freeze operation.
///
/// All fields are expressed in the post-priming sample frame: sample index 0
/// is the first unconsumed input sample, so `FreezeStart`/`FreezePoint` must
/// already be clamped by the host to whatever coordinate system it presents
/// to the core (see `demos/desktop_freeze.rs` for the host-side block
/// alignment this implies).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectriceConfig {
    /// Channels in the interleaved encoding scheme
    pub n_chan: usize,
    /// Transform block size (power of two)
    pub block_size: usize,
    /// Number of STFT hops per block (power of two)
    pub n_hops: usize,
    /// Analysis/synthesis window shape
    pub window_type: WindowType,
    /// Position to begin the freeze crossfade (samples)
    pub freeze_start: usize,
    /// Position where the freeze crossfade peaks out (samples)
    pub freeze_point: usize,
    /// Freezing amount: 0.0 = no freezing, 1.0 = full freeze
    pub freeze_factor: f32,
    /// Freeze the magnitude spectrum
    pub freeze_amp: bool,
    /// Freeze the per-hop phase-advance spectrum (mutually exclusive with a snapshot)
    pub freeze_phase: bool,
}

impl Default for SpectriceConfig {
    fn default() -> Self {
        Self {
            n_chan: 1,
            block_size: 8192,
            n_hops: 8,
            window_type: WindowType::Nuttall,
            freeze_start: 0,
            freeze_point: 0,
            freeze_factor: 1.0,
            freeze_amp: true,
            freeze_phase: false,
        }
    }
}

impl SpectriceConfig {
    /// Validate the configuration against the range and algebraic invariants
    /// of the data model. Does not check the window/hop-count interaction —
    /// that is checked once the window is actually generated, since it
    /// depends on `window_type` and `n_hops` together.
    pub fn validate(&self) -> Result<(), SpectriceError> {
        if self.n_chan < MIN_CHANS || self.n_chan > MAX_CHANS {
            return Err(SpectriceError::ChannelCountOutOfRange);
        }
        if self.block_size < MIN_BANDS || self.block_size > MAX_BANDS {
            return Err(SpectriceError::BlockSizeOutOfRange);
        }
        if !is_power_of_two(self.block_size) {
            return Err(SpectriceError::BlockSizeNotPowerOfTwo);
        }
        if self.n_hops < 2 || self.n_hops > self.block_size {
            return Err(SpectriceError::HopCountOutOfRange);
        }
        if !is_power_of_two(self.n_hops) {
            return Err(SpectriceError::HopCountNotPowerOfTwo);
        }
        if self.freeze_start > self.freeze_point {
            return Err(SpectriceError::InvalidFreezeRange);
        }
        if !(0.0..=1.0).contains(&self.freeze_factor) {
            return Err(SpectriceError::FreezeFactorOutOfRange);
        }
        Ok(())
    }

    /// Samples per hop (`BlockSize / nHops`)
    pub fn hop_size(&self) -> usize {
        self.block_size / self.n_hops
    }

    /// Number of complex spectral bins (`BlockSize / 2`)
    pub fn spectrum_size(&self) -> usize {
        self.block_size / 2
    }
}
