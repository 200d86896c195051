//! Analysis/synthesis window generation
//!
//! Windows are generated over the first half `[0, BlockSize/2)` only; the
//! second half is implied by the symmetry `W[N-1-n] = W[n]` used throughout
//! the hop processor, matching `InitXformWindow` in the reference source.

use core::f32::consts::PI;

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::SpectriceError;

/// Available window shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Sine,
    Hann,
    Hamming,
    Blackman,
    Nuttall,
}

impl WindowType {
    /// Minimum `nHops` this window tolerates (matches `InitXformWindow`'s
    /// per-type rejection threshold; the practical recommendations in the
    /// CLI's usage text are stricter but are a host-side hint, not a core
    /// invariant).
    pub fn min_hops(self) -> usize {
        match self {
            WindowType::Sine => 2,
            WindowType::Hann => 3,
            WindowType::Hamming => 3,
            WindowType::Blackman => 5,
            WindowType::Nuttall => 7,
        }
    }
}

/// Generate the half-window `W[0..block_size/2)`, normalized so that
/// `sum(W[n]^2) * n_hops == 1`.
///
/// Fails with [`SpectriceError::InsufficientHopsForWindow`] if `n_hops` is
/// below the window's minimum.
pub fn generate(
    window_type: WindowType,
    block_size: usize,
    n_hops: usize,
) -> Result<Vec<f32>, SpectriceError> {
    if n_hops < window_type.min_hops() {
        return Err(SpectriceError::InsufficientHopsForWindow);
    }

    let half = block_size / 2;
    let n_f = block_size as f32;
    let mut w = vec![0.0f32; half];
    let mut sum = 0.0f32;

    match window_type {
        WindowType::Sine => {
            for (n, w_n) in w.iter_mut().enumerate() {
                *w_n = libm::sinf((n as f32 + 0.5) * PI / n_f);
                sum += *w_n * *w_n;
            }
        }
        WindowType::Hann => {
            for (n, w_n) in w.iter_mut().enumerate() {
                *w_n = 0.5 - 0.5 * libm::cosf((n as f32 + 0.5) * (2.0 * PI) / n_f);
                sum += *w_n * *w_n;
            }
        }
        WindowType::Hamming => {
            for (n, w_n) in w.iter_mut().enumerate() {
                *w_n = (25.0 / 46.0) - (21.0 / 46.0) * libm::cosf((n as f32 + 0.5) * (2.0 * PI) / n_f);
                sum += *w_n * *w_n;
            }
        }
        WindowType::Blackman => {
            for (n, w_n) in w.iter_mut().enumerate() {
                let x = n as f32 + 0.5;
                *w_n = 0.42 - 0.50 * libm::cosf(x * (2.0 * PI) / n_f)
                    + 0.08 * libm::cosf(x * (4.0 * PI) / n_f);
                sum += *w_n * *w_n;
            }
        }
        WindowType::Nuttall => {
            // "Some Windows with Very Good Sidelobe Behavior", A. Nuttall,
            // DOI: 10.1109/TASSP.1981.1163506, Eq. 37 (minimum 4-term window)
            for (n, w_n) in w.iter_mut().enumerate() {
                let x = n as f32 + 0.5;
                *w_n = 0.3635819 - 0.4891775 * libm::cosf(x * (2.0 * PI) / n_f)
                    + 0.1365995 * libm::cosf(x * (4.0 * PI) / n_f)
                    - 0.0106411 * libm::cosf(x * (6.0 * PI) / n_f);
                sum += *w_n * *w_n;
            }
        }
    }

    let norm = libm::sqrtf(1.0 / (sum * n_hops as f32));
    for w_n in w.iter_mut() {
        *w_n *= norm;
    }

    Ok(w)
}
