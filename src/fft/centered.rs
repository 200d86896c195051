//! Centered FFT / iFFT
//!
//! "The Centered Discrete Fourier Transform and a Parallel Implementation of
//! the FFT", DOI: 10.1109/ICASSP.2011.5946834. Shifts the DFT's bin grid by
//! 1/2 in both time and frequency, so that a real, even-length symmetric
//! window transforms to a purely real spectrum and bin centers land on
//! `(k+1/2)`. Built from two half-size DCT-IV transforms on the sum/
//! difference of the input halves, with an odd-index sign flip standing in
//! for the DST half of the transform.
//!
//! Transliterated from `Fourier_FFTReCenter`/`Fourier_iFFTReCenter`'s scalar
//! fallback path; the vectorized (`FOURIER_VSTRIDE > 1`) path in the
//! reference computes the same result over SIMD lanes and is not
//! reproduced here (see REDESIGN FLAGS in SPEC_FULL.md).

use super::dct::dct4;

/// Forward centered FFT, in place. `buf.len() == tmp.len() == N`, `N` a
/// power of two `>= 8`. Writes `N/2` complex lines packed as
/// `{Re0, Im0, Re1, Im1, ...}`.
pub fn fft_recenter(buf: &mut [f32], tmp: &mut [f32]) {
    let n = buf.len();
    debug_assert_eq!(tmp.len(), n);
    debug_assert!(n >= 8 && n.is_power_of_two());
    let h = n / 2;

    // Sum/difference of the two halves, walked from the midpoint outward,
    // with the odd-index sign flip that stands in for the DST half.
    let mut k = 0;
    while k < h {
        let a0 = buf[h + k];
        let b0 = buf[h - 1 - k];
        tmp[h + k] = a0 - b0;
        tmp[k] = a0 + b0;

        let a1 = buf[h + k + 1];
        let b1 = buf[h - 2 - k];
        tmp[h + k + 1] = b1 - a1;
        tmp[k + 1] = a1 + b1;

        k += 2;
    }

    dct4(&mut tmp[0..h], &mut buf[0..h]);
    dct4(&mut tmp[h..n], &mut buf[0..h]);

    // Reverse the DST half and interleave {Re, Im}.
    for i in 0..h {
        buf[2 * i] = tmp[i];
        buf[2 * i + 1] = tmp[n - 1 - i];
    }
}

/// Inverse centered FFT, in place. Reverses [`fft_recenter`] exactly up to
/// numeric scaling.
pub fn ifft_recenter(buf: &mut [f32], tmp: &mut [f32]) {
    let n = buf.len();
    debug_assert_eq!(tmp.len(), n);
    debug_assert!(n >= 8 && n.is_power_of_two());
    let h = n / 2;

    // Deinterleave {Re, Im}, reversing the DST half back out.
    for i in 0..h {
        tmp[i] = buf[2 * i];
        tmp[n - 1 - i] = buf[2 * i + 1];
    }

    dct4(&mut tmp[0..h], &mut buf[0..h]);
    dct4(&mut tmp[h..n], &mut buf[0..h]);

    // Recombine sum/difference back into the two halves.
    let mut k = 0;
    while k < h {
        let a0 = tmp[k];
        let b0 = tmp[k + h];
        buf[h + k] = a0 + b0;
        buf[h - 1 - k] = a0 - b0;

        let a1 = tmp[k + 1];
        let b1 = tmp[k + 1 + h];
        buf[h + k + 1] = a1 - b1;
        buf[h - 2 - k] = a1 + b1;

        k += 2;
    }
}
