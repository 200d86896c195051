//! Scaled DCT-II / DCT-IV primitives
//!
//! Matrix forms (0-indexed, matching `include/Fourier.h`'s cited definitions):
//!   DCT-II[k] = sum_n Buf[n] * cos(pi/M * (n+1/2) * k)
//!   DCT-IV[k] = sum_n Buf[n] * cos(pi/M * (n+1/2) * (k+1/2))
//!
//! The reference implementation builds these from a stable radix-2
//! decimation ("Signal Processing based on Stable radix-2 DCT I-IV
//! Algorithms having Orthogonal Factors", DOI: 10.13001/1081-3810.3207) for
//! O(M log M) performance. This module instead evaluates the defining sums
//! directly: M is small enough in practice (spectral half-blocks, not raw
//! sample counts) that the O(M^2) cost is acceptable for an offline tool,
//! and the direct form has no room for a decimation-order mistake to hide in.

use core::f32::consts::PI;

/// Scaled DCT-II, in place. `buf.len() == scratch.len() == M`.
pub fn dct2(buf: &mut [f32], scratch: &mut [f32]) {
    let m = buf.len();
    debug_assert_eq!(scratch.len(), m);
    for (k, out_k) in scratch.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (n, &x_n) in buf.iter().enumerate() {
            acc += x_n * libm::cosf(PI / m as f32 * (n as f32 + 0.5) * k as f32);
        }
        *out_k = acc;
    }
    buf.copy_from_slice(scratch);
}

/// Scaled DCT-IV, in place. `buf.len() == scratch.len() == M`.
pub fn dct4(buf: &mut [f32], scratch: &mut [f32]) {
    let m = buf.len();
    debug_assert_eq!(scratch.len(), m);
    for (k, out_k) in scratch.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (n, &x_n) in buf.iter().enumerate() {
            acc += x_n * libm::cosf(PI / m as f32 * (n as f32 + 0.5) * (k as f32 + 0.5));
        }
        *out_k = acc;
    }
    buf.copy_from_slice(scratch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dct4_is_its_own_inverse_up_to_scale() {
        // IDCT-IV = (2/M) * DCT-IV for this (unnormalized) definition.
        let m = 16;
        let original: Vec<f32> = (0..m).map(|i| libm::sinf(i as f32 * 0.37) ).collect();
        let mut buf = original.clone();
        let mut scratch = vec![0.0f32; m];
        dct4(&mut buf, &mut scratch);
        dct4(&mut buf, &mut scratch);
        for v in buf.iter_mut() {
            *v *= 2.0 / m as f32;
        }
        for (a, b) in original.iter().zip(buf.iter()) {
            assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
    }

    #[test]
    fn dct2_dc_component() {
        let m = 8;
        let mut buf = vec![1.0f32; m];
        let mut scratch = vec![0.0f32; m];
        dct2(&mut buf, &mut scratch);
        // DC bin (k=0) of an all-ones input is just the sum.
        assert!((buf[0] - m as f32).abs() < 1e-4);
    }
}
