//! Centered FFT/iFFT kernels, built on DCT-II/DCT-IV primitives.
//!
//! The kernel is pluggable in principle (any scaled, power-of-two real FFT
//! with the centered-shift convention suffices) but this crate ships the
//! from-scratch centered-DCT construction the reference tool uses rather
//! than wrapping a third-party FFT crate, since that construction's
//! arbitrary-runtime-size contract doesn't fit a const-generic-per-size FFT
//! dependency (see DESIGN.md).

pub mod centered;
pub mod dct;

pub use centered::{fft_recenter, ifft_recenter};
pub use dct::{dct2, dct4};
