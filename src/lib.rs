#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Spectrice: spectral freezing.
//!
//! Turns the tail of a sampled waveform into a stationary, loopable texture
//! by crossfading a running short-time spectrum into a frozen magnitude
//! and/or frozen per-hop phase advance. See [`SpectriceState`] for the
//! Init/Process/Destroy surface and [`SpectriceConfig`] for the knobs.

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod error;
pub mod fft;
pub mod phase;
pub mod state;
pub mod utils;
pub mod window;

pub use config::SpectriceConfig;
pub use error::SpectriceError;
pub use state::SpectriceState;
pub use window::WindowType;
