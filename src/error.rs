//! Error types for the Spectrice library

/// Errors that can occur while configuring or driving a [`crate::state::SpectriceState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpectriceError {
    /// `nChan` outside `[1, 255]`
    ChannelCountOutOfRange,
    /// `BlockSize` outside `[8, 65536]`
    BlockSizeOutOfRange,
    /// `BlockSize` is not a power of two
    BlockSizeNotPowerOfTwo,
    /// `nHops` outside `[2, BlockSize]`
    HopCountOutOfRange,
    /// `nHops` is not a power of two
    HopCountNotPowerOfTwo,
    /// `nHops` is below the chosen window's minimum
    InsufficientHopsForWindow,
    /// `FreezeStart` is greater than `FreezePoint`
    InvalidFreezeRange,
    /// `FreezeFactor` outside `[0, 1]`
    FreezeFactorOutOfRange,
    /// `FreezePhase` was requested together with a snapshot buffer
    PhaseFreezeIncompatibleWithSnapshot,
    /// An `Input`/`Output`/priming/snapshot buffer did not have the expected
    /// `BlockSize * nChan` length
    BufferSizeMismatch,
}

#[cfg(feature = "std")]
impl std::fmt::Display for SpectriceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectriceError::ChannelCountOutOfRange => {
                write!(f, "channel count out of range [1, 255]")
            }
            SpectriceError::BlockSizeOutOfRange => {
                write!(f, "block size out of range [8, 65536]")
            }
            SpectriceError::BlockSizeNotPowerOfTwo => {
                write!(f, "block size is not a power of two")
            }
            SpectriceError::HopCountOutOfRange => {
                write!(f, "hop count out of range [2, block size]")
            }
            SpectriceError::HopCountNotPowerOfTwo => {
                write!(f, "hop count is not a power of two")
            }
            SpectriceError::InsufficientHopsForWindow => {
                write!(f, "hop count too low for the chosen window type")
            }
            SpectriceError::InvalidFreezeRange => {
                write!(f, "freeze start is greater than freeze point")
            }
            SpectriceError::FreezeFactorOutOfRange => {
                write!(f, "freeze factor out of range [0, 1]")
            }
            SpectriceError::PhaseFreezeIncompatibleWithSnapshot => {
                write!(f, "freeze-phase cannot be combined with a snapshot")
            }
            SpectriceError::BufferSizeMismatch => {
                write!(f, "buffer length did not match block size * channel count")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpectriceError {}
