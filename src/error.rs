// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by every PAL operation.

use embedded_hal::{digital, spi};
use thiserror::Error;

use crate::pal::ChainId;

/// Everything that can go wrong between the driver request and the SPI pins.
///
/// Configuration errors are caught before the bus is touched. `Bus` and `ChipSelect` are physical
/// faults and latch the chain's fault flag (see [`crate::Pal::is_error`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum PalError {
    #[error("unknown daisy-chain id {0}")]
    UnknownChain(ChainId),

    #[error("group length {len} is shorter than the command header")]
    GroupTooShort { len: u16 },

    #[error("group length {len} does not fit the transaction buffer")]
    GroupTooLong { len: u16 },

    #[error("{count} register groups exceed the buffer depth")]
    TooManyGroups { count: u16 },

    #[error("buffer holds {available} bytes but {needed} are required")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("read-all payload of {len} bytes does not fit the scratch buffer")]
    ReadAllTooLong { len: usize },

    #[error("SPI bus error: {0:?}")]
    Bus(spi::ErrorKind),

    #[error("chip-select error: {0:?}")]
    ChipSelect(digital::ErrorKind),
}

impl PalError {
    pub(crate) fn bus<E: spi::Error>(err: E) -> Self {
        Self::Bus(err.kind())
    }

    pub(crate) fn chip_select<E: digital::Error>(err: E) -> Self {
        Self::ChipSelect(err.kind())
    }

    /// True for failures of the physical link rather than of the request.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Bus(_) | Self::ChipSelect(_))
    }
}
