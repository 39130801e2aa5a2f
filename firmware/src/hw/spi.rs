// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial Peripheral Interface (SPI) abstraction layer.
//!
//! `SpiBus` wraps a configured HAL SPI instance with 8-bit words and exposes it as an
//! `embedded-hal` 1.0 `SpiBus`, which is what the PAL drives. Chip select is handled by the PAL
//! through an [`super::OutPin`].

use embedded_hal::spi as eh_spi;
use stm32f7xx_hal::{
    prelude::*,
    spi::{self, Enabled, Spi},
};

/// HAL SPI error wrapped for `embedded-hal` 1.0.
#[derive(Debug)]
pub struct BusError(pub spi::Error);

impl eh_spi::Error for BusError {
    fn kind(&self) -> eh_spi::ErrorKind {
        eh_spi::ErrorKind::Other
    }
}

/// Wrapper around an enabled HAL SPI instance (8-bit words).
pub struct SpiBus<I, P> {
    spi: Spi<I, P, Enabled<u8>>,
}

impl<I, P> SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(spi: Spi<I, P, Enabled<u8>>) -> Self {
        Self { spi }
    }

    /// Perform a blocking, full-duplex transfer of one byte.
    pub fn transfer_byte(&mut self, byte: u8) -> Result<u8, BusError> {
        let mut tmp = [byte];
        self.spi.transfer(&mut tmp).map_err(BusError)?;
        Ok(tmp[0])
    }

    /// Exchange a byte buffer in-place: each byte sent is replaced by the byte received.
    pub fn exchange(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        for b in buf.iter_mut() {
            *b = self.transfer_byte(*b)?;
        }
        Ok(())
    }
}

impl<I, P> eh_spi::ErrorType for SpiBus<I, P> {
    type Error = BusError;
}

impl<I, P> eh_spi::SpiBus<u8> for SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for b in words.iter_mut() {
            *b = self.transfer_byte(0x00)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &b in words {
            self.transfer_byte(b)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let rx = self.transfer_byte(write.get(i).copied().unwrap_or(0x00))?;
            if let Some(slot) = read.get_mut(i) {
                *slot = rx;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.exchange(words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Every byte is clocked to completion in `transfer_byte`.
        Ok(())
    }
}
