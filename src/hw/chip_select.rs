// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Chip-select handling for the daisy-chain SPI link.
//!
//! - `ChipSelect` is an active-low GPIO output wrapper for manual CS control.
//! - `CsFrame` holds the bus and an asserted CS line for the length of one exchange. Dropping the
//!   frame flushes the bus and returns CS to idle-high, so an early `?` never leaves CS low.

use embedded_hal::{digital::OutputPin, spi::SpiBus};

use crate::error::PalError;

/// Manual chip-select line, active-low, generic over any output pin.
pub struct ChipSelect<PIN> {
    pin: PIN,
    asserted: bool,
}

impl<PIN: OutputPin> ChipSelect<PIN> {
    /// Create an active-low chip select and set it to the inactive state (i.e., high).
    pub fn active_low(mut pin: PIN) -> Self {
        pin.set_high().ok();
        Self {
            pin,
            asserted: false,
        }
    }

    /// Assert the chip select.
    #[inline]
    pub fn select(&mut self) -> Result<(), PIN::Error> {
        self.pin.set_low()?;
        self.asserted = true;
        Ok(())
    }

    /// Deassert the chip select.
    #[inline]
    pub fn deselect(&mut self) -> Result<(), PIN::Error> {
        self.pin.set_high()?;
        self.asserted = false;
        Ok(())
    }

    /// Whether CS was last driven low.
    #[inline]
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

/// One chip-select framed exchange window.
///
/// The frame borrows the bus and the CS line mutably, so no other exchange can start until it is
/// closed with [`CsFrame::end`] or dropped.
pub struct CsFrame<'a, BUS, PIN>
where
    BUS: SpiBus<u8>,
    PIN: OutputPin,
{
    bus: &'a mut BUS,
    cs: &'a mut ChipSelect<PIN>,
    open: bool,
}

impl<'a, BUS, PIN> CsFrame<'a, BUS, PIN>
where
    BUS: SpiBus<u8>,
    PIN: OutputPin,
{
    /// Drive CS low and open the frame.
    pub fn begin(bus: &'a mut BUS, cs: &'a mut ChipSelect<PIN>) -> Result<Self, PalError> {
        if let Err(err) = cs.select() {
            // Leave the line idle.
            cs.deselect().ok();
            return Err(PalError::chip_select(err));
        }
        Ok(Self {
            bus,
            cs,
            open: true,
        })
    }

    /// Bus access for the duration of the frame.
    #[inline]
    pub fn bus(&mut self) -> &mut BUS {
        &mut *self.bus
    }

    /// Wait for the bus to go idle, then release CS.
    ///
    /// CS is released even if the flush fails; the first error is returned.
    pub fn end(mut self) -> Result<(), PalError> {
        self.open = false;
        let flushed = self.bus.flush().map_err(PalError::bus);
        let released = self.cs.deselect().map_err(PalError::chip_select);
        flushed.and(released)
    }
}

impl<BUS, PIN> Drop for CsFrame<'_, BUS, PIN>
where
    BUS: SpiBus<u8>,
    PIN: OutputPin,
{
    fn drop(&mut self) {
        if self.open {
            self.bus.flush().ok();
            self.cs.deselect().ok();
        }
    }
}
