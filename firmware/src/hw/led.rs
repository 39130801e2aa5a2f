// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board indicator LEDs.
//!
//! The green LED toggles once per console command. The red LED mirrors the fault flag of the
//! cell-monitor chain.

use embedded_hal::digital::OutputPin;

/// Active-high LED (the NUCLEO user LEDs sink to ground).
pub struct Indicator<PIN> {
    pin: PIN,
    lit: bool,
}

impl<PIN: OutputPin> Indicator<PIN> {
    /// Wrap `pin` and switch the LED off.
    pub fn new(mut pin: PIN) -> Self {
        pin.set_low().ok();
        Self { pin, lit: false }
    }

    pub fn set(&mut self, lit: bool) {
        if lit {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.lit = lit;
    }

    #[inline]
    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

pub struct StatusLeds<H, F> {
    heartbeat: Indicator<H>,
    fault: Indicator<F>,
}

impl<H: OutputPin, F: OutputPin> StatusLeds<H, F> {
    pub fn new(heartbeat: H, fault: F) -> Self {
        Self {
            heartbeat: Indicator::new(heartbeat),
            fault: Indicator::new(fault),
        }
    }

    /// Toggle the heartbeat LED.
    pub fn beat(&mut self) {
        self.heartbeat.toggle();
    }

    pub fn show_fault(&mut self, faulted: bool) {
        if self.fault.is_lit() != faulted {
            self.fault.set(faulted);
        }
    }
}
