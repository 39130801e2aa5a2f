// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Time sources for the PAL timers.
//!
//! - `CycleDelay` adapts the SysTick based `cortex_m::delay::Delay` to `DelayNs`.
//! - `DwtClock` turns the DWT cycle counter into a wrapping microsecond counter.

use adbms_pal::hw::Monotonic;
use cortex_m::{delay::Delay, peripheral::DWT};
use embedded_hal::delay::DelayNs;

/// Blocking busy-wait delay on SysTick.
pub struct CycleDelay {
    delay: Delay,
}

impl CycleDelay {
    pub fn new(delay: Delay) -> Self {
        Self { delay }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

/// Microsecond clock derived from the DWT cycle counter.
///
/// The raw counter wraps every 2^32 cycles (~268 s at 16 MHz), so `now_us` has to be called at
/// least that often to keep the extended count exact. The PAL polls it on every timer call.
pub struct DwtClock {
    cycles_per_us: u32,
    last_cycles: u32,
    micros: u32,
}

impl DwtClock {
    /// `dwt` must already have its cycle counter enabled.
    pub fn new(_dwt: &DWT, sysclk_hz: u32) -> Self {
        Self {
            cycles_per_us: (sysclk_hz / 1_000_000).max(1),
            last_cycles: DWT::cycle_count(),
            micros: 0,
        }
    }
}

impl Monotonic for DwtClock {
    fn now_us(&mut self) -> u32 {
        let now = DWT::cycle_count();
        let us = now.wrapping_sub(self.last_cycles) / self.cycles_per_us;

        // Keep the sub-microsecond remainder for the next call.
        self.last_cycles = self
            .last_cycles
            .wrapping_add(us.wrapping_mul(self.cycles_per_us));
        self.micros = self.micros.wrapping_add(us);
        self.micros
    }
}
