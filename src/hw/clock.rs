// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Monotonic time source for the non-blocking timers.

/// Free-running microsecond counter.
///
/// The counter may wrap at `u32::MAX`; elapsed time is always taken with `wrapping_sub`, so a
/// single wait must stay below ~71 minutes.
pub trait Monotonic {
    /// Current counter value in microseconds.
    fn now_us(&mut self) -> u32;
}

/// Microseconds elapsed from `since` to `now`, across one counter wrap.
#[inline]
pub fn elapsed_us(since: u32, now: u32) -> u32 {
    now.wrapping_sub(since)
}
