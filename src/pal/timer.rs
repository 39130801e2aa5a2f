// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-chain non-blocking timeout.
//!
//! The driver starts a timer after triggering a conversion and then polls it until it expires.
//! Each chain owns one `ChainTimer`; timers never share a counter.

use crate::hw::clock::elapsed_us;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimerState {
    /// Never started, or reset by `init`.
    Idle,
    Running { started_at: u32, period_us: u32 },
}

#[derive(Copy, Clone, Debug)]
pub struct ChainTimer {
    state: TimerState,
}

impl ChainTimer {
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Start (or restart) the timer at `now` with a `period_us` threshold.
    ///
    /// Restarting overwrites the previous threshold.
    pub fn start(&mut self, now: u32, period_us: u32) {
        self.state = TimerState::Running {
            started_at: now,
            period_us,
        };
    }

    /// Whether the period has fully elapsed at `now`.
    ///
    /// An idle timer has nothing pending and reports expired.
    pub fn expired(&self, now: u32) -> bool {
        match self.state {
            TimerState::Idle => true,
            TimerState::Running {
                started_at,
                period_us,
            } => elapsed_us(started_at, now) >= period_us,
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }
}

impl Default for ChainTimer {
    fn default() -> Self {
        Self::new()
    }
}
