// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod gpio;
pub mod led;
pub mod pins;
pub mod spi;
pub mod time;
pub mod usart;

pub use gpio::OutPin;
pub use led::StatusLeds;
pub use pins::BoardPins;
pub use spi::SpiBus;
pub use time::{CycleDelay, DwtClock};
pub use usart::{Usart, UsartRx};
