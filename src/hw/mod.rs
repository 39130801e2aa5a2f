// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Thin wrappers over the `embedded-hal` traits the PAL is built on.

pub mod chip_select;
pub mod clock;

pub use chip_select::{ChipSelect, CsFrame};
pub use clock::Monotonic;
