// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # ADBMS6948 Platform Abstraction Layer
//!
//! This crate bridges the ADBMS6948 device driver to the board: it turns the driver's abstract
//! write and read requests into chip-select framed SPI exchanges, paces conversions with blocking
//! and non-blocking timers, and collects the driver's error reports.
//!
//! Command encoding, PEC checks and unit conversion live in the driver, not here.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Daisy-chain and SPI link constants |
//! | [`hw`] | Chip-select framing and the monotonic clock trait |
//! | [`pal`] | The [`Pal`] itself: transactions, timers, diagnostics |
//! | [`error`] | [`PalError`] |
//!
//! The crate is `no_std` and generic over `embedded-hal` 1.0 traits, so it runs on the target
//! and under `cargo test` on the host alike. The board firmware lives in `firmware/`.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cd firmware && cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod hw;
pub mod pal;

pub use error::PalError;
pub use pal::{ChainId, GroupBuffer, GroupConfig, Pal, SharedPal};
