// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration for the ADBMS6948 daisy chain and its SPI link.

use embedded_hal::spi::{Mode, MODE_0};

/// Command header length on the wire: 2 command bytes followed by 2 PEC bytes.
pub const CMD_HEADER_LEN: usize = 4;

/// Register payload per device, without PEC.
pub const REG_DATA_LEN_WITHOUT_PEC: usize = 6;

/// PEC length appended to every register payload.
pub const PEC_LEN: usize = 2;

/// Bytes each device in the chain contributes to one register-group read.
pub const BYTES_PER_DEVICE: usize = REG_DATA_LEN_WITHOUT_PEC + PEC_LEN;

/// Rows of a multi-group transmit/receive buffer.
pub const MAX_DAISY_CHAIN_DEPTH: usize = 8;

/// Largest per-device response of a read-all command (RDCVALL and friends, PEC included).
pub const MAX_READ_ALL_BYTES_PER_DEVICE: usize = 70;

/// Largest payload a single read-all exchange may request: a full-depth chain.
pub const MAX_READ_ALL_DATA_LEN: usize = MAX_DAISY_CHAIN_DEPTH * MAX_READ_ALL_BYTES_PER_DEVICE;

/// Chain the cell monitors sit on in the reference board setup.
pub const CELL_MONITOR_CHAIN_ID: u8 = 0;

/// Number of ADBMS6948 devices on [`CELL_MONITOR_CHAIN_ID`].
pub const CELL_MONITOR_DEVICES: usize = 1;

/// SPI clock for the daisy chain.
pub const SPI_FREQUENCY_HZ: u32 = 2_000_000;

/// 8-bit words, CPOL = 0, CPHA = 0.
pub const SPI_MODE: Mode = MODE_0;

/// Debug console baud rate.
pub const CONSOLE_BAUD: u32 = 115_200;

/// 1 ms expressed in microseconds.
pub const DELAY_1MS_US: u32 = 1_000;

/// 8 ms expressed in microseconds.
pub const DELAY_8MS_US: u32 = 8_000;
