// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! `Usart` is the transmit half used by the console logger; `UsartRx` reads menu commands typed on
//! the attached debug terminal.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the ST-LINK USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Rx, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new(tx: Tx<U>) -> Self {
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    pub fn print_hex_u8(&mut self, n: u8) {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        self.write_str("0x");
        self.write_byte(HEX[((n >> 4) & 0xF) as usize]);
        self.write_byte(HEX[(n & 0xF) as usize]);
    }

    /// Space-separated hex dump on one line.
    pub fn print_hex_bytes(&mut self, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            if i != 0 {
                self.write_str(", ");
            }
            self.print_hex_u8(b);
        }
        self.write_str("\r\n");
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

pub struct UsartRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> UsartRx<U> {
    pub fn new(rx: Rx<U>) -> Self {
        Self { rx }
    }

    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, serial::Error> {
        block!(self.rx.read())
    }

    /// Read a decimal number terminated by CR or LF. Other characters are skipped.
    ///
    /// Saturates at `u32::MAX`.
    pub fn read_number(&mut self) -> Result<u32, serial::Error> {
        let mut value: u32 = 0;
        let mut seen_digit = false;
        loop {
            match self.read_byte()? {
                b @ b'0'..=b'9' => {
                    value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
                    seen_digit = true;
                }
                b'\r' | b'\n' if seen_digit => return Ok(value),
                _ => {}
            }
        }
    }
}
