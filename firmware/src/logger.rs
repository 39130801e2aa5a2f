// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend writing to the USART3 console.
//!
//! The transmit half lives in a critical-section guarded static so that both the PAL's log
//! records and the console menu output go through the same UART.

use core::cell::RefCell;
use core::fmt::{self, Write};

use critical_section::Mutex;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use stm32f7xx_hal::pac::USART3;

use crate::hw::Usart;

static CONSOLE: Mutex<RefCell<Option<Usart<USART3>>>> = Mutex::new(RefCell::new(None));
static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        with_console(|usart| {
            let _ = write!(usart, "[{}] {}\r\n", record.level(), record.args());
        });
    }

    fn flush(&self) {
        with_console(|usart| usart.flush());
    }
}

/// Hand the console to the logger and install it as the global `log` backend.
pub fn init(usart: Usart<USART3>, level: LevelFilter) -> Result<(), SetLoggerError> {
    critical_section::with(|cs| CONSOLE.borrow_ref_mut(cs).replace(usart));
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Run `f` on the console. Returns `None` before [`init`].
pub fn with_console<R>(f: impl FnOnce(&mut Usart<USART3>) -> R) -> Option<R> {
    critical_section::with(|cs| CONSOLE.borrow_ref_mut(cs).as_mut().map(f))
}

pub fn print(args: fmt::Arguments) {
    with_console(|usart| {
        let _ = usart.write_fmt(args);
    });
}

/// `println!` for the console, with CRLF line endings.
#[macro_export]
macro_rules! cprintln {
    () => {
        $crate::logger::print(format_args!("\r\n"))
    };
    ($($arg:tt)*) => {{
        $crate::logger::print(format_args!($($arg)*));
        $crate::logger::print(format_args!("\r\n"));
    }};
}
