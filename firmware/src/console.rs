// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Numeric command menu run over the debug console.

use adbms_pal::config::{CELL_MONITOR_CHAIN_ID, CMD_HEADER_LEN, DELAY_8MS_US};
use adbms_pal::hw::Monotonic;
use adbms_pal::pal::diag::RuntimeErrorConfig;
use adbms_pal::pal::DiagnosticSink;
use adbms_pal::{Pal, PalError};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use log::error;

use crate::cprintln;
use crate::logger;

/// Payload bytes clocked out by the loopback read-all.
const LOOPBACK_LEN: usize = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Menu,
    Status,
    Loopback,
    TimerCheck,
    ClearFault,
    Unknown(u32),
}

impl From<u32> for Command {
    fn from(n: u32) -> Self {
        match n {
            0 => Command::Menu,
            1 => Command::Status,
            2 => Command::Loopback,
            3 => Command::TimerCheck,
            4 => Command::ClearFault,
            other => Command::Unknown(other),
        }
    }
}

pub fn print_menu() {
    cprintln!();
    cprintln!("ADBMS6948 PAL console");
    cprintln!("  0  Print this menu");
    cprintln!("  1  PAL status");
    cprintln!("  2  Loopback read-all ({} bytes)", LOOPBACK_LEN);
    cprintln!("  3  8 ms non-blocking timer check");
    cprintln!("  4  Clear chain fault");
    cprintln!("Enter command:");
}

pub fn execute<BUS, CS, D, CLK, SINK, const N: usize>(
    pal: &mut Pal<BUS, CS, D, CLK, SINK, N>,
    cmd: Command,
) where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
    CLK: Monotonic,
    SINK: DiagnosticSink,
{
    let chain = CELL_MONITOR_CHAIN_ID;
    let result = match cmd {
        Command::Menu => {
            print_menu();
            Ok(())
        }
        Command::Status => {
            cprintln!(
                "initialized: {}, chain {} fault: {}",
                pal.is_initialized(),
                chain,
                pal.is_error(chain)
            );
            Ok(())
        }
        Command::Loopback => loopback(pal),
        Command::TimerCheck => timer_check(pal),
        Command::ClearFault => pal.clear_error(chain).map(|()| cprintln!("fault cleared")),
        Command::Unknown(n) => {
            cprintln!("Unknown command {}", n);
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("command {:?} failed: {}", cmd, err);
        if err.is_fault() {
            pal.report_runtime_error(RuntimeErrorConfig::DEFAULT.platform.error_id, 1);
        }
    }
}

fn loopback<BUS, CS, D, CLK, SINK, const N: usize>(
    pal: &mut Pal<BUS, CS, D, CLK, SINK, N>,
) -> Result<(), PalError>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
    CLK: Monotonic,
    SINK: DiagnosticSink,
{
    let tx = [0u8; CMD_HEADER_LEN];
    let mut rx = [0u8; LOOPBACK_LEN];
    pal.spi_write_read_all(&tx, &mut rx, LOOPBACK_LEN, CELL_MONITOR_CHAIN_ID)?;
    cprintln!("read-all:");
    logger::with_console(|usart| usart.print_hex_bytes(&rx));
    Ok(())
}

fn timer_check<BUS, CS, D, CLK, SINK, const N: usize>(
    pal: &mut Pal<BUS, CS, D, CLK, SINK, N>,
) -> Result<(), PalError>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
    CLK: Monotonic,
    SINK: DiagnosticSink,
{
    pal.timer_start(DELAY_8MS_US, CELL_MONITOR_CHAIN_ID)?;
    let mut polls: u32 = 0;
    loop {
        match pal.wait_timeout(CELL_MONITOR_CHAIN_ID) {
            Ok(()) => break,
            Err(nb::Error::WouldBlock) => polls = polls.wrapping_add(1),
            Err(nb::Error::Other(err)) => return Err(err),
        }
    }
    cprintln!("timer expired after {} polls", polls);
    Ok(())
}
