// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Platform Abstraction Layer
//!
//! [`Pal`] owns everything the ADBMS6948 driver needs from the board: the SPI bus, one
//! chip-select line per daisy chain, a blocking delay, a monotonic clock for the non-blocking
//! timers, and a diagnostics sink.
//!
//! All chains share the one bus. Every operation takes `&mut self`, so exchanges on different
//! chains can never overlap. Use [`SharedPal`] to reach the PAL from more than one execution
//! context.
//!
//! ## Modules
//!
//! - [`buffer`] - Transaction buffer layout and the packed group descriptor.
//! - [`transfer`] - Write, multi-group write/read and read-all exchanges.
//! - [`timer`] - Per-chain non-blocking timeout state machine.
//! - [`diag`] - Development/runtime error reports.
//! - [`mem`] - Byte-range helpers.
//! - [`shared`] - Critical-section wrapper for global access.

pub mod buffer;
pub mod diag;
pub mod mem;
pub mod shared;
pub mod timer;
pub mod transfer;

pub use buffer::{GroupBuffer, GroupConfig};
pub use diag::{DevelopmentError, DiagnosticSink, LogSink, RuntimeError};
pub use shared::SharedPal;
pub use timer::{ChainTimer, TimerState};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use log::{debug, warn};

use crate::error::PalError;
use crate::hw::{ChipSelect, Monotonic};

/// Index of a daisy chain, i.e., of its chip-select line.
pub type ChainId = u8;

/// Per-chain resources.
struct Chain<CS> {
    cs: ChipSelect<CS>,
    timer: ChainTimer,
    fault: bool,
}

impl<CS: OutputPin> Chain<CS> {
    fn new(pin: CS) -> Self {
        Self {
            cs: ChipSelect::active_low(pin),
            timer: ChainTimer::new(),
            fault: false,
        }
    }
}

/// Platform layer for `CHAINS` daisy chains on one SPI bus.
pub struct Pal<BUS, CS, D, CLK, SINK, const CHAINS: usize> {
    bus: BUS,
    chains: [Chain<CS>; CHAINS],
    delay: D,
    clock: CLK,
    sink: SINK,
    initialized: bool,
}

impl<BUS, CS, D, CLK, SINK, const CHAINS: usize> Pal<BUS, CS, D, CLK, SINK, CHAINS>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
    CLK: Monotonic,
    SINK: DiagnosticSink,
{
    /// Construct the PAL. `cs_lines[i]` becomes the chip select of chain `i` and is driven high.
    pub fn new(bus: BUS, cs_lines: [CS; CHAINS], delay: D, clock: CLK, sink: SINK) -> Self {
        Self {
            bus,
            chains: cs_lines.map(Chain::new),
            delay,
            clock,
            sink,
            initialized: false,
        }
    }

    /// Release the bus, CS pins, delay, clock and sink.
    pub fn free(self) -> (BUS, [CS; CHAINS], D, CLK, SINK) {
        (
            self.bus,
            self.chains.map(|chain| chain.cs.free()),
            self.delay,
            self.clock,
            self.sink,
        )
    }

    // ----- Lifecycle -----

    /// Bring every chain to a known state: CS idle-high, timers idle.
    ///
    /// Latched faults are kept; clear them with [`Pal::clear_error`]. Safe to call repeatedly; the
    /// driver calls it before every command.
    pub fn init(&mut self) -> Result<(), PalError> {
        for chain in self.chains.iter_mut() {
            chain.cs.deselect().map_err(PalError::chip_select)?;
            chain.timer.reset();
        }
        self.initialized = true;
        debug!("PAL initialized ({} chains)", CHAINS);
        Ok(())
    }

    /// Release every CS line. Timer and fault state are kept for inspection.
    pub fn deinit(&mut self) -> Result<(), PalError> {
        let mut result = Ok(());
        for chain in self.chains.iter_mut() {
            if let Err(err) = chain.cs.deselect() {
                result = result.and(Err(PalError::chip_select(err)));
            }
        }
        self.initialized = false;
        debug!("PAL deinitialized");
        result
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub const fn chain_count(&self) -> usize {
        CHAINS
    }

    // ----- Bus transactions -----

    /// Transmit `data` on `chain_id`, discarding the response.
    pub fn spi_write(&mut self, data: &[u8], chain_id: ChainId) -> Result<(), PalError> {
        self.transact(chain_id, |bus, cs| transfer::write(bus, cs, data))
    }

    /// Multi-group write/read on `chain_id` as described by `cfg`.
    ///
    /// See [`transfer::write_reads`] for the buffer contract.
    pub fn spi_write_reads(
        &mut self,
        tx: &GroupBuffer,
        rx: &mut GroupBuffer,
        cfg: GroupConfig,
        chain_id: ChainId,
    ) -> Result<(), PalError> {
        self.transact(chain_id, |bus, cs| {
            transfer::write_reads(bus, cs, tx, rx, cfg)
        })
    }

    /// Read-all exchange of `CMD_HEADER_LEN + data_len` bytes on `chain_id`.
    pub fn spi_write_read_all(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        data_len: usize,
        chain_id: ChainId,
    ) -> Result<(), PalError> {
        self.transact(chain_id, |bus, cs| {
            transfer::write_read_all(bus, cs, tx, rx, data_len)
        })
    }

    /// Whether a bus or chip-select fault has been latched for `chain_id`.
    ///
    /// Unknown chains report no fault.
    pub fn is_error(&self, chain_id: ChainId) -> bool {
        self.chains
            .get(usize::from(chain_id))
            .map_or(false, |chain| chain.fault)
    }

    pub fn clear_error(&mut self, chain_id: ChainId) -> Result<(), PalError> {
        self.chain_mut(chain_id)?.fault = false;
        Ok(())
    }

    fn transact<R>(
        &mut self,
        chain_id: ChainId,
        op: impl FnOnce(&mut BUS, &mut ChipSelect<CS>) -> Result<R, PalError>,
    ) -> Result<R, PalError> {
        let chain = self
            .chains
            .get_mut(usize::from(chain_id))
            .ok_or(PalError::UnknownChain(chain_id))?;

        let result = op(&mut self.bus, &mut chain.cs);
        if let Err(err) = &result {
            if err.is_fault() {
                chain.fault = true;
                warn!("chain {}: {}", chain_id, err);
            }
        }
        result
    }

    fn chain_mut(&mut self, chain_id: ChainId) -> Result<&mut Chain<CS>, PalError> {
        self.chains
            .get_mut(usize::from(chain_id))
            .ok_or(PalError::UnknownChain(chain_id))
    }

    // ----- Timers -----

    /// Block for `us` microseconds.
    pub fn timer_delay(&mut self, us: u32, chain_id: ChainId) -> Result<(), PalError> {
        self.chain_mut(chain_id)?;
        self.delay.delay_us(us);
        Ok(())
    }

    /// Start (or restart) the non-blocking timer of `chain_id`.
    pub fn timer_start(&mut self, delay_us: u32, chain_id: ChainId) -> Result<(), PalError> {
        let now = self.clock.now_us();
        self.chain_mut(chain_id)?.timer.start(now, delay_us);
        Ok(())
    }

    /// True once the period passed to [`Pal::timer_start`] has elapsed.
    ///
    /// A timer that was never started reports expired.
    pub fn timeout_status(&mut self, chain_id: ChainId) -> Result<bool, PalError> {
        let now = self.clock.now_us();
        Ok(self.chain_mut(chain_id)?.timer.expired(now))
    }

    /// `nb` flavour of [`Pal::timeout_status`], for use with `nb::block!`.
    pub fn wait_timeout(&mut self, chain_id: ChainId) -> nb::Result<(), PalError> {
        if self.timeout_status(chain_id)? {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    pub fn timer_state(&self, chain_id: ChainId) -> Result<TimerState, PalError> {
        self.chains
            .get(usize::from(chain_id))
            .map(|chain| chain.timer.state())
            .ok_or(PalError::UnknownChain(chain_id))
    }

    // ----- Diagnostics -----

    pub fn report_development_error(
        &mut self,
        module_id: u16,
        instance_id: u8,
        api_id: u8,
        error_code: u8,
    ) {
        self.sink.development_error(DevelopmentError {
            module_id,
            instance_id,
            api_id,
            error_code,
        });
    }

    pub fn report_runtime_error(&mut self, error_id: u16, status: u8) {
        self.sink.runtime_error(RuntimeError { error_id, status });
    }

    pub fn sink(&self) -> &SINK {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut SINK {
        &mut self.sink
    }
}
