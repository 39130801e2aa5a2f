// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Recording fakes for the bus, CS pins, delay and clock.
//!
//! Every fake writes into one shared event log, so tests can check the exact order of chip-select
//! edges and bus activity.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use adbms_pal::pal::diag::{DevelopmentError, DiagnosticSink, RuntimeError};
use adbms_pal::Pal;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    CsLow(usize),
    CsHigh(usize),
    /// Bytes clocked out by a plain write.
    Write(Vec<u8>),
    /// Bytes clocked out by an in-place exchange.
    Exchange(Vec<u8>),
    Flush,
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

pub fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<Event> {
    log.lock().unwrap().clone()
}

pub fn clear(log: &EventLog) {
    log.lock().unwrap().clear();
}

/// What the fake device answers during an in-place exchange.
#[derive(Copy, Clone, Debug)]
pub enum Reply {
    /// MISO mirrors MOSI.
    Echo,
    /// Byte `k` of the exchange reads back `base + k`.
    Sentinel(u8),
}

#[derive(Clone)]
pub struct FakeBus {
    log: EventLog,
    reply: Reply,
    fail: Arc<AtomicBool>,
}

impl FakeBus {
    pub fn new(log: EventLog, reply: Reply) -> Self {
        Self {
            log,
            reply,
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every following exchange fail with an overrun.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), spi::ErrorKind> {
        if self.fail.load(Ordering::SeqCst) {
            Err(spi::ErrorKind::Overrun)
        } else {
            Ok(())
        }
    }

    fn push(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl spi::ErrorType for FakeBus {
    type Error = spi::ErrorKind;
}

impl SpiBus<u8> for FakeBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.push(Event::Exchange(vec![0; words.len()]));
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.push(Event::Exchange(write.to_vec()));
        let n = read.len().min(write.len());
        read[..n].copy_from_slice(&write[..n]);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.push(Event::Exchange(words.to_vec()));
        if let Reply::Sentinel(base) = self.reply {
            for (k, b) in words.iter_mut().enumerate() {
                *b = base.wrapping_add(k as u8);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.push(Event::Flush);
        Ok(())
    }
}

/// CS pin that logs its edges under a chain index.
pub struct FakePin {
    id: usize,
    log: EventLog,
    broken: bool,
}

impl FakePin {
    pub fn new(id: usize, log: EventLog) -> Self {
        Self {
            id,
            log,
            broken: false,
        }
    }

    /// A pin whose `set_low` always fails.
    pub fn broken(id: usize, log: EventLog) -> Self {
        Self {
            id,
            log,
            broken: true,
        }
    }
}

impl digital::ErrorType for FakePin {
    type Error = digital::ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.broken {
            return Err(digital::ErrorKind::Other);
        }
        self.log.lock().unwrap().push(Event::CsLow(self.id));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.lock().unwrap().push(Event::CsHigh(self.id));
        Ok(())
    }
}

/// Shared microsecond counter that only moves when a test says so.
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Arc<AtomicU32>,
}

impl FakeClock {
    pub fn set(&self, us: u32) {
        self.now.store(us, Ordering::SeqCst);
    }

    pub fn advance(&self, us: u32) {
        let now = self.now.load(Ordering::SeqCst);
        self.now.store(now.wrapping_add(us), Ordering::SeqCst);
    }

    pub fn get(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}

impl adbms_pal::hw::Monotonic for FakeClock {
    fn now_us(&mut self) -> u32 {
        self.get()
    }
}

/// Delay that records each request and advances the fake clock instead of sleeping.
#[derive(Clone, Default)]
pub struct FakeDelay {
    clock: FakeClock,
    waits_us: Arc<Mutex<Vec<u32>>>,
}

impl FakeDelay {
    pub fn new(clock: FakeClock) -> Self {
        Self {
            clock,
            waits_us: Arc::default(),
        }
    }

    pub fn waits_us(&self) -> Vec<u32> {
        self.waits_us.lock().unwrap().clone()
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.lock().unwrap().push(us);
        self.clock.advance(us);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Development(DevelopmentError),
    Runtime(RuntimeError),
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn development_error(&mut self, report: DevelopmentError) {
        self.reports
            .lock()
            .unwrap()
            .push(Report::Development(report));
    }

    fn runtime_error(&mut self, report: RuntimeError) {
        self.reports.lock().unwrap().push(Report::Runtime(report));
    }
}

pub type TestPal<const N: usize> = Pal<FakeBus, FakePin, FakeDelay, FakeClock, RecordingSink, N>;

/// A PAL wired to fakes, plus handles to inspect them.
pub struct Rig<const N: usize> {
    pub pal: TestPal<N>,
    pub log: EventLog,
    pub bus: FakeBus,
    pub clock: FakeClock,
    pub delay: FakeDelay,
    pub sink: RecordingSink,
}

impl<const N: usize> Rig<N> {
    pub fn new(reply: Reply) -> Self {
        let log = new_log();
        let bus = FakeBus::new(log.clone(), reply);
        let clock = FakeClock::default();
        let delay = FakeDelay::new(clock.clone());
        let sink = RecordingSink::default();
        let pins = core::array::from_fn(|id| FakePin::new(id, log.clone()));

        let pal = Pal::new(bus.clone(), pins, delay.clone(), clock.clone(), sink.clone());
        clear(&log);

        Self {
            pal,
            log,
            bus,
            clock,
            delay,
            sink,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        events(&self.log)
    }
}

/// Count complete CS low→high cycles per chain, checking they never nest or interleave.
pub fn cs_cycles(events: &[Event]) -> Vec<usize> {
    let mut open: Option<usize> = None;
    let mut cycles = Vec::new();
    for event in events {
        match *event {
            Event::CsLow(id) => {
                assert_eq!(open, None, "CS{} asserted inside another frame", id);
                open = Some(id);
            }
            Event::CsHigh(id) => {
                if open == Some(id) {
                    cycles.push(id);
                    open = None;
                }
            }
            Event::Write(_) | Event::Exchange(_) | Event::Flush => {
                assert!(open.is_some(), "bus activity outside a CS frame");
            }
        }
    }
    assert_eq!(open, None, "CS left asserted");
    cycles
}

/// In-place exchanges in the order they hit the bus.
pub fn exchanges(events: &[Event]) -> Vec<Vec<u8>> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Exchange(bytes) => Some(bytes.clone()),
            _ => None,
        })
        .collect()
}
