// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error and diagnostics sink.
//!
//! The driver reports two kinds of events through the PAL:
//! - development errors (API misuse, visible in debug builds), and
//! - runtime errors (operational faults such as a PEC mismatch).
//!
//! Neither is stored here. A [`DiagnosticSink`] decides what to do with them; [`LogSink`] forwards
//! them to the `log` facade.

use log::{error, warn};

/// Misuse of a driver API.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DevelopmentError {
    pub module_id: u16,
    pub instance_id: u8,
    pub api_id: u8,
    pub error_code: u8,
}

/// Operational fault raised by the driver.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RuntimeError {
    pub error_id: u16,
    pub status: u8,
}

/// Receiver for driver error reports. Reports are fire-and-forget.
pub trait DiagnosticSink {
    fn development_error(&mut self, report: DevelopmentError);
    fn runtime_error(&mut self, report: RuntimeError);
}

/// Runtime error classes the ADBMS6948 driver raises.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RuntimeErrorKind {
    InvalidPec,
    CommandCount,
    Platform,
}

/// Enable switch and report ID for one runtime error class.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RuntimeErrorEntry {
    pub enabled: bool,
    pub error_id: u16,
}

/// Runtime error IDs and which of them get reported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RuntimeErrorConfig {
    pub invalid_pec: RuntimeErrorEntry,
    pub command_count: RuntimeErrorEntry,
    pub platform: RuntimeErrorEntry,
}

impl RuntimeErrorConfig {
    /// Reference configuration: every class enabled, IDs 0x14..=0x16.
    pub const DEFAULT: Self = Self {
        invalid_pec: RuntimeErrorEntry {
            enabled: true,
            error_id: 0x14,
        },
        command_count: RuntimeErrorEntry {
            enabled: true,
            error_id: 0x15,
        },
        platform: RuntimeErrorEntry {
            enabled: true,
            error_id: 0x16,
        },
    };

    pub fn entry(&self, kind: RuntimeErrorKind) -> RuntimeErrorEntry {
        match kind {
            RuntimeErrorKind::InvalidPec => self.invalid_pec,
            RuntimeErrorKind::CommandCount => self.command_count,
            RuntimeErrorKind::Platform => self.platform,
        }
    }

    /// Map a report ID back to its class.
    pub fn classify(&self, error_id: u16) -> Option<RuntimeErrorKind> {
        [
            RuntimeErrorKind::InvalidPec,
            RuntimeErrorKind::CommandCount,
            RuntimeErrorKind::Platform,
        ]
        .into_iter()
        .find(|&kind| self.entry(kind).error_id == error_id)
    }

    /// IDs outside the table are always reported.
    pub fn is_enabled(&self, error_id: u16) -> bool {
        self.classify(error_id)
            .map_or(true, |kind| self.entry(kind).enabled)
    }
}

impl Default for RuntimeErrorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sink that forwards reports to the `log` facade.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSink {
    config: RuntimeErrorConfig,
}

impl LogSink {
    pub const fn new(config: RuntimeErrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeErrorConfig {
        &self.config
    }
}

impl DiagnosticSink for LogSink {
    fn development_error(&mut self, report: DevelopmentError) {
        log_development_error(report);
    }

    fn runtime_error(&mut self, report: RuntimeError) {
        if self.config.is_enabled(report.error_id) {
            log_runtime_error(report, self.config.classify(report.error_id));
        }
    }
}

fn log_development_error(report: DevelopmentError) {
    warn!(
        "ModId: {}, InstId: {}, ApiId: {}, ErrCode: {}",
        report.module_id, report.instance_id, report.api_id, report.error_code
    );
}

fn log_runtime_error(report: RuntimeError, kind: Option<RuntimeErrorKind>) {
    match kind {
        Some(kind) => error!(
            "Runtime error {:?} - ErrID: 0x{:04X}, Status: 0x{:02X}",
            kind, report.error_id, report.status
        ),
        None => error!(
            "Runtime error - ErrID: 0x{:04X}, Status: 0x{:02X}",
            report.error_id, report.status
        ),
    }
}

/// Report a development error without a PAL instance, e.g. before bring-up.
pub fn report_development_error(module_id: u16, instance_id: u8, api_id: u8, error_code: u8) {
    log_development_error(DevelopmentError {
        module_id,
        instance_id,
        api_id,
        error_code,
    });
}

/// Report a runtime error without a PAL instance.
pub fn report_runtime_error(error_id: u16, status: u8) {
    let report = RuntimeError { error_id, status };
    log_runtime_error(report, RuntimeErrorConfig::DEFAULT.classify(error_id));
}
