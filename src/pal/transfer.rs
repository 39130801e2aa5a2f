// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! SPI transaction engine.
//!
//! Three exchange shapes, each framed by chip select:
//! - [`write`]: send a byte sequence, discard whatever comes back.
//! - [`write_reads`]: one exchange per register group, CS toggled per group.
//! - [`write_read_all`]: a single exchange with a caller-sized payload.
//!
//! The read shapes use one scratch buffer as both transmit source and receive destination. Only
//! the command header is copied in; the header slots of the response are meaningless and are
//! never copied out. Payload bytes keep their offset: response byte `CMD_HEADER_LEN + k` lands in
//! receive byte `CMD_HEADER_LEN + k` (group rows) or `k` (read-all).
//!
//! These functions do not resolve chains; [`crate::Pal`] picks the CS line and latches faults.

use embedded_hal::{digital::OutputPin, spi::SpiBus};
use log::trace;

use crate::config::{CMD_HEADER_LEN, MAX_READ_ALL_DATA_LEN};
use crate::error::PalError;
use crate::hw::{ChipSelect, CsFrame};
use crate::pal::buffer::{GroupBuffer, GroupConfig, MAX_TRANSACTION_BYTES};
use crate::pal::mem::{memcpy, memset};

/// Scratch size for a read-all exchange.
const READ_ALL_SCRATCH_LEN: usize = CMD_HEADER_LEN + MAX_READ_ALL_DATA_LEN;

/// Transmit `data` in one CS frame.
pub fn write<BUS, CS>(bus: &mut BUS, cs: &mut ChipSelect<CS>, data: &[u8]) -> Result<(), PalError>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
{
    let mut frame = CsFrame::begin(bus, cs)?;
    frame.bus().write(data).map_err(PalError::bus)?;
    frame.end()?;

    trace!("TX {:02X?}", data);
    Ok(())
}

/// Exchange `cfg.group_count()` register groups in ascending row order.
///
/// For group `i`, the header of `tx[i]` is clocked out followed by zeros, and the response
/// payload is stored in `rx[i][CMD_HEADER_LEN..group_len]`. `rx[i][..CMD_HEADER_LEN]` and rows
/// past the group count are left untouched.
pub fn write_reads<BUS, CS>(
    bus: &mut BUS,
    cs: &mut ChipSelect<CS>,
    tx: &GroupBuffer,
    rx: &mut GroupBuffer,
    cfg: GroupConfig,
) -> Result<(), PalError>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
{
    cfg.validate()?;
    let group_len = usize::from(cfg.group_len());
    let group_count = usize::from(cfg.group_count());

    let mut scratch = [0u8; MAX_TRANSACTION_BYTES];
    for (tx_row, rx_row) in tx.iter().zip(rx.iter_mut()).take(group_count) {
        let frame_buf = &mut scratch[..group_len];
        memset(frame_buf, 0);
        memcpy(&mut frame_buf[..CMD_HEADER_LEN], &tx_row[..CMD_HEADER_LEN]);

        let mut frame = CsFrame::begin(bus, cs)?;
        frame
            .bus()
            .transfer_in_place(frame_buf)
            .map_err(PalError::bus)?;
        frame.end()?;

        memcpy(
            &mut rx_row[CMD_HEADER_LEN..group_len],
            &frame_buf[CMD_HEADER_LEN..],
        );

        trace!("TX {:02X?}", &tx_row[..CMD_HEADER_LEN]);
        trace!("RX {:02X?}", &rx_row[CMD_HEADER_LEN..group_len]);
    }

    Ok(())
}

/// Send the command header in `tx` and read `data_len` response bytes into `rx[..data_len]`.
///
/// The whole exchange is `CMD_HEADER_LEN + data_len` bytes in a single CS frame.
pub fn write_read_all<BUS, CS>(
    bus: &mut BUS,
    cs: &mut ChipSelect<CS>,
    tx: &[u8],
    rx: &mut [u8],
    data_len: usize,
) -> Result<(), PalError>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
{
    if data_len > MAX_READ_ALL_DATA_LEN {
        return Err(PalError::ReadAllTooLong { len: data_len });
    }
    if tx.len() < CMD_HEADER_LEN {
        return Err(PalError::BufferTooSmall {
            needed: CMD_HEADER_LEN,
            available: tx.len(),
        });
    }
    if rx.len() < data_len {
        return Err(PalError::BufferTooSmall {
            needed: data_len,
            available: rx.len(),
        });
    }

    let mut scratch = [0u8; READ_ALL_SCRATCH_LEN];
    let frame_buf = &mut scratch[..CMD_HEADER_LEN + data_len];
    memcpy(&mut frame_buf[..CMD_HEADER_LEN], &tx[..CMD_HEADER_LEN]);

    let mut frame = CsFrame::begin(bus, cs)?;
    frame
        .bus()
        .transfer_in_place(frame_buf)
        .map_err(PalError::bus)?;
    frame.end()?;

    memcpy(&mut rx[..data_len], &frame_buf[CMD_HEADER_LEN..]);

    trace!("TX {:02X?}", &tx[..CMD_HEADER_LEN]);
    trace!("RX {:02X?}", &rx[..data_len]);
    Ok(())
}
