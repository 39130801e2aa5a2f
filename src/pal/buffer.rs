// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Transaction buffer layout.
//!
//! Multi-group exchanges move one register group per row of a fixed 2-D buffer. Every row starts
//! with the command header followed by `BYTES_PER_DEVICE` bytes for each device in the chain:
//!
//! ```text
//! row i: [ CMD0 CMD1 PEC0 PEC1 | dev0 (6 data + 2 PEC) | dev1 ... ]
//!          <- CMD_HEADER_LEN -> <------ payload (group_len - 4) ---->
//! ```

use crate::config::{BYTES_PER_DEVICE, CMD_HEADER_LEN, MAX_DAISY_CHAIN_DEPTH};
use crate::error::PalError;

/// Bytes needed for one register-group exchange on a chain of `depth` devices.
#[inline]
pub const fn max_transaction_bytes(depth: usize) -> usize {
    CMD_HEADER_LEN + BYTES_PER_DEVICE * depth
}

/// Row size of a [`GroupBuffer`].
pub const MAX_TRANSACTION_BYTES: usize = max_transaction_bytes(MAX_DAISY_CHAIN_DEPTH);

/// Transmit/receive buffer for multi-group exchanges: one row per register group.
pub type GroupBuffer = [[u8; MAX_TRANSACTION_BYTES]; MAX_DAISY_CHAIN_DEPTH];

/// A zeroed [`GroupBuffer`].
#[inline]
pub const fn new_group_buffer() -> GroupBuffer {
    [[0; MAX_TRANSACTION_BYTES]; MAX_DAISY_CHAIN_DEPTH]
}

/// Packed multi-group descriptor.
///
/// - bits 31..16: number of register groups
/// - bits 15..0: bytes per group, command header included
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GroupConfig {
    raw: u32,
}

impl GroupConfig {
    #[inline]
    pub const fn new(group_count: u16, group_len: u16) -> Self {
        Self {
            raw: ((group_count as u32) << 16) | group_len as u32,
        }
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    #[inline]
    pub const fn group_count(&self) -> u16 {
        (self.raw >> 16) as u16
    }

    /// Bytes per group on the wire, header included.
    #[inline]
    pub const fn group_len(&self) -> u16 {
        self.raw as u16
    }

    /// Bytes per group after the command header.
    pub fn payload_len(&self) -> Result<usize, PalError> {
        let len = self.group_len();
        usize::from(len)
            .checked_sub(CMD_HEADER_LEN)
            .ok_or(PalError::GroupTooShort { len })
    }

    /// Check the descriptor against the fixed buffer shape.
    pub fn validate(&self) -> Result<(), PalError> {
        self.payload_len()?;

        let len = self.group_len();
        if usize::from(len) > MAX_TRANSACTION_BYTES {
            return Err(PalError::GroupTooLong { len });
        }

        let count = self.group_count();
        if usize::from(count) > MAX_DAISY_CHAIN_DEPTH {
            return Err(PalError::TooManyGroups { count });
        }

        Ok(())
    }
}

impl From<u32> for GroupConfig {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<GroupConfig> for u32 {
    fn from(cfg: GroupConfig) -> Self {
        cfg.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_bytes_grow_with_depth() {
        assert_eq!(max_transaction_bytes(0), 4);
        assert_eq!(max_transaction_bytes(1), 12);
        assert_eq!(max_transaction_bytes(8), 68);
        for depth in 0..64 {
            assert_eq!(max_transaction_bytes(depth), 4 + 8 * depth);
            assert!(max_transaction_bytes(depth + 1) > max_transaction_bytes(depth));
        }
        assert_eq!(MAX_TRANSACTION_BYTES, 68);
    }

    #[test]
    fn descriptor_packs_count_high_and_length_low() {
        let cfg = GroupConfig::new(3, 12);
        assert_eq!(cfg.raw(), 0x0003_000C);
        assert_eq!(cfg.group_count(), 3);
        assert_eq!(cfg.group_len(), 12);
        assert_eq!(cfg.payload_len(), Ok(8));

        let cfg = GroupConfig::from(0x0001_000Au32);
        assert_eq!(cfg.group_count(), 1);
        assert_eq!(cfg.group_len(), 10);
        assert_eq!(u32::from(cfg), 0x0001_000A);
    }

    #[test]
    fn short_group_is_a_configuration_error() {
        let cfg = GroupConfig::new(1, 3);
        assert_eq!(cfg.payload_len(), Err(PalError::GroupTooShort { len: 3 }));
        assert_eq!(cfg.validate(), Err(PalError::GroupTooShort { len: 3 }));

        // Header-only groups are legal and carry no payload.
        assert_eq!(GroupConfig::new(1, 4).payload_len(), Ok(0));
    }

    #[test]
    fn validate_checks_buffer_shape() {
        assert_eq!(GroupConfig::new(8, 68).validate(), Ok(()));
        assert_eq!(
            GroupConfig::new(1, 69).validate(),
            Err(PalError::GroupTooLong { len: 69 })
        );
        assert_eq!(
            GroupConfig::new(9, 12).validate(),
            Err(PalError::TooManyGroups { count: 9 })
        );
    }

    #[test]
    fn group_buffer_starts_zeroed() {
        let buf = new_group_buffer();
        assert!(buf.iter().flatten().all(|&b| b == 0));
        assert_eq!(buf.len(), MAX_DAISY_CHAIN_DEPTH);
    }
}
