// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-range helpers used by the transaction engine and exposed to the driver.

/// Set every byte of `buf` to `value`.
#[inline]
pub fn memset(buf: &mut [u8], value: u8) {
    buf.fill(value);
}

/// Copy as many bytes as both ranges hold from `src` into the start of `dst`.
///
/// Returns the number of bytes copied.
#[inline]
pub fn memcpy(dst: &mut [u8], src: &[u8]) -> usize {
    let n = dst.len().min(src.len());
    dst[..n].copy_from_slice(&src[..n]);
    n
}
