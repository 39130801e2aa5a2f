// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Global, critical-section guarded access to a [`crate::Pal`].
//!
//! Firmware that touches the daisy chain from both the main loop and an interrupt handler keeps
//! the PAL in a `static SharedPal`. Each `with` call runs inside one critical section, so every
//! exchange issued through it completes before another context can start one.
//!
//! ```ignore
//! static PAL: SharedPal<BoardPal> = SharedPal::new();
//!
//! PAL.install(pal);
//! PAL.with(|pal| pal.spi_write(&cmd, 0));
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

pub struct SharedPal<P> {
    inner: Mutex<RefCell<Option<P>>>,
}

impl<P> SharedPal<P> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store `pal`, returning the previously installed instance.
    pub fn install(&self, pal: P) -> Option<P> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(pal))
    }

    /// Remove and return the installed instance.
    pub fn take(&self) -> Option<P> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` with exclusive access to the PAL.
    ///
    /// Returns `None` if nothing is installed. Must not be nested: calling `with` from inside `f`
    /// panics on the inner borrow.
    pub fn with<R>(&self, f: impl FnOnce(&mut P) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<P> Default for SharedPal<P> {
    fn default() -> Self {
        Self::new()
    }
}
