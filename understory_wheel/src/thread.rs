// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UI thread confinement.

use std::thread::{self, ThreadId};

/// Identity of the thread that owns a wheel.
///
/// Captured when the wheel is created; accessors that must not race with
/// layout or drawing check against it and panic on mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiThread {
    id: ThreadId,
}

impl UiThread {
    /// Captures the calling thread as the UI thread.
    #[must_use]
    pub fn current() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    /// Returns `true` when called on the UI thread.
    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }

    /// Panics unless called on the UI thread.
    #[track_caller]
    pub fn assert_current(&self) {
        assert!(self.is_current(), "must be called on the UI thread");
    }
}

#[cfg(test)]
mod tests {
    use super::UiThread;

    #[test]
    fn owning_thread_passes() {
        let ui = UiThread::current();
        assert!(ui.is_current());
        ui.assert_current();
    }

    #[test]
    fn other_threads_fail() {
        let ui = UiThread::current();
        let joined = std::thread::spawn(move || {
            assert!(!ui.is_current());
            ui.assert_current();
        })
        .join();
        assert!(joined.is_err(), "off-thread assertion should panic");
    }
}
