// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-pumped flush driver.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use lacquer_core::backend::FlushDriver;
use lacquer_core::scheduler::Scheduler;

/// A [`FlushDriver`] that captures flush requests for explicit pumping.
///
/// Where a real driver registers an animation-frame callback, this one
/// stores the scheduler handle and waits for the test to call
/// [`run_frame`](Self::run_frame). One `run_frame` call is one frame:
/// whatever was queued before it is applied, whatever is queued after it
/// waits for the next pump.
///
/// Clones share state, so box one clone into the scheduler and pump the
/// other.
#[derive(Clone, Debug, Default)]
pub struct ManualDriver {
    inner: Rc<ManualInner>,
}

#[derive(Debug, Default)]
struct ManualInner {
    captured: RefCell<Option<Scheduler>>,
    requests: Cell<u32>,
}

impl ManualDriver {
    /// Creates a driver with no pending request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the flush the scheduler most recently requested.
    ///
    /// Returns `false` when no request is outstanding. Requests are
    /// one-shot: pumping consumes the captured handle, so a second
    /// `run_frame` without an intervening push does nothing. A flush that
    /// schedules new work (writes from woken waiters, for instance) leaves
    /// a fresh request behind for the next pump.
    pub fn run_frame(&self) -> bool {
        // Take the handle out before flushing; the flush may re-schedule.
        let taken = self.inner.captured.borrow_mut().take();
        match taken {
            Some(scheduler) => {
                scheduler.flush();
                true
            }
            None => false,
        }
    }

    /// Total schedule requests observed over this driver's lifetime.
    #[must_use]
    pub fn request_count(&self) -> u32 {
        self.inner.requests.get()
    }

    /// Whether a flush request is waiting to be pumped.
    #[must_use]
    pub fn has_pending_request(&self) -> bool {
        self.inner.captured.borrow().is_some()
    }
}

impl FlushDriver for ManualDriver {
    fn schedule(&self, scheduler: &Scheduler) {
        self.inner.requests.set(self.inner.requests.get() + 1);
        *self.inner.captured.borrow_mut() = Some(scheduler.clone());
    }
}
