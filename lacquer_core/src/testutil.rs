// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared test doubles: an in-memory recording surface and a hand-pumped
//! flush driver.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use hashbrown::HashMap;

use crate::backend::{FlushDriver, StyleSurface};
use crate::scheduler::{Scheduler, WriteAction, WriteOp};
use crate::target::TargetId;

/// Surface double that applies ops to in-memory storage and records them.
///
/// Clones share storage, so tests keep one clone and box the other into the
/// scheduler.
#[derive(Clone, Default)]
pub(crate) struct RecordSurface {
    inner: Rc<RecordInner>,
}

#[derive(Default)]
struct RecordInner {
    inline: RefCell<HashMap<(TargetId, String), String>>,
    computed: RefCell<HashMap<(TargetId, String), String>>,
    history: RefCell<Vec<WriteOp>>,
}

impl RecordSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Currently applied inline value, if any.
    pub(crate) fn value(&self, target: TargetId, name: &str) -> Option<String> {
        self.inner
            .inline
            .borrow()
            .get(&(target, name.to_string()))
            .cloned()
    }

    /// Seeds the computed-style layer consulted when no inline value is set.
    pub(crate) fn seed_computed(&self, target: TargetId, name: &str, value: &str) {
        self.inner
            .computed
            .borrow_mut()
            .insert((target, name.to_string()), value.to_string());
    }

    /// Every op ever applied, in application order.
    pub(crate) fn history(&self) -> Vec<WriteOp> {
        self.inner.history.borrow().clone()
    }
}

impl StyleSurface for RecordSurface {
    fn apply(&mut self, ops: &[WriteOp]) {
        for op in ops {
            self.inner.history.borrow_mut().push(op.clone());
            let key = (op.target, op.name.clone());
            match &op.action {
                WriteAction::Set(value) => {
                    self.inner.inline.borrow_mut().insert(key, value.clone());
                }
                WriteAction::Clear => {
                    self.inner.inline.borrow_mut().remove(&key);
                }
            }
        }
    }

    fn read(&self, target: TargetId, name: &str) -> String {
        let key = (target, name.to_string());
        if let Some(value) = self.inner.inline.borrow().get(&key) {
            return value.clone();
        }
        self.inner
            .computed
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }
}

/// Driver double that captures flush requests for explicit pumping.
#[derive(Clone, Default)]
pub(crate) struct PumpDriver {
    inner: Rc<PumpInner>,
}

#[derive(Default)]
struct PumpInner {
    captured: RefCell<Option<Scheduler>>,
    requests: Cell<u32>,
}

impl PumpDriver {
    /// Runs the most recently requested flush. Returns `false` when no
    /// request is outstanding.
    pub(crate) fn run_frame(&self) -> bool {
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

    /// Total schedule requests observed.
    pub(crate) fn requests(&self) -> u32 {
        self.inner.requests.get()
    }
}

impl FlushDriver for PumpDriver {
    fn schedule(&self, scheduler: &Scheduler) {
        self.inner.requests.set(self.inner.requests.get() + 1);
        *self.inner.captured.borrow_mut() = Some(scheduler.clone());
    }
}

/// One-scheduler fixture: the scheduler plus handles to its doubles.
pub(crate) fn scheduler_fixture() -> (Scheduler, RecordSurface, PumpDriver) {
    let surface = RecordSurface::new();
    let driver = PumpDriver::default();
    let scheduler = Scheduler::new(Box::new(surface.clone()), Box::new(driver.clone()));
    (scheduler, surface, driver)
}

/// Polls `future` once with a no-op waker.
pub(crate) fn poll_once<F: Future + ?Sized>(future: Pin<&mut F>) -> Option<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    match future.poll(&mut cx) {
        Poll::Ready(value) => Some(value),
        Poll::Pending => None,
    }
}
