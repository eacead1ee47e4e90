// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-recording trace sink.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use lacquer_core::trace::{
    FlushAppliedEvent, FlushScheduledEvent, SheetParsedEvent, TraceSink, WriteQueuedEvent,
};

/// A [`TraceSink`] that stores every event for later assertions.
///
/// Clones share storage: hand one clone to
/// [`Scheduler::set_trace_sink`](lacquer_core::scheduler::Scheduler::set_trace_sink)
/// and keep the other to inspect.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    inner: Rc<RecordInner>,
}

#[derive(Debug, Default)]
struct RecordInner {
    sheets: RefCell<Vec<SheetParsedEvent>>,
    scheduled: RefCell<Vec<FlushScheduledEvent>>,
    applied: RefCell<Vec<FlushAppliedEvent>>,
    queued: RefCell<Vec<WriteQueuedEvent>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All sheet-parsed events seen, in order.
    #[must_use]
    pub fn sheets(&self) -> Vec<SheetParsedEvent> {
        self.inner.sheets.borrow().clone()
    }

    /// All flush-scheduled events seen, in order.
    #[must_use]
    pub fn flushes_scheduled(&self) -> Vec<FlushScheduledEvent> {
        self.inner.scheduled.borrow().clone()
    }

    /// All flush-applied events seen, in order.
    #[must_use]
    pub fn flushes_applied(&self) -> Vec<FlushAppliedEvent> {
        self.inner.applied.borrow().clone()
    }

    /// All per-op queue events seen, in order.
    #[must_use]
    pub fn writes_queued(&self) -> Vec<WriteQueuedEvent> {
        self.inner.queued.borrow().clone()
    }
}

impl TraceSink for RecordingSink {
    fn on_sheet_parsed(&mut self, e: &SheetParsedEvent) {
        self.inner.sheets.borrow_mut().push(*e);
    }

    fn on_flush_scheduled(&mut self, e: &FlushScheduledEvent) {
        self.inner.scheduled.borrow_mut().push(*e);
    }

    fn on_flush_applied(&mut self, e: &FlushAppliedEvent) {
        self.inner.applied.borrow_mut().push(*e);
    }

    fn on_write_queued(&mut self, e: &WriteQueuedEvent) {
        self.inner.queued.borrow_mut().push(*e);
    }
}
