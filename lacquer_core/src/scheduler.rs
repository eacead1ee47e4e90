// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalesced custom-property write scheduling.
//!
//! The [`Scheduler`] queues property writes and applies them in one batch
//! per animation frame. Callers push sets and clears at any rate; the queue
//! keeps at most one pending op per `(target, property)` pair, so only the
//! last value written between frames reaches the page. Awaiting
//! [`Scheduler::next_flush`] gives read-after-write consistency: once it
//! resolves, every write issued before it was created is live.
//!
//! # State machine
//!
//! ```text
//!             push_set / push_clear
//!    Idle ────────────────────────────► Scheduled
//!     ▲                                     │  driver fires on the
//!     │                                     │  next animation frame
//!     └──────────────── flush() ◄───────────┘
//!            (apply batch, wake waiters)
//! ```
//!
//! Pushes while `Scheduled` mutate the queue without requesting another
//! callback. A scheduled flush cannot be cancelled; cancelling a *write*
//! means pushing a later op for the same property before the frame fires.
//!
//! Schedulers are explicit instances, never process globals: construct one
//! per page (or per test) and clone the handle wherever writes originate.
//! Clones are cheap and all address the same queue.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use crate::backend::{FlushDriver, StyleSurface};
use crate::target::TargetId;
use crate::trace::Tracer;
#[cfg(feature = "trace")]
use crate::trace::{FlushAppliedEvent, FlushScheduledEvent, TraceSink};
#[cfg(feature = "trace-rich")]
use crate::trace::WriteQueuedEvent;

/// A single queued style mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOp {
    /// Element whose inline style the op addresses.
    pub target: TargetId,
    /// Custom-property name, `--` prefix included.
    pub name: String,
    /// Set or clear.
    pub action: WriteAction,
}

/// What a [`WriteOp`] does to its property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteAction {
    /// Write this value.
    Set(String),
    /// Remove the property from the inline style.
    Clear,
}

/// Shared handle to a write queue and its flush state.
///
/// See the [module docs](self) for the state machine. All facades built
/// over one scheduler share its queue, its coalescing, and its flush
/// ordering.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

struct SchedulerInner {
    surface: RefCell<Box<dyn StyleSurface>>,
    driver: Box<dyn FlushDriver>,
    queue: RefCell<Vec<WriteOp>>,
    scheduled: Cell<bool>,
    flushes: Cell<u64>,
    waiters: RefCell<Vec<Waker>>,
    #[cfg(feature = "trace")]
    sink: RefCell<Option<Box<dyn TraceSink>>>,
}

impl Scheduler {
    /// Creates an idle scheduler over `surface`, flushing via `driver`.
    #[must_use]
    pub fn new(surface: Box<dyn StyleSurface>, driver: Box<dyn FlushDriver>) -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                surface: RefCell::new(surface),
                driver,
                queue: RefCell::new(Vec::new()),
                scheduled: Cell::new(false),
                flushes: Cell::new(0),
                waiters: RefCell::new(Vec::new()),
                #[cfg(feature = "trace")]
                sink: RefCell::new(None),
            }),
        }
    }

    /// Queues `name: value` on `target`, replacing any pending op for the
    /// same property.
    pub fn push_set(&self, target: TargetId, name: &str, value: &str) {
        self.push(target, name, WriteAction::Set(value.to_string()));
    }

    /// Queues removal of `name` on `target`, replacing any pending op for
    /// the same property.
    ///
    /// A clear that overwrites a pending set cancels it entirely; the value
    /// never reaches the surface.
    pub fn push_clear(&self, target: TargetId, name: &str) {
        self.push(target, name, WriteAction::Clear);
    }

    fn push(&self, target: TargetId, name: &str, action: WriteAction) {
        let clear = matches!(action, WriteAction::Clear);
        let coalesced = {
            let mut queue = self.inner.queue.borrow_mut();
            if let Some(op) = queue
                .iter_mut()
                .find(|op| op.target == target && op.name == name)
            {
                // In place: the op keeps its original queue position.
                op.action = action;
                true
            } else {
                queue.push(WriteOp {
                    target,
                    name: name.to_string(),
                    action,
                });
                false
            }
        };
        self.trace_write(target, clear, coalesced);
        if !self.inner.scheduled.get() {
            self.inner.scheduled.set(true);
            self.trace_scheduled();
            self.inner.driver.schedule(self);
        }
    }

    /// Applies the pending batch and wakes read-back waiters.
    ///
    /// Invoked by the [`FlushDriver`] on the animation frame it scheduled.
    /// The queue is taken and the scheduler returns to idle *before* the
    /// batch is applied, so writes issued while the batch applies (or by
    /// woken waiters) schedule a fresh flush rather than extending this
    /// one.
    pub fn flush(&self) {
        self.inner.scheduled.set(false);
        let ops = self.inner.queue.take();
        self.inner.surface.borrow_mut().apply(&ops);
        let flush_index = self.inner.flushes.get() + 1;
        self.inner.flushes.set(flush_index);
        let waiters = self.inner.waiters.take();
        self.trace_flush(flush_index, &ops, waiters.len());
        for waker in waiters {
            waker.wake();
        }
    }

    /// Returns a future that resolves once pending writes are live.
    ///
    /// If a flush is scheduled, the future resolves after that flush has
    /// applied its batch. If the scheduler is idle at the call, it resolves
    /// on first poll: an empty queue never costs a frame. The snapshot is
    /// taken here, so writes pushed after the call do not delay it.
    #[must_use]
    pub fn next_flush(&self) -> NextFlush {
        let resolved_at = if self.inner.scheduled.get() {
            self.inner.flushes.get() + 1
        } else {
            self.inner.flushes.get()
        };
        NextFlush {
            scheduler: self.clone(),
            resolved_at,
        }
    }

    /// Reads a property's current value through the backing surface.
    #[must_use]
    pub fn read(&self, target: TargetId, name: &str) -> String {
        self.inner.surface.borrow().read(target, name)
    }

    /// Whether a flush is currently scheduled.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.inner.scheduled.get()
    }

    /// Number of distinct pending writes.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Flushes applied over this scheduler's lifetime.
    #[must_use]
    pub fn flush_count(&self) -> u64 {
        self.inner.flushes.get()
    }

    /// Installs the sink that receives write-path trace events.
    ///
    /// Replaces any previously installed sink.
    #[cfg(feature = "trace")]
    pub fn set_trace_sink(&self, sink: Box<dyn TraceSink>) {
        *self.inner.sink.borrow_mut() = Some(sink);
    }

    /// Runs `f` with a [`Tracer`] over the installed sink.
    ///
    /// Without the `trace` feature the closure is never called.
    #[cfg(feature = "trace")]
    pub(crate) fn with_tracer(&self, f: impl FnOnce(&mut Tracer<'_>)) {
        let mut guard = self.inner.sink.borrow_mut();
        let mut tracer = match guard.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        f(&mut tracer);
    }

    #[cfg(not(feature = "trace"))]
    pub(crate) fn with_tracer(&self, _f: impl FnOnce(&mut Tracer<'_>)) {}

    #[cfg(feature = "trace-rich")]
    fn trace_write(&self, target: TargetId, clear: bool, coalesced: bool) {
        self.with_tracer(|tracer| {
            tracer.write_queued(&WriteQueuedEvent {
                target,
                clear,
                coalesced,
            });
        });
    }

    #[cfg(not(feature = "trace-rich"))]
    fn trace_write(&self, _target: TargetId, _clear: bool, _coalesced: bool) {}

    #[cfg(feature = "trace")]
    fn trace_scheduled(&self) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "queue depth stays far below u32::MAX"
        )]
        let pending = self.inner.queue.borrow().len() as u32;
        self.with_tracer(|tracer| {
            tracer.flush_scheduled(&FlushScheduledEvent { pending });
        });
    }

    #[cfg(not(feature = "trace"))]
    fn trace_scheduled(&self) {}

    #[cfg(feature = "trace")]
    fn trace_flush(&self, flush_index: u64, ops: &[WriteOp], waiters: usize) {
        let sets = ops
            .iter()
            .filter(|op| matches!(op.action, WriteAction::Set(_)))
            .count();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "op and waiter counts stay far below u32::MAX"
        )]
        self.with_tracer(|tracer| {
            tracer.flush_applied(&FlushAppliedEvent {
                flush_index,
                sets: sets as u32,
                clears: (ops.len() - sets) as u32,
                waiters: waiters as u32,
            });
        });
    }

    #[cfg(not(feature = "trace"))]
    fn trace_flush(&self, _flush_index: u64, _ops: &[WriteOp], _waiters: usize) {}
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.inner.queue.borrow().len())
            .field("scheduled", &self.inner.scheduled.get())
            .field("flushes", &self.inner.flushes.get())
            .finish_non_exhaustive()
    }
}

/// Future returned by [`Scheduler::next_flush`].
#[derive(Debug)]
pub struct NextFlush {
    scheduler: Scheduler,
    /// Flush-counter value at which this future resolves.
    resolved_at: u64,
}

impl Future for NextFlush {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.scheduler.inner.flushes.get() >= self.resolved_at {
            Poll::Ready(())
        } else {
            self.scheduler
                .inner
                .waiters
                .borrow_mut()
                .push(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{poll_once, scheduler_fixture};
    use core::pin::pin;

    #[test]
    fn writes_coalesce_in_place() {
        let (scheduler, surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        scheduler.push_set(TargetId::ROOT, "--b", "2");
        scheduler.push_set(TargetId::ROOT, "--a", "3");
        assert_eq!(scheduler.pending_len(), 2);

        assert!(driver.run_frame());
        let history = surface.history();
        assert_eq!(history.len(), 2);
        // The coalesced op keeps its first-queued position.
        assert_eq!(history[0].name, "--a");
        assert_eq!(history[0].action, WriteAction::Set("3".to_string()));
        assert_eq!(history[1].name, "--b");
    }

    #[test]
    fn clear_cancels_pending_set() {
        let (scheduler, surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        scheduler.push_clear(TargetId::ROOT, "--a");
        assert_eq!(scheduler.pending_len(), 1);

        driver.run_frame();
        let history = surface.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, WriteAction::Clear);
        assert_eq!(surface.value(TargetId::ROOT, "--a"), None);
    }

    #[test]
    fn set_after_clear_wins() {
        let (scheduler, surface, driver) = scheduler_fixture();
        scheduler.push_clear(TargetId::ROOT, "--a");
        scheduler.push_set(TargetId::ROOT, "--a", "back");
        driver.run_frame();
        assert_eq!(
            surface.value(TargetId::ROOT, "--a").as_deref(),
            Some("back")
        );
    }

    #[test]
    fn same_name_different_targets_stay_separate() {
        let (scheduler, surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "root");
        scheduler.push_set(TargetId(3), "--a", "leaf");
        assert_eq!(scheduler.pending_len(), 2);
        driver.run_frame();
        assert_eq!(
            surface.value(TargetId::ROOT, "--a").as_deref(),
            Some("root")
        );
        assert_eq!(surface.value(TargetId(3), "--a").as_deref(), Some("leaf"));
    }

    #[test]
    fn one_callback_per_burst() {
        let (scheduler, _surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        scheduler.push_set(TargetId::ROOT, "--b", "2");
        scheduler.push_clear(TargetId::ROOT, "--a");
        assert_eq!(driver.requests(), 1);

        driver.run_frame();
        assert!(!scheduler.is_scheduled());

        // The next burst re-arms the driver.
        scheduler.push_set(TargetId::ROOT, "--c", "3");
        assert_eq!(driver.requests(), 2);
        assert!(scheduler.is_scheduled());
    }

    #[test]
    fn flush_resets_state() {
        let (scheduler, _surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        assert!(scheduler.is_scheduled());
        assert_eq!(scheduler.flush_count(), 0);

        driver.run_frame();
        assert!(!scheduler.is_scheduled());
        assert_eq!(scheduler.pending_len(), 0);
        assert_eq!(scheduler.flush_count(), 1);

        // A second pump has nothing to do.
        assert!(!driver.run_frame());
    }

    #[test]
    fn flush_with_empty_queue_is_harmless() {
        let (scheduler, surface, _driver) = scheduler_fixture();
        scheduler.flush();
        assert_eq!(scheduler.flush_count(), 1);
        assert!(surface.history().is_empty());
    }

    #[test]
    fn next_flush_idle_resolves_immediately() {
        let (scheduler, _surface, driver) = scheduler_fixture();
        let mut fut = pin!(scheduler.next_flush());
        assert_eq!(poll_once(fut.as_mut()), Some(()));
        // No callback was ever requested.
        assert_eq!(driver.requests(), 0);
        assert_eq!(scheduler.flush_count(), 0);
    }

    #[test]
    fn next_flush_snapshot_is_taken_at_creation() {
        let (scheduler, _surface, _driver) = scheduler_fixture();
        let mut fut = pin!(scheduler.next_flush());
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        // Created while idle, so the later push does not delay it.
        assert_eq!(poll_once(fut.as_mut()), Some(()));
    }

    #[test]
    fn next_flush_waits_for_scheduled_flush() {
        let (scheduler, _surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        let mut fut = pin!(scheduler.next_flush());
        assert_eq!(poll_once(fut.as_mut()), None);
        assert_eq!(poll_once(fut.as_mut()), None);

        assert!(driver.run_frame());
        assert_eq!(poll_once(fut.as_mut()), Some(()));
    }

    #[test]
    fn waiters_clear_after_wake() {
        let (scheduler, _surface, driver) = scheduler_fixture();
        scheduler.push_set(TargetId::ROOT, "--a", "1");
        let mut first = pin!(scheduler.next_flush());
        let mut second = pin!(scheduler.next_flush());
        assert_eq!(poll_once(first.as_mut()), None);
        assert_eq!(poll_once(second.as_mut()), None);

        driver.run_frame();
        assert_eq!(poll_once(first.as_mut()), Some(()));
        assert_eq!(poll_once(second.as_mut()), Some(()));

        // A fresh cycle parks and resolves independently.
        scheduler.push_set(TargetId::ROOT, "--b", "2");
        let mut third = pin!(scheduler.next_flush());
        assert_eq!(poll_once(third.as_mut()), None);
        driver.run_frame();
        assert_eq!(poll_once(third.as_mut()), Some(()));
    }

    #[test]
    fn read_prefers_inline_over_computed() {
        let (scheduler, surface, driver) = scheduler_fixture();
        surface.seed_computed(TargetId::ROOT, "--a", "cascade");
        assert_eq!(scheduler.read(TargetId::ROOT, "--a"), "cascade");

        scheduler.push_set(TargetId::ROOT, "--a", "inline");
        driver.run_frame();
        assert_eq!(scheduler.read(TargetId::ROOT, "--a"), "inline");
        assert_eq!(scheduler.read(TargetId::ROOT, "--missing"), "");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn flush_events_reach_sink() {
        use crate::trace::{FlushAppliedEvent, FlushScheduledEvent, TraceSink};
        use alloc::vec::Vec;

        #[derive(Clone, Default)]
        struct EventSink {
            scheduled: Rc<RefCell<Vec<FlushScheduledEvent>>>,
            applied: Rc<RefCell<Vec<FlushAppliedEvent>>>,
        }
        impl TraceSink for EventSink {
            fn on_flush_scheduled(&mut self, e: &FlushScheduledEvent) {
                self.scheduled.borrow_mut().push(*e);
            }
            fn on_flush_applied(&mut self, e: &FlushAppliedEvent) {
                self.applied.borrow_mut().push(*e);
            }
        }

        let (scheduler, _surface, driver) = scheduler_fixture();
        let sink = EventSink::default();
        scheduler.set_trace_sink(Box::new(sink.clone()));

        scheduler.push_set(TargetId::ROOT, "--a", "1");
        scheduler.push_set(TargetId::ROOT, "--b", "2");
        scheduler.push_clear(TargetId::ROOT, "--b");
        assert_eq!(sink.scheduled.borrow().len(), 1);
        assert_eq!(sink.scheduled.borrow()[0].pending, 1);

        driver.run_frame();
        let applied = sink.applied.borrow();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].flush_index, 1);
        assert_eq!(applied[0].sets, 1);
        assert_eq!(applied[0].clears, 1);
        assert_eq!(applied[0].waiters, 0);
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn queued_ops_carry_coalesced_flag() {
        use crate::trace::{TraceSink, WriteQueuedEvent};
        use alloc::vec::Vec;

        #[derive(Clone, Default)]
        struct OpSink {
            events: Rc<RefCell<Vec<WriteQueuedEvent>>>,
        }
        impl TraceSink for OpSink {
            fn on_write_queued(&mut self, e: &WriteQueuedEvent) {
                self.events.borrow_mut().push(*e);
            }
        }

        let (scheduler, _surface, _driver) = scheduler_fixture();
        let sink = OpSink::default();
        scheduler.set_trace_sink(Box::new(sink.clone()));

        scheduler.push_set(TargetId::ROOT, "--a", "1");
        scheduler.push_set(TargetId::ROOT, "--a", "2");
        scheduler.push_clear(TargetId::ROOT, "--a");

        let events = sink.events.borrow();
        assert_eq!(events.len(), 3);
        assert!(!events[0].coalesced);
        assert!(events[1].coalesced);
        assert!(events[2].coalesced);
        assert!(!events[0].clear);
        assert!(events[2].clear);
    }
}
