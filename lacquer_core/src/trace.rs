// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the write path.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! write-path instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates the per-op [`WriteQueuedEvent`]
//!   plus the corresponding `TraceSink` method.

#[cfg(feature = "trace-rich")]
use crate::target::TargetId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a style source is parsed into a mapping.
#[derive(Clone, Copy, Debug)]
pub struct SheetParsedEvent {
    /// Number of class blocks found.
    pub classes: u32,
    /// Number of `@bind` aliases found.
    pub bindings: u32,
    /// Whether the mapping derives content-hashed names.
    pub hashed_scope: bool,
}

/// Emitted when a queued write moves the scheduler from idle to scheduled.
#[derive(Clone, Copy, Debug)]
pub struct FlushScheduledEvent {
    /// Queue depth at the moment the flush was requested.
    pub pending: u32,
}

/// Emitted after a flush applies its batch.
#[derive(Clone, Copy, Debug)]
pub struct FlushAppliedEvent {
    /// Monotonic flush counter (1 for the first flush).
    pub flush_index: u64,
    /// Property sets applied.
    pub sets: u32,
    /// Property removals applied.
    pub clears: u32,
    /// Read-back waiters woken by this flush.
    pub waiters: u32,
}

/// A single queued write op (requires `trace-rich` feature).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct WriteQueuedEvent {
    /// Target the op addresses.
    pub target: TargetId,
    /// Whether the op clears rather than sets.
    pub clear: bool,
    /// Whether the op replaced a pending op for the same property.
    pub coalesced: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the write path.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a style source is parsed.
    fn on_sheet_parsed(&mut self, e: &SheetParsedEvent) {
        _ = e;
    }

    /// Called when the scheduler requests a flush callback.
    fn on_flush_scheduled(&mut self, e: &FlushScheduledEvent) {
        _ = e;
    }

    /// Called after a flush applies its batch.
    fn on_flush_applied(&mut self, e: &FlushAppliedEvent) {
        _ = e;
    }

    /// Called for every queued write op (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_write_queued(&mut self, e: &WriteQueuedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SheetParsedEvent`].
    #[inline]
    pub fn sheet_parsed(&mut self, e: &SheetParsedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sheet_parsed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushScheduledEvent`].
    #[inline]
    pub fn flush_scheduled(&mut self, e: &FlushScheduledEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_scheduled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushAppliedEvent`].
    #[inline]
    pub fn flush_applied(&mut self, e: &FlushAppliedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_applied(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WriteQueuedEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn write_queued(&mut self, e: &WriteQueuedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_write_queued(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
