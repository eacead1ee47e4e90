// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped style-name resolution and coalesced custom-property writes.
//!
//! `lacquer_core` is the platform-free heart of lacquer: it parses authored
//! style sources into class-name mappings, derives deterministic scoped
//! names, and batches custom-property mutations into one write per
//! animation frame. It is `no_std` compatible (with `alloc`); platform
//! integration lives in backend crates behind two small traits.
//!
//! # Architecture
//!
//! The crate is organized around a write path that turns facade calls into
//! one style mutation batch per frame:
//!
//! ```text
//!   style source ──► sheet scanning ──► StyleMap (key → display name)
//!                                            │
//!                      ┌─────────────────────┤
//!                      ▼                     ▼
//!             ClassVars (.get(key))   ScopedVars (per element)
//!                      │                     │
//!                      └─────────┬───────────┘
//!                                ▼
//!                    Scheduler (coalescing queue)
//!                        │              ▲
//!        FlushDriver::schedule          │ next_flush() waiters
//!                        ▼              │
//!                StyleSurface::apply ───┘
//! ```
//!
//! **[`sheet`]** — Brace-depth block scanner plus `@scope` / `@bind`
//! directive extraction. Not a CSS parser: bodies stay opaque.
//!
//! **[`hash`]** — Deterministic base-52 short codes for content-derived
//! names.
//!
//! **[`name`]** — The display-name and variable-name codecs and their
//! inverses.
//!
//! **[`scheduler`]** — The coalescing write queue, flushed once per frame,
//! with [`next_flush`](scheduler::Scheduler::next_flush) for
//! read-after-write consistency.
//!
//! **[`style`]** — [`StyleMap`](style::StyleMap) and the two accessor
//! facades, with per-key registries for precise resets.
//!
//! **[`backend`]** — The [`StyleSurface`](backend::StyleSurface) and
//! [`FlushDriver`](backend::FlushDriver) traits platform backends
//! implement.
//!
//! **[`target`]** — [`TargetId`](target::TargetId) handles naming the
//! elements writes land on.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for write-path instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site) and `Scheduler::set_trace_sink`.
//! - `trace-rich` (disabled by default, implies `trace`): Gates the per-op
//!   [`WriteQueuedEvent`](trace::WriteQueuedEvent).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod hash;
pub mod name;
pub mod scheduler;
pub mod sheet;
pub mod style;
pub mod target;
pub mod trace;

#[cfg(test)]
mod testutil;
