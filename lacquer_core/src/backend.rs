// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Core code never touches a real page. Platform crates implement two small
//! traits and hand them to [`Scheduler::new`](crate::scheduler::Scheduler::new):
//!
//! - [`StyleSurface`] applies flushed write batches to live element styles
//!   and samples current values back.
//! - [`FlushDriver`] arranges for [`Scheduler::flush`] to run on the host's
//!   next animation frame.
//!
//! A typical wiring, with a browser backend:
//!
//! ```rust,ignore
//! let surface = DomSurface::document_root()?;
//! let scheduler = Scheduler::new(Box::new(surface.clone()), Box::new(RafDriver::new()));
//! let map = StyleMap::parse(&scheduler, SOURCE);
//! map.get("panel").set(&[("bg", "tomato")]);
//! // ... the driver flushes on the next frame.
//! ```
//!
//! Both traits are object-safe and infallible by design: a backend that can
//! no longer reach its platform (a detached element, a torn-down page)
//! drops writes and returns empty reads rather than surfacing errors into
//! the write path.
//!
//! [`Scheduler::flush`]: crate::scheduler::Scheduler::flush

use alloc::string::String;

use crate::scheduler::{Scheduler, WriteOp};
use crate::target::TargetId;

/// Applies write batches to live styles and samples values back.
///
/// Implementations map [`TargetId`]s to platform elements. Unknown targets
/// are skipped on write and read as empty; they are a normal consequence of
/// elements leaving the page, not an error.
pub trait StyleSurface {
    /// Applies a flushed batch.
    ///
    /// Ops arrive already coalesced: at most one op per `(target, name)`
    /// pair, in first-queued order.
    fn apply(&mut self, ops: &[WriteOp]);

    /// Samples the current value of a property on `target`.
    ///
    /// Checks writable (inline) style first, then computed style; returns
    /// the empty string when the property is unset or the target is
    /// unknown.
    fn read(&self, target: TargetId, name: &str) -> String;
}

/// Schedules flush callbacks on the host's frame clock.
///
/// The scheduler requests at most one callback per idle-to-scheduled
/// transition, so drivers never need to dedupe. A driver that outlives its
/// page may drop the request on the floor; the pending writes are simply
/// never applied.
pub trait FlushDriver {
    /// Arranges exactly one [`Scheduler::flush`](crate::scheduler::Scheduler::flush)
    /// call on the next animation frame.
    ///
    /// `scheduler` is the handle to flush; implementations clone it into
    /// their callback.
    fn schedule(&self, scheduler: &Scheduler);
}
