// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory style surface.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::{Cell, RefCell};

use hashbrown::HashMap;

use lacquer_core::backend::StyleSurface;
use lacquer_core::scheduler::{WriteAction, WriteOp};
use lacquer_core::target::TargetId;

/// A [`StyleSurface`] backed by plain maps instead of a page.
///
/// Applied sets land in an *inline* layer keyed by `(target, property)`;
/// reads consult it first and fall back to a *computed* layer that tests
/// seed via [`seed_computed`](Self::seed_computed), mirroring how a real
/// surface falls back from inline to computed style.
///
/// Clones share storage: box one clone into the scheduler and keep the
/// other for assertions.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    inner: Rc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    inline: RefCell<HashMap<(TargetId, String), String>>,
    computed: RefCell<HashMap<(TargetId, String), String>>,
    batches: Cell<u32>,
    ops: Cell<u32>,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the computed-style layer consulted when no inline value is
    /// applied.
    pub fn seed_computed(&self, target: TargetId, name: &str, value: &str) {
        self.inner
            .computed
            .borrow_mut()
            .insert((target, name.to_string()), value.to_string());
    }

    /// Currently applied inline value, if any.
    #[must_use]
    pub fn inline(&self, target: TargetId, name: &str) -> Option<String> {
        self.inner
            .inline
            .borrow()
            .get(&(target, name.to_string()))
            .cloned()
    }

    /// Number of inline properties currently applied, across all targets.
    #[must_use]
    pub fn inline_len(&self) -> usize {
        self.inner.inline.borrow().len()
    }

    /// Batches applied so far (including empty ones).
    #[must_use]
    pub fn batch_count(&self) -> u32 {
        self.inner.batches.get()
    }

    /// Total ops applied across all batches.
    #[must_use]
    pub fn op_count(&self) -> u32 {
        self.inner.ops.get()
    }
}

impl StyleSurface for MemorySurface {
    fn apply(&mut self, ops: &[WriteOp]) {
        self.inner.batches.set(self.inner.batches.get() + 1);
        for op in ops {
            self.inner.ops.set(self.inner.ops.get() + 1);
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

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn inline_wins_over_computed() {
        let mut surface = MemorySurface::new();
        surface.seed_computed(TargetId::ROOT, "--a", "cascade");
        assert_eq!(surface.read(TargetId::ROOT, "--a"), "cascade");

        surface.apply(&[WriteOp {
            target: TargetId::ROOT,
            name: "--a".to_string(),
            action: WriteAction::Set("inline".to_string()),
        }]);
        assert_eq!(surface.read(TargetId::ROOT, "--a"), "inline");

        surface.apply(&[WriteOp {
            target: TargetId::ROOT,
            name: "--a".to_string(),
            action: WriteAction::Clear,
        }]);
        // Clearing exposes the computed layer again.
        assert_eq!(surface.read(TargetId::ROOT, "--a"), "cascade");
    }

    #[test]
    fn unknown_reads_are_empty() {
        let surface = MemorySurface::new();
        assert_eq!(surface.read(TargetId(9), "--missing"), "");
    }

    #[test]
    fn counters_track_batches_and_ops() {
        let mut surface = MemorySurface::new();
        surface.apply(&[]);
        surface.apply(&vec![
            WriteOp {
                target: TargetId::ROOT,
                name: "--a".to_string(),
                action: WriteAction::Set("1".to_string()),
            },
            WriteOp {
                target: TargetId::ROOT,
                name: "--b".to_string(),
                action: WriteAction::Set("2".to_string()),
            },
        ]);
        assert_eq!(surface.batch_count(), 2);
        assert_eq!(surface.op_count(), 2);
        assert_eq!(surface.inline_len(), 2);
    }
}
