// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rolling write metrics for demo HUDs and stress tests.

use alloc::string::String;

/// Per-flush sample fed into [`WriteStats::observe`].
#[derive(Clone, Copy, Debug)]
pub struct FlushSample {
    /// Writes pushed since the previous flush.
    pub pushed: u32,
    /// Ops the flush actually applied.
    pub applied: u32,
}

/// Aggregated report returned by [`WriteStats::observe`].
#[derive(Clone, Copy, Debug)]
pub struct FlushReport {
    /// Fraction of this flush's pushes absorbed by coalescing; 0.0 when
    /// nothing was pushed.
    pub coalesce_ratio: f64,
    /// Ops applied in this flush.
    pub applied: u32,
    /// Total flushes observed.
    pub total_flushes: u64,
    /// Total ops applied across all flushes.
    pub total_applied: u64,
    /// Total pushes across all flushes.
    pub total_pushed: u64,
}

/// Rolling write tracker with fixed-size applied-op history.
#[derive(Debug)]
pub struct WriteStats<const N: usize> {
    applied: [u32; N],
    cursor: usize,
    total_flushes: u64,
    total_applied: u64,
    total_pushed: u64,
}

impl<const N: usize> Default for WriteStats<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> WriteStats<N> {
    /// Creates a tracker with an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applied: [0; N],
            cursor: 0,
            total_flushes: 0,
            total_applied: 0,
            total_pushed: 0,
        }
    }

    /// Observes one flush and returns an updated report.
    #[must_use]
    pub fn observe(&mut self, sample: FlushSample) -> FlushReport {
        self.total_flushes = self.total_flushes.saturating_add(1);
        self.total_applied = self.total_applied.saturating_add(u64::from(sample.applied));
        self.total_pushed = self.total_pushed.saturating_add(u64::from(sample.pushed));
        self.applied[self.cursor % N] = sample.applied;
        self.cursor = (self.cursor + 1) % N;

        let coalesce_ratio = if sample.pushed == 0 {
            0.0
        } else {
            1.0 - f64::from(sample.applied) / f64::from(sample.pushed)
        };

        FlushReport {
            coalesce_ratio,
            applied: sample.applied,
            total_flushes: self.total_flushes,
            total_applied: self.total_applied,
            total_pushed: self.total_pushed,
        }
    }

    /// Returns ring-buffer applied-op counts oldest→newest.
    #[must_use]
    pub fn recent_applied(&self) -> [u32; N] {
        let mut out = [0; N];
        let mut i = 0;
        while i < N {
            let idx = (self.cursor + i) % N;
            out[i] = self.applied[idx];
            i += 1;
        }
        out
    }

    /// Returns an ASCII sparkline over `recent_applied()`.
    #[must_use]
    pub fn sparkline_ascii(&self, max_ops: u32) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        let max = max_ops.max(1);
        let mut out = String::with_capacity(N);
        let mut i = 0;
        while i < N {
            let idx = (self.cursor + i) % N;
            let t = f64::from(self.applied[idx].min(max)) / f64::from(max);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "index is clamped to ASCII level count"
            )]
            let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
            out.push(LEVELS[level] as char);
            i += 1;
        }
        out
    }
}
