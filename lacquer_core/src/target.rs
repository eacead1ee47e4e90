// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style target identification.

use core::fmt;

/// Identifies an element that can receive custom-property writes.
///
/// Backends hand these out when elements are registered with them and map
/// them back to live elements when a batch is applied. Core code passes
/// target IDs through without interpreting the value, with one exception:
/// [`TargetId::ROOT`] always names the backend's root element, and facades
/// that take no explicit target write there.
///
/// A stale ID (for an element the backend no longer knows) is not an error;
/// writes to it are dropped and reads return the empty string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TargetId(pub u32);

impl TargetId {
    /// The backend's root element (`document.documentElement` on the web).
    pub const ROOT: Self = Self(0);
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}
