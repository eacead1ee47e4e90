// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-class custom-property facade.

use alloc::string::{String, ToString};

use hashbrown::HashMap;

use crate::name::{ParsedDisplay, expand_var_refs, parse_display_name, parse_var_key, variable_name};
use crate::target::TargetId;

use super::map::StyleMap;

/// A property value sampled by [`ClassVars::values`] or
/// [`ScopedVars::values`](super::ScopedVars::values).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarValue {
    /// Full custom-property name that was read.
    pub property: String,
    /// Current value; empty when unset.
    pub value: String,
}

/// Map from requested shorthand key to the sampled [`VarValue`].
pub type VarValues = HashMap<String, VarValue>;

/// Write/read facade for one class's custom properties.
///
/// Obtained from [`StyleMap::get`]. The facade addresses properties on the
/// root target, named `--<base>-<scope>_<class>[-<suffix>]` where
/// `{scope, class}` come from the class's display name and
/// `{base, suffix}` from each caller-supplied shorthand (see
/// [`parse_var_key`]).
///
/// The facade is *inert* — every method a no-op, every read empty — when
/// the key is unknown, names a multi-class alias, or belongs to an
/// unscoped sheet. Writes without a namespace would collide across
/// mappings, so they are refused silently rather than risked.
#[derive(Debug)]
pub struct ClassVars<'a> {
    map: &'a StyleMap,
    /// Authored key, used to file written names in the map's registry.
    key: String,
    /// `(scope, class)` decoded from the display name; `None` when inert.
    resolved: Option<(String, String)>,
}

impl<'a> ClassVars<'a> {
    pub(crate) fn resolve(map: &'a StyleMap, class: &str) -> Self {
        let resolved = if map.scope().writable() {
            map.names.get(class).and_then(|display| {
                if display.contains(' ') {
                    // Multi-class aliases have no single variable namespace.
                    return None;
                }
                match parse_display_name(display) {
                    ParsedDisplay::Scoped { scope, class } => Some((scope, class)),
                    ParsedDisplay::Hashed { class, code } => Some((class, code)),
                    ParsedDisplay::Plain { .. } => None,
                }
            })
        } else {
            // Unscoped sheets take no writes. Their stored tokens are raw
            // class names, and a raw name containing `_` would decode as
            // scoped, so the mode is checked before the token.
            None
        };
        Self {
            map,
            key: class.to_string(),
            resolved,
        }
    }

    /// Whether writes through this facade go anywhere.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.resolved.is_none()
    }

    /// Queues one write per `(key, value)` pair.
    ///
    /// Pairs with an empty value are skipped. Bare `--name` references in
    /// values are wrapped as `var(--name)` before queueing. Every property
    /// written is tracked, so a later [`reset`](Self::reset) removes
    /// exactly these.
    pub fn set(&self, props: &[(&str, &str)]) {
        let Some((scope, class)) = &self.resolved else {
            return;
        };
        for &(key, value) in props {
            if value.is_empty() {
                continue;
            }
            let var_key = parse_var_key(key);
            let var = variable_name(&var_key.base, scope, class, &var_key.suffix);
            self.map
                .scheduler
                .push_set(TargetId::ROOT, &var, &expand_var_refs(value));
            let mut registry = self.map.registry.borrow_mut();
            let tracked = registry.entry(self.key.clone()).or_default();
            if !tracked.contains(&var) {
                tracked.push(var);
            }
        }
    }

    /// Queues a clear for every property this class has written, and
    /// forgets them.
    ///
    /// A facade that never wrote anything queues nothing.
    pub fn reset(&self) {
        if self.resolved.is_none() {
            return;
        }
        let Some(tracked) = self.map.registry.borrow_mut().remove(&self.key) else {
            return;
        };
        for var in &tracked {
            self.map.scheduler.push_clear(TargetId::ROOT, var);
        }
    }

    /// Queues a clear for the properties named by `keys` only.
    ///
    /// Keys that were never written (or were already reset) are ignored;
    /// the rest stay tracked.
    pub fn reset_keys(&self, keys: &[&str]) {
        let Some((scope, class)) = &self.resolved else {
            return;
        };
        let mut registry = self.map.registry.borrow_mut();
        let Some(tracked) = registry.get_mut(&self.key) else {
            return;
        };
        for &key in keys {
            let var_key = parse_var_key(key);
            let var = variable_name(&var_key.base, scope, class, &var_key.suffix);
            if let Some(at) = tracked.iter().position(|t| *t == var) {
                tracked.remove(at);
                self.map.scheduler.push_clear(TargetId::ROOT, &var);
            }
        }
        if tracked.is_empty() {
            registry.remove(&self.key);
        }
    }

    /// Waits for pending writes to land, then samples each key's property.
    ///
    /// Values are read from the root target, inline style first with a
    /// computed-style fallback, and come back empty when unset. An inert
    /// facade resolves immediately with an empty map.
    ///
    /// # Panics
    ///
    /// Panics if `keys` is empty: sampling nothing is a caller bug, and it
    /// panics for inert facades too.
    pub async fn values(&self, keys: &[&str]) -> VarValues {
        assert!(!keys.is_empty(), "values() requires at least one key");
        let mut out = VarValues::new();
        let Some((scope, class)) = &self.resolved else {
            return out;
        };
        self.map.scheduler.next_flush().await;
        for &key in keys {
            let var_key = parse_var_key(key);
            let var = variable_name(&var_key.base, scope, class, &var_key.suffix);
            let value = self.map.scheduler.read(TargetId::ROOT, &var);
            out.insert(
                key.to_string(),
                VarValue {
                    property: var,
                    value,
                },
            );
        }
        out
    }
}
