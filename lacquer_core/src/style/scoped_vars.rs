// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element-scoped custom-property facade.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::name::{expand_var_refs, flat_variable_name, parse_var_key};
use crate::scheduler::Scheduler;
use crate::target::TargetId;

use super::class_vars::{VarValue, VarValues};

/// Write/read facade for per-element variables under a flat scope name.
///
/// Where [`ClassVars`](super::ClassVars) derives its namespace from a
/// class's display name, `ScopedVars` is configured once with an explicit
/// scope and a declared key list, and can address any adopted element.
/// Properties are named `--<base>-<scope>[-<suffix>]`.
///
/// Methods come in pairs: the bare name addresses [`TargetId::ROOT`], the
/// `_on` variant takes an explicit target. Written properties are tracked
/// per target, so resets on one element never disturb another.
#[derive(Debug)]
pub struct ScopedVars {
    scheduler: Scheduler,
    scope: String,
    declared: Vec<String>,
    /// Target → variable names written there.
    registry: RefCell<HashMap<TargetId, Vec<String>>>,
}

impl ScopedVars {
    /// Creates a facade for `scope` with the given declared keys.
    ///
    /// The declared list is what [`values_declared`](Self::values_declared)
    /// samples; [`set`](Self::set) is not limited to it.
    ///
    /// # Panics
    ///
    /// Panics if `scope` is empty. Without a scope name every facade would
    /// write into the same bare `--<base>` namespace, and collisions
    /// between unrelated facades would be silent.
    #[must_use]
    pub fn new(scheduler: &Scheduler, scope: &str, keys: &[&str]) -> Self {
        assert!(!scope.is_empty(), "ScopedVars requires a scope name");
        Self {
            scheduler: scheduler.clone(),
            scope: scope.to_string(),
            declared: keys.iter().map(|key| (*key).to_string()).collect(),
            registry: RefCell::new(HashMap::new()),
        }
    }

    /// Scope name variables are filed under.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Keys declared at construction, in declaration order.
    #[must_use]
    pub fn declared_keys(&self) -> &[String] {
        &self.declared
    }

    /// Queues writes on the root target. See [`set_on`](Self::set_on).
    pub fn set(&self, props: &[(&str, &str)]) {
        self.set_on(TargetId::ROOT, props);
    }

    /// Queues one write per `(key, value)` pair on `target`.
    ///
    /// Same contract as [`ClassVars::set`](super::ClassVars::set): empty
    /// values are skipped and bare `--name` references are wrapped in
    /// `var()` before queueing.
    pub fn set_on(&self, target: TargetId, props: &[(&str, &str)]) {
        for &(key, value) in props {
            if value.is_empty() {
                continue;
            }
            let var_key = parse_var_key(key);
            let var = flat_variable_name(&var_key.base, &self.scope, &var_key.suffix);
            self.scheduler
                .push_set(target, &var, &expand_var_refs(value));
            let mut registry = self.registry.borrow_mut();
            let tracked = registry.entry(target).or_default();
            if !tracked.contains(&var) {
                tracked.push(var);
            }
        }
    }

    /// Clears everything written on the root target. See
    /// [`reset_on`](Self::reset_on).
    pub fn reset(&self) {
        self.reset_on(TargetId::ROOT);
    }

    /// Queues a clear for every property written on `target`, and forgets
    /// them. Other targets keep their writes.
    pub fn reset_on(&self, target: TargetId) {
        let Some(tracked) = self.registry.borrow_mut().remove(&target) else {
            return;
        };
        for var in &tracked {
            self.scheduler.push_clear(target, var);
        }
    }

    /// Clears the named keys on the root target. See
    /// [`reset_keys_on`](Self::reset_keys_on).
    pub fn reset_keys(&self, keys: &[&str]) {
        self.reset_keys_on(TargetId::ROOT, keys);
    }

    /// Queues a clear for the properties named by `keys` on `target`.
    ///
    /// Keys never written there (or already reset) are ignored.
    pub fn reset_keys_on(&self, target: TargetId, keys: &[&str]) {
        let mut registry = self.registry.borrow_mut();
        let Some(tracked) = registry.get_mut(&target) else {
            return;
        };
        for &key in keys {
            let var_key = parse_var_key(key);
            let var = flat_variable_name(&var_key.base, &self.scope, &var_key.suffix);
            if let Some(at) = tracked.iter().position(|t| *t == var) {
                tracked.remove(at);
                self.scheduler.push_clear(target, &var);
            }
        }
        if tracked.is_empty() {
            registry.remove(&target);
        }
    }

    /// Queues a clear for every tracked property on every target, and
    /// empties the registry.
    pub fn reset_all(&self) {
        for (target, tracked) in self.registry.borrow_mut().drain() {
            for var in &tracked {
                self.scheduler.push_clear(target, var);
            }
        }
    }

    /// Samples `keys` on the root target. See [`values_on`](Self::values_on).
    ///
    /// # Panics
    ///
    /// Panics if `keys` is empty.
    pub async fn values(&self, keys: &[&str]) -> VarValues {
        self.values_on(TargetId::ROOT, keys).await
    }

    /// Waits for pending writes to land, then samples each key on
    /// `target`.
    ///
    /// Values are read inline-first with a computed-style fallback and come
    /// back empty when unset.
    ///
    /// # Panics
    ///
    /// Panics if `keys` is empty; use
    /// [`values_declared_on`](Self::values_declared_on) to sample the
    /// declared list instead.
    pub async fn values_on(&self, target: TargetId, keys: &[&str]) -> VarValues {
        assert!(!keys.is_empty(), "values() requires at least one key");
        self.sample(target, keys).await
    }

    /// Samples every declared key on the root target.
    pub async fn values_declared(&self) -> VarValues {
        self.values_declared_on(TargetId::ROOT).await
    }

    /// Samples every declared key on `target`.
    ///
    /// An empty declared list resolves to an empty map.
    pub async fn values_declared_on(&self, target: TargetId) -> VarValues {
        let keys: Vec<&str> = self.declared.iter().map(String::as_str).collect();
        self.sample(target, &keys).await
    }

    async fn sample(&self, target: TargetId, keys: &[&str]) -> VarValues {
        self.scheduler.next_flush().await;
        let mut out = VarValues::new();
        for &key in keys {
            let var_key = parse_var_key(key);
            let var = flat_variable_name(&var_key.base, &self.scope, &var_key.suffix);
            let value = self.scheduler.read(target, &var);
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
