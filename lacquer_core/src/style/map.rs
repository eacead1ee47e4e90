// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The class-name mapping parsed from a style source.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::name::{self, ScopeMode};
use crate::scheduler::Scheduler;
use crate::sheet;
use crate::target::TargetId;
use crate::trace::SheetParsedEvent;

use super::class_vars::ClassVars;
use super::scoped_vars::ScopedVars;

/// A parsed style source: authored keys mapped to final display names.
///
/// The map owns a clone of the scheduler it was parsed against; facades
/// obtained from it queue their writes there. Parsing never fails — any
/// text yields a map, possibly empty.
#[derive(Debug)]
pub struct StyleMap {
    pub(crate) scheduler: Scheduler,
    scope: ScopeMode,
    pub(crate) names: HashMap<String, String>,
    order: Vec<String>,
    /// Class key → variable names written through [`ClassVars::set`].
    pub(crate) registry: RefCell<HashMap<String, Vec<String>>>,
    vars: Option<ScopedVars>,
}

impl StyleMap {
    /// Parses `source` into a mapping over `scheduler`.
    ///
    /// Class blocks map their name to a display name built under the
    /// sheet's `@scope` mode. `@bind` aliases map to the space-joined
    /// display names of their referenced classes; a referenced class with
    /// no block in this sheet gets a display name synthesized from an empty
    /// body. Later definitions of the same key overwrite earlier ones while
    /// keeping the key's original position.
    #[must_use]
    pub fn parse(scheduler: &Scheduler, source: &str) -> Self {
        let scope = ScopeMode::from_directive(sheet::scope_directive(source));
        let blocks = sheet::class_blocks(source);
        let binds = sheet::bindings(source);

        let mut names = HashMap::with_capacity(blocks.len() + binds.len());
        let mut order = Vec::with_capacity(blocks.len() + binds.len());
        for block in &blocks {
            let display = name::display_name(&scope, &block.name, &block.body);
            if names.insert(block.name.clone(), display).is_none() {
                order.push(block.name.clone());
            }
        }
        for binding in &binds {
            let joined = binding
                .classes
                .iter()
                .map(|class| {
                    names
                        .get(class)
                        .cloned()
                        .unwrap_or_else(|| name::display_name(&scope, class, ""))
                })
                .collect::<Vec<_>>()
                .join(" ");
            if names.insert(binding.alias.clone(), joined).is_none() {
                order.push(binding.alias.clone());
            }
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "class and binding counts stay far below u32::MAX"
        )]
        let event = SheetParsedEvent {
            classes: blocks.len() as u32,
            bindings: binds.len() as u32,
            hashed_scope: matches!(scope, ScopeMode::Hashed),
        };
        scheduler.with_tracer(|tracer| tracer.sheet_parsed(&event));

        Self {
            scheduler: scheduler.clone(),
            scope,
            names,
            order,
            registry: RefCell::new(HashMap::new()),
            vars: None,
        }
    }

    /// Scope mode parsed from the sheet's `@scope` directive.
    #[must_use]
    pub fn scope(&self) -> &ScopeMode {
        &self.scope
    }

    /// Final display name for `key`, if the sheet defined it.
    ///
    /// For a class key this is a single token; for a `@bind` alias it may
    /// be several space-joined tokens.
    #[must_use]
    pub fn display(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Number of mapped keys (classes plus aliases).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the source defined no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates `(key, display name)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|key| self.names.get(key).map(|display| (key.as_str(), display.as_str())))
    }

    /// Returns the variable facade for `class`.
    ///
    /// Unknown keys, multi-class aliases, and keys of an unscoped sheet
    /// yield an inert facade: every write is a no-op and reads come back
    /// empty. Callers never need to pre-check the key.
    #[must_use]
    pub fn get(&self, class: &str) -> ClassVars<'_> {
        ClassVars::resolve(self, class)
    }

    /// Attaches an element-scoped variable facade, consuming and returning
    /// the map builder-style.
    ///
    /// # Panics
    ///
    /// Panics if `scope` is empty (see [`ScopedVars::new`]).
    #[must_use]
    pub fn with_vars(mut self, scope: &str, keys: &[&str]) -> Self {
        self.vars = Some(ScopedVars::new(&self.scheduler, scope, keys));
        self
    }

    /// The attached element-scoped facade, if any.
    #[must_use]
    pub fn vars(&self) -> Option<&ScopedVars> {
        self.vars.as_ref()
    }

    /// Queues a clear for every variable any class key has written, and
    /// empties the registry.
    ///
    /// Covers [`ClassVars`] writes only; an attached [`ScopedVars`] facade
    /// has its own [`reset_all`](ScopedVars::reset_all).
    pub fn reset_all(&self) {
        for (_, tracked) in self.registry.borrow_mut().drain() {
            for var in &tracked {
                self.scheduler.push_clear(TargetId::ROOT, var);
            }
        }
    }
}
