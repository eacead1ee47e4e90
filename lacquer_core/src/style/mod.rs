// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style mappings and property accessor facades.
//!
//! [`StyleMap::parse`] turns a style source into a mapping from authored
//! class names (and `@bind` aliases) to final display names. Two facades
//! mutate custom properties through the map's scheduler:
//!
//! - [`StyleMap::get`] returns a [`ClassVars`] facade addressing one
//!   class's variables on the root target, keyed by property shorthands.
//! - [`ScopedVars`] (attached via [`StyleMap::with_vars`] or built
//!   standalone) addresses per-element variables under a flat scope name.
//!
//! Both facades keep a registry of every variable they have written, so
//! resets remove exactly what was set and nothing else.
//!
//! ```rust,ignore
//! let map = StyleMap::parse(&scheduler, "@scope panel\n.box { }");
//! map.get("box").set(&[("bg", "tomato")]);
//! scheduler.next_flush().await;           // `--bg-panel_box: tomato` is live
//! ```

mod class_vars;
mod map;
mod scoped_vars;

pub use class_vars::{ClassVars, VarValue, VarValues};
pub use map::StyleMap;
pub use scoped_vars::ScopedVars;
