// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory surfaces and hand-pumped flush drivers for testing lacquer.
//!
//! Everything here runs on a plain host target with no browser in sight:
//!
//! - [`MemorySurface`] stands in for a DOM, recording applied writes and
//!   serving inline-then-computed reads.
//! - [`ManualDriver`] captures schedule requests so tests decide exactly
//!   when a "frame" happens via [`ManualDriver::run_frame`].
//! - [`drive`] and [`poll_once`] resolve the read-back futures without an
//!   async runtime.
//! - [`RecordingSink`] collects trace events for assertions.
//! - [`WriteStats`] aggregates per-flush write counts for stress tests and
//!   demo HUDs.
//!
//! ```
//! use lacquer_core::scheduler::Scheduler;
//! use lacquer_core::style::StyleMap;
//! use lacquer_harness::{ManualDriver, MemorySurface, drive};
//!
//! let surface = MemorySurface::new();
//! let driver = ManualDriver::new();
//! let scheduler = Scheduler::new(Box::new(surface.clone()), Box::new(driver.clone()));
//!
//! let map = StyleMap::parse(&scheduler, "@scope panel\n.box { color: red; }");
//! map.get("box").set(&[("bg", "coral")]);
//!
//! let keys = ["bg"];
//! let values = drive(&driver, map.get("box").values(&keys));
//! assert_eq!(values["bg"].value, "coral");
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod driver;
mod futures;
mod record;
mod stats;
mod surface;

pub use driver::ManualDriver;
pub use futures::{drive, poll_once};
pub use record::RecordingSink;
pub use stats::{FlushReport, FlushSample, WriteStats};
pub use surface::MemorySurface;

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;

    use lacquer_core::hash::short_code;
    use lacquer_core::scheduler::Scheduler;
    use lacquer_core::style::{ScopedVars, StyleMap};
    use lacquer_core::target::TargetId;

    use super::*;

    fn fixture() -> (Scheduler, MemorySurface, ManualDriver) {
        let surface = MemorySurface::new();
        let driver = ManualDriver::new();
        let scheduler = Scheduler::new(Box::new(surface.clone()), Box::new(driver.clone()));
        (scheduler, surface, driver)
    }

    #[test]
    fn literal_scope_set_flush_read_back() {
        let (scheduler, surface, driver) = fixture();
        let map = StyleMap::parse(&scheduler, "@scope panel\n.box { color: red; }");
        assert_eq!(map.display("box"), Some("panel_box"));

        let facade = map.get("box");
        facade.set(&[("bg", "red")]);
        assert!(driver.has_pending_request());

        let keys = ["bg"];
        let values = drive(&driver, facade.values(&keys));
        assert_eq!(values["bg"].property, "--bg-panel_box");
        assert_eq!(values["bg"].value, "red");
        assert_eq!(
            surface.inline(TargetId::ROOT, "--bg-panel_box").as_deref(),
            Some("red")
        );
    }

    #[test]
    fn reset_removes_written_properties() {
        let (scheduler, surface, driver) = fixture();
        let map = StyleMap::parse(&scheduler, "@scope panel\n.box {}");
        map.get("box").set(&[("bg", "red"), ("fg", "white")]);
        driver.run_frame();
        assert_eq!(surface.inline_len(), 2);

        map.get("box").reset();
        let keys = ["bg", "fg"];
        let values = drive(&driver, map.get("box").values(&keys));
        assert_eq!(values["bg"].value, "");
        assert_eq!(values["fg"].value, "");
        assert_eq!(surface.inline_len(), 0);
    }

    #[test]
    fn unscoped_mapping_never_writes() {
        let (scheduler, surface, driver) = fixture();
        let map = StyleMap::parse(&scheduler, ".box { color: red; }");
        assert_eq!(map.display("box"), Some("box"));

        let facade = map.get("box");
        assert!(facade.is_inert());
        facade.set(&[("bg", "red")]);
        facade.reset();
        assert_eq!(scheduler.pending_len(), 0);
        assert!(!driver.has_pending_request());
        assert_eq!(surface.op_count(), 0);
    }

    #[test]
    fn unscoped_underscore_class_never_writes() {
        let (scheduler, surface, driver) = fixture();
        // The stored token is the raw class name; its `_primary` tail looks
        // like a hash suffix, which must not make the facade writable.
        let map = StyleMap::parse(&scheduler, ".btn_primary { color: red; }");
        assert_eq!(map.display("btn_primary"), Some("btn_primary"));

        let facade = map.get("btn_primary");
        assert!(facade.is_inert());
        facade.set(&[("bg", "red")]);
        driver.run_frame();
        assert_eq!(surface.op_count(), 0);
        assert_eq!(surface.inline_len(), 0);
        assert_eq!(scheduler.flush_count(), 0);
    }

    #[test]
    fn hashed_scope_derives_stable_names() {
        let (scheduler, surface, driver) = fixture();
        let map = StyleMap::parse(&scheduler, "@scope hash\n.box { color: red; }");
        // The embedded code hashes the class name plus the block body with
        // whitespace stripped.
        let expected = format!("box_{}", short_code("boxcolor:red;"));
        assert_eq!(map.display("box"), Some(expected.as_str()));

        map.get("box").set(&[("bg", "teal")]);
        driver.run_frame();
        let property = format!("--bg-{expected}");
        assert_eq!(
            surface.inline(TargetId::ROOT, &property).as_deref(),
            Some("teal")
        );
    }

    #[test]
    fn bursts_coalesce_into_one_batch() {
        let (scheduler, surface, driver) = fixture();
        let map = StyleMap::parse(&scheduler, "@scope app\n.box {}");
        let facade = map.get("box");
        for value in ["red", "green", "blue"] {
            facade.set(&[("bg", value)]);
        }
        facade.set(&[("fg", "white")]);

        assert_eq!(scheduler.pending_len(), 2);
        assert_eq!(driver.request_count(), 1);
        driver.run_frame();
        assert_eq!(surface.batch_count(), 1);
        assert_eq!(surface.op_count(), 2);
        assert_eq!(
            surface.inline(TargetId::ROOT, "--bg-app_box").as_deref(),
            Some("blue")
        );
    }

    #[test]
    fn computed_styles_back_fill_reads() {
        let (scheduler, surface, driver) = fixture();
        surface.seed_computed(TargetId::ROOT, "--bg-app_box", "cascade");
        let map = StyleMap::parse(&scheduler, "@scope app\n.box {}");

        let keys = ["bg"];
        let values = drive(&driver, map.get("box").values(&keys));
        assert_eq!(values["bg"].value, "cascade");

        // An inline write shadows the computed value until it is cleared.
        map.get("box").set(&[("bg", "inline")]);
        let values = drive(&driver, map.get("box").values(&keys));
        assert_eq!(values["bg"].value, "inline");
        map.get("box").reset();
        let values = drive(&driver, map.get("box").values(&keys));
        assert_eq!(values["bg"].value, "cascade");
    }

    #[test]
    fn element_scoped_facade_targets_explicit_elements() {
        let (scheduler, surface, driver) = fixture();
        let vars = ScopedVars::new(&scheduler, "chip", &["hue"]);
        let first = TargetId(1);
        let second = TargetId(2);
        vars.set_on(first, &[("hue", "10deg")]);
        vars.set_on(second, &[("hue", "200deg")]);
        driver.run_frame();
        assert_eq!(
            surface.inline(first, "--hue-chip").as_deref(),
            Some("10deg")
        );
        assert_eq!(
            surface.inline(second, "--hue-chip").as_deref(),
            Some("200deg")
        );

        vars.reset_on(first);
        let values = drive(&driver, vars.values_declared_on(second));
        assert_eq!(values["hue"].value, "200deg");
        assert!(surface.inline(first, "--hue-chip").is_none());
    }

    #[test]
    fn declared_snapshot_reports_unset_keys() {
        let (scheduler, _surface, driver) = fixture();
        let vars = ScopedVars::new(&scheduler, "theme", &["bg", "fg"]);
        vars.set(&[("bg", "black")]);

        let values = drive(&driver, vars.values_declared());
        assert_eq!(values.len(), 2);
        assert_eq!(values["bg"].value, "black");
        assert_eq!(values["fg"].value, "");
        assert_eq!(values["fg"].property, "--fg-theme");
    }

    #[test]
    fn trace_events_flow_through_scheduler() {
        let (scheduler, _surface, driver) = fixture();
        let sink = RecordingSink::new();
        scheduler.set_trace_sink(Box::new(sink.clone()));

        let map = StyleMap::parse(&scheduler, "@scope app\n.box {}\n.lid {}\n@bind both .box .lid");
        let sheets = sink.sheets();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].classes, 2);
        assert_eq!(sheets[0].bindings, 1);
        assert!(!sheets[0].hashed_scope);

        let facade = map.get("box");
        facade.set(&[("bg", "red")]);
        facade.set(&[("bg", "blue")]);
        facade.reset_keys(&["bg"]);
        let queued = sink.writes_queued();
        assert_eq!(queued.len(), 3);
        assert!(!queued[0].coalesced);
        assert!(queued[1].coalesced);
        // The clear coalesces onto the same slot.
        assert!(queued[2].coalesced);
        assert!(queued[2].clear);

        assert_eq!(sink.flushes_scheduled().len(), 1);
        driver.run_frame();
        let applied = sink.flushes_applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].flush_index, 1);
        assert_eq!(applied[0].sets, 0);
        assert_eq!(applied[0].clears, 1);
        assert_eq!(applied[0].waiters, 0);
    }

    #[test]
    fn write_stats_reports_coalescing() {
        let (scheduler, surface, driver) = fixture();
        let map = StyleMap::parse(&scheduler, "@scope app\n.box {}");
        let mut stats = WriteStats::<8>::new();

        let facade = map.get("box");
        let mut pushed = 0;
        for value in ["a", "b", "c", "d"] {
            facade.set(&[("bg", value)]);
            pushed += 1;
        }
        facade.set(&[("fg", "e")]);
        pushed += 1;

        let before = surface.op_count();
        driver.run_frame();
        let report = stats.observe(FlushSample {
            pushed,
            applied: surface.op_count() - before,
        });
        assert_eq!(report.applied, 2);
        assert!((report.coalesce_ratio - 0.6).abs() < 1e-9);
        assert_eq!(report.total_flushes, 1);
        assert_eq!(scheduler.flush_count(), 1);
        assert_eq!(stats.recent_applied()[7], 2);
    }
}
