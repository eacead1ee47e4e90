// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: animated theme swatches driven by `lacquer_backend_web`.
//!
//! Parses a scoped style sheet, injects the scoped CSS into the page, then
//! animates a panel and a row of color chips entirely through
//! custom-property writes: [`StyleMap`] facades queue them, a [`Scheduler`]
//! coalesces them, and [`RafDriver`]/[`DomSurface`] land them on the next
//! animation frame.
//!
//! Build with: `wasm-pack build --target web demos/web_swatch`
//!
//! Then serve `demos/web_swatch/` and open `index.html` in a browser.
//!
//! [`StyleMap`]: lacquer_core::style::StyleMap
//! [`Scheduler`]: lacquer_core::scheduler::Scheduler
//! [`RafDriver`]: lacquer_backend_web::RafDriver
//! [`DomSurface`]: lacquer_backend_web::DomSurface

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement};

use lacquer_backend_web::{DomSurface, RafDriver, on_next_frame};
use lacquer_core::scheduler::Scheduler;
use lacquer_core::sheet;
use lacquer_core::style::StyleMap;
use lacquer_core::target::TargetId;

const NUM_CHIPS: usize = 4;

/// The authored sheet. The scope is literal, so final class names and the
/// variable names consumed by the `var()` defaults are predictable.
const SWATCH_SHEET: &str = r"
@scope swatch

.panel {
    min-width: 420px;
    padding: 24px 24px 16px;
    border-radius: 16px;
    background: var(--bg-swatch_panel, #1e1e2e);
    color: var(--fg-swatch_panel, #cdd6f4);
    font: 15px/1.5 system-ui, sans-serif;
    box-shadow: 0 8px 32px rgba(0, 0, 0, 0.5);
    transition: background 0.2s linear;
}

.chip {
    display: inline-block;
    width: 64px;
    height: 64px;
    margin: 8px;
    border-radius: 12px;
    background: hsl(var(--hue-chip, 0) 70% 55%);
    transform: translateY(var(--lift-chip, 0px));
}

.label {
    display: block;
    margin-top: 12px;
    font-size: 12px;
    opacity: 0.7;
}

@bind note .panel .label
";

struct DemoState {
    map: StyleMap,
    scheduler: Scheduler,
    chips: Vec<TargetId>,
    status: HtmlElement,
    frames: Cell<u64>,
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");
    let body = document.body().expect("no body");

    let surface = DomSurface::document_root()?;
    let scheduler = Scheduler::new(Box::new(surface.clone()), Box::new(RafDriver::new()));
    let map = StyleMap::parse(&scheduler, SWATCH_SHEET).with_vars("chip", &["hue", "lift"]);

    inject_styles(&document, &body, SWATCH_SHEET, &map)?;

    let panel = create_div(&document, map.display("panel").expect("panel block parsed"))?;
    body.append_child(&panel)?;

    let mut chips = Vec::with_capacity(NUM_CHIPS);
    for _ in 0..NUM_CHIPS {
        let chip = create_div(&document, map.display("chip").expect("chip block parsed"))?;
        panel.append_child(&chip)?;
        chips.push(surface.adopt(chip));
    }

    let status = create_div(&document, map.display("label").expect("label block parsed"))?;
    status.set_text_content(Some("warming up"));
    panel.append_child(&status)?;

    // The alias resolves to both display names, so the note reads as a
    // small second card.
    let note = create_div(&document, map.display("note").expect("note alias parsed"))?;
    note.set_text_content(Some("waiting for first flush"));
    body.append_child(&note)?;

    // Seed the theme before the first frame. The bare custom-property
    // reference is wrapped in var() on write and resolves through the
    // page-level definition in index.html.
    map.get("panel")
        .set(&[("bg", "hsl(0 35% 16%)"), ("fg", "--ink-strong")]);

    let state = Rc::new(DemoState {
        map,
        scheduler,
        chips,
        status,
        frames: Cell::new(0),
    });

    spawn_readback(Rc::clone(&state), note);
    schedule_tick(state);
    Ok(())
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = document.create_element("div")?.unchecked_into();
    el.set_class_name(class);
    Ok(el)
}

/// Rewrites each authored block under its final display name and appends
/// the result as a `<style>` element.
fn inject_styles(
    document: &Document,
    body: &HtmlElement,
    source: &str,
    map: &StyleMap,
) -> Result<(), JsValue> {
    let mut css = String::new();
    for block in sheet::class_blocks(source) {
        let Some(display) = map.display(&block.name) else {
            continue;
        };
        css.push('.');
        css.push_str(display);
        css.push_str(" {\n");
        css.push_str(&block.body);
        css.push_str("\n}\n");
    }
    let style = document.create_element("style")?;
    style.set_text_content(Some(&css));
    body.append_child(&style)?;
    Ok(())
}

fn schedule_tick(state: Rc<DemoState>) {
    on_next_frame(move |timestamp_ms| {
        tick(&state, timestamp_ms);
        schedule_tick(state);
    });
}

fn tick(state: &DemoState, timestamp_ms: f64) {
    let frame = state.frames.get();
    state.frames.set(frame + 1);
    let t = timestamp_ms / 1000.0;

    let hue = (t * 24.0) % 360.0;
    let bg = format!("hsl({hue:.0} 35% 16%)");
    state.map.get("panel").set(&[("bg", bg.as_str())]);

    if let Some(vars) = state.map.vars() {
        for (i, &chip) in state.chips.iter().enumerate() {
            let phase = i as f64 * TAU / state.chips.len() as f64;
            let chip_hue = (hue + i as f64 * 90.0) % 360.0;
            let lift = 6.0 + 6.0 * (t * 2.0 + phase).sin();
            let hue_value = format!("{chip_hue:.0}");
            let lift_value = format!("-{lift:.1}px");
            vars.set_on(
                chip,
                &[("hue", hue_value.as_str()), ("lift", lift_value.as_str())],
            );
        }
    }

    if frame % 30 == 0 {
        let text = format!(
            "frame {frame} | flushes {} | queued this frame {}",
            state.scheduler.flush_count(),
            state.scheduler.pending_len(),
        );
        state.status.set_text_content(Some(&text));
    }
}

/// Samples the seeded theme once its first flush has been applied.
#[cfg(target_arch = "wasm32")]
fn spawn_readback(state: Rc<DemoState>, out: HtmlElement) {
    wasm_bindgen_futures::spawn_local(async move {
        let keys = ["bg", "fg"];
        let values = state.map.get("panel").values(&keys).await;
        let bg = &values["bg"];
        let fg = &values["fg"];
        let text = format!(
            "first flush applied {} = {} and {} = {}",
            bg.property, bg.value, fg.property, fg.value,
        );
        out.set_text_content(Some(&text));
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_readback(_state: Rc<DemoState>, _out: HtmlElement) {}
