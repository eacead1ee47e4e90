// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` flush scheduling.
//!
//! [`RafDriver`] turns each scheduler flush request into a one-shot
//! `requestAnimationFrame` callback. Each callback receives a
//! [`DOMHighResTimeStamp`][mdn] (milliseconds from `performance.now()`),
//! which the driver ignores; [`on_next_frame`] exposes the same primitive
//! with the timestamp for demo tick loops.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use lacquer_core::backend::FlushDriver;
use lacquer_core::scheduler::Scheduler;

// Direct global binding instead of the `web_sys::Window` method. Avoids
// fetching and unwrapping the Window object for every frame request.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;
}

/// Runs `callback` on the browser's next animation frame.
///
/// The callback receives the frame's timestamp in milliseconds.
/// Registration is fire-and-forget; the underlying JS closure is destroyed
/// after it runs.
pub fn on_next_frame(callback: impl FnOnce(f64) + 'static) {
    let closure = Closure::once_into_js(callback);
    let _ = request_animation_frame(&closure);
}

/// Flush driver backed by `requestAnimationFrame`.
///
/// The scheduler requests at most one flush at a time, so every request
/// maps to exactly one registered callback and writes land in the next
/// frame's batch.
#[derive(Clone, Copy, Debug, Default)]
pub struct RafDriver;

impl RafDriver {
    /// Creates a driver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FlushDriver for RafDriver {
    fn schedule(&self, scheduler: &Scheduler) {
        let scheduler = scheduler.clone();
        on_next_frame(move |_timestamp_ms| scheduler.flush());
    }
}
