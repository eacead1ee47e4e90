// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for lacquer.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomSurface`]: element inline-style writes with computed-style reads
//! - [`RafDriver`]: one-shot `requestAnimationFrame` flush scheduling

#![no_std]

extern crate alloc;

mod raf;
mod surface;

pub use lacquer_core::backend::{FlushDriver, StyleSurface};
pub use raf::{RafDriver, on_next_frame};
pub use surface::DomSurface;
