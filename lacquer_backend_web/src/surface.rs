// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM inline-style surface.
//!
//! Translates flushed [`WriteOp`] batches into `setProperty` /
//! `removeProperty` calls on element inline styles, and serves reads with a
//! `getComputedStyle` fallback.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use lacquer_core::backend::StyleSurface;
use lacquer_core::scheduler::{WriteAction, WriteOp};
use lacquer_core::target::TargetId;

/// Applies write ops to live element styles.
///
/// The surface owns a root element ([`TargetId::ROOT`]) and a slot list of
/// adopted elements; [`adopt`](Self::adopt) hands out a [`TargetId`] for
/// each. Handles are clone-shared, so the copy boxed into a scheduler and
/// the copy the caller keeps for adopting address the same slots.
///
/// DOM write errors are swallowed: a property a stylesheet would reject is
/// simply not applied, which is also what assigning it in CSS would do.
#[derive(Clone)]
pub struct DomSurface {
    inner: Rc<DomInner>,
}

struct DomInner {
    root: HtmlElement,
    adopted: RefCell<Vec<HtmlElement>>,
}

impl DomSurface {
    /// Creates a surface rooted at `root`.
    #[must_use]
    pub fn new(root: HtmlElement) -> Self {
        Self {
            inner: Rc::new(DomInner {
                root,
                adopted: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Creates a surface rooted at the document element (`:root`).
    ///
    /// Properties written to [`TargetId::ROOT`] then cascade page-wide, the
    /// usual home for theme variables.
    ///
    /// # Errors
    ///
    /// Fails outside a browsing context, or when the document element is
    /// not an HTML element.
    pub fn document_root() -> Result<Self, JsValue> {
        let root: HtmlElement = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("document element is not an HtmlElement"))?;
        Ok(Self::new(root))
    }

    /// Registers `element` as a style target and returns its id.
    pub fn adopt(&self, element: HtmlElement) -> TargetId {
        let mut adopted = self.inner.adopted.borrow_mut();
        adopted.push(element);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "adopted element counts stay far below u32::MAX"
        )]
        let id = adopted.len() as u32;
        TargetId(id)
    }

    /// Returns a reference to the root element.
    #[must_use]
    pub fn root(&self) -> &HtmlElement {
        &self.inner.root
    }

    /// Returns the element behind `target`, if the id was handed out by
    /// this surface.
    #[must_use]
    pub fn element(&self, target: TargetId) -> Option<HtmlElement> {
        if target == TargetId::ROOT {
            return Some(self.inner.root.clone());
        }
        self.inner
            .adopted
            .borrow()
            .get(target.0 as usize - 1)
            .cloned()
    }
}

impl StyleSurface for DomSurface {
    fn apply(&mut self, ops: &[WriteOp]) {
        for op in ops {
            let Some(element) = self.element(op.target) else {
                continue;
            };
            let style = element.style();
            match &op.action {
                WriteAction::Set(value) => {
                    let _ = style.set_property(&op.name, value);
                }
                WriteAction::Clear => {
                    let _ = style.remove_property(&op.name);
                }
            }
        }
    }

    fn read(&self, target: TargetId, name: &str) -> String {
        let Some(element) = self.element(target) else {
            return String::new();
        };
        let inline = element.style().get_property_value(name).unwrap_or_default();
        if !inline.is_empty() {
            return inline;
        }
        web_sys::window()
            .and_then(|window| window.get_computed_style(&element).ok().flatten())
            .map(|style| style.get_property_value(name).unwrap_or_default())
            .unwrap_or_default()
    }
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("root", &"HtmlElement")
            .field("adopted_len", &self.inner.adopted.borrow().len())
            .finish()
    }
}
