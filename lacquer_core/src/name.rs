// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scope-aware name codecs.
//!
//! Two paired encodings cover everything the runtime writes into a page:
//!
//! - The *display name* packs `{scope, class}` into the single class token
//!   stored in a style mapping ([`display_name`] / [`parse_display_name`]).
//! - The *variable name* packs `{base, scope, class, suffix}` into a custom
//!   property identifier ([`variable_name`], [`flat_variable_name`]), with
//!   [`parse_var_key`] splitting caller-supplied shorthands.
//!
//! All functions here are total: malformed input degrades to the closest
//! representable reading, never an error.

use alloc::format;
use alloc::string::{String, ToString};

use crate::hash::short_code;

/// How a style mapping namespaces its class and variable names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeMode {
    /// Final names are the raw class names. Property writes are disabled:
    /// with nothing namespacing the variables, writes would collide across
    /// mappings.
    None,
    /// Final names embed a content hash of each class name and body, so
    /// identical content collides deliberately and distinct content
    /// (virtually) never does.
    Hashed,
    /// Final names embed this literal scope.
    Named(String),
}

impl ScopeMode {
    /// Resolves a parsed `@scope` token.
    ///
    /// A missing directive and the literal `none` mean [`ScopeMode::None`];
    /// the literal `hash` selects [`ScopeMode::Hashed`]; anything else is a
    /// literal scope name.
    #[must_use]
    pub fn from_directive(token: Option<&str>) -> Self {
        match token {
            None | Some("none") => Self::None,
            Some("hash") => Self::Hashed,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    /// Whether names under this mode accept custom-property writes.
    #[must_use]
    pub fn writable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Builds the display name for `class` under `mode`.
///
/// Under [`ScopeMode::Hashed`] the embedded code hashes the class name and
/// `body` with all whitespace removed, so reformatting a block does not
/// change the emitted name. `body` is ignored by the other modes.
#[must_use]
pub fn display_name(mode: &ScopeMode, class: &str, body: &str) -> String {
    match mode {
        ScopeMode::None => class.to_string(),
        ScopeMode::Hashed => {
            let mut input = String::with_capacity(class.len() + body.len());
            input.push_str(class);
            input.extend(body.chars().filter(|c| !c.is_whitespace()));
            format!("{class}_{}", short_code(&input))
        }
        ScopeMode::Named(scope) => format!("{scope}_{class}"),
    }
}

/// A display name split back into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedDisplay {
    /// No separator: an unscoped class name.
    Plain {
        /// The whole token.
        class: String,
    },
    /// `<class>_<code>`: the text after the last `_` reads as a hash code.
    Hashed {
        /// Everything before the last `_`.
        class: String,
        /// The code after it.
        code: String,
    },
    /// `<scope>_<class>`: split at the first `_`.
    Scoped {
        /// Everything before the first `_`.
        scope: String,
        /// Everything after it.
        class: String,
    },
}

/// Decodes a display name.
///
/// Classification is heuristic: a token whose last-`_` suffix is 4-8
/// alphanumeric-or-hyphen characters reads as [`ParsedDisplay::Hashed`];
/// any other token containing `_` reads as [`ParsedDisplay::Scoped`] around
/// its first `_`; the rest are [`ParsedDisplay::Plain`].
///
/// The heuristic has a known blind spot: a literal scope pairing that
/// happens to look like a hash (say `dark_card`) decodes as `Hashed`. The
/// misread is harmless for variable writes, because every reading of a
/// token splits it at some `_` and the variable codec joins the two parts
/// back with `_` — see [`variable_name`].
#[must_use]
pub fn parse_display_name(token: &str) -> ParsedDisplay {
    if let Some((class, code)) = token.rsplit_once('_')
        && looks_like_hash_code(code)
    {
        return ParsedDisplay::Hashed {
            class: class.to_string(),
            code: code.to_string(),
        };
    }
    if let Some((scope, class)) = token.split_once('_') {
        return ParsedDisplay::Scoped {
            scope: scope.to_string(),
            class: class.to_string(),
        };
    }
    ParsedDisplay::Plain {
        class: token.to_string(),
    }
}

fn looks_like_hash_code(code: &str) -> bool {
    (4..=8).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Builds the custom-property name for a class-bound variable.
///
/// An empty `suffix` drops the trailing segment entirely.
///
/// ```
/// use lacquer_core::name::variable_name;
///
/// assert_eq!(variable_name("bg", "app", "box", ""), "--bg-app_box");
/// assert_eq!(variable_name("bg", "app", "box", "hover"), "--bg-app_box-hover");
/// ```
#[must_use]
pub fn variable_name(base: &str, scope: &str, class: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("--{base}-{scope}_{class}")
    } else {
        format!("--{base}-{scope}_{class}-{suffix}")
    }
}

/// Builds the custom-property name for an element-scoped variable.
///
/// Same shape as [`variable_name`] minus the class segment.
#[must_use]
pub fn flat_variable_name(base: &str, scope: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("--{base}-{scope}")
    } else {
        format!("--{base}-{scope}-{suffix}")
    }
}

/// A caller-supplied property shorthand split into base and suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarKey {
    /// Leading segment naming the property family.
    pub base: String,
    /// Trailing segment after the last `-`; empty when the key has none.
    pub suffix: String,
}

/// Splits a property shorthand.
///
/// One leading `$` or `&` sigil is dropped (authored keys may carry one as
/// a state-combinator hint), then the key splits at its last `-`:
/// `"bg-hover"` reads as base `bg`, suffix `hover`; `"bg"` has no suffix.
#[must_use]
pub fn parse_var_key(raw: &str) -> VarKey {
    let key = raw.strip_prefix(['$', '&']).unwrap_or(raw);
    match key.rsplit_once('-') {
        Some((base, suffix)) => VarKey {
            base: base.to_string(),
            suffix: suffix.to_string(),
        },
        None => VarKey {
            base: key.to_string(),
            suffix: String::new(),
        },
    }
}

/// Wraps bare custom-property references in `var()`.
///
/// Every `--` run followed by at least one identifier character (ASCII
/// alphanumerics, `-`, `_`) becomes `var(--name)`; all other text passes
/// through untouched. A bare `--` with no name is left alone. Values are
/// expected to carry references bare; text already inside a `var()` is not
/// detected and would be wrapped again.
#[must_use]
pub fn expand_var_refs(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(at) = rest.find("--") {
        out.push_str(&rest[..at]);
        let token_end = rest[at..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .map_or(rest.len(), |off| at + off);
        let token = &rest[at..token_end];
        if token.len() > 2 {
            out.push_str("var(");
            out.push_str(token);
            out.push(')');
        } else {
            out.push_str(token);
        }
        rest = &rest[token_end..];
    }
    out.push_str(rest);
    out
}
