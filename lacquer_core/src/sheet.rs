// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style-source scanning.
//!
//! A style source is a text blob carrying three kinds of construct:
//!
//! - `.name { ... }` class blocks, extracted by [`class_blocks`],
//! - an optional `@scope <name>` directive, extracted by [`scope_directive`],
//! - `@bind <alias> <.class ...>` lines, extracted by [`bindings`].
//!
//! This is deliberately not a CSS parser. Bodies are opaque text: the
//! scanner only needs to find where each block ends, which it does by
//! counting brace depth so nested braces (at-rules, future syntax) stay
//! inside the body. Selectors, media queries, and declaration syntax are
//! never interpreted here.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// One `.name { body }` block lifted out of a style source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassBlock {
    /// Class name as written, without the leading `.`.
    pub name: String,
    /// Text between the block's braces, trimmed. May be empty.
    pub body: String,
}

/// One `@bind <alias> <.class ...>` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Alias under which the joined class list is published.
    pub alias: String,
    /// Referenced class names, in order, without their leading `.`.
    pub classes: Vec<String>,
}

/// Extracts every class block from `source`, in appearance order.
///
/// A block starts at `.` followed by one or more identifier characters
/// (ASCII alphanumerics, `-`, `_`), optional whitespace, and `{`. The body
/// runs to the brace that balances the opening one: `{` and `}` inside the
/// body adjust a depth count, so nested braces do not end the block early.
///
/// A block with no balancing `}` is not an error; its body is everything to
/// the end of the source. A `.` that does not begin a block (say in
/// `margin: .5em`) resumes the scan at the next character. Duplicate names
/// are all returned; callers decide precedence.
#[must_use]
pub fn class_blocks(source: &str) -> Vec<ClassBlock> {
    let bytes = source.as_bytes();
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'.' {
            i += 1;
            continue;
        }
        let name_start = i + 1;
        let mut name_end = name_start;
        while name_end < bytes.len() && is_ident_byte(bytes[name_end]) {
            name_end += 1;
        }
        let mut open = name_end;
        while open < bytes.len() && bytes[open].is_ascii_whitespace() {
            open += 1;
        }
        if name_end == name_start || open >= bytes.len() || bytes[open] != b'{' {
            i += 1;
            continue;
        }
        // Opening brace consumed; scan at depth 1 for the balancing close.
        let body_start = open + 1;
        let mut close = body_start;
        let mut depth = 1_u32;
        while close < bytes.len() {
            match bytes[close] {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            close += 1;
        }
        blocks.push(ClassBlock {
            name: source[name_start..name_end].to_string(),
            body: source[body_start..close].trim().to_string(),
        });
        // Past the closing brace, or end of source for an unterminated block.
        i = if close < bytes.len() { close + 1 } else { bytes.len() };
    }
    blocks
}

const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

/// Returns the scope token from the first `@scope <name>` directive, if any.
///
/// The keyword must be followed by whitespace (so `@scoped` does not match)
/// and the token runs to the next whitespace. Later directives are ignored;
/// first match wins.
#[must_use]
pub fn scope_directive(source: &str) -> Option<&str> {
    let mut rest = source;
    while let Some(at) = rest.find("@scope") {
        let after = &rest[at + "@scope".len()..];
        if after.starts_with(char::is_whitespace)
            && let Some(token) = after.split_whitespace().next()
        {
            return Some(token);
        }
        rest = after;
    }
    None
}

/// Extracts every `@bind` directive from `source`.
///
/// A binding line reads `@bind <alias> <.class> <.class> ...`; the keyword
/// must be the line's first token. Class references keep their order, and
/// the list ends at the first token that does not start with `.`. A line
/// with no references yields an empty list.
#[must_use]
pub fn bindings(source: &str) -> Vec<Binding> {
    let mut out = Vec::new();
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("@bind") {
            continue;
        }
        let Some(alias) = tokens.next() else {
            continue;
        };
        let mut classes = Vec::new();
        for token in tokens {
            let Some(class) = token.strip_prefix('.') else {
                break;
            };
            classes.push(class.to_string());
        }
        out.push(Binding {
            alias: alias.to_string(),
            classes,
        });
    }
    out
}
