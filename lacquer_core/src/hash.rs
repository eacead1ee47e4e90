// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic short codes for derived names.
//!
//! [`short_code`] maps arbitrary text to a compact alphabetic code. It is
//! the basis for content-addressed display names: the same input produces
//! the same code in every build and on every platform, so generated class
//! names are stable across runs and can be written into cached style sheets.

use alloc::string::String;
use alloc::vec::Vec;

/// Seed for the rolling hash. Non-zero so short inputs still mix.
const SEED: u32 = 5381;

/// Base for rendering: digits 0-25 map to `a..z`, 26-51 to `A..Z`.
const BASE: u32 = 52;

/// Hashes `text` to a short alphabetic code.
///
/// The code is a 32-bit `h = ((h << 5) + h) ^ unit` fold over the UTF-16
/// code units of `text`, iterated in reverse order, rendered base-52 with
/// the most significant digit first. Any `ad` pair in the rendered code
/// (case-insensitive) is broken up as `a-d`; ad-blocker filter lists hide
/// elements whose class names contain that substring.
///
/// Every input yields a non-empty code; the empty string hashes to the seed.
///
/// ```
/// use lacquer_core::hash::short_code;
///
/// assert_eq!(short_code("x"), "bnJX");
/// assert_eq!(short_code("x"), short_code("x"));
/// ```
#[must_use]
pub fn short_code(text: &str) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut h = SEED;
    for &unit in units.iter().rev() {
        h = (h << 5).wrapping_add(h) ^ u32::from(unit);
    }
    break_reserved(&render_base52(h))
}

/// Renders `value` in base-52, most significant digit first. Zero is `"a"`.
fn render_base52(mut value: u32) -> String {
    let mut digits = Vec::with_capacity(6);
    loop {
        digits.push(digit_char(value % BASE));
        value /= BASE;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

#[expect(clippy::cast_possible_truncation, reason = "base-52 digits are < 52")]
const fn digit_char(digit: u32) -> char {
    if digit < 26 {
        (b'a' + digit as u8) as char
    } else {
        (b'A' + (digit - 26) as u8) as char
    }
}

/// Rewrites every `ad` pair (any case) as the literal `a-d`, left to right.
fn break_reserved(code: &str) -> String {
    let bytes = code.as_bytes();
    let mut out = String::with_capacity(bytes.len() + 2);
    let mut i = 0;
    while i < bytes.len() {
        if i + 1 < bytes.len()
            && bytes[i].eq_ignore_ascii_case(&b'a')
            && bytes[i + 1].eq_ignore_ascii_case(&b'd')
        {
            out.push_str("a-d");
            i += 2;
        } else {
            out.push(char::from(bytes[i]));
            i += 1;
        }
    }
    out
}
