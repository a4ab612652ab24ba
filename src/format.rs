//! Format mini-language for rendering time spans.
//!
//! A format string is tokenized into a flat sequence of [`Node`]s which a
//! separate renderer walks, so the two halves can be tested independently.
//!
//! Grammar:
//! - `\c` and `'text'` emit literal text.
//! - `+` emits `+` for a non-negative span, `-` otherwise; `-` emits `-`
//!   only for a negative span.
//! - Runs from `d D H M S` form one token (width = run length, meaning from
//!   the first character): lowercase `d` is the day component, uppercase
//!   letters are the truncated total in that unit. Runs of up to two of
//!   `h m s` render the hour/minute/second components. `f` × 1–3 renders the
//!   millisecond component truncated to the token width.
//! - `[...]` wraps one token (plus optional escaped/quoted literals) in an
//!   optional section that disappears when the token's value is zero
//!   relative to its total.
//! - Anything else passes through unchanged.

use core::fmt::{self, Write};

use crate::math::{fabs, trunc};
use crate::span::TimeSpan;

/// Units addressable from a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Days (`d` / `D`).
    Days,
    /// Hours (`h` / `H`).
    Hours,
    /// Minutes (`m` / `M`).
    Minutes,
    /// Seconds (`s` / `S`).
    Seconds,
}

/// A renderable symbol inside a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `+`: emits `+` when the total is non-negative, `-` otherwise.
    SignAlways,
    /// `-`: emits `-` only when the total is negative.
    SignIfNegative,
    /// Lowercase unit letter: the component value of the unit.
    Component(Unit),
    /// Uppercase unit letter: the truncated total in that unit.
    Total(Unit),
    /// `f`: fractional-second digits from the millisecond component.
    Fraction,
}

/// One node of a tokenized format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    /// Verbatim text: an escaped character, a quoted run, or a character the
    /// tokenizer does not recognize.
    Literal(&'a str),
    /// A symbol run, zero-padded to `width`.
    Token { symbol: Symbol, width: usize },
    /// An optional `[...]` section, omitted entirely when the symbol's value
    /// is zero relative to its total.
    Optional {
        leading: &'a str,
        symbol: Symbol,
        width: usize,
        trailing: &'a str,
    },
}

/// Streaming tokenizer over a format string.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `src`.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let rest = &self.src[self.pos..];
        let ch = rest.chars().next()?;

        if let Some((text, consumed)) = scan_literal(rest) {
            self.pos += consumed;
            return Some(Node::Literal(text));
        }

        if ch == '[' {
            if let Some((node, consumed)) = scan_optional(rest) {
                self.pos += consumed;
                return Some(node);
            }
            // No valid section body; the bracket falls through as text.
        }

        if let Some((symbol, width, consumed)) = scan_symbol(rest) {
            self.pos += consumed;
            return Some(Node::Token { symbol, width });
        }

        let consumed = ch.len_utf8();
        self.pos += consumed;
        Some(Node::Literal(&rest[..consumed]))
    }
}

/// Scans an escaped character (`\c`) or non-empty quoted run (`'text'`).
///
/// Returns the literal text and the bytes consumed. An unterminated escape
/// or quote does not scan; the introducing character then passes through,
/// leaving the remainder to be tokenized normally.
fn scan_literal(rest: &str) -> Option<(&str, usize)> {
    match rest.as_bytes().first()? {
        b'\\' => {
            let ch = rest[1..].chars().next()?;
            let end = 1 + ch.len_utf8();
            Some((&rest[1..end], end))
        }
        b'\'' => {
            let close = rest[1..].find('\'')?;
            if close == 0 {
                return None;
            }
            Some((&rest[1..1 + close], close + 2))
        }
        _ => None,
    }
}

/// Scans a symbol run, returning the symbol, its width, and bytes consumed.
fn scan_symbol(rest: &str) -> Option<(Symbol, usize, usize)> {
    let bytes = rest.as_bytes();
    match *bytes.first()? {
        b'+' => Some((Symbol::SignAlways, 1, 1)),
        b'-' => Some((Symbol::SignIfNegative, 1, 1)),
        // d/D/H/M/S run in any mix; the first character picks the meaning.
        first @ (b'd' | b'D' | b'H' | b'M' | b'S') => {
            let len = bytes
                .iter()
                .take_while(|b| matches!(**b, b'd' | b'D' | b'H' | b'M' | b'S'))
                .count();
            let symbol = match first {
                b'd' => Symbol::Component(Unit::Days),
                b'D' => Symbol::Total(Unit::Days),
                b'H' => Symbol::Total(Unit::Hours),
                b'M' => Symbol::Total(Unit::Minutes),
                _ => Symbol::Total(Unit::Seconds),
            };
            Some((symbol, len, len))
        }
        first @ (b'h' | b'm' | b's') => {
            let len = bytes
                .iter()
                .take(2)
                .take_while(|b| matches!(**b, b'h' | b'm' | b's'))
                .count();
            let symbol = match first {
                b'h' => Symbol::Component(Unit::Hours),
                b'm' => Symbol::Component(Unit::Minutes),
                _ => Symbol::Component(Unit::Seconds),
            };
            Some((symbol, len, len))
        }
        b'f' => {
            let len = bytes.iter().take(3).take_while(|b| **b == b'f').count();
            Some((Symbol::Fraction, len, len))
        }
        _ => None,
    }
}

/// Scans an optional section: `[` literal? symbols literal? `]`.
fn scan_optional(rest: &str) -> Option<(Node<'_>, usize)> {
    let mut i = 1;
    let (leading, consumed) = scan_literal(&rest[i..]).unwrap_or(("", 0));
    i += consumed;
    let (symbol, width, consumed) = scan_symbol(&rest[i..])?;
    i += consumed;
    let (trailing, consumed) = scan_literal(&rest[i..]).unwrap_or(("", 0));
    i += consumed;
    if rest.as_bytes().get(i) != Some(&b']') {
        return None;
    }
    Some((
        Node::Optional {
            leading,
            symbol,
            width,
            trailing,
        },
        i + 1,
    ))
}

fn unit_total(span: &TimeSpan, unit: Unit) -> f64 {
    match unit {
        Unit::Days => span.total_days(),
        Unit::Hours => span.total_hours(),
        Unit::Minutes => span.total_minutes(),
        Unit::Seconds => span.total_seconds(),
    }
}

fn unit_component(span: &TimeSpan, unit: Unit) -> f64 {
    match unit {
        Unit::Days => span.days(),
        Unit::Hours => span.hours(),
        Unit::Minutes => span.minutes(),
        Unit::Seconds => span.seconds(),
    }
}

/// Millisecond digits visible through an `f` token of the given width.
fn fraction_digits(span: &TimeSpan, width: usize) -> Option<u64> {
    let ms = span.milliseconds();
    if ms.is_nan() {
        return None;
    }
    let n = trunc(fabs(ms)) as u64;
    Some(n / 10u64.pow((3 - width.min(3)) as u32))
}

/// Whether an optional section carrying `symbol` renders at all.
///
/// Component tokens hide while the magnitude of their *total* is below one
/// full unit; total tokens hide while the truncated total is zero; fraction
/// tokens hide when every visible digit is zero. NaN hides component and
/// total sections but keeps fraction sections, which then render `NaN`.
fn is_visible(span: &TimeSpan, symbol: Symbol, width: usize) -> bool {
    match symbol {
        Symbol::SignAlways => true,
        Symbol::SignIfNegative => span.total_milliseconds() < 0.0,
        Symbol::Component(unit) => fabs(unit_total(span, unit)) >= 1.0,
        Symbol::Total(unit) => trunc(fabs(unit_total(span, unit))) >= 1.0,
        Symbol::Fraction => match fraction_digits(span, width) {
            Some(digits) => digits != 0,
            None => true,
        },
    }
}

/// Writes a non-negative value zero-padded to `width`; NaN writes `NaN`
/// (itself zero-padded once the width exceeds its three characters).
fn write_padded<W: Write>(out: &mut W, value: f64, width: usize) -> fmt::Result {
    if value.is_nan() {
        write!(out, "{:0>width$}", "NaN", width = width)
    } else {
        write!(out, "{:0width$}", fabs(value) as u64, width = width)
    }
}

fn write_symbol<W: Write>(
    span: &TimeSpan,
    symbol: Symbol,
    width: usize,
    out: &mut W,
) -> fmt::Result {
    match symbol {
        Symbol::SignAlways => {
            out.write_char(if span.total_milliseconds() >= 0.0 { '+' } else { '-' })
        }
        Symbol::SignIfNegative => {
            if span.total_milliseconds() < 0.0 {
                out.write_char('-')?;
            }
            Ok(())
        }
        Symbol::Component(unit) => write_padded(out, unit_component(span, unit), width),
        Symbol::Total(unit) => write_padded(out, trunc(fabs(unit_total(span, unit))), width),
        Symbol::Fraction => match fraction_digits(span, width) {
            Some(digits) => write!(out, "{:0width$}", digits, width = width.min(3)),
            None => out.write_str(&"NaN"[..width.min(3)]),
        },
    }
}

/// Renders `span` through `format` into any `core::fmt::Write` target.
pub fn render_into<W: Write>(span: &TimeSpan, format: &str, out: &mut W) -> fmt::Result {
    for node in Tokenizer::new(format) {
        match node {
            Node::Literal(text) => out.write_str(text)?,
            Node::Token { symbol, width } => write_symbol(span, symbol, width, out)?,
            Node::Optional {
                leading,
                symbol,
                width,
                trailing,
            } => {
                if is_visible(span, symbol, width) {
                    out.write_str(leading)?;
                    write_symbol(span, symbol, width, out)?;
                    out.write_str(trailing)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::vec::Vec;

    fn nodes(format: &str) -> Vec<Node<'_>> {
        Tokenizer::new(format).collect()
    }

    #[test]
    fn tokenizes_symbol_runs_with_widths() {
        assert_eq!(
            nodes("hh:mm:ss"),
            [
                Node::Token {
                    symbol: Symbol::Component(Unit::Hours),
                    width: 2
                },
                Node::Literal(":"),
                Node::Token {
                    symbol: Symbol::Component(Unit::Minutes),
                    width: 2
                },
                Node::Literal(":"),
                Node::Token {
                    symbol: Symbol::Component(Unit::Seconds),
                    width: 2
                },
            ]
        );
    }

    #[test]
    fn lowercase_runs_cap_at_two_and_fraction_at_three() {
        // "sss" splits into a two-wide and a one-wide token.
        assert_eq!(
            nodes("sss"),
            [
                Node::Token {
                    symbol: Symbol::Component(Unit::Seconds),
                    width: 2
                },
                Node::Token {
                    symbol: Symbol::Component(Unit::Seconds),
                    width: 1
                },
            ]
        );
        assert_eq!(
            nodes("ffff"),
            [
                Node::Token {
                    symbol: Symbol::Fraction,
                    width: 3
                },
                Node::Token {
                    symbol: Symbol::Fraction,
                    width: 1
                },
            ]
        );
    }

    #[test]
    fn uppercase_runs_take_meaning_from_first_character() {
        assert_eq!(
            nodes("HHH"),
            [Node::Token {
                symbol: Symbol::Total(Unit::Hours),
                width: 3
            }]
        );
        // Mixed run: width from the whole run, meaning from the first letter.
        assert_eq!(
            nodes("dH"),
            [Node::Token {
                symbol: Symbol::Component(Unit::Days),
                width: 2
            }]
        );
    }

    #[test]
    fn escapes_and_quotes_become_literals() {
        assert_eq!(
            nodes("\\d'total'"),
            [Node::Literal("d"), Node::Literal("total")]
        );
        // Unterminated quote and trailing backslash pass through.
        assert_eq!(nodes("'"), [Node::Literal("'")]);
        assert_eq!(nodes("\\"), [Node::Literal("\\")]);
        // Empty quotes are two passthrough characters.
        assert_eq!(nodes("''"), [Node::Literal("'"), Node::Literal("'")]);
    }

    #[test]
    fn optional_sections_capture_their_literals() {
        assert_eq!(
            nodes("[d\\.]"),
            [Node::Optional {
                leading: "",
                symbol: Symbol::Component(Unit::Days),
                width: 1,
                trailing: ".",
            }]
        );
        assert_eq!(
            nodes("['('ss')']"),
            [Node::Optional {
                leading: "(",
                symbol: Symbol::Component(Unit::Seconds),
                width: 2,
                trailing: ")",
            }]
        );
    }

    #[test]
    fn malformed_optional_section_falls_through() {
        assert_eq!(
            nodes("[x]"),
            [Node::Literal("["), Node::Literal("x"), Node::Literal("]")]
        );
        assert_eq!(
            nodes("[dd"),
            [
                Node::Literal("["),
                Node::Token {
                    symbol: Symbol::Component(Unit::Days),
                    width: 2
                },
            ]
        );
    }

    #[test]
    fn unrecognized_characters_pass_through() {
        assert_eq!(
            nodes("a:b"),
            [Node::Literal("a"), Node::Literal(":"), Node::Literal("b")]
        );
    }
}
