//! String parsing for time spans.
//!
//! Three patterns are tried in order: a plain number (raw milliseconds), the
//! sparse unit-suffixed form (`1d2h3m`), and the clock form
//! (`[sign][[D(.|:)]H:]M:S[(.|:)frac]`). Input matching none of them yields
//! NaN rather than an error.

use crate::span::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

pub(crate) fn parse_total(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Ok(ms) = trimmed.parse::<f64>() {
        return ms;
    }
    if let Some(total) = parse_sparse(trimmed) {
        return total;
    }
    if let Some(total) = parse_clock(trimmed) {
        return total;
    }
    f64::NAN
}

fn split_sign(s: &str) -> (f64, &str) {
    match s.as_bytes().first() {
        Some(b'+') => (1.0, &s[1..]),
        Some(b'-') => (-1.0, &s[1..]),
        _ => (1.0, s),
    }
}

/// Scans `digits[.digits]` at `pos`; the fraction is only consumed when at
/// least one digit follows the dot.
fn scan_number(src: &str, pos: usize) -> Option<(f64, usize)> {
    let bytes = src.as_bytes();
    let mut i = pos;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == pos {
        return None;
    }
    let mut end = i;
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            end = j;
        }
    }
    let value = src[pos..end].parse::<f64>().ok()?;
    Some((value, end))
}

/// Sparse form: `[sign](N d)?(N h)?(N m)?(N s)?(N ms)?`, suffixes
/// case-insensitive, every field optional. The sign multiplies each captured
/// component. A body with no fields at all still parses (as zero).
fn parse_sparse(input: &str) -> Option<f64> {
    let (sign, body) = split_sign(input);
    let bytes = body.as_bytes();
    let mut values = [0.0f64; 5]; // d h m s ms
    let mut pos = 0;

    for slot in 0..5 {
        if pos >= bytes.len() {
            break;
        }
        if let Some((value, after)) = scan_number(body, pos) {
            if let Some(end) = match_unit(bytes, after, slot) {
                values[slot] = value;
                pos = end;
            }
        }
    }
    if pos != bytes.len() {
        return None;
    }

    Some(
        sign * (values[0] * MS_PER_DAY
            + values[1] * MS_PER_HOUR
            + values[2] * MS_PER_MINUTE
            + values[3] * MS_PER_SECOND
            + values[4]),
    )
}

/// Matches the unit suffix for a sparse slot at `pos`. A lone `m` must not
/// be the start of an `ms` suffix, which belongs to the last slot.
fn match_unit(bytes: &[u8], pos: usize, slot: usize) -> Option<usize> {
    let lower = |i: usize| bytes.get(i).map(u8::to_ascii_lowercase);
    match slot {
        0 => (lower(pos) == Some(b'd')).then_some(pos + 1),
        1 => (lower(pos) == Some(b'h')).then_some(pos + 1),
        2 => (lower(pos) == Some(b'm') && lower(pos + 1) != Some(b's')).then_some(pos + 1),
        3 => (lower(pos) == Some(b's')).then_some(pos + 1),
        _ => (lower(pos) == Some(b'm') && lower(pos + 1) == Some(b's')).then_some(pos + 2),
    }
}

/// Clock form: digit groups separated by `:` or `.`, read as
/// `[[D(.|:)]H:]M:S[(.|:)frac]`. Hours, minutes, and seconds are one or two
/// digits; days and the fraction take any number of digits, the fraction
/// counting as raw milliseconds. When a four-group string could be either
/// `D:H:M:S` or `H:M:S:frac`, the day reading wins.
fn parse_clock(input: &str) -> Option<f64> {
    let (sign, body) = split_sign(input);
    let bytes = body.as_bytes();
    let mut numbers = [(0usize, 0usize); 5];
    let mut seps = [0u8; 4];
    let mut count = 0;
    let mut pos = 0;

    loop {
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == start || count == 5 {
            return None;
        }
        numbers[count] = (start, pos - start);
        count += 1;
        if pos == bytes.len() {
            break;
        }
        let sep = bytes[pos];
        if sep != b':' && sep != b'.' {
            return None;
        }
        if count == 5 {
            return None;
        }
        seps[count - 1] = sep;
        pos += 1;
    }

    let value = |i: usize| {
        let (start, len) = numbers[i];
        body[start..start + len].parse::<f64>().unwrap_or(f64::NAN)
    };
    let short = |i: usize| numbers[i].1 <= 2;

    let (d, h, m, s, frac) = match count {
        2 if seps[0] == b':' && short(0) && short(1) => (0.0, 0.0, value(0), value(1), 0.0),
        3 if seps[0] == b':' && seps[1] == b':' && short(0) && short(1) && short(2) => {
            (0.0, value(0), value(1), value(2), 0.0)
        }
        3 if seps[0] == b':' && short(0) && short(1) => (0.0, 0.0, value(0), value(1), value(2)),
        4 if seps[1] == b':' && seps[2] == b':' && short(1) && short(2) && short(3) => {
            (value(0), value(1), value(2), value(3), 0.0)
        }
        4 if seps[0] == b':' && seps[1] == b':' && short(0) && short(1) && short(2) => {
            (0.0, value(0), value(1), value(2), value(3))
        }
        5 if seps[1] == b':' && seps[2] == b':' && short(1) && short(2) && short(3) => {
            (value(0), value(1), value(2), value(3), value(4))
        }
        _ => return None,
    };

    Some(sign * (d * MS_PER_DAY + h * MS_PER_HOUR + m * MS_PER_MINUTE + s * MS_PER_SECOND + frac))
}
