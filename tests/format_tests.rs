//! Integration tests for time-span format rendering

mod common;
use common::rendered;

use timespan_tracker::TimeSpan;

#[test]
fn clock_format_pads_components() {
    let span = TimeSpan::from_millis(5_025_000.0);
    assert_eq!(rendered(&span, "hh:mm:ss"), "01:23:45");
}

#[test]
fn default_format_omits_zero_day_section() {
    let span = TimeSpan::from_millis(3_661_000.0);
    assert_eq!(rendered(&span, "-[d\\.]hh:mm:ss"), "01:01:01");
}

#[test]
fn default_format_shows_nonzero_day_section() {
    let span = TimeSpan::from_millis(90_000_000.0);
    assert_eq!(rendered(&span, "-[d\\.]hh:mm:ss"), "1.01:00:00");
}

#[test]
fn display_uses_built_in_default_format() {
    assert_eq!(TimeSpan::from_millis(93_784_005.0).to_string(), "1.02:03:04.005");
    assert_eq!(TimeSpan::from_millis(3_661_000.0).to_string(), "01:01:01");
    assert_eq!(TimeSpan::from_millis(0.0).to_string(), "00:00:00");
}

#[test]
fn negative_spans_render_sign_and_absolute_components() {
    let span = TimeSpan::from_millis(-3_661_000.0);
    assert_eq!(span.to_string(), "-01:01:01");
    assert_eq!(rendered(&span, "+hh:mm:ss"), "-01:01:01");

    let positive = TimeSpan::from_millis(61_000.0);
    assert_eq!(rendered(&positive, "+mm:ss"), "+01:01");
    assert_eq!(rendered(&positive, "-mm:ss"), "01:01");
}

#[test]
fn uppercase_tokens_render_truncated_totals() {
    let span = TimeSpan::from_millis(90_000_000.0); // 25 hours
    assert_eq!(rendered(&span, "D"), "1");
    assert_eq!(rendered(&span, "HH"), "25");
    assert_eq!(rendered(&span, "M"), "1500");
    assert_eq!(rendered(&span, "S"), "90000");
}

#[test]
fn fraction_token_truncates_to_width() {
    let span = TimeSpan::from_millis(1_234.0);
    assert_eq!(rendered(&span, "s\\.fff"), "1.234");
    assert_eq!(rendered(&span, "ff"), "23");
    assert_eq!(rendered(&span, "f"), "2");

    let small = TimeSpan::from_millis(5.0);
    assert_eq!(rendered(&small, "fff"), "005");
    assert_eq!(rendered(&small, "f"), "0");
}

#[test]
fn literals_escape_symbol_characters() {
    let span = TimeSpan::from_millis(7_000.0);
    assert_eq!(rendered(&span, "s's'"), "7s");
    assert_eq!(rendered(&span, "\\d d"), "d 0");
    assert_eq!(rendered(&span, "'total seconds: 'S"), "total seconds: 7");
}

#[test]
fn unrecognized_characters_pass_through() {
    let span = TimeSpan::from_millis(61_000.0);
    assert_eq!(rendered(&span, "m:ss!"), "1:01!");
    assert_eq!(rendered(&span, "(m)"), "(1)");
}

#[test]
fn optional_sections_hide_below_one_unit() {
    // Below one full second the bracketed section disappears entirely.
    let below = TimeSpan::from_millis(500.0);
    assert_eq!(rendered(&below, "['('ss')']"), "");
    let above = TimeSpan::from_millis(1_500.0);
    assert_eq!(rendered(&above, "['('ss')']"), "(01)");
}

#[test]
fn optional_total_section_hides_at_zero() {
    assert_eq!(rendered(&TimeSpan::from_minutes(30.0), "[H'h']mm"), "30");
    assert_eq!(rendered(&TimeSpan::from_hours(2.0), "[H'h']mm"), "2h00");
}

#[test]
fn optional_fraction_section_hides_when_digits_are_zero() {
    assert_eq!(rendered(&TimeSpan::from_millis(5_000.0), "ss[\\.fff]"), "05");
    assert_eq!(rendered(&TimeSpan::from_millis(5_042.0), "ss[\\.fff]"), "05.042");
    // Width-one fraction shows only the hundreds digit; 42 ms rounds out.
    assert_eq!(rendered(&TimeSpan::from_millis(5_042.0), "ss[\\.f]"), "05");
}

#[test]
fn optional_sign_section_follows_sign_visibility() {
    assert_eq!(rendered(&TimeSpan::from_millis(-1_000.0), "[-'neg ']ss"), "-neg 01");
    assert_eq!(rendered(&TimeSpan::from_millis(1_000.0), "[-'neg ']ss"), "01");
}

#[test]
fn malformed_optional_section_renders_literally() {
    let span = TimeSpan::from_millis(61_000.0);
    assert_eq!(rendered(&span, "[mm"), "[01");
    assert_eq!(rendered(&span, "[x]m"), "[x]1");
}

#[test]
fn nan_spans_render_nan_text() {
    let nan = TimeSpan::parse("garbage");
    assert!(nan.is_nan());
    assert_eq!(nan.to_string(), "NaN:NaN:NaN.NaN");
    assert_eq!(rendered(&nan, "ss"), "NaN");
    assert_eq!(rendered(&nan, "HH"), "NaN");
    assert_eq!(rendered(&nan, "ff"), "Na");
    assert_eq!(rendered(&nan, "f"), "N");
    // NaN hides optional component sections but keeps fraction sections.
    assert_eq!(rendered(&nan, "[d\\.]"), "");
    assert_eq!(rendered(&nan, "[\\.fff]"), ".NaN");
}

#[test]
fn stored_default_format_drives_display() {
    let mut span = TimeSpan::from_millis(5_025_000.0);
    span.set_default_format("H'h' mm'm'").unwrap();
    assert_eq!(span.to_string(), "1h 23m");
}
