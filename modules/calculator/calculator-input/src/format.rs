//! Display parsing and result formatting.

use crate::state::MAX_DIGITS;

/// Longest text shown for a computed result.
pub const MAX_DISPLAY_LENGTH: usize = 18;

const EXPONENT_DIGITS: usize = 6;

/// Numeric value of a display string. Grouping commas are ignored; anything that does not
/// parse to a finite number counts as zero.
#[must_use]
pub fn parse_display(display: &str) -> f64 {
    display
        .replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Count of decimal digits, ignoring sign and decimal point.
#[must_use]
pub fn digit_count(display: &str) -> usize {
    display.chars().filter(char::is_ascii_digit).count()
}

/// `value` in scientific notation with a signed exponent, e.g. `1.234568e+20`.
fn to_exponential(value: f64, digits: usize) -> String {
    let text = format!("{value:.digits$e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => text,
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text.to_owned()
    }
}

/// Text shown for a computed result: at most `MAX_DIGITS` digits, so a result can be
/// edited like typed input. Values outside `[1e-6, 1e15)`, and values that round up to
/// sixteen integer digits, use scientific notation.
#[must_use]
pub fn format_result(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if !(1e-6..1e15).contains(&magnitude) {
        return to_exponential(value, EXPONENT_DIGITS);
    }

    let integer_digits = format!("{:.0}", magnitude.trunc()).len();
    let decimals = MAX_DIGITS.saturating_sub(integer_digits);
    let text = trim_fraction(&format!("{value:.decimals$}"));
    if digit_count(&text) > MAX_DIGITS {
        return to_exponential(value, EXPONENT_DIGITS);
    }
    text
}
