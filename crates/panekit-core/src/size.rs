#![forbid(unsafe_code)]

//! Declared panel dimensions.
//!
//! A dimension is declared either as a bare number (pixels) or as a string
//! such as `"30%"`, `"200px"` or `"150"`. Parsing is deliberately lenient: a
//! malformed value degrades to `0px` instead of failing, so one bad entry
//! cannot take down a whole layout.
//!
//! Resolution against the container extent is pure. Callers keep pixels as the
//! canonical representation and only convert back to the declared unit when
//! reporting, which avoids drift from chained conversions.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit of a declared dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    #[default]
    Pixels,
    Percent,
}

/// A parsed dimension: magnitude plus unit.
///
/// `30%` is stored as `{ magnitude: 30.0, unit: Percent }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawSize", into = "String")]
pub struct SizeValue {
    pub magnitude: f64,
    pub unit: SizeUnit,
}

impl SizeValue {
    /// `0px`, the fallback for anything unparseable.
    pub const ZERO: Self = Self {
        magnitude: 0.0,
        unit: SizeUnit::Pixels,
    };

    /// Pixel dimension. Non-finite input collapses to [`SizeValue::ZERO`].
    #[must_use]
    pub fn px(magnitude: f64) -> Self {
        if magnitude.is_finite() {
            Self {
                magnitude,
                unit: SizeUnit::Pixels,
            }
        } else {
            Self::ZERO
        }
    }

    /// Percentage dimension (`30.0` means 30%).
    #[must_use]
    pub fn percent(magnitude: f64) -> Self {
        if magnitude.is_finite() {
            Self {
                magnitude,
                unit: SizeUnit::Percent,
            }
        } else {
            Self::ZERO
        }
    }

    /// Parse a textual dimension.
    ///
    /// Accepts a trailing `%` (percentage), a trailing `px`, or a bare numeric
    /// string. Only the leading numeric prefix is read, so `"12abc"` is `12px`.
    /// Anything without a numeric prefix yields [`SizeValue::ZERO`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let (body, unit) = if let Some(body) = trimmed.strip_suffix('%') {
            (body, SizeUnit::Percent)
        } else if let Some(body) = trimmed.strip_suffix("px") {
            (body, SizeUnit::Pixels)
        } else {
            (trimmed, SizeUnit::Pixels)
        };
        match leading_float(body.trim_start()) {
            Some(magnitude) => Self { magnitude, unit },
            None => Self::ZERO,
        }
    }

    /// Whether this value is a percentage.
    #[inline]
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(self.unit, SizeUnit::Percent)
    }

    /// Resolve against a container extent in pixels.
    ///
    /// Percentages scale by `total / 100`; pixels pass through. Sizes are
    /// extents, so the result never goes below zero.
    #[must_use]
    pub fn to_pixels(self, total: f64) -> f64 {
        let total = if total.is_finite() { total } else { 0.0 };
        let px = match self.unit {
            SizeUnit::Pixels => self.magnitude,
            SizeUnit::Percent => self.magnitude * total / 100.0,
        };
        px.max(0.0)
    }

    /// Express a pixel extent in `unit` relative to `total`.
    ///
    /// A percentage of a zero or unmeasured container is `0%`.
    #[must_use]
    pub fn from_pixels(px: f64, total: f64, unit: SizeUnit) -> Self {
        match unit {
            SizeUnit::Pixels => Self::px(px),
            SizeUnit::Percent if total > 0.0 && total.is_finite() => {
                Self::percent(px * 100.0 / total)
            }
            SizeUnit::Percent => Self::percent(0.0),
        }
    }
}

/// Resolve an optional dimension; an absent value resolves to `0`.
#[must_use]
pub fn to_pixels(value: Option<SizeValue>, total: f64) -> f64 {
    value.map_or(0.0, |value| value.to_pixels(total))
}

/// Format a magnitude with at most two decimals and no trailing zeros.
#[must_use]
pub fn format_magnitude(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Normalises -0.0.
    let rounded = rounded + 0.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = format_magnitude(self.magnitude);
        match self.unit {
            SizeUnit::Pixels => write!(f, "{magnitude}px"),
            SizeUnit::Percent => write!(f, "{magnitude}%"),
        }
    }
}

impl FromStr for SizeValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SizeValue {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<f64> for SizeValue {
    fn from(value: f64) -> Self {
        Self::px(value)
    }
}

impl From<u32> for SizeValue {
    fn from(value: u32) -> Self {
        Self::px(f64::from(value))
    }
}

impl From<SizeValue> for String {
    fn from(value: SizeValue) -> Self {
        value.to_string()
    }
}

/// Wire form: a number (pixels) or a string to parse.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f64),
    Text(String),
}

impl From<RawSize> for SizeValue {
    fn from(raw: RawSize) -> Self {
        match raw {
            RawSize::Number(value) => Self::px(value),
            RawSize::Text(text) => Self::parse(&text),
        }
    }
}

/// Read the longest numeric prefix (`[+-]digits[.digits][e[+-]digits]`).
fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bare_number_is_pixels() {
        assert_eq!(SizeValue::from(200.0), SizeValue::px(200.0));
        assert_eq!(SizeValue::from(120u32).unit, SizeUnit::Pixels);
    }

    #[test]
    fn percent_suffix_parses_magnitude() {
        let value = SizeValue::parse("30%");
        assert_eq!(value, SizeValue::percent(30.0));
        assert!(value.is_percent());
    }

    #[test]
    fn px_suffix_and_bare_string_are_pixels() {
        assert_eq!(SizeValue::parse("200px"), SizeValue::px(200.0));
        assert_eq!(SizeValue::parse(" 150 "), SizeValue::px(150.0));
        assert_eq!(SizeValue::parse("12.5"), SizeValue::px(12.5));
    }

    #[test]
    fn numeric_prefix_wins_over_trailing_garbage() {
        assert_eq!(SizeValue::parse("12abc"), SizeValue::px(12.0));
        assert_eq!(SizeValue::parse("1e2px"), SizeValue::px(100.0));
        assert_eq!(SizeValue::parse("3e"), SizeValue::px(3.0));
    }

    #[test]
    fn unparseable_falls_back_to_zero_pixels() {
        assert_eq!(SizeValue::parse("wide"), SizeValue::ZERO);
        assert_eq!(SizeValue::parse("abc%"), SizeValue::ZERO);
        assert_eq!(SizeValue::parse(""), SizeValue::ZERO);
        assert_eq!(SizeValue::parse("."), SizeValue::ZERO);
        assert_eq!(SizeValue::px(f64::NAN), SizeValue::ZERO);
    }

    #[test]
    fn to_pixels_resolves_against_extent() {
        assert_eq!(SizeValue::percent(30.0).to_pixels(1000.0), 300.0);
        assert_eq!(SizeValue::px(240.0).to_pixels(1000.0), 240.0);
        assert_eq!(to_pixels(None, 1000.0), 0.0);
        assert_eq!(to_pixels(Some(SizeValue::percent(50.0)), 400.0), 200.0);
    }

    #[test]
    fn to_pixels_never_goes_negative() {
        assert_eq!(SizeValue::px(-20.0).to_pixels(500.0), 0.0);
        assert_eq!(SizeValue::percent(10.0).to_pixels(f64::NAN), 0.0);
    }

    #[test]
    fn from_pixels_converts_to_declared_unit() {
        assert_eq!(
            SizeValue::from_pixels(350.0, 1000.0, SizeUnit::Percent),
            SizeValue::percent(35.0)
        );
        assert_eq!(
            SizeValue::from_pixels(350.0, 0.0, SizeUnit::Percent),
            SizeValue::percent(0.0)
        );
        assert_eq!(
            SizeValue::from_pixels(350.0, 1000.0, SizeUnit::Pixels),
            SizeValue::px(350.0)
        );
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(SizeValue::percent(35.0).to_string(), "35%");
        assert_eq!(SizeValue::percent(100.0 / 3.0).to_string(), "33.33%");
        assert_eq!(SizeValue::percent(12.5).to_string(), "12.5%");
        assert_eq!(SizeValue::px(200.0).to_string(), "200px");
        assert_eq!(format_magnitude(-0.001), "0");
    }

    #[test]
    fn serde_accepts_numbers_and_strings() {
        let values: Vec<SizeValue> =
            serde_json::from_str(r#"[120, "30%", "80px", "junk"]"#).expect("deserialize");
        assert_eq!(
            values,
            vec![
                SizeValue::px(120.0),
                SizeValue::percent(30.0),
                SizeValue::px(80.0),
                SizeValue::ZERO,
            ]
        );
        let json = serde_json::to_string(&SizeValue::percent(30.0)).expect("serialize");
        assert_eq!(json, "\"30%\"");
    }

    proptest! {
        #[test]
        fn percent_resolution_is_proportional(pct in 0.0f64..100.0, total in 1.0f64..10_000.0) {
            let px = SizeValue::percent(pct).to_pixels(total);
            prop_assert!(px >= 0.0);
            prop_assert!(px <= total + 1e-9);
        }

        #[test]
        fn parse_never_yields_non_finite(text in ".{0,16}") {
            let value = SizeValue::parse(&text);
            prop_assert!(value.magnitude.is_finite());
        }
    }
}
