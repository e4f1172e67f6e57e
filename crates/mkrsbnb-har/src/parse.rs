//! String parsing for the human-formatted rating and price fields.

use std::sync::LazyLock;

use regex::Regex;

/// `"4.92 (118)"`: average rating followed by the review count in parentheses.
static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)\s\((\d+)\)").expect("valid regex"));

static LEADING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Parses a localized rating string into `(score, count)`.
///
/// Returns `None` when the string does not contain the `"<float> (<int>)"`
/// pattern, e.g. `"New"` for unrated listings. A count too large for `u64`
/// saturates.
#[must_use]
pub fn parse_rating(localized: &str) -> Option<(f64, u64)> {
    let caps = RATING_RE.captures(localized)?;
    let score = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let count = caps
        .get(2)?
        .as_str()
        .parse::<u64>()
        .unwrap_or(u64::MAX);
    Some((score, count))
}

/// Parses a display price such as `"$1,234"` into its integer amount.
///
/// Commas are stripped and the first run of digits is taken, so `"$1,234"`
/// yields `1234` and `"$95 night"` yields `95`. Returns `None` when no digits
/// remain (including the empty string).
#[must_use]
pub fn parse_price(price_str: &str) -> Option<u64> {
    let stripped = price_str.replace(',', "");
    LEADING_DIGITS_RE
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}
