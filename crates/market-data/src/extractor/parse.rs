//! Text normalisation and lenient number parsing for scraped values.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Collapse all runs of whitespace to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a scraped number such as `"1,234.50"`, `"₹2,845.10"` or `"-3.2%"`.
///
/// Grouping separators, currency symbols, percent signs and whitespace are
/// stripped. Anything that is still not a number after that yields `None`.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter_map(|c| match c {
            ',' | '_' | '%' | '+' | '₹' | '$' | '€' | '£' | '¥' => None,
            '\u{2212}' => Some('-'),
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Accept a scraped label as text when it is non-empty after normalisation.
pub fn parse_text(text: &str) -> Option<String> {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() || normalized == "-" {
        None
    } else {
        Some(normalized)
    }
}
