//! Normalization of free-form numeric fields
//!
//! Corpus prices arrive as `"$450,000"`, `"1.2k"`, `"$500K"` and the like. Parsing is
//! exact decimal arithmetic, so `"4.35k"` is 4350 and not 4349.

/// Normalize a price string to whole currency units, 0 when unparseable
#[must_use]
pub fn parse_price(raw: &str) -> u64 {
    try_parse_price(raw).unwrap_or(0)
}

/// Normalize a price string, `None` when it is not a non-negative amount.
///
/// Strips `$`, `,` and whitespace; a trailing `k` multiplies by 1,000 and a
/// trailing `m` by 1,000,000. Fractions of a unit are truncated. Exponent forms
/// such as `"4.5e5"` are accepted through a float parse.
#[must_use]
pub fn try_parse_price(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    let (number, multiplier) = if let Some(n) = cleaned.strip_suffix('k') {
        (n, 1_000)
    } else if let Some(n) = cleaned.strip_suffix('m') {
        (n, 1_000_000)
    } else {
        (cleaned.as_str(), 1)
    };

    parse_scaled_decimal(number, multiplier).or_else(|| parse_exponent(number, multiplier))
}

/// `"4.5e5"` style amounts; exact arithmetic does not apply here
fn parse_exponent(number: &str, multiplier: u64) -> Option<u64> {
    if !number.contains('e') {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    let scaled = value * multiplier as f64;
    (scaled.is_finite() && scaled >= 0.0 && scaled < u64::MAX as f64).then(|| scaled.trunc() as u64)
}

/// `number * multiplier`, truncated toward zero, without going through floats
fn parse_scaled_decimal(number: &str, multiplier: u64) -> Option<u64> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole: u64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut value = whole.checked_mul(multiplier)?;

    let mut scale = multiplier;
    for digit in frac_part.bytes() {
        scale /= 10;
        if scale == 0 {
            break;
        }
        value = value.checked_add(u64::from(digit - b'0') * scale)?;
    }

    Some(value)
}

/// Lenient non-negative count (bedrooms, square feet). `"3"`, `"3.0"`, `"1,200"` all parse.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u32> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value.trunc() as u32)
    } else {
        None
    }
}

/// Lenient non-negative decimal (bathrooms may be `2.5`)
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f32> {
    let value: f32 = raw.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_suffix_shorthand() {
        assert_eq!(parse_price("1.2k"), 1200);
        assert_eq!(parse_price("500k"), 500_000);
        assert_eq!(parse_price("$500K"), 500_000);
        assert_eq!(parse_price("4.35k"), 4350);
        assert_eq!(parse_price("12.3456k"), 12_345);
    }

    #[test]
    fn test_currency_and_separators() {
        assert_eq!(parse_price("$450,000"), 450_000);
        assert_eq!(parse_price(" $ 1,250,000 "), 1_250_000);
        assert_eq!(parse_price("450000.99"), 450_000);
    }

    #[test]
    fn test_exponent_forms() {
        assert_eq!(parse_price("4.5e5"), 450_000);
        assert_eq!(parse_price("$1E6"), 1_000_000);
        assert_eq!(parse_price("1.2e2k"), 120_000);
        assert_eq!(parse_price("-4.5e5"), 0);
        assert_eq!(parse_price("1e400"), 0);
    }

    #[test]
    fn test_million_suffix() {
        assert_eq!(parse_price("$1.5M"), 1_500_000);
    }

    #[test]
    fn test_unparseable_prices_become_zero() {
        assert_eq!(parse_price(""), 0);
        assert_eq!(parse_price("call for price"), 0);
        assert_eq!(parse_price("-5000"), 0);
        assert_eq!(parse_price("1.2.3"), 0);
        assert_eq!(parse_price("$"), 0);
        assert_eq!(parse_price("."), 0);
        assert_eq!(try_parse_price("n/a"), None);
    }

    #[test]
    fn test_overflow_is_unparseable() {
        assert_eq!(parse_price("99999999999999999999k"), 0);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("3.0"), Some(3));
        assert_eq!(parse_count("1,200"), Some(1200));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("studio"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("2.5"), Some(2.5));
        assert_eq!(parse_decimal(" 1 "), Some(1.0));
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
