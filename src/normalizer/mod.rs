// src/normalizer/mod.rs
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::types::{NormalizedListing, RawListing, ResultSet};

pub mod summary;

pub use summary::{summarize, DistributionEntry, SalaryEntry, Summary};

/// Digit runs with embedded thousands separators, e.g. `1,500,000`
static SALARY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:,\d+)*").expect("salary pattern should compile"));

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\d\z").expect("digit pattern should compile"));

/// Attach the numeric salary and its bucket label to every listing.
/// Order and length are preserved.
pub fn normalize(raw: ResultSet<RawListing>) -> ResultSet<NormalizedListing> {
    raw.into_iter().map(normalize_listing).collect()
}

pub fn normalize_listing(raw: RawListing) -> NormalizedListing {
    let salary_value = clean_salary(&raw.salary_text);
    let formatted_salary = salary_value.map(format_salary);

    NormalizedListing {
        raw,
        salary_value,
        formatted_salary,
    }
}

/// Mean of every number in a salary text, or `None` when it has none.
///
/// Digits from any script count, so `᠑᠐᠐` (Mongolian) reads as 100.
pub fn clean_salary(salary: &str) -> Option<f64> {
    let values: Vec<u64> = SALARY_NUMBER
        .find_iter(salary)
        .filter_map(|token| {
            let value = parse_figure(token.as_str());
            if value.is_none() {
                warn!("Ignoring out of range salary figure '{}'", token.as_str());
            }
            value
        })
        .collect();

    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    Some(sum / values.len() as f64)
}

/// Value of a matched figure with separators stripped. `None` on overflow.
fn parse_figure(token: &str) -> Option<u64> {
    token
        .chars()
        .filter(|&c| c != ',')
        .try_fold(0u64, |acc, c| {
            acc.checked_mul(10)?.checked_add(u64::from(digit_value(c)?))
        })
}

/// Numeric value of a decimal digit in any script.
///
/// Unicode assigns decimal digits in contiguous runs of ten starting at
/// zero, so the value is the offset from the start of the run, modulo 10.
fn digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = c as u32;
    while let Some(prev) = start
        .checked_sub(1)
        .and_then(char::from_u32)
        .filter(|&p| is_decimal_digit(p))
    {
        start = prev as u32;
    }
    Some((c as u32 - start) % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Abbreviated label used to bucket salaries
pub fn format_salary(salary: f64) -> String {
    if salary >= 1_000_000.0 {
        format!("{:.1} mil", salary / 1_000_000.0)
    } else if salary >= 1_000.0 {
        format!("{:.1} k", salary / 1_000.0)
    } else {
        format!("{}", salary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NOT_AVAILABLE;

    fn raw(title: &str, salary: &str) -> RawListing {
        RawListing {
            title: title.to_string(),
            salary_text: salary.to_string(),
            ..RawListing::unavailable()
        }
    }

    #[test]
    fn test_clean_salary() {
        assert_eq!(clean_salary("1,000,000"), Some(1_000_000.0));
        assert_eq!(clean_salary("N/A"), None);
        assert_eq!(clean_salary("500,000 - 700,000"), Some(600_000.0));
        assert_eq!(clean_salary("Negotiable"), None);
        assert_eq!(clean_salary(""), None);
    }

    #[test]
    fn test_clean_salary_is_mean_of_all_numbers() {
        assert_eq!(clean_salary("from 1 to 2, bonus 6"), Some(3.0));
        assert_eq!(clean_salary("800,000₮ - 1,200,000₮"), Some(1_000_000.0));
    }

    #[test]
    fn test_clean_salary_ignores_stray_commas() {
        assert_eq!(clean_salary(", 1,200 ,"), Some(1_200.0));
        assert_eq!(clean_salary(",,,"), None);
    }

    #[test]
    fn test_clean_salary_skips_overflowing_tokens() {
        assert_eq!(clean_salary("99999999999999999999999 or 10"), Some(10.0));
    }

    #[test]
    fn test_clean_salary_reads_non_ascii_digits() {
        // Mongolian ᠑᠐᠐
        assert_eq!(clean_salary("\u{1811}\u{1810}\u{1810}"), Some(100.0));
        // Fullwidth １,５００
        assert_eq!(clean_salary("\u{FF11},\u{FF15}\u{FF10}\u{FF10}"), Some(1_500.0));
        // Mathematical double-struck 2 sits in the second of five adjacent runs.
        assert_eq!(clean_salary("\u{1D7DA}"), Some(2.0));
        assert_eq!(clean_salary("\u{1811}\u{1810}\u{1810} - 300"), Some(200.0));
    }

    #[test]
    fn test_digit_value() {
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('\u{1819}'), Some(9));
        assert_eq!(digit_value('\u{FF10}'), Some(0));
        assert_eq!(digit_value('a'), None);
        assert_eq!(digit_value(','), None);
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(1_500_000.0), "1.5 mil");
        assert_eq!(format_salary(2_500.0), "2.5 k");
        assert_eq!(format_salary(800.0), "800");
        assert_eq!(format_salary(1_000_000.0), "1.0 mil");
        assert_eq!(format_salary(1_000.0), "1.0 k");
        assert_eq!(format_salary(999.5), "999.5");
    }

    #[test]
    fn test_normalize_preserves_order_and_length() {
        let listings = normalize(vec![
            raw("First", "2,000"),
            raw("Second", NOT_AVAILABLE),
            raw("First", "2,000"),
        ]);
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].title(), "First");
        assert_eq!(listings[1].title(), "Second");
        assert_eq!(listings[2].title(), "First");
    }

    #[test]
    fn test_missing_salary_has_no_value_or_label() {
        let listing = normalize_listing(raw("Cook", NOT_AVAILABLE));
        assert_eq!(listing.salary_value, None);
        assert_eq!(listing.formatted_salary, None);
        assert_eq!(listing.raw.salary_text, NOT_AVAILABLE);
    }

    #[test]
    fn test_label_present_with_value() {
        let listing = normalize_listing(raw("Cook", "1,200,000 - 1,800,000"));
        assert_eq!(listing.salary_value, Some(1_500_000.0));
        assert_eq!(listing.formatted_salary.as_deref(), Some("1.5 mil"));
    }
}
