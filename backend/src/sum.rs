//! Digit-string summation.
//!
//! Only elements that are strings made entirely of ASCII decimal digits
//! contribute to the sum. Everything else (null, non-strings, empty strings,
//! signs, decimal points, whitespace) is skipped without error.

use num_bigint::BigUint;
use tally_types::Entry;

/// Returns true if `s` is non-empty and every character is in `'0'..='9'`.
pub fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Sum every digit-string element of `entries`.
///
/// Never fails: the total is unbounded, so arbitrarily long digit strings
/// are added exactly.
pub fn sum_entries(entries: &[Entry]) -> BigUint {
    entries
        .iter()
        .filter_map(Entry::as_text)
        .filter(|s| is_digit_string(s))
        .filter_map(|s| BigUint::parse_bytes(s.as_bytes(), 10))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn entries(items: &[Option<&str>]) -> Vec<Entry> {
        items.iter().copied().map(Entry::from).collect()
    }

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_skips_null_and_words() {
        assert_eq!(
            sum_entries(&entries(&[Some("3"), None, Some("x"), Some("12")])),
            big(15)
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(sum_entries(&[]), big(0));
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(sum_entries(&entries(&[Some("007")])), big(7));
    }

    #[test]
    fn test_rejects_sign_whitespace_and_decimals() {
        assert_eq!(sum_entries(&entries(&[Some("-5")])), big(0));
        assert_eq!(sum_entries(&entries(&[Some(" 5")])), big(0));
        assert_eq!(sum_entries(&entries(&[Some("5 ")])), big(0));
        assert_eq!(sum_entries(&entries(&[Some("+5")])), big(0));
        assert_eq!(sum_entries(&entries(&[Some("1.5")])), big(0));
        assert_eq!(sum_entries(&entries(&[Some("")])), big(0));
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Superscript two and Arabic-Indic five
        assert!(!is_digit_string("\u{00B2}"));
        assert!(!is_digit_string("\u{0665}"));
        assert_eq!(sum_entries(&entries(&[Some("\u{0665}"), Some("1")])), big(1));
    }

    #[test]
    fn test_skips_non_string_json() {
        let items = vec![
            Entry::from(json!(5)),
            Entry::from(json!(true)),
            Entry::from(json!(["1"])),
            Entry::from("2"),
        ];
        assert_eq!(sum_entries(&items), big(2));
    }

    #[test]
    fn test_sums_beyond_64_bits() {
        assert_eq!(
            sum_entries(&entries(&[Some("18446744073709551615"), Some("1")])).to_string(),
            "18446744073709551616"
        );
        assert_eq!(
            sum_entries(&entries(&[Some("99999999999999999999999")])).to_string(),
            "99999999999999999999999"
        );
        assert_eq!(
            sum_entries(&entries(&[Some("99999999999999999999999"), Some("x"), Some("1")]))
                .to_string(),
            "100000000000000000000000"
        );
    }

    proptest! {
        #[test]
        fn sum_matches_arithmetic_sum(
            values in prop::collection::vec(prop::option::of(0u32..1_000_000), 0..50)
        ) {
            let items: Vec<Entry> = values
                .iter()
                .map(|v| v.map_or(Entry::Null, |n| Entry::Text(n.to_string())))
                .collect();
            let expected: u64 = values.iter().flatten().map(|&n| u64::from(n)).sum();
            prop_assert_eq!(sum_entries(&items), big(expected));
        }

        #[test]
        fn non_digit_strings_never_contribute(s in ".*[^0-9].*") {
            prop_assert!(!is_digit_string(&s));
            prop_assert_eq!(sum_entries(&[Entry::Text(s)]), big(0));
        }

        #[test]
        fn sum_is_deterministic(values in prop::collection::vec("[0-9a-z ]{0,6}", 0..30)) {
            let items: Vec<Entry> = values.iter().map(|s| Entry::from(s.as_str())).collect();
            prop_assert_eq!(sum_entries(&items), sum_entries(&items));
        }
    }
}
