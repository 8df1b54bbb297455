//! Pure validators for the card form fields.

use crate::consts;
use chrono::{Datelike, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Card network detected from the leading digits of the PAN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum CardNetwork {
    #[display("visa")]
    Visa,
    #[display("mastercard")]
    Mastercard,
    #[display("amex")]
    Amex,
    #[display("discover")]
    Discover,
    #[display("troy")]
    Troy,
    #[display("unionpay")]
    UnionPay,
    #[default]
    #[display("unknown")]
    Unknown,
}

impl CardNetwork {
    /// Matches the numeric prefix in fixed priority order; first match wins.
    pub fn detect(number: &str) -> Self {
        let cleaned = digits_of(number);

        if cleaned.starts_with('4') {
            return Self::Visa;
        }
        if let Some(prefix) = cleaned.get(..2) {
            if ("51"..="55").contains(&prefix) {
                return Self::Mastercard;
            }
        }
        if cleaned.starts_with("34") || cleaned.starts_with("37") {
            return Self::Amex;
        }
        if cleaned.starts_with("6011") || cleaned.starts_with("65") {
            return Self::Discover;
        }
        if cleaned.starts_with("9792") {
            return Self::Troy;
        }
        if cleaned.starts_with("62") {
            return Self::UnionPay;
        }

        Self::Unknown
    }

    /// Security code length the network expects
    pub fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }
}

/// Keeps only the ascii digits of `value`
pub fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Standard card checksum: right-to-left, every second digit doubled and
/// folded back under 10, total must be divisible by 10. Length is enforced
/// by the caller; any non-digit besides whitespace fails the check.
pub fn luhn_check(number: &str) -> bool {
    let mut sum = 0u32;

    for (position, ch) in number
        .chars()
        .rev()
        .filter(|c| !c.is_whitespace())
        .enumerate()
    {
        let Some(mut digit) = ch.to_digit(10) else {
            return false;
        };

        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }

        sum += digit;
    }

    sum % 10 == 0
}

/// Validates an `MM/YY` expiry against the current calendar month.
pub fn validate_expiry(expiry: &str) -> bool {
    validate_expiry_at(expiry, Utc::now().date_naive())
}

/// Clock-injected variant of [validate_expiry].
///
/// The two-digit year is resolved into a four-digit one through a
/// future-biased window: candidates landing more than
/// [consts::EXPIRY_PAST_WINDOW_YEARS] years in the past roll into the next
/// century.
pub fn validate_expiry_at(expiry: &str, today: NaiveDate) -> bool {
    let Some((month_part, year_part)) = expiry.split_once('/') else {
        return false;
    };
    let (Ok(month), Ok(two_digit_year)) = (month_part.parse::<u32>(), year_part.parse::<i32>())
    else {
        return false;
    };

    if !(1..=12).contains(&month) || !(0..=99).contains(&two_digit_year) {
        return false;
    }

    let year = resolve_two_digit_year(two_digit_year, today.year());
    if year < today.year() {
        return false;
    }
    if year == today.year() && month < today.month() {
        return false;
    }

    true
}

fn resolve_two_digit_year(two_digit_year: i32, current_year: i32) -> i32 {
    let mut candidate = (current_year / 100) * 100 + two_digit_year;
    if candidate < current_year - consts::EXPIRY_PAST_WINDOW_YEARS {
        candidate += 100;
    }

    candidate
}

/// The security code must be all digits with the exact length the detected
/// network expects (4 for amex, 3 otherwise).
pub fn validate_cvv(cvv: &str, network: CardNetwork) -> bool {
    cvv.len() == network.cvv_length() && cvv.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_check_valid_numbers() {
        let valid_list = [
            "4539 1488 0343 6467",
            "4111111111111111",
            "5105105105105100",
            "371449635398431",
            "6011000000000004",
        ];
        for valid in valid_list {
            assert!(luhn_check(valid), "{valid} should pass the checksum");
        }
    }

    #[test]
    fn test_luhn_check_single_digit_change() {
        assert!(luhn_check("4539148803436467"));
        assert!(!luhn_check("4539148803436468"));
        assert!(!luhn_check("4538148803436467"));
    }

    #[test]
    fn test_luhn_check_rejects_non_digits() {
        assert!(!luhn_check("4111-1111-1111-1111"));
        assert!(!luhn_check("abcd"));
    }

    #[test]
    fn test_detect_network() {
        let cases = [
            ("4111111111111111", CardNetwork::Visa),
            ("5105105105105100", CardNetwork::Mastercard),
            ("5500000000000004", CardNetwork::Mastercard),
            ("371449635398431", CardNetwork::Amex),
            ("341449635398431", CardNetwork::Amex),
            ("6011000000000004", CardNetwork::Discover),
            ("6500000000000002", CardNetwork::Discover),
            ("9792000000000001", CardNetwork::Troy),
            ("6200000000000005", CardNetwork::UnionPay),
            ("1234567890123456", CardNetwork::Unknown),
            ("", CardNetwork::Unknown),
        ];
        for (number, expected) in cases {
            assert_eq!(CardNetwork::detect(number), expected, "number: {number}");
        }
    }

    #[test]
    fn test_detect_network_ignores_grouping_spaces() {
        assert_eq!(
            CardNetwork::detect("5105 1051 0510 5100"),
            CardNetwork::Mastercard
        );
    }

    #[test]
    fn test_validate_expiry_at_current_month_is_valid() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(validate_expiry_at("08/26", today));
        assert!(validate_expiry_at("12/26", today));
        assert!(validate_expiry_at("01/27", today));
    }

    #[test]
    fn test_validate_expiry_at_past_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(!validate_expiry_at("07/26", today));
        assert!(!validate_expiry_at("12/25", today));
    }

    #[test]
    fn test_validate_expiry_at_month_out_of_range() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(!validate_expiry_at("13/30", today));
        assert!(!validate_expiry_at("00/30", today));
    }

    #[test]
    fn test_validate_expiry_at_malformed_input() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(!validate_expiry_at("1226", today));
        assert!(!validate_expiry_at("12/", today));
        assert!(!validate_expiry_at("/26", today));
        assert!(!validate_expiry_at("aa/bb", today));
        assert!(!validate_expiry_at("", today));
    }

    #[test]
    fn test_validate_expiry_at_century_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        // "99" stays in this century, "01" rolls into the next one
        assert!(validate_expiry_at("12/99", today));
        assert!(validate_expiry_at("01/01", today));
        // window lower bound: 2006 resolves as a past year
        assert!(!validate_expiry_at("12/06", today));
    }

    #[test]
    fn test_validate_cvv_lengths_per_network() {
        assert!(validate_cvv("1234", CardNetwork::Amex));
        assert!(!validate_cvv("123", CardNetwork::Amex));
        assert!(validate_cvv("123", CardNetwork::Visa));
        assert!(!validate_cvv("1234", CardNetwork::Visa));
        assert!(validate_cvv("123", CardNetwork::Unknown));
    }

    #[test]
    fn test_validate_cvv_rejects_non_digits() {
        assert!(!validate_cvv("12a", CardNetwork::Visa));
        assert!(!validate_cvv("", CardNetwork::Visa));
    }
}
