//! Input masks applied to raw keystrokes before validation.

/// Groups the PAN digits in blocks of 4 separated by single spaces,
/// dropping anything that is not a digit. No trailing separator.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);

    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && position % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(*digit);
    }

    formatted
}

/// Masks the expiry as `MM/YY`: digits only, capped at 4, with the slash
/// inserted once at least two digits are present.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(4).collect();

    if digits.len() >= 2 {
        return format!("{}/{}", &digits[..2], &digits[2..]);
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number_groups_of_four() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("411111111111111"), "4111 1111 1111 111");
        assert_eq!(format_card_number("4111"), "4111");
        assert_eq!(format_card_number("41"), "41");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_card_number_strips_non_digits() {
        assert_eq!(format_card_number("4111-1111 2222x3333"), "4111 1111 2222 3333");
    }

    #[test]
    fn test_format_expiry_inserts_slash() {
        assert_eq!(format_expiry("1225"), "12/25");
        assert_eq!(format_expiry("122"), "12/2");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry(""), "");
    }

    #[test]
    fn test_format_expiry_caps_at_four_digits() {
        assert_eq!(format_expiry("122534"), "12/25");
        assert_eq!(format_expiry("12/25"), "12/25");
    }
}
