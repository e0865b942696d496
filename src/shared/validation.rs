use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating student contact numbers.
    /// Exactly ten digits, no separators.
    /// - Valid: "9876543210"
    /// - Invalid: "98765", "+919876543210", "98765 43210"
    pub static ref CONTACT_NUMBER_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();

    /// Regex for validating standard codes after uppercase normalization.
    /// Must start with a letter or digit; dots, hyphens and single spaces allowed inside.
    /// - Valid: "STD10", "B.TECH", "STD-12"
    /// - Invalid: "-STD", "STD ", ""
    pub static ref STANDARD_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9](?:[A-Z0-9.\-]|\s[A-Z0-9.])*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_number_regex_valid() {
        assert!(CONTACT_NUMBER_REGEX.is_match("9876543210"));
        assert!(CONTACT_NUMBER_REGEX.is_match("0000000000"));
    }

    #[test]
    fn test_contact_number_regex_invalid() {
        assert!(!CONTACT_NUMBER_REGEX.is_match("98765")); // too short
        assert!(!CONTACT_NUMBER_REGEX.is_match("98765432101")); // too long
        assert!(!CONTACT_NUMBER_REGEX.is_match("+919876543210")); // country prefix
        assert!(!CONTACT_NUMBER_REGEX.is_match("98765 43210")); // space
        assert!(!CONTACT_NUMBER_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_standard_code_regex_valid() {
        assert!(STANDARD_CODE_REGEX.is_match("STD10"));
        assert!(STANDARD_CODE_REGEX.is_match("B.TECH"));
        assert!(STANDARD_CODE_REGEX.is_match("STD-12"));
        assert!(STANDARD_CODE_REGEX.is_match("STD 10"));
    }

    #[test]
    fn test_standard_code_regex_invalid() {
        assert!(!STANDARD_CODE_REGEX.is_match("-STD")); // starts with hyphen
        assert!(!STANDARD_CODE_REGEX.is_match("STD ")); // trailing space
        assert!(!STANDARD_CODE_REGEX.is_match("std10")); // not normalized
        assert!(!STANDARD_CODE_REGEX.is_match("")); // empty
    }
}
