use std::sync::LazyLock;

use regex::Regex;

const NAME_PATTERN: &str = r"^[A-Z][a-z]*[ ][A-Z][a-z]*$";
const PHONE_PATTERN: &str = r"^0(212|412|414|424|416|426)[0-9]{7}$";

// A pattern that fails to compile matches nothing
static NAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(NAME_PATTERN).ok());
static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PHONE_PATTERN).ok());

pub fn validate_name(name: Option<&str>) -> bool {
    // Two words separated by a single space
    // Each word is one uppercase letter followed by lowercase letters
    name.is_some_and(|name| matches_pattern(&NAME_RE, name))
}

pub fn validate_phone(phone: Option<&str>) -> bool {
    // Exactly 11 digits: leading 0, a known area code, then 7 digits
    phone.is_some_and(|phone| matches_pattern(&PHONE_RE, phone))
}

fn matches_pattern(re: &LazyLock<Option<Regex>>, input: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_two_capitalized_words() {
        assert!(validate_name(Some("Gabriel Garcia")));
        assert!(validate_name(Some("A B")));
        assert!(validate_name(Some("Alejandro Perez")));
    }

    #[test]
    fn rejects_malformed_names() {
        let invalid = [
            "Gabriel",
            "gabriel Garcia",
            "Gabriel garcia",
            "Gabriel  Garcia",
            "Gabriel Garcia Marquez",
            " Gabriel Garcia",
            "Gabriel Garcia ",
            "GAbriel Garcia",
            "José Garcia",
            "Gabriel\tGarcia",
            "Gabriel Garcia\n",
            "",
        ];

        for name in invalid {
            assert!(!validate_name(Some(name)), "{name:?} should be rejected");
        }
    }

    #[test]
    fn absent_values_are_invalid() {
        assert!(!validate_name(None));
        assert!(!validate_phone(None));
    }

    #[test]
    fn patterns_compile_once_and_are_reused() {
        assert!(NAME_RE.is_some());
        assert!(PHONE_RE.is_some());

        for _ in 0..3 {
            assert!(validate_name(Some("Gabriel Garcia")));
            assert!(validate_phone(Some("04122110509")));
        }
    }

    #[test]
    fn accepts_every_area_code() {
        for code in ["212", "412", "414", "424", "416", "426"] {
            let phone = format!("0{code}1234567");
            assert!(validate_phone(Some(&phone)), "{phone} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_phones() {
        let invalid = [
            "04122",
            "041221110608",
            "0412211050",
            "14122110509",
            "04132110509",
            "0412211050a",
            "+5804122110",
            "0412 211050",
            "04122110509\n",
            "",
        ];

        for phone in invalid {
            assert!(!validate_phone(Some(phone)), "{phone:?} should be rejected");
        }
    }
}
