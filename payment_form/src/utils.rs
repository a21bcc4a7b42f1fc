//! Helper functions could be used in api/, forms/, services/, ...

use std::sync::LazyLock;

/// Client to make http requests
pub static REQUEST_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Keeps only ascii digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Hides everything but the last four characters, for logs
pub fn mask_digits(value: &str) -> String {
    let len = value.chars().count();
    let visible = len.min(4);
    let mut masked = "*".repeat(len - visible);
    masked.extend(value.chars().skip(len - visible));
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("4111-1111 abc 22"), "4111111122");
        assert_eq!(digits_only(""), "");
        assert_eq!(digits_only("١٢٣"), "");
    }

    #[test]
    fn test_is_all_digits_rejects_empty() {
        assert!(is_all_digits("0123"));
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("12 3"));
    }

    #[test]
    fn test_mask_digits() {
        assert_eq!(mask_digits("4111111111111111"), "************1111");
        assert_eq!(mask_digits("123"), "123");
        assert_eq!(mask_digits(""), "");
    }
}
