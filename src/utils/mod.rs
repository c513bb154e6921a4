pub mod code_gen;

pub use code_gen::{CODE_ALPHABET, generate_random_code};

/// Longest code accepted from callers.
pub const MAX_CODE_LENGTH: usize = 64;

/// 校验用户提供的短码：非空、仅 ASCII 字母数字、长度不超过上限
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_short_codes() {
        assert!(is_valid_short_code("abc"));
        assert!(is_valid_short_code("A1b2C3"));
        assert!(is_valid_short_code(&"x".repeat(MAX_CODE_LENGTH)));
    }

    #[test]
    fn test_invalid_short_codes() {
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("slash/code"));
        assert!(!is_valid_short_code("ünï"));
        assert!(!is_valid_short_code(&"x".repeat(MAX_CODE_LENGTH + 1)));
    }
}
