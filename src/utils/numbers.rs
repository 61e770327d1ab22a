//! Lenient number parsing

/// Returned by [`parse_int`] when the text is absent or not a valid integer
pub const PARSE_FAILED: i32 = -1;

/// Parse a decimal `i32`, falling back to [`PARSE_FAILED`].
///
/// Used for tag fields such as track and disc numbers where a bad value
/// should not abort the caller.
pub fn parse_int(text: Option<&str>) -> i32 {
    text.and_then(|t| t.parse::<i32>().ok())
        .unwrap_or(PARSE_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(Some("12")), 12);
        assert_eq!(parse_int(Some("-7")), -7);
        assert_eq!(parse_int(Some("+3")), 3);
    }

    #[test]
    fn test_parse_int_sentinel() {
        assert_eq!(parse_int(None), PARSE_FAILED);
        assert_eq!(parse_int(Some("")), PARSE_FAILED);
        assert_eq!(parse_int(Some("3/12")), PARSE_FAILED);
        assert_eq!(parse_int(Some(" 4")), PARSE_FAILED);
        assert_eq!(parse_int(Some("99999999999")), PARSE_FAILED);
    }
}
