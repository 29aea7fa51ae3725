// helpers for the column-oriented byte fields

pub fn parse_bytes<T: std::str::FromStr>(b: &[u8]) -> Option<T> {
    std::str::from_utf8(b).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_with_leading_zero() {
        assert_eq!(Some(123), parse_bytes::<u32>(b"0123"));
    }

    #[test]
    fn parse_negative_i32() {
        assert_eq!(Some(-53), parse_bytes::<i32>(b"-00053"));
    }

    #[test]
    fn parse_fail_on_non_utf8() {
        assert_eq!(None, parse_bytes::<u32>(b"\xF0\xA4\xAD"));
    }

    #[test]
    fn parse_fail_on_not_a_number() {
        assert_eq!(None, parse_bytes::<u32>(b"12ab"));
        assert_eq!(None, parse_bytes::<u32>(b"1 2"));
    }
}
