//! The four APRS timestamp formats.
//!
//! Seven bytes after the data type identifier, with the seventh byte
//! selecting the variant: `z` day/hour/minute zulu, `/` day/hour/minute
//! local, `h` hour/minute/second zulu. A digit in the seventh column means
//! the month/day/hour/minute form, which is eight digits with no suffix.

use std::io::Write;

use crate::bytes::parse_bytes;
use crate::{DecodeError, EncodeError};

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub enum Timestamp {
    /// Day of month, hour and minute in UTC
    DhmZulu(u8, u8, u8),
    /// Day of month, hour and minute in station-local time
    DhmLocal(u8, u8, u8),
    /// Hour, minute and second in UTC
    Hms(u8, u8, u8),
    /// Month, day of month, hour and minute in UTC
    Mdhm(u8, u8, u8, u8),
}

impl Timestamp {
    pub fn new_dhm_zulu(day: u8, hour: u8, minute: u8) -> Option<Self> {
        valid_dhm(day, hour, minute).then_some(Self::DhmZulu(day, hour, minute))
    }

    pub fn new_dhm_local(day: u8, hour: u8, minute: u8) -> Option<Self> {
        valid_dhm(day, hour, minute).then_some(Self::DhmLocal(day, hour, minute))
    }

    pub fn new_hms(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour <= 23 && minute <= 59 && second <= 59).then_some(Self::Hms(hour, minute, second))
    }

    pub fn new_mdhm(month: u8, day: u8, hour: u8, minute: u8) -> Option<Self> {
        ((1..=12).contains(&month) && valid_dhm(day, hour, minute))
            .then_some(Self::Mdhm(month, day, hour, minute))
    }

    /// Bytes this timestamp occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Mdhm(..) => 8,
            _ => 7,
        }
    }

    /// Decodes a timestamp from the head of `b` and reports how many bytes
    /// it consumed (7, or 8 for the month/day form).
    pub(crate) fn decode(b: &[u8]) -> Result<(Self, usize), DecodeError> {
        let head = b
            .get(..7)
            .ok_or_else(|| DecodeError::InvalidTimestamp(b.to_vec()))?;

        match head[6] {
            b'z' | b'/' | b'h' => {
                if !head[..6].iter().all(u8::is_ascii_digit) {
                    return Err(DecodeError::InvalidTimestamp(head.to_vec()));
                }

                let one = parse_bytes(&head[0..2])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;
                let two = parse_bytes(&head[2..4])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;
                let three = parse_bytes(&head[4..6])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;

                let ts = match head[6] {
                    b'z' => Self::new_dhm_zulu(one, two, three),
                    b'/' => Self::new_dhm_local(one, two, three),
                    _ => Self::new_hms(one, two, three),
                };

                ts.map(|ts| (ts, 7))
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))
            }
            b'0'..=b'9' => {
                let head = b
                    .get(..8)
                    .ok_or_else(|| DecodeError::InvalidTimestamp(b.to_vec()))?;

                if !head.iter().all(u8::is_ascii_digit) {
                    return Err(DecodeError::InvalidTimestamp(head.to_vec()));
                }

                let month = parse_bytes(&head[0..2])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;
                let day = parse_bytes(&head[2..4])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;
                let hour = parse_bytes(&head[4..6])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;
                let minute = parse_bytes(&head[6..8])
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))?;

                Self::new_mdhm(month, day, hour, minute)
                    .map(|ts| (ts, 8))
                    .ok_or_else(|| DecodeError::InvalidTimestamp(head.to_vec()))
            }
            _ => Err(DecodeError::InvalidTimestamp(head.to_vec())),
        }
    }

    pub fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        match self {
            Self::DhmZulu(d, h, m) => write!(buf, "{:02}{:02}{:02}z", d, h, m)?,
            Self::DhmLocal(d, h, m) => write!(buf, "{:02}{:02}{:02}/", d, h, m)?,
            Self::Hms(h, m, s) => write!(buf, "{:02}{:02}{:02}h", h, m, s)?,
            Self::Mdhm(mo, d, h, m) => write!(buf, "{:02}{:02}{:02}{:02}", mo, d, h, m)?,
        };

        Ok(())
    }
}

fn valid_dhm(day: u8, hour: u8, minute: u8) -> bool {
    (1..=31).contains(&day) && hour <= 23 && minute <= 59
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dhm_zulu() {
        assert_eq!(
            Timestamp::decode(&b"092345z"[..]),
            Ok((Timestamp::DhmZulu(9, 23, 45), 7))
        );
    }

    #[test]
    fn parse_dhm_local() {
        assert_eq!(
            Timestamp::decode(&b"092345/"[..]),
            Ok((Timestamp::DhmLocal(9, 23, 45), 7))
        );
    }

    #[test]
    fn parse_hms() {
        assert_eq!(
            Timestamp::decode(&b"074849h"[..]),
            Ok((Timestamp::Hms(7, 48, 49), 7))
        );
    }

    #[test]
    fn parse_mdhm() {
        assert_eq!(
            Timestamp::decode(&b"10092345"[..]),
            Ok((Timestamp::Mdhm(10, 9, 23, 45), 8))
        );
    }

    #[test]
    fn parse_ignores_trailing_bytes() {
        assert_eq!(
            Timestamp::decode(&b"092345z4903.50N"[..]),
            Ok((Timestamp::DhmZulu(9, 23, 45), 7))
        );
    }

    #[test]
    fn reject_unknown_suffix() {
        assert_eq!(
            Timestamp::decode(&b"123456x"[..]),
            Err(DecodeError::InvalidTimestamp(b"123456x".to_vec()))
        );
    }

    #[test]
    fn reject_non_digits() {
        assert_eq!(
            Timestamp::decode(&b"12a456z"[..]),
            Err(DecodeError::InvalidTimestamp(b"12a456z".to_vec()))
        );
    }

    #[test]
    fn reject_out_of_range() {
        // hour 24
        assert_eq!(
            Timestamp::decode(&b"092445z"[..]),
            Err(DecodeError::InvalidTimestamp(b"092445z".to_vec()))
        );
        // day 0
        assert_eq!(
            Timestamp::decode(&b"002345z"[..]),
            Err(DecodeError::InvalidTimestamp(b"002345z".to_vec()))
        );
        // month 13
        assert_eq!(
            Timestamp::decode(&b"13092345"[..]),
            Err(DecodeError::InvalidTimestamp(b"13092345".to_vec()))
        );
    }

    #[test]
    fn reject_truncated_mdhm() {
        assert!(Timestamp::decode(&b"1009234"[..]).is_err());
    }

    #[test]
    fn encode_widths() {
        let mut buf = vec![];
        Timestamp::DhmZulu(9, 23, 45).encode(&mut buf).unwrap();
        assert_eq!(b"092345z"[..], buf);

        let mut buf = vec![];
        Timestamp::DhmLocal(9, 23, 45).encode(&mut buf).unwrap();
        assert_eq!(b"092345/"[..], buf);

        let mut buf = vec![];
        Timestamp::Hms(7, 48, 49).encode(&mut buf).unwrap();
        assert_eq!(b"074849h"[..], buf);

        let mut buf = vec![];
        Timestamp::Mdhm(1, 9, 2, 5).encode(&mut buf).unwrap();
        assert_eq!(b"01090205"[..], buf);
    }

    #[test]
    fn constructors_validate() {
        assert!(Timestamp::new_dhm_zulu(31, 23, 59).is_some());
        assert!(Timestamp::new_dhm_zulu(32, 0, 0).is_none());
        assert!(Timestamp::new_hms(23, 59, 59).is_some());
        assert!(Timestamp::new_hms(0, 0, 60).is_none());
        assert!(Timestamp::new_mdhm(12, 31, 23, 59).is_some());
        assert!(Timestamp::new_mdhm(0, 1, 0, 0).is_none());
    }
}
