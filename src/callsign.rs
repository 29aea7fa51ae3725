use std::fmt::{Display, Formatter};
use std::io::{self, Write};

use crate::{DecodeError, EncodeError};

/// reserved bits of the SSID octet, always set on the air
const SSID_RESERVED: u8 = 0x60;

#[derive(Eq, PartialEq, Clone, Debug, Hash)]
pub struct Callsign {
    call: String,
    ssid: u8,
}

impl Callsign {
    /// Creates a callsign that satisfies the strict AX.25 invariant:
    /// 1-6 ASCII alphanumerics and an SSID in 0..=15.
    pub fn new<T: Into<String>>(call: T, ssid: u8) -> Option<Self> {
        let call = call.into();

        if call.is_empty()
            || call.len() > 6
            || !call.bytes().all(|b| b.is_ascii_alphanumeric())
            || ssid > 15
        {
            return None;
        }

        Some(Self { call, ssid })
    }

    pub fn call(&self) -> &str {
        &self.call
    }

    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    /// Parses the TNC2 form `BASE[-SSID][*]`.
    ///
    /// The returned flag is the trailing-`*` heard marker. APRS-IS is
    /// sloppier than the AX.25 invariant (lowercase bases, server
    /// identifiers longer than six characters), so anything non-empty and
    /// alphanumeric is accepted here and preserved as-is; the strict check
    /// happens when encoding to AX.25.
    pub fn decode_textual(b: &[u8]) -> Result<(Self, bool), DecodeError> {
        let (bare, heard) = match b.split_last() {
            Some((b'*', rest)) => (rest, true),
            _ => (b, false),
        };

        let s = std::str::from_utf8(bare).map_err(|_| DecodeError::InvalidCallsign(b.to_vec()))?;

        let (call, ssid) = match s.split_once('-') {
            Some((call, ssid)) => {
                let ssid = ssid
                    .parse::<u8>()
                    .ok()
                    .filter(|&ssid| ssid <= 15)
                    .ok_or_else(|| DecodeError::InvalidSsid(b.to_vec()))?;
                (call, ssid)
            }
            None => (s, 0),
        };

        if call.is_empty() || !call.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(DecodeError::InvalidCallsign(b.to_vec()));
        }

        Ok((
            Self {
                call: call.to_owned(),
                ssid,
            },
            heard,
        ))
    }

    pub fn encode_textual<W: Write>(&self, heard: bool, w: &mut W) -> io::Result<()> {
        write!(w, "{}", self)?;

        if heard {
            write!(w, "*")?;
        }

        Ok(())
    }

    /// Decodes a 7-byte AX.25 address block.
    ///
    /// Returns the callsign, the H-bit and the extension bit.
    pub(crate) fn decode_ax25(b: &[u8; 7]) -> Result<(Self, bool, bool), DecodeError> {
        let mut call = String::with_capacity(6);

        for &byte in &b[..6] {
            call.push(char::from(byte >> 1));
        }

        let call = call.trim_end_matches(' ').to_owned();
        let ssid = (b[6] >> 1) & 0x0F;
        let heard = b[6] & 0x80 != 0;
        let last = b[6] & 0x01 != 0;

        if call.is_empty() || !call.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(DecodeError::InvalidAddress(b.to_vec()));
        }

        Ok((Self { call, ssid }, heard, last))
    }

    /// Encodes a 7-byte AX.25 address block.
    ///
    /// Strict: the base must be 1-6 uppercase alphanumerics. `last` sets
    /// the extension bit, `heard` the H-bit.
    pub(crate) fn encode_ax25<W: Write>(
        &self,
        heard: bool,
        last: bool,
        w: &mut W,
    ) -> Result<(), EncodeError> {
        if self.call.len() > 6
            || !self
                .call
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(EncodeError::InvalidCallsign(self.call.clone()));
        }

        let mut addr = [b' ' << 1; 7];

        for (slot, byte) in addr.iter_mut().zip(self.call.bytes()) {
            *slot = byte << 1;
        }

        let mut ssid = SSID_RESERVED | (self.ssid << 1);
        if heard {
            ssid |= 0x80;
        }
        if last {
            ssid |= 0x01;
        }
        addr[6] = ssid;

        w.write_all(&addr)?;

        Ok(())
    }
}

impl Display for Callsign {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.call)?;

        if self.ssid > 0 {
            write!(f, "-{}", self.ssid)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare() {
        assert_eq!(
            Callsign::decode_textual(b"N0CALL").unwrap(),
            (Callsign::new("N0CALL", 0).unwrap(), false)
        );
    }

    #[test]
    fn parse_with_ssid() {
        assert_eq!(
            Callsign::decode_textual(b"KF7HVM-2").unwrap(),
            (Callsign::new("KF7HVM", 2).unwrap(), false)
        );
    }

    #[test]
    fn parse_heard() {
        assert_eq!(
            Callsign::decode_textual(b"WIDE1-1*").unwrap(),
            (Callsign::new("WIDE1", 1).unwrap(), true)
        );
    }

    #[test]
    fn parse_aprs_is_server_id() {
        // longer than any AX.25 address, but common on APRS-IS paths
        let (c, heard) = Callsign::decode_textual(b"T2FINLAND").unwrap();
        assert_eq!(c.call(), "T2FINLAND");
        assert_eq!(c.ssid(), 0);
        assert!(!heard);
    }

    #[test]
    fn parse_rejects_empty_base() {
        assert_eq!(
            Callsign::decode_textual(b"-4"),
            Err(DecodeError::InvalidCallsign(b"-4".to_vec()))
        );
    }

    #[test]
    fn parse_rejects_bad_ssid() {
        assert_eq!(
            Callsign::decode_textual(b"N0CALL-16"),
            Err(DecodeError::InvalidSsid(b"N0CALL-16".to_vec()))
        );
        assert_eq!(
            Callsign::decode_textual(b"N0CALL-"),
            Err(DecodeError::InvalidSsid(b"N0CALL-".to_vec()))
        );
    }

    #[test]
    fn new_enforces_ax25_invariant() {
        assert!(Callsign::new("N0CALL", 15).is_some());
        assert!(Callsign::new("TOOLONG", 0).is_none());
        assert!(Callsign::new("", 0).is_none());
        assert!(Callsign::new("N0CALL", 16).is_none());
        assert!(Callsign::new("N0 CAL", 0).is_none());
    }

    #[test]
    fn display() {
        assert_eq!("N0CALL", format!("{}", Callsign::new("N0CALL", 0).unwrap()));
        assert_eq!(
            "KF7HVM-2",
            format!("{}", Callsign::new("KF7HVM", 2).unwrap())
        );
    }

    #[test]
    fn ax25_roundtrip() {
        let callsign = Callsign::new("W1AW", 7).unwrap();
        let mut buf = vec![];
        callsign.encode_ax25(true, true, &mut buf).unwrap();
        assert_eq!(buf.len(), 7);

        let mut raw = [0u8; 7];
        raw.copy_from_slice(&buf);
        let (decoded, heard, last) = Callsign::decode_ax25(&raw).unwrap();
        assert_eq!(decoded, callsign);
        assert!(heard);
        assert!(last);
    }

    #[test]
    fn ax25_known_bytes() {
        // "APRS" shifted left one bit, space padding, reserved bits
        let callsign = Callsign::new("APRS", 0).unwrap();
        let mut buf = vec![];
        callsign.encode_ax25(false, false, &mut buf).unwrap();
        assert_eq!(buf, [0x82, 0xA0, 0xA4, 0xA6, 0x40, 0x40, 0x60]);
    }

    #[test]
    fn ax25_encode_rejects_lowercase() {
        let (callsign, _) = Callsign::decode_textual(b"dl4mea").unwrap();
        let mut buf = vec![];
        assert!(matches!(
            callsign.encode_ax25(false, true, &mut buf),
            Err(EncodeError::InvalidCallsign(_))
        ));
    }
}
