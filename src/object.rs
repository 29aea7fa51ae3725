//! Object reports, DTI `;`: positions of entities that cannot report
//! themselves, published under a 9-character name by some other station.
//! Unlike items, objects always carry a timestamp.

use std::io::Write;

use crate::components::position::Position;
use crate::{DecodeError, EncodeError, Timestamp};

#[derive(PartialEq, Debug, Clone)]
pub struct AprsObject {
    /// up to 9 characters, space-padded on the air
    pub name: String,
    /// `*` live, `_` killed
    pub live: bool,
    pub timestamp: Timestamp,
    pub position: Position,
    pub comment: Vec<u8>,
}

impl AprsObject {
    pub(crate) fn decode(b: &[u8]) -> Result<Self, DecodeError> {
        // ';' + name(9) + live(1) + timestamp(7..8) + position
        if b.len() < 18 {
            return Err(DecodeError::InvalidObject(b.to_vec()));
        }

        let name = String::from_utf8(b[1..10].to_vec())
            .map_err(|_| DecodeError::InvalidObject(b.to_vec()))?
            .trim_end_matches(' ')
            .to_owned();

        let live = match b[10] {
            b'*' => true,
            b'_' => false,
            _ => return Err(DecodeError::InvalidObject(b.to_vec())),
        };

        let (timestamp, used) = Timestamp::decode(&b[11..])?;
        let (position, comment) = Position::decode(&b[11 + used..])?;

        Ok(Self {
            name,
            live,
            timestamp,
            position,
            comment,
        })
    }

    pub(crate) fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        if self.name.is_empty() || self.name.len() > 9 || !self.name.is_ascii() {
            return Err(EncodeError::InvalidObjectName(self.name.clone()));
        }

        write!(buf, ";{:<9}", self.name)?;
        write!(buf, "{}", if self.live { '*' } else { '_' })?;
        self.timestamp.encode(buf)?;
        self.position.encode(buf)?;
        buf.write_all(&self.comment)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uncompressed_live_object() {
        let result =
            AprsObject::decode(b";LEADER   *092345z4903.50N/07201.75W>Moving").unwrap();

        assert_eq!(result.name, "LEADER");
        assert!(result.live);
        assert_eq!(result.timestamp, Timestamp::DhmZulu(9, 23, 45));
        assert_relative_eq!(*result.position.latitude, 49.05833333333333, epsilon = 1e-9);
        assert_eq!(result.position.symbol_table, '/');
        assert_eq!(result.position.symbol_code, '>');
        assert_eq!(result.comment, b"Moving");
    }

    #[test]
    fn killed_object() {
        let result =
            AprsObject::decode(b";LEADER   _092345z4903.50N/07201.75W>").unwrap();
        assert!(!result.live);
    }

    #[test]
    fn compressed_object() {
        let result =
            AprsObject::decode(b";CAR      *092345z/5L!!<*e7>7P[Moving to the north").unwrap();

        assert_eq!(result.name, "CAR");
        assert_relative_eq!(*result.position.latitude, 49.5, epsilon = 1e-9);
        assert_eq!(result.position.symbol_code, '>');
        assert_eq!(result.comment, b"Moving to the north");
    }

    #[test]
    fn full_width_name_with_ssid() {
        let result = AprsObject::decode(
            br";HFEST-18H*170403z3443.55N\08635.47Wh146.940MHz T100 Huntsville Hamfest",
        )
        .unwrap();

        assert_eq!(result.name, "HFEST-18H");
        assert_eq!(result.position.symbol_table, '\\');
        assert_eq!(result.position.symbol_code, 'h');
        assert_eq!(
            result.comment,
            &b"146.940MHz T100 Huntsville Hamfest"[..]
        );
    }

    #[test]
    fn bad_live_marker() {
        assert!(AprsObject::decode(b";LEADER    092345z4903.50N/07201.75W>").is_err());
    }

    #[test]
    fn roundtrip() {
        let raws: [&[u8]; 3] = [
            b";LEADER   *092345z4903.50N/07201.75W>Moving",
            b";CAR      _092345z/5L!!<*e7>7P[north",
            br";HFEST-18H*170403z3443.55N\08635.47Wh146.940MHz",
        ];

        for raw in raws {
            let decoded = AprsObject::decode(raw).unwrap();
            let mut buf = vec![];
            decoded.encode(&mut buf).unwrap();
            assert_eq!(buf, raw);
        }
    }

    #[test]
    fn encode_rejects_oversized_name() {
        let mut object =
            AprsObject::decode(b";LEADER   *092345z4903.50N/07201.75W>").unwrap();
        object.name = "TOOLONGNAME".to_owned();

        let mut buf = vec![];
        assert!(matches!(
            object.encode(&mut buf),
            Err(EncodeError::InvalidObjectName(_))
        ));
    }
}
