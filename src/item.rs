//! Item reports, DTI `)`: like objects, but for things without a
//! timestamp. The name is 3-9 bytes and is terminated by the liveness
//! marker itself, so neither `!` nor `_` can appear inside it.

use std::io::Write;

use crate::components::position::Position;
use crate::{DecodeError, EncodeError};

#[derive(PartialEq, Debug, Clone)]
pub struct AprsItem {
    /// 3-9 bytes, not padded
    pub name: Vec<u8>,
    /// `!` live, `_` killed
    pub live: bool,
    pub position: Position,
    pub comment: Vec<u8>,
}

impl AprsItem {
    pub(crate) fn decode(b: &[u8]) -> Result<Self, DecodeError> {
        let body = &b[1..];

        let mut marker = None;
        for (i, &c) in body.iter().enumerate().take(10) {
            if c == b'!' || c == b'_' {
                marker = Some(i);
                break;
            }
        }

        let end = marker.ok_or_else(|| DecodeError::InvalidItem(b.to_vec()))?;
        if !(3..=9).contains(&end) {
            return Err(DecodeError::InvalidItem(b.to_vec()));
        }

        let name = body[..end].to_vec();
        let live = body[end] == b'!';

        let (position, comment) = Position::decode(&body[end + 1..])?;

        Ok(Self {
            name,
            live,
            position,
            comment,
        })
    }

    pub(crate) fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        if !(3..=9).contains(&self.name.len())
            || self.name.iter().any(|&c| c == b'!' || c == b'_')
        {
            return Err(EncodeError::InvalidItemName(self.name.clone()));
        }

        write!(buf, ")")?;
        buf.write_all(&self.name)?;
        write!(buf, "{}", if self.live { '!' } else { '_' })?;
        self.position.encode(buf)?;
        buf.write_all(&self.comment)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::extensions::{Directivity, Extension};
    use crate::components::position::Cst;
    use approx::assert_relative_eq;

    #[test]
    fn live_item() {
        let result = AprsItem::decode(b")AIDV#2!4903.50N/07201.75WA").unwrap();

        assert_eq!(result.name, b"AIDV#2");
        assert!(result.live);
        assert_eq!(result.position.symbol_table, '/');
        assert_eq!(result.position.symbol_code, 'A');
        assert_relative_eq!(*result.position.latitude, 49.05833333333333, epsilon = 1e-9);
        assert!(result.comment.is_empty());
    }

    #[test]
    fn killed_item() {
        let result = AprsItem::decode(b")AID_4903.50N/07201.75WA").unwrap();

        assert_eq!(result.name, b"AID");
        assert!(!result.live);
    }

    #[test]
    fn item_with_extension() {
        let result = AprsItem::decode(b")AID_4903.50N/07201.75WAPHG5132").unwrap();

        assert_eq!(
            result.position.extension,
            Some(Extension::PowerHeightGain {
                power_watts: 25,
                height_feet: 20,
                gain_db: 3,
                directivity: Directivity::Degrees(90),
            })
        );
        assert!(result.comment.is_empty());
    }

    #[test]
    fn compressed_item() {
        let result = AprsItem::decode(br")MOBIL!\5L!!<*e79 sT").unwrap();

        assert_eq!(result.name, b"MOBIL");
        assert!(result.live);
        assert_eq!(result.position.cst, Cst::CompressedNone);
        assert_eq!(result.position.symbol_table, '\\');
        assert_eq!(result.position.symbol_code, '9');
    }

    #[test]
    fn name_bounds() {
        // marker inside the first three bytes
        assert!(AprsItem::decode(b")AB!4903.50N/07201.75WA").is_err());
        // no marker within ten bytes
        assert!(AprsItem::decode(b")NOMARKERHERE4903.50N/07201.75WA").is_err());
    }

    #[test]
    fn roundtrip() {
        let raws: [&[u8]; 3] = [
            b")AIDV#2!4903.50N/07201.75WA",
            b")AID_4903.50N/07201.75WAPHG5132",
            br")MOBIL!\5L!!<*e79 sT",
        ];

        for raw in raws {
            let decoded = AprsItem::decode(raw).unwrap();
            let mut buf = vec![];
            decoded.encode(&mut buf).unwrap();
            assert_eq!(buf, raw);
        }
    }

    #[test]
    fn encode_rejects_marker_in_name() {
        let mut item = AprsItem::decode(b")AIDV#2!4903.50N/07201.75WA").unwrap();
        item.name = b"AID_V".to_vec();

        let mut buf = vec![];
        assert!(matches!(
            item.encode(&mut buf),
            Err(EncodeError::InvalidItemName(_))
        ));
    }
}
