use std::io::Write;
use std::ops::RangeInclusive;

use crate::bytes::parse_bytes;
use crate::components::compressed::{CompressedCs, CompressionType};
use crate::components::extensions::Extension;
use crate::components::lonlat::{Latitude, Longitude, Precision};
use crate::{DecodeError, EncodeError};

/// Whether the position block was compressed, and if so what rode in its
/// cs slot.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Cst {
    CompressedSome {
        cs: CompressedCs,
        t: CompressionType,
    },
    CompressedNone,
    Uncompressed,
}

/// A position block together with its trailing data extension and any
/// altitude lifted out of the comment.
#[derive(PartialEq, Debug, Clone)]
pub struct Position {
    pub latitude: Latitude,
    pub longitude: Longitude,
    pub precision: Precision,
    pub symbol_table: char,
    pub symbol_code: char,
    pub cst: Cst,
    pub extension: Option<Extension>,
    /// `/A=dddddd` comment altitude, in feet
    pub altitude_feet: Option<i32>,
}

impl Position {
    /// The interval the real latitude may lie in, given the ambiguity.
    pub fn latitude_bounding(&self) -> RangeInclusive<f64> {
        self.precision.range(self.latitude.value())
    }

    /// The interval the real longitude may lie in, given the ambiguity.
    pub fn longitude_bounding(&self) -> RangeInclusive<f64> {
        self.precision.range(self.longitude.value())
    }

    /// Decodes a position block from the head of `b`: 19 bytes
    /// uncompressed or 13 compressed, selected by the first byte. A
    /// 7-byte data extension is consumed from the front of what follows,
    /// then the first `/A=` altitude is lifted out. Returns the position
    /// and the remaining comment.
    pub(crate) fn decode(b: &[u8]) -> Result<(Self, Vec<u8>), DecodeError> {
        let first = *b
            .first()
            .ok_or_else(|| DecodeError::InvalidPosition(b.to_vec()))?;

        let (mut position, rest) = if first.is_ascii_digit() || first == b' ' {
            Self::decode_uncompressed(b)?
        } else if matches!(first, b'/' | b'\\' | b'A'..=b'Z' | b'a'..=b'j') {
            Self::decode_compressed(b)?
        } else {
            return Err(DecodeError::InvalidPosition(b.to_vec()));
        };

        let rest = match Extension::decode(rest) {
            Ok(extension) => {
                position.extension = Some(extension);
                &rest[7..]
            }
            Err(_) => rest,
        };

        let (altitude_feet, comment) = lift_altitude(rest);
        position.altitude_feet = altitude_feet;

        Ok((position, comment))
    }

    fn decode_uncompressed(b: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if b.len() < 19 {
            return Err(DecodeError::InvalidPosition(b.to_vec()));
        }

        let (latitude, precision) = Latitude::parse_uncompressed(&b[0..8])?;
        let longitude = Longitude::parse_uncompressed(&b[9..18], precision)?;

        Ok((
            Self {
                latitude,
                longitude,
                precision,
                symbol_table: b[8] as char,
                symbol_code: b[18] as char,
                cst: Cst::Uncompressed,
                extension: None,
                altitude_feet: None,
            },
            &b[19..],
        ))
    }

    fn decode_compressed(b: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if b.len() < 13 {
            return Err(DecodeError::InvalidPosition(b.to_vec()));
        }

        let latitude = Latitude::parse_compressed(&b[1..5])?;
        let longitude = Longitude::parse_compressed(&b[5..9])?;

        // a space in the first cs byte means the rest of the slot carries
        // no information
        let cst = match b[10] {
            b' ' => Cst::CompressedNone,
            c => {
                let t = b[12]
                    .checked_sub(33)
                    .ok_or_else(|| DecodeError::InvalidPosition(b.to_vec()))?
                    .into();
                let cs = CompressedCs::parse(c, b[11], t)?;
                Cst::CompressedSome { cs, t }
            }
        };

        Ok((
            Self {
                latitude,
                longitude,
                precision: Precision::default(),
                symbol_table: b[0] as char,
                symbol_code: b[9] as char,
                cst,
                extension: None,
                altitude_feet: None,
            },
            &b[13..],
        ))
    }

    /// Emits the position block, then the data extension, then the
    /// altitude. The comment is the caller's business.
    pub(crate) fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        match self.cst {
            Cst::Uncompressed => {
                self.latitude.encode_uncompressed(buf, self.precision)?;
                write!(buf, "{}", self.symbol_table)?;
                self.longitude.encode_uncompressed(buf, self.precision)?;
                write!(buf, "{}", self.symbol_code)?;
            }
            Cst::CompressedSome { cs, t } => {
                write!(buf, "{}", self.symbol_table)?;
                self.latitude.encode_compressed(buf)?;
                self.longitude.encode_compressed(buf)?;
                write!(buf, "{}", self.symbol_code)?;
                cs.encode(buf, t)?;
            }
            Cst::CompressedNone => {
                write!(buf, "{}", self.symbol_table)?;
                self.latitude.encode_compressed(buf)?;
                self.longitude.encode_compressed(buf)?;
                write!(buf, "{}", self.symbol_code)?;
                write!(buf, " sT")?;
            }
        }

        if let Some(extension) = &self.extension {
            extension.encode(buf)?;
        }

        if let Some(feet) = self.altitude_feet {
            write!(buf, "/A={:06}", feet)?;
        }

        Ok(())
    }
}

// Finds the first "/A=" followed by an optional sign and up to six
// digits, removes it, and returns the altitude with the remaining bytes.
fn lift_altitude(b: &[u8]) -> (Option<i32>, Vec<u8>) {
    let mut i = 0;

    while i + 3 < b.len() {
        if &b[i..i + 3] == b"/A=" {
            let mut j = i + 3;
            if b.get(j) == Some(&b'-') {
                j += 1;
            }
            let digits_start = j;
            while j < b.len() && j - digits_start < 6 && b[j].is_ascii_digit() {
                j += 1;
            }

            if j > digits_start {
                if let Some(feet) = parse_bytes::<i32>(&b[i + 3..j]) {
                    let mut comment = b[..i].to_vec();
                    comment.extend_from_slice(&b[j..]);
                    return (Some(feet), comment);
                }
            }
        }

        i += 1;
    }

    (None, b.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::compressed::Altitude;
    use approx::assert_relative_eq;

    #[test]
    fn uncompressed_with_extension_and_altitude() {
        let (position, comment) =
            Position::decode(b"4704.13N/12242.73W[241/055/A=-00053 Mike ").unwrap();

        assert_relative_eq!(*position.latitude, 47.06883333333333, epsilon = 1e-9);
        assert_relative_eq!(*position.longitude, -122.71216666666667, epsilon = 1e-9);
        assert_eq!(position.symbol_table, '/');
        assert_eq!(position.symbol_code, '[');
        assert_eq!(
            position.extension,
            Some(Extension::CourseSpeed {
                course_degrees: 241,
                speed_knots: 55,
            })
        );
        assert_eq!(position.altitude_feet, Some(-53));
        assert_eq!(comment, b" Mike ");

        let mut buf = vec![];
        position.encode(&mut buf).unwrap();
        buf.extend_from_slice(&comment);
        assert_eq!(buf, &b"4704.13N/12242.73W[241/055/A=-00053 Mike "[..]);
    }

    #[test]
    fn uncompressed_plain_comment() {
        let (position, comment) =
            Position::decode(b"4605.21N/12327.31W#W2, ORn-N, Fill-in").unwrap();

        assert_eq!(position.extension, None);
        assert_eq!(position.altitude_feet, None);
        assert_eq!(comment, b"W2, ORn-N, Fill-in");
    }

    #[test]
    fn offset_symbol_table() {
        // any byte can be the symbol table id, 'F' included
        let (position, comment) =
            Position::decode(b"4558.13NF12259.58W MEISSNER LOOKOUT").unwrap();

        assert_eq!(position.symbol_table, 'F');
        assert_eq!(position.symbol_code, ' ');
        assert_eq!(comment, b"MEISSNER LOOKOUT");
    }

    #[test]
    fn compressed_with_altitude_slot() {
        let (position, comment) = Position::decode(b"/5L!!<*e7>{?!").unwrap();

        assert_relative_eq!(*position.latitude, 49.5, epsilon = 1e-9);
        assert_relative_eq!(*position.longitude, -72.75, epsilon = 1e-4);
        assert_eq!(position.symbol_table, '/');
        assert_eq!(position.symbol_code, '>');
        assert!(comment.is_empty());

        match position.cst {
            Cst::CompressedSome {
                cs: CompressedCs::Altitude(Altitude { altitude_feet }),
                ..
            } => assert!(altitude_feet > 0.0),
            other => panic!("expected compressed altitude, got {:?}", other),
        }

        let mut buf = vec![];
        position.encode(&mut buf).unwrap();
        assert_eq!(buf, &b"/5L!!<*e7>{?!"[..]);
    }

    #[test]
    fn compressed_without_cs() {
        let (position, comment) = Position::decode(br"\5L!!<*e79 sT").unwrap();

        assert_eq!(position.cst, Cst::CompressedNone);
        assert_eq!(position.symbol_table, '\\');
        assert_eq!(position.symbol_code, '9');
        assert!(comment.is_empty());

        let mut buf = vec![];
        position.encode(&mut buf).unwrap();
        assert_eq!(buf, &br"\5L!!<*e79 sT"[..]);
    }

    #[test]
    fn ambiguous_position_masks_both_axes() {
        let (position, _) = Position::decode(b"4903.  N/07201.  W>").unwrap();

        assert_eq!(position.precision, Precision::OneMinute);
        assert_relative_eq!(*position.latitude, 49.0 + 3.5 / 60.0, epsilon = 1e-9);

        let mut buf = vec![];
        position.encode(&mut buf).unwrap();
        assert_eq!(buf, &b"4903.  N/07201.  W>"[..]);
    }

    #[test]
    fn inconsistent_masking_is_an_error() {
        assert!(Position::decode(b"4903.  N/07201.75W>").is_err());
    }

    #[test]
    fn truncated_blocks() {
        assert!(Position::decode(b"4903.50N/07201.75W").is_err());
        assert!(Position::decode(b"/5L!!<*e7>{?").is_err());
        assert!(Position::decode(b"").is_err());
    }

    #[test]
    fn lift_altitude_mid_comment() {
        let (alt, comment) = lift_altitude(b"climbing/A=003054 fast");
        assert_eq!(alt, Some(3054));
        assert_eq!(comment, b"climbing fast");
    }

    #[test]
    fn lift_altitude_requires_digits() {
        let (alt, comment) = lift_altitude(b"/A=none");
        assert_eq!(alt, None);
        assert_eq!(comment, b"/A=none");
    }
}
