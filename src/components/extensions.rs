//! The 7-byte data extensions that may directly follow a position block:
//! course/speed, PHG, RNG, DFS and the area object descriptor.

use std::io::Write;

use crate::bytes::parse_bytes;
use crate::{DecodeError, EncodeError};

/// Antenna directivity in 45 degree steps, 0 meaning omnidirectional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directivity {
    Omni,
    Degrees(u16),
}

impl Directivity {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Omni),
            1..=8 => Some(Self::Degrees(45 * u16::from(code))),
            _ => None,
        }
    }

    fn to_code(self) -> Result<u8, EncodeError> {
        match self {
            Self::Omni => Ok(0),
            Self::Degrees(deg) if deg % 45 == 0 && (45..=360).contains(&deg) => {
                Ok((deg / 45) as u8)
            }
            Self::Degrees(_) => Err(EncodeError::InvalidExtension),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Extension {
    /// `CCC/SSS` - also used as direction/speed depending on the report
    CourseSpeed {
        course_degrees: u16,
        speed_knots: u16,
    },
    /// `PHGphgd`
    PowerHeightGain {
        power_watts: u16,
        height_feet: u32,
        gain_db: u8,
        directivity: Directivity,
    },
    /// `RNGrrrr`
    RadioRange {
        range_miles: u16,
    },
    /// `DFSshgd`
    DfSignalStrength {
        strength_s: u8,
        height_feet: u32,
        gain_db: u8,
        directivity: Directivity,
    },
    /// `Tyy/Cxx`
    AreaObject {
        object_type: u8,
        color: u8,
    },
}

impl Extension {
    /// Tries the first seven bytes of `b`. A prefix that matches no
    /// extension shape is the caller's comment, not an error.
    pub fn decode(b: &[u8]) -> Result<Self, DecodeError> {
        let bytes = b
            .get(..7)
            .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?;

        match &bytes[..3] {
            b"PHG" => {
                let (height_feet, gain_db, directivity) = decode_hgd(&bytes[4..7], b)?;
                let power = digit(bytes[3])
                    .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?;

                Ok(Self::PowerHeightGain {
                    power_watts: u16::from(power).pow(2),
                    height_feet,
                    gain_db,
                    directivity,
                })
            }
            b"RNG" => Ok(Self::RadioRange {
                range_miles: parse_bytes(&bytes[3..7])
                    .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?,
            }),
            b"DFS" => {
                let (height_feet, gain_db, directivity) = decode_hgd(&bytes[4..7], b)?;
                let strength = digit(bytes[3])
                    .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?;

                Ok(Self::DfSignalStrength {
                    strength_s: strength,
                    height_feet,
                    gain_db,
                    directivity,
                })
            }
            [b'T', _, _] if bytes[3] == b'/' && bytes[4] == b'C' => Ok(Self::AreaObject {
                object_type: parse_bytes(&bytes[1..3])
                    .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?,
                color: parse_bytes(&bytes[5..7])
                    .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?,
            }),
            _ => {
                if bytes[3] != b'/' {
                    return Err(DecodeError::InvalidExtension(b.to_vec()));
                }

                let course: u16 = parse_bytes(&bytes[..3])
                    .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?;
                if course > 360 {
                    return Err(DecodeError::InvalidExtension(b.to_vec()));
                }

                Ok(Self::CourseSpeed {
                    course_degrees: course,
                    speed_knots: parse_bytes(&bytes[4..7])
                        .ok_or_else(|| DecodeError::InvalidExtension(b.to_vec()))?,
                })
            }
        }
    }

    pub fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        match self {
            Self::CourseSpeed {
                course_degrees,
                speed_knots,
            } => {
                if *course_degrees > 360 || *speed_knots > 999 {
                    return Err(EncodeError::InvalidExtension);
                }

                write!(buf, "{:03}/{:03}", course_degrees, speed_knots)?;
            }
            Self::PowerHeightGain {
                power_watts,
                height_feet,
                gain_db,
                directivity,
            } => {
                write!(buf, "PHG{}", power_code(*power_watts)?)?;
                encode_hgd(buf, *height_feet, *gain_db, *directivity)?;
            }
            Self::RadioRange { range_miles } => {
                if *range_miles > 9999 {
                    return Err(EncodeError::InvalidExtension);
                }

                write!(buf, "RNG{:04}", range_miles)?;
            }
            Self::DfSignalStrength {
                strength_s,
                height_feet,
                gain_db,
                directivity,
            } => {
                if *strength_s > 9 {
                    return Err(EncodeError::InvalidExtension);
                }

                write!(buf, "DFS{}", strength_s)?;
                encode_hgd(buf, *height_feet, *gain_db, *directivity)?;
            }
            Self::AreaObject { object_type, color } => {
                if *object_type > 99 || *color > 99 {
                    return Err(EncodeError::InvalidExtension);
                }

                write!(buf, "T{:02}/C{:02}", object_type, color)?;
            }
        }

        Ok(())
    }
}

fn digit(b: u8) -> Option<u8> {
    b.is_ascii_digit().then(|| b - b'0')
}

// The height code is not limited to 0-9: ':' is 10240 feet, ';' is 20480
// feet and so on, up to a code of 28 so the result still fits a u32.
fn decode_hgd(codes: &[u8], raw: &[u8]) -> Result<(u32, u8, Directivity), DecodeError> {
    let height_code = codes[0]
        .checked_sub(b'0')
        .filter(|&code| code <= 28)
        .ok_or_else(|| DecodeError::InvalidExtension(raw.to_vec()))?;
    let gain = digit(codes[1]).ok_or_else(|| DecodeError::InvalidExtension(raw.to_vec()))?;
    let directivity = digit(codes[2])
        .and_then(Directivity::from_code)
        .ok_or_else(|| DecodeError::InvalidExtension(raw.to_vec()))?;

    Ok((2u32.pow(u32::from(height_code)) * 10, gain, directivity))
}

fn encode_hgd<W: Write>(
    buf: &mut W,
    height_feet: u32,
    gain_db: u8,
    directivity: Directivity,
) -> Result<(), EncodeError> {
    if gain_db > 9 {
        return Err(EncodeError::InvalidExtension);
    }

    let steps = height_feet / 10;
    if height_feet % 10 != 0 || !steps.is_power_of_two() {
        return Err(EncodeError::InvalidExtension);
    }
    let height_code = steps.trailing_zeros() as u8;
    if height_code > 28 {
        return Err(EncodeError::InvalidExtension);
    }

    buf.write_all(&[b'0' + height_code])?;
    write!(buf, "{}{}", gain_db, directivity.to_code()?)?;

    Ok(())
}

fn power_code(power_watts: u16) -> Result<u8, EncodeError> {
    let code = (f64::from(power_watts).sqrt()).round() as u16;

    if code > 9 || code * code != power_watts {
        return Err(EncodeError::InvalidExtension);
    }

    Ok(code as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_speed() {
        let ext = Extension::decode(b"080/043").unwrap();
        assert_eq!(
            ext,
            Extension::CourseSpeed {
                course_degrees: 80,
                speed_knots: 43,
            }
        );

        let mut buf = vec![];
        ext.encode(&mut buf).unwrap();
        assert_eq!(buf, b"080/043");
    }

    #[test]
    fn phg() {
        let ext = Extension::decode(b"PHG5132").unwrap();
        assert_eq!(
            ext,
            Extension::PowerHeightGain {
                power_watts: 25,
                height_feet: 20,
                gain_db: 3,
                directivity: Directivity::Degrees(90),
            }
        );

        let mut buf = vec![];
        ext.encode(&mut buf).unwrap();
        assert_eq!(buf, b"PHG5132");
    }

    #[test]
    fn phg_extended_height() {
        let ext = Extension::decode(b"PHG5;32").unwrap();
        assert_eq!(
            ext,
            Extension::PowerHeightGain {
                power_watts: 25,
                height_feet: 20480,
                gain_db: 3,
                directivity: Directivity::Degrees(90),
            }
        );

        let mut buf = vec![];
        ext.encode(&mut buf).unwrap();
        assert_eq!(buf, b"PHG5;32");
    }

    #[test]
    fn phg_from_regression_corpus() {
        // "PHG2830" - 4 watts into an omni at 2560 feet
        let ext = Extension::decode(b"PHG2830").unwrap();
        assert_eq!(
            ext,
            Extension::PowerHeightGain {
                power_watts: 4,
                height_feet: 2560,
                gain_db: 3,
                directivity: Directivity::Omni,
            }
        );
    }

    #[test]
    fn dfs() {
        let ext = Extension::decode(b"DFS8745").unwrap();
        assert_eq!(
            ext,
            Extension::DfSignalStrength {
                strength_s: 8,
                height_feet: 1280,
                gain_db: 4,
                directivity: Directivity::Degrees(225),
            }
        );

        let mut buf = vec![];
        ext.encode(&mut buf).unwrap();
        assert_eq!(buf, b"DFS8745");
    }

    #[test]
    fn rng() {
        let ext = Extension::decode(b"RNG0125").unwrap();
        assert_eq!(ext, Extension::RadioRange { range_miles: 125 });

        let mut buf = vec![];
        ext.encode(&mut buf).unwrap();
        assert_eq!(buf, b"RNG0125");
    }

    #[test]
    fn area_object() {
        let ext = Extension::decode(b"T12/C34").unwrap();
        assert_eq!(
            ext,
            Extension::AreaObject {
                object_type: 12,
                color: 34,
            }
        );

        let mut buf = vec![];
        ext.encode(&mut buf).unwrap();
        assert_eq!(buf, b"T12/C34");
    }

    #[test]
    fn too_short_is_rejected() {
        assert!(Extension::decode(b"080/04").is_err());
    }

    #[test]
    fn ordinary_comment_is_rejected() {
        assert!(Extension::decode(b"Hello W").is_err());
        assert!(Extension::decode(b"W2, ORn").is_err());
        // out-of-range course
        assert!(Extension::decode(b"999/000").is_err());
    }

    #[test]
    fn bad_height_code() {
        assert!(Extension::decode(b"PHG5\xcb32").is_err());
    }

    #[test]
    fn encode_rejects_unrepresentable_values() {
        let ext = Extension::PowerHeightGain {
            power_watts: 1000,
            height_feet: 0,
            gain_db: 255,
            directivity: Directivity::Omni,
        };
        let mut buf = vec![];
        assert!(ext.encode(&mut buf).is_err());
    }
}
