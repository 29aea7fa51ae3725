//! The compression type byte and the two-byte cs slot of a compressed
//! position.
//!
//! The slot holds either course/speed or altitude. A leading `{` selects
//! the altitude branch, as does a GGA NMEA source in the type byte; both
//! decode through the same `1.002^N` curve.

use std::io::Write;

use crate::{DecodeError, EncodeError};

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum GpsFix {
    Old,
    Current,
}

impl From<bool> for GpsFix {
    fn from(bit: bool) -> Self {
        match bit {
            false => GpsFix::Old,
            true => GpsFix::Current,
        }
    }
}

impl From<GpsFix> for bool {
    fn from(fix: GpsFix) -> bool {
        fix == GpsFix::Current
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum NmeaSource {
    Other,
    Gll,
    Gga,
    Rmc,
}

impl From<(bool, bool)> for NmeaSource {
    fn from(bits: (bool, bool)) -> Self {
        match bits {
            (false, false) => NmeaSource::Other,
            (false, true) => NmeaSource::Gll,
            (true, false) => NmeaSource::Gga,
            (true, true) => NmeaSource::Rmc,
        }
    }
}

impl From<NmeaSource> for (bool, bool) {
    fn from(source: NmeaSource) -> Self {
        match source {
            NmeaSource::Other => (false, false),
            NmeaSource::Gll => (false, true),
            NmeaSource::Gga => (true, false),
            NmeaSource::Rmc => (true, true),
        }
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Origin {
    Compressed,
    TncBText,
    Software,
    Tbd,
    Kpc3,
    Pico,
    Other,
    Digipeater,
}

impl From<(bool, bool, bool)> for Origin {
    fn from(bits: (bool, bool, bool)) -> Self {
        match bits {
            (false, false, false) => Origin::Compressed,
            (false, false, true) => Origin::TncBText,
            (false, true, false) => Origin::Software,
            (false, true, true) => Origin::Tbd,
            (true, false, false) => Origin::Kpc3,
            (true, false, true) => Origin::Pico,
            (true, true, false) => Origin::Other,
            (true, true, true) => Origin::Digipeater,
        }
    }
}

impl From<Origin> for (bool, bool, bool) {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Compressed => (false, false, false),
            Origin::TncBText => (false, false, true),
            Origin::Software => (false, true, false),
            Origin::Tbd => (false, true, true),
            Origin::Kpc3 => (true, false, false),
            Origin::Pico => (true, false, true),
            Origin::Other => (true, true, false),
            Origin::Digipeater => (true, true, true),
        }
    }
}

/// The compression type byte, transmitted with an offset of 33.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct CompressionType {
    pub gps_fix: GpsFix,
    pub nmea_source: NmeaSource,
    pub origin: Origin,
}

impl From<u8> for CompressionType {
    fn from(byte: u8) -> Self {
        let gps_fix = byte & (1 << 5) != 0;
        let nmea_source = (byte & (1 << 4) != 0, byte & (1 << 3) != 0);
        let origin = (
            byte & (1 << 2) != 0,
            byte & (1 << 1) != 0,
            byte & 1 != 0,
        );

        Self {
            gps_fix: gps_fix.into(),
            nmea_source: nmea_source.into(),
            origin: origin.into(),
        }
    }
}

impl From<CompressionType> for u8 {
    fn from(t: CompressionType) -> u8 {
        let b5: bool = t.gps_fix.into();
        let (b4, b3) = t.nmea_source.into();
        let (b2, b1, b0) = t.origin.into();

        (u8::from(b5) << 5)
            | (u8::from(b4) << 4)
            | (u8::from(b3) << 3)
            | (u8::from(b2) << 2)
            | (u8::from(b1) << 1)
            | u8::from(b0)
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum CompressedCs {
    CourseSpeed(CourseSpeed),
    Altitude(Altitude),
}

impl CompressedCs {
    pub(crate) fn parse(c: u8, s: u8, t: CompressionType) -> Result<Self, DecodeError> {
        let c_val = c.checked_sub(33).ok_or(DecodeError::InvalidCs([c, s]))?;
        let s_val = s.checked_sub(33).ok_or(DecodeError::InvalidCs([c, s]))?;

        if c_val > 90 || s_val > 90 {
            return Err(DecodeError::InvalidCs([c, s]));
        }

        if c == b'{' || t.nmea_source == NmeaSource::Gga {
            return Ok(Self::Altitude(Altitude::from_cs(c_val, s_val)));
        }

        Ok(Self::CourseSpeed(CourseSpeed::from_cs(c_val, s_val)))
    }

    /// Rejects pairings the decoder would misread: a course/speed under a
    /// GGA type byte would come back as altitude, and an altitude outside
    /// the `{` marker range needs the GGA type byte to survive.
    pub(crate) fn encode<W: Write>(
        self,
        buf: &mut W,
        t: CompressionType,
    ) -> Result<(), EncodeError> {
        match self {
            Self::CourseSpeed(cs) => {
                if t.nmea_source == NmeaSource::Gga {
                    return Err(EncodeError::GgaCourseSpeed);
                }

                let (c, s) = cs.to_cs()?;
                buf.write_all(&[c + 33, s + 33])?;
            }
            Self::Altitude(alt) => {
                let (c, s) = alt.to_cs()?;
                if c != 90 && t.nmea_source != NmeaSource::Gga {
                    return Err(EncodeError::NonGgaAltitude);
                }

                buf.write_all(&[c + 33, s + 33])?;
            }
        }

        buf.write_all(&[u8::from(t) + 33])?;

        Ok(())
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct CourseSpeed {
    pub course_degrees: u16,
    pub speed_knots: f64,
}

impl CourseSpeed {
    fn from_cs(c: u8, s: u8) -> Self {
        Self {
            course_degrees: u16::from(c) * 4,
            speed_knots: 1.08_f64.powi(i32::from(s)) - 1.0,
        }
    }

    // the encodable domain is course 0..=356 (4 degree steps) and speed
    // codes 0..=90; a course of 360 would emit the '{' altitude marker
    fn to_cs(self) -> Result<(u8, u8), EncodeError> {
        if self.course_degrees > 356 || !self.speed_knots.is_finite() || self.speed_knots < 0.0 {
            return Err(EncodeError::InvalidCourseSpeed(
                self.course_degrees,
                self.speed_knots,
            ));
        }

        let c = (self.course_degrees / 4) as u8;
        let s = ((self.speed_knots + 1.0).ln() / 1.08_f64.ln()).round();

        if s > 90.0 {
            return Err(EncodeError::InvalidCourseSpeed(
                self.course_degrees,
                self.speed_knots,
            ));
        }

        Ok((c, s as u8))
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Altitude {
    pub altitude_feet: f64,
}

impl Altitude {
    fn from_cs(c: u8, s: u8) -> Self {
        Self {
            altitude_feet: 1.002_f64.powi(i32::from(c) * 91 + i32::from(s)),
        }
    }

    fn to_cs(self) -> Result<(u8, u8), EncodeError> {
        let n = (self.altitude_feet.ln() / 1.002_f64.ln()).round();

        if n.is_nan() || n < 0.0 || n > (90 * 91 + 90) as f64 {
            return Err(EncodeError::InvalidAltitude(self.altitude_feet));
        }

        let n = n as i32;

        Ok(((n / 91) as u8, (n % 91) as u8))
    }
}
