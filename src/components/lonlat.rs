use std::io::Write;
use std::ops::{Deref, RangeInclusive};

use crate::base91;
use crate::bytes::parse_bytes;
use crate::{DecodeError, EncodeError};

/// Position ambiguity: how many low-order digits of the `DDMM.mm` form are
/// masked with spaces (0-4). Longitude masks the same positions as
/// latitude.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq)]
pub enum Precision {
    HundredthMinute,
    TenthMinute,
    OneMinute,
    TenMinute,
    OneDegree,
}

impl Precision {
    /// The width of the ambiguous interval, in degrees.
    pub fn width(&self) -> f64 {
        match self {
            Precision::HundredthMinute => 1.0 / 6000.0,
            Precision::TenthMinute => 1.0 / 600.0,
            Precision::OneMinute => 1.0 / 60.0,
            Precision::TenMinute => 1.0 / 6.0,
            Precision::OneDegree => 1.0,
        }
    }

    pub(crate) fn range(&self, center: f64) -> RangeInclusive<f64> {
        let width = self.width();

        (center - (width / 2.0))..=(center + (width / 2.0))
    }

    pub(crate) fn masked_digits(&self) -> u8 {
        match self {
            Precision::HundredthMinute => 0,
            Precision::TenthMinute => 1,
            Precision::OneMinute => 2,
            Precision::TenMinute => 3,
            Precision::OneDegree => 4,
        }
    }

    pub(crate) fn from_masked_digits(digits: u8) -> Option<Self> {
        let res = match digits {
            0 => Precision::HundredthMinute,
            1 => Precision::TenthMinute,
            2 => Precision::OneMinute,
            3 => Precision::TenMinute,
            4 => Precision::OneDegree,
            _ => return None,
        };

        Some(res)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::HundredthMinute
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
pub struct Latitude(f64);

impl Deref for Latitude {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Latitude {
    /// Returns `None` outside -90..=90 or for NaN.
    pub fn new(value: f64) -> Option<Self> {
        if value > 90.0 || value < -90.0 || value.is_nan() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Degrees, minutes, hundredths of a minute and direction
    /// (`true` = north).
    pub fn dmh(&self) -> (u32, u32, u32, bool) {
        dmh(self.0)
    }

    /// `LLMM.mmN` with 0-4 trailing digits masked by spaces. The masked
    /// digits decode to the midpoint of the interval they span.
    pub(crate) fn parse_uncompressed(b: &[u8]) -> Result<(Self, Precision), DecodeError> {
        if b.len() != 8 || b[4] != b'.' {
            return Err(DecodeError::InvalidLatitude(b.to_vec()));
        }

        let north = match b[7] {
            b'N' => true,
            b'S' => false,
            _ => return Err(DecodeError::InvalidLatitude(b.to_vec())),
        };

        // Once a space shows up, everything after it must be spaces too.
        let mut masked = 0;
        let (deg, spaces) = parse_masked_pair([b[0], b[1]], false)
            .ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))?;
        masked += spaces;
        let (min, spaces) = parse_masked_pair([b[2], b[3]], spaces > 0)
            .ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))?;
        masked += spaces;
        let (min_frac, spaces) = parse_masked_pair([b[5], b[6]], spaces > 0)
            .ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))?;
        masked += spaces;

        let precision = Precision::from_masked_digits(masked)
            .ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))?;

        let mut magnitude =
            f64::from(deg) + f64::from(min) / 60.0 + f64::from(min_frac) / 6000.0;
        if masked > 0 {
            magnitude += precision.width() / 2.0;
        }

        let value = if north { magnitude } else { -magnitude };

        Self::new(value)
            .map(|lat| (lat, precision))
            .ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))
    }

    pub(crate) fn parse_compressed(b: &[u8]) -> Result<Self, DecodeError> {
        let n = base91::decode(b).ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))?;

        Self::new(90.0 - f64::from(n) / 380926.0)
            .ok_or_else(|| DecodeError::InvalidLatitude(b.to_vec()))
    }

    pub(crate) fn encode_uncompressed<W: Write>(
        &self,
        buf: &mut W,
        precision: Precision,
    ) -> Result<(), EncodeError> {
        let (deg, min, min_frac, north) = self.dmh();

        // Write the full digit string, then blank the masked tail.
        // Truncating (rather than rounding into the mask) keeps midpoint
        // values on their original masked text.
        let mut digits = [
            b'0' + (deg / 10) as u8,
            b'0' + (deg % 10) as u8,
            b'0' + (min / 10) as u8,
            b'0' + (min % 10) as u8,
            b'0' + (min_frac / 10) as u8,
            b'0' + (min_frac % 10) as u8,
        ];
        for digit in digits.iter_mut().rev().take(precision.masked_digits() as usize) {
            *digit = b' ';
        }

        buf.write_all(&digits[0..4])?;
        write!(buf, ".")?;
        buf.write_all(&digits[4..6])?;
        write!(buf, "{}", if north { 'N' } else { 'S' })?;

        Ok(())
    }

    pub(crate) fn encode_compressed<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        let n = ((90.0 - self.0) * 380926.0).round() as u32;

        base91::encode(n, 4, buf)
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
pub struct Longitude(f64);

impl Deref for Longitude {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Longitude {
    /// Returns `None` outside -180..=180 or for NaN.
    pub fn new(value: f64) -> Option<Self> {
        if value > 180.0 || value < -180.0 || value.is_nan() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Degrees, minutes, hundredths of a minute and direction
    /// (`true` = east).
    pub fn dmh(&self) -> (u32, u32, u32, bool) {
        dmh(self.0)
    }

    /// `LLLMM.mmE`. The ambiguity comes from the latitude, and the same
    /// digit positions must actually be masked here.
    pub(crate) fn parse_uncompressed(
        b: &[u8],
        precision: Precision,
    ) -> Result<Self, DecodeError> {
        if b.len() != 9 || b[5] != b'.' {
            return Err(DecodeError::InvalidLongitude(b.to_vec()));
        }

        let east = match b[8] {
            b'E' => true,
            b'W' => false,
            _ => return Err(DecodeError::InvalidLongitude(b.to_vec())),
        };

        let mut digits = [0u8; 7];
        digits[0..5].copy_from_slice(&b[0..5]);
        digits[5..7].copy_from_slice(&b[6..8]);

        let masked = precision.masked_digits() as usize;
        for (i, digit) in digits.iter_mut().enumerate() {
            if i >= 7 - masked {
                if *digit != b' ' {
                    return Err(DecodeError::InvalidLongitude(b.to_vec()));
                }
                *digit = b'0';
            } else if !digit.is_ascii_digit() {
                return Err(DecodeError::InvalidLongitude(b.to_vec()));
            }
        }

        let deg: u32 = parse_bytes(&digits[0..3])
            .ok_or_else(|| DecodeError::InvalidLongitude(b.to_vec()))?;
        let min: u32 = parse_bytes(&digits[3..5])
            .ok_or_else(|| DecodeError::InvalidLongitude(b.to_vec()))?;
        let min_frac: u32 = parse_bytes(&digits[5..7])
            .ok_or_else(|| DecodeError::InvalidLongitude(b.to_vec()))?;

        let mut magnitude =
            f64::from(deg) + f64::from(min) / 60.0 + f64::from(min_frac) / 6000.0;
        if masked > 0 {
            magnitude += precision.width() / 2.0;
        }

        let value = if east { magnitude } else { -magnitude };

        Self::new(value).ok_or_else(|| DecodeError::InvalidLongitude(b.to_vec()))
    }

    pub(crate) fn parse_compressed(b: &[u8]) -> Result<Self, DecodeError> {
        let n = base91::decode(b).ok_or_else(|| DecodeError::InvalidLongitude(b.to_vec()))?;

        Self::new(f64::from(n) / 190463.0 - 180.0)
            .ok_or_else(|| DecodeError::InvalidLongitude(b.to_vec()))
    }

    pub(crate) fn encode_uncompressed<W: Write>(
        &self,
        buf: &mut W,
        precision: Precision,
    ) -> Result<(), EncodeError> {
        let (deg, min, min_frac, east) = self.dmh();

        let mut digits = [
            b'0' + (deg / 100) as u8,
            b'0' + (deg / 10 % 10) as u8,
            b'0' + (deg % 10) as u8,
            b'0' + (min / 10) as u8,
            b'0' + (min % 10) as u8,
            b'0' + (min_frac / 10) as u8,
            b'0' + (min_frac % 10) as u8,
        ];
        for digit in digits.iter_mut().rev().take(precision.masked_digits() as usize) {
            *digit = b' ';
        }

        buf.write_all(&digits[0..5])?;
        write!(buf, ".")?;
        buf.write_all(&digits[5..7])?;
        write!(buf, "{}", if east { 'E' } else { 'W' })?;

        Ok(())
    }

    pub(crate) fn encode_compressed<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        let n = ((180.0 + self.0) * 190463.0).round() as u32;

        base91::encode(n, 4, buf)
    }
}

fn dmh(value: f64) -> (u32, u32, u32, bool) {
    let (positive, value) = if value >= 0.0 {
        (true, value)
    } else {
        (false, -value)
    };

    let mut deg = value as u32;
    let mut min = ((value - f64::from(deg)) * 60.0) as u32;
    let mut hundredths = ((value - f64::from(deg) - f64::from(min) / 60.0) * 6000.0).round() as u32;

    // rounding can carry all the way up
    if hundredths == 100 {
        hundredths = 0;
        min += 1;
    }
    if min == 60 {
        min = 0;
        deg += 1;
    }

    (deg, min, hundredths, positive)
}

// Parses a two-digit column that may be ambiguity-masked from the right.
// Returns the value (masked digits read as zero) and the space count.
// With `only_spaces` the column must be entirely masked.
fn parse_masked_pair(b: [u8; 2], only_spaces: bool) -> Option<(u32, u8)> {
    if only_spaces {
        return (b == *b"  ").then_some((0, 2));
    }

    match b {
        [b' ', b' '] => Some((0, 2)),
        [_, b' '] => parse_bytes::<u32>(&b[0..1]).map(|v| (v * 10, 1)),
        _ => parse_bytes::<u32>(&b[..]).map(|v| (v, 0)),
    }
}
