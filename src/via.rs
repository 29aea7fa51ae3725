use std::io::{self, Write};

use crate::{Callsign, DecodeError};

/// One entry of the digipeater path.
///
/// On APRS-IS the path also carries q-constructs, which are not callsigns
/// and can never be encoded into an AX.25 address block.
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum Via {
    /// digipeater callsign plus its has-been-repeated flag
    Callsign(Callsign, bool),
    QConstruct(QConstruct),
}

impl Via {
    pub fn decode_textual(b: &[u8]) -> Result<Self, DecodeError> {
        if let Some(q) = QConstruct::decode(b) {
            return Ok(Self::QConstruct(q));
        }

        let (callsign, heard) = Callsign::decode_textual(b)?;
        Ok(Self::Callsign(callsign, heard))
    }

    pub fn encode_textual<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            Self::Callsign(callsign, heard) => callsign.encode_textual(*heard, w),
            Self::QConstruct(q) => w.write_all(q.as_textual().as_bytes()),
        }
    }

    pub fn callsign(&self) -> Option<(&Callsign, bool)> {
        match self {
            Self::Callsign(callsign, heard) => Some((callsign, *heard)),
            Self::QConstruct(_) => None,
        }
    }
}

/// APRS-IS routing markers. These never go on the air.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum QConstruct {
    AC,
    AX,
    AU,
    Ao,
    AO,
    AS,
    Ar,
    AR,
    AZ,
    AI,
}

impl QConstruct {
    pub fn decode(b: &[u8]) -> Option<Self> {
        let q = match b {
            b"qAC" => Self::AC,
            b"qAX" => Self::AX,
            b"qAU" => Self::AU,
            b"qAo" => Self::Ao,
            b"qAO" => Self::AO,
            b"qAS" => Self::AS,
            b"qAr" => Self::Ar,
            b"qAR" => Self::AR,
            b"qAZ" => Self::AZ,
            b"qAI" => Self::AI,
            _ => return None,
        };

        Some(q)
    }

    pub fn as_textual(&self) -> &'static str {
        match self {
            Self::AC => "qAC",
            Self::AX => "qAX",
            Self::AU => "qAU",
            Self::Ao => "qAo",
            Self::AO => "qAO",
            Self::AS => "qAS",
            Self::Ar => "qAr",
            Self::AR => "qAR",
            Self::AZ => "qAZ",
            Self::AI => "qAI",
        }
    }
}
