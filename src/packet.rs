use std::io::Write;

use crate::ax25::Ax25Frame;
use crate::via::Via;
use crate::{
    AprsItem, AprsMessage, AprsObject, AprsPosition, AprsStatus, Callsign, DecodeError,
    EncodeError,
};

/// A complete APRS frame: addresses, path and a typed information field.
///
/// The same packet can be read from and written to both wire shapes - the
/// TNC2 monitor text used on APRS-IS and raw AX.25 UI frame bytes.
#[derive(PartialEq, Debug, Clone)]
pub struct AprsPacket {
    pub from: Callsign,
    pub to: Callsign,
    pub via: Vec<Via>,
    pub data: AprsData,
}

impl AprsPacket {
    /// Decodes the TNC2 monitor form `SRC>DEST[,VIA...]:INFO`.
    pub fn decode_textual(b: &[u8]) -> Result<Self, DecodeError> {
        let header_end = b
            .iter()
            .position(|&x| x == b':')
            .ok_or_else(|| DecodeError::InvalidPacket(b.to_vec()))?;
        let (header, rest) = b.split_at(header_end);
        let info = &rest[1..];

        let from_end = header
            .iter()
            .position(|&x| x == b'>')
            .ok_or_else(|| DecodeError::InvalidPacket(b.to_vec()))?;
        let (from, to_and_via) = header.split_at(from_end);
        let (from, _) = Callsign::decode_textual(from)?;

        let mut fields = to_and_via[1..].split(|&x| x == b',');
        let to = fields
            .next()
            .ok_or_else(|| DecodeError::InvalidPacket(b.to_vec()))?;
        let (to, _) = Callsign::decode_textual(to)?;

        let via = fields
            .map(Via::decode_textual)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            from,
            to,
            via,
            data: AprsData::decode(info),
        })
    }

    pub fn encode_textual<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        self.from.encode_textual(false, buf)?;
        write!(buf, ">")?;
        self.to.encode_textual(false, buf)?;

        for via in &self.via {
            write!(buf, ",")?;
            via.encode_textual(buf)?;
        }

        write!(buf, ":")?;
        self.data.encode(buf)?;

        Ok(())
    }

    /// Decodes raw AX.25 UI frame bytes; see [`Ax25Frame::decode`] for the
    /// `with_fcs` contract.
    pub fn decode_ax25(b: &[u8], with_fcs: bool) -> Result<Self, DecodeError> {
        Ok(Self::from_ax25(Ax25Frame::decode(b, with_fcs)?))
    }

    pub fn from_ax25(frame: Ax25Frame) -> Self {
        Self {
            from: frame.source,
            to: frame.destination,
            via: frame
                .path
                .into_iter()
                .map(|(callsign, heard)| Via::Callsign(callsign, heard))
                .collect(),
            data: AprsData::decode(&frame.info),
        }
    }

    /// Builds the AX.25 frame for this packet. Q-constructs in the path
    /// cannot be expressed as AX.25 addresses and fail here.
    pub fn to_ax25(&self) -> Result<Ax25Frame, EncodeError> {
        let path = self
            .via
            .iter()
            .map(|via| {
                via.callsign()
                    .map(|(callsign, heard)| (callsign.clone(), heard))
                    .ok_or(EncodeError::InvalidPath)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut info = vec![];
        self.data.encode(&mut info)?;

        Ok(Ax25Frame {
            destination: self.to.clone(),
            source: self.from.clone(),
            path,
            info,
            fcs: None,
        })
    }

    pub fn encode_ax25<W: Write>(&self, buf: &mut W, with_fcs: bool) -> Result<(), EncodeError> {
        self.to_ax25()?.encode(buf, with_fcs)
    }
}

/// The decoded information field, dispatched on its first byte.
#[derive(PartialEq, Debug, Clone)]
pub enum AprsData {
    Position(AprsPosition),
    Object(AprsObject),
    Item(AprsItem),
    Message(AprsMessage),
    Status(AprsStatus),
    /// anything without a typed decoder, kept byte-exact (telemetry,
    /// weather, Mic-E, user-defined, ...), and the fallback when a typed
    /// decoder rejects its bytes
    Unknown(Vec<u8>),
}

impl AprsData {
    /// Dispatches on the data type identifier. Failures of the typed
    /// decoders are recovered locally: the information field is kept as
    /// [`AprsData::Unknown`] rather than failing the whole frame.
    pub fn decode(b: &[u8]) -> Self {
        let decoded = match b.first() {
            Some(b'!' | b'=' | b'/' | b'@') => AprsPosition::decode(b).map(Self::Position),
            Some(b';') => AprsObject::decode(b).map(Self::Object),
            Some(b')') => AprsItem::decode(b).map(Self::Item),
            Some(b':') => AprsMessage::decode(b).map(Self::Message),
            Some(b'>') => AprsStatus::decode(b).map(Self::Status),
            _ => return Self::Unknown(b.to_vec()),
        };

        decoded.unwrap_or_else(|_| Self::Unknown(b.to_vec()))
    }

    /// The data type identifier this field will encode with.
    pub fn data_type_identifier(&self) -> Option<u8> {
        match self {
            Self::Position(position) => Some(match (
                position.timestamp.is_some(),
                position.messaging_supported,
            ) {
                (false, false) => b'!',
                (false, true) => b'=',
                (true, false) => b'/',
                (true, true) => b'@',
            }),
            Self::Object(_) => Some(b';'),
            Self::Item(_) => Some(b')'),
            Self::Message(_) => Some(b':'),
            Self::Status(_) => Some(b'>'),
            Self::Unknown(raw) => raw.first().copied(),
        }
    }

    pub fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        match self {
            Self::Position(position) => position.encode(buf)?,
            Self::Object(object) => object.encode(buf)?,
            Self::Item(item) => item.encode(buf)?,
            Self::Message(message) => message.encode(buf)?,
            Self::Status(status) => status.encode(buf)?,
            Self::Unknown(raw) => buf.write_all(raw)?,
        }

        Ok(())
    }
}
