use std::io::Write;

use crate::components::position::Position;
use crate::{DecodeError, EncodeError, Timestamp};

/// A position report, DTI `!`, `=`, `/` or `@`.
///
/// The identifier byte carries two flags at once: whether a timestamp
/// follows it, and whether the station is capable of APRS messaging.
#[derive(PartialEq, Debug, Clone)]
pub struct AprsPosition {
    pub messaging_supported: bool,
    pub timestamp: Option<Timestamp>,
    pub position: Position,
    pub comment: Vec<u8>,
}

impl AprsPosition {
    pub(crate) fn decode(b: &[u8]) -> Result<Self, DecodeError> {
        let dti = *b
            .first()
            .ok_or_else(|| DecodeError::InvalidPosition(b.to_vec()))?;

        let messaging_supported = matches!(dti, b'=' | b'@');
        let has_timestamp = matches!(dti, b'/' | b'@');

        let (timestamp, offset) = if has_timestamp {
            let (timestamp, used) = Timestamp::decode(&b[1..])?;
            (Some(timestamp), 1 + used)
        } else {
            (None, 1)
        };

        let (position, comment) = Position::decode(&b[offset..])?;

        Ok(Self {
            messaging_supported,
            timestamp,
            position,
            comment,
        })
    }

    pub(crate) fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        let dti = match (self.timestamp.is_some(), self.messaging_supported) {
            (false, false) => '!',
            (false, true) => '=',
            (true, false) => '/',
            (true, true) => '@',
        };

        write!(buf, "{}", dti)?;

        if let Some(timestamp) = &self.timestamp {
            timestamp.encode(buf)?;
        }

        self.position.encode(buf)?;
        buf.write_all(&self.comment)?;

        Ok(())
    }
}
