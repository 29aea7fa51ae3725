//! Status reports, DTI `>`: a single line announcing the station's
//! current mission, optionally led by a day/hour/minute zulu timestamp.
//!
//! Examples:
//! - `>12.6V 0.2A 22degC`
//! - `>092345zNet Control Center`

use std::io::Write;

use crate::{DecodeError, EncodeError, Timestamp};

#[derive(Clone, Debug, PartialEq)]
pub struct AprsStatus {
    /// day/hour/minute zulu only; other forms stay part of the text
    pub timestamp: Option<Timestamp>,
    pub text: Vec<u8>,
}

const MAX_TEXT: usize = 62;
const MAX_TEXT_WITH_TIMESTAMP: usize = 55;

impl AprsStatus {
    pub(crate) fn decode(b: &[u8]) -> Result<Self, DecodeError> {
        let body = &b[1..];

        // only seven bytes of digits ending in 'z' count as a timestamp
        let timestamp = match body.get(..7) {
            Some(head) if head[6] == b'z' && head[..6].iter().all(u8::is_ascii_digit) => {
                Timestamp::decode(head).ok().map(|(ts, _)| ts)
            }
            _ => None,
        };

        let text = if timestamp.is_some() {
            body[7..].to_vec()
        } else {
            body.to_vec()
        };

        Ok(Self { timestamp, text })
    }

    pub(crate) fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        let limit = match &self.timestamp {
            Some(Timestamp::DhmZulu(..)) => MAX_TEXT_WITH_TIMESTAMP,
            Some(_) => return Err(EncodeError::InvalidStatusTimestamp),
            None => MAX_TEXT,
        };

        if self.text.len() > limit {
            return Err(EncodeError::InvalidStatusText(self.text.len()));
        }

        write!(buf, ">")?;

        if let Some(timestamp) = &self.timestamp {
            timestamp.encode(buf)?;
        }

        buf.write_all(&self.text)?;

        Ok(())
    }
}
