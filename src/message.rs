use std::io::Write;

use crate::{DecodeError, EncodeError};

/// An addressed text message, DTI `:`.
///
/// The addressee occupies exactly nine columns followed by a second `:`;
/// that column check is also what distinguishes a message from free text.
/// A trailing `{` plus one to five bytes is the message number. Texts of
/// the form `ackNNN`/`rejNNN` acknowledge or reject a previously received
/// number and are surfaced through [`AprsMessage::ack`] and
/// [`AprsMessage::rej`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AprsMessage {
    /// trailing spaces trimmed; padded back to nine bytes on encode
    pub addressee: Vec<u8>,
    pub text: Vec<u8>,
    pub number: Option<Vec<u8>>,
}

const MAX_TEXT: usize = 67;
const MAX_NUMBER: usize = 5;

impl AprsMessage {
    /// The message number this message acknowledges, if it is an ack.
    pub fn ack(&self) -> Option<&[u8]> {
        Self::reply_number(&self.text, b"ack")
    }

    /// The message number this message rejects, if it is a reject.
    pub fn rej(&self) -> Option<&[u8]> {
        Self::reply_number(&self.text, b"rej")
    }

    fn reply_number<'a>(text: &'a [u8], marker: &[u8]) -> Option<&'a [u8]> {
        text.strip_prefix(marker)
            .filter(|number| !number.is_empty() && number.len() <= MAX_NUMBER)
    }

    pub(crate) fn decode(b: &[u8]) -> Result<Self, DecodeError> {
        let body = &b[1..];

        if body.len() < 10 || body[9] != b':' {
            return Err(DecodeError::InvalidMessage(b.to_vec()));
        }

        let mut addressee = body[..9].to_vec();
        while addressee.last() == Some(&b' ') {
            addressee.pop();
        }

        let raw_text = &body[10..];
        let (text, number) = match raw_text.iter().rposition(|&c| c == b'{') {
            Some(idx) if (1..=MAX_NUMBER).contains(&(raw_text.len() - idx - 1)) => (
                raw_text[..idx].to_vec(),
                Some(raw_text[idx + 1..].to_vec()),
            ),
            _ => (raw_text.to_vec(), None),
        };

        Ok(Self {
            addressee,
            text,
            number,
        })
    }

    pub(crate) fn encode<W: Write>(&self, buf: &mut W) -> Result<(), EncodeError> {
        if self.addressee.len() > 9 || self.addressee.contains(&b':') {
            return Err(EncodeError::InvalidMessageAddressee(self.addressee.clone()));
        }

        if self.text.len() > MAX_TEXT {
            return Err(EncodeError::InvalidMessageText(self.text.len()));
        }

        write!(buf, ":")?;
        buf.write_all(&self.addressee)?;
        for _ in self.addressee.len()..9 {
            write!(buf, " ")?;
        }
        write!(buf, ":")?;
        buf.write_all(&self.text)?;

        if let Some(number) = &self.number {
            if number.is_empty() || number.len() > MAX_NUMBER || number.contains(&b'{') {
                return Err(EncodeError::InvalidMessageNumber(number.clone()));
            }

            write!(buf, "{{")?;
            buf.write_all(number)?;
        }

        Ok(())
    }
}
