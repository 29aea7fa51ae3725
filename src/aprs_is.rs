//! APRS-IS textual framing.
//!
//! An APRS-IS connection is a stream of CRLF-terminated lines: the client
//! opens with a login line, the server answers with `#`-prefixed comment
//! lines, and every other line is a frame in TNC2 monitor format.

use std::fmt::{Display, Formatter};
use std::io::{self, Write};

use crate::{AprsPacket, Callsign, DecodeError, EncodeError};

/// One line received from an APRS-IS server.
#[derive(Clone, Debug, PartialEq)]
pub enum AprsIsEvent {
    /// a TNC2 monitor-format frame
    Frame(AprsPacket),
    /// a `#`-prefixed server greeting or keepalive, without the `#`
    ServerComment(Vec<u8>),
}

/// Decodes one line. The CRLF (or bare LF) terminator may still be
/// attached or already stripped by the caller's line splitter.
pub fn decode_line(line: &[u8]) -> Result<AprsIsEvent, DecodeError> {
    let line = line
        .strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line);

    if let Some(comment) = line.strip_prefix(b"#") {
        return Ok(AprsIsEvent::ServerComment(comment.to_vec()));
    }

    Ok(AprsIsEvent::Frame(AprsPacket::decode_textual(line)?))
}

/// Encodes one frame as a CRLF-terminated TNC2 line.
pub fn encode_line<W: Write>(packet: &AprsPacket, w: &mut W) -> Result<(), EncodeError> {
    packet.encode_textual(w)?;
    w.write_all(b"\r\n")?;

    Ok(())
}

/// The APRS-IS login line:
/// `user CALL pass PASSCODE vers NAME VERSION [filter FILTER]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Login {
    pub user: Callsign,
    /// `-1` for receive-only access
    pub passcode: i32,
    pub software: String,
    pub version: String,
    pub filter: Option<String>,
}

impl Login {
    pub fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}\r\n", self)
    }
}

impl Display for Login {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "user {} pass {} vers {} {}",
            self.user, self.passcode, self.software, self.version
        )?;

        if let Some(filter) = &self.filter {
            write!(f, " filter {}", filter)?;
        }

        Ok(())
    }
}

/// Encodes the in-session `#filter` adjustment command.
pub fn filter_command<W: Write>(filter: &str, w: &mut W) -> io::Result<()> {
    write!(w, "#filter {}\r\n", filter)
}
