//! The AX.25 UI frame codec.
//!
//! Wire layout: destination address (7 bytes), source address (7 bytes),
//! 0-8 digipeater addresses (7 bytes each, extension bit on the last),
//! control `0x03`, PID `0xF0`, information field, FCS (2 bytes,
//! little-endian). KISS framing strips the FCS before delivery, which is
//! what the `with_fcs` flag is for.

use std::io::Write;

use crate::fcs::frame_check_sequence;
use crate::{Callsign, DecodeError, EncodeError};

/// unnumbered information
pub const UI_CONTROL: u8 = 0x03;
/// no layer 3 protocol
pub const PID_NO_LAYER3: u8 = 0xF0;

const MAX_DIGIPEATERS: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ax25Frame {
    pub destination: Callsign,
    pub source: Callsign,
    /// digipeater path in wire order, each with its H-bit
    pub path: Vec<(Callsign, bool)>,
    pub info: Vec<u8>,
    /// filled by `decode` with the FCS computed over the frame
    pub fcs: Option<u16>,
}

impl Ax25Frame {
    /// Decodes one UI frame. With `with_fcs` the trailing two bytes are
    /// checked against the computed FCS; a mismatch is reported as
    /// [`DecodeError::FrameCheck`] carrying the structurally-decoded
    /// frame. Without it (KISS input) the FCS is computed and stored as
    /// the value it would have been.
    pub fn decode(b: &[u8], with_fcs: bool) -> Result<Self, DecodeError> {
        let (body, received_fcs) = if with_fcs {
            if b.len() < 18 {
                return Err(DecodeError::InvalidFrame(b.to_vec()));
            }
            let (body, fcs_bytes) = b.split_at(b.len() - 2);
            (body, Some(u16::from_le_bytes([fcs_bytes[0], fcs_bytes[1]])))
        } else {
            if b.len() < 16 {
                return Err(DecodeError::InvalidFrame(b.to_vec()));
            }
            (b, None)
        };

        let (destination, _, last) = Callsign::decode_ax25(address_block(body, 0)?)?;
        if last {
            return Err(DecodeError::InvalidFrame(b.to_vec()));
        }
        let (source, _, mut last) = Callsign::decode_ax25(address_block(body, 7)?)?;

        let mut path = vec![];
        let mut offset = 14;
        while !last {
            if path.len() == MAX_DIGIPEATERS {
                return Err(DecodeError::InvalidFrame(b.to_vec()));
            }

            let (digi, heard, is_last) = Callsign::decode_ax25(address_block(body, offset)?)?;
            path.push((digi, heard));
            offset += 7;
            last = is_last;
        }

        let control = body
            .get(offset)
            .copied()
            .ok_or_else(|| DecodeError::InvalidFrame(b.to_vec()))?;
        let pid = body
            .get(offset + 1)
            .copied()
            .ok_or_else(|| DecodeError::InvalidFrame(b.to_vec()))?;

        if control != UI_CONTROL || pid != PID_NO_LAYER3 {
            return Err(DecodeError::InvalidFrame(b.to_vec()));
        }

        let info = body[offset + 2..].to_vec();
        let computed = frame_check_sequence(body);

        let frame = Self {
            destination,
            source,
            path,
            info,
            fcs: Some(computed),
        };

        match received_fcs {
            Some(received) if received != computed => Err(DecodeError::FrameCheck {
                computed,
                received,
                frame: Box::new(frame),
            }),
            _ => Ok(frame),
        }
    }

    /// Encodes the frame, recomputing the FCS over the emitted bytes when
    /// `with_fcs` is set. The stored `fcs` value is never trusted.
    pub fn encode<W: Write>(&self, buf: &mut W, with_fcs: bool) -> Result<(), EncodeError> {
        if self.path.len() > MAX_DIGIPEATERS {
            return Err(EncodeError::InvalidPath);
        }

        let mut body = vec![];

        self.destination.encode_ax25(false, false, &mut body)?;
        self.source
            .encode_ax25(false, self.path.is_empty(), &mut body)?;

        for (i, (digi, heard)) in self.path.iter().enumerate() {
            digi.encode_ax25(*heard, i + 1 == self.path.len(), &mut body)?;
        }

        body.push(UI_CONTROL);
        body.push(PID_NO_LAYER3);
        body.extend_from_slice(&self.info);

        buf.write_all(&body)?;

        if with_fcs {
            buf.write_all(&frame_check_sequence(&body).to_le_bytes())?;
        }

        Ok(())
    }
}

fn address_block(body: &[u8], offset: usize) -> Result<&[u8; 7], DecodeError> {
    body.get(offset..offset + 7)
        .and_then(|block| block.try_into().ok())
        .ok_or_else(|| DecodeError::InvalidFrame(body.to_vec()))
}
