//! [APRS] codec for [Rust]: the information field formats, the AX.25 UI
//! frame around them, and the APRS-IS line framing.
//!
//! [APRS]: http://www.aprs.org/
//! [Rust]: https://www.rust-lang.org/
//!
//! # Usage
//!
//! ```rust
//! use aprs_codec::{AprsData, Timestamp};
//!
//! let packet = aprs_codec::parse(b"KF7HVM-2>APRS:/092345z4903.50N/07201.75W>Test").unwrap();
//!
//! assert_eq!(packet.from.call(), "KF7HVM");
//! assert_eq!(packet.from.ssid(), 2);
//!
//! match &packet.data {
//!     AprsData::Position(position) => {
//!         assert_eq!(position.timestamp, Some(Timestamp::DhmZulu(9, 23, 45)));
//!         assert!((*position.position.latitude - 49.0583).abs() < 1e-3);
//!         assert!((*position.position.longitude + 72.0292).abs() < 1e-3);
//!         assert_eq!(position.comment, b"Test");
//!     }
//!     _ => unreachable!(),
//! }
//!
//! // packets re-encode byte-exactly
//! let mut buf = vec![];
//! packet.encode_textual(&mut buf).unwrap();
//! assert_eq!(buf, b"KF7HVM-2>APRS:/092345z4903.50N/07201.75W>Test");
//! ```
//!
//! The same packet type moves between the textual TNC2 form shown above
//! and raw AX.25 UI frame bytes ([`AprsPacket::decode_ax25`] /
//! [`AprsPacket::encode_ax25`]). Decoding is deliberately tolerant:
//! information fields that fail their typed decoder are preserved as
//! [`AprsData::Unknown`] instead of failing the frame, so a feed can be
//! consumed without tripping over exotic or malformed traffic.

mod ax25;
mod base91;
mod bytes;
mod callsign;
mod components;
mod error;
mod fcs;
mod item;
mod message;
mod object;
mod packet;
mod position;
mod status;
mod timestamp;
mod via;

pub mod aprs_is;

pub use ax25::{Ax25Frame, PID_NO_LAYER3, UI_CONTROL};
pub use callsign::Callsign;
pub use components::compressed::{
    Altitude, CompressedCs, CompressionType, CourseSpeed, GpsFix, NmeaSource, Origin,
};
pub use components::extensions::{Directivity, Extension};
pub use components::lonlat::{Latitude, Longitude, Precision};
pub use components::position::{Cst, Position};
pub use error::{DecodeError, EncodeError};
pub use fcs::frame_check_sequence;
pub use item::AprsItem;
pub use message::AprsMessage;
pub use object::AprsObject;
pub use packet::{AprsData, AprsPacket};
pub use position::AprsPosition;
pub use status::AprsStatus;
pub use timestamp::Timestamp;
pub use via::{QConstruct, Via};

/// Parses a TNC2 monitor-format frame, e.g. one line from APRS-IS.
pub fn parse(b: &[u8]) -> Result<AprsPacket, DecodeError> {
    AprsPacket::decode_textual(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall() {
        let original =
            &b"KF7HVM-2>APRS,qAS,WIDE1-1*::KF7HVM   :msg with a : colon {001"[..];

        let mut buf = vec![];
        parse(original).unwrap().encode_textual(&mut buf).unwrap();
        assert_eq!(original, &buf);
    }
}
