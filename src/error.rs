use crate::ax25::Ax25Frame;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid Callsign: {0:?}")]
    InvalidCallsign(Vec<u8>),
    #[error("Invalid SSID: {0:?}")]
    InvalidSsid(Vec<u8>),
    #[error("Invalid AX.25 Address: {0:?}")]
    InvalidAddress(Vec<u8>),
    #[error("Invalid AX.25 Frame: {0:?}")]
    InvalidFrame(Vec<u8>),
    #[error("FCS mismatch: computed {computed:#06x}, received {received:#06x}")]
    FrameCheck {
        computed: u16,
        received: u16,
        /// the structurally-decoded frame, for diagnostics
        frame: Box<Ax25Frame>,
    },
    #[error("Invalid Timestamp: {0:?}")]
    InvalidTimestamp(Vec<u8>),
    #[error("Invalid Position: {0:?}")]
    InvalidPosition(Vec<u8>),
    #[error("Invalid Latitude: {0:?}")]
    InvalidLatitude(Vec<u8>),
    #[error("Invalid Longitude: {0:?}")]
    InvalidLongitude(Vec<u8>),
    #[error("Invalid compressed course/speed: {0:?}")]
    InvalidCs([u8; 2]),
    #[error("Invalid Data Extension: {0:?}")]
    InvalidExtension(Vec<u8>),
    #[error("Invalid Message: {0:?}")]
    InvalidMessage(Vec<u8>),
    #[error("Invalid Object Report: {0:?}")]
    InvalidObject(Vec<u8>),
    #[error("Invalid Item Report: {0:?}")]
    InvalidItem(Vec<u8>),
    #[error("Invalid Packet: {0:?}")]
    InvalidPacket(Vec<u8>),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid Latitude: {0}")]
    InvalidLatitude(f64),
    #[error("Invalid Longitude: {0}")]
    InvalidLongitude(f64),
    #[error("Invalid Callsign: {0:?}")]
    InvalidCallsign(String),
    #[error("Invalid digipeater path")]
    InvalidPath,
    #[error("Invalid Message Addressee: {0:?}")]
    InvalidMessageAddressee(Vec<u8>),
    #[error("Invalid Message Number: {0:?}")]
    InvalidMessageNumber(Vec<u8>),
    #[error("Message text too long: {0} bytes")]
    InvalidMessageText(usize),
    #[error("Invalid Object Name: {0:?}")]
    InvalidObjectName(String),
    #[error("Invalid Item Name: {0:?}")]
    InvalidItemName(Vec<u8>),
    #[error("Status text too long: {0} bytes")]
    InvalidStatusText(usize),
    #[error("Status timestamp must be day/hour/minute zulu")]
    InvalidStatusTimestamp,
    #[error("Invalid Data Extension")]
    InvalidExtension,
    #[error("Invalid compressed altitude: {0}")]
    InvalidAltitude(f64),
    #[error("Invalid compressed course/speed: {0}/{1}")]
    InvalidCourseSpeed(u16, f64),
    #[error("Compressed altitude requires a GGA compression type")]
    NonGgaAltitude,
    #[error("A GGA compression type carries altitude, not course/speed")]
    GgaCourseSpeed,
    #[error("{0} does not fit in {1} base-91 digits")]
    Base91Overflow(u32, usize),
    #[error("Invalid Aprs Data")]
    InvalidData,
    #[error(transparent)]
    Write(#[from] std::io::Error),
}
