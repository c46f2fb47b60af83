use serde::{Deserialize, Serialize};

use super::error::HeaderError;
use super::layout;
use super::registry;

/// Fixed 16-byte preamble shared by every JSF frame.
///
/// The marker is decoded but not checked here; whether a mismatching marker
/// is tolerated is the walker's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeader {
    pub marker: u16,
    pub version: u8,
    pub session_id: u8,
    pub msg_type: u16,
    pub subsystem: u8,
    pub channel: u8,
    pub sequence: u8,
    pub reserved: u8,
    pub reserved2: u16,
    /// Byte length of the payload following the header.
    pub msg_len: u32,
}

impl FrameHeader {
    /// Header for `msg_type` with the standard marker and the given length.
    pub fn new(msg_type: u16, msg_len: u32) -> Self {
        Self {
            marker: layout::START_MARKER,
            version: 0,
            session_id: 0,
            msg_type,
            subsystem: 0,
            channel: 0,
            sequence: 0,
            reserved: 0,
            reserved2: 0,
            msg_len,
        }
    }

    pub fn to_bytes(&self) -> [u8; layout::HEADER_LEN] {
        let mut out = [0u8; layout::HEADER_LEN];
        out[layout::MARKER_RANGE].copy_from_slice(&self.marker.to_le_bytes());
        out[layout::VERSION_OFFSET] = self.version;
        out[layout::SESSION_ID_OFFSET] = self.session_id;
        out[layout::MSG_TYPE_RANGE].copy_from_slice(&self.msg_type.to_le_bytes());
        out[layout::SUBSYSTEM_OFFSET] = self.subsystem;
        out[layout::CHANNEL_OFFSET] = self.channel;
        out[layout::SEQUENCE_OFFSET] = self.sequence;
        out[layout::RESERVED_OFFSET] = self.reserved;
        out[layout::RESERVED2_RANGE].copy_from_slice(&self.reserved2.to_le_bytes());
        out[layout::MSG_LEN_RANGE].copy_from_slice(&self.msg_len.to_le_bytes());
        out
    }

    pub fn has_start_marker(&self) -> bool {
        self.marker == layout::START_MARKER
    }

    /// Human-readable message type, if the code is known.
    pub fn message_name(&self) -> Option<&'static str> {
        registry::message_name(self.msg_type)
    }

    /// Human-readable subsystem, if the number is known.
    pub fn subsystem_name(&self) -> Option<&'static str> {
        subsystem_name(self.subsystem)
    }
}

/// Decode the header at the start of `bytes`.
///
/// # Errors
/// Returns `HeaderError::TruncatedHeader` when fewer than 16 bytes are
/// available.
///
/// # Examples
/// ```
/// use jsfscan_core::protocols::jsf::header::{FrameHeader, decode_header};
///
/// let bytes = FrameHeader::new(2002, 20).to_bytes();
/// let header = decode_header(&bytes)?;
/// assert_eq!(header.msg_type, 2002);
/// assert_eq!(header.msg_len, 20);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_header(bytes: &[u8]) -> Result<FrameHeader, HeaderError> {
    let raw: &[u8; layout::HEADER_LEN] = bytes
        .get(..layout::HEADER_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(HeaderError::TruncatedHeader {
            needed: layout::HEADER_LEN,
            actual: bytes.len(),
        })?;

    Ok(FrameHeader {
        marker: u16::from_le_bytes([raw[0], raw[1]]),
        version: raw[layout::VERSION_OFFSET],
        session_id: raw[layout::SESSION_ID_OFFSET],
        msg_type: u16::from_le_bytes([raw[4], raw[5]]),
        subsystem: raw[layout::SUBSYSTEM_OFFSET],
        channel: raw[layout::CHANNEL_OFFSET],
        sequence: raw[layout::SEQUENCE_OFFSET],
        reserved: raw[layout::RESERVED_OFFSET],
        reserved2: u16::from_le_bytes([raw[10], raw[11]]),
        msg_len: u32::from_le_bytes([raw[12], raw[13], raw[14], raw[15]]),
    })
}

pub fn subsystem_name(subsystem: u8) -> Option<&'static str> {
    match subsystem {
        0 => Some("Sub-bottom"),
        20 => Some("Lower frequency side-scan"),
        21 => Some("Higher frequency side-scan"),
        100 => Some("Raw serial data"),
        101 => Some("Parsed serial data"),
        _ => None,
    }
}
