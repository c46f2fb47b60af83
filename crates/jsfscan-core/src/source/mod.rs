mod stream;

pub use stream::{JsfFileSource, StreamSource};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::jsf::FrameHeader;

/// One header plus exactly `msg_len` payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub header: FrameHeader,
    pub payload: Vec<u8>,
}

/// Sequential supplier of JSF frames.
///
/// Headers and payloads are pulled separately so the caller can inspect a
/// header (marker, type) before committing to reading its payload.
pub trait FrameSource {
    /// Next header, or `None` at a clean end of stream.
    fn next_header(&mut self) -> Result<Option<FrameHeader>, SourceError>;

    /// Payload belonging to the header most recently returned.
    fn read_payload(&mut self, header: &FrameHeader) -> Result<Vec<u8>, SourceError>;

    /// Byte offset of the next unread byte.
    fn offset(&self) -> u64;

    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let Some(header) = self.next_header()? else {
            return Ok(None);
        };
        let payload = self.read_payload(&header)?;
        Ok(Some(Frame { header, payload }))
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated near EOF: header at offset {offset} has only {available} of 16 bytes")]
    TruncatedHeader { offset: u64, available: usize },
    #[error(
        "truncated payload at offset {offset}: type {msg_type} declares {declared} bytes, {available} remain"
    )]
    TruncatedPayload {
        offset: u64,
        msg_type: u16,
        declared: u32,
        available: usize,
    },
}
