//! Sequential frame walker.
//!
//! The walker has two states, `Reading` and `Done`. Each step pulls one
//! header, applies the marker policy, reads the payload and dispatches it
//! through the registry. Per-frame problems (unknown type, malformed
//! payload, marker mismatch under `Warn`) are recorded as warnings and the
//! walk continues; per-stream problems end the walk with a `Termination`
//! describing why. Messages decoded before a stop are always kept.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::protocols::jsf::messages::{DecodedMessage, MessageBody};
use crate::protocols::jsf::registry;
use crate::source::{FrameSource, SourceError};

use super::options::{DecodeOptions, MarkerPolicy};

/// Why the walk stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Zero bytes remained where a header was expected.
    EndOfStream,
    /// The caller requested a stop between frames.
    Cancelled,
    /// 1–15 bytes remained where a header was expected.
    TruncatedHeader { offset: u64, available: usize },
    /// A header declared more payload than the stream holds.
    TruncatedPayload {
        offset: u64,
        msg_type: u16,
        declared: u32,
        available: usize,
    },
    /// Marker mismatch under `MarkerPolicy::Reject`.
    BadMarker { offset: u64, found: u16 },
    /// The underlying reader failed.
    Io { message: String },
}

impl Termination {
    /// True when the stream did not end cleanly or on request.
    pub fn is_error(&self) -> bool {
        !matches!(self, Termination::EndOfStream | Termination::Cancelled)
    }
}

impl From<SourceError> for Termination {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Io(err) => Termination::Io {
                message: err.to_string(),
            },
            SourceError::TruncatedHeader { offset, available } => {
                Termination::TruncatedHeader { offset, available }
            }
            SourceError::TruncatedPayload {
                offset,
                msg_type,
                declared,
                available,
            } => Termination::TruncatedPayload {
                offset,
                msg_type,
                declared,
                available,
            },
        }
    }
}

/// Non-fatal condition attached to one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    UnknownMessageType {
        frame: usize,
        offset: u64,
        msg_type: u16,
    },
    MalformedPayload {
        frame: usize,
        offset: u64,
        msg_type: u16,
        reason: String,
    },
    MarkerMismatch {
        frame: usize,
        offset: u64,
        found: u16,
    },
}

/// Ordered result of one walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedSequence {
    pub messages: Vec<DecodedMessage>,
    pub warnings: Vec<Warning>,
    pub termination: Termination,
}

impl DecodedSequence {
    /// Messages of one type, in stream order.
    pub fn messages_of_type(&self, code: u16) -> Vec<&DecodedMessage> {
        self.messages
            .iter()
            .filter(|msg| msg.msg_type() == code)
            .collect()
    }

    pub fn count_by_type(&self) -> BTreeMap<u16, u64> {
        let mut counts = BTreeMap::new();
        for msg in &self.messages {
            *counts.entry(msg.msg_type()).or_insert(0) += 1;
        }
        counts
    }

    pub fn unknown_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_unknown()).count()
    }

    pub fn malformed_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_malformed()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.termination == Termination::EndOfStream
    }
}

enum WalkState {
    Reading,
    Done(Termination),
}

pub struct Walker<S> {
    source: S,
    options: DecodeOptions,
    state: WalkState,
    messages: Vec<DecodedMessage>,
    warnings: Vec<Warning>,
}

impl<S: FrameSource> Walker<S> {
    pub fn new(source: S, options: DecodeOptions) -> Self {
        Self {
            source,
            options,
            state: WalkState::Reading,
            messages: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, WalkState::Done(_))
    }

    /// Messages decoded so far.
    pub fn messages(&self) -> &[DecodedMessage] {
        &self.messages
    }

    /// Advance by at most one frame. Returns `false` once the walk is done.
    pub fn step(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        if let Some(termination) = self.read_one() {
            match &termination {
                Termination::EndOfStream => {}
                other => warn!(reason = ?other, "walk stopped early"),
            }
            self.state = WalkState::Done(termination);
            return false;
        }
        true
    }

    /// Walk to the end of the stream.
    pub fn walk(self) -> DecodedSequence {
        self.walk_until(&AtomicBool::new(false))
    }

    /// Walk until the stream ends or `cancel` is set; checked between frames.
    pub fn walk_until(mut self, cancel: &AtomicBool) -> DecodedSequence {
        while !self.is_done() {
            if cancel.load(Ordering::Relaxed) {
                self.state = WalkState::Done(Termination::Cancelled);
                break;
            }
            self.step();
        }
        self.finish()
    }

    /// Stop now and return everything decoded so far.
    pub fn finish(self) -> DecodedSequence {
        let termination = match self.state {
            WalkState::Done(termination) => termination,
            WalkState::Reading => Termination::Cancelled,
        };
        info!(
            messages = self.messages.len(),
            warnings = self.warnings.len(),
            termination = ?termination,
            "walk finished"
        );
        DecodedSequence {
            messages: self.messages,
            warnings: self.warnings,
            termination,
        }
    }

    fn read_one(&mut self) -> Option<Termination> {
        let offset = self.source.offset();
        let frame = self.messages.len();

        let header = match self.source.next_header() {
            Ok(Some(header)) => header,
            Ok(None) => return Some(Termination::EndOfStream),
            Err(err) => return Some(err.into()),
        };

        if header.marker != self.options.expected_marker {
            match self.options.marker_policy {
                MarkerPolicy::Ignore => {}
                MarkerPolicy::Warn => {
                    warn!(frame, offset, found = header.marker, "unexpected frame marker");
                    self.warnings.push(Warning::MarkerMismatch {
                        frame,
                        offset,
                        found: header.marker,
                    });
                }
                MarkerPolicy::Reject => {
                    return Some(Termination::BadMarker {
                        offset,
                        found: header.marker,
                    });
                }
            }
        }

        let payload = match self.source.read_payload(&header) {
            Ok(payload) => payload,
            Err(err) => return Some(err.into()),
        };

        debug!(
            frame,
            offset,
            msg_type = header.msg_type,
            name = header.message_name().unwrap_or("unknown"),
            len = payload.len(),
            "frame"
        );

        let message = registry::decode(header, &payload);
        match &message.body {
            MessageBody::Unknown { .. } => {
                warn!(frame, offset, msg_type = header.msg_type, "unknown message type");
                self.warnings.push(Warning::UnknownMessageType {
                    frame,
                    offset,
                    msg_type: header.msg_type,
                });
            }
            MessageBody::Malformed { reason, .. } => {
                warn!(frame, offset, msg_type = header.msg_type, %reason, "malformed payload");
                self.warnings.push(Warning::MalformedPayload {
                    frame,
                    offset,
                    msg_type: header.msg_type,
                    reason: reason.clone(),
                });
            }
            _ => {}
        }
        self.messages.push(message);
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::protocols::jsf::encode::encode_frame;
    use crate::protocols::jsf::header::FrameHeader;
    use crate::protocols::jsf::layout;
    use crate::source::StreamSource;

    fn timestamp_frame(code: u16, time: i32) -> Vec<u8> {
        let mut payload = time.to_le_bytes().to_vec();
        payload.extend_from_slice(&0i32.to_le_bytes());
        encode_frame(FrameHeader::new(code, 0), &payload).unwrap()
    }

    fn walk(bytes: Vec<u8>, options: DecodeOptions) -> DecodedSequence {
        Walker::new(StreamSource::new(Cursor::new(bytes)), options).walk()
    }

    #[test]
    fn clean_stream_ends_normally() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        bytes.extend(timestamp_frame(layout::MSG_CONTAINER_TIMESTAMP, 2));
        let seq = walk(bytes, DecodeOptions::default());
        assert_eq!(seq.messages.len(), 2);
        assert!(seq.warnings.is_empty());
        assert!(seq.is_complete());
        assert!(!seq.termination.is_error());
    }

    #[test]
    fn empty_stream_has_no_messages() {
        let seq = walk(Vec::new(), DecodeOptions::default());
        assert!(seq.messages.is_empty());
        assert_eq!(seq.termination, Termination::EndOfStream);
    }

    #[test]
    fn trailing_partial_header_is_reported() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        bytes.extend_from_slice(&[0x01, 0x16, 0x00, 0x00, 0x00]);
        let seq = walk(bytes, DecodeOptions::default());
        assert_eq!(seq.messages.len(), 1);
        assert_eq!(
            seq.termination,
            Termination::TruncatedHeader {
                offset: 24,
                available: 5
            }
        );
        assert!(seq.termination.is_error());
    }

    #[test]
    fn unknown_and_malformed_do_not_stop_walk() {
        let mut bytes = encode_frame(FrameHeader::new(4242, 0), &[9, 9]).unwrap();
        bytes.extend(encode_frame(FrameHeader::new(layout::MSG_PITCH_ROLL, 0), &[0; 10]).unwrap());
        bytes.extend(timestamp_frame(layout::MSG_FILE_TIMESTAMP, 3));
        let seq = walk(bytes, DecodeOptions::default());

        assert_eq!(seq.messages.len(), 3);
        assert!(seq.messages[0].is_unknown());
        assert!(seq.messages[1].is_malformed());
        assert_eq!(seq.messages[2].unix_time(), Some(3));
        assert_eq!(seq.unknown_count(), 1);
        assert_eq!(seq.malformed_count(), 1);
        assert_eq!(seq.warnings.len(), 2);
        assert!(matches!(
            seq.warnings[0],
            Warning::UnknownMessageType {
                frame: 0,
                offset: 0,
                msg_type: 4242
            }
        ));
        assert!(matches!(
            seq.warnings[1],
            Warning::MalformedPayload {
                frame: 1,
                offset: 18,
                msg_type: 2020,
                ..
            }
        ));
        assert!(seq.is_complete());
    }

    #[test]
    fn marker_policy_warn_records_and_continues() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        bytes[0] = 0xEE;
        let seq = walk(bytes, DecodeOptions::default());
        assert_eq!(seq.messages.len(), 1);
        assert!(matches!(
            seq.warnings[0],
            Warning::MarkerMismatch { frame: 0, .. }
        ));
    }

    #[test]
    fn marker_policy_ignore_is_silent() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        bytes[0] = 0xEE;
        let seq = walk(
            bytes,
            DecodeOptions::default().with_marker_policy(MarkerPolicy::Ignore),
        );
        assert_eq!(seq.messages.len(), 1);
        assert!(seq.warnings.is_empty());
    }

    #[test]
    fn marker_policy_reject_stops_before_payload() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        let mut bad = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 2);
        bad[0] = 0xEE;
        bytes.extend(bad);
        let seq = walk(
            bytes,
            DecodeOptions::default().with_marker_policy(MarkerPolicy::Reject),
        );
        assert_eq!(seq.messages.len(), 1);
        assert_eq!(
            seq.termination,
            Termination::BadMarker {
                offset: 24,
                found: 0x16EE
            }
        );
    }

    #[test]
    fn cancel_before_first_frame() {
        let bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        let walker = Walker::new(StreamSource::new(Cursor::new(bytes)), DecodeOptions::default());
        let seq = walker.walk_until(&AtomicBool::new(true));
        assert!(seq.messages.is_empty());
        assert_eq!(seq.termination, Termination::Cancelled);
    }

    #[test]
    fn stepping_then_finishing_keeps_progress() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        bytes.extend(timestamp_frame(layout::MSG_FILE_TIMESTAMP, 2));
        let mut walker =
            Walker::new(StreamSource::new(Cursor::new(bytes)), DecodeOptions::default());
        assert!(walker.step());
        assert_eq!(walker.messages().len(), 1);
        let seq = walker.finish();
        assert_eq!(seq.messages.len(), 1);
        assert_eq!(seq.termination, Termination::Cancelled);
    }

    #[test]
    fn step_after_done_is_noop() {
        let mut walker = Walker::new(
            StreamSource::new(Cursor::new(Vec::new())),
            DecodeOptions::default(),
        );
        assert!(!walker.step());
        assert!(walker.is_done());
        assert!(!walker.step());
    }

    #[test]
    fn messages_of_type_filters_in_order() {
        let mut bytes = timestamp_frame(layout::MSG_FILE_TIMESTAMP, 1);
        bytes.extend(timestamp_frame(layout::MSG_CONTAINER_TIMESTAMP, 2));
        bytes.extend(timestamp_frame(layout::MSG_FILE_TIMESTAMP, 3));
        let seq = walk(bytes, DecodeOptions::default());
        let stamps = seq.messages_of_type(layout::MSG_FILE_TIMESTAMP);
        assert_eq!(stamps.len(), 2);
        assert_eq!(stamps[0].unix_time(), Some(1));
        assert_eq!(stamps[1].unix_time(), Some(3));
        assert_eq!(seq.count_by_type().get(&layout::MSG_CONTAINER_TIMESTAMP), Some(&1));
    }
}
