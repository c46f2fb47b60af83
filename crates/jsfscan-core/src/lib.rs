//! jsfscan core library for offline decoding of EdgeTech JSF captures.
//!
//! A JSF file is a flat sequence of frames, each a fixed 16-byte header
//! followed by a payload whose length the header declares. Frame sources
//! read header and payload bytes, the walker dispatches each payload through
//! a static registry of per-type decoders, and the result is an ordered
//! sequence of decoded messages that can be summarized into a report.
//! Decoders are byte-oriented and side-effect free; all I/O is isolated in
//! `source` modules.
//!
//! Invariants:
//! - Messages appear in stream order and carry their originating header.
//! - An unknown or malformed payload never stops the walk.
//! - A truncated stream keeps every message decoded before the cut.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use jsfscan_core::{DecodeOptions, decode_jsf_file};
//!
//! let seq = decode_jsf_file(Path::new("survey.jsf"), &DecodeOptions::default())?;
//! for msg in seq.messages_of_type(2020) {
//!     println!("{:?}", msg.body);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod protocols;
pub mod sniff;
mod source;
pub mod words;

pub use analysis::{
    DecodeError, DecodeOptions, DecodedSequence, MarkerPolicy, Termination, Walker, Warning,
    analyze_jsf_file, build_report, decode_bytes, decode_jsf_file, decode_jsf_file_until,
    decode_source,
};
pub use protocols::jsf::{DecodedMessage, FrameHeader, MessageBody};
pub use source::{Frame, FrameSource, JsfFileSource, SourceError, StreamSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no record carries a time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Summary of one decoded capture.
///
/// # Examples
/// ```
/// use jsfscan_core::make_stub_report;
///
/// let report = make_stub_report("survey.jsf", 123);
/// assert_eq!(report.report_version, jsfscan_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp; the latest record time when one exists.
    pub generated_at: String,
    pub input: InputInfo,
    pub summary: DecodeSummary,
    /// Why the walk stopped.
    pub termination: Termination,
    /// Per-frame warnings in stream order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    /// Full decoded messages, only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<DecodedMessage>>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use jsfscan_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "jsfscan".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "jsfscan");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input file metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Frame counts and time span of a capture.
///
/// # Examples
/// ```
/// use jsfscan_core::DecodeSummary;
///
/// let summary = DecodeSummary::default();
/// assert_eq!(summary.frames_total, 0);
/// assert!(summary.types.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeSummary {
    /// Frames decoded, including unknown and malformed ones.
    pub frames_total: u64,
    pub unknown: u64,
    pub malformed: u64,
    /// RFC3339 time of the earliest timed record (if any).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 time of the latest timed record (if any).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
    /// Per-type counts ordered by message type.
    pub types: Vec<TypeCount>,
}

/// Count of frames with one message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub msg_type: u16,
    /// Registry name; absent for unknown types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: u64,
}

/// Build a report with base fields filled and an empty summary.
///
/// # Examples
/// ```
/// use jsfscan_core::{Termination, make_stub_report};
///
/// let report = make_stub_report("survey.jsf", 123);
/// assert_eq!(report.input.bytes, 123);
/// assert_eq!(report.termination, Termination::EndOfStream);
/// assert!(report.messages.is_none());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "jsfscan".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary::default(),
        termination: Termination::EndOfStream,
        warnings: vec![],
        messages: None,
    }
}
