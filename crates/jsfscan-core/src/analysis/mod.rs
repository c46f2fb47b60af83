use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::AtomicBool;

use thiserror::Error;

use crate::DecodeReport;
use crate::source::{FrameSource, JsfFileSource, SourceError, StreamSource};

mod options;
mod summary;
mod walker;

pub use options::{DecodeOptions, MarkerPolicy};
pub use summary::build_report;
pub use walker::{DecodedSequence, Termination, Walker, Warning};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Open a JSF file and walk it to the end.
///
/// Only failing to open the file is an error; problems inside the stream are
/// reported through the returned sequence.
pub fn decode_jsf_file(
    path: &Path,
    options: &DecodeOptions,
) -> Result<DecodedSequence, DecodeError> {
    let source = JsfFileSource::open(path)?;
    Ok(decode_source(source, options))
}

/// Like [`decode_jsf_file`], stopping between frames once `cancel` is set.
pub fn decode_jsf_file_until(
    path: &Path,
    options: &DecodeOptions,
    cancel: &AtomicBool,
) -> Result<DecodedSequence, DecodeError> {
    let source = JsfFileSource::open(path)?;
    Ok(Walker::new(source, *options).walk_until(cancel))
}

/// Walk an in-memory capture.
///
/// # Examples
/// ```
/// use jsfscan_core::{DecodeOptions, Termination, decode_bytes};
///
/// let seq = decode_bytes(&[], &DecodeOptions::default());
/// assert!(seq.messages.is_empty());
/// assert_eq!(seq.termination, Termination::EndOfStream);
/// ```
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> DecodedSequence {
    decode_source(StreamSource::new(Cursor::new(bytes)), options)
}

pub fn decode_source<S: FrameSource>(source: S, options: &DecodeOptions) -> DecodedSequence {
    Walker::new(source, *options).walk()
}

/// Decode a file and summarize it.
pub fn analyze_jsf_file(
    path: &Path,
    options: &DecodeOptions,
    include_messages: bool,
) -> Result<DecodeReport, DecodeError> {
    let bytes = path.metadata()?.len();
    let sequence = decode_jsf_file(path, options)?;
    Ok(build_report(
        &path.display().to_string(),
        bytes,
        &sequence,
        include_messages,
    ))
}
