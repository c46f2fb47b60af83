//! Raw-buffer inspection for files whose framing is not known yet.
//!
//! `sniff` runs the word decoders over a buffer and keeps three parallel
//! projections (8, 16 and 32-bit). It is independent of the JSF pipeline:
//! nothing here looks at headers or message types. Large files are read
//! through [`read_prefix`] and [`read_segments`], which never hold more than
//! the requested prefix or the segment being scanned.

use std::io::{self, ErrorKind, Read};

use serde::Serialize;

use crate::words::{decode8, decode16, decode32, project};

/// Length of the leading block used as a candidate record delimiter.
pub const DELIMITER_LEN: usize = 8;

const SCAN_CHUNK: usize = 64 * 1024;

/// One decoded word and its char rendering.
///
/// Bytes render to a single `char`; wider words to a `String`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word<T, C = String> {
    pub value: T,
    pub chars: C,
}

/// Parallel 8/16/32-bit projections of a raw buffer.
///
/// Trailing bytes that do not fill a complete 16- or 32-bit word are left
/// out of the wider projections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Sniff {
    pub bytes: Vec<Word<u8, char>>,
    pub words16: Vec<Word<i16>>,
    pub words32: Vec<Word<i32>>,
}

impl Sniff {
    /// Concatenated char rendering of the 8-bit projection.
    pub fn text8(&self) -> String {
        self.bytes.iter().map(|w| w.chars).collect()
    }

    /// Concatenated char rendering of the 16-bit projection.
    pub fn text16(&self) -> String {
        self.words16.iter().map(|w| w.chars.as_str()).collect()
    }

    /// Concatenated char rendering of the 32-bit projection.
    pub fn text32(&self) -> String {
        self.words32.iter().map(|w| w.chars.as_str()).collect()
    }
}

/// Build all three projections over `raw`.
///
/// # Examples
/// ```
/// use jsfscan_core::sniff::sniff;
///
/// let out = sniff(b"ABCDE");
/// assert_eq!(out.bytes.len(), 5);
/// assert_eq!(out.words16.len(), 2);
/// assert_eq!(out.words32.len(), 1);
/// assert_eq!(out.text32(), "ABCD");
/// ```
pub fn sniff(raw: &[u8]) -> Sniff {
    let bytes = raw
        .iter()
        .map(|&b| {
            let (value, chars) = decode8(b);
            Word { value, chars }
        })
        .collect();
    let words16 = raw
        .chunks_exact(2)
        .map(|c| {
            let (value, chars) = decode16(c[0], c[1]);
            Word { value, chars }
        })
        .collect();
    let words32 = raw
        .chunks_exact(4)
        .map(|c| {
            let (value, chars) = decode32(c[0], c[1], c[2], c[3]);
            Word { value, chars }
        })
        .collect();
    Sniff {
        bytes,
        words16,
        words32,
    }
}

/// Read at most `max` bytes from the start of `reader`.
///
/// # Examples
/// ```
/// use jsfscan_core::sniff::read_prefix;
///
/// let prefix = read_prefix(&b"ABCDEFGH"[..], 3)?;
/// assert_eq!(prefix, b"ABC");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_prefix<R: Read>(reader: R, max: usize) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.take(max as u64).read_to_end(&mut out)?;
    Ok(out)
}

/// Split `raw` on its own leading block and render each piece as text.
///
/// Many undocumented survey formats open every record with the same magic
/// block, so the leading [`DELIMITER_LEN`] bytes are tried as a separator.
/// The first element is always empty when the buffer starts with the
/// delimiter. Buffers shorter than the delimiter yield a single segment.
///
/// # Examples
/// ```
/// use jsfscan_core::sniff::segments;
///
/// let parts = segments(b"MAGIC123one MAGIC123two");
/// assert_eq!(parts, vec!["", "one ", "two"]);
/// ```
pub fn segments(raw: &[u8]) -> Vec<String> {
    if raw.len() < DELIMITER_LEN {
        return vec![String::from_utf8_lossy(raw).into_owned()];
    }
    let delimiter = &raw[..DELIMITER_LEN];
    let mut out = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos + DELIMITER_LEN <= raw.len() {
        if &raw[pos..pos + DELIMITER_LEN] == delimiter {
            out.push(String::from_utf8_lossy(&raw[start..pos]).into_owned());
            pos += DELIMITER_LEN;
            start = pos;
        } else {
            pos += 1;
        }
    }
    out.push(String::from_utf8_lossy(&raw[start..]).into_owned());
    out
}

/// Streaming form of [`segments`] that stops after `limit` segments.
///
/// Only the segment currently being scanned is buffered, so the cost is
/// bounded by the longest segment returned rather than the input size.
///
/// # Examples
/// ```
/// use jsfscan_core::sniff::read_segments;
///
/// let parts = read_segments(&b"MAGIC123one MAGIC123two"[..], 2)?;
/// assert_eq!(parts, vec!["", "one "]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_segments<R: Read>(reader: R, limit: usize) -> io::Result<Vec<String>> {
    scan_segments(reader, limit, SCAN_CHUNK)
}

fn scan_segments<R: Read>(
    mut reader: R,
    limit: usize,
    chunk: usize,
) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    if limit == 0 {
        return Ok(out);
    }
    let mut pending = read_prefix(&mut reader, DELIMITER_LEN)?;
    if pending.len() < DELIMITER_LEN {
        out.push(String::from_utf8_lossy(&pending).into_owned());
        return Ok(out);
    }
    let delimiter = pending.clone();
    let mut scan_from = 0;
    let mut buf = vec![0u8; chunk.max(1)];
    loop {
        let found = pending
            .get(scan_from..)
            .and_then(|tail| {
                tail.windows(DELIMITER_LEN)
                    .position(|w| w == delimiter.as_slice())
            })
            .map(|idx| scan_from + idx);
        if let Some(pos) = found {
            out.push(String::from_utf8_lossy(&pending[..pos]).into_owned());
            if out.len() == limit {
                return Ok(out);
            }
            pending.drain(..pos + DELIMITER_LEN);
            scan_from = 0;
            continue;
        }
        // a match may straddle the next chunk
        scan_from = pending.len().saturating_sub(DELIMITER_LEN - 1);
        let read = match reader.read(&mut buf) {
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if read == 0 {
            out.push(String::from_utf8_lossy(&pending).into_owned());
            return Ok(out);
        }
        pending.extend_from_slice(&buf[..read]);
    }
}

/// Render the leading delimiter block, projected to ASCII.
pub fn delimiter_text(raw: &[u8]) -> String {
    project(&raw[..raw.len().min(DELIMITER_LEN)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_are_parallel() {
        let raw = [65u8, 66, 0xFF, 0xFF, 67, 68, 69, 70];
        let out = sniff(&raw);
        assert_eq!(out.bytes.len(), 8);
        assert_eq!(out.words16.len(), 4);
        assert_eq!(out.words32.len(), 2);
        assert_eq!(out.words16[0].value, 16961);
        assert_eq!(out.words16[1].value, -1);
        assert_eq!(out.text8(), "AB??CDEF");
        assert_eq!(out.text16(), "AB??CDEF");
        assert_eq!(out.text32(), "AB??CDEF");
    }

    #[test]
    fn incomplete_trailing_words_are_dropped() {
        let out = sniff(&[1, 2, 3]);
        assert_eq!(out.bytes.len(), 3);
        assert_eq!(out.words16.len(), 1);
        assert!(out.words32.is_empty());
    }

    #[test]
    fn empty_buffer_yields_empty_projections() {
        let out = sniff(&[]);
        assert!(out.bytes.is_empty());
        assert!(out.words16.is_empty());
        assert!(out.words32.is_empty());
    }

    #[test]
    fn segments_short_buffer() {
        assert_eq!(segments(b"abc"), vec!["abc"]);
    }

    #[test]
    fn segments_without_repeat() {
        assert_eq!(segments(b"HEADER01payload"), vec!["", "payload"]);
    }

    #[test]
    fn delimiter_text_projects_non_ascii() {
        assert_eq!(delimiter_text(&[0x41, 0x80, 0x42]), "A?B");
    }

    #[test]
    fn bytes_render_as_single_chars() {
        let out = sniff(&[0x41, 0x90]);
        assert_eq!(out.bytes[0], Word { value: 0x41, chars: 'A' });
        assert_eq!(out.bytes[1].chars, '?');
    }

    #[test]
    fn prefix_bounds_the_read() {
        let raw = vec![0x41u8; 1 << 16];
        let prefix = read_prefix(&raw[..], 6).unwrap();
        assert_eq!(prefix.len(), 6);
        assert_eq!(sniff(&prefix).words16.len(), 3);
    }

    #[test]
    fn streamed_segments_match_in_memory_split() {
        let inputs: [&[u8]; 5] = [
            b"abc",
            b"HEADER01payload",
            b"MAGIC123one MAGIC123two",
            b"MAGIC123MAGIC123MAGIC12",
            b"DELIM-01aaaaDELIM-01bbbbbbbbbbDELIM-01",
        ];
        for raw in inputs {
            for chunk in [1, 3, 7, 64] {
                let streamed = scan_segments(raw, usize::MAX, chunk).unwrap();
                assert_eq!(streamed, segments(raw), "chunk {chunk}");
            }
        }
    }

    #[test]
    fn streamed_segments_stop_at_limit() {
        let mut raw = Vec::new();
        for i in 0..1000 {
            raw.extend_from_slice(b"RECORD!!");
            raw.extend_from_slice(format!("{i}").as_bytes());
        }
        let parts = scan_segments(&raw[..], 3, 5).unwrap();
        assert_eq!(parts, vec!["", "0", "1"]);
        assert!(read_segments(&raw[..], 0).unwrap().is_empty());
    }
}
