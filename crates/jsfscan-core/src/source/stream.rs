use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::protocols::jsf::layout::HEADER_LEN;
use crate::protocols::jsf::{FrameHeader, decode_header};

use super::{FrameSource, SourceError};

/// Frame source over any byte reader (file, socket, in-memory cursor).
pub struct StreamSource<R> {
    reader: R,
    offset: u64,
}

impl<R: Read> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> FrameSource for StreamSource<R> {
    fn next_header(&mut self) -> Result<Option<FrameHeader>, SourceError> {
        let mut buf = [0u8; HEADER_LEN];
        let read = read_full(&mut self.reader, &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        let header = decode_header(&buf[..read]).map_err(|_| SourceError::TruncatedHeader {
            offset: self.offset,
            available: read,
        })?;
        self.offset += HEADER_LEN as u64;
        Ok(Some(header))
    }

    fn read_payload(&mut self, header: &FrameHeader) -> Result<Vec<u8>, SourceError> {
        let declared = header.msg_len;
        // Reading through `take` keeps a bogus length from allocating up front.
        let mut payload = Vec::new();
        (&mut self.reader)
            .take(u64::from(declared))
            .read_to_end(&mut payload)?;
        let start = self.offset;
        self.offset += payload.len() as u64;
        if payload.len() < declared as usize {
            return Err(SourceError::TruncatedPayload {
                offset: start,
                msg_type: header.msg_type,
                declared,
                available: payload.len(),
            });
        }
        Ok(payload)
    }

    fn offset(&self) -> u64 {
        self.offset
    }
}

/// Buffered JSF capture file.
pub struct JsfFileSource {
    inner: StreamSource<BufReader<File>>,
    len: u64,
}

impl JsfFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            inner: StreamSource::new(BufReader::new(file)),
            len,
        })
    }

    /// File size in bytes at open time.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl FrameSource for JsfFileSource {
    fn next_header(&mut self) -> Result<Option<FrameHeader>, SourceError> {
        self.inner.next_header()
    }

    fn read_payload(&mut self, header: &FrameHeader) -> Result<Vec<u8>, SourceError> {
        self.inner.read_payload(header)
    }

    fn offset(&self) -> u64 {
        self.inner.offset()
    }
}

/// Fill `buf` as far as the reader allows; returns the byte count.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, std::io::Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::protocols::jsf::encode::encode_frame;

    #[test]
    fn empty_stream_is_clean_end() {
        let mut source = StreamSource::new(Cursor::new(Vec::new()));
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn reads_consecutive_frames() {
        let mut bytes = encode_frame(FrameHeader::new(426, 0), &[1; 8]).unwrap();
        bytes.extend(encode_frame(FrameHeader::new(7, 0), &[2; 3]).unwrap());
        let mut source = StreamSource::new(Cursor::new(bytes));

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.header.msg_type, 426);
        assert_eq!(first.payload, vec![1; 8]);
        assert_eq!(source.offset(), 24);

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.header.msg_type, 7);
        assert_eq!(second.payload, vec![2; 3]);
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.offset(), 43);
    }

    #[test]
    fn partial_header_is_truncated() {
        let mut source = StreamSource::new(Cursor::new(vec![0x01, 0x16, 0x00]));
        let err = source.next_frame().unwrap_err();
        assert!(matches!(
            err,
            SourceError::TruncatedHeader {
                offset: 0,
                available: 3
            }
        ));
    }

    #[test]
    fn short_payload_is_truncated() {
        let mut bytes = encode_frame(FrameHeader::new(2002, 0), &[0; 20]).unwrap();
        bytes.truncate(16 + 5);
        let mut source = StreamSource::new(Cursor::new(bytes));
        let err = source.next_frame().unwrap_err();
        assert!(matches!(
            err,
            SourceError::TruncatedPayload {
                offset: 16,
                msg_type: 2002,
                declared: 20,
                available: 5
            }
        ));
    }

    #[test]
    fn file_source_reports_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.jsf");
        std::fs::write(&path, encode_frame(FrameHeader::new(2111, 0), &[0; 8]).unwrap()).unwrap();

        let mut source = JsfFileSource::open(&path).unwrap();
        assert_eq!(source.len(), 24);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = match JsfFileSource::open(&dir.path().join("missing.jsf")) {
            Ok(_) => panic!("expected missing file to be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, SourceError::Io(_)));
    }
}
