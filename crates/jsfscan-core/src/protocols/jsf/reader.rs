use std::ops::Range;

use super::error::JsfError;

/// Bounds-checked little-endian access into a payload.
pub struct JsfReader<'a> {
    payload: &'a [u8],
}

impl<'a> JsfReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), JsfError> {
        if self.payload.len() < needed {
            return Err(JsfError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], JsfError> {
        self.payload.get(range.clone()).ok_or(JsfError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    /// Everything from `offset` to the end of the payload.
    pub fn read_tail(&self, offset: usize) -> Result<&'a [u8], JsfError> {
        self.payload.get(offset..).ok_or(JsfError::TooShort {
            needed: offset,
            actual: self.payload.len(),
        })
    }

    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], JsfError> {
        let bytes = self.read_slice(offset..offset + N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, JsfError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(JsfError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, JsfError> {
        self.read_array(offset).map(u16::from_le_bytes)
    }

    pub fn read_i16(&self, offset: usize) -> Result<i16, JsfError> {
        self.read_array(offset).map(i16::from_le_bytes)
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, JsfError> {
        self.read_array(offset).map(u32::from_le_bytes)
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32, JsfError> {
        self.read_array(offset).map(i32::from_le_bytes)
    }

    pub fn read_u64(&self, offset: usize) -> Result<u64, JsfError> {
        self.read_array(offset).map(u64::from_le_bytes)
    }

    pub fn read_i64(&self, offset: usize) -> Result<i64, JsfError> {
        self.read_array(offset).map(i64::from_le_bytes)
    }

    pub fn read_f32(&self, offset: usize) -> Result<f32, JsfError> {
        self.read_array(offset).map(f32::from_le_bytes)
    }

    pub fn read_f64(&self, offset: usize) -> Result<f64, JsfError> {
        self.read_array(offset).map(f64::from_le_bytes)
    }

    /// Flag stored as a 16-bit word; any non-zero value is set.
    pub fn read_flag16(&self, offset: usize) -> Result<bool, JsfError> {
        self.read_i16(offset).map(|v| v != 0)
    }

    /// Fixed-width C string; ends at the first NUL and invalid UTF-8 is replaced.
    pub fn read_text(&self, range: Range<usize>) -> Result<String, JsfError> {
        let bytes = self.read_slice(range)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(lossy_text(&bytes[..end]))
    }

    /// Text running to the end of the payload; trailing padding and line ends are trimmed.
    pub fn read_text_tail(&self, offset: usize) -> Result<String, JsfError> {
        let bytes = self.read_tail(offset)?;
        Ok(lossy_text(bytes))
    }
}

fn lossy_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', '\r', '\n'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::JsfReader;
    use crate::protocols::jsf::error::JsfError;

    #[test]
    fn reads_little_endian() {
        let data = [0x01, 0x16, 0xFF, 0xFF, 0x78, 0x56, 0x34, 0x12];
        let reader = JsfReader::new(&data);
        assert_eq!(reader.read_u16(0).unwrap(), 0x1601);
        assert_eq!(reader.read_i16(2).unwrap(), -1);
        assert_eq!(reader.read_u32(4).unwrap(), 0x1234_5678);
        assert_eq!(reader.read_i32(0).unwrap(), -59_903);
    }

    #[test]
    fn reads_floats() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&(-42.25f64).to_le_bytes());
        let reader = JsfReader::new(&data);
        assert_eq!(reader.read_f32(0).unwrap(), 1.5);
        assert_eq!(reader.read_f64(4).unwrap(), -42.25);
    }

    #[test]
    fn out_of_bounds_reports_needed() {
        let data = [0u8; 3];
        let reader = JsfReader::new(&data);
        let err = reader.read_u32(0).unwrap_err();
        assert_eq!(err, JsfError::TooShort { needed: 4, actual: 3 });
        assert!(reader.read_u8(3).is_err());
    }

    #[test]
    fn text_is_lossy_and_trimmed() {
        let data = [b'$', b'G', 0xFF, b'A', b'\n', 0, 0];
        let reader = JsfReader::new(&data);
        assert_eq!(reader.read_text_tail(0).unwrap(), "$G\u{FFFD}A");
    }

    #[test]
    fn fixed_text_stops_at_first_nul() {
        let data = *b"LINE\0xyz\0\0";
        let reader = JsfReader::new(&data);
        assert_eq!(reader.read_text(0..data.len()).unwrap(), "LINE");
        assert_eq!(reader.read_text(4..data.len()).unwrap(), "");
        assert_eq!(reader.read_text(5..8).unwrap(), "xyz");
        assert_eq!(reader.read_text_tail(0).unwrap(), "LINE\0xyz");
    }

    #[test]
    fn tail_past_end_is_error() {
        let data = [0u8; 4];
        let reader = JsfReader::new(&data);
        assert!(reader.read_tail(4).unwrap().is_empty());
        assert!(reader.read_tail(5).is_err());
    }

    #[test]
    fn flag16_nonzero() {
        let data = [0, 0, 2, 0];
        let reader = JsfReader::new(&data);
        assert!(!reader.read_flag16(0).unwrap());
        assert!(reader.read_flag16(2).unwrap());
    }
}
