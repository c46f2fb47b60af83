use thiserror::Error;

/// Errors returned by JSF payload decoding.
///
/// # Examples
/// ```
/// use jsfscan_core::protocols::jsf::error::JsfError;
///
/// let err = JsfError::TooShort { needed: 8, actual: 3 };
/// assert!(err.to_string().contains("payload shorter than fixed layout"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsfError {
    #[error("payload shorter than fixed layout requires: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("nested {record} record invalid: {source}")]
    Nested {
        record: &'static str,
        #[source]
        source: Box<JsfError>,
    },
}

impl JsfError {
    pub(crate) fn nested(record: &'static str, source: JsfError) -> Self {
        JsfError::Nested {
            record,
            source: Box::new(source),
        }
    }
}

/// Header decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("truncated header: need {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },
}

/// Frame encoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("payload of {len} bytes does not fit the 32-bit length field")]
    PayloadTooLarge { len: usize },
}
