//! EdgeTech JSF framed sonar data.
//!
//! A JSF stream is a plain concatenation of frames: a fixed 16-byte header
//! (`header`) followed by `msg_len` payload bytes whose shape is selected by
//! the header's message type. `registry` maps message types to the record
//! decoders in `messages`; unknown or malformed payloads are kept as data
//! instead of failing the frame.
//!
//! Offsets live in `layout`, bounds-checked reads in `reader`, and the
//! inverse writes used for round-trips in `encode`.

pub mod encode;
pub mod error;
pub mod header;
pub mod layout;
pub mod messages;
pub mod reader;
pub mod registry;

pub use error::{EncodeError, HeaderError, JsfError};
pub use header::{FrameHeader, decode_header};
pub use messages::{DecodedMessage, MessageBody};
