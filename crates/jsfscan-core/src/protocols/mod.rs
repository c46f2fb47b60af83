//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and fixed lengths (source of truth)
//! - `reader`: bounds-checked little-endian access
//! - `messages`: record-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Decoders are pure and contain no I/O; sources and the walker handle file
//! access and sequencing.

pub mod jsf;
