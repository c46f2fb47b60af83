//! Typed JSF records and the decoded-message sum type.

pub mod discover2;
pub mod sensors;
pub mod sonar;
pub mod system;

use serde::{Deserialize, Serialize};

use super::header::FrameHeader;

pub use discover2::{Discover2Acoustic, Discover2Prefix, Discover2Situation};
pub use sensors::{DopplerVelocityLog, NmeaString, PitchRoll, PressureSensor, Situation};
pub use sonar::{SideScan, SonarData};
pub use system::{CableCounter, FilePadding, SystemInfo, Timestamp};

/// Payload shapes known to the decoder, plus the two fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    SonarData(SonarData),
    SideScan(SideScan),
    PitchRoll(PitchRoll),
    NmeaString(NmeaString),
    PressureSensor(PressureSensor),
    DopplerVelocityLog(DopplerVelocityLog),
    Situation(Situation),
    FileTimestamp(Timestamp),
    FilePadding(FilePadding),
    SystemInfo(SystemInfo),
    CableCounter(CableCounter),
    ContainerTimestamp(Timestamp),
    Discover2Prefix(Discover2Prefix),
    Discover2Situation(Discover2Situation),
    Discover2Acoustic(Discover2Acoustic),
    /// Message type absent from the registry; payload kept verbatim.
    Unknown { raw: Vec<u8> },
    /// Known type whose payload did not satisfy its layout.
    Malformed { raw: Vec<u8>, reason: String },
}

/// One frame after payload dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedMessage {
    pub header: FrameHeader,
    pub body: MessageBody,
}

impl DecodedMessage {
    pub fn msg_type(&self) -> u16 {
        self.header.msg_type
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.body, MessageBody::Unknown { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.body, MessageBody::Malformed { .. })
    }

    /// Unix seconds carried by the record, for records that have one.
    pub fn unix_time(&self) -> Option<i64> {
        let secs = match &self.body {
            MessageBody::PitchRoll(r) => r.time,
            MessageBody::NmeaString(r) => r.time,
            MessageBody::PressureSensor(r) => r.time,
            MessageBody::DopplerVelocityLog(r) => r.time,
            MessageBody::Situation(r) => r.time,
            MessageBody::FileTimestamp(r) | MessageBody::ContainerTimestamp(r) => r.time,
            MessageBody::CableCounter(r) => r.time,
            MessageBody::SonarData(r) => r.ping_time,
            _ => return None,
        };
        Some(i64::from(secs))
    }
}
