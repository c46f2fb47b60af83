//! Static message-type dispatch.
//!
//! The table is sorted by code and never changes at runtime. A code that is
//! not listed decodes to `MessageBody::Unknown`; a listed code whose payload
//! fails its layout check decodes to `MessageBody::Malformed`. Neither case
//! is an error for the caller.

use super::error::JsfError;
use super::header::FrameHeader;
use super::layout;
use super::messages::{self, DecodedMessage, MessageBody};

pub type PayloadDecoder = fn(&[u8]) -> Result<MessageBody, JsfError>;

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub code: u16,
    pub name: &'static str,
    pub decode: PayloadDecoder,
}

static REGISTRY: [RegistryEntry; 15] = [
    RegistryEntry {
        code: layout::MSG_SONAR_DATA,
        name: "Sonar Data",
        decode: |p| messages::sonar::parse_sonar_data(p).map(MessageBody::SonarData),
    },
    RegistryEntry {
        code: layout::MSG_SIDE_SCAN,
        name: "Side-scan Sonar",
        decode: |p| messages::sonar::parse_side_scan(p).map(MessageBody::SideScan),
    },
    RegistryEntry {
        code: layout::MSG_SYSTEM_INFO,
        name: "System Event",
        decode: |p| messages::system::parse_system_info(p).map(MessageBody::SystemInfo),
    },
    RegistryEntry {
        code: layout::MSG_FILE_TIMESTAMP,
        name: "File Timestamp",
        decode: |p| messages::system::parse_timestamp(p).map(MessageBody::FileTimestamp),
    },
    RegistryEntry {
        code: layout::MSG_FILE_PADDING,
        name: "File Padding",
        decode: |p| messages::system::parse_file_padding(p).map(MessageBody::FilePadding),
    },
    RegistryEntry {
        code: layout::MSG_NMEA_STRING,
        name: "NMEA String",
        decode: |p| messages::sensors::parse_nmea_string(p).map(MessageBody::NmeaString),
    },
    RegistryEntry {
        code: layout::MSG_PITCH_ROLL,
        name: "Pitch Roll Data",
        decode: |p| messages::sensors::parse_pitch_roll(p).map(MessageBody::PitchRoll),
    },
    RegistryEntry {
        code: layout::MSG_PRESSURE_SENSOR,
        name: "Pressure Sensor Reading",
        decode: |p| messages::sensors::parse_pressure_sensor(p).map(MessageBody::PressureSensor),
    },
    RegistryEntry {
        code: layout::MSG_DOPPLER_VELOCITY_LOG,
        name: "Doppler Velocity Log",
        decode: |p| {
            messages::sensors::parse_doppler_velocity_log(p).map(MessageBody::DopplerVelocityLog)
        },
    },
    RegistryEntry {
        code: layout::MSG_SITUATION,
        name: "Situation Message",
        decode: |p| messages::sensors::parse_situation(p).map(MessageBody::Situation),
    },
    RegistryEntry {
        code: layout::MSG_CABLE_COUNTER,
        name: "Cable Counter Data",
        decode: |p| messages::system::parse_cable_counter(p).map(MessageBody::CableCounter),
    },
    RegistryEntry {
        code: layout::MSG_CONTAINER_TIMESTAMP,
        name: "Container Timestamp",
        decode: |p| messages::system::parse_timestamp(p).map(MessageBody::ContainerTimestamp),
    },
    RegistryEntry {
        code: layout::MSG_DISCOVER2_PREFIX,
        name: "Discover-2 General Prefix",
        decode: |p| {
            messages::discover2::parse_discover2_prefix(p).map(MessageBody::Discover2Prefix)
        },
    },
    RegistryEntry {
        code: layout::MSG_DISCOVER2_SITUATION,
        name: "Discover-2 Situation Data",
        decode: |p| {
            messages::discover2::parse_discover2_situation(p).map(MessageBody::Discover2Situation)
        },
    },
    RegistryEntry {
        code: layout::MSG_DISCOVER2_ACOUSTIC,
        name: "Discover-2 Acoustic Prefix",
        decode: |p| {
            messages::discover2::parse_discover2_acoustic(p).map(MessageBody::Discover2Acoustic)
        },
    },
];

/// All registered message types, ordered by code.
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}

pub fn lookup(code: u16) -> Option<&'static RegistryEntry> {
    REGISTRY
        .binary_search_by_key(&code, |entry| entry.code)
        .ok()
        .map(|idx| &REGISTRY[idx])
}

pub fn message_name(code: u16) -> Option<&'static str> {
    lookup(code).map(|entry| entry.name)
}

/// Decode one payload. Never fails; see the module docs for fallbacks.
///
/// # Examples
/// ```
/// use jsfscan_core::protocols::jsf::header::FrameHeader;
/// use jsfscan_core::protocols::jsf::messages::MessageBody;
/// use jsfscan_core::protocols::jsf::registry;
///
/// let msg = registry::decode(FrameHeader::new(4242, 2), &[1, 2]);
/// assert_eq!(msg.body, MessageBody::Unknown { raw: vec![1, 2] });
/// ```
pub fn decode(header: FrameHeader, payload: &[u8]) -> DecodedMessage {
    let body = match lookup(header.msg_type) {
        Some(entry) => match (entry.decode)(payload) {
            Ok(body) => body,
            Err(err) => MessageBody::Malformed {
                raw: payload.to_vec(),
                reason: err.to_string(),
            },
        },
        None => MessageBody::Unknown {
            raw: payload.to_vec(),
        },
    };
    DecodedMessage { header, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(REGISTRY.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn every_documented_type_is_registered() {
        for code in [
            80, 82, 182, 426, 428, 2002, 2020, 2060, 2080, 2090, 2100, 2111, 9001, 9002, 9003,
        ] {
            assert!(lookup(code).is_some(), "missing decoder for {code}");
        }
        assert!(lookup(81).is_none());
    }

    #[test]
    fn short_known_payload_is_malformed() {
        let msg = decode(FrameHeader::new(layout::MSG_FILE_TIMESTAMP, 3), &[1, 2, 3]);
        match msg.body {
            MessageBody::Malformed { raw, reason } => {
                assert_eq!(raw, vec![1, 2, 3]);
                assert!(reason.contains("payload shorter than fixed layout"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn known_payload_decodes() {
        let mut payload = 5i32.to_le_bytes().to_vec();
        payload.extend_from_slice(&6i32.to_le_bytes());
        let msg = decode(FrameHeader::new(layout::MSG_CONTAINER_TIMESTAMP, 8), &payload);
        assert!(matches!(
            msg.body,
            MessageBody::ContainerTimestamp(t) if t.time == 5 && t.millis == 6
        ));
    }

    #[test]
    fn names_resolve() {
        assert_eq!(message_name(80), Some("Sonar Data"));
        assert_eq!(message_name(9003), Some("Discover-2 Acoustic Prefix"));
        assert_eq!(message_name(1), None);
    }
}
