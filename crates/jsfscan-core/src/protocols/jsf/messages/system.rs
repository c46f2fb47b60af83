//! File-level and housekeeping records.

use serde::{Deserialize, Serialize};

use crate::protocols::jsf::error::JsfError;
use crate::protocols::jsf::layout::{cable_counter as cc, system_info as si, timestamp as ts};
use crate::protocols::jsf::reader::JsfReader;

/// Wall-clock stamp used by file (426) and container (2111) timestamp
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Seconds since 1970-01-01.
    pub time: i32,
    /// Milliseconds within the current second.
    pub millis: i32,
}

pub fn parse_timestamp(payload: &[u8]) -> Result<Timestamp, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(ts::FIXED_LEN)?;

    Ok(Timestamp {
        time: r.read_i32(ts::TIME)?,
        millis: r.read_i32(ts::MILLIS)?,
    })
}

/// Filler inserted by the recorder (type 428); only its size matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePadding {
    pub len: usize,
}

pub fn parse_file_padding(payload: &[u8]) -> Result<FilePadding, JsfError> {
    Ok(FilePadding { len: payload.len() })
}

/// System identification (type 182).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub system_type: i32,
    /// Description of `system_type`, `Unknown: <code>` when not listed.
    pub system_name: String,
    pub software_version: i32,
    pub serial_number: i32,
}

pub fn parse_system_info(payload: &[u8]) -> Result<SystemInfo, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(si::FIXED_LEN)?;

    let system_type = r.read_i32(si::SYSTEM_TYPE)?;
    Ok(SystemInfo {
        system_type,
        system_name: system_type_name(system_type)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown: {system_type}")),
        software_version: r.read_i32(si::SOFTWARE_VERSION)?,
        serial_number: r.read_i32(si::SERIAL_NUMBER)?,
    })
}

/// Fixed enumeration of sonar system families.
pub fn system_type_name(code: i32) -> Option<&'static str> {
    let name = match code {
        1 => "2xxx Series, Combined Sub-Bottom / Side Scan with SIB Electronics",
        2 => "2xxx Series, Combined Sub-Bottom / Side Scan with FSIC Electronics",
        4 => "4300-MPX (Multi-Ping)",
        5 => "3200-XS, Sub-Bottom Profiler with AIC Electronics",
        6 => "4400-SAS, 12-Channel Side Scan",
        7 => "3200-XS, Sub Bottom Profiler with SIB Electronics",
        11 => "4200 Limited Multipulse Dual Frequency Side Scan",
        14 => "3100-P, Sub Bottom Profiler",
        16 => "2xxx Series, Dual Side Scan with SIB Electronics",
        17 => "4200 Multipulse Dual Frequency Side Scan",
        18 => "4700 Dynamic Focus",
        19 => "4200 Dual Frequency Side Scan",
        20 => "4200 Dual Frequency non Simultaneous Side Scan",
        21 => "2200-MP Combined Sub-Bottom / Dual Frequency Multipulse Side Scan",
        23 => "4600 Multipulse Bathymetric System",
        24 => "4200 Single Frequency Dynamically Focused Side Scan",
        25 => "4125 Dual Frequency Side Scan",
        27 => "4600 Monopulse Bathymetric System",
        128 => "4100, 272 /560A Side Scan",
        _ => return None,
    };
    Some(name)
}

/// Tow cable counter (type 2100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableCounter {
    pub time: i32,
    pub millis: i32,
    /// Metres.
    pub length: f32,
    /// Metres per minute.
    pub speed: f32,
    pub length_valid: bool,
    pub speed_valid: bool,
    pub counter_error: bool,
    pub tension_valid: bool,
}

pub fn parse_cable_counter(payload: &[u8]) -> Result<CableCounter, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(cc::FIXED_LEN)?;

    Ok(CableCounter {
        time: r.read_i32(cc::TIME)?,
        millis: r.read_i32(cc::MILLIS)?,
        length: r.read_f32(cc::LENGTH)?,
        speed: r.read_f32(cc::SPEED)?,
        length_valid: r.read_flag16(cc::LENGTH_VALID)?,
        speed_valid: r.read_flag16(cc::SPEED_VALID)?,
        counter_error: r.read_flag16(cc::COUNTER_ERROR)?,
        tension_valid: r.read_flag16(cc::TENSION_VALID)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_ok() {
        let mut payload = 1_757_241_364i32.to_le_bytes().to_vec();
        payload.extend_from_slice(&512i32.to_le_bytes());
        let stamp = parse_timestamp(&payload).unwrap();
        assert_eq!(stamp.time, 1_757_241_364);
        assert_eq!(stamp.millis, 512);
    }

    #[test]
    fn parse_timestamp_short() {
        let err = parse_timestamp(&[0u8; 7]).unwrap_err();
        assert_eq!(err, JsfError::TooShort { needed: 8, actual: 7 });
    }

    #[test]
    fn padding_accepts_any_length() {
        assert_eq!(parse_file_padding(&[]).unwrap().len, 0);
        assert_eq!(parse_file_padding(&[0u8; 300]).unwrap().len, 300);
    }

    #[test]
    fn parse_system_info_known_type() {
        let mut payload = Vec::new();
        for v in [17i32, 41, 90_210] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let info = parse_system_info(&payload).unwrap();
        assert_eq!(info.system_type, 17);
        assert_eq!(info.system_name, "4200 Multipulse Dual Frequency Side Scan");
        assert_eq!(info.software_version, 41);
        assert_eq!(info.serial_number, 90_210);
    }

    #[test]
    fn parse_system_info_unknown_type() {
        let mut payload = Vec::new();
        for v in [99i32, 0, 0] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let info = parse_system_info(&payload).unwrap();
        assert_eq!(info.system_name, "Unknown: 99");
    }

    #[test]
    fn parse_cable_counter_flags() {
        let mut payload = vec![0u8; cc::FIXED_LEN];
        payload[cc::LENGTH..cc::LENGTH + 4].copy_from_slice(&152.5f32.to_le_bytes());
        payload[cc::SPEED..cc::SPEED + 4].copy_from_slice(&(-3.0f32).to_le_bytes());
        payload[cc::LENGTH_VALID] = 1;
        payload[cc::TENSION_VALID + 1] = 0x80;

        let rec = parse_cable_counter(&payload).unwrap();
        assert_eq!(rec.length, 152.5);
        assert_eq!(rec.speed, -3.0);
        assert!(rec.length_valid);
        assert!(!rec.speed_valid);
        assert!(!rec.counter_error);
        assert!(rec.tension_valid);
    }
}
