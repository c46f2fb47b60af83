//! Discover-2 records (types 9001–9003).
//!
//! Every 9002 and 9003 payload opens with a complete 9001 general prefix;
//! 9003 additionally carries a full 9002 record after its own fields.
//! Nested failures are reported with the name of the inner record so the
//! reason string points at the part of the payload that was short.

use serde::{Deserialize, Serialize};

use crate::protocols::jsf::error::JsfError;
use crate::protocols::jsf::layout::{
    discover2_acoustic as ac, discover2_prefix as gp, discover2_situation as st,
};
use crate::protocols::jsf::reader::JsfReader;

/// General prefix shared by all Discover-2 records (type 9001).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discover2Prefix {
    pub timestamp: i64,
    pub serial_number: i32,
    pub version: i16,
    pub device: u16,
}

pub fn parse_discover2_prefix(payload: &[u8]) -> Result<Discover2Prefix, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(gp::FIXED_LEN)?;

    Ok(Discover2Prefix {
        timestamp: r.read_i64(gp::TIMESTAMP)?,
        serial_number: r.read_i32(gp::SERIAL_NUMBER)?,
        version: r.read_i16(gp::VERSION)?,
        device: r.read_u16(gp::DEVICE)?,
    })
}

/// Situation data record (type 9002).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discover2Situation {
    pub prefix: Discover2Prefix,
    pub sensor_platform: u16,
    pub platform_enum: u16,
    pub ids_in_list: u32,
    /// Opaque situation object following the identifier header.
    pub data: Vec<u8>,
}

pub fn parse_discover2_situation(payload: &[u8]) -> Result<Discover2Situation, JsfError> {
    let r = JsfReader::new(payload);
    let prefix = r
        .read_slice(st::PREFIX)
        .and_then(parse_discover2_prefix)
        .map_err(|e| JsfError::nested("9001 general prefix", e))?;
    r.require_len(st::FIXED_LEN)?;

    Ok(Discover2Situation {
        prefix,
        sensor_platform: r.read_u16(st::SENSOR_PLATFORM)?,
        platform_enum: r.read_u16(st::PLATFORM_ENUM)?,
        ids_in_list: r.read_u32(st::IDS_IN_LIST)?,
        data: r.read_tail(st::DATA_OBJECT)?.to_vec(),
    })
}

/// Acoustic prefix record (type 9003).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discover2Acoustic {
    pub prefix: Discover2Prefix,
    pub ping_number: u32,
    /// kHz.
    pub mixer_freq: f32,
    /// 0.0–1.0 of a full cycle (0.5 is 180°).
    pub mixer_phase: f32,
    /// kHz.
    pub sample_rate: f32,
    pub sample_offset: u32,
    pub pulse_index: u16,
    pub data_source: u8,
    pub mpx_pulse: u8,
    pub packet_number: u32,
    pub situation: Discover2Situation,
}

pub fn parse_discover2_acoustic(payload: &[u8]) -> Result<Discover2Acoustic, JsfError> {
    let r = JsfReader::new(payload);
    let prefix = r
        .read_slice(ac::PREFIX)
        .and_then(parse_discover2_prefix)
        .map_err(|e| JsfError::nested("9001 general prefix", e))?;
    r.require_len(ac::FIXED_LEN)?;
    let situation = parse_discover2_situation(r.read_tail(ac::SITUATION)?)
        .map_err(|e| JsfError::nested("9002 situation", e))?;

    Ok(Discover2Acoustic {
        prefix,
        ping_number: r.read_u32(ac::PING_NUMBER)?,
        mixer_freq: r.read_f32(ac::MIXER_FREQ)?,
        mixer_phase: r.read_f32(ac::MIXER_PHASE)?,
        sample_rate: r.read_f32(ac::SAMPLE_RATE)?,
        sample_offset: r.read_u32(ac::SAMPLE_OFFSET)?,
        pulse_index: r.read_u16(ac::PULSE_INDEX)?,
        data_source: r.read_u8(ac::DATA_SOURCE)?,
        mpx_pulse: r.read_u8(ac::MPX_PULSE)?,
        packet_number: r.read_u32(ac::PACKET_NUMBER)?,
        situation,
    })
}
