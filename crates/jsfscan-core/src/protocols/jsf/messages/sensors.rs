//! Auxiliary sensor records: attitude, NMEA, pressure, DVL and situation.
//!
//! All values are raw counts as stored on the wire. Field docs carry the
//! scale factor where the conversion is not the identity.

use serde::{Deserialize, Serialize};

use crate::protocols::jsf::error::JsfError;
use crate::protocols::jsf::layout::{
    doppler_velocity_log as dvl, nmea_string as nmea, pitch_roll as pr, pressure_sensor as ps,
    situation as sit,
};
use crate::protocols::jsf::reader::JsfReader;

/// Pitch/roll sensor sample (type 2020).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRoll {
    /// Seconds since 1970-01-01.
    pub time: i32,
    pub millis: u32,
    /// Multiply by (20 × 1.5) / 32768 for g.
    pub accel: [i16; 3],
    /// Multiply by (500 × 1.5) / 32768 for degrees/s.
    pub gyro_rate: [i16; 3],
    /// Multiply by 180 / 32768 for degrees, bow up positive.
    pub pitch: i16,
    /// Multiply by 180 / 32768 for degrees, port up positive.
    pub roll: i16,
    /// 0.1 °C.
    pub temperature: i16,
    pub device_info: u16,
    /// Millimetres.
    pub heave: i16,
    /// Centidegrees.
    pub heading: u16,
    pub validity: u32,
}

pub fn parse_pitch_roll(payload: &[u8]) -> Result<PitchRoll, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(pr::FIXED_LEN)?;

    Ok(PitchRoll {
        time: r.read_i32(pr::TIME)?,
        millis: r.read_u32(pr::MILLIS)?,
        accel: [
            r.read_i16(pr::ACCEL_X)?,
            r.read_i16(pr::ACCEL_Y)?,
            r.read_i16(pr::ACCEL_Z)?,
        ],
        gyro_rate: [
            r.read_i16(pr::GYRO_X)?,
            r.read_i16(pr::GYRO_Y)?,
            r.read_i16(pr::GYRO_Z)?,
        ],
        pitch: r.read_i16(pr::PITCH)?,
        roll: r.read_i16(pr::ROLL)?,
        temperature: r.read_i16(pr::TEMPERATURE)?,
        device_info: r.read_u16(pr::DEVICE_INFO)?,
        heave: r.read_i16(pr::HEAVE)?,
        heading: r.read_u16(pr::HEADING)?,
        validity: r.read_u32(pr::VALIDITY)?,
    })
}

/// Raw NMEA sentence captured by the topside (type 2002).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmeaString {
    pub time: i32,
    pub millis: i32,
    pub source: u8,
    pub sentence: String,
}

pub fn parse_nmea_string(payload: &[u8]) -> Result<NmeaString, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(nmea::FIXED_LEN)?;

    Ok(NmeaString {
        time: r.read_i32(nmea::TIME)?,
        millis: r.read_i32(nmea::MILLIS)?,
        source: r.read_u8(nmea::SOURCE)?,
        sentence: r.read_text_tail(nmea::SENTENCE)?,
    })
}

/// Pressure sensor reading (type 2060).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureSensor {
    pub time: i32,
    pub millis: i32,
    /// 0.001 PSI.
    pub pressure: i32,
    /// 0.1 °C.
    pub temperature: i32,
    /// Parts per million.
    pub salinity: i32,
    pub validity: i32,
    /// µS/cm.
    pub conductivity: i32,
    /// 0.1 m/s.
    pub sound_velocity: i32,
}

pub fn parse_pressure_sensor(payload: &[u8]) -> Result<PressureSensor, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(ps::FIXED_LEN)?;

    Ok(PressureSensor {
        time: r.read_i32(ps::TIME)?,
        millis: r.read_i32(ps::MILLIS)?,
        pressure: r.read_i32(ps::PRESSURE)?,
        temperature: r.read_i32(ps::TEMPERATURE)?,
        salinity: r.read_i32(ps::SALINITY)?,
        validity: r.read_i32(ps::VALIDITY)?,
        conductivity: r.read_i32(ps::CONDUCTIVITY)?,
        sound_velocity: r.read_i32(ps::SOUND_VELOCITY)?,
    })
}

/// Doppler velocity log sample (type 2080).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DopplerVelocityLog {
    pub time: i32,
    pub millis: i32,
    pub validity: u32,
    /// Centimetres, one per beam.
    pub beam_ranges: [i32; 4],
    /// mm/s relative to the bottom (x, y, z).
    pub bottom_velocity: [i16; 3],
    /// mm/s relative to the water column (x, y, z).
    pub water_velocity: [i16; 3],
    /// Millimetres.
    pub depth: u16,
    /// 0.01°, bow up positive.
    pub pitch: i16,
    /// 0.01°, port up positive.
    pub roll: i16,
    /// 0.01°.
    pub heading: u16,
    /// Parts per thousand.
    pub salinity: u16,
    /// 0.01 °C.
    pub temperature: i16,
    /// m/s.
    pub sound_velocity: u16,
}

pub fn parse_doppler_velocity_log(payload: &[u8]) -> Result<DopplerVelocityLog, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(dvl::FIXED_LEN)?;

    let mut beam_ranges = [0i32; dvl::BEAM_COUNT];
    for (beam, range) in beam_ranges.iter_mut().enumerate() {
        *range = r.read_i32(dvl::BEAM_RANGES + beam * 4)?;
    }

    Ok(DopplerVelocityLog {
        time: r.read_i32(dvl::TIME)?,
        millis: r.read_i32(dvl::MILLIS)?,
        validity: r.read_u32(dvl::VALIDITY)?,
        beam_ranges,
        bottom_velocity: [
            r.read_i16(dvl::BOTTOM_VELOCITY_X)?,
            r.read_i16(dvl::BOTTOM_VELOCITY_Y)?,
            r.read_i16(dvl::BOTTOM_VELOCITY_Z)?,
        ],
        water_velocity: [
            r.read_i16(dvl::WATER_VELOCITY_X)?,
            r.read_i16(dvl::WATER_VELOCITY_Y)?,
            r.read_i16(dvl::WATER_VELOCITY_Z)?,
        ],
        depth: r.read_u16(dvl::DEPTH)?,
        pitch: r.read_i16(dvl::PITCH)?,
        roll: r.read_i16(dvl::ROLL)?,
        heading: r.read_u16(dvl::HEADING)?,
        salinity: r.read_u16(dvl::SALINITY)?,
        temperature: r.read_i16(dvl::TEMPERATURE)?,
        sound_velocity: r.read_u16(dvl::SOUND_VELOCITY)?,
    })
}

/// Three-axis quantity in the vehicle frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One-sigma uncertainties reported with a situation message.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SituationStdDev {
    /// Metres.
    pub lat: f64,
    /// Metres.
    pub lon: f64,
    /// Metres.
    pub depth: f64,
    /// Degrees.
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Navigation solution (type 2090).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    pub time: i32,
    pub millis: u32,
    pub validity: u32,
    /// Microseconds.
    pub timestamp_us: u64,
    /// Degrees, north positive.
    pub lat: f64,
    /// Degrees, east positive.
    pub lon: f64,
    /// Metres.
    pub depth: f64,
    /// Degrees.
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    /// Relative position in metres (forward, starboard, down).
    pub position: Triple,
    /// m/s in the vehicle frame.
    pub velocity: Triple,
    /// m/s (north, east, down).
    pub velocity_ned: Triple,
    /// deg/s.
    pub angular_rate: Triple,
    /// m/s².
    pub acceleration: Triple,
    pub std_dev: SituationStdDev,
}

pub fn parse_situation(payload: &[u8]) -> Result<Situation, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(sit::FIXED_LEN)?;

    let mut f = [0f64; sit::FLOAT_COUNT];
    for (i, value) in f.iter_mut().enumerate() {
        *value = r.read_f64(sit::FLOATS + i * 8)?;
    }
    let triple = |at: usize| Triple {
        x: f[at],
        y: f[at + 1],
        z: f[at + 2],
    };

    Ok(Situation {
        time: r.read_i32(sit::TIME)?,
        millis: r.read_u32(sit::MILLIS)?,
        validity: r.read_u32(sit::VALIDITY)?,
        timestamp_us: r.read_u64(sit::TIMESTAMP_US)?,
        lat: f[0],
        lon: f[1],
        depth: f[2],
        heading: f[3],
        pitch: f[4],
        roll: f[5],
        position: triple(6),
        velocity: triple(9),
        velocity_ned: triple(12),
        angular_rate: triple(15),
        acceleration: triple(18),
        std_dev: SituationStdDev {
            lat: f[21],
            lon: f[22],
            depth: f[23],
            heading: f[24],
            pitch: f[25],
            roll: f[26],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::jsf::layout;

    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    #[test]
    fn parse_pitch_roll_fields_follow_layout() {
        let mut payload = vec![0u8; layout::pitch_roll::FIXED_LEN];
        put(&mut payload, layout::pitch_roll::TIME, &1_757_000_000i32.to_le_bytes());
        put(&mut payload, layout::pitch_roll::MILLIS, &250u32.to_le_bytes());
        // reserved word must not leak into the acceleration fields
        put(&mut payload, 8, &0xDEAD_BEEFu32.to_le_bytes());
        put(&mut payload, layout::pitch_roll::ACCEL_X, &100i16.to_le_bytes());
        put(&mut payload, layout::pitch_roll::ACCEL_Z, &(-1000i16).to_le_bytes());
        put(&mut payload, layout::pitch_roll::GYRO_Y, &7i16.to_le_bytes());
        put(&mut payload, layout::pitch_roll::PITCH, &(-512i16).to_le_bytes());
        put(&mut payload, layout::pitch_roll::HEADING, &27_000u16.to_le_bytes());
        put(&mut payload, layout::pitch_roll::VALIDITY, &0b1011u32.to_le_bytes());

        let rec = parse_pitch_roll(&payload).unwrap();
        assert_eq!(rec.time, 1_757_000_000);
        assert_eq!(rec.millis, 250);
        assert_eq!(rec.accel, [100, 0, -1000]);
        assert_eq!(rec.gyro_rate, [0, 7, 0]);
        assert_eq!(rec.pitch, -512);
        assert_eq!(rec.heading, 27_000);
        assert_eq!(rec.validity, 0b1011);
    }

    #[test]
    fn parse_nmea_string_lossy() {
        let mut payload = vec![0u8; layout::nmea_string::FIXED_LEN];
        put(&mut payload, 0, &10i32.to_le_bytes());
        put(&mut payload, 4, &20i32.to_le_bytes());
        payload[layout::nmea_string::SOURCE] = 3;
        payload.extend_from_slice(b"$GPGGA,123519,4807.038,N\xFF*47\r\n\0");

        let rec = parse_nmea_string(&payload).unwrap();
        assert_eq!(rec.time, 10);
        assert_eq!(rec.millis, 20);
        assert_eq!(rec.source, 3);
        assert_eq!(rec.sentence, "$GPGGA,123519,4807.038,N\u{FFFD}*47");
    }

    #[test]
    fn parse_nmea_string_without_sentence() {
        let payload = vec![0u8; layout::nmea_string::FIXED_LEN];
        let rec = parse_nmea_string(&payload).unwrap();
        assert!(rec.sentence.is_empty());
    }

    #[test]
    fn parse_pressure_sensor_fields() {
        let mut payload = Vec::new();
        for v in [1i32, 2, 14_696, 215, 35_000, 0x3F, 52_000, 15_000] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let rec = parse_pressure_sensor(&payload).unwrap();
        assert_eq!(rec.pressure, 14_696);
        assert_eq!(rec.temperature, 215);
        assert_eq!(rec.salinity, 35_000);
        assert_eq!(rec.validity, 0x3F);
        assert_eq!(rec.conductivity, 52_000);
        assert_eq!(rec.sound_velocity, 15_000);
    }

    #[test]
    fn parse_dvl_fields_follow_layout() {
        let mut payload = vec![0u8; layout::doppler_velocity_log::FIXED_LEN];
        put(&mut payload, layout::doppler_velocity_log::VALIDITY, &0x81u32.to_le_bytes());
        for beam in 0..4 {
            let at = layout::doppler_velocity_log::BEAM_RANGES + beam * 4;
            put(&mut payload, at, &(1000 + beam as i32).to_le_bytes());
        }
        put(&mut payload, layout::doppler_velocity_log::BOTTOM_VELOCITY_Y, &1500i16.to_le_bytes());
        put(&mut payload, layout::doppler_velocity_log::WATER_VELOCITY_Z, &(-20i16).to_le_bytes());
        put(&mut payload, layout::doppler_velocity_log::DEPTH, &12_345u16.to_le_bytes());
        put(&mut payload, layout::doppler_velocity_log::HEADING, &9_000u16.to_le_bytes());
        put(&mut payload, layout::doppler_velocity_log::TEMPERATURE, &1_250i16.to_le_bytes());
        put(&mut payload, layout::doppler_velocity_log::SOUND_VELOCITY, &1_500u16.to_le_bytes());

        let rec = parse_doppler_velocity_log(&payload).unwrap();
        assert_eq!(rec.validity, 0x81);
        assert_eq!(rec.beam_ranges, [1000, 1001, 1002, 1003]);
        assert_eq!(rec.bottom_velocity, [0, 1500, 0]);
        assert_eq!(rec.water_velocity, [0, 0, -20]);
        assert_eq!(rec.depth, 12_345);
        assert_eq!(rec.heading, 9_000);
        assert_eq!(rec.temperature, 1_250);
        assert_eq!(rec.sound_velocity, 1_500);
    }

    #[test]
    fn parse_situation_float_block() {
        let mut payload = vec![0u8; layout::situation::FIXED_LEN];
        put(&mut payload, layout::situation::VALIDITY, &7u32.to_le_bytes());
        put(
            &mut payload,
            layout::situation::TIMESTAMP_US,
            &1_757_000_000_123_456u64.to_le_bytes(),
        );
        for i in 0..layout::situation::FLOAT_COUNT {
            put(&mut payload, layout::situation::FLOATS + i * 8, &(i as f64 + 0.5).to_le_bytes());
        }

        let rec = parse_situation(&payload).unwrap();
        assert_eq!(rec.validity, 7);
        assert_eq!(rec.timestamp_us, 1_757_000_000_123_456);
        assert_eq!(rec.lat, 0.5);
        assert_eq!(rec.lon, 1.5);
        assert_eq!(rec.roll, 5.5);
        assert_eq!(rec.position.x, 6.5);
        assert_eq!(rec.velocity_ned.z, 14.5);
        assert_eq!(rec.acceleration.z, 20.5);
        assert_eq!(rec.std_dev.lat, 21.5);
        assert_eq!(rec.std_dev.roll, 26.5);
    }

    #[test]
    fn short_payloads_are_rejected() {
        assert!(parse_pitch_roll(&[0u8; 43]).is_err());
        assert!(parse_nmea_string(&[0u8; 11]).is_err());
        assert!(parse_pressure_sensor(&[0u8; 31]).is_err());
        assert!(parse_doppler_velocity_log(&[0u8; 53]).is_err());
        assert!(parse_situation(&[0u8; 243]).is_err());
    }
}
