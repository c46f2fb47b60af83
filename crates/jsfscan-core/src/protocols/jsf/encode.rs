//! Payload encoders for fixed-layout records.
//!
//! Encoders write every named field at its layout offset and leave reserved
//! bytes zeroed, so `encode(decode(bytes))` reproduces the fixed prefix of
//! any payload whose reserved bytes are zero.

use super::error::EncodeError;
use super::header::FrameHeader;
use super::layout;
use super::messages::{
    CableCounter, Discover2Acoustic, Discover2Prefix, Discover2Situation, NmeaString, PitchRoll,
    PressureSensor, SystemInfo, Timestamp,
};

/// Zero-filled buffer with little-endian writes at fixed offsets.
pub struct JsfWriter {
    buf: Vec<u8>,
}

impl JsfWriter {
    pub fn with_len(len: usize) -> Self {
        Self { buf: vec![0; len] }
    }

    pub fn put_bytes(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        let end = offset + bytes.len();
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[offset..end].copy_from_slice(bytes);
        self
    }

    pub fn put_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        self.put_bytes(offset, &[value])
    }

    pub fn put_u16(&mut self, offset: usize, value: u16) -> &mut Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_i16(&mut self, offset: usize, value: i16) -> &mut Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_u32(&mut self, offset: usize, value: u32) -> &mut Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_i32(&mut self, offset: usize, value: i32) -> &mut Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_i64(&mut self, offset: usize, value: i64) -> &mut Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_f32(&mut self, offset: usize, value: f32) -> &mut Self {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    pub fn put_flag16(&mut self, offset: usize, value: bool) -> &mut Self {
        self.put_i16(offset, i16::from(value))
    }

    /// Append bytes after the current end of the buffer.
    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Records that can be written back to payload bytes.
pub trait Encode {
    fn encode(&self) -> Vec<u8>;
}

impl Encode for Timestamp {
    fn encode(&self) -> Vec<u8> {
        use layout::timestamp as ts;
        let mut w = JsfWriter::with_len(ts::FIXED_LEN);
        w.put_i32(ts::TIME, self.time).put_i32(ts::MILLIS, self.millis);
        w.into_bytes()
    }
}

impl Encode for SystemInfo {
    fn encode(&self) -> Vec<u8> {
        use layout::system_info as si;
        let mut w = JsfWriter::with_len(si::FIXED_LEN);
        w.put_i32(si::SYSTEM_TYPE, self.system_type)
            .put_i32(si::SOFTWARE_VERSION, self.software_version)
            .put_i32(si::SERIAL_NUMBER, self.serial_number);
        w.into_bytes()
    }
}

impl Encode for PitchRoll {
    fn encode(&self) -> Vec<u8> {
        use layout::pitch_roll as pr;
        let mut w = JsfWriter::with_len(pr::FIXED_LEN);
        w.put_i32(pr::TIME, self.time)
            .put_u32(pr::MILLIS, self.millis)
            .put_i16(pr::ACCEL_X, self.accel[0])
            .put_i16(pr::ACCEL_Y, self.accel[1])
            .put_i16(pr::ACCEL_Z, self.accel[2])
            .put_i16(pr::GYRO_X, self.gyro_rate[0])
            .put_i16(pr::GYRO_Y, self.gyro_rate[1])
            .put_i16(pr::GYRO_Z, self.gyro_rate[2])
            .put_i16(pr::PITCH, self.pitch)
            .put_i16(pr::ROLL, self.roll)
            .put_i16(pr::TEMPERATURE, self.temperature)
            .put_u16(pr::DEVICE_INFO, self.device_info)
            .put_i16(pr::HEAVE, self.heave)
            .put_u16(pr::HEADING, self.heading)
            .put_u32(pr::VALIDITY, self.validity);
        w.into_bytes()
    }
}

impl Encode for NmeaString {
    fn encode(&self) -> Vec<u8> {
        use layout::nmea_string as nmea;
        let mut w = JsfWriter::with_len(nmea::FIXED_LEN);
        w.put_i32(nmea::TIME, self.time)
            .put_i32(nmea::MILLIS, self.millis)
            .put_u8(nmea::SOURCE, self.source)
            .append(self.sentence.as_bytes());
        w.into_bytes()
    }
}

impl Encode for PressureSensor {
    fn encode(&self) -> Vec<u8> {
        use layout::pressure_sensor as ps;
        let mut w = JsfWriter::with_len(ps::FIXED_LEN);
        w.put_i32(ps::TIME, self.time)
            .put_i32(ps::MILLIS, self.millis)
            .put_i32(ps::PRESSURE, self.pressure)
            .put_i32(ps::TEMPERATURE, self.temperature)
            .put_i32(ps::SALINITY, self.salinity)
            .put_i32(ps::VALIDITY, self.validity)
            .put_i32(ps::CONDUCTIVITY, self.conductivity)
            .put_i32(ps::SOUND_VELOCITY, self.sound_velocity);
        w.into_bytes()
    }
}

impl Encode for CableCounter {
    fn encode(&self) -> Vec<u8> {
        use layout::cable_counter as cc;
        let mut w = JsfWriter::with_len(cc::FIXED_LEN);
        w.put_i32(cc::TIME, self.time)
            .put_i32(cc::MILLIS, self.millis)
            .put_f32(cc::LENGTH, self.length)
            .put_f32(cc::SPEED, self.speed)
            .put_flag16(cc::LENGTH_VALID, self.length_valid)
            .put_flag16(cc::SPEED_VALID, self.speed_valid)
            .put_flag16(cc::COUNTER_ERROR, self.counter_error)
            .put_flag16(cc::TENSION_VALID, self.tension_valid);
        w.into_bytes()
    }
}

impl Encode for Discover2Prefix {
    fn encode(&self) -> Vec<u8> {
        use layout::discover2_prefix as gp;
        let mut w = JsfWriter::with_len(gp::FIXED_LEN);
        w.put_i64(gp::TIMESTAMP, self.timestamp)
            .put_i32(gp::SERIAL_NUMBER, self.serial_number)
            .put_i16(gp::VERSION, self.version)
            .put_u16(gp::DEVICE, self.device);
        w.into_bytes()
    }
}

impl Encode for Discover2Situation {
    fn encode(&self) -> Vec<u8> {
        use layout::discover2_situation as st;
        let mut w = JsfWriter::with_len(st::FIXED_LEN);
        w.put_bytes(st::PREFIX.start, &self.prefix.encode())
            .put_u16(st::SENSOR_PLATFORM, self.sensor_platform)
            .put_u16(st::PLATFORM_ENUM, self.platform_enum)
            .put_u32(st::IDS_IN_LIST, self.ids_in_list)
            .append(&self.data);
        w.into_bytes()
    }
}

impl Encode for Discover2Acoustic {
    fn encode(&self) -> Vec<u8> {
        use layout::discover2_acoustic as ac;
        let mut w = JsfWriter::with_len(ac::FIXED_LEN);
        w.put_bytes(ac::PREFIX.start, &self.prefix.encode())
            .put_u32(ac::PING_NUMBER, self.ping_number)
            .put_f32(ac::MIXER_FREQ, self.mixer_freq)
            .put_f32(ac::MIXER_PHASE, self.mixer_phase)
            .put_f32(ac::SAMPLE_RATE, self.sample_rate)
            .put_u32(ac::SAMPLE_OFFSET, self.sample_offset)
            .put_u16(ac::PULSE_INDEX, self.pulse_index)
            .put_u8(ac::DATA_SOURCE, self.data_source)
            .put_u8(ac::MPX_PULSE, self.mpx_pulse)
            .put_u32(ac::PACKET_NUMBER, self.packet_number)
            .append(&self.situation.encode());
        w.into_bytes()
    }
}

/// Header plus payload, with `msg_len` taken from the payload.
///
/// Fails when the payload is too long for the 32-bit length field.
///
/// # Examples
/// ```
/// use jsfscan_core::protocols::jsf::encode::encode_frame;
/// use jsfscan_core::protocols::jsf::header::FrameHeader;
///
/// let frame = encode_frame(FrameHeader::new(2111, 0), &[0u8; 8])?;
/// assert_eq!(frame.len(), 24);
/// assert_eq!(&frame[12..16], &8u32.to_le_bytes());
/// # Ok::<(), jsfscan_core::protocols::jsf::EncodeError>(())
/// ```
pub fn encode_frame(mut header: FrameHeader, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
    header.msg_len = payload_len(payload.len())?;
    let mut out = Vec::with_capacity(layout::HEADER_LEN + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

fn payload_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge { len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::jsf::messages::{discover2, sensors, system};

    #[test]
    fn pitch_roll_reencodes_payload_prefix() {
        let mut payload = vec![0u8; layout::pitch_roll::FIXED_LEN];
        for (i, byte) in payload.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37);
        }
        // reserved words are not carried by the record
        payload[8..12].fill(0);
        payload[40..44].fill(0);
        let rec = sensors::parse_pitch_roll(&payload).unwrap();
        assert_eq!(rec.encode(), payload);
    }

    #[test]
    fn nmea_string_round_trip() {
        let rec = NmeaString {
            time: 1,
            millis: 2,
            source: 9,
            sentence: "$GPHDT,274.07,T*03".to_string(),
        };
        let decoded = sensors::parse_nmea_string(&rec.encode()).unwrap();
        assert_eq!(decoded, rec);
    }

    #[test]
    fn cable_counter_round_trip() {
        let rec = CableCounter {
            time: 3,
            millis: 4,
            length: 250.25,
            speed: 1.5,
            length_valid: true,
            speed_valid: false,
            counter_error: true,
            tension_valid: false,
        };
        let decoded = system::parse_cable_counter(&rec.encode()).unwrap();
        assert_eq!(decoded, rec);
    }

    #[test]
    fn acoustic_round_trip_keeps_nesting() {
        let prefix = Discover2Prefix {
            timestamp: 1_757_000_000_000,
            serial_number: 4411,
            version: 3,
            device: 2,
        };
        let rec = Discover2Acoustic {
            prefix: prefix.clone(),
            ping_number: 12,
            mixer_freq: 100.0,
            mixer_phase: 0.5,
            sample_rate: 25.0,
            sample_offset: 64,
            pulse_index: 1,
            data_source: 2,
            mpx_pulse: 3,
            packet_number: 4,
            situation: Discover2Situation {
                prefix,
                sensor_platform: 1,
                platform_enum: 2,
                ids_in_list: 0,
                data: vec![0xAB; 5],
            },
        };
        let bytes = rec.encode();
        assert_eq!(bytes.len(), 48 + 24 + 5);
        assert_eq!(discover2::parse_discover2_acoustic(&bytes).unwrap(), rec);
    }

    #[test]
    fn frame_length_field_matches_payload() {
        let frame = encode_frame(FrameHeader::new(426, 0), &[7; 300]).unwrap();
        assert_eq!(frame.len(), layout::HEADER_LEN + 300);
        assert_eq!(&frame[12..16], &300u32.to_le_bytes());
        assert_eq!(payload_len(u32::MAX as usize), Ok(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_payload_is_rejected() {
        let len = u32::MAX as usize + 1;
        assert_eq!(payload_len(len), Err(EncodeError::PayloadTooLarge { len }));
        assert!(
            EncodeError::PayloadTooLarge { len }
                .to_string()
                .contains("32-bit length field")
        );
    }

    #[test]
    fn writer_grows_on_out_of_range_put() {
        let mut w = JsfWriter::with_len(2);
        w.put_u32(4, 1);
        assert_eq!(w.into_bytes(), vec![0, 0, 0, 0, 1, 0, 0, 0]);
    }
}
