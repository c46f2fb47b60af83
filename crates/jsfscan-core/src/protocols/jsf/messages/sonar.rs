//! Sonar data (type 80) and side-scan sonar (type 82) records.
//!
//! Both records carry a fixed 240/80-byte prefix followed by the raw trace
//! samples. Samples are kept as bytes; their width depends on the
//! `data_format` field and interpreting them is left to the caller.

use serde::{Deserialize, Serialize};

use crate::protocols::jsf::error::JsfError;
use crate::protocols::jsf::layout::{side_scan as ss, sonar_data as sd};
use crate::protocols::jsf::reader::JsfReader;

/// Sonar CPU clock at ping time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SonarCpuTime {
    pub year: i16,
    pub day: i16,
    pub hour: i16,
    pub minute: i16,
    pub second: i16,
    pub time_basis: i16,
}

/// Last NMEA fix received by the sonar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmeaFix {
    pub hour: i16,
    pub minute: i16,
    pub second: i16,
    pub course: i16,
    pub speed: i16,
    pub day: i16,
    pub year: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonarData {
    pub ping_time: i32,
    /// Window offset, in samples.
    pub start_depth: u32,
    pub ping_number: u32,
    pub msbs: u16,
    pub id_code: i16,
    pub validity: u16,
    pub data_format: i16,
    pub antenna_aft: i16,
    pub antenna_starboard: i16,

    /// Kilometres of pipe.
    pub pipe_km: f32,
    /// Millimetres.
    pub x: i16,
    /// Millimetres.
    pub y: i16,
    pub coord_units: i16,

    pub annotation: String,
    pub samples: u16,
    /// Nanoseconds.
    pub sample_interval: u32,
    pub gain: u16,
    pub transmit_level: i16,
    /// decaHz.
    pub start_freq: u16,
    /// decaHz.
    pub end_freq: u16,
    /// Milliseconds.
    pub sweep_length: u16,
    /// Milli-PSI.
    pub pressure: i32,
    /// Millimetres.
    pub depth: i32,
    /// Hz, modulo 65536.
    pub sample_rate: u16,
    pub pulse_id: u16,
    /// Millimetres.
    pub altitude: i32,
    pub sound_speed: f32,
    pub mixer_freq: f32,

    pub cpu_time: SonarCpuTime,
    pub weighting: i16,
    pub pulse_count: i16,

    /// Centidegrees.
    pub heading: u16,
    /// Centidegrees.
    pub pitch: i16,
    /// Centidegrees.
    pub roll: i16,
    /// 0.1 °C.
    pub temperature: i16,

    pub trigger_source: i16,
    pub mark_number: i16,
    pub nmea: NmeaFix,

    pub ms_today: u32,
    pub max_adc: u16,
    pub software_version: String,
    pub spherical_correction: i32,
    pub packet_number: u16,
    /// ×100.
    pub adc_decimation: i16,
    pub fft_decimation: i16,
    /// 0.1 °C.
    pub water_temperature: i16,
    /// Metres.
    pub layback: f32,
    /// Metres.
    pub cable_out: u16,

    pub trace: Vec<u8>,
}

pub fn parse_sonar_data(payload: &[u8]) -> Result<SonarData, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(sd::FIXED_LEN)?;

    Ok(SonarData {
        ping_time: r.read_i32(sd::PING_TIME)?,
        start_depth: r.read_u32(sd::START_DEPTH)?,
        ping_number: r.read_u32(sd::PING_NUMBER)?,
        msbs: r.read_u16(sd::MSBS)?,
        id_code: r.read_i16(sd::ID_CODE)?,
        validity: r.read_u16(sd::VALIDITY)?,
        data_format: r.read_i16(sd::DATA_FORMAT)?,
        antenna_aft: r.read_i16(sd::ANTENNA_AFT)?,
        antenna_starboard: r.read_i16(sd::ANTENNA_STARBOARD)?,
        pipe_km: r.read_f32(sd::PIPE_KM)?,
        x: r.read_i16(sd::X)?,
        y: r.read_i16(sd::Y)?,
        coord_units: r.read_i16(sd::COORD_UNITS)?,
        annotation: r.read_text(sd::ANNOTATION)?,
        samples: r.read_u16(sd::SAMPLES)?,
        sample_interval: r.read_u32(sd::SAMPLE_INTERVAL)?,
        gain: r.read_u16(sd::GAIN)?,
        transmit_level: r.read_i16(sd::TRANSMIT_LEVEL)?,
        start_freq: r.read_u16(sd::START_FREQ)?,
        end_freq: r.read_u16(sd::END_FREQ)?,
        sweep_length: r.read_u16(sd::SWEEP_LENGTH)?,
        pressure: r.read_i32(sd::PRESSURE)?,
        depth: r.read_i32(sd::DEPTH)?,
        sample_rate: r.read_u16(sd::SAMPLE_RATE)?,
        pulse_id: r.read_u16(sd::PULSE_ID)?,
        altitude: r.read_i32(sd::ALTITUDE)?,
        sound_speed: r.read_f32(sd::SOUND_SPEED)?,
        mixer_freq: r.read_f32(sd::MIXER_FREQ)?,
        cpu_time: SonarCpuTime {
            year: r.read_i16(sd::CPU_YEAR)?,
            day: r.read_i16(sd::CPU_DAY)?,
            hour: r.read_i16(sd::CPU_HOUR)?,
            minute: r.read_i16(sd::CPU_MINUTE)?,
            second: r.read_i16(sd::CPU_SECOND)?,
            time_basis: r.read_i16(sd::CPU_TIME_BASIS)?,
        },
        weighting: r.read_i16(sd::WEIGHTING)?,
        pulse_count: r.read_i16(sd::PULSE_COUNT)?,
        heading: r.read_u16(sd::HEADING)?,
        pitch: r.read_i16(sd::PITCH)?,
        roll: r.read_i16(sd::ROLL)?,
        temperature: r.read_i16(sd::TEMPERATURE)?,
        trigger_source: r.read_i16(sd::TRIGGER_SOURCE)?,
        mark_number: r.read_i16(sd::MARK_NUMBER)?,
        nmea: NmeaFix {
            hour: r.read_i16(sd::NMEA_HOUR)?,
            minute: r.read_i16(sd::NMEA_MINUTE)?,
            second: r.read_i16(sd::NMEA_SECOND)?,
            course: r.read_i16(sd::NMEA_COURSE)?,
            speed: r.read_i16(sd::NMEA_SPEED)?,
            day: r.read_i16(sd::NMEA_DAY)?,
            year: r.read_i16(sd::NMEA_YEAR)?,
        },
        ms_today: r.read_u32(sd::MS_TODAY)?,
        max_adc: r.read_u16(sd::MAX_ADC)?,
        software_version: r.read_text(sd::SOFTWARE_VERSION)?,
        spherical_correction: r.read_i32(sd::SPHERICAL_CORRECTION)?,
        packet_number: r.read_u16(sd::PACKET_NUMBER)?,
        adc_decimation: r.read_i16(sd::ADC_DECIMATION)?,
        fft_decimation: r.read_i16(sd::FFT_DECIMATION)?,
        water_temperature: r.read_i16(sd::WATER_TEMPERATURE)?,
        layback: r.read_f32(sd::LAYBACK)?,
        cable_out: r.read_u16(sd::CABLE_OUT)?,
        trace: r.read_tail(sd::FIXED_LEN)?.to_vec(),
    })
}

/// CPU clock of a side-scan ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideScanCpuTime {
    pub ms_today: u32,
    pub year: i16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideScan {
    pub subsystem: u16,
    pub channel: u16,
    pub ping_number: u32,
    pub packet_number: u16,
    pub trigger_source: u16,
    pub samples: u32,
    /// Nanoseconds.
    pub sample_interval: u32,
    /// Window offset, in samples.
    pub start_depth: u32,
    /// 2^-N volts.
    pub weighting: i16,
    pub adc_gain: i16,
    pub max_adc: i16,
    /// 10 × metres.
    pub range: i16,
    pub pulse_id: i16,
    pub mark_number: i16,
    pub data_format: i16,
    pub pulse_count: u8,
    pub cpu_time: SideScanCpuTime,
    /// Degrees × 60.
    pub compass_heading: u16,
    /// Multiply by 180 / 32768 for degrees, bow up positive.
    pub pitch: i16,
    /// Multiply by 180 / 32768 for degrees, port up positive.
    pub roll: i16,
    /// Centimetres.
    pub heave: i16,
    /// Degree minutes.
    pub yaw: i16,
    /// 0.001 PSI.
    pub pressure: i32,
    /// 0.1 °C.
    pub temperature: i16,
    /// 0.1 °C.
    pub water_temperature: i16,
    /// Millimetres.
    pub altitude: i32,
    pub trace: Vec<u8>,
}

pub fn parse_side_scan(payload: &[u8]) -> Result<SideScan, JsfError> {
    let r = JsfReader::new(payload);
    r.require_len(ss::FIXED_LEN)?;

    Ok(SideScan {
        subsystem: r.read_u16(ss::SUBSYSTEM)?,
        channel: r.read_u16(ss::CHANNEL)?,
        ping_number: r.read_u32(ss::PING_NUMBER)?,
        packet_number: r.read_u16(ss::PACKET_NUMBER)?,
        trigger_source: r.read_u16(ss::TRIGGER_SOURCE)?,
        samples: r.read_u32(ss::SAMPLES)?,
        sample_interval: r.read_u32(ss::SAMPLE_INTERVAL)?,
        start_depth: r.read_u32(ss::START_DEPTH)?,
        weighting: r.read_i16(ss::WEIGHTING)?,
        adc_gain: r.read_i16(ss::ADC_GAIN)?,
        max_adc: r.read_i16(ss::MAX_ADC)?,
        range: r.read_i16(ss::RANGE)?,
        pulse_id: r.read_i16(ss::PULSE_ID)?,
        mark_number: r.read_i16(ss::MARK_NUMBER)?,
        data_format: r.read_i16(ss::DATA_FORMAT)?,
        pulse_count: r.read_u8(ss::PULSE_COUNT)?,
        cpu_time: SideScanCpuTime {
            ms_today: r.read_u32(ss::CPU_MS_TODAY)?,
            year: r.read_i16(ss::CPU_YEAR)?,
            day: r.read_u16(ss::CPU_DAY)?,
            hour: r.read_u16(ss::CPU_HOUR)?,
            minute: r.read_u16(ss::CPU_MINUTE)?,
            second: r.read_u16(ss::CPU_SECOND)?,
        },
        compass_heading: r.read_u16(ss::COMPASS_HEADING)?,
        pitch: r.read_i16(ss::PITCH)?,
        roll: r.read_i16(ss::ROLL)?,
        heave: r.read_i16(ss::HEAVE)?,
        yaw: r.read_i16(ss::YAW)?,
        pressure: r.read_i32(ss::PRESSURE)?,
        temperature: r.read_i16(ss::TEMPERATURE)?,
        water_temperature: r.read_i16(ss::WATER_TEMPERATURE)?,
        altitude: r.read_i32(ss::ALTITUDE)?,
        trace: r.read_tail(ss::FIXED_LEN)?.to_vec(),
    })
}
