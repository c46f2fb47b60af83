//! Wire layout of JSF frames.
//!
//! Offsets in the record modules are relative to the first payload byte,
//! i.e. the byte following the 16-byte frame header. Widths follow from the
//! reader call that consumes each field; every record lists its `FIXED_LEN`,
//! which decoders check before touching any field.

use std::ops::Range;

pub const HEADER_LEN: usize = 16;
/// Start-of-message marker found in every well-formed header.
pub const START_MARKER: u16 = 0x1601;

pub const MARKER_RANGE: Range<usize> = 0..2;
pub const VERSION_OFFSET: usize = 2;
pub const SESSION_ID_OFFSET: usize = 3;
pub const MSG_TYPE_RANGE: Range<usize> = 4..6;
pub const SUBSYSTEM_OFFSET: usize = 6;
pub const CHANNEL_OFFSET: usize = 7;
pub const SEQUENCE_OFFSET: usize = 8;
pub const RESERVED_OFFSET: usize = 9;
pub const RESERVED2_RANGE: Range<usize> = 10..12;
pub const MSG_LEN_RANGE: Range<usize> = 12..16;

pub const MSG_SONAR_DATA: u16 = 80;
pub const MSG_SIDE_SCAN: u16 = 82;
pub const MSG_SYSTEM_INFO: u16 = 182;
pub const MSG_FILE_TIMESTAMP: u16 = 426;
pub const MSG_FILE_PADDING: u16 = 428;
pub const MSG_NMEA_STRING: u16 = 2002;
pub const MSG_PITCH_ROLL: u16 = 2020;
pub const MSG_PRESSURE_SENSOR: u16 = 2060;
pub const MSG_DOPPLER_VELOCITY_LOG: u16 = 2080;
pub const MSG_SITUATION: u16 = 2090;
pub const MSG_CABLE_COUNTER: u16 = 2100;
pub const MSG_CONTAINER_TIMESTAMP: u16 = 2111;
pub const MSG_DISCOVER2_PREFIX: u16 = 9001;
pub const MSG_DISCOVER2_SITUATION: u16 = 9002;
pub const MSG_DISCOVER2_ACOUSTIC: u16 = 9003;

/// Type 80.
pub mod sonar_data {
    use std::ops::Range;

    pub const PING_TIME: usize = 0;
    pub const START_DEPTH: usize = 4;
    pub const PING_NUMBER: usize = 8;
    pub const MSBS: usize = 14;
    pub const ID_CODE: usize = 18;
    pub const VALIDITY: usize = 20;
    pub const DATA_FORMAT: usize = 24;
    pub const ANTENNA_AFT: usize = 26;
    pub const ANTENNA_STARBOARD: usize = 28;

    pub const PIPE_KM: usize = 44;
    pub const X: usize = 48;
    pub const Y: usize = 50;
    pub const COORD_UNITS: usize = 52;

    pub const ANNOTATION: Range<usize> = 90..114;
    pub const SAMPLES: usize = 114;
    pub const SAMPLE_INTERVAL: usize = 116;
    pub const GAIN: usize = 120;
    pub const TRANSMIT_LEVEL: usize = 122;
    pub const START_FREQ: usize = 126;
    pub const END_FREQ: usize = 128;
    pub const SWEEP_LENGTH: usize = 130;
    pub const PRESSURE: usize = 132;
    pub const DEPTH: usize = 136;
    pub const SAMPLE_RATE: usize = 140;
    pub const PULSE_ID: usize = 142;
    pub const ALTITUDE: usize = 144;
    pub const SOUND_SPEED: usize = 148;
    pub const MIXER_FREQ: usize = 152;

    pub const CPU_YEAR: usize = 156;
    pub const CPU_DAY: usize = 158;
    pub const CPU_HOUR: usize = 160;
    pub const CPU_MINUTE: usize = 162;
    pub const CPU_SECOND: usize = 164;
    pub const CPU_TIME_BASIS: usize = 166;

    pub const WEIGHTING: usize = 168;
    pub const PULSE_COUNT: usize = 170;

    pub const HEADING: usize = 172;
    pub const PITCH: usize = 174;
    pub const ROLL: usize = 176;
    pub const TEMPERATURE: usize = 178;

    pub const TRIGGER_SOURCE: usize = 180;
    pub const MARK_NUMBER: usize = 182;

    pub const NMEA_HOUR: usize = 186;
    pub const NMEA_MINUTE: usize = 188;
    pub const NMEA_SECOND: usize = 190;
    pub const NMEA_COURSE: usize = 192;
    pub const NMEA_SPEED: usize = 194;
    pub const NMEA_DAY: usize = 196;
    pub const NMEA_YEAR: usize = 198;

    pub const MS_TODAY: usize = 200;
    pub const MAX_ADC: usize = 204;
    pub const SOFTWARE_VERSION: Range<usize> = 210..216;
    pub const SPHERICAL_CORRECTION: usize = 216;
    pub const PACKET_NUMBER: usize = 220;
    pub const ADC_DECIMATION: usize = 222;
    pub const FFT_DECIMATION: usize = 224;
    pub const WATER_TEMPERATURE: usize = 226;
    pub const LAYBACK: usize = 228;
    pub const CABLE_OUT: usize = 236;

    pub const FIXED_LEN: usize = 240;
}

/// Type 82.
pub mod side_scan {
    pub const SUBSYSTEM: usize = 0;
    pub const CHANNEL: usize = 2;
    pub const PING_NUMBER: usize = 4;
    pub const PACKET_NUMBER: usize = 8;
    pub const TRIGGER_SOURCE: usize = 10;
    pub const SAMPLES: usize = 12;
    pub const SAMPLE_INTERVAL: usize = 16;
    pub const START_DEPTH: usize = 20;
    pub const WEIGHTING: usize = 24;
    pub const ADC_GAIN: usize = 26;
    pub const MAX_ADC: usize = 28;
    pub const RANGE: usize = 30;
    pub const PULSE_ID: usize = 32;
    pub const MARK_NUMBER: usize = 34;
    pub const DATA_FORMAT: usize = 36;
    pub const PULSE_COUNT: usize = 38;

    pub const CPU_MS_TODAY: usize = 40;
    pub const CPU_YEAR: usize = 44;
    pub const CPU_DAY: usize = 46;
    pub const CPU_HOUR: usize = 48;
    pub const CPU_MINUTE: usize = 50;
    pub const CPU_SECOND: usize = 52;

    pub const COMPASS_HEADING: usize = 54;
    pub const PITCH: usize = 56;
    pub const ROLL: usize = 58;
    pub const HEAVE: usize = 60;
    pub const YAW: usize = 62;
    pub const PRESSURE: usize = 64;
    pub const TEMPERATURE: usize = 68;
    pub const WATER_TEMPERATURE: usize = 70;
    pub const ALTITUDE: usize = 72;

    pub const FIXED_LEN: usize = 80;
}

/// Type 2020.
pub mod pitch_roll {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;
    pub const ACCEL_X: usize = 12;
    pub const ACCEL_Y: usize = 14;
    pub const ACCEL_Z: usize = 16;
    pub const GYRO_X: usize = 18;
    pub const GYRO_Y: usize = 20;
    pub const GYRO_Z: usize = 22;
    pub const PITCH: usize = 24;
    pub const ROLL: usize = 26;
    pub const TEMPERATURE: usize = 28;
    pub const DEVICE_INFO: usize = 30;
    pub const HEAVE: usize = 32;
    pub const HEADING: usize = 34;
    pub const VALIDITY: usize = 36;

    pub const FIXED_LEN: usize = 44;
}

/// Type 2002.
pub mod nmea_string {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;
    pub const SOURCE: usize = 8;
    pub const SENTENCE: usize = 12;

    pub const FIXED_LEN: usize = 12;
}

/// Type 2060.
pub mod pressure_sensor {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;
    pub const PRESSURE: usize = 8;
    pub const TEMPERATURE: usize = 12;
    pub const SALINITY: usize = 16;
    pub const VALIDITY: usize = 20;
    pub const CONDUCTIVITY: usize = 24;
    pub const SOUND_VELOCITY: usize = 28;

    pub const FIXED_LEN: usize = 32;
}

/// Type 2080.
pub mod doppler_velocity_log {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;
    pub const VALIDITY: usize = 8;
    /// Four consecutive beam ranges, 4 bytes each.
    pub const BEAM_RANGES: usize = 12;
    pub const BEAM_COUNT: usize = 4;
    pub const BOTTOM_VELOCITY_X: usize = 28;
    pub const BOTTOM_VELOCITY_Y: usize = 30;
    pub const BOTTOM_VELOCITY_Z: usize = 32;
    pub const WATER_VELOCITY_X: usize = 34;
    pub const WATER_VELOCITY_Y: usize = 36;
    pub const WATER_VELOCITY_Z: usize = 38;
    pub const DEPTH: usize = 40;
    pub const PITCH: usize = 42;
    pub const ROLL: usize = 44;
    pub const HEADING: usize = 46;
    pub const SALINITY: usize = 48;
    pub const TEMPERATURE: usize = 50;
    pub const SOUND_VELOCITY: usize = 52;

    pub const FIXED_LEN: usize = 54;
}

/// Type 2090. The float block holds 27 consecutive f64 values.
pub mod situation {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;
    pub const VALIDITY: usize = 12;
    pub const TIMESTAMP_US: usize = 20;
    pub const FLOATS: usize = 28;
    pub const FLOAT_COUNT: usize = 27;

    pub const FIXED_LEN: usize = FLOATS + FLOAT_COUNT * 8;
}

/// Types 426 and 2111.
pub mod timestamp {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;

    pub const FIXED_LEN: usize = 8;
}

/// Type 182.
pub mod system_info {
    pub const SYSTEM_TYPE: usize = 0;
    pub const SOFTWARE_VERSION: usize = 4;
    pub const SERIAL_NUMBER: usize = 8;

    pub const FIXED_LEN: usize = 12;
}

/// Type 2100.
pub mod cable_counter {
    pub const TIME: usize = 0;
    pub const MILLIS: usize = 4;
    pub const LENGTH: usize = 12;
    pub const SPEED: usize = 16;
    pub const LENGTH_VALID: usize = 20;
    pub const SPEED_VALID: usize = 22;
    pub const COUNTER_ERROR: usize = 24;
    pub const TENSION_VALID: usize = 26;

    pub const FIXED_LEN: usize = 28;
}

/// Type 9001, also embedded at the start of 9002 and 9003.
pub mod discover2_prefix {
    pub const TIMESTAMP: usize = 0;
    pub const SERIAL_NUMBER: usize = 8;
    pub const VERSION: usize = 12;
    pub const DEVICE: usize = 14;

    pub const FIXED_LEN: usize = 16;
}

/// Type 9002.
pub mod discover2_situation {
    use std::ops::Range;

    pub const PREFIX: Range<usize> = 0..super::discover2_prefix::FIXED_LEN;
    pub const SENSOR_PLATFORM: usize = 16;
    pub const PLATFORM_ENUM: usize = 18;
    pub const IDS_IN_LIST: usize = 20;
    pub const DATA_OBJECT: usize = 24;

    pub const FIXED_LEN: usize = 24;
}

/// Type 9003. A complete 9002 record follows the fixed part.
pub mod discover2_acoustic {
    use std::ops::Range;

    pub const PREFIX: Range<usize> = 0..super::discover2_prefix::FIXED_LEN;
    pub const PING_NUMBER: usize = 16;
    pub const MIXER_FREQ: usize = 20;
    pub const MIXER_PHASE: usize = 24;
    pub const SAMPLE_RATE: usize = 28;
    pub const SAMPLE_OFFSET: usize = 32;
    pub const PULSE_INDEX: usize = 38;
    pub const DATA_SOURCE: usize = 41;
    pub const MPX_PULSE: usize = 42;
    pub const PACKET_NUMBER: usize = 44;
    pub const SITUATION: usize = 48;

    pub const FIXED_LEN: usize = 48;
}
