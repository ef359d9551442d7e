//! ZCL (Zigbee Cluster Library) definitions

use crate::value::ZclValue;

/// Common ZCL cluster IDs
pub mod id {
    // General Clusters
    pub const BASIC: u16 = 0x0000;
    pub const IDENTIFY: u16 = 0x0003;
    pub const GROUPS: u16 = 0x0004;
    pub const SCENES: u16 = 0x0005;
    pub const OTA: u16 = 0x0019;

    // Measurement Clusters
    pub const TEMPERATURE_MEASUREMENT: u16 = 0x0402;
    pub const OCCUPANCY_SENSING: u16 = 0x0406;

    // Security Clusters
    pub const IAS_ZONE: u16 = 0x0500;

    // HVAC Clusters
    pub const THERMOSTAT: u16 = 0x0201;
    pub const FAN_CONTROL: u16 = 0x0202;
    pub const THERMOSTAT_UI_CONFIG: u16 = 0x0204;
}

/// ZCL profile IDs
pub mod profile {
    pub const HOME_AUTOMATION: u16 = 0x0104;
}

/// Home Automation device IDs (the `device_id` of a simple descriptor)
pub mod device_type {
    pub const ON_OFF_SWITCH: u16 = 0x0000;
    pub const TEMPERATURE_SENSOR: u16 = 0x0302;
    pub const THERMOSTAT: u16 = 0x0301;
}

/// Basic cluster attributes
pub mod basic_attrs {
    pub const ZCL_VERSION: u16 = 0x0000;
    pub const APPLICATION_VERSION: u16 = 0x0001;
    pub const STACK_VERSION: u16 = 0x0002;
    pub const HW_VERSION: u16 = 0x0003;
    pub const MANUFACTURER_NAME: u16 = 0x0004;
    pub const MODEL_IDENTIFIER: u16 = 0x0005;
    pub const DATE_CODE: u16 = 0x0006;
    pub const POWER_SOURCE: u16 = 0x0007;
    pub const SW_BUILD_ID: u16 = 0x4000;
}

/// Temperature Measurement cluster attributes
///
/// Temperatures are in hundredths of a degree Celsius.
pub mod temperature_attrs {
    pub const MEASURED_VALUE: u16 = 0x0000;
    pub const MIN_MEASURED_VALUE: u16 = 0x0001;
    pub const MAX_MEASURED_VALUE: u16 = 0x0002;
    pub const TOLERANCE: u16 = 0x0003;
}

const INT24_MIN: f64 = -8_388_608.0;
const INT24_MAX: f64 = 8_388_607.0;
const UINT24_MAX: f64 = 16_777_215.0;

/// ZCL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    NoData = 0x00,
    Boolean = 0x10,
    Bitmap8 = 0x18,
    Bitmap16 = 0x19,
    Uint8 = 0x20,
    Uint16 = 0x21,
    Uint24 = 0x22,
    Uint32 = 0x23,
    Int8 = 0x28,
    Int16 = 0x29,
    Int24 = 0x2A,
    Int32 = 0x2B,
    Enum8 = 0x30,
    Enum16 = 0x31,
    Float32 = 0x39,
    String = 0x42,
}

impl DataType {
    /// Coerce a number into a value of this type
    ///
    /// Integer types truncate toward zero and saturate at their bounds.
    /// Returns `None` for non-numeric types.
    #[must_use] pub fn coerce(self, number: f64) -> Option<ZclValue> {
        let value = match self {
            Self::Uint8 => ZclValue::Uint8(number as u8),
            Self::Uint16 => ZclValue::Uint16(number as u16),
            Self::Uint24 => ZclValue::Uint24(number.clamp(0.0, UINT24_MAX) as u32),
            Self::Uint32 => ZclValue::Uint32(number as u32),
            Self::Int8 => ZclValue::Int8(number as i8),
            Self::Int16 => ZclValue::Int16(number as i16),
            Self::Int24 => ZclValue::Int24(number.clamp(INT24_MIN, INT24_MAX) as i32),
            Self::Int32 => ZclValue::Int32(number as i32),
            Self::Float32 => ZclValue::Float32(number as f32),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_truncates_toward_zero() {
        assert_eq!(DataType::Int16.coerce(3000.2), Some(ZclValue::Int16(3000)));
        assert_eq!(DataType::Int16.coerce(-12.9), Some(ZclValue::Int16(-12)));
    }

    #[test]
    fn test_coerce_saturates() {
        assert_eq!(DataType::Int16.coerce(62_180.0), Some(ZclValue::Int16(i16::MAX)));
        assert_eq!(DataType::Uint8.coerce(-4.0), Some(ZclValue::Uint8(0)));
        assert_eq!(
            DataType::Int24.coerce(1.0e9),
            Some(ZclValue::Int24(8_388_607))
        );
    }

    #[test]
    fn test_coerce_non_numeric() {
        assert_eq!(DataType::String.coerce(1.0), None);
        assert_eq!(DataType::Enum8.coerce(1.0), None);
    }
}
