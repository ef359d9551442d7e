//! Typed attribute values as decoded from attribute reports

use crate::cluster::DataType;
use serde::{Deserialize, Serialize};

/// A decoded ZCL attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ZclValue {
    Bool(bool),
    Uint8(u8),
    Uint16(u16),
    Uint24(u32),
    Uint32(u32),
    Int8(i8),
    Int16(i16),
    Int24(i32),
    Int32(i32),
    Float32(f32),
    String(String),
}

impl ZclValue {
    /// The wire type this value was decoded as
    #[must_use] pub fn data_type(&self) -> DataType {
        match self {
            Self::Bool(_) => DataType::Boolean,
            Self::Uint8(_) => DataType::Uint8,
            Self::Uint16(_) => DataType::Uint16,
            Self::Uint24(_) => DataType::Uint24,
            Self::Uint32(_) => DataType::Uint32,
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int24(_) => DataType::Int24,
            Self::Int32(_) => DataType::Int32,
            Self::Float32(_) => DataType::Float32,
            Self::String(_) => DataType::String,
        }
    }

    /// Numeric value, if this is a number
    #[must_use] pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Uint8(v) => Some(f64::from(v)),
            Self::Uint16(v) => Some(f64::from(v)),
            Self::Uint24(v) | Self::Uint32(v) => Some(f64::from(v)),
            Self::Int8(v) => Some(f64::from(v)),
            Self::Int16(v) => Some(f64::from(v)),
            Self::Int24(v) | Self::Int32(v) => Some(f64::from(v)),
            Self::Float32(v) => Some(f64::from(v)),
            Self::Bool(_) | Self::String(_) => None,
        }
    }
}

impl std::fmt::Display for ZclValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Float32(v) => write!(f, "{v}"),
            other => match other.as_f64() {
                Some(n) => write!(f, "{n}"),
                None => write!(f, "{other:?}"),
            },
        }
    }
}
