//! Per-cluster attribute registries

use crate::cluster::{basic_attrs, id, temperature_attrs, DataType};

/// Definition of one cluster attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    /// Attribute ID within the cluster
    pub id: u16,
    /// Attribute name (snake_case)
    pub name: &'static str,
    /// Declared data type
    pub data_type: DataType,
}

impl AttributeDef {
    #[must_use] pub const fn new(id: u16, name: &'static str, data_type: DataType) -> Self {
        Self {
            id,
            name,
            data_type,
        }
    }
}

/// Attribute table of a cluster, keyed by attribute ID
#[derive(Debug, Clone, Copy)]
pub struct AttributeRegistry {
    attributes: &'static [AttributeDef],
}

impl AttributeRegistry {
    /// Create a registry over a static attribute table
    #[must_use] pub const fn new(attributes: &'static [AttributeDef]) -> Self {
        Self { attributes }
    }

    /// Registry with no attributes
    #[must_use] pub const fn empty() -> Self {
        Self { attributes: &[] }
    }

    /// Look up an attribute by ID
    #[must_use] pub fn get(&self, attr_id: u16) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.id == attr_id)
    }
}

const BASIC_ATTRS: &[AttributeDef] = &[
    AttributeDef::new(basic_attrs::ZCL_VERSION, "zcl_version", DataType::Uint8),
    AttributeDef::new(basic_attrs::APPLICATION_VERSION, "app_version", DataType::Uint8),
    AttributeDef::new(basic_attrs::STACK_VERSION, "stack_version", DataType::Uint8),
    AttributeDef::new(basic_attrs::HW_VERSION, "hw_version", DataType::Uint8),
    AttributeDef::new(basic_attrs::MANUFACTURER_NAME, "manufacturer", DataType::String),
    AttributeDef::new(basic_attrs::MODEL_IDENTIFIER, "model", DataType::String),
    AttributeDef::new(basic_attrs::DATE_CODE, "date_code", DataType::String),
    AttributeDef::new(basic_attrs::POWER_SOURCE, "power_source", DataType::Enum8),
    AttributeDef::new(basic_attrs::SW_BUILD_ID, "sw_build_id", DataType::String),
];

const TEMPERATURE_MEASUREMENT_ATTRS: &[AttributeDef] = &[
    AttributeDef::new(temperature_attrs::MEASURED_VALUE, "measured_value", DataType::Int16),
    AttributeDef::new(temperature_attrs::MIN_MEASURED_VALUE, "min_measured_value", DataType::Int16),
    AttributeDef::new(temperature_attrs::MAX_MEASURED_VALUE, "max_measured_value", DataType::Int16),
    AttributeDef::new(temperature_attrs::TOLERANCE, "tolerance", DataType::Uint16),
];

/// Basic cluster attributes
pub static BASIC: AttributeRegistry = AttributeRegistry::new(BASIC_ATTRS);

/// Temperature Measurement cluster attributes
pub static TEMPERATURE_MEASUREMENT: AttributeRegistry =
    AttributeRegistry::new(TEMPERATURE_MEASUREMENT_ATTRS);

/// Standard attribute registry for a cluster
///
/// Clusters without a table here get an empty registry, so their updates
/// are passed through untouched.
#[must_use] pub fn registry_for(cluster_id: u16) -> AttributeRegistry {
    match cluster_id {
        id::BASIC => BASIC,
        id::TEMPERATURE_MEASUREMENT => TEMPERATURE_MEASUREMENT,
        _ => AttributeRegistry::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let reg = registry_for(id::TEMPERATURE_MEASUREMENT);
        assert_eq!(reg.get(0x0000).map(|a| a.name), Some("measured_value"));
        assert_eq!(reg.get(0x0003).map(|a| a.data_type), Some(DataType::Uint16));
        assert_eq!(reg.get(0x0002).map(|a| a.name), Some("max_measured_value"));
        assert!(reg.get(0x0010).is_none());
    }

    #[test]
    fn test_unknown_cluster_is_empty() {
        assert!(registry_for(id::THERMOSTAT).get(0x0000).is_none());
        assert_eq!(
            registry_for(id::BASIC).get(0x0005).map(|a| a.name),
            Some("model")
        );
    }
}
