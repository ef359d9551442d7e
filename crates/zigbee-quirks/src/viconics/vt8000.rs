//! Viconics VT8000 HVAC controller
//!
//! The VT8000 firmware converts its Celsius readings as if they were
//! Fahrenheit before reporting them. For an actual temperature `c` (in
//! hundredths of a degree) it reports `(c - 3200) * 5 / 9`, so applying
//! `v * 9 / 5 + 3200` to the reported value recovers `c`.

use std::collections::BTreeMap;
use std::sync::Arc;
use zigbee_core::attribute::{self, AttributeRegistry};
use zigbee_core::cluster::{device_type, id, profile};
use zigbee_core::{
    ClusterHandler, ClusterSlot, DeviceQuirk, EndpointReplacement, EndpointSignature, ModelInfo,
    Replacement, Signature, ZclValue,
};

/// Temperature Measurement attributes the firmware misreports
pub const TEMPERATURE_APPLICABLE_ATTRIBUTES: &[&str] =
    &["measured_value", "min_measured_value", "max_measured_value"];

const THERMOSTAT_ENDPOINT: u8 = 10;
const SWITCH_ENDPOINT: u8 = 14;

const THERMOSTAT_IN_CLUSTERS: [u16; 9] = [
    id::BASIC,
    id::IDENTIFY,
    id::GROUPS,
    id::SCENES,
    id::THERMOSTAT,
    id::FAN_CONTROL,
    id::THERMOSTAT_UI_CONFIG,
    id::TEMPERATURE_MEASUREMENT,
    id::OCCUPANCY_SENSING,
];

const THERMOSTAT_OUT_CLUSTERS: [u16; 10] = [
    id::BASIC,
    id::IDENTIFY,
    id::GROUPS,
    id::SCENES,
    id::THERMOSTAT,
    id::FAN_CONTROL,
    id::THERMOSTAT_UI_CONFIG,
    id::TEMPERATURE_MEASUREMENT,
    id::OCCUPANCY_SENSING,
    id::IAS_ZONE,
];

/// Undo the firmware's double conversion for applicable attributes
///
/// Values of attributes missing from `attributes`, or whose name is not in
/// `applicable`, are returned unchanged. Corrected values take the
/// attribute's declared type, truncating toward zero.
#[must_use] pub fn fix_value(
    attributes: &AttributeRegistry,
    applicable: &[&str],
    attr_id: u16,
    value: ZclValue,
) -> ZclValue {
    let Some(attr) = attributes.get(attr_id) else {
        return value;
    };
    if !applicable.contains(&attr.name) {
        return value;
    }

    let Some(raw) = value.as_f64() else {
        tracing::debug!("Not correcting non-numeric {} value {}", attr.name, value);
        return value;
    };

    match attr.data_type.coerce(raw * 9.0 / 5.0 + 3200.0) {
        Some(fixed) => {
            tracing::trace!("Corrected {} from {} to {}", attr.name, value, fixed);
            fixed
        }
        None => value,
    }
}

/// Temperature Measurement cluster that fixes misreported temperatures
#[derive(Debug, Clone, Copy, Default)]
pub struct FixTemperatureCluster;

impl ClusterHandler for FixTemperatureCluster {
    fn cluster_id(&self) -> u16 {
        id::TEMPERATURE_MEASUREMENT
    }

    fn name(&self) -> &str {
        "FixTemperatureCluster"
    }

    fn attributes(&self) -> &AttributeRegistry {
        &attribute::TEMPERATURE_MEASUREMENT
    }

    fn update_attribute(&self, attr_id: u16, value: ZclValue) -> ZclValue {
        fix_value(
            self.attributes(),
            TEMPERATURE_APPLICABLE_ATTRIBUTES,
            attr_id,
            value,
        )
    }
}

/// Viconics VT8000 HVAC controller
#[derive(Debug, Clone, Copy)]
pub struct Vt8000;

impl Vt8000 {
    pub const NAME: &'static str = "Viconics VT8000";

    #[must_use] pub fn signature() -> Signature {
        Signature {
            models_info: vec![ModelInfo::new("Viconics", "8000 Series")],
            endpoints: BTreeMap::from([
                (
                    THERMOSTAT_ENDPOINT,
                    EndpointSignature {
                        profile_id: profile::HOME_AUTOMATION,
                        device_type: device_type::THERMOSTAT,
                        input_clusters: THERMOSTAT_IN_CLUSTERS.to_vec(),
                        output_clusters: THERMOSTAT_OUT_CLUSTERS.to_vec(),
                    },
                ),
                (
                    SWITCH_ENDPOINT,
                    EndpointSignature {
                        profile_id: profile::HOME_AUTOMATION,
                        device_type: device_type::ON_OFF_SWITCH,
                        input_clusters: vec![],
                        output_clusters: vec![id::OTA],
                    },
                ),
            ]),
        }
    }

    /// Signature layout with the temperature cluster swapped for
    /// [`FixTemperatureCluster`] on the thermostat endpoint
    #[must_use] pub fn replacement() -> Replacement {
        let fixed: Arc<dyn ClusterHandler> = Arc::new(FixTemperatureCluster);
        let slots = |ids: &[u16]| -> Vec<ClusterSlot> {
            ids.iter()
                .map(|&cluster_id| {
                    if cluster_id == id::TEMPERATURE_MEASUREMENT {
                        ClusterSlot::Custom(Arc::clone(&fixed))
                    } else {
                        ClusterSlot::Standard(cluster_id)
                    }
                })
                .collect()
        };

        Replacement {
            endpoints: BTreeMap::from([
                (
                    THERMOSTAT_ENDPOINT,
                    EndpointReplacement {
                        profile_id: profile::HOME_AUTOMATION,
                        device_type: device_type::THERMOSTAT,
                        input_clusters: slots(&THERMOSTAT_IN_CLUSTERS),
                        output_clusters: slots(&THERMOSTAT_OUT_CLUSTERS),
                    },
                ),
                (
                    SWITCH_ENDPOINT,
                    EndpointReplacement {
                        profile_id: profile::HOME_AUTOMATION,
                        device_type: device_type::ON_OFF_SWITCH,
                        input_clusters: vec![],
                        output_clusters: vec![ClusterSlot::Standard(id::OTA)],
                    },
                ),
            ]),
        }
    }

    #[must_use] pub fn quirk() -> DeviceQuirk {
        DeviceQuirk {
            name: Self::NAME.to_string(),
            signature: Self::signature(),
            replacement: Self::replacement(),
        }
    }
}
