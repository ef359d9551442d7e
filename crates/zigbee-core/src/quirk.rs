//! Device quirks: signature and replacement tables
//!
//! A quirk pairs a [`Signature`] (what a device looks like on the network)
//! with a [`Replacement`] (how the host should model it instead). Applying a
//! quirk to a matching device yields a [`QuirkedDevice`] whose clusters are
//! served by [`ClusterHandler`]s, so attribute updates can be corrected.

use crate::device::{Endpoint, ZigbeeDevice};
use crate::error::QuirkError;
use crate::handler::{ClusterHandler, StandardCluster};
use crate::value::ZclValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Manufacturer/model pair as reported by the Basic cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelInfo {
    pub manufacturer: String,
    pub model: String,
}

impl ModelInfo {
    #[must_use] pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
        }
    }
}

/// Expected layout of one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSignature {
    pub profile_id: u16,
    pub device_type: u16,
    pub input_clusters: Vec<u16>,
    pub output_clusters: Vec<u16>,
}

impl EndpointSignature {
    /// Check a discovered endpoint against this signature
    ///
    /// Cluster lists are compared as sets; devices do not report them in a
    /// stable order.
    #[must_use] pub fn matches(&self, endpoint: &Endpoint) -> bool {
        fn set(ids: &[u16]) -> BTreeSet<u16> {
            ids.iter().copied().collect()
        }

        self.profile_id == endpoint.profile_id
            && self.device_type == endpoint.device_id
            && set(&self.input_clusters) == set(&endpoint.in_clusters)
            && set(&self.output_clusters) == set(&endpoint.out_clusters)
    }
}

/// Fingerprint identifying a device model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub models_info: Vec<ModelInfo>,
    pub endpoints: BTreeMap<u8, EndpointSignature>,
}

impl Signature {
    /// Check whether a discovered device matches this signature
    #[must_use] pub fn matches(&self, device: &ZigbeeDevice) -> bool {
        let model_matches = match (&device.manufacturer, &device.model) {
            (Some(manufacturer), Some(model)) => self
                .models_info
                .iter()
                .any(|info| &info.manufacturer == manufacturer && &info.model == model),
            _ => false,
        };
        if !model_matches {
            return false;
        }

        // The ZDO endpoint is never part of a signature
        let device_ids: BTreeSet<u8> = device
            .endpoints
            .iter()
            .map(|e| e.id)
            .filter(|&id| id != 0)
            .collect();
        let signature_ids: BTreeSet<u8> = self.endpoints.keys().copied().collect();
        if device_ids != signature_ids {
            return false;
        }

        self.endpoints.iter().all(|(id, sig)| {
            device
                .endpoint(*id)
                .is_some_and(|endpoint| sig.matches(endpoint))
        })
    }
}

/// One cluster entry of a replacement endpoint
#[derive(Debug, Clone)]
pub enum ClusterSlot {
    /// Keep the host's standard implementation of this cluster
    Standard(u16),
    /// Serve the cluster with a custom handler
    Custom(Arc<dyn ClusterHandler>),
}

impl ClusterSlot {
    #[must_use] pub fn cluster_id(&self) -> u16 {
        match self {
            Self::Standard(id) => *id,
            Self::Custom(handler) => handler.cluster_id(),
        }
    }

    #[must_use] pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Handler serving this slot
    #[must_use] pub fn handler(&self) -> Arc<dyn ClusterHandler> {
        match self {
            Self::Standard(id) => Arc::new(StandardCluster::new(*id)),
            Self::Custom(handler) => Arc::clone(handler),
        }
    }
}

impl From<u16> for ClusterSlot {
    fn from(cluster_id: u16) -> Self {
        Self::Standard(cluster_id)
    }
}

/// Replacement layout of one endpoint
#[derive(Debug, Clone)]
pub struct EndpointReplacement {
    pub profile_id: u16,
    pub device_type: u16,
    pub input_clusters: Vec<ClusterSlot>,
    pub output_clusters: Vec<ClusterSlot>,
}

/// Replacement layout of a device, keyed by endpoint ID
#[derive(Debug, Clone, Default)]
pub struct Replacement {
    pub endpoints: BTreeMap<u8, EndpointReplacement>,
}

/// A signature/replacement pair for one device model
#[derive(Debug, Clone)]
pub struct DeviceQuirk {
    pub name: String,
    pub signature: Signature,
    pub replacement: Replacement,
}

impl DeviceQuirk {
    /// Check that the replacement is consistent with the signature
    pub fn validate(&self) -> Result<(), QuirkError> {
        if self.signature.models_info.is_empty() {
            return Err(QuirkError::EmptyModelInfo(self.name.clone()));
        }

        let mut seen = BTreeSet::new();
        for info in &self.signature.models_info {
            if !seen.insert((&info.manufacturer, &info.model)) {
                return Err(QuirkError::RepeatedModelInfo {
                    quirk: self.name.clone(),
                    manufacturer: info.manufacturer.clone(),
                    model: info.model.clone(),
                });
            }
        }

        for (endpoint, replacement) in &self.replacement.endpoints {
            let Some(signature) = self.signature.endpoints.get(endpoint) else {
                return Err(QuirkError::EndpointMismatch {
                    quirk: self.name.clone(),
                    endpoint: *endpoint,
                });
            };

            let lists = [
                (&replacement.input_clusters, &signature.input_clusters),
                (&replacement.output_clusters, &signature.output_clusters),
            ];
            for (slots, ids) in lists {
                for (index, slot) in slots.iter().enumerate() {
                    // Slots past the end of the signature list add clusters
                    let Some(&expected) = ids.get(index) else {
                        continue;
                    };
                    if slot.is_custom() && slot.cluster_id() != expected {
                        return Err(QuirkError::ClusterMismatch {
                            quirk: self.name.clone(),
                            endpoint: *endpoint,
                            index,
                            expected,
                            actual: slot.cluster_id(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Build the quirked view of a matched device
    ///
    /// Endpoints the replacement does not mention keep their discovered
    /// layout with standard handlers.
    #[must_use] pub fn apply(&self, device: &ZigbeeDevice) -> QuirkedDevice {
        let mut endpoints = BTreeMap::new();

        for endpoint in &device.endpoints {
            let quirked = match self.replacement.endpoints.get(&endpoint.id) {
                Some(replacement) => QuirkedEndpoint {
                    id: endpoint.id,
                    profile_id: replacement.profile_id,
                    device_type: replacement.device_type,
                    in_clusters: replacement
                        .input_clusters
                        .iter()
                        .map(ClusterSlot::handler)
                        .collect(),
                    out_clusters: replacement
                        .output_clusters
                        .iter()
                        .map(ClusterSlot::handler)
                        .collect(),
                },
                None => QuirkedEndpoint::standard(endpoint),
            };
            endpoints.insert(endpoint.id, quirked);
        }

        QuirkedDevice {
            ieee_address: device.ieee_address,
            quirk: self.name.clone(),
            endpoints,
        }
    }
}

/// Endpoint of a quirked device
#[derive(Debug, Clone)]
pub struct QuirkedEndpoint {
    pub id: u8,
    pub profile_id: u16,
    pub device_type: u16,
    pub in_clusters: Vec<Arc<dyn ClusterHandler>>,
    pub out_clusters: Vec<Arc<dyn ClusterHandler>>,
}

impl QuirkedEndpoint {
    fn standard(endpoint: &Endpoint) -> Self {
        let handlers = |ids: &[u16]| -> Vec<Arc<dyn ClusterHandler>> {
            ids.iter()
                .map(|&id| Arc::new(StandardCluster::new(id)) as Arc<dyn ClusterHandler>)
                .collect()
        };

        Self {
            id: endpoint.id,
            profile_id: endpoint.profile_id,
            device_type: endpoint.device_id,
            in_clusters: handlers(&endpoint.in_clusters),
            out_clusters: handlers(&endpoint.out_clusters),
        }
    }

    /// Handler for a cluster, input list first
    #[must_use] pub fn cluster(&self, cluster_id: u16) -> Option<&Arc<dyn ClusterHandler>> {
        self.in_clusters
            .iter()
            .chain(self.out_clusters.iter())
            .find(|h| h.cluster_id() == cluster_id)
    }
}

/// A device with a quirk applied
#[derive(Debug, Clone)]
pub struct QuirkedDevice {
    pub ieee_address: [u8; 8],
    /// Name of the applied quirk
    pub quirk: String,
    pub endpoints: BTreeMap<u8, QuirkedEndpoint>,
}

impl QuirkedDevice {
    #[must_use] pub fn endpoint(&self, id: u8) -> Option<&QuirkedEndpoint> {
        self.endpoints.get(&id)
    }

    /// Route an attribute report to the handler owning the cluster
    ///
    /// Returns the value to record. Reports for unknown endpoints or
    /// clusters are returned unchanged.
    #[must_use] pub fn update_attribute(
        &self,
        endpoint: u8,
        cluster_id: u16,
        attr_id: u16,
        value: ZclValue,
    ) -> ZclValue {
        match self.endpoint(endpoint).and_then(|ep| ep.cluster(cluster_id)) {
            Some(handler) => handler.update_attribute(attr_id, value),
            None => {
                tracing::debug!(
                    "No handler for cluster {:#06x} on EP{} of quirked device ({})",
                    cluster_id,
                    endpoint,
                    self.quirk
                );
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeRegistry;
    use crate::cluster::{device_type, id, profile};

    #[derive(Debug)]
    struct Doubler;

    impl ClusterHandler for Doubler {
        fn cluster_id(&self) -> u16 {
            id::TEMPERATURE_MEASUREMENT
        }

        fn name(&self) -> &str {
            "doubler"
        }

        fn attributes(&self) -> &AttributeRegistry {
            &crate::attribute::TEMPERATURE_MEASUREMENT
        }

        fn update_attribute(&self, _attr_id: u16, value: ZclValue) -> ZclValue {
            match value {
                ZclValue::Int16(v) => ZclValue::Int16(v * 2),
                other => other,
            }
        }
    }

    fn sensor_quirk() -> DeviceQuirk {
        DeviceQuirk {
            name: "TestSensor".to_string(),
            signature: Signature {
                models_info: vec![ModelInfo::new("Acme", "T1")],
                endpoints: BTreeMap::from([(
                    1,
                    EndpointSignature {
                        profile_id: profile::HOME_AUTOMATION,
                        device_type: device_type::TEMPERATURE_SENSOR,
                        input_clusters: vec![id::BASIC, id::TEMPERATURE_MEASUREMENT],
                        output_clusters: vec![],
                    },
                )]),
            },
            replacement: Replacement {
                endpoints: BTreeMap::from([(
                    1,
                    EndpointReplacement {
                        profile_id: profile::HOME_AUTOMATION,
                        device_type: device_type::TEMPERATURE_SENSOR,
                        input_clusters: vec![
                            id::BASIC.into(),
                            ClusterSlot::Custom(Arc::new(Doubler)),
                        ],
                        output_clusters: vec![],
                    },
                )]),
            },
        }
    }

    fn sensor_device() -> ZigbeeDevice {
        let mut device = ZigbeeDevice::new([1; 8], 0x1234);
        device.manufacturer = Some("Acme".to_string());
        device.model = Some("T1".to_string());
        device.endpoints = vec![Endpoint {
            id: 1,
            profile_id: profile::HOME_AUTOMATION,
            device_id: device_type::TEMPERATURE_SENSOR,
            // reversed order still matches
            in_clusters: vec![id::TEMPERATURE_MEASUREMENT, id::BASIC],
            out_clusters: vec![],
        }];
        device
    }

    #[test]
    fn test_signature_matches() {
        let quirk = sensor_quirk();
        assert!(quirk.signature.matches(&sensor_device()));

        let mut other_model = sensor_device();
        other_model.model = Some("T2".to_string());
        assert!(!quirk.signature.matches(&other_model));

        let mut no_model = sensor_device();
        no_model.manufacturer = None;
        assert!(!quirk.signature.matches(&no_model));

        let mut extra_cluster = sensor_device();
        extra_cluster.endpoints[0].out_clusters.push(id::OTA);
        assert!(!quirk.signature.matches(&extra_cluster));

        let mut extra_endpoint = sensor_device();
        let mut ep = extra_endpoint.endpoints[0].clone();
        ep.id = 2;
        extra_endpoint.endpoints.push(ep);
        assert!(!quirk.signature.matches(&extra_endpoint));
    }

    #[test]
    fn test_zdo_endpoint_ignored() {
        let mut device = sensor_device();
        device.endpoints.push(Endpoint {
            id: 0,
            profile_id: 0,
            device_id: 0,
            in_clusters: vec![],
            out_clusters: vec![],
        });
        assert!(sensor_quirk().signature.matches(&device));
    }

    #[test]
    fn test_validate() {
        assert_eq!(sensor_quirk().validate(), Ok(()));

        let mut no_models = sensor_quirk();
        no_models.signature.models_info.clear();
        assert_eq!(
            no_models.validate(),
            Err(QuirkError::EmptyModelInfo("TestSensor".to_string()))
        );

        let mut stray_endpoint = sensor_quirk();
        let ep = stray_endpoint.replacement.endpoints[&1].clone();
        stray_endpoint.replacement.endpoints.insert(3, ep);
        assert!(matches!(
            stray_endpoint.validate(),
            Err(QuirkError::EndpointMismatch { endpoint: 3, .. })
        ));

        let mut swapped = sensor_quirk();
        swapped
            .replacement
            .endpoints
            .get_mut(&1)
            .unwrap()
            .input_clusters
            .swap(0, 1);
        assert!(matches!(
            swapped.validate(),
            Err(QuirkError::ClusterMismatch {
                index: 0,
                expected: 0x0000,
                actual: 0x0402,
                ..
            })
        ));
    }

    #[test]
    fn test_apply_and_dispatch() {
        let quirked = sensor_quirk().apply(&sensor_device());
        assert_eq!(quirked.quirk, "TestSensor");

        let ep = quirked.endpoint(1).unwrap();
        assert_eq!(ep.in_clusters.len(), 2);
        assert_eq!(ep.cluster(id::TEMPERATURE_MEASUREMENT).unwrap().name(), "doubler");
        assert_eq!(ep.cluster(id::BASIC).unwrap().name(), "standard");

        assert_eq!(
            quirked.update_attribute(1, id::TEMPERATURE_MEASUREMENT, 0x0000, ZclValue::Int16(21)),
            ZclValue::Int16(42)
        );
        assert_eq!(
            quirked.update_attribute(1, id::BASIC, 0x0000, ZclValue::Uint8(3)),
            ZclValue::Uint8(3)
        );
        // unknown endpoint
        assert_eq!(
            quirked.update_attribute(9, id::TEMPERATURE_MEASUREMENT, 0x0000, ZclValue::Int16(21)),
            ZclValue::Int16(21)
        );
    }

    #[test]
    fn test_apply_keeps_unlisted_endpoints() {
        let mut quirk = sensor_quirk();
        quirk.replacement.endpoints.clear();
        let quirked = quirk.apply(&sensor_device());
        let ep = quirked.endpoint(1).unwrap();
        assert_eq!(ep.device_type, device_type::TEMPERATURE_SENSOR);
        assert_eq!(
            quirked.update_attribute(1, id::TEMPERATURE_MEASUREMENT, 0x0000, ZclValue::Int16(21)),
            ZclValue::Int16(21)
        );
    }
}
