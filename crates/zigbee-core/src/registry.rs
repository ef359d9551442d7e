//! Quirk registry

use crate::device::ZigbeeDevice;
use crate::error::QuirkError;
use crate::quirk::{DeviceQuirk, ModelInfo, QuirkedDevice};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Registered quirks, keyed by manufacturer/model
///
/// Filled once at load time and shared with whatever task delivers device
/// announcements and attribute reports. Quirk names are unique across the
/// whole registry.
#[derive(Debug, Default)]
pub struct QuirkRegistry {
    quirks: DashMap<ModelInfo, Vec<Arc<DeviceQuirk>>>,
    names: DashMap<String, Arc<DeviceQuirk>>,
}

impl QuirkRegistry {
    /// Create an empty registry
    #[must_use] pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a quirk under each of its model infos
    pub fn register(&self, quirk: DeviceQuirk) -> Result<Arc<DeviceQuirk>, QuirkError> {
        quirk.validate()?;

        let quirk = Arc::new(quirk);
        match self.names.entry(quirk.name.clone()) {
            Entry::Occupied(_) => return Err(QuirkError::Duplicate(quirk.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&quirk));
            }
        }

        for info in &quirk.signature.models_info {
            tracing::info!(
                "Registering quirk {} for {} {}",
                quirk.name,
                info.manufacturer,
                info.model
            );
            self.quirks
                .entry(info.clone())
                .or_default()
                .push(Arc::clone(&quirk));
        }

        Ok(quirk)
    }

    /// Find the first registered quirk whose signature matches a device
    pub fn find(&self, device: &ZigbeeDevice) -> Option<Arc<DeviceQuirk>> {
        let (Some(manufacturer), Some(model)) = (&device.manufacturer, &device.model) else {
            return None;
        };

        let candidates = self.quirks.get(&ModelInfo::new(manufacturer, model))?;
        let found = candidates
            .iter()
            .find(|q| q.signature.matches(device))
            .cloned();

        match &found {
            Some(quirk) => tracing::debug!(
                "Device {} matches quirk {}",
                device.display_name(),
                quirk.name
            ),
            None => tracing::debug!(
                "Device {} ({} {}) has {} candidate quirk(s), none matched its endpoints",
                device.ieee_address_string(),
                manufacturer,
                model,
                candidates.len()
            ),
        }

        found
    }

    /// Find a matching quirk and apply it
    pub fn apply(&self, device: &ZigbeeDevice) -> Option<QuirkedDevice> {
        self.find(device).map(|quirk| quirk.apply(device))
    }

    /// Number of registered quirks
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of quirks registered for a manufacturer/model
    pub fn count_for(&self, info: &ModelInfo) -> usize {
        self.quirks.get(info).map_or(0, |list| list.len())
    }
}
