//! Zigbee device representation

use serde::{Deserialize, Serialize};

/// A Zigbee device as discovered by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZigbeeDevice {
    /// IEEE address (EUI-64)
    pub ieee_address: [u8; 8],
    /// Network short address
    pub nwk_address: u16,
    /// Manufacturer name (from Basic cluster)
    pub manufacturer: Option<String>,
    /// Model identifier (from Basic cluster)
    pub model: Option<String>,
    /// Device endpoints
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl ZigbeeDevice {
    /// Create a new device with just address info
    #[must_use] pub fn new(ieee_address: [u8; 8], nwk_address: u16) -> Self {
        Self {
            ieee_address,
            nwk_address,
            manufacturer: None,
            model: None,
            endpoints: Vec::new(),
        }
    }

    /// Get IEEE address as hex string
    #[must_use] pub fn ieee_address_string(&self) -> String {
        self.ieee_address
            .iter()
            .rev() // IEEE addresses are typically displayed in reverse byte order
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Get a display name (model or IEEE address)
    #[must_use] pub fn display_name(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.ieee_address_string())
    }

    /// Get an endpoint by ID
    #[must_use] pub fn endpoint(&self, id: u8) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}

/// A device endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint ID (1-240)
    pub id: u8,
    /// Profile ID (e.g., 0x0104 for Home Automation)
    pub profile_id: u16,
    /// Device ID within the profile
    pub device_id: u16,
    /// Input (server) clusters
    pub in_clusters: Vec<u16>,
    /// Output (client) clusters
    pub out_clusters: Vec<u16>,
}
