//! Cluster handlers
//!
//! Every cluster on a quirked endpoint is served by a [`ClusterHandler`].
//! The host calls [`ClusterHandler::update_attribute`] for each incoming
//! attribute report before the value is recorded, which lets a quirk rewrite
//! values the device gets wrong.

use crate::attribute::{registry_for, AttributeRegistry};
use crate::value::ZclValue;

/// Capability interface the host expects from a cluster implementation
pub trait ClusterHandler: Send + Sync + std::fmt::Debug {
    /// Cluster ID this handler serves
    fn cluster_id(&self) -> u16;

    /// Human readable handler name (for logs)
    fn name(&self) -> &str;

    /// Attribute table of the cluster
    fn attributes(&self) -> &AttributeRegistry;

    /// Hook run on every attribute update before it is recorded
    ///
    /// Returns the value the host should store. The default keeps it as is.
    fn update_attribute(&self, attr_id: u16, value: ZclValue) -> ZclValue {
        let _ = attr_id;
        value
    }
}

/// Handler for an unmodified cluster
#[derive(Debug, Clone)]
pub struct StandardCluster {
    cluster_id: u16,
    attributes: AttributeRegistry,
}

impl StandardCluster {
    #[must_use] pub fn new(cluster_id: u16) -> Self {
        Self {
            cluster_id,
            attributes: registry_for(cluster_id),
        }
    }
}

impl ClusterHandler for StandardCluster {
    fn cluster_id(&self) -> u16 {
        self.cluster_id
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }
}
