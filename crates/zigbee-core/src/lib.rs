//! Zigbee host interface for device quirks
//!
//! This crate provides the pieces of a Zigbee host that device quirks plug
//! into: ZCL definitions, typed attribute values, per-cluster attribute
//! registries, signature/replacement tables and the quirk registry that
//! matches devices and routes attribute updates to cluster handlers.

pub mod attribute;
pub mod cluster;
pub mod device;
pub mod error;
pub mod handler;
pub mod quirk;
pub mod registry;
pub mod value;

pub use attribute::{AttributeDef, AttributeRegistry};
pub use cluster::DataType;
pub use device::{Endpoint, ZigbeeDevice};
pub use error::QuirkError;
pub use handler::{ClusterHandler, StandardCluster};
pub use quirk::{
    ClusterSlot, DeviceQuirk, EndpointReplacement, EndpointSignature, ModelInfo, QuirkedDevice,
    QuirkedEndpoint, Replacement, Signature,
};
pub use registry::QuirkRegistry;
pub use value::ZclValue;
