//! Device quirks for Zigbee devices that misbehave
//!
//! Each vendor module declares signature/replacement tables for its devices
//! and the cluster handlers that correct their reports. Vendor modules are
//! enabled with cargo features of the same name.

#[cfg(feature = "viconics")]
pub mod viconics;

use zigbee_core::{QuirkError, QuirkRegistry};

/// Register every compiled-in quirk
pub fn register_all(registry: &QuirkRegistry) -> Result<(), QuirkError> {
    #[cfg(feature = "viconics")]
    viconics::register(registry)?;

    tracing::debug!("{} device quirk(s) registered", registry.len());
    Ok(())
}
