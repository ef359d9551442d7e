//! Viconics devices

mod vt8000;

pub use vt8000::{fix_value, FixTemperatureCluster, Vt8000, TEMPERATURE_APPLICABLE_ATTRIBUTES};

use zigbee_core::{QuirkError, QuirkRegistry};

/// Register all Viconics quirks
pub fn register(registry: &QuirkRegistry) -> Result<(), QuirkError> {
    registry.register(Vt8000::quirk())?;
    Ok(())
}
