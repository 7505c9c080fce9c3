//! Luxafor lights.
//!
//! All Luxafor lights share a single identifier pair, the product string tells them apart.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "Luxafor";

/// Identifier pair shared by every Luxafor light.
const LUXAFOR: DeviceId = DeviceId::new(0x04d8, 0xf372);

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    builder.add_abstract(parent, "Luxafor")?;

    // Flag first, it is the fallback for devices without a product string.
    for model in &["Flag", "Mute", "Orb", "Bluetooth"] {
        let name = format!("Luxafor {}", model);
        builder.add_concrete("Luxafor", &name, VENDOR, &[(LUXAFOR, *model)])?;
    }

    Ok(())
}
