//! Embrava Blynclight family.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "Embrava";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    builder.add_abstract(parent, "Embrava")?;

    builder.add_concrete("Embrava", "Blynclight", VENDOR, &[
        (DeviceId::new(0x2c0d, 0x0001), "Blynclight"),
        (DeviceId::new(0x2c0d, 0x000c), "Blynclight"),
        (DeviceId::new(0x0e53, 0x2516), "Blynclight"),
    ])?;

    builder.add_concrete("Embrava", "Blynclight Mini", VENDOR, &[
        (DeviceId::new(0x2c0d, 0x000a), "Blynclight Mini"),
        (DeviceId::new(0x0e53, 0x2517), "Blynclight Mini"),
    ])?;

    builder.add_concrete("Embrava", "Blynclight Plus", VENDOR, &[(
        DeviceId::new(0x2c0d, 0x0010),
        "Blynclight Plus",
    )])?;

    Ok(())
}
