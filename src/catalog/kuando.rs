//! Kuando Busylight family.
//!
//! The Alpha shipped with a Microchip vendor ID before Kuando registered their own.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "Kuando";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    builder.add_abstract(parent, "Kuando")?;

    builder.add_concrete("Kuando", "Busylight Alpha", VENDOR, &[
        (DeviceId::new(0x04d8, 0xf848), "Busylight Alpha"),
        (DeviceId::new(0x27bb, 0x3bca), "Busylight Alpha"),
        (DeviceId::new(0x27bb, 0x3bcb), "Busylight Alpha"),
        (DeviceId::new(0x27bb, 0x3bce), "Busylight Alpha"),
    ])?;

    builder.add_concrete("Kuando", "Busylight Omega", VENDOR, &[
        (DeviceId::new(0x27bb, 0x3bcd), "Busylight Omega"),
        (DeviceId::new(0x27bb, 0x3bcf), "Busylight Omega"),
    ])?;

    Ok(())
}
