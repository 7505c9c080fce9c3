//! ThingM blink(1).

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "ThingM";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    builder.add_concrete(parent, "Blink1", VENDOR, &[(DeviceId::new(0x27b8, 0x01ed), "Blink(1)")])?;
    Ok(())
}
