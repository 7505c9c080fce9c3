//! Agile Innovative BlinkStick lights.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "Agile Innovative";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    let devices = [(DeviceId::new(0x20a0, 0x41e5), "BlinkStick")];
    builder.add_concrete(parent, "BlinkStick", VENDOR, &devices)?;
    Ok(())
}
