//! EPOS Busylight.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "EPOS";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    let devices = [(DeviceId::new(0x1395, 0x0074), "Busylight")];
    builder.add_concrete(parent, "EPOS Busylight", VENDOR, &devices)?;
    Ok(())
}
