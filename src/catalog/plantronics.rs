//! Plantronics status indicator.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "Plantronics";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    builder.add_concrete(parent, "Status Indicator", VENDOR, &[(
        DeviceId::new(0x047f, 0xd005),
        "Status Indicator",
    )])?;
    Ok(())
}
