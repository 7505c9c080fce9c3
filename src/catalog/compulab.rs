//! CompuLab fit-statUSB.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "CompuLab";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    let devices = [(DeviceId::new(0x2047, 0x03df), "fit-statUSB")];
    builder.add_concrete(parent, "fit-statUSB", VENDOR, &devices)?;
    Ok(())
}
