//! MuteMe buttons.

use crate::descriptor::DeviceId;
use crate::taxonomy::TaxonomyBuilder;
use crate::Result;

const VENDOR: &str = "MuteMe";

pub(super) fn register(builder: &mut TaxonomyBuilder, parent: &str) -> Result<()> {
    builder.add_abstract(parent, "MuteMe")?;

    builder.add_concrete("MuteMe", "MuteMe Original", VENDOR, &[
        (DeviceId::new(0x16c0, 0x27db), "MuteMe Original"),
        (DeviceId::new(0x20a0, 0x42da), "MuteMe Original"),
    ])?;

    builder.add_concrete("MuteMe", "MuteMe Mini", VENDOR, &[(
        DeviceId::new(0x20a0, 0x42db),
        "MuteMe Mini",
    )])?;

    Ok(())
}
