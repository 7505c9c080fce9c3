//! USB status light classification and effect generation.
//!
//! Status lights are recognized through a static catalog of device families. Abstract families
//! group lights by vendor, concrete families own the USB identifiers of a specific hardware line.
//! Raw HID descriptors are matched against the catalog to claim a light, and effects generate the
//! color frames a transport would push to the claimed hardware.
//!
//! ```no_run
//! use statuslight::{catalog, HidEnumerator, Spectrum, Effect};
//!
//! # fn main() -> statuslight::Result<()> {
//! let enumerator = HidEnumerator::new();
//! let light = catalog().root().first_light(&enumerator, false, false)?;
//! println!("Found {}", light);
//!
//! let spectrum = Spectrum::builder().steps(64).build()?;
//! for color in spectrum.frames().take(64) {
//!     println!("{}", color);
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod catalog;
pub mod claim;
pub mod descriptor;
pub mod effects;
pub mod enumerate;
pub mod light;
pub mod taxonomy;

pub use crate::catalog::catalog;
pub use crate::claim::ClaimStrength;
pub use crate::descriptor::{DeviceDescriptor, DeviceId, Field};
pub use crate::effects::{
    Blink, ColorFrame, Effect, Frames, Gradient, Rgb, Spectrum, SpectrumBuilder, Steady,
};
pub use crate::enumerate::{Enumerator, HidEnumerator};
pub use crate::light::Light;
pub use crate::taxonomy::{FamilyId, FamilyRef, Taxonomy, TaxonomyBuilder};

/// Status light errors.
#[derive(Error, Debug)]
pub enum Error {
    /// No family claims the device.
    #[error("unsupported light: {0}")]
    LightUnsupported(Box<DeviceDescriptor>),

    /// Enumeration did not report any device.
    #[error("no lights found")]
    NoLightsFound,

    /// Platform HID enumeration failed.
    #[error("unable to enumerate devices: {0}")]
    Enumeration(String),

    /// Family name registered twice.
    #[error("duplicate family: {0}")]
    DuplicateFamily(String),

    /// Parent family does not exist.
    #[error("unknown family: {0}")]
    UnknownFamily(String),

    /// Families can only be registered below abstract families.
    #[error("family {0} is concrete and cannot have children")]
    ConcreteParent(String),

    /// Concrete family without any device identifiers.
    #[error("family {0} has no supported device identifiers")]
    EmptyFamily(String),

    /// Effect parameters out of range.
    #[error("invalid effect parameters: {0}")]
    InvalidEffect(String),
}

pub type Result<T> = std::result::Result<T, Error>;
