//! HID device enumeration.

use hidapi::HidApi;
use tracing::{debug, instrument};

use crate::descriptor::DeviceDescriptor;
use crate::{Error, Result};

/// Source of currently plugged devices.
pub trait Enumerator {
    /// Descriptors of all enumerable devices.
    fn devices(&self) -> Result<Vec<DeviceDescriptor>>;
}

/// Enumerator backed by the platform HID layer.
#[derive(Default, Debug, Copy, Clone)]
pub struct HidEnumerator;

impl HidEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Enumerator for HidEnumerator {
    #[instrument(skip(self))]
    fn devices(&self) -> Result<Vec<DeviceDescriptor>> {
        let api = HidApi::new()
            .map_err(|err| Error::Enumeration(format!("unable to access HID: {}", err)))?;

        let devices: Vec<_> = api.device_list().map(DeviceDescriptor::from).collect();
        debug!("Enumerated {} HID devices", devices.len());

        Ok(devices)
    }
}

impl Enumerator for [DeviceDescriptor] {
    fn devices(&self) -> Result<Vec<DeviceDescriptor>> {
        Ok(self.to_vec())
    }
}

impl Enumerator for Vec<DeviceDescriptor> {
    fn devices(&self) -> Result<Vec<DeviceDescriptor>> {
        Ok(self.clone())
    }
}
