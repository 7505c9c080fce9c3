//! Normalized view of an enumerated HID device.

use std::fmt::{self, Display, Formatter};

use hidapi::DeviceInfo;
use tracing::trace;

/// USB vendor and product ID pair.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone)]
pub struct DeviceId {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceId {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self { vendor_id, product_id }
    }
}

impl From<(u16, u16)> for DeviceId {
    fn from((vendor_id, product_id): (u16, u16)) -> Self {
        Self { vendor_id, product_id }
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// Value of a single descriptor field.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Field {
    DeviceId(u16, u16),
    Text(String),
    Number(u16),
    Int(i32),
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceId(vendor_id, product_id) => {
                write!(f, "{}", DeviceId::new(*vendor_id, *product_id))
            },
            Self::Text(text) => write!(f, "{}", text),
            Self::Number(number) => write!(f, "0x{:04x}", number),
            Self::Int(int) => write!(f, "{}", int),
        }
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Field {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u16> for Field {
    fn from(number: u16) -> Self {
        Self::Number(number)
    }
}

impl From<(u16, u16)> for Field {
    fn from((vendor_id, product_id): (u16, u16)) -> Self {
        Self::DeviceId(vendor_id, product_id)
    }
}

/// Identifying data of one enumerated device.
///
/// Descriptors are immutable once captured. The [`DeviceId`] is the primary matching key, the
/// product string only confirms a match.
#[derive(Default, PartialEq, Eq, Debug, Clone)]
pub struct DeviceDescriptor {
    device_id: Option<DeviceId>,
    product_string: Option<String>,
    serial_number: Option<String>,
    release_number: Option<u16>,
    manufacturer_string: Option<String>,
    path: Option<String>,
    interface_number: Option<i32>,
}

impl DeviceDescriptor {
    /// Descriptor with only the identifier pair set.
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self { device_id: Some(DeviceId::new(vendor_id, product_id)), ..Default::default() }
    }

    /// Set the product string.
    pub fn with_product_string(mut self, product_string: impl Into<String>) -> Self {
        self.product_string = Some(product_string.into());
        self
    }

    /// Set the serial number.
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Set the release number.
    pub fn with_release_number(mut self, release_number: u16) -> Self {
        self.release_number = Some(release_number);
        self
    }

    /// Build a descriptor from a flat field mapping.
    ///
    /// Unknown keys and values of the wrong kind are ignored, absent keys stay unset.
    pub fn from_fields<'a, I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<Field>,
    {
        let mut descriptor = Self::default();

        for (key, value) in fields {
            match (key, value.into()) {
                ("device_id", Field::DeviceId(vendor_id, product_id)) => {
                    descriptor.device_id = Some(DeviceId::new(vendor_id, product_id));
                },
                ("product_string", Field::Text(text)) => descriptor.product_string = Some(text),
                ("serial_number", Field::Text(text)) => descriptor.serial_number = Some(text),
                ("manufacturer_string", Field::Text(text)) => {
                    descriptor.manufacturer_string = Some(text)
                },
                ("path", Field::Text(text)) => descriptor.path = Some(text),
                ("release_number", Field::Number(number)) => {
                    descriptor.release_number = Some(number)
                },
                ("interface_number", Field::Int(int)) => descriptor.interface_number = Some(int),
                (key, value) => trace!("Ignoring descriptor field {}={:?}", key, value),
            }
        }

        descriptor
    }

    /// Flat view of all fields which are set.
    pub fn fields(&self) -> Vec<(&'static str, Field)> {
        let mut fields = Vec::new();

        if let Some(id) = self.device_id {
            fields.push(("device_id", Field::DeviceId(id.vendor_id, id.product_id)));
            fields.push(("vendor_id", Field::Number(id.vendor_id)));
            fields.push(("product_id", Field::Number(id.product_id)));
        }

        let texts = [
            ("product_string", &self.product_string),
            ("serial_number", &self.serial_number),
            ("manufacturer_string", &self.manufacturer_string),
            ("path", &self.path),
        ];
        for (key, text) in texts.iter() {
            if let Some(text) = text {
                fields.push((*key, Field::Text(text.clone())));
            }
        }

        if let Some(release_number) = self.release_number {
            fields.push(("release_number", Field::Number(release_number)));
        }

        if let Some(interface_number) = self.interface_number {
            fields.push(("interface_number", Field::Int(interface_number)));
        }

        fields
    }

    pub fn device_id(&self) -> Option<DeviceId> {
        self.device_id
    }

    pub fn vendor_id(&self) -> Option<u16> {
        self.device_id.map(|id| id.vendor_id)
    }

    pub fn product_id(&self) -> Option<u16> {
        self.device_id.map(|id| id.product_id)
    }

    /// Vendor product string, empty strings are treated as absent.
    pub fn product_string(&self) -> Option<&str> {
        self.product_string.as_deref().filter(|product| !product.trim().is_empty())
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn release_number(&self) -> Option<u16> {
        self.release_number
    }

    pub fn manufacturer_string(&self) -> Option<&str> {
        self.manufacturer_string.as_deref()
    }

    /// Platform path of the HID device.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn interface_number(&self) -> Option<i32> {
        self.interface_number
    }
}

impl From<&DeviceInfo> for DeviceDescriptor {
    fn from(info: &DeviceInfo) -> Self {
        Self {
            device_id: Some(DeviceId::new(info.vendor_id(), info.product_id())),
            product_string: info.product_string().map(String::from),
            serial_number: info.serial_number().map(String::from),
            release_number: Some(info.release_number()),
            manufacturer_string: info.manufacturer_string().map(String::from),
            path: Some(info.path().to_string_lossy().into_owned()),
            interface_number: Some(info.interface_number()),
        }
    }
}

impl Display for DeviceDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.device_id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "????:????")?,
        }

        if let Some(product) = self.product_string() {
            write!(f, " \"{}\"", product)?;
        }

        if let Some(serial) = self.serial_number() {
            write!(f, " serial={}", serial)?;
        }

        Ok(())
    }
}
