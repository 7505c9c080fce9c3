//! Claimed light instances.

use std::fmt::{self, Display, Formatter};

use tracing::{debug, info, warn};

use crate::descriptor::DeviceDescriptor;
use crate::enumerate::Enumerator;
use crate::taxonomy::FamilyRef;
use crate::{Error, Result};

/// A device claimed by a concrete family.
///
/// The `reset` and `exclusive` flags are passed through to the transport acquiring the device;
/// they are not enforced here.
#[derive(Debug, Clone)]
pub struct Light<'a> {
    family: FamilyRef<'a>,
    descriptor: DeviceDescriptor,
    reset: bool,
    exclusive: bool,
}

impl<'a> Light<'a> {
    /// Claim a device for `family`.
    ///
    /// Abstract families hand the device to their most specific concrete descendant. Fails with
    /// [`Error::LightUnsupported`] if no family of the subtree claims the device.
    pub fn new(
        family: FamilyRef<'a>,
        descriptor: DeviceDescriptor,
        reset: bool,
        exclusive: bool,
    ) -> Result<Self> {
        let family = match family.resolve(&descriptor) {
            Some(family) => family,
            None => return Err(Error::LightUnsupported(Box::new(descriptor))),
        };

        debug!("Claimed {} as {}", descriptor, family);

        Ok(Self { family, descriptor, reset, exclusive })
    }

    /// Concrete family owning this light.
    pub fn family(&self) -> FamilyRef<'a> {
        self.family
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// Whether device state should be cleared on acquisition.
    pub fn reset(&self) -> bool {
        self.reset
    }

    /// Whether the device should be acquired for sole access.
    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    pub fn vendor(&self) -> &'a str {
        self.family.vendor().unwrap_or_default()
    }

    /// Catalog model name of the claimed identifier pair.
    pub fn model(&self) -> &'a str {
        let devices = self.family.supported_device_ids();
        match (devices, self.descriptor.device_id()) {
            (Some(devices), Some(id)) => devices.get(&id).map_or("", String::as_str),
            _ => "",
        }
    }
}

impl Display for Light<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.vendor(), self.model(), self.descriptor)
    }
}

impl<'a> FamilyRef<'a> {
    /// Claim a device for this family.
    pub fn light(
        &self,
        descriptor: DeviceDescriptor,
        reset: bool,
        exclusive: bool,
    ) -> Result<Light<'a>> {
        Light::new(*self, descriptor, reset, exclusive)
    }

    /// Plugged devices claimed by this family's subtree.
    ///
    /// Enumeration failures are logged and treated like an empty bus.
    pub fn available_lights(&self, enumerator: &dyn Enumerator) -> Vec<DeviceDescriptor> {
        let mut devices = enumerate(enumerator);
        devices.retain(|descriptor| self.claims(descriptor));
        devices
    }

    /// Claim every plugged device supported by this family's subtree.
    ///
    /// Unsupported devices are skipped.
    pub fn all_lights(
        &self,
        enumerator: &dyn Enumerator,
        reset: bool,
        exclusive: bool,
    ) -> Vec<Light<'a>> {
        enumerate(enumerator)
            .into_iter()
            .filter_map(|descriptor| self.light(descriptor, reset, exclusive).ok())
            .collect()
    }

    /// Claim the first plugged device supported by this family's subtree.
    ///
    /// Fails with [`Error::NoLightsFound`] when nothing is plugged in, and with
    /// [`Error::LightUnsupported`] carrying the first device when none of them is supported.
    pub fn first_light(
        &self,
        enumerator: &dyn Enumerator,
        reset: bool,
        exclusive: bool,
    ) -> Result<Light<'a>> {
        let mut devices = enumerate(enumerator).into_iter();

        let first = devices.next().ok_or(Error::NoLightsFound)?;
        let first = match self.light(first, reset, exclusive) {
            Ok(light) => return Ok(light),
            Err(err) => err,
        };

        match devices.find_map(|descriptor| self.light(descriptor, reset, exclusive).ok()) {
            Some(light) => Ok(light),
            None => Err(first),
        }
    }
}

/// Enumerate devices, swallowing failures.
fn enumerate(enumerator: &dyn Enumerator) -> Vec<DeviceDescriptor> {
    match enumerator.devices() {
        Ok(devices) => {
            info!("Found {} devices", devices.len());
            devices
        },
        Err(err) => {
            warn!("Device enumeration failed: {}", err);
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DeviceId;
    use crate::taxonomy::{Taxonomy, TaxonomyBuilder};

    struct BrokenBus;

    impl Enumerator for BrokenBus {
        fn devices(&self) -> Result<Vec<DeviceDescriptor>> {
            Err(Error::Enumeration("bus unplugged".into()))
        }
    }

    fn sample() -> Taxonomy {
        let mut builder = TaxonomyBuilder::new("Root");
        builder.add_concrete("Root", "Acme", "Acme", &[(DeviceId::new(0x1, 0x2), "Blinker")]).unwrap();
        builder.add_abstract("Root", "Globex").unwrap();
        builder
            .add_concrete("Globex", "Globex Beacon", "Globex", &[(DeviceId::new(0x10, 0x20), "Beacon")])
            .unwrap();
        builder.build()
    }

    fn blinker() -> DeviceDescriptor {
        DeviceDescriptor::new(0x1, 0x2).with_product_string("Blinker")
    }

    fn beacon() -> DeviceDescriptor {
        DeviceDescriptor::new(0x10, 0x20).with_product_string("Beacon")
    }

    fn bogus() -> DeviceDescriptor {
        DeviceDescriptor::new(0xffff, 0xffff)
            .with_product_string("nonexistent light")
            .with_serial_number("bogus serial number")
            .with_release_number(0)
    }

    #[test]
    fn construct_known_good() {
        let taxonomy = sample();
        let acme = taxonomy.family("Acme").unwrap();

        let descriptor = blinker().with_serial_number("BS032974-3.0").with_release_number(0x0200);
        let light = Light::new(acme, descriptor.clone(), true, false).unwrap();

        assert_eq!(light.family(), acme);
        assert_eq!(light.descriptor(), &descriptor);
        assert!(light.reset());
        assert!(!light.exclusive());
        assert_eq!(light.vendor(), "Acme");
        assert_eq!(light.model(), "Blinker");
    }

    #[test]
    fn construct_known_bad() {
        let taxonomy = sample();

        for family in taxonomy.families() {
            match family.light(bogus(), false, false) {
                Err(Error::LightUnsupported(descriptor)) => assert_eq!(*descriptor, bogus()),
                result => panic!("unexpected result: {:?}", result),
            }
        }
    }

    #[test]
    fn construct_through_abstract_family() {
        let taxonomy = sample();

        let light = taxonomy.root().light(beacon(), false, true).unwrap();
        assert_eq!(light.family().name(), "Globex Beacon");
        assert!(light.exclusive());

        assert!(taxonomy.family("Globex").unwrap().light(blinker(), false, false).is_err());
    }

    #[test]
    fn available_lights_scoped_to_family() {
        let taxonomy = sample();
        let bus = vec![bogus(), blinker(), beacon()];

        assert_eq!(taxonomy.root().available_lights(&bus), [blinker(), beacon()]);
        assert_eq!(taxonomy.family("Globex").unwrap().available_lights(&bus), [beacon()]);
        assert!(taxonomy.root().available_lights(&BrokenBus).is_empty());
    }

    #[test]
    fn all_lights_skips_unsupported() {
        let taxonomy = sample();
        let bus = vec![blinker(), bogus(), beacon()];

        for family in taxonomy.families() {
            for light in family.all_lights(&bus, false, false) {
                assert!(light.family().descends_from(family));
                assert!(light.family().is_concrete());
            }
        }

        let lights = taxonomy.root().all_lights(&bus, false, false);
        let names: Vec<_> = lights.iter().map(|light| light.family().name()).collect();
        assert_eq!(names, ["Acme", "Globex Beacon"]);

        assert!(taxonomy.root().all_lights(&BrokenBus, false, false).is_empty());
    }

    #[test]
    fn first_light_failure_kinds() {
        let taxonomy = sample();
        let root = taxonomy.root();

        let empty: Vec<DeviceDescriptor> = Vec::new();
        assert!(matches!(root.first_light(&empty, false, false), Err(Error::NoLightsFound)));
        assert!(matches!(root.first_light(&BrokenBus, false, false), Err(Error::NoLightsFound)));

        match root.first_light(&vec![bogus()], false, false) {
            Err(Error::LightUnsupported(descriptor)) => assert_eq!(*descriptor, bogus()),
            result => panic!("unexpected result: {:?}", result),
        }
    }

    #[test]
    fn first_light_skips_unsupported() {
        let taxonomy = sample();
        let bus = vec![bogus(), beacon(), blinker()];

        let light = taxonomy.root().first_light(&bus, false, false).unwrap();
        assert_eq!(light.family().name(), "Globex Beacon");

        let light = taxonomy.family("Acme").unwrap().first_light(&bus, false, false).unwrap();
        assert_eq!(light.family().name(), "Acme");
    }

    #[test]
    fn display() {
        let taxonomy = sample();
        let light = taxonomy.root().light(blinker(), false, false).unwrap();
        assert_eq!(light.to_string(), "Acme Blinker [0001:0002 \"Blinker\"]");
    }
}
