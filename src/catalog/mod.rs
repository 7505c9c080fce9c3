//! Built-in catalog of supported lights.

use std::sync::OnceLock;

use crate::taxonomy::{Taxonomy, TaxonomyBuilder};
use crate::Result;

mod agile_innovative;
mod compulab;
mod embrava;
mod epos;
mod kuando;
mod luxafor;
mod muteme;
mod plantronics;
mod thingm;

/// Name of the catalog's root family.
pub const ROOT: &str = "Light";

/// Process-wide catalog, built on first access.
pub fn catalog() -> &'static Taxonomy {
    static CATALOG: OnceLock<Taxonomy> = OnceLock::new();
    // Static data, `builtin_is_valid` guards against this ever failing.
    CATALOG.get_or_init(|| builtin().expect("invalid built-in light catalog"))
}

/// Build a fresh copy of the catalog.
pub fn builtin() -> Result<Taxonomy> {
    let mut builder = TaxonomyBuilder::new(ROOT);

    agile_innovative::register(&mut builder, ROOT)?;
    compulab::register(&mut builder, ROOT)?;
    embrava::register(&mut builder, ROOT)?;
    epos::register(&mut builder, ROOT)?;
    kuando::register(&mut builder, ROOT)?;
    luxafor::register(&mut builder, ROOT)?;
    muteme::register(&mut builder, ROOT)?;
    plantronics::register(&mut builder, ROOT)?;
    thingm::register(&mut builder, ROOT)?;

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DeviceDescriptor, DeviceId, Field};
    use crate::light::Light;
    use crate::{Error, FamilyRef};

    const BOGUS_DEVICE_ID: DeviceId = DeviceId::new(0xffff, 0xffff);

    fn concrete() -> Vec<FamilyRef<'static>> {
        catalog().families().filter(|family| family.is_concrete()).collect()
    }

    fn known_good(id: DeviceId, model: &str) -> DeviceDescriptor {
        DeviceDescriptor::from_fields(vec![
            ("serial_number", Field::from("BS032974-3.0")),
            ("release_number", Field::Number(0x0200)),
            ("device_id", Field::DeviceId(id.vendor_id, id.product_id)),
            ("product_string", Field::from(model)),
        ])
    }

    fn known_bad() -> DeviceDescriptor {
        DeviceDescriptor::from_fields(vec![
            ("serial_number", Field::from("bogus serial number")),
            ("release_number", Field::Number(0)),
            ("device_id", Field::DeviceId(BOGUS_DEVICE_ID.vendor_id, BOGUS_DEVICE_ID.product_id)),
            ("product_string", Field::from("nonexistent light")),
        ])
    }

    #[test]
    fn builtin_is_valid() {
        let taxonomy = builtin().unwrap();
        assert_eq!(taxonomy.root().name(), ROOT);
        assert_eq!(taxonomy.families().count(), catalog().families().count());
    }

    #[test]
    fn abstract_and_concrete_families() {
        for family in catalog().families() {
            assert_ne!(family.is_abstract(), family.is_concrete(), "{}", family);
        }

        assert!(catalog().root().is_abstract());
        assert!(catalog().family("Kuando").unwrap().is_abstract());
        assert!(catalog().family("Busylight Omega").unwrap().is_concrete());
    }

    #[test]
    fn concrete_families_descend_from_root() {
        let root = catalog().root();
        for family in concrete() {
            assert!(family.descends_from(root));
            assert!(!family.vendor().unwrap().is_empty());
            assert!(!family.supported_device_ids().unwrap().is_empty());
        }
    }

    #[test]
    fn subclasses_belong_to_family() {
        for family in catalog().families() {
            let subclasses = family.subclasses();
            assert_eq!(subclasses, family.subclasses());
            for subclass in subclasses {
                assert!(subclass.descends_from(family));
                assert_ne!(subclass, family);
            }
        }
        assert_eq!(catalog().root().subclasses().len(), catalog().families().count() - 1);
    }

    #[test]
    fn claims_known_good_lights() {
        for family in concrete() {
            for (id, model) in family.supported_device_ids().unwrap() {
                assert!(family.claims(&known_good(*id, model)), "{} {}", family, model);
                assert!(catalog().root().claims(&known_good(*id, model)));
            }
        }
    }

    #[test]
    fn claims_known_bad_lights() {
        for family in catalog().families() {
            assert!(!family.claims(&known_bad()), "{}", family);
        }
    }

    #[test]
    fn init_known_good_lights() {
        for family in concrete() {
            for (id, model) in family.supported_device_ids().unwrap() {
                let light = Light::new(family, known_good(*id, model), false, false).unwrap();
                assert!(light.family().descends_from(family));
            }
        }
    }

    #[test]
    fn init_known_bad_lights() {
        for family in concrete() {
            let result = Light::new(family, known_bad(), false, false);
            assert!(matches!(result, Err(Error::LightUnsupported(_))), "{}", family);
        }
    }

    #[test]
    fn resolves_exact_family() {
        for family in concrete() {
            for (id, model) in family.supported_device_ids().unwrap() {
                let resolved = catalog().resolve(&known_good(*id, model)).unwrap();
                assert_eq!(resolved, family);
            }
        }
    }

    #[test]
    fn luxafor_product_strings() {
        let mute = DeviceDescriptor::new(0x04d8, 0xf372).with_product_string("LUXAFOR MUTE");
        assert_eq!(catalog().resolve(&mute).unwrap().name(), "Luxafor Mute");

        let unnamed = DeviceDescriptor::new(0x04d8, 0xf372);
        assert_eq!(catalog().resolve(&unnamed).unwrap().name(), "Luxafor Flag");
    }

    #[test]
    fn supported_lights() {
        let lights = catalog().root().supported_lights();

        assert_eq!(lights["Luxafor"], ["Flag", "Mute", "Orb", "Bluetooth"]);
        assert_eq!(lights["Kuando"], ["Busylight Alpha", "Busylight Omega"]);
        assert!(lights.contains_key("ThingM"));

        for family in catalog().families() {
            for (vendor, models) in family.supported_lights() {
                assert!(!vendor.is_empty());
                assert!(models.iter().all(|model| !model.is_empty()));
            }
        }
    }

    #[test]
    fn udev_rules_mode() {
        let mode = 0o754;
        for family in catalog().families() {
            for rule in family.udev_rules(mode) {
                if rule.contains("MODE=") {
                    assert!(rule.contains("0754"), "{}", rule);
                }
            }
        }
    }

    #[test]
    fn udev_rules_cover_shared_ids() {
        let rules = catalog().root().udev_rules(0o666);

        for family in concrete() {
            let vendor = family.vendor().unwrap();
            let header = format!("# {} {} udev rules", vendor, family.name());
            let start = rules.iter().position(|rule| *rule == header).unwrap();
            let lines = rules[start + 1..].iter().take_while(|rule| !rule.is_empty());

            let expected = 2 * family.supported_device_ids().unwrap().len();
            assert_eq!(lines.filter(|rule| rule.contains("MODE=")).count(), expected, "{}", header);
        }

        let luxafor = rules.iter().filter(|rule| rule.contains("ATTRS{idProduct}==\"f372\""));
        assert_eq!(luxafor.count(), 8);
    }

    #[test]
    fn first_light_without_devices() {
        let empty: Vec<DeviceDescriptor> = Vec::new();
        for family in catalog().families() {
            assert!(family.available_lights(&empty).is_empty());
            assert!(family.all_lights(&empty, false, false).is_empty());
            assert!(matches!(family.first_light(&empty, false, false), Err(Error::NoLightsFound)));
        }
    }

    #[test]
    fn end_to_end() {
        let mut builder = TaxonomyBuilder::new("Root");
        builder.add_concrete("Root", "Acme", "Acme", &[(DeviceId::new(0x1, 0x2), "Blinker")]).unwrap();
        let taxonomy = builder.build();
        let root = taxonomy.root();

        let descriptor = DeviceDescriptor::from_fields(vec![
            ("device_id", Field::DeviceId(0x1, 0x2)),
            ("product_string", Field::from("Blinker")),
        ]);
        assert!(root.claims(&descriptor));

        let lights = root.supported_lights();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights["Acme"], ["Blinker"]);

        let bus = vec![descriptor];
        let light = root.first_light(&bus, true, true).unwrap();
        assert_eq!(light.family().name(), "Acme");
        assert!(light.reset() && light.exclusive());
    }
}
