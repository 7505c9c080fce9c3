//! Claim resolution.
//!
//! The USB identifier pair decides whether a family claims a device. The product string is only
//! used to tell apart families which share an identifier pair.

use tracing::trace;

use crate::descriptor::DeviceDescriptor;
use crate::taxonomy::{FamilyRef, Taxonomy};

/// How well a descriptor matches a family.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum ClaimStrength {
    /// Identifier pair matches, product string is absent or unrelated.
    Identifier,
    /// Identifier pair and product string both match.
    Exact,
}

impl<'a> FamilyRef<'a> {
    /// Check if this family, or any of its concrete descendants, claims the device.
    pub fn claims(&self, descriptor: &DeviceDescriptor) -> bool {
        self.claim_strength(descriptor).is_some()
    }

    /// Strongest claim of the subtree on the device.
    pub fn claim_strength(&self, descriptor: &DeviceDescriptor) -> Option<ClaimStrength> {
        self.resolve_with_strength(descriptor).map(|(_, strength)| strength)
    }

    /// Most specific concrete family of the subtree claiming the device.
    ///
    /// Stronger claims win, ties go to the family registered first.
    pub fn resolve(&self, descriptor: &DeviceDescriptor) -> Option<FamilyRef<'a>> {
        self.resolve_with_strength(descriptor).map(|(family, _)| family)
    }

    fn resolve_with_strength(
        &self,
        descriptor: &DeviceDescriptor,
    ) -> Option<(FamilyRef<'a>, ClaimStrength)> {
        let mut best: Option<(FamilyRef<'a>, ClaimStrength)> = None;

        for family in self.concrete_families() {
            let strength = match concrete_claim(family, descriptor) {
                Some(strength) => strength,
                None => continue,
            };

            if best.map_or(true, |(_, best_strength)| strength > best_strength) {
                best = Some((family, strength));
            }

            if strength == ClaimStrength::Exact {
                break;
            }
        }

        if let Some((family, strength)) = best {
            trace!("{} claims {} ({:?})", family, descriptor, strength);
        }

        best
    }
}

impl Taxonomy {
    /// Most specific family of the whole tree claiming the device.
    pub fn resolve(&self, descriptor: &DeviceDescriptor) -> Option<FamilyRef<'_>> {
        self.root().resolve(descriptor)
    }
}

/// Claim of a single concrete family, ignoring its descendants.
fn concrete_claim(family: FamilyRef<'_>, descriptor: &DeviceDescriptor) -> Option<ClaimStrength> {
    let device_id = descriptor.device_id()?;
    let model = family.supported_device_ids()?.get(&device_id)?;

    match descriptor.product_string() {
        Some(product) if product_matches(product, model) => Some(ClaimStrength::Exact),
        _ => Some(ClaimStrength::Identifier),
    }
}

/// Case-insensitive equality or containment in either direction.
fn product_matches(product: &str, model: &str) -> bool {
    let product = product.trim().to_lowercase();
    let model = model.trim().to_lowercase();

    if product.is_empty() || model.is_empty() {
        return false;
    }

    product.contains(&model) || model.contains(&product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DeviceId;
    use crate::taxonomy::TaxonomyBuilder;

    const BOGUS: DeviceId = DeviceId::new(0xffff, 0xffff);

    fn sample() -> Taxonomy {
        let mut builder = TaxonomyBuilder::new("Root");
        builder.add_concrete("Root", "Acme", "Acme", &[(DeviceId::new(0x1, 0x2), "Blinker")]).unwrap();
        builder.add_abstract("Root", "Luxo").unwrap();
        builder.add_concrete("Luxo", "Luxo Flag", "Luxo", &[(DeviceId::new(0x4, 0x5), "Flag")]).unwrap();
        builder.add_concrete("Luxo", "Luxo Mute", "Luxo", &[(DeviceId::new(0x4, 0x5), "Mute")]).unwrap();
        builder.build()
    }

    #[test]
    fn abstract_root_claims_by_union() {
        let taxonomy = sample();
        let descriptor = DeviceDescriptor::new(0x1, 0x2).with_product_string("Blinker");

        assert!(taxonomy.root().claims(&descriptor));
        assert_eq!(taxonomy.root().claim_strength(&descriptor), Some(ClaimStrength::Exact));
        assert_eq!(taxonomy.resolve(&descriptor).map(|family| family.name()), Some("Acme"));
        assert!(!taxonomy.family("Luxo").unwrap().claims(&descriptor));
    }

    #[test]
    fn identifier_pair_is_authoritative() {
        let taxonomy = sample();
        let acme = taxonomy.family("Acme").unwrap();

        let blank = DeviceDescriptor::new(0x1, 0x2);
        assert_eq!(acme.claim_strength(&blank), Some(ClaimStrength::Identifier));

        let renamed = DeviceDescriptor::new(0x1, 0x2).with_product_string("Something else");
        assert!(acme.claims(&renamed));

        let wrong_id = DeviceDescriptor::new(0x1, 0x3).with_product_string("Blinker");
        assert!(!acme.claims(&wrong_id));
    }

    #[test]
    fn bogus_device_unclaimed() {
        let taxonomy = sample();
        let descriptor = DeviceDescriptor::from_fields(vec![
            ("device_id", crate::Field::DeviceId(BOGUS.vendor_id, BOGUS.product_id)),
            ("product_id", crate::Field::from("nonexistent light")),
        ]);

        for family in taxonomy.families() {
            assert!(!family.claims(&descriptor));
        }
        assert!(taxonomy.resolve(&descriptor).is_none());
        assert!(!taxonomy.root().claims(&DeviceDescriptor::default()));
    }

    #[test]
    fn product_string_disambiguates_shared_ids() {
        let taxonomy = sample();

        let mute = DeviceDescriptor::new(0x4, 0x5).with_product_string("LUXO MUTE");
        assert_eq!(taxonomy.resolve(&mute).map(|family| family.name()), Some("Luxo Mute"));

        let flag = DeviceDescriptor::new(0x4, 0x5).with_product_string("LUXO FLAG");
        assert_eq!(taxonomy.resolve(&flag).map(|family| family.name()), Some("Luxo Flag"));

        // Without a product string the first registered family wins.
        let unknown = DeviceDescriptor::new(0x4, 0x5);
        assert_eq!(taxonomy.resolve(&unknown).map(|family| family.name()), Some("Luxo Flag"));
        assert!(taxonomy.family("Luxo Mute").unwrap().claims(&unknown));
    }

    #[test]
    fn product_matching() {
        assert!(product_matches("Blinker", "Blinker"));
        assert!(product_matches("LUXAFOR FLAG", "Flag"));
        assert!(product_matches("blink", "Blink(1)"));
        assert!(!product_matches("", "Flag"));
        assert!(!product_matches("Orb", "Flag"));
    }
}
