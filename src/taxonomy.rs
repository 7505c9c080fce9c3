//! Device family taxonomy.
//!
//! Families form a tree. Abstract families only group their children, concrete families own the
//! table of USB identifiers they recognize. The tree is built once and never mutated afterwards,
//! so it can be shared between threads without synchronization.

use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};

use tracing::debug;

use crate::descriptor::DeviceId;
use crate::{Error, Result};

/// Index of a family inside its [`Taxonomy`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone)]
pub struct FamilyId(usize);

/// Family variant, fixed at registration.
#[derive(Debug)]
enum FamilyKind {
    Abstract,
    Concrete { vendor: String, devices: BTreeMap<DeviceId, String> },
}

#[derive(Debug)]
struct Family {
    name: String,
    parent: Option<FamilyId>,
    children: Vec<FamilyId>,
    kind: FamilyKind,
}

/// Immutable tree of device families.
#[derive(Debug)]
pub struct Taxonomy {
    families: Vec<Family>,
}

impl Taxonomy {
    /// Root family of the tree.
    pub fn root(&self) -> FamilyRef<'_> {
        FamilyRef { taxonomy: self, id: FamilyId(0) }
    }

    /// Look up a family by its unique name.
    pub fn family(&self, name: &str) -> Option<FamilyRef<'_>> {
        self.families
            .iter()
            .position(|family| family.name == name)
            .map(|index| FamilyRef { taxonomy: self, id: FamilyId(index) })
    }

    /// Get a family by ID.
    pub fn get(&self, id: FamilyId) -> Option<FamilyRef<'_>> {
        self.families.get(id.0).map(|_| FamilyRef { taxonomy: self, id })
    }

    /// All families in registration order, starting with the root.
    pub fn families(&self) -> impl Iterator<Item = FamilyRef<'_>> {
        let taxonomy = self;
        (0..self.families.len()).map(move |index| FamilyRef { taxonomy, id: FamilyId(index) })
    }

    fn node(&self, id: FamilyId) -> &Family {
        &self.families[id.0]
    }
}

/// Incremental construction of a [`Taxonomy`].
pub struct TaxonomyBuilder {
    families: Vec<Family>,
}

impl TaxonomyBuilder {
    /// Start a new tree with an abstract root family.
    pub fn new(root: &str) -> Self {
        let root = Family {
            name: root.into(),
            parent: None,
            children: Vec::new(),
            kind: FamilyKind::Abstract,
        };
        Self { families: vec![root] }
    }

    /// Register an abstract family below `parent`.
    pub fn add_abstract(&mut self, parent: &str, name: &str) -> Result<FamilyId> {
        self.insert(parent, name, FamilyKind::Abstract)
    }

    /// Register a concrete family below `parent`.
    ///
    /// Concrete families must recognize at least one device, otherwise they would be
    /// indistinguishable from abstract ones.
    pub fn add_concrete(
        &mut self,
        parent: &str,
        name: &str,
        vendor: &str,
        devices: &[(DeviceId, &str)],
    ) -> Result<FamilyId> {
        if devices.is_empty() {
            return Err(Error::EmptyFamily(name.into()));
        }

        let devices = devices.iter().map(|(id, model)| (*id, model.to_string())).collect();
        self.insert(parent, name, FamilyKind::Concrete { vendor: vendor.into(), devices })
    }

    /// Finish construction.
    pub fn build(self) -> Taxonomy {
        debug!("Built taxonomy with {} families", self.families.len());
        Taxonomy { families: self.families }
    }

    fn insert(&mut self, parent: &str, name: &str, kind: FamilyKind) -> Result<FamilyId> {
        if self.families.iter().any(|family| family.name == name) {
            return Err(Error::DuplicateFamily(name.into()));
        }

        let parent_id = match self.families.iter().position(|family| family.name == parent) {
            Some(index) => FamilyId(index),
            None => return Err(Error::UnknownFamily(parent.into())),
        };

        if let FamilyKind::Concrete { .. } = self.families[parent_id.0].kind {
            return Err(Error::ConcreteParent(parent.into()));
        }

        let id = FamilyId(self.families.len());
        self.families.push(Family {
            name: name.into(),
            parent: Some(parent_id),
            children: Vec::new(),
            kind,
        });
        self.families[parent_id.0].children.push(id);

        Ok(id)
    }
}

/// Borrowed handle to one family of a [`Taxonomy`].
#[derive(Copy, Clone)]
pub struct FamilyRef<'a> {
    pub(crate) taxonomy: &'a Taxonomy,
    pub(crate) id: FamilyId,
}

impl<'a> FamilyRef<'a> {
    pub fn id(&self) -> FamilyId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    /// Parent family, `None` for the root.
    pub fn parent(&self) -> Option<FamilyRef<'a>> {
        self.node().parent.map(|id| self.with_id(id))
    }

    /// Direct children in registration order.
    pub fn children(&self) -> impl Iterator<Item = FamilyRef<'a>> + 'a {
        let family = *self;
        self.node().children.iter().map(move |id| family.with_id(*id))
    }

    pub fn is_abstract(&self) -> bool {
        match self.node().kind {
            FamilyKind::Abstract => true,
            FamilyKind::Concrete { .. } => false,
        }
    }

    pub fn is_concrete(&self) -> bool {
        !self.is_abstract()
    }

    /// Vendor name of a concrete family.
    pub fn vendor(&self) -> Option<&'a str> {
        match &self.node().kind {
            FamilyKind::Concrete { vendor, .. } => Some(vendor.as_str()),
            FamilyKind::Abstract => None,
        }
    }

    /// Identifiers recognized by this family itself.
    ///
    /// Abstract families do not own any identifiers, and tables are never inherited.
    pub fn supported_device_ids(&self) -> Option<&'a BTreeMap<DeviceId, String>> {
        match &self.node().kind {
            FamilyKind::Concrete { devices, .. } => Some(devices),
            FamilyKind::Abstract => None,
        }
    }

    /// Check if this family is `ancestor` or one of its descendants.
    pub fn descends_from(&self, ancestor: FamilyRef<'_>) -> bool {
        let mut current = Some(*self);
        while let Some(family) = current {
            if family.id == ancestor.id {
                return true;
            }
            current = family.parent();
        }
        false
    }

    /// All descendants at any depth, in depth-first registration order.
    ///
    /// The family itself is not included.
    pub fn subclasses(&self) -> Vec<FamilyRef<'a>> {
        let mut subclasses = Vec::new();
        let mut stack: Vec<FamilyId> = self.node().children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let family = self.with_id(id);
            stack.extend(family.node().children.iter().rev());
            subclasses.push(family);
        }

        subclasses
    }

    /// Concrete families of this subtree, including the family itself.
    pub fn concrete_families(&self) -> Vec<FamilyRef<'a>> {
        let mut families = vec![*self];
        families.extend(self.subclasses());
        families.retain(|family| family.is_concrete());
        families
    }

    /// Model names recognized by the subtree, grouped by vendor.
    pub fn supported_lights(&self) -> BTreeMap<String, Vec<String>> {
        let mut lights: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for family in self.concrete_families() {
            let (vendor, devices) = match &family.node().kind {
                FamilyKind::Concrete { vendor, devices } => (vendor, devices),
                FamilyKind::Abstract => continue,
            };

            let models = lights.entry(vendor.clone()).or_default();
            for model in devices.values() {
                if !models.contains(model) {
                    models.push(model.clone());
                }
            }
        }

        lights
    }

    /// Linux udev rules granting `mode` access to every light of the subtree.
    ///
    /// Every concrete family lists all of its identifiers, even those shared with another family.
    pub fn udev_rules(&self, mode: u32) -> Vec<String> {
        let mut rules = Vec::new();

        for family in self.concrete_families() {
            let (vendor, devices) = match &family.node().kind {
                FamilyKind::Concrete { vendor, devices } => (vendor, devices),
                FamilyKind::Abstract => continue,
            };

            rules.push(format!("# {} {} udev rules", vendor, family.name()));

            for id in devices.keys() {
                for matcher in &["SUBSYSTEMS==\"usb\"", "KERNEL==\"hidraw*\""] {
                    rules.push(format!(
                        "{}, ATTRS{{idVendor}}==\"{:04x}\", ATTRS{{idProduct}}==\"{:04x}\", \
                         MODE=\"{:04o}\"",
                        matcher, id.vendor_id, id.product_id, mode
                    ));
                }
            }

            rules.push(String::new());
        }

        rules
    }

    fn node(&self) -> &'a Family {
        self.taxonomy.node(self.id)
    }

    fn with_id(&self, id: FamilyId) -> FamilyRef<'a> {
        FamilyRef { taxonomy: self.taxonomy, id }
    }
}

impl PartialEq for FamilyRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.taxonomy, other.taxonomy) && self.id == other.id
    }
}

impl Eq for FamilyRef<'_> {}

impl Debug for FamilyRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = if self.is_abstract() { "abstract" } else { "concrete" };
        f.debug_struct("FamilyRef").field("name", &self.name()).field("kind", &kind).finish()
    }
}

impl Display for FamilyRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
