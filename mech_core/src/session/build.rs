//! MechBuild - Sections plus everything equipped on them

use crate::armor::{AllocationSummary, ArmorAllocationPolicy};
use crate::catalog::{ArmorType, CatalogProvider, MechChassis, Shield, Weapon};
use crate::error::MechError;
use crate::factory::{SectionFactory, SectionMap};
use crate::loadout::{LimitWarning, LoadoutAccountant, TonnageTotals};
use crate::section::{MechSection, SectionSnapshot};
use crate::types::SectionId;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A mech under construction
#[derive(Debug, Clone)]
pub struct MechBuild {
    chassis: Option<MechChassis>,
    sections: SectionMap,
    weapons: BTreeMap<SectionId, Vec<Weapon>>,
    shield: Option<Shield>,
    armor_type: Option<ArmorType>,
    /// HP per ton used when no armor type is selected
    base_hp_per_ton: i32,
}

impl MechBuild {
    /// Build a fresh mech for a catalog chassis
    pub fn from_catalog<C: CatalogProvider + ?Sized>(
        catalog: &C,
        factory: &SectionFactory,
        chassis_name: &str,
    ) -> Result<Self, MechError> {
        let sections = factory.build_from_catalog(catalog, chassis_name)?;
        let chassis = catalog.chassis(chassis_name)?.clone();
        info!(chassis = %chassis.name, tonnage = chassis.tonnage, "build created");
        Ok(Self::with_sections(Some(chassis), sections, factory))
    }

    /// Build the chassis-less default layout
    pub fn legacy(factory: &SectionFactory) -> Result<Self, MechError> {
        let sections = factory.legacy_default()?;
        info!("legacy build created");
        Ok(Self::with_sections(None, sections, factory))
    }

    fn with_sections(
        chassis: Option<MechChassis>,
        sections: SectionMap,
        factory: &SectionFactory,
    ) -> Self {
        MechBuild {
            chassis,
            sections,
            weapons: BTreeMap::new(),
            shield: None,
            armor_type: None,
            base_hp_per_ton: factory.constants().armor.hp_per_ton,
        }
    }

    // === Accessors ===

    pub fn chassis(&self) -> Option<&MechChassis> {
        self.chassis.as_ref()
    }

    pub fn name(&self) -> &str {
        self.chassis.as_ref().map_or("Default", |c| c.name.as_str())
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Result<&MechSection, MechError> {
        self.sections
            .get(&id)
            .ok_or_else(|| MechError::not_found("Section", id.name()))
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> Result<&mut MechSection, MechError> {
        self.sections
            .get_mut(&id)
            .ok_or_else(|| MechError::not_found("Section", id.name()))
    }

    /// Weapons mounted in a section, in placement order
    pub fn weapons_in(&self, id: SectionId) -> &[Weapon] {
        self.weapons.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn shield(&self) -> Option<&Shield> {
        self.shield.as_ref()
    }

    pub fn armor_type(&self) -> Option<&ArmorType> {
        self.armor_type.as_ref()
    }

    /// Chassis armor budget, if the build has a chassis
    pub fn armor_budget(&self) -> Option<f64> {
        self.chassis.as_ref().map(|c| c.max_armor_tonnage as f64)
    }

    // === Equipment ===

    /// Mount a weapon. Fails once the section holds as many weapons as it has
    /// hardpoints, or when every slot is already in use.
    pub fn place_weapon(&mut self, id: SectionId, weapon: Weapon) -> Result<(), MechError> {
        let mounted = self.weapons_in(id).len();
        let section = self.section_mut(id)?;
        if mounted >= section.total_hardpoints() as usize {
            return Err(MechError::NoFreeHardpoint { section: id });
        }
        if section.available_slots() == 0 {
            return Err(MechError::NoFreeSlot { section: id });
        }
        section.set_used_slots(section.used_slots() as i64 + 1);
        debug!(section = %id, weapon = %weapon.name, "weapon placed");
        self.weapons.entry(id).or_default().push(weapon);
        Ok(())
    }

    /// Unmount the weapon at `index` and return it
    pub fn remove_weapon(&mut self, id: SectionId, index: usize) -> Result<Weapon, MechError> {
        let len = self.weapons_in(id).len();
        if index >= len {
            return Err(MechError::IndexOutOfRange { index, len });
        }
        let section = self.section_mut(id)?;
        section.set_used_slots(section.used_slots() as i64 - 1);

        let mounted = self.weapons.entry(id).or_default();
        let weapon = mounted.remove(index);
        if mounted.is_empty() {
            self.weapons.remove(&id);
        }
        debug!(section = %id, weapon = %weapon.name, "weapon removed");
        Ok(weapon)
    }

    /// Select a shield generator. The catalog's "None" entry clears the selection.
    pub fn set_shield(&mut self, shield: Option<Shield>) {
        self.shield = shield.filter(|s| !s.is_none());
    }

    /// Select an armor material for every section, or go back to the base rating
    pub fn set_armor_type(&mut self, armor_type: Option<ArmorType>) -> Result<(), MechError> {
        let hp_per_ton = armor_type
            .as_ref()
            .map_or(self.base_hp_per_ton, |a| a.hp_per_ton);
        if hp_per_ton <= 0 {
            return Err(MechError::InvalidArgument(format!(
                "Armor HP per ton must be positive (got {})",
                hp_per_ton
            )));
        }
        for section in self.sections.values_mut() {
            section.set_armor_hp_per_ton(hp_per_ton)?;
        }
        self.armor_type = armor_type;
        Ok(())
    }

    // === Armor ===

    /// Armor tons per section
    pub fn armor_allocations(&self) -> BTreeMap<SectionId, f64> {
        self.sections
            .iter()
            .map(|(id, section)| (*id, section.armor_tons()))
            .collect()
    }

    /// Allocation against the chassis budget; `None` without a chassis
    pub fn armor_summary(&self) -> Option<AllocationSummary> {
        self.armor_budget()
            .map(|budget| ArmorAllocationPolicy::validate_total(&self.armor_allocations(), budget))
    }

    /// Largest armor tonnage the section may hold; unbounded without a chassis
    pub fn max_armor_for(&self, id: SectionId) -> f64 {
        self.armor_budget()
            .map_or(f64::INFINITY, |budget| ArmorAllocationPolicy::max_allowed_tons(id, budget))
    }

    // === Accounting ===

    /// Weapon tonnage mounted in each section
    pub fn equipped_weapon_tonnage(&self) -> BTreeMap<SectionId, f64> {
        self.weapons
            .iter()
            .map(|(id, weapons)| (*id, weapons.iter().map(|w| w.tonnage).sum()))
            .collect()
    }

    /// Totals with the shield counted as equipment
    pub fn totals(&self, accountant: &LoadoutAccountant) -> TonnageTotals {
        let totals = accountant.total_tonnage(&self.sections, &self.equipped_weapon_tonnage());
        match &self.shield {
            Some(shield) => totals.with_equipment(shield.tonnage),
            None => totals,
        }
    }

    /// Limit warnings; a build without a chassis has no limits
    pub fn warnings(&self, accountant: &LoadoutAccountant) -> Vec<LimitWarning> {
        match &self.chassis {
            Some(chassis) => accountant.check_limits(&self.totals(accountant), chassis),
            None => Vec::new(),
        }
    }

    pub fn is_destroyed(&self, id: SectionId) -> bool {
        self.sections.get(&id).is_some_and(|s| s.is_destroyed())
    }

    /// Serializable view of the whole build
    pub fn summary(&self, accountant: &LoadoutAccountant) -> BuildSummary {
        BuildSummary {
            name: self.name().to_string(),
            chassis: self.chassis.clone(),
            totals: self.totals(accountant),
            warnings: self.warnings(accountant),
            armor: self.armor_summary(),
            shield: self.shield.as_ref().map(|s| s.name.clone()),
            armor_type: self.armor_type.as_ref().map(|a| a.name.clone()),
            sections: self
                .sections
                .iter()
                .map(|(id, section)| SectionSummary {
                    snapshot: section.debug_snapshot(),
                    weapons: self.weapons_in(*id).iter().map(|w| w.name.clone()).collect(),
                })
                .collect(),
        }
    }
}

/// JSON-friendly dump of a build
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub name: String,
    pub chassis: Option<MechChassis>,
    pub totals: TonnageTotals,
    pub warnings: Vec<LimitWarning>,
    pub armor: Option<AllocationSummary>,
    pub shield: Option<String>,
    pub armor_type: Option<String>,
    pub sections: Vec<SectionSummary>,
}

impl BuildSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    #[serde(flatten)]
    pub snapshot: SectionSnapshot,
    pub weapons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_catalog, Catalog};

    fn catalog() -> Catalog {
        default_catalog().unwrap()
    }

    fn build(name: &str) -> (Catalog, MechBuild) {
        let catalog = catalog();
        let build = MechBuild::from_catalog(&catalog, &SectionFactory::default(), name).unwrap();
        (catalog, build)
    }

    #[test]
    fn test_place_and_remove_weapon() {
        let (catalog, mut build) = build("Hunchback");
        let laser = catalog.weapon("Medium Laser").unwrap().clone();

        build.place_weapon(SectionId::RightTorso, laser.clone()).unwrap();
        build.place_weapon(SectionId::RightTorso, laser).unwrap();
        assert_eq!(build.weapons_in(SectionId::RightTorso).len(), 2);
        assert_eq!(build.section(SectionId::RightTorso).unwrap().used_slots(), 2);

        let removed = build.remove_weapon(SectionId::RightTorso, 0).unwrap();
        assert_eq!(removed.name, "Medium Laser");
        assert_eq!(build.section(SectionId::RightTorso).unwrap().used_slots(), 1);
    }

    #[test]
    fn test_hardpoint_limit() {
        let (catalog, mut build) = build("Locust");
        let laser = catalog.weapon("Small Laser").unwrap().clone();

        build.place_weapon(SectionId::LeftArm, laser.clone()).unwrap();
        assert_eq!(
            build.place_weapon(SectionId::LeftArm, laser.clone()),
            Err(MechError::NoFreeHardpoint {
                section: SectionId::LeftArm
            })
        );
        // Legs never carry weapons
        assert!(build.place_weapon(SectionId::LeftLeg, laser).is_err());
        assert_eq!(build.section(SectionId::LeftLeg).unwrap().used_slots(), 0);
    }

    #[test]
    fn test_full_section_refuses_weapon() {
        let (catalog, mut build) = build("Hunchback");
        let laser = catalog.weapon("Medium Laser").unwrap().clone();
        build
            .section_mut(SectionId::RightTorso)
            .unwrap()
            .set_used_slots(8);

        assert_eq!(
            build.place_weapon(SectionId::RightTorso, laser),
            Err(MechError::NoFreeSlot {
                section: SectionId::RightTorso
            })
        );
        assert!(build.weapons_in(SectionId::RightTorso).is_empty());
        assert_eq!(build.section(SectionId::RightTorso).unwrap().used_slots(), 8);
    }

    #[test]
    fn test_remove_out_of_range() {
        let (_, mut build) = build("Locust");
        assert_eq!(
            build.remove_weapon(SectionId::CenterTorso, 0),
            Err(MechError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_totals_include_weapons_and_shield() {
        let (catalog, mut build) = build("Hunchback");
        let ac = catalog.weapon("AC/5").unwrap().clone();
        build.place_weapon(SectionId::RightTorso, ac).unwrap();
        build.set_shield(Some(catalog.shield("Light Deflector").unwrap().clone()));

        let totals = build.totals(&LoadoutAccountant::default());
        assert!((totals.armor_tons - 16.0).abs() < f64::EPSILON);
        assert!((totals.weapon_tons - 10.0).abs() < f64::EPSILON);
        assert!((totals.total - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_none_shield_clears_selection() {
        let (catalog, mut build) = build("Locust");
        build.set_shield(Some(catalog.shield("None").unwrap().clone()));
        assert!(build.shield().is_none());
    }

    #[test]
    fn test_armor_type_sets_hp_per_ton() {
        let (catalog, mut build) = build("Locust");
        let ferro = catalog.armor_type("Ferro-Fibrous").unwrap().clone();
        build.set_armor_type(Some(ferro)).unwrap();
        for section in build.sections().values() {
            assert_eq!(section.armor_hp(), 20);
        }

        build.set_armor_type(None).unwrap();
        assert_eq!(build.section(SectionId::Head).unwrap().armor_hp(), 16);
        assert!(build.armor_type().is_none());
    }

    #[test]
    fn test_armor_summary() {
        let (_, build) = build("Hunchback");
        let summary = build.armor_summary().unwrap();
        assert!(summary.valid);
        assert!((summary.remaining - 9.0).abs() < f64::EPSILON);
        assert!((build.max_armor_for(SectionId::CenterTorso) - 6.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_legacy_build_has_no_limits() {
        let build = MechBuild::legacy(&SectionFactory::default()).unwrap();
        assert!(build.chassis().is_none());
        assert!(build.armor_summary().is_none());
        assert!(build.max_armor_for(SectionId::Head).is_infinite());
        assert!(build.warnings(&LoadoutAccountant::default()).is_empty());
    }

    #[test]
    fn test_summary_json() {
        let (catalog, mut build) = build("Locust");
        let laser = catalog.weapon("Medium Laser").unwrap().clone();
        build.place_weapon(SectionId::CenterTorso, laser).unwrap();

        let json = build.summary(&LoadoutAccountant::default()).to_json().unwrap();
        assert!(json.contains("\"name\": \"Locust\""));
        assert!(json.contains("Medium Laser"));
        assert!(json.contains("\"center_torso\""));
    }
}
