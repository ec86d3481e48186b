//! Section factory - Builds the eight sections of a mech

use crate::catalog::{CatalogProvider, MechChassis, SlotConfiguration};
use crate::config::BuilderConstants;
use crate::error::MechError;
use crate::section::MechSection;
use crate::types::SectionId;
use std::collections::BTreeMap;
use tracing::info;

/// Full set of sections of one mech
pub type SectionMap = BTreeMap<SectionId, MechSection>;

/// Builds section sets from chassis data
#[derive(Debug, Clone, Default)]
pub struct SectionFactory {
    constants: BuilderConstants,
}

impl SectionFactory {
    pub fn new(constants: BuilderConstants) -> Self {
        SectionFactory { constants }
    }

    pub fn constants(&self) -> &BuilderConstants {
        &self.constants
    }

    /// Build all eight sections for a chassis.
    ///
    /// Chassis hardpoints are all counted as energy hardpoints. Slot counts come
    /// from the size-class table, which must match the chassis size class.
    pub fn build(
        &self,
        chassis: &MechChassis,
        slot_config: &SlotConfiguration,
    ) -> Result<SectionMap, MechError> {
        if chassis.size_class != slot_config.size_class {
            return Err(MechError::not_found("Slot configuration", &chassis.size_class));
        }

        let mut sections = SectionMap::new();
        for &id in SectionId::all() {
            let hardpoints = count(chassis.hardpoint_count(id), "Hardpoints")?;
            let slots = count(slot_config.slots_for(id), "Slots")?;
            let armor_tons = self.constants.factory.default_armor_tons;
            sections.insert(id, self.section(id, armor_tons, hardpoints, 0, 0, slots)?);
        }

        info!(
            chassis = %chassis.name,
            size_class = %chassis.size_class,
            total_slots = slot_config.total_slots(),
            "built sections for chassis"
        );
        Ok(sections)
    }

    /// Look up a chassis and its slot table, then build its sections
    pub fn build_from_catalog<C: CatalogProvider + ?Sized>(
        &self,
        catalog: &C,
        chassis_name: &str,
    ) -> Result<SectionMap, MechError> {
        let chassis = catalog.chassis(chassis_name)?;
        let slot_config = catalog.slot_configuration(&chassis.size_class)?;
        self.build(chassis, slot_config)
    }

    /// The fixed layout used when no chassis is selected
    pub fn legacy_default(&self) -> Result<SectionMap, MechError> {
        // (section, armor tons, internal structure, energy, ballistic, missile, slots)
        const LAYOUT: [(SectionId, f64, i32, i32, i32, i32, i32); 8] = [
            (SectionId::Head, 1.0, 5, 0, 0, 0, 2),
            (SectionId::CenterTorso, 6.0, 15, 1, 1, 1, 3),
            (SectionId::LeftTorso, 4.0, 10, 2, 0, 2, 9),
            (SectionId::RightTorso, 4.0, 10, 1, 2, 1, 9),
            (SectionId::LeftArm, 3.0, 8, 2, 0, 1, 6),
            (SectionId::RightArm, 3.0, 8, 0, 3, 0, 6),
            (SectionId::LeftLeg, 5.0, 12, 0, 0, 0, 3),
            (SectionId::RightLeg, 5.0, 12, 0, 0, 0, 3),
        ];

        let mut sections = SectionMap::new();
        for (id, tons, structure, energy, ballistic, missile, slots) in LAYOUT {
            let section = MechSection::new(id, tons, structure, energy, ballistic, missile, slots)?
                .with_overflow_rule(self.constants.damage.armor_overflow);
            sections.insert(id, self.with_hp_per_ton(section)?);
        }
        Ok(sections)
    }

    fn section(
        &self,
        id: SectionId,
        armor_tons: f64,
        energy: i32,
        ballistic: i32,
        missile: i32,
        slots: i32,
    ) -> Result<MechSection, MechError> {
        let section = MechSection::new(
            id,
            armor_tons,
            self.constants.factory.default_internal_structure,
            energy,
            ballistic,
            missile,
            slots,
        )?
        .with_overflow_rule(self.constants.damage.armor_overflow);
        self.with_hp_per_ton(section)
    }

    fn with_hp_per_ton(&self, mut section: MechSection) -> Result<MechSection, MechError> {
        section.set_armor_hp_per_ton(self.constants.armor.hp_per_ton)?;
        Ok(section)
    }
}

fn count(value: u32, what: &str) -> Result<i32, MechError> {
    i32::try_from(value)
        .map_err(|_| MechError::InvalidArgument(format!("{} out of range: {}", what, value)))
}
