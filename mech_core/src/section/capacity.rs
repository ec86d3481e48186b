//! Slot capacity table - base hit points of one equipment slot per section class

use crate::types::{SectionClass, SectionId};

/// Slot HP used when a section name cannot be resolved
pub const FALLBACK_SLOT_HP: i32 = 24;

/// Static lookup of base slot hit points
pub struct SlotCapacityTable;

impl SlotCapacityTable {
    /// Base HP of a single slot for a section class
    pub const fn base_slot_hp(class: SectionClass) -> i32 {
        match class {
            SectionClass::Arm => 24,
            SectionClass::SideTorso => 32,
            SectionClass::Leg => 36,
            SectionClass::CenterTorso => 60,
            SectionClass::Head => 30,
        }
    }

    /// Base HP of a single slot for a section
    pub fn for_section(section: SectionId) -> i32 {
        Self::base_slot_hp(section.class())
    }

    /// Base HP for a section given by display name; unknown names get the fallback
    pub fn base_slot_hp_for_name(name: &str) -> i32 {
        SectionId::from_name(name)
            .map(Self::for_section)
            .unwrap_or(FALLBACK_SLOT_HP)
    }
}
