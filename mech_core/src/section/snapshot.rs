//! Read-only view of a section for tests, logs and debug dumps

use super::{ArmorOverflowRule, MechSection};
use crate::types::SectionId;
use serde::{Deserialize, Serialize};

/// Snapshot of every stored and derived value of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    pub id: SectionId,
    pub armor_tons: f64,
    pub armor_hp_per_ton: i32,
    pub internal_structure: i32,
    pub energy_hardpoints: u32,
    pub ballistic_hardpoints: u32,
    pub missile_hardpoints: u32,
    pub total_slots: usize,
    pub used_slots: usize,
    pub armor_damage: i32,
    pub field_repair_armor: i32,
    pub slot_damage: Vec<i32>,
    pub overflow_rule: ArmorOverflowRule,

    // Derived
    pub effective_armor_hp: i32,
    pub total_slot_hp: i32,
    pub current_total_hp: i32,
    pub max_total_hp: i32,
}

impl SectionSnapshot {
    pub(super) fn capture(section: &MechSection) -> Self {
        SectionSnapshot {
            id: section.id,
            armor_tons: section.armor_tons,
            armor_hp_per_ton: section.armor_hp_per_ton,
            internal_structure: section.internal_structure,
            energy_hardpoints: section.energy_hardpoints,
            ballistic_hardpoints: section.ballistic_hardpoints,
            missile_hardpoints: section.missile_hardpoints,
            total_slots: section.total_slots,
            used_slots: section.used_slots,
            armor_damage: section.armor_damage,
            field_repair_armor: section.field_repair_armor,
            slot_damage: section.slot_damage.clone(),
            overflow_rule: section.overflow_rule,
            effective_armor_hp: section.effective_armor_hp(),
            total_slot_hp: section.total_slot_hp(),
            current_total_hp: section.current_total_hp(),
            max_total_hp: section.max_total_hp(),
        }
    }
}
