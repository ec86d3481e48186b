//! MechSection - Slot capacity, armor and damage state of one body section

mod capacity;
mod damage;
mod snapshot;

pub use capacity::{SlotCapacityTable, FALLBACK_SLOT_HP};
pub use damage::{ArmorOverflowRule, DamageReport};
pub use snapshot::SectionSnapshot;

use crate::error::MechError;
use crate::types::{HardpointType, SectionId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Armor hit points per allocated ton of standard armor
pub const DEFAULT_ARMOR_HP_PER_TON: i32 = 8;

/// One body section of a mech
///
/// Hit points come from two pools:
/// - armor: `floor(armor_tons * hp_per_ton)` plus any field repair, minus armor damage
/// - slots: `total_slots` internal slots, each worth the section's base slot HP
///
/// All HP values are derived from the damage counters on every query.
/// Deserialized sections are checked against the same bounds as [`MechSection::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub struct MechSection {
    id: SectionId,
    armor_tons: f64,
    armor_hp_per_ton: i32,
    internal_structure: i32,
    energy_hardpoints: u32,
    ballistic_hardpoints: u32,
    missile_hardpoints: u32,
    total_slots: usize,
    used_slots: usize,

    // === Damage state ===
    armor_damage: i32,
    field_repair_armor: i32,
    slot_damage: Vec<i32>,

    overflow_rule: ArmorOverflowRule,
}

/// Stored fields of a section as they appear in serialized form
#[derive(Deserialize)]
struct SectionRecord {
    id: SectionId,
    armor_tons: f64,
    armor_hp_per_ton: i32,
    internal_structure: i32,
    energy_hardpoints: u32,
    ballistic_hardpoints: u32,
    missile_hardpoints: u32,
    total_slots: usize,
    used_slots: usize,
    armor_damage: i32,
    field_repair_armor: i32,
    slot_damage: Vec<i32>,
    #[serde(default)]
    overflow_rule: ArmorOverflowRule,
}

impl TryFrom<SectionRecord> for MechSection {
    type Error = MechError;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        let invalid = |message: String| Err(MechError::InvalidArgument(message));

        if record.used_slots > record.total_slots {
            return invalid(format!(
                "Used slots {} exceed total slots {}",
                record.used_slots, record.total_slots
            ));
        }
        if record.slot_damage.len() != record.total_slots {
            return invalid(format!(
                "Expected {} slot damage entries (got {})",
                record.total_slots,
                record.slot_damage.len()
            ));
        }
        non_negative("Field repair armor", record.field_repair_armor)?;

        let mut section = MechSection {
            id: record.id,
            armor_tons: valid_tons(record.armor_tons)?,
            armor_hp_per_ton: DEFAULT_ARMOR_HP_PER_TON,
            internal_structure: record.internal_structure,
            energy_hardpoints: record.energy_hardpoints,
            ballistic_hardpoints: record.ballistic_hardpoints,
            missile_hardpoints: record.missile_hardpoints,
            total_slots: record.total_slots,
            used_slots: record.used_slots,
            armor_damage: 0,
            field_repair_armor: record.field_repair_armor,
            slot_damage: record.slot_damage,
            overflow_rule: record.overflow_rule,
        };
        section.set_armor_hp_per_ton(record.armor_hp_per_ton)?;

        let armor_hp = section.armor_hp().max(0);
        if !(0..=armor_hp).contains(&record.armor_damage) {
            return invalid(format!(
                "Armor damage {} outside 0..={}",
                record.armor_damage, armor_hp
            ));
        }
        section.armor_damage = record.armor_damage;

        let base = section.base_slot_hp();
        if let Some(damage) = section.slot_damage.iter().find(|d| !(0..=base).contains(*d)) {
            return invalid(format!("Slot damage {} outside 0..={}", damage, base));
        }

        Ok(section)
    }
}

fn non_negative(what: &str, value: i32) -> Result<u32, MechError> {
    u32::try_from(value).map_err(|_| MechError::negative(what, value))
}

fn valid_tons(tons: f64) -> Result<f64, MechError> {
    if !tons.is_finite() || tons < 0.0 {
        return Err(MechError::InvalidArgument(format!(
            "Armor tonnage must be a non-negative number (got {})",
            tons
        )));
    }
    Ok(tons)
}

impl MechSection {
    /// Create a section with zeroed damage state
    pub fn new(
        id: SectionId,
        armor_tons: f64,
        internal_structure: i32,
        energy_hardpoints: i32,
        ballistic_hardpoints: i32,
        missile_hardpoints: i32,
        total_slots: i32,
    ) -> Result<Self, MechError> {
        let armor_tons = valid_tons(armor_tons)?;
        let energy_hardpoints = non_negative("Energy hardpoints", energy_hardpoints)?;
        let ballistic_hardpoints = non_negative("Ballistic hardpoints", ballistic_hardpoints)?;
        let missile_hardpoints = non_negative("Missile hardpoints", missile_hardpoints)?;
        let total_slots = non_negative("Total slots", total_slots)? as usize;

        Ok(MechSection {
            id,
            armor_tons,
            armor_hp_per_ton: DEFAULT_ARMOR_HP_PER_TON,
            internal_structure,
            energy_hardpoints,
            ballistic_hardpoints,
            missile_hardpoints,
            total_slots,
            used_slots: 0,
            armor_damage: 0,
            field_repair_armor: 0,
            slot_damage: vec![0; total_slots],
            overflow_rule: ArmorOverflowRule::default(),
        })
    }

    /// Use a different armor overflow rule for damage application
    pub fn with_overflow_rule(mut self, rule: ArmorOverflowRule) -> Self {
        self.overflow_rule = rule;
        self
    }

    // === Identity & capacity ===

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn armor_tons(&self) -> f64 {
        self.armor_tons
    }

    pub fn armor_hp_per_ton(&self) -> i32 {
        self.armor_hp_per_ton
    }

    pub fn internal_structure(&self) -> i32 {
        self.internal_structure
    }

    pub fn overflow_rule(&self) -> ArmorOverflowRule {
        self.overflow_rule
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn used_slots(&self) -> usize {
        self.used_slots
    }

    pub fn available_slots(&self) -> usize {
        self.total_slots - self.used_slots
    }

    pub fn energy_hardpoints(&self) -> u32 {
        self.energy_hardpoints
    }

    pub fn ballistic_hardpoints(&self) -> u32 {
        self.ballistic_hardpoints
    }

    pub fn missile_hardpoints(&self) -> u32 {
        self.missile_hardpoints
    }

    pub fn hardpoints(&self, kind: HardpointType) -> u32 {
        match kind {
            HardpointType::Energy => self.energy_hardpoints,
            HardpointType::Ballistic => self.ballistic_hardpoints,
            HardpointType::Missile => self.missile_hardpoints,
        }
    }

    pub fn total_hardpoints(&self) -> u32 {
        self.energy_hardpoints + self.ballistic_hardpoints + self.missile_hardpoints
    }

    /// Base HP of one slot in this section
    pub fn base_slot_hp(&self) -> i32 {
        SlotCapacityTable::for_section(self.id)
    }

    // === Damage state ===

    pub fn armor_damage(&self) -> i32 {
        self.armor_damage
    }

    pub fn field_repair_armor(&self) -> i32 {
        self.field_repair_armor
    }

    pub fn slot_damage(&self) -> &[i32] {
        &self.slot_damage
    }

    // === Derived HP ===

    /// Armor HP granted by the allocated tonnage (fractional HP is dropped)
    pub fn armor_hp(&self) -> i32 {
        (self.armor_tons * self.armor_hp_per_ton as f64).floor() as i32
    }

    pub fn effective_armor_hp(&self) -> i32 {
        self.armor_hp()
            .saturating_add(self.field_repair_armor)
            .saturating_sub(self.armor_damage)
    }

    /// Current HP of slot `index`. May be negative.
    pub fn slot_hp(&self, index: usize) -> Result<i32, MechError> {
        self.slot_damage
            .get(index)
            .map(|damage| self.base_slot_hp() - damage)
            .ok_or(MechError::IndexOutOfRange {
                index,
                len: self.total_slots,
            })
    }

    /// Current HP of slot `index`, or 0 when the index is out of range
    pub fn slot_hp_or_zero(&self, index: usize) -> i32 {
        self.slot_hp(index).unwrap_or(0)
    }

    /// Sum of current slot HP, negative slots included
    pub fn total_slot_hp(&self) -> i32 {
        let base = self.base_slot_hp();
        self.slot_damage
            .iter()
            .fold(0i32, |total, damage| total.saturating_add(base.saturating_sub(*damage)))
    }

    pub fn current_total_hp(&self) -> i32 {
        self.effective_armor_hp().saturating_add(self.total_slot_hp())
    }

    pub fn max_total_hp(&self) -> i32 {
        let slots = i32::try_from(self.total_slots).unwrap_or(i32::MAX);
        self.armor_hp()
            .saturating_add(slots.saturating_mul(self.base_slot_hp()))
    }

    /// Number of slots that still have positive HP
    pub fn intact_slots(&self) -> usize {
        let base = self.base_slot_hp();
        self.slot_damage.iter().filter(|&&damage| base - damage > 0).count()
    }

    /// A section is destroyed once its armor and every slot are used up
    pub fn is_destroyed(&self) -> bool {
        self.effective_armor_hp() <= 0 && self.intact_slots() == 0
    }

    pub fn is_damaged(&self) -> bool {
        self.armor_damage > 0 || self.slot_damage.iter().any(|&damage| damage > 0)
    }

    // === Mutators ===

    /// Set the occupied slot counter, saturating into `[0, total_slots]`
    pub fn set_used_slots(&mut self, used: i64) {
        let clamped = if used <= 0 {
            0
        } else {
            usize::try_from(used).unwrap_or(usize::MAX).min(self.total_slots)
        };
        debug!(section = %self.id, requested = used, used = clamped, "set used slots");
        self.used_slots = clamped;
    }

    /// Reassign armor tonnage. Armor damage is capped at the new armor HP.
    pub fn set_armor_tons(&mut self, tons: f64) -> Result<(), MechError> {
        self.armor_tons = valid_tons(tons)?;
        self.clamp_armor_damage();
        debug!(section = %self.id, tons, armor_hp = self.armor_hp(), "armor reassigned");
        Ok(())
    }

    /// Change armor HP per ton (armor type). Armor damage is capped at the new armor HP.
    pub fn set_armor_hp_per_ton(&mut self, hp_per_ton: i32) -> Result<(), MechError> {
        if hp_per_ton <= 0 {
            return Err(MechError::InvalidArgument(format!(
                "Armor HP per ton must be positive (got {})",
                hp_per_ton
            )));
        }
        self.armor_hp_per_ton = hp_per_ton;
        self.clamp_armor_damage();
        Ok(())
    }

    fn clamp_armor_damage(&mut self) {
        self.armor_damage = self.armor_damage.min(self.armor_hp().max(0));
    }

    /// Add temporary armor HP, consumed before permanent armor damage
    pub fn apply_field_repair(&mut self, amount: i32) -> Result<(), MechError> {
        if amount < 0 {
            return Err(MechError::negative("Field repair amount", amount));
        }
        self.field_repair_armor = self.field_repair_armor.saturating_add(amount);
        debug!(
            section = %self.id,
            amount,
            field_repair = self.field_repair_armor,
            "field repair applied"
        );
        Ok(())
    }

    /// Clear armor damage, field repair and all slot damage
    pub fn reset_damage(&mut self) {
        self.armor_damage = 0;
        self.field_repair_armor = 0;
        self.slot_damage.iter_mut().for_each(|damage| *damage = 0);
        debug!(section = %self.id, "damage reset");
    }

    // === Display ===

    /// Short damage status line
    pub fn damage_status(&self) -> String {
        let mut status = format!(
            "Armor: {}/{} | Slots: {}/{} | HP: {}/{}",
            self.effective_armor_hp(),
            self.armor_hp(),
            self.intact_slots(),
            self.total_slots,
            self.current_total_hp(),
            self.max_total_hp()
        );
        if self.field_repair_armor > 0 {
            status.push_str(&format!(" | Repair: +{}", self.field_repair_armor));
        }
        if self.is_destroyed() {
            status.push_str(" | DESTROYED");
        }
        status
    }

    /// Multi-line section summary
    pub fn summary(&self) -> String {
        format!(
            "{}\nArmor Tons: {:.2}\nStructure: {}\nHP: {} / {}\nSlots: {} / {}\nHardpoints [E:{} | B:{} | M:{}]",
            self.name(),
            self.armor_tons,
            self.internal_structure,
            self.current_total_hp(),
            self.max_total_hp(),
            self.used_slots,
            self.total_slots,
            self.energy_hardpoints,
            self.ballistic_hardpoints,
            self.missile_hardpoints
        )
    }

    /// Read-only copy of the full section state
    pub fn debug_snapshot(&self) -> SectionSnapshot {
        SectionSnapshot::capture(self)
    }
}
