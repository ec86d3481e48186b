//! Damage application - armor first, then internal slots from the last slot down

use super::MechSection;
use crate::error::MechError;
use crate::types::SectionId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a hit that strips the remaining armor carries on into the slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorOverflowRule {
    /// Only damage beyond the stripped armor reaches the slots
    #[default]
    Deduct,
    /// Only field repair is deducted; the full remaining hit reaches the slots
    /// even though the armor was also depleted. Matches loadouts tuned on
    /// earlier builder releases.
    Legacy,
}

/// Breakdown of a single damage application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub section: SectionId,
    /// Damage requested by the caller
    pub requested: i32,
    /// Temporary armor consumed
    pub absorbed_by_field_repair: i32,
    /// Permanent armor consumed
    pub absorbed_by_armor: i32,
    /// Damage written into slots
    pub absorbed_by_slots: i32,
    /// `(slot index, damage taken)` in the order slots were hit
    pub slots_hit: Vec<(usize, i32)>,
    /// Damage left over once every slot was exhausted
    pub overflow: i32,
    pub hp_before: i32,
    pub hp_after: i32,
    pub destroyed: bool,
}

impl DamageReport {
    fn new(section: SectionId, requested: i32, hp_before: i32) -> Self {
        DamageReport {
            section,
            requested,
            absorbed_by_field_repair: 0,
            absorbed_by_armor: 0,
            absorbed_by_slots: 0,
            slots_hit: Vec::new(),
            overflow: 0,
            hp_before,
            hp_after: hp_before,
            destroyed: false,
        }
    }

    /// Total damage absorbed by the section
    pub fn total_absorbed(&self) -> i32 {
        self.absorbed_by_field_repair + self.absorbed_by_armor + self.absorbed_by_slots
    }

    pub fn hp_change(&self) -> i32 {
        self.hp_after - self.hp_before
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.absorbed_by_field_repair > 0 {
            parts.push(format!("{} absorbed by field repair", self.absorbed_by_field_repair));
        }
        if self.absorbed_by_armor > 0 {
            parts.push(format!("{} absorbed by armor", self.absorbed_by_armor));
        }
        if self.absorbed_by_slots > 0 {
            parts.push(format!(
                "{} to internals ({} slots hit)",
                self.absorbed_by_slots,
                self.slots_hit.len()
            ));
        }
        if self.overflow > 0 {
            parts.push(format!("{} overflow", self.overflow));
        }
        if self.destroyed {
            parts.push("DESTROYED".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl MechSection {
    /// Apply damage and return the overflow that no slot could absorb.
    ///
    /// A positive return value means the section is gone and the rest of the
    /// hit must be handled by the caller.
    pub fn apply_damage(&mut self, amount: i32) -> Result<i32, MechError> {
        self.apply_damage_with_report(amount).map(|report| report.overflow)
    }

    /// Apply damage and return the full breakdown
    ///
    /// Order of absorption:
    /// 1. Armor, if any effective armor remains: field repair first, then
    ///    permanent armor. A hit larger than the remaining armor strips it
    ///    completely; what is carried on depends on the overflow rule.
    /// 2. Slots, walking from the last index to the first, each absorbing
    ///    up to its current HP.
    pub fn apply_damage_with_report(&mut self, amount: i32) -> Result<DamageReport, MechError> {
        if amount < 0 {
            return Err(MechError::negative("Damage amount", amount));
        }

        let was_destroyed = self.is_destroyed();
        let mut report = DamageReport::new(self.id, amount, self.current_total_hp());
        let mut remaining = amount;

        let effective = self.effective_armor_hp();
        if effective > 0 && remaining > 0 {
            if remaining <= effective {
                let from_repair = remaining.min(self.field_repair_armor);
                self.field_repair_armor -= from_repair;
                self.armor_damage += remaining - from_repair;

                report.absorbed_by_field_repair = from_repair;
                report.absorbed_by_armor = remaining - from_repair;
                remaining = 0;
            } else {
                let from_repair = self.field_repair_armor;
                remaining -= from_repair;
                self.field_repair_armor = 0;

                let armor_hp = self.armor_hp();
                let stripped = (armor_hp - self.armor_damage).max(0);
                self.armor_damage = armor_hp;

                if self.overflow_rule == ArmorOverflowRule::Deduct {
                    remaining -= stripped;
                }

                report.absorbed_by_field_repair = from_repair;
                report.absorbed_by_armor = stripped;
            }
        }

        let base = self.base_slot_hp();
        for index in (0..self.total_slots).rev() {
            if remaining == 0 {
                break;
            }
            let slot_hp = base - self.slot_damage[index];
            if slot_hp > 0 {
                let absorbed = remaining.min(slot_hp);
                self.slot_damage[index] += absorbed;
                remaining -= absorbed;
                report.absorbed_by_slots += absorbed;
                report.slots_hit.push((index, absorbed));
            }
        }

        report.overflow = remaining;
        report.hp_after = self.current_total_hp();
        report.destroyed = remaining > 0 || self.is_destroyed();

        debug!(
            section = %self.id,
            amount,
            armor = report.absorbed_by_armor,
            field_repair = report.absorbed_by_field_repair,
            slots = report.absorbed_by_slots,
            overflow = remaining,
            "damage applied"
        );
        if report.destroyed && !was_destroyed {
            info!(section = %self.id, overflow = remaining, "section destroyed");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_arm() -> MechSection {
        MechSection::new(SectionId::LeftArm, 3.0, 8, 2, 0, 1, 6).unwrap()
    }

    #[test]
    fn test_damage_within_armor() {
        let mut section = left_arm();
        let overflow = section.apply_damage(20).unwrap();

        assert_eq!(overflow, 0);
        assert_eq!(section.effective_armor_hp(), 4);
        assert_eq!(section.armor_damage(), 20);
        assert_eq!(section.slot_damage(), &[0; 6]);
    }

    #[test]
    fn test_damage_breaks_through_armor() {
        let mut section = left_arm();
        let overflow = section.apply_damage(30).unwrap();

        assert_eq!(overflow, 0);
        assert_eq!(section.effective_armor_hp(), 0);
        assert_eq!(section.slot_damage(), &[0, 0, 0, 0, 0, 6]);
        assert_eq!(section.slot_hp(5).unwrap(), 18);
    }

    #[test]
    fn test_legacy_rule_carries_full_hit_into_slots() {
        // Field repair is deducted but not the stripped armor, so the
        // whole 30 reaches the slots after the armor is gone.
        let mut section = left_arm().with_overflow_rule(ArmorOverflowRule::Legacy);
        let report = section.apply_damage_with_report(30).unwrap();

        assert_eq!(report.overflow, 0);
        assert_eq!(section.armor_damage(), 24);
        assert_eq!(section.slot_damage(), &[0, 0, 0, 0, 6, 24]);
        assert_eq!(report.absorbed_by_armor, 24);
        assert_eq!(report.absorbed_by_slots, 30);
    }

    #[test]
    fn test_legacy_rule_still_deducts_field_repair() {
        let mut section = left_arm().with_overflow_rule(ArmorOverflowRule::Legacy);
        section.apply_field_repair(10).unwrap();
        section.apply_damage(40).unwrap();

        assert_eq!(section.field_repair_armor(), 0);
        assert_eq!(section.slot_damage(), &[0, 0, 0, 0, 6, 24]);
    }

    #[test]
    fn test_zero_damage_is_noop() {
        let mut section = left_arm();
        let before = section.debug_snapshot();
        let report = section.apply_damage_with_report(0).unwrap();

        assert_eq!(report.overflow, 0);
        assert_eq!(report.hp_change(), 0);
        assert_eq!(report.summary(), "No damage");
        assert_eq!(section.debug_snapshot(), before);
    }

    #[test]
    fn test_negative_damage_rejected_without_mutation() {
        let mut section = left_arm();
        section.apply_damage(10).unwrap();
        let before = section.debug_snapshot();

        assert!(matches!(
            section.apply_damage(-5),
            Err(MechError::InvalidArgument(_))
        ));
        assert_eq!(section.debug_snapshot(), before);
    }

    #[test]
    fn test_field_repair_absorbs_first() {
        let mut section = left_arm();
        section.apply_field_repair(10).unwrap();

        let report = section.apply_damage_with_report(15).unwrap();
        assert_eq!(report.absorbed_by_field_repair, 10);
        assert_eq!(report.absorbed_by_armor, 5);
        assert_eq!(section.field_repair_armor(), 0);
        assert_eq!(section.armor_damage(), 5);
    }

    #[test]
    fn test_small_hit_only_uses_field_repair() {
        let mut section = left_arm();
        section.apply_field_repair(10).unwrap();
        section.apply_damage(4).unwrap();

        assert_eq!(section.field_repair_armor(), 6);
        assert_eq!(section.armor_damage(), 0);
    }

    #[test]
    fn test_field_repair_then_breakthrough() {
        let mut section = left_arm();
        section.apply_field_repair(10).unwrap();

        // 10 repair + 24 armor, 6 left for the last slot
        let report = section.apply_damage_with_report(40).unwrap();
        assert_eq!(report.absorbed_by_field_repair, 10);
        assert_eq!(report.absorbed_by_armor, 24);
        assert_eq!(report.absorbed_by_slots, 6);
        assert_eq!(report.slots_hit, vec![(5, 6)]);
        assert_eq!(report.total_absorbed(), 40);
    }

    #[test]
    fn test_slots_fill_from_last_index() {
        let mut section = left_arm();
        section.apply_damage(24 + 24 + 10).unwrap();

        assert_eq!(section.slot_damage(), &[0, 0, 0, 0, 10, 24]);
        assert_eq!(section.intact_slots(), 5);
    }

    #[test]
    fn test_partially_damaged_slot_absorbs_remainder_only() {
        let mut section = left_arm();
        section.apply_damage(24 + 10).unwrap();
        section.apply_damage(20).unwrap();

        assert_eq!(section.slot_damage(), &[0, 0, 0, 0, 6, 24]);
    }

    #[test]
    fn test_overflow_on_fresh_section() {
        let mut section = left_arm();
        let report = section.apply_damage_with_report(200).unwrap();

        assert_eq!(report.overflow, 200 - 168);
        assert!(report.destroyed);
        assert!(section.is_destroyed());
        assert_eq!(section.current_total_hp(), 0);
        assert!(report.summary().contains("DESTROYED"));
    }

    #[test]
    fn test_destroyed_section_overflows_everything() {
        let mut section = left_arm();
        section.apply_damage(168).unwrap();
        assert!(section.is_destroyed());

        assert_eq!(section.apply_damage(15).unwrap(), 15);
    }

    #[test]
    fn test_field_repair_on_destroyed_section() {
        let mut section = left_arm();
        section.apply_damage(168).unwrap();
        section.apply_field_repair(5).unwrap();
        assert!(!section.is_destroyed());

        // Armor is exhausted (24/24 damage) but repair gives 5 effective
        assert_eq!(section.apply_damage(8).unwrap(), 3);
        assert_eq!(section.field_repair_armor(), 0);
    }

    #[test]
    fn test_armorless_section_goes_straight_to_slots() {
        let mut section = MechSection::new(SectionId::CenterTorso, 0.0, 15, 1, 0, 0, 3).unwrap();
        section.apply_damage(70).unwrap();

        assert_eq!(section.slot_damage(), &[0, 10, 60]);
        assert_eq!(section.armor_damage(), 0);
    }

    #[test]
    fn test_report_serializes() {
        let mut section = left_arm();
        let report = section.apply_damage_with_report(30).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"section\":\"left_arm\""));
        assert!(json.contains("\"overflow\":0"));
    }
}
