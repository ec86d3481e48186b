//! Percentage caps on section armor

use super::allocation::AllocationSummary;
use crate::types::{SectionClass, SectionId};
use std::collections::BTreeMap;

/// Tonnage of a single armor adjustment in the editor
pub const ARMOR_STEP: f64 = 0.25;

/// Stateless armor allocation rules
///
/// Each section may hold at most a fixed share of the chassis' maximum armor
/// tonnage. The shares of all eight sections add up to 100%.
pub struct ArmorAllocationPolicy;

impl ArmorAllocationPolicy {
    /// Share of the chassis armor budget a section class may hold
    pub const fn percent_for_class(class: SectionClass) -> f64 {
        match class {
            SectionClass::Head => 0.05,
            SectionClass::Arm => 0.05,
            SectionClass::SideTorso => 0.15,
            SectionClass::CenterTorso => 0.25,
            SectionClass::Leg => 0.15,
        }
    }

    pub fn percent_for(section: SectionId) -> f64 {
        Self::percent_for_class(section.class())
    }

    /// Maximum armor tons a section may hold
    pub fn max_allowed_tons(section: SectionId, chassis_max_armor: f64) -> f64 {
        chassis_max_armor * Self::percent_for(section)
    }

    /// Apply `delta` to `current`, clamped to `[0, max_allowed_tons]`
    pub fn adjust(current: f64, delta: f64, section: SectionId, chassis_max_armor: f64) -> f64 {
        let max_allowed = Self::max_allowed_tons(section, chassis_max_armor).max(0.0);
        (current + delta).clamp(0.0, max_allowed)
    }

    /// Sum the allocations and compare against the chassis budget.
    /// Over-allocation is reported, never corrected.
    pub fn validate_total(
        allocations: &BTreeMap<SectionId, f64>,
        chassis_max_armor: f64,
    ) -> AllocationSummary {
        let total_allocated: f64 = allocations.values().sum();
        AllocationSummary::new(total_allocated, chassis_max_armor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages() {
        assert!((ArmorAllocationPolicy::percent_for(SectionId::Head) - 0.05).abs() < f64::EPSILON);
        assert!((ArmorAllocationPolicy::percent_for(SectionId::LeftArm) - 0.05).abs() < f64::EPSILON);
        assert!((ArmorAllocationPolicy::percent_for(SectionId::RightTorso) - 0.15).abs() < f64::EPSILON);
        assert!((ArmorAllocationPolicy::percent_for(SectionId::CenterTorso) - 0.25).abs() < f64::EPSILON);
        assert!((ArmorAllocationPolicy::percent_for(SectionId::LeftLeg) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shares_cover_whole_budget() {
        let total: f64 = SectionId::all()
            .iter()
            .map(|s| ArmorAllocationPolicy::percent_for(*s))
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_allowed_tons() {
        assert!((ArmorAllocationPolicy::max_allowed_tons(SectionId::Head, 40.0) - 2.0).abs() < f64::EPSILON);
        assert!(
            (ArmorAllocationPolicy::max_allowed_tons(SectionId::CenterTorso, 40.0) - 10.0).abs()
                < f64::EPSILON
        );
        assert!((ArmorAllocationPolicy::max_allowed_tons(SectionId::LeftLeg, 40.0) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_steps() {
        let mut tons = 0.0;
        for _ in 0..3 {
            tons = ArmorAllocationPolicy::adjust(tons, ARMOR_STEP, SectionId::Head, 40.0);
        }
        assert!((tons - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_adjust_clamps() {
        let tons = ArmorAllocationPolicy::adjust(1.75, 1.0, SectionId::Head, 40.0);
        assert!((tons - 2.0).abs() < f64::EPSILON);

        let tons = ArmorAllocationPolicy::adjust(0.25, -1.0, SectionId::Head, 40.0);
        assert!(tons.abs() < f64::EPSILON);

        // No chassis budget means no armor at all
        let tons = ArmorAllocationPolicy::adjust(0.0, ARMOR_STEP, SectionId::CenterTorso, 0.0);
        assert!(tons.abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_total() {
        let mut allocations = BTreeMap::new();
        allocations.insert(SectionId::CenterTorso, 10.0);
        allocations.insert(SectionId::LeftTorso, 6.0);
        allocations.insert(SectionId::RightTorso, 6.0);

        let summary = ArmorAllocationPolicy::validate_total(&allocations, 40.0);
        assert!(summary.valid);
        assert!((summary.total_allocated - 22.0).abs() < f64::EPSILON);
        assert!((summary.remaining - 18.0).abs() < f64::EPSILON);

        let summary = ArmorAllocationPolicy::validate_total(&allocations, 20.0);
        assert!(!summary.valid);
        assert!((summary.remaining + 2.0).abs() < f64::EPSILON);
    }
}
