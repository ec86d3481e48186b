//! Loadout accounting - Tonnage totals and chassis limit checks

use crate::catalog::MechChassis;
use crate::section::MechSection;
use crate::types::SectionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Default fraction of chassis tonnage above which a build is near its limit
pub const DEFAULT_NEAR_LIMIT_RATIO: f64 = 0.95;

/// Aggregate tonnage of a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TonnageTotals {
    /// Weapons and other equipment
    pub weapon_tons: f64,
    pub armor_tons: f64,
    pub total: f64,
}

impl TonnageTotals {
    /// Add equipment that is not mounted in a section (shield generators)
    pub fn with_equipment(self, tons: f64) -> Self {
        TonnageTotals {
            weapon_tons: self.weapon_tons + tons,
            armor_tons: self.armor_tons,
            total: self.total + tons,
        }
    }

    /// Tons left before reaching the chassis tonnage; negative when over
    pub fn remaining(&self, chassis: &MechChassis) -> f64 {
        chassis.tonnage as f64 - self.total
    }
}

/// Advisory limit violation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LimitWarning {
    OverTonnage { overage: f64 },
    OverArmor { overage: f64 },
    NearTonnageLimit { total: f64, limit: f64 },
}

impl LimitWarning {
    pub fn is_violation(&self) -> bool {
        !matches!(self, LimitWarning::NearTonnageLimit { .. })
    }
}

impl fmt::Display for LimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitWarning::OverTonnage { overage } => {
                write!(f, "Over tonnage by {:.2}t", overage)
            }
            LimitWarning::OverArmor { overage } => {
                write!(f, "Over armor budget by {:.2}t", overage)
            }
            LimitWarning::NearTonnageLimit { total, limit } => {
                write!(f, "Near tonnage limit ({:.2}/{:.0}t)", total, limit)
            }
        }
    }
}

/// Computes tonnage totals on demand from section state
#[derive(Debug, Clone, Copy)]
pub struct LoadoutAccountant {
    near_limit_ratio: f64,
}

impl Default for LoadoutAccountant {
    fn default() -> Self {
        LoadoutAccountant {
            near_limit_ratio: DEFAULT_NEAR_LIMIT_RATIO,
        }
    }
}

impl LoadoutAccountant {
    pub fn new(near_limit_ratio: f64) -> Self {
        LoadoutAccountant { near_limit_ratio }
    }

    pub fn near_limit_ratio(&self) -> f64 {
        self.near_limit_ratio
    }

    /// Sum section armor and the weapon tonnage equipped in each section.
    /// Weapon entries for sections missing from `sections` still count.
    pub fn total_tonnage(
        &self,
        sections: &BTreeMap<SectionId, MechSection>,
        equipped_weapon_tonnage: &BTreeMap<SectionId, f64>,
    ) -> TonnageTotals {
        let armor_tons: f64 = sections.values().map(|s| s.armor_tons()).sum();
        let weapon_tons: f64 = equipped_weapon_tonnage.values().sum();
        TonnageTotals {
            weapon_tons,
            armor_tons,
            total: weapon_tons + armor_tons,
        }
    }

    /// Compare totals against the chassis limits. Nothing is corrected.
    pub fn check_limits(&self, totals: &TonnageTotals, chassis: &MechChassis) -> Vec<LimitWarning> {
        let tonnage = chassis.tonnage as f64;
        let max_armor = chassis.max_armor_tonnage as f64;
        let mut warnings = Vec::new();

        if totals.total > tonnage {
            warnings.push(LimitWarning::OverTonnage {
                overage: totals.total - tonnage,
            });
        } else if totals.total > tonnage * self.near_limit_ratio {
            warnings.push(LimitWarning::NearTonnageLimit {
                total: totals.total,
                limit: tonnage,
            });
        }
        if totals.armor_tons > max_armor {
            warnings.push(LimitWarning::OverArmor {
                overage: totals.armor_tons - max_armor,
            });
        }

        for warning in warnings.iter().filter(|w| w.is_violation()) {
            warn!(chassis = %chassis.name, %warning, "loadout limit exceeded");
        }
        warnings
    }
}
