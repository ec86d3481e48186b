//! Commands accepted by a build session and the events they produce

use crate::catalog::{ArmorType, Shield, Weapon};
use crate::loadout::LimitWarning;
use crate::section::DamageReport;
use crate::types::SectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user action against a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command")]
pub enum Command {
    /// Change armor by `delta` tons, clamped to the section's share of the budget
    AdjustArmor { section: SectionId, delta: f64 },
    /// Set armor tons, clamped to the section's share of the budget
    SetArmor { section: SectionId, tons: f64 },
    PlaceWeapon { section: SectionId, weapon: Weapon },
    RemoveWeapon { section: SectionId, index: usize },
    SetUsedSlots { section: SectionId, used: i64 },
    ApplyDamage { section: SectionId, amount: i32 },
    FieldRepair { section: SectionId, amount: i32 },
    /// Clear damage on every section
    ResetDamage,
    SelectShield { shield: Option<Shield> },
    SelectArmorType { armor_type: Option<ArmorType> },
}

impl Command {
    /// Section the command targets, if any
    pub fn section(&self) -> Option<SectionId> {
        match self {
            Command::AdjustArmor { section, .. }
            | Command::SetArmor { section, .. }
            | Command::PlaceWeapon { section, .. }
            | Command::RemoveWeapon { section, .. }
            | Command::SetUsedSlots { section, .. }
            | Command::ApplyDamage { section, .. }
            | Command::FieldRepair { section, .. } => Some(*section),
            Command::ResetDamage | Command::SelectShield { .. } | Command::SelectArmorType { .. } => {
                None
            }
        }
    }

    /// Whether the command can change the build's tonnage
    pub fn affects_tonnage(&self) -> bool {
        matches!(
            self,
            Command::AdjustArmor { .. }
                | Command::SetArmor { .. }
                | Command::PlaceWeapon { .. }
                | Command::RemoveWeapon { .. }
                | Command::SelectShield { .. }
        )
    }
}

/// State change reported to observers after a command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum BuildEvent {
    ArmorChanged { section: SectionId, tons: f64 },
    WeaponPlaced { section: SectionId, weapon: String },
    WeaponRemoved { section: SectionId, weapon: String },
    UsedSlotsChanged { section: SectionId, used: usize },
    Damaged(DamageReport),
    FieldRepaired {
        section: SectionId,
        amount: i32,
        field_repair_armor: i32,
    },
    DamageReset,
    ShieldChanged { shield: Option<String> },
    ArmorTypeChanged { armor_type: Option<String> },
    LimitsExceeded { warnings: Vec<LimitWarning> },
}

impl BuildEvent {
    /// Damage, repair and reset events
    pub fn is_damage_event(&self) -> bool {
        matches!(
            self,
            BuildEvent::Damaged(_) | BuildEvent::FieldRepaired { .. } | BuildEvent::DamageReset
        )
    }
}

impl fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEvent::ArmorChanged { section, tons } => {
                write!(f, "{}: armor set to {:.2}t", section, tons)
            }
            BuildEvent::WeaponPlaced { section, weapon } => {
                write!(f, "{}: mounted {}", section, weapon)
            }
            BuildEvent::WeaponRemoved { section, weapon } => {
                write!(f, "{}: removed {}", section, weapon)
            }
            BuildEvent::UsedSlotsChanged { section, used } => {
                write!(f, "{}: {} slots used", section, used)
            }
            BuildEvent::Damaged(report) => write!(
                f,
                "{}: {} dmg - {}",
                report.section,
                report.requested,
                report.summary()
            ),
            BuildEvent::FieldRepaired {
                section,
                amount,
                field_repair_armor,
            } => write!(
                f,
                "{}: field repair +{} (total +{})",
                section, amount, field_repair_armor
            ),
            BuildEvent::DamageReset => f.write_str("All damage reset"),
            BuildEvent::ShieldChanged { shield } => {
                write!(f, "Shield: {}", shield.as_deref().unwrap_or("None"))
            }
            BuildEvent::ArmorTypeChanged { armor_type } => {
                write!(f, "Armor type: {}", armor_type.as_deref().unwrap_or("Base"))
            }
            BuildEvent::LimitsExceeded { warnings } => {
                let text: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
                write!(f, "Limits: {}", text.join(", "))
            }
        }
    }
}
