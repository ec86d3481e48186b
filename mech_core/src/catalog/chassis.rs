//! Chassis and slot-count records

use crate::types::SectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weapon hardpoint counts for the six upper sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hardpoints {
    pub left_arm: u32,
    pub left_torso: u32,
    pub head: u32,
    pub center_torso: u32,
    pub right_torso: u32,
    pub right_arm: u32,
}

impl Hardpoints {
    /// Hardpoints of a section (legs never carry any)
    pub fn get(&self, section: SectionId) -> u32 {
        match section {
            SectionId::LeftArm => self.left_arm,
            SectionId::LeftTorso => self.left_torso,
            SectionId::Head => self.head,
            SectionId::CenterTorso => self.center_torso,
            SectionId::RightTorso => self.right_torso,
            SectionId::RightArm => self.right_arm,
            SectionId::LeftLeg | SectionId::RightLeg => 0,
        }
    }

    pub fn total(&self) -> u32 {
        SectionId::upper().iter().map(|s| self.get(*s)).sum()
    }
}

/// A chassis from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechChassis {
    pub name: String,
    /// Size class selecting the slot table (Light, Medium, Heavy, Assault, ...)
    pub size_class: String,
    pub tonnage: u32,
    pub max_armor_tonnage: u32,
    pub hex_speed: u32,
    #[serde(default)]
    pub hardpoints: Hardpoints,
}

impl MechChassis {
    pub fn hardpoint_count(&self, section: SectionId) -> u32 {
        self.hardpoints.get(section)
    }
}

impl fmt::Display for MechChassis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}T, {} Armor, {} Speed",
            self.name, self.size_class, self.tonnage, self.max_armor_tonnage, self.hex_speed
        )
    }
}

/// Equipment slot counts of all eight sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSlots {
    pub left_arm: u32,
    pub left_torso: u32,
    #[serde(alias = "cockpit")]
    pub head: u32,
    pub center_torso: u32,
    pub right_torso: u32,
    pub right_arm: u32,
    pub left_leg: u32,
    pub right_leg: u32,
}

impl SectionSlots {
    pub fn get(&self, section: SectionId) -> u32 {
        match section {
            SectionId::LeftArm => self.left_arm,
            SectionId::LeftTorso => self.left_torso,
            SectionId::Head => self.head,
            SectionId::CenterTorso => self.center_torso,
            SectionId::RightTorso => self.right_torso,
            SectionId::RightArm => self.right_arm,
            SectionId::LeftLeg => self.left_leg,
            SectionId::RightLeg => self.right_leg,
        }
    }
}

/// Slot table for one chassis size class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfiguration {
    pub size_class: String,
    pub slots: SectionSlots,
}

impl SlotConfiguration {
    pub fn slots_for(&self, section: SectionId) -> u32 {
        self.slots.get(section)
    }

    pub fn total_slots(&self) -> u32 {
        SectionId::all().iter().map(|s| self.slots_for(*s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardpoint_lookup() {
        let hardpoints = Hardpoints {
            left_arm: 1,
            left_torso: 2,
            head: 0,
            center_torso: 1,
            right_torso: 2,
            right_arm: 1,
        };
        assert_eq!(hardpoints.get(SectionId::LeftTorso), 2);
        assert_eq!(hardpoints.get(SectionId::LeftLeg), 0);
        assert_eq!(hardpoints.total(), 7);
    }

    #[test]
    fn test_chassis_display() {
        let chassis = MechChassis {
            name: "Locust".to_string(),
            size_class: "Light".to_string(),
            tonnage: 20,
            max_armor_tonnage: 10,
            hex_speed: 9,
            hardpoints: Hardpoints::default(),
        };
        assert_eq!(chassis.to_string(), "Locust (Light) - 20T, 10 Armor, 9 Speed");
    }

    #[test]
    fn test_slot_configuration_accepts_cockpit_alias() {
        let config: SlotConfiguration = toml::from_str(
            r#"
size_class = "Light"
[slots]
left_arm = 4
left_torso = 6
cockpit = 2
center_torso = 4
right_torso = 6
right_arm = 4
left_leg = 2
right_leg = 2
"#,
        )
        .unwrap();
        assert_eq!(config.slots_for(SectionId::Head), 2);
        assert_eq!(config.total_slots(), 30);
    }
}
