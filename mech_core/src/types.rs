//! Core identifiers shared across the builder

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight body regions of a mech
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl SectionId {
    /// Get all sections in display order
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Head,
            SectionId::CenterTorso,
            SectionId::LeftTorso,
            SectionId::RightTorso,
            SectionId::LeftArm,
            SectionId::RightArm,
            SectionId::LeftLeg,
            SectionId::RightLeg,
        ]
    }

    /// Sections that can carry weapon hardpoints (everything but the legs)
    pub fn upper() -> &'static [SectionId] {
        &[
            SectionId::LeftArm,
            SectionId::LeftTorso,
            SectionId::Head,
            SectionId::CenterTorso,
            SectionId::RightTorso,
            SectionId::RightArm,
        ]
    }

    /// Canonical display name
    pub fn name(&self) -> &'static str {
        match self {
            SectionId::Head => "Head",
            SectionId::CenterTorso => "Center Torso",
            SectionId::LeftTorso => "Left Torso",
            SectionId::RightTorso => "Right Torso",
            SectionId::LeftArm => "Left Arm",
            SectionId::RightArm => "Right Arm",
            SectionId::LeftLeg => "Left Leg",
            SectionId::RightLeg => "Right Leg",
        }
    }

    /// Parse a display name. "Cockpit" is accepted as the old name for the head.
    pub fn from_name(name: &str) -> Option<SectionId> {
        match name.trim() {
            "Head" | "Cockpit" => Some(SectionId::Head),
            "Center Torso" => Some(SectionId::CenterTorso),
            "Left Torso" => Some(SectionId::LeftTorso),
            "Right Torso" => Some(SectionId::RightTorso),
            "Left Arm" => Some(SectionId::LeftArm),
            "Right Arm" => Some(SectionId::RightArm),
            "Left Leg" => Some(SectionId::LeftLeg),
            "Right Leg" => Some(SectionId::RightLeg),
            _ => None,
        }
    }

    /// Rule class used for slot HP and armor limits
    pub fn class(&self) -> SectionClass {
        match self {
            SectionId::Head => SectionClass::Head,
            SectionId::CenterTorso => SectionClass::CenterTorso,
            SectionId::LeftTorso | SectionId::RightTorso => SectionClass::SideTorso,
            SectionId::LeftArm | SectionId::RightArm => SectionClass::Arm,
            SectionId::LeftLeg | SectionId::RightLeg => SectionClass::Leg,
        }
    }

    pub fn is_leg(&self) -> bool {
        self.class() == SectionClass::Leg
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Section rule class: sections in the same class share slot HP and armor percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionClass {
    Head,
    Arm,
    SideTorso,
    CenterTorso,
    Leg,
}

/// Weapon mount type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardpointType {
    Energy,
    Ballistic,
    Missile,
}

/// Weapon category as listed in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Energy,
    Ballistic,
    Missile,
    System,
}

impl WeaponType {
    pub fn all() -> &'static [WeaponType] {
        &[
            WeaponType::Energy,
            WeaponType::Ballistic,
            WeaponType::Missile,
            WeaponType::System,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponType::Energy => "Energy",
            WeaponType::Ballistic => "Ballistic",
            WeaponType::Missile => "Missile",
            WeaponType::System => "System",
        }
    }

    /// Hardpoint type this weapon mounts on (system equipment has none)
    pub fn hardpoint(&self) -> Option<HardpointType> {
        match self {
            WeaponType::Energy => Some(HardpointType::Energy),
            WeaponType::Ballistic => Some(HardpointType::Ballistic),
            WeaponType::Missile => Some(HardpointType::Missile),
            WeaponType::System => None,
        }
    }
}
