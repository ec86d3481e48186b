//! Catalog - Read-only chassis, slot, weapon, armor and shield records

mod chassis;
mod equipment;

pub use chassis::{Hardpoints, MechChassis, SectionSlots, SlotConfiguration};
pub use equipment::{ArmorType, Shield, Weapon, NO_SHIELD};

use crate::config::{load_toml, parse_toml, ConfigError};
use crate::error::MechError;
use crate::types::WeaponType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

pub const CHASSIS_FILE: &str = "chassis.toml";
pub const SLOTS_FILE: &str = "slots.toml";
pub const WEAPONS_FILE: &str = "weapons.toml";
pub const ARMOR_FILE: &str = "armor.toml";
pub const SHIELDS_FILE: &str = "shields.toml";

/// Lookup interface the builder consumes catalog data through
pub trait CatalogProvider {
    fn chassis(&self, name: &str) -> Result<&MechChassis, MechError>;

    fn slot_configuration(&self, size_class: &str) -> Result<&SlotConfiguration, MechError>;

    fn weapon(&self, name: &str) -> Result<&Weapon, MechError>;

    fn armor_type(&self, name: &str) -> Result<&ArmorType, MechError>;

    fn shield(&self, name: &str) -> Result<&Shield, MechError>;
}

#[derive(Debug, Deserialize)]
struct ChassisFile {
    #[serde(default)]
    chassis: Vec<MechChassis>,
}

#[derive(Debug, Deserialize)]
struct SlotsFile {
    #[serde(default)]
    slots: Vec<SlotConfiguration>,
}

#[derive(Debug, Deserialize)]
struct WeaponsFile {
    #[serde(default)]
    weapons: Vec<Weapon>,
}

#[derive(Debug, Deserialize)]
struct ArmorFile {
    #[serde(default)]
    armor: Vec<ArmorType>,
}

#[derive(Debug, Deserialize)]
struct ShieldsFile {
    #[serde(default)]
    shields: Vec<Shield>,
}

/// In-memory catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub chassis: Vec<MechChassis>,
    pub slot_configurations: Vec<SlotConfiguration>,
    pub weapons: Vec<Weapon>,
    pub armor_types: Vec<ArmorType>,
    pub shields: Vec<Shield>,
}

/// Raw TOML sources of a catalog, one per record kind
#[derive(Debug, Clone, Copy)]
pub struct CatalogSources<'a> {
    pub chassis: &'a str,
    pub slots: &'a str,
    pub weapons: &'a str,
    pub armor: &'a str,
    pub shields: &'a str,
}

impl Catalog {
    /// Parse and validate a catalog from TOML strings
    pub fn from_sources(sources: CatalogSources<'_>) -> Result<Self, ConfigError> {
        let chassis: ChassisFile = parse_toml(sources.chassis)?;
        let slots: SlotsFile = parse_toml(sources.slots)?;
        let weapons: WeaponsFile = parse_toml(sources.weapons)?;
        let armor: ArmorFile = parse_toml(sources.armor)?;
        let shields: ShieldsFile = parse_toml(sources.shields)?;

        let catalog = Catalog {
            chassis: chassis.chassis,
            slot_configurations: slots.slots,
            weapons: weapons.weapons,
            armor_types: armor.armor,
            shields: shields.shields,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the five catalog files from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let chassis: ChassisFile = load_toml(&dir.join(CHASSIS_FILE))?;
        let slots: SlotsFile = load_toml(&dir.join(SLOTS_FILE))?;
        let weapons: WeaponsFile = load_toml(&dir.join(WEAPONS_FILE))?;
        let armor: ArmorFile = load_toml(&dir.join(ARMOR_FILE))?;
        let shields: ShieldsFile = load_toml(&dir.join(SHIELDS_FILE))?;

        let catalog = Catalog {
            chassis: chassis.chassis,
            slot_configurations: slots.slots,
            weapons: weapons.weapons,
            armor_types: armor.armor,
            shields: shields.shields,
        };
        catalog.validate()?;
        info!(
            dir = %dir.display(),
            chassis = catalog.chassis.len(),
            weapons = catalog.weapons.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Check cross-record consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        unique(self.chassis.iter().map(|c| c.name.as_str()), "chassis name")?;
        unique(
            self.slot_configurations.iter().map(|s| s.size_class.as_str()),
            "slot size class",
        )?;
        unique(self.weapons.iter().map(|w| w.name.as_str()), "weapon name")?;
        unique(self.armor_types.iter().map(|a| a.name.as_str()), "armor type")?;
        unique(self.shields.iter().map(|s| s.name.as_str()), "shield name")?;

        for chassis in &self.chassis {
            if chassis.max_armor_tonnage > chassis.tonnage {
                return Err(ConfigError::ValidationError(format!(
                    "Chassis {} allows more armor ({}) than its tonnage ({})",
                    chassis.name, chassis.max_armor_tonnage, chassis.tonnage
                )));
            }
            if self.find_slot_configuration(&chassis.size_class).is_none() {
                warn!(
                    chassis = %chassis.name,
                    size_class = %chassis.size_class,
                    "no slot configuration for chassis size class"
                );
            }
        }
        for weapon in &self.weapons {
            if !weapon.tonnage.is_finite() || weapon.tonnage < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "Weapon {} has invalid tonnage {}",
                    weapon.name, weapon.tonnage
                )));
            }
        }
        for armor in &self.armor_types {
            if armor.hp_per_ton <= 0 {
                return Err(ConfigError::ValidationError(format!(
                    "Armor type {} must grant positive HP per ton (got {})",
                    armor.name, armor.hp_per_ton
                )));
            }
        }
        for shield in &self.shields {
            if !shield.tonnage.is_finite() || shield.tonnage < 0.0 || shield.hp < 0 {
                return Err(ConfigError::ValidationError(format!(
                    "Shield {} has invalid HP or tonnage",
                    shield.name
                )));
            }
        }
        Ok(())
    }

    fn find_slot_configuration(&self, size_class: &str) -> Option<&SlotConfiguration> {
        self.slot_configurations
            .iter()
            .find(|config| config.size_class == size_class)
    }

    // === Queries ===

    pub fn chassis_by_size(&self, size_class: &str) -> Vec<&MechChassis> {
        self.chassis
            .iter()
            .filter(|chassis| chassis.size_class == size_class)
            .collect()
    }

    pub fn weapons_by_type(&self, weapon_type: WeaponType) -> Vec<&Weapon> {
        self.weapons
            .iter()
            .filter(|weapon| weapon.weapon_type == weapon_type)
            .collect()
    }

    /// Weapons whose name contains `fragment`
    pub fn weapons_matching(&self, fragment: &str) -> Vec<&Weapon> {
        self.weapons
            .iter()
            .filter(|weapon| weapon.name.contains(fragment))
            .collect()
    }
}

impl CatalogProvider for Catalog {
    fn chassis(&self, name: &str) -> Result<&MechChassis, MechError> {
        self.chassis
            .iter()
            .find(|chassis| chassis.name == name)
            .ok_or_else(|| MechError::not_found("Chassis", name))
    }

    fn slot_configuration(&self, size_class: &str) -> Result<&SlotConfiguration, MechError> {
        self.find_slot_configuration(size_class)
            .ok_or_else(|| MechError::not_found("Slot configuration", size_class))
    }

    fn weapon(&self, name: &str) -> Result<&Weapon, MechError> {
        self.weapons
            .iter()
            .find(|weapon| weapon.name == name)
            .ok_or_else(|| MechError::not_found("Weapon", name))
    }

    fn armor_type(&self, name: &str) -> Result<&ArmorType, MechError> {
        self.armor_types
            .iter()
            .find(|armor| armor.name == name)
            .ok_or_else(|| MechError::not_found("Armor type", name))
    }

    fn shield(&self, name: &str) -> Result<&Shield, MechError> {
        self.shields
            .iter()
            .find(|shield| shield.name == name)
            .ok_or_else(|| MechError::not_found("Shield", name))
    }
}

fn unique<'a>(names: impl Iterator<Item = &'a str>, what: &str) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::ValidationError(format!("Duplicate {}: {}", what, name)));
        }
    }
    Ok(())
}

/// Catalog bundled with the crate
pub fn default_catalog() -> Result<Catalog, ConfigError> {
    Catalog::from_sources(CatalogSources {
        chassis: include_str!("../../config/chassis.toml"),
        slots: include_str!("../../config/slots.toml"),
        weapons: include_str!("../../config/weapons.toml"),
        armor: include_str!("../../config/armor.toml"),
        shields: include_str!("../../config/shields.toml"),
    })
}
