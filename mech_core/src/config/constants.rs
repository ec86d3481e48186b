//! Builder constants configuration

use super::ConfigError;
use crate::section::{ArmorOverflowRule, DEFAULT_ARMOR_HP_PER_TON};
use serde::{Deserialize, Serialize};

/// Tunable builder constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderConstants {
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub armor: ArmorConstants,
    #[serde(default)]
    pub factory: FactoryConstants,
}

impl BuilderConstants {
    /// Parse constants from a TOML string and check their ranges
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let constants: BuilderConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.armor.step.is_nan() || self.armor.step <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "armor.step must be positive (got {})",
                self.armor.step
            )));
        }
        if self.armor.hp_per_ton <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "armor.hp_per_ton must be positive (got {})",
                self.armor.hp_per_ton
            )));
        }
        if !(0.0..=1.0).contains(&self.armor.near_limit_ratio) {
            return Err(ConfigError::ValidationError(format!(
                "armor.near_limit_ratio must be within 0..=1 (got {})",
                self.armor.near_limit_ratio
            )));
        }
        let tons = self.factory.default_armor_tons;
        if !tons.is_finite() || tons < 0.0 || self.factory.default_internal_structure < 0 {
            return Err(ConfigError::ValidationError(
                "factory defaults must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageConstants {
    /// How damage that strips the last armor carries into the slots
    #[serde(default)]
    pub armor_overflow: ArmorOverflowRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorConstants {
    /// Tonnage step for a single armor adjustment
    #[serde(default = "default_step")]
    pub step: f64,
    /// Armor hit points granted per ton when no armor type is selected
    #[serde(default = "default_hp_per_ton")]
    pub hp_per_ton: i32,
    /// Fraction of chassis tonnage above which a build is reported as near its limit
    #[serde(default = "default_near_limit_ratio")]
    pub near_limit_ratio: f64,
}

impl Default for ArmorConstants {
    fn default() -> Self {
        ArmorConstants {
            step: default_step(),
            hp_per_ton: default_hp_per_ton(),
            near_limit_ratio: default_near_limit_ratio(),
        }
    }
}

fn default_step() -> f64 {
    0.25
}
fn default_hp_per_ton() -> i32 {
    DEFAULT_ARMOR_HP_PER_TON
}
fn default_near_limit_ratio() -> f64 {
    0.95
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryConstants {
    /// Armor tons given to every section before the player allocates armor
    #[serde(default = "default_armor_tons")]
    pub default_armor_tons: f64,
    #[serde(default = "default_internal_structure")]
    pub default_internal_structure: i32,
}

impl Default for FactoryConstants {
    fn default() -> Self {
        FactoryConstants {
            default_armor_tons: default_armor_tons(),
            default_internal_structure: default_internal_structure(),
        }
    }
}

fn default_armor_tons() -> f64 {
    2.0
}
fn default_internal_structure() -> i32 {
    5
}
