//! Weapon, armor type and shield records

use crate::types::WeaponType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A weapon or system component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    pub tonnage: f64,
    pub heat: f64,
    pub damage: i32,
    pub optimal_range: u32,
    pub max_range: u32,
    pub recycle_time: f64,
    #[serde(default)]
    pub accuracy_penalty: i32,
    #[serde(default = "default_shots_per_salvo")]
    pub shots_per_salvo: u32,
    #[serde(default)]
    pub damage_drop: f64,
}

fn default_shots_per_salvo() -> u32 {
    1
}

impl Weapon {
    /// Damage of one full salvo
    pub fn salvo_damage(&self) -> i32 {
        let shots = i32::try_from(self.shots_per_salvo).unwrap_or(i32::MAX);
        self.damage.saturating_mul(shots)
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {:.1}t, {} dmg, {:.1} heat",
            self.name,
            self.weapon_type.name(),
            self.tonnage,
            self.damage,
            self.heat
        )
    }
}

/// Armor material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorType {
    pub name: String,
    pub hp_per_ton: i32,
    /// Material family (Standard, Reactive, ...)
    pub category: String,
}

impl ArmorType {
    /// HP granted by `tonnage` tons of this armor (fractional HP is dropped)
    pub fn total_hp(&self, tonnage: f64) -> i32 {
        (self.hp_per_ton as f64 * tonnage) as i32
    }

    /// Tons needed to reach `desired_hp`
    pub fn required_tonnage(&self, desired_hp: i32) -> f64 {
        desired_hp as f64 / self.hp_per_ton as f64
    }
}

impl fmt::Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {} HP/Ton", self.name, self.category, self.hp_per_ton)
    }
}

/// Shield generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub name: String,
    pub hp: i32,
    pub recharge_rate: i32,
    /// Seconds before recharging starts
    pub recharge_delay: i32,
    pub tonnage: f64,
    pub heat_generated: i32,
    pub recharging_heat: i32,
}

/// Catalog name of the "no shield" entry
pub const NO_SHIELD: &str = "None";

impl Shield {
    /// Seconds to recharge from empty, infinite when the shield does not recharge
    pub fn full_recharge_time(&self) -> f64 {
        if self.recharge_rate <= 0 {
            return f64::INFINITY;
        }
        self.recharge_delay as f64 + self.hp as f64 / self.recharge_rate as f64
    }

    /// Shield HP per ton
    pub fn efficiency_rating(&self) -> f64 {
        if self.tonnage <= 0.0 {
            return 0.0;
        }
        self.hp as f64 / self.tonnage
    }

    pub fn is_none(&self) -> bool {
        self.name == NO_SHIELD
    }
}

impl fmt::Display for Shield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("No Shield");
        }
        write!(
            f,
            "{} - {} HP, {:.1}t, {} heat",
            self.name, self.hp, self.tonnage, self.heat_generated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reactive() -> ArmorType {
        ArmorType {
            name: "Reactive".to_string(),
            hp_per_ton: 10,
            category: "Advanced".to_string(),
        }
    }

    fn deflector() -> Shield {
        Shield {
            name: "Deflector".to_string(),
            hp: 40,
            recharge_rate: 5,
            recharge_delay: 3,
            tonnage: 2.0,
            heat_generated: 2,
            recharging_heat: 4,
        }
    }

    #[test]
    fn test_armor_type_hp() {
        let armor = reactive();
        assert_eq!(armor.total_hp(2.5), 25);
        assert_eq!(armor.total_hp(0.33), 3);
        assert!((armor.required_tonnage(25) - 2.5).abs() < f64::EPSILON);
        assert_eq!(armor.to_string(), "Reactive (Advanced) - 10 HP/Ton");
    }

    #[test]
    fn test_shield_recharge() {
        let shield = deflector();
        assert!((shield.full_recharge_time() - 11.0).abs() < f64::EPSILON);
        assert!((shield.efficiency_rating() - 20.0).abs() < f64::EPSILON);
        assert!(!shield.is_none());
    }

    #[test]
    fn test_shield_edge_cases() {
        let mut shield = deflector();
        shield.recharge_rate = 0;
        shield.tonnage = 0.0;
        assert!(shield.full_recharge_time().is_infinite());
        assert!(shield.efficiency_rating().abs() < f64::EPSILON);

        shield.name = NO_SHIELD.to_string();
        assert!(shield.is_none());
        assert_eq!(shield.to_string(), "No Shield");
    }

    #[test]
    fn test_weapon_parse() {
        let weapon: Weapon = toml::from_str(
            r#"
name = "SRM 4"
type = "missile"
tonnage = 2.0
heat = 3.0
damage = 2
optimal_range = 3
max_range = 9
recycle_time = 4.0
shots_per_salvo = 4
"#,
        )
        .unwrap();
        assert_eq!(weapon.weapon_type, WeaponType::Missile);
        assert_eq!(weapon.salvo_damage(), 8);
        assert_eq!(weapon.accuracy_penalty, 0);
        assert!(weapon.to_string().starts_with("SRM 4 [Missile]"));

        let mut swarm = weapon.clone();
        swarm.damage = i32::MAX / 2;
        swarm.shots_per_salvo = u32::MAX;
        assert_eq!(swarm.salvo_damage(), i32::MAX);
    }
}
