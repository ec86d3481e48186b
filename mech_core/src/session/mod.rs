//! Build session - Applies commands to a build and notifies observers

mod build;
mod command;
mod observer;

pub use build::{BuildSummary, MechBuild, SectionSummary};
pub use command::{BuildEvent, Command};
pub use observer::{BuildObserver, EventLog, EventLogHandle};

use crate::armor::ArmorAllocationPolicy;
use crate::error::MechError;
use crate::loadout::{LimitWarning, LoadoutAccountant, TonnageTotals};
use crate::types::SectionId;
use tracing::debug;

/// Owns one build and routes every mutation through [`Command`]s
pub struct BuildSession {
    build: MechBuild,
    accountant: LoadoutAccountant,
    observers: Vec<Box<dyn BuildObserver>>,
}

impl BuildSession {
    pub fn new(build: MechBuild, accountant: LoadoutAccountant) -> Self {
        BuildSession {
            build,
            accountant,
            observers: Vec::new(),
        }
    }

    /// Register an observer; observers stay sorted by priority
    pub fn add_observer(&mut self, observer: Box<dyn BuildObserver>) {
        self.observers.push(observer);
        self.observers.sort_by_key(|o| o.priority());
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn build(&self) -> &MechBuild {
        &self.build
    }

    pub fn accountant(&self) -> &LoadoutAccountant {
        &self.accountant
    }

    /// Swap in a new build (chassis change). Observers are kept.
    pub fn replace_build(&mut self, build: MechBuild) -> MechBuild {
        std::mem::replace(&mut self.build, build)
    }

    pub fn totals(&self) -> TonnageTotals {
        self.build.totals(&self.accountant)
    }

    pub fn warnings(&self) -> Vec<LimitWarning> {
        self.build.warnings(&self.accountant)
    }

    /// Apply a command and notify observers of the resulting events.
    ///
    /// A rejected command leaves the build untouched and notifies nobody.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<BuildEvent>, MechError> {
        let affects_tonnage = command.affects_tonnage();
        let mut events = match self.apply(command) {
            Ok(events) => events,
            Err(err) => {
                debug!(%err, "command rejected");
                return Err(err);
            }
        };

        if affects_tonnage {
            let warnings = self.warnings();
            if warnings.iter().any(|w| w.is_violation()) {
                events.push(BuildEvent::LimitsExceeded { warnings });
            }
        }

        for event in &events {
            for observer in self.observers.iter_mut() {
                if observer.should_notify(event) {
                    observer.on_event(event, &self.build);
                }
            }
        }
        Ok(events)
    }

    fn apply(&mut self, command: Command) -> Result<Vec<BuildEvent>, MechError> {
        let event = match command {
            Command::AdjustArmor { section, delta } => {
                let current = self.build.section(section)?.armor_tons();
                let tons = self.clamp_armor(section, current, delta);
                self.set_armor(section, tons)?
            }
            Command::SetArmor { section, tons } => {
                let tons = self.clamp_armor(section, tons, 0.0);
                self.set_armor(section, tons)?
            }
            Command::PlaceWeapon { section, weapon } => {
                let name = weapon.name.clone();
                self.build.place_weapon(section, weapon)?;
                BuildEvent::WeaponPlaced {
                    section,
                    weapon: name,
                }
            }
            Command::RemoveWeapon { section, index } => {
                let weapon = self.build.remove_weapon(section, index)?;
                BuildEvent::WeaponRemoved {
                    section,
                    weapon: weapon.name,
                }
            }
            Command::SetUsedSlots { section, used } => {
                let target = self.build.section_mut(section)?;
                target.set_used_slots(used);
                BuildEvent::UsedSlotsChanged {
                    section,
                    used: target.used_slots(),
                }
            }
            Command::ApplyDamage { section, amount } => {
                let report = self
                    .build
                    .section_mut(section)?
                    .apply_damage_with_report(amount)?;
                BuildEvent::Damaged(report)
            }
            Command::FieldRepair { section, amount } => {
                let target = self.build.section_mut(section)?;
                target.apply_field_repair(amount)?;
                BuildEvent::FieldRepaired {
                    section,
                    amount,
                    field_repair_armor: target.field_repair_armor(),
                }
            }
            Command::ResetDamage => {
                for id in SectionId::all() {
                    self.build.section_mut(*id)?.reset_damage();
                }
                BuildEvent::DamageReset
            }
            Command::SelectShield { shield } => {
                self.build.set_shield(shield);
                BuildEvent::ShieldChanged {
                    shield: self.build.shield().map(|s| s.name.clone()),
                }
            }
            Command::SelectArmorType { armor_type } => {
                self.build.set_armor_type(armor_type)?;
                BuildEvent::ArmorTypeChanged {
                    armor_type: self.build.armor_type().map(|a| a.name.clone()),
                }
            }
        };
        Ok(vec![event])
    }

    /// Clamp `current + delta` with the allocation policy. Non-finite
    /// requests pass through so the section rejects them.
    fn clamp_armor(&self, section: SectionId, current: f64, delta: f64) -> f64 {
        let requested = current + delta;
        if !requested.is_finite() {
            return requested;
        }
        match self.build.armor_budget() {
            Some(budget) => ArmorAllocationPolicy::adjust(current, delta, section, budget),
            None => requested.max(0.0),
        }
    }

    fn set_armor(&mut self, section: SectionId, tons: f64) -> Result<BuildEvent, MechError> {
        let target = self.build.section_mut(section)?;
        target.set_armor_tons(tons)?;
        Ok(BuildEvent::ArmorChanged {
            section,
            tons: target.armor_tons(),
        })
    }
}
