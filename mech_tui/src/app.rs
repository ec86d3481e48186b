//! Application state

use mech_core::{
    catalog::NO_SHIELD, session::EventLogHandle, BuilderConstants, BuildSession, Catalog,
    CatalogProvider, Command, EventLog, LoadoutAccountant, MechBuild, MechError, SectionFactory,
    SectionId, Weapon,
};
use tracing::{info, warn};

/// Damage amount change per key press
pub const DAMAGE_STEP: i32 = 5;
/// Damage amount selected at startup
pub const DEFAULT_DAMAGE: i32 = 10;
/// Lines kept in the damage log
const DAMAGE_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Sections,
    Armor,
    Weapons,
    Damage,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Sections, Tab::Armor, Tab::Weapons, Tab::Damage, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Sections => "Sections",
            Tab::Armor => "Armor",
            Tab::Weapons => "Weapons",
            Tab::Damage => "Damage",
            Tab::Help => "Help",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub catalog: Catalog,
    pub factory: SectionFactory,
    pub session: BuildSession,
    pub damage_log: EventLogHandle,
    pub chassis_index: Option<usize>,
    pub selected_section: usize,
    pub selected_weapon: usize,
    pub damage_amount: i32,
    pub status: Option<String>,
    previous_tab: Tab,
}

impl App {
    /// Start with the first catalog chassis, or the default layout when the
    /// catalog has none
    pub fn new(catalog: Catalog, constants: BuilderConstants) -> Result<Self, MechError> {
        let factory = SectionFactory::new(constants);
        let accountant = LoadoutAccountant::new(factory.constants().armor.near_limit_ratio);

        let (build, chassis_index) = match catalog.chassis.first() {
            Some(chassis) => (MechBuild::from_catalog(&catalog, &factory, &chassis.name)?, Some(0)),
            None => (MechBuild::legacy(&factory)?, None),
        };

        let mut session = BuildSession::new(build, accountant);
        let (log, damage_log) = EventLog::new(DAMAGE_LOG_CAPACITY);
        session.add_observer(Box::new(log.damage_only()));

        Ok(App {
            current_tab: Tab::Sections,
            catalog,
            factory,
            session,
            damage_log,
            chassis_index,
            selected_section: 0,
            selected_weapon: 0,
            damage_amount: DEFAULT_DAMAGE,
            status: None,
            previous_tab: Tab::Sections,
        })
    }

    pub fn build(&self) -> &MechBuild {
        self.session.build()
    }

    pub fn current_section(&self) -> SectionId {
        let sections = SectionId::all();
        sections[self.selected_section.min(sections.len() - 1)]
    }

    pub fn current_weapon(&self) -> Option<&Weapon> {
        self.catalog.weapons.get(self.selected_weapon)
    }

    pub fn armor_step(&self) -> f64 {
        self.factory.constants().armor.step
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn toggle_help(&mut self) {
        if self.current_tab == Tab::Help {
            self.current_tab = self.previous_tab;
        } else {
            self.previous_tab = self.current_tab;
            self.current_tab = Tab::Help;
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Weapons => {
                self.selected_weapon = self.selected_weapon.saturating_sub(1);
            }
            Tab::Help => {}
            _ => {
                self.selected_section = self.selected_section.saturating_sub(1);
            }
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Weapons => {
                if self.selected_weapon + 1 < self.catalog.weapons.len() {
                    self.selected_weapon += 1;
                }
            }
            Tab::Help => {}
            _ => {
                if self.selected_section + 1 < SectionId::all().len() {
                    self.selected_section += 1;
                }
            }
        }
    }

    pub fn on_left(&mut self) {
        match self.current_tab {
            Tab::Armor => self.adjust_armor(-self.armor_step()),
            Tab::Damage => self.damage_amount = (self.damage_amount - DAMAGE_STEP).max(0),
            Tab::Weapons => self.selected_section = self.selected_section.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_right(&mut self) {
        match self.current_tab {
            Tab::Armor => self.adjust_armor(self.armor_step()),
            Tab::Damage => self.damage_amount = self.damage_amount.saturating_add(DAMAGE_STEP),
            Tab::Weapons => {
                if self.selected_section + 1 < SectionId::all().len() {
                    self.selected_section += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Weapons => self.place_selected_weapon(),
            Tab::Damage => self.apply_damage(),
            _ => {}
        }
    }

    // === Build actions ===

    fn run(&mut self, command: Command) {
        match self.session.dispatch(command) {
            Ok(events) => {
                self.status = events.last().map(|e| e.to_string());
            }
            Err(err) => {
                warn!(%err, "command failed");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn adjust_armor(&mut self, delta: f64) {
        let section = self.current_section();
        self.run(Command::AdjustArmor { section, delta });
    }

    pub fn place_selected_weapon(&mut self) {
        let Some(weapon) = self.current_weapon().cloned() else {
            self.status = Some("Catalog has no weapons".to_string());
            return;
        };
        let section = self.current_section();
        self.run(Command::PlaceWeapon { section, weapon });
    }

    pub fn remove_last_weapon(&mut self) {
        let section = self.current_section();
        let mounted = self.build().weapons_in(section).len();
        if mounted == 0 {
            self.status = Some(format!("No weapons mounted in {}", section));
            return;
        }
        self.run(Command::RemoveWeapon {
            section,
            index: mounted - 1,
        });
    }

    pub fn apply_damage(&mut self) {
        let section = self.current_section();
        let amount = self.damage_amount;
        self.run(Command::ApplyDamage { section, amount });
    }

    pub fn field_repair(&mut self) {
        let section = self.current_section();
        let amount = self.damage_amount;
        self.run(Command::FieldRepair { section, amount });
    }

    pub fn reset_damage(&mut self) {
        self.run(Command::ResetDamage);
    }

    /// Step through shields, wrapping back to none
    pub fn cycle_shield(&mut self) {
        let shields: Vec<_> = self.catalog.shields.iter().filter(|s| !s.is_none()).collect();
        let next = match self.build().shield() {
            None => shields.first(),
            Some(current) => shields
                .iter()
                .position(|s| s.name == current.name)
                .and_then(|i| shields.get(i + 1)),
        };
        let shield = next.map(|s| (*s).clone());
        self.run(Command::SelectShield { shield });
    }

    /// Step through armor types, wrapping back to the base rating
    pub fn cycle_armor_type(&mut self) {
        let types = &self.catalog.armor_types;
        let next = match self.build().armor_type() {
            None => types.first(),
            Some(current) => types
                .iter()
                .position(|a| a.name == current.name)
                .and_then(|i| types.get(i + 1)),
        };
        let armor_type = next.cloned();
        self.run(Command::SelectArmorType { armor_type });
    }

    /// Rebuild from the next chassis in the catalog
    pub fn cycle_chassis(&mut self) {
        let count = self.catalog.chassis.len();
        let Some(current) = self.chassis_index else {
            self.status = Some("Catalog has no chassis".to_string());
            return;
        };
        let next = (current + 1) % count;
        let name = self.catalog.chassis[next].name.clone();

        match MechBuild::from_catalog(&self.catalog, &self.factory, &name) {
            Ok(build) => {
                self.session.replace_build(build);
                self.chassis_index = Some(next);
                self.damage_log.clear();
                self.status = Some(format!("Switched to {}", name));
            }
            Err(err) => {
                warn!(%err, chassis = %name, "chassis rebuild failed");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Write the build as JSON to the log
    pub fn dump_snapshot(&mut self) {
        let summary = self.build().summary(self.session.accountant());
        match serde_json::to_string(&summary) {
            Ok(json) => {
                info!(build = %summary.name, snapshot = %json, "build snapshot");
                self.status = Some("Snapshot written to log".to_string());
            }
            Err(err) => {
                warn!(%err, "snapshot serialization failed");
                self.status = Some(format!("Snapshot failed: {}", err));
            }
        }
    }

    pub fn shield_label(&self) -> String {
        match self.build().shield() {
            Some(shield) => shield.to_string(),
            None => self
                .catalog
                .shield(NO_SHIELD)
                .map(|s| s.to_string())
                .unwrap_or_else(|_| "No Shield".to_string()),
        }
    }
}
