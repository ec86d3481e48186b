//! mech_core - Section capacity and damage tracking for mech loadouts
//!
//! This library provides:
//! - MechSection: Per-section slots, hardpoints, armor and damage state
//! - ArmorAllocationPolicy: Percentage caps on section armor
//! - SectionFactory: The eight sections of a chassis from catalog data
//! - LoadoutAccountant: Tonnage totals and chassis limit checks
//! - BuildSession: Command dispatch with observers over a MechBuild

pub mod armor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod factory;
pub mod loadout;
pub mod prelude;
pub mod section;
pub mod session;
pub mod types;

// Re-export core types for convenience
pub use armor::{AllocationStatus, AllocationSummary, ArmorAllocationPolicy, ARMOR_STEP};
pub use catalog::{
    default_catalog, ArmorType, Catalog, CatalogProvider, Hardpoints, MechChassis, SectionSlots,
    Shield, SlotConfiguration, Weapon,
};
pub use config::{BuilderConstants, ConfigError};
pub use error::MechError;
pub use factory::{SectionFactory, SectionMap};
pub use loadout::{LimitWarning, LoadoutAccountant, TonnageTotals};
pub use section::{ArmorOverflowRule, DamageReport, MechSection, SectionSnapshot, SlotCapacityTable};
pub use session::{BuildEvent, BuildObserver, BuildSession, BuildSummary, Command, EventLog, MechBuild};
pub use types::{HardpointType, SectionClass, SectionId, WeaponType};
