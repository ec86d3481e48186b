//! Prelude module for convenient imports
//!
//! ```rust
//! use mech_core::prelude::*;
//! ```

// Core types
pub use crate::error::MechError;
pub use crate::section::{DamageReport, MechSection};
pub use crate::types::{HardpointType, SectionId, WeaponType};

// Armor and accounting
pub use crate::armor::{ArmorAllocationPolicy, ARMOR_STEP};
pub use crate::loadout::{LimitWarning, LoadoutAccountant};

// Building
pub use crate::factory::SectionFactory;
pub use crate::session::{BuildEvent, BuildObserver, BuildSession, Command, MechBuild};

// Catalog and config
pub use crate::catalog::{default_catalog, Catalog, CatalogProvider};
pub use crate::config::BuilderConstants;
