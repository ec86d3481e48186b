//! Armor allocation - per-section tonnage limits derived from the chassis armor budget

mod allocation;
mod policy;

pub use allocation::{AllocationStatus, AllocationSummary};
pub use policy::{ArmorAllocationPolicy, ARMOR_STEP};
