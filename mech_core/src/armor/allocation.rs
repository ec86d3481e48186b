//! Allocation totals against the chassis armor budget

use serde::{Deserialize, Serialize};

/// Remaining budget below which an allocation counts as nearly full
const NEARLY_FULL_TONS: f64 = 1.0;

/// Coarse state of an armor allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    OverAllocated,
    NearlyFull,
    Available,
}

/// Result of validating all section allocations together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Whether the allocation fits the chassis budget
    pub valid: bool,
    pub total_allocated: f64,
    /// Budget left; negative when over-allocated
    pub remaining: f64,
}

impl AllocationSummary {
    pub fn new(total_allocated: f64, chassis_max_armor: f64) -> Self {
        AllocationSummary {
            valid: total_allocated <= chassis_max_armor,
            total_allocated,
            remaining: chassis_max_armor - total_allocated,
        }
    }

    pub fn status(&self) -> AllocationStatus {
        if self.remaining < 0.0 {
            AllocationStatus::OverAllocated
        } else if self.remaining < NEARLY_FULL_TONS {
            AllocationStatus::NearlyFull
        } else {
            AllocationStatus::Available
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert_eq!(AllocationSummary::new(10.0, 20.0).status(), AllocationStatus::Available);
        assert_eq!(AllocationSummary::new(19.5, 20.0).status(), AllocationStatus::NearlyFull);
        assert_eq!(AllocationSummary::new(20.0, 20.0).status(), AllocationStatus::NearlyFull);
        assert_eq!(AllocationSummary::new(20.25, 20.0).status(), AllocationStatus::OverAllocated);
    }

    #[test]
    fn test_exact_budget_is_valid() {
        let summary = AllocationSummary::new(20.0, 20.0);
        assert!(summary.valid);
        assert!(summary.remaining.abs() < f64::EPSILON);
    }
}
