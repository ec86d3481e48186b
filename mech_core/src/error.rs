//! Errors raised by the section model, factory and catalog lookups

use crate::types::SectionId;
use thiserror::Error;

/// Error returned by builder operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MechError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
    #[error("Slot index {index} out of range (section has {len} slots)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("No free hardpoint in {section}")]
    NoFreeHardpoint { section: SectionId },
    #[error("No free slot in {section}")]
    NoFreeSlot { section: SectionId },
}

impl MechError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        MechError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn negative(what: &str, value: impl std::fmt::Display) -> Self {
        MechError::InvalidArgument(format!("{} must not be negative (got {})", what, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = MechError::not_found("Slot configuration", "Huge");
        assert_eq!(err.to_string(), "Slot configuration not found: Huge");

        let err = MechError::IndexOutOfRange { index: 7, len: 6 };
        assert!(err.to_string().contains("7"));

        let err = MechError::NoFreeHardpoint {
            section: SectionId::LeftArm,
        };
        assert_eq!(err.to_string(), "No free hardpoint in Left Arm");

        let err = MechError::NoFreeSlot {
            section: SectionId::Head,
        };
        assert_eq!(err.to_string(), "No free slot in Head");

        let err = MechError::negative("Damage", -3);
        assert!(err.to_string().contains("-3"));
    }
}
