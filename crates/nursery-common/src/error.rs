//! Error types for the nursery crates.
//!
//! The lifecycle state machine itself never fails: out-of-range values are
//! clamped and actions on dead plants are ignored. These errors only surface
//! at the collaborator boundary (registry lookups, parsing, construction).

use thiserror::Error;

use crate::ids::PlantId;

/// Top-level error type for nursery operations.
#[derive(Debug, Error)]
pub enum NurseryError {
    /// No plant with this ID is registered.
    #[error("Plant not found: {0}")]
    PlantNotFound(PlantId),

    /// Season name did not match any known season.
    #[error("Unknown season: {0}")]
    UnknownSeason(String),

    /// Treatment name did not match any known treatment.
    #[error("Unknown treatment: {0}")]
    UnknownTreatment(String),

    /// Care strategy was built with a non-positive frequency.
    #[error("Invalid care frequency for {field}: {value} (must be positive)")]
    InvalidCareFrequency {
        /// Which frequency was rejected
        field: &'static str,
        /// The rejected value
        value: i32,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for nursery operations.
pub type NurseryResult<T> = Result<T, NurseryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NurseryError::PlantNotFound(PlantId::from_raw(3));
        assert_eq!(err.to_string(), "Plant not found: PLANT-3");

        let err = NurseryError::InvalidCareFrequency {
            field: "water_frequency",
            value: 0,
        };
        assert!(err.to_string().contains("water_frequency"));
    }

    #[test]
    fn test_io_error_conversion() {
        fn open() -> NurseryResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(NurseryError::Io(_))));
    }
}
