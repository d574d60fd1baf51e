//! # Nursery Common
//!
//! Shared types for the nursery lifecycle simulation.
//!
//! This crate provides the foundational types used by the other crates:
//! - ID types (PlantId, ObserverId) and the injected PlantId generator
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_id_generation() {
        let mut ids = PlantIdGenerator::new();
        let id1 = ids.next_id();
        let id2 = ids.next_id();
        assert_ne!(id1, id2);
        assert_eq!(id2.to_string(), "PLANT-2");
    }

    #[test]
    fn test_observer_id_roundtrip() {
        assert_eq!(ObserverId::new(5).raw(), 5);
    }
}
