//! Error types and handling
//!
//! This module contains the error types surfaced by inventory operations. Lookup
//! misses are not errors: operations return their input unchanged instead.

use crate::engine::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur while editing the inventory
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No free room number remains in the floor's two-digit range
    #[error("No free room number on floor {floor_num} (limit {max_rooms_per_floor} rooms per floor)")]
    NumberingExhausted {
        /// Floor being allocated on
        floor_num: u32,
        /// Highest suffix the floor may use
        max_rooms_per_floor: u32,
    },

    /// Requested room number is already held by another container or room type
    #[error("Room number {0} is already in use")]
    RoomNumberInUse(String),

    /// Room number does not parse as a number
    #[error("Invalid room number: {0:?}")]
    InvalidRoomNumber(String),

    /// Price is negative or not finite
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Layout failed the save check
    #[error("Save refused: {0}")]
    SaveRefused(#[from] ValidationError),

    /// Configuration problem
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl InventoryError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Check if the caller can keep editing after this error
    ///
    /// Refusals leave the previous snapshot untouched, so the session stays usable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            InventoryError::NumberingExhausted { .. } => true,
            InventoryError::RoomNumberInUse(_) => true,
            InventoryError::InvalidRoomNumber(_) => true,
            InventoryError::InvalidPrice(_) => true,
            InventoryError::SaveRefused(_) => true,
            InventoryError::ConfigurationError(_) => false,
            InventoryError::IoError(_) => false,
            InventoryError::SerializationError(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            InventoryError::NumberingExhausted { .. } => "Numbering",
            InventoryError::RoomNumberInUse(_) => "Numbering",
            InventoryError::InvalidRoomNumber(_) => "Validation",
            InventoryError::InvalidPrice(_) => "Validation",
            InventoryError::SaveRefused(_) => "Validation",
            InventoryError::ConfigurationError(_) => "Configuration",
            InventoryError::IoError(_) => "IO",
            InventoryError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InventoryError::NumberingExhausted { floor_num: 3, max_rooms_per_floor: 99 };
        assert_eq!(err.to_string(), "No free room number on floor 3 (limit 99 rooms per floor)");

        let err = InventoryError::RoomNumberInUse("301".to_string());
        assert_eq!(err.to_string(), "Room number 301 is already in use");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            InventoryError::NumberingExhausted { floor_num: 1, max_rooms_per_floor: 99 }.category(),
            "Numbering"
        );
        assert_eq!(InventoryError::InvalidPrice(-1.0).category(), "Validation");
        assert_eq!(InventoryError::configuration_error("bad").category(), "Configuration");
    }

    #[test]
    fn test_recoverability() {
        assert!(InventoryError::RoomNumberInUse("301".into()).is_recoverable());
        assert!(!InventoryError::configuration_error("bad").is_recoverable());

        let refused: InventoryError = ValidationError::EmptyRoomType("suite".into()).into();
        assert!(refused.is_recoverable());
        assert_eq!(refused.to_string(), "Save refused: Room type \"suite\" has no rooms assigned");
    }

    #[test]
    fn test_from_serde_error() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: InventoryError = parse.unwrap_err().into();
        assert_eq!(err.category(), "Serialization");
    }
}
