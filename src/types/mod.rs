//! Core types for the room inventory
//!
//! # Overview
//!
//! - **Identifiers**: container ids derived from floor, room type and room number
//! - **Enums**: container lifecycle state and summary output formats
//! - **Configuration**: layout configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use hotel_room_inventory::types::*;
//!
//! let id = ContainerId::generate(3, "deluxe", "305");
//! assert!(id.as_str().starts_with("CTR_3_deluxe_305_"));
//!
//! assert_eq!(ContainerState::from_fields("deluxe", ""), ContainerState::Assigned);
//!
//! let config = InventoryConfig {
//!     floors: vec![5, 6],
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
