//! Inventory data model
//!
//! This module holds the two independently editable collections the engine keeps
//! consistent, and the conventions both sides share.
//!
//! # Overview
//!
//! - **RoomType**: abstract category with a default price and its room numbers
//! - **Floor**: numbered level holding an ordered grid of containers
//! - **Container**: one room slot, optionally bound to a room type and number
//! - **RoomTypeCatalog**: normalized name lookup into a room type collection
//! - **Inventory**: a snapshot of both collections
//!
//! # Usage Example
//!
//! ```rust
//! use hotel_room_inventory::inventory::*;
//!
//! let standard = RoomType::new("standard", 120.0).with_room_numbers(["301", "302"]);
//! let floor = Floor::with_containers(
//!     3,
//!     vec![
//!         Container::new(3, "standard", "302", 120.0),
//!         Container::new(3, "standard", "301", 120.0),
//!     ],
//! );
//!
//! let inventory = Inventory::new(vec![standard], vec![floor]);
//! assert_eq!(inventory.total_rooms(), 2);
//! assert_eq!(inventory.floors[0].containers[0].room_number, "301");
//! ```

pub mod catalog;
pub mod container;
pub mod floor;
pub mod room_number;
pub mod room_type;
pub mod snapshot;

// Re-export all public types for convenience
pub use catalog::{normalize_room_info, RoomTypeCatalog};
pub use container::Container;
pub use floor::Floor;
pub use room_type::RoomType;
pub use snapshot::Inventory;
