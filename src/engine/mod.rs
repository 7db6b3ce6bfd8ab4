//! Inventory synchronization engine
//!
//! Pure transformations from (snapshot, edit) to a new snapshot. Nothing here
//! holds state between calls; the caller keeps the current [`Inventory`] and an
//! optional [`FloorUndoBuffer`], and replaces them with each result.
//!
//! # Overview
//!
//! - **RoomNumberAllocator**: next free, floor-prefixed room number
//! - **Synchronizer**: container edits propagated into room type lists
//! - **Mutations**: add/remove rooms and floors, layout generation
//! - **Undo**: single-slot floor removal undo
//! - **Validation**: save refusals and invariant reports
//!
//! Edits to the same snapshot must be applied one after another; applying two
//! edits to one snapshot concurrently can hand out the same room number twice.
//!
//! # Usage Example
//!
//! ```rust
//! use hotel_room_inventory::engine::*;
//! use hotel_room_inventory::inventory::{Floor, Inventory, RoomType};
//!
//! let allocator = RoomNumberAllocator::new();
//! let mut inventory = Inventory::new(
//!     vec![RoomType::new("standard", 120.0), RoomType::new("deluxe", 180.0)],
//!     vec![Floor::new(3)],
//! );
//!
//! inventory = add_room_to_floor(&inventory, &allocator, 3)?;
//! let id = inventory.floors[0].containers[0].container_id.clone();
//! inventory = set_container_room_type(&inventory, &allocator, 3, &id, "deluxe")?;
//!
//! assert_eq!(inventory.room_types[1].room_numbers, vec!["301"]);
//! assert!(check_consistency(&inventory).is_empty());
//! # Ok::<(), InventoryError>(())
//! ```
//!
//! [`Inventory`]: crate::inventory::Inventory

pub mod allocator;
pub mod error;
pub mod mutations;
pub mod synchronizer;
pub mod undo;
pub mod validation;

// Re-export all public types for convenience
pub use allocator::RoomNumberAllocator;
pub use error::{InventoryError, InventoryResult};
pub use mutations::{
    add_floor, add_room_to_floor, generate_initial_layout, plan_room_numbers,
    rebuild_floors_from_room_types, remove_container, remove_floor, total_rooms, FloorRemoval,
};
pub use synchronizer::{
    rebuild_room_types_from_containers, resynchronize, set_container_active,
    set_container_price, set_container_room_number, set_container_room_type,
};
pub use undo::{undo_remove_floor, FloorSnapshot, FloorUndoBuffer, UndoOutcome};
pub use validation::{check_consistency, validate_for_save, ConsistencyViolation, ValidationError};
