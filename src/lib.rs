//! Hotel Room Inventory
//!
//! Keeps two independently editable views of a hotel's sellable rooms in
//! agreement: the room type side (category, price, room numbers, stock) and the
//! floor side (an ordered grid of room containers per floor).
//!
//! # Overview
//!
//! Every edit on either side is a pure function from the current snapshot to a
//! new one. After each edit the active numbered containers and the room type
//! lists describe the same set of rooms, and no room number appears twice.
//!
//! ## Key Features
//!
//! - **Room Number Allocation**: floor-prefixed numbers (`301`, `302`, ...) that are unique hotel-wide
//! - **Bidirectional Sync**: container edits update room type lists; rebuilds go the other way
//! - **Floor Undo**: the most recent floor removal can be put back
//! - **Save Checks**: layouts with empty or duplicate room types are refused
//!
//! ## Quick Start
//!
//! ```rust
//! use hotel_room_inventory::*;
//!
//! let config = InventoryConfig::default();
//! let mut session = EditorSession::from_config(&config)?;
//! assert_eq!(session.total_rooms(), 14);
//!
//! session.remove_floor(4);
//! assert_eq!(session.total_rooms(), 9);
//! session.undo_remove_floor();
//! assert_eq!(session.total_rooms(), 14);
//! # Ok::<(), InventoryError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`inventory`]: Room types, floors, containers and room number conventions
//! - [`engine`]: Allocation, synchronization, mutations, undo and validation
//! - [`session`]: Editing session, logging and summary statistics
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Inventory  │    │   Engine    │
//! │             │    │             │    │             │
//! │ ContainerId │◄───┤ RoomType    │◄───┤ Allocator   │
//! │ Enums       │    │ Floor       │    │ Synchronizer│
//! │ Config      │    │ Container   │    │ Undo        │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              ▲
//!                                              │
//!                                       ┌─────────────┐
//!                                       │   Session   │
//!                                       │             │
//!                                       │ Editor      │
//!                                       │ Logging     │
//!                                       │ Summary     │
//!                                       └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod engine;
pub mod inventory;
pub mod session;
pub mod types;

// Core types and identifiers
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, ContainerId, ContainerState, InventoryConfig,
    OutputFormat,
};

// Data model
pub use inventory::{Container, Floor, Inventory, RoomType, RoomTypeCatalog};

// Engine
pub use engine::{
    ConsistencyViolation, FloorUndoBuffer, InventoryError, InventoryResult, RoomNumberAllocator,
    UndoOutcome, ValidationError,
};

// Session
pub use session::{EditorSession, InventorySummary, LoggingConfig};
