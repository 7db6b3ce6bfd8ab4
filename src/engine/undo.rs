//! Single-slot floor removal undo
//!
//! The buffer holds the most recently removed floor only. Recording a second
//! removal before undoing discards the first snapshot.

use crate::engine::synchronizer::rebuild_room_types_from_containers;
use crate::inventory::{Floor, Inventory, RoomTypeCatalog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A floor exactly as it was when removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    /// The removed floor, containers in their original order
    pub floor: Floor,
    /// When the floor was removed
    pub removed_at: DateTime<Utc>,
}

impl FloorSnapshot {
    /// Capture a floor at removal time
    pub fn capture(floor: Floor) -> Self {
        Self { floor, removed_at: Utc::now() }
    }

    /// Number of the removed floor
    pub fn floor_num(&self) -> u32 {
        self.floor.floor_num
    }
}

/// Caller-held, non-stacking undo slot for floor removal
#[derive(Debug, Clone, Default)]
pub struct FloorUndoBuffer {
    slot: Option<FloorSnapshot>,
}

impl FloorUndoBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot, returning the one it replaced
    pub fn record(&mut self, snapshot: FloorSnapshot) -> Option<FloorSnapshot> {
        let discarded = self.slot.replace(snapshot);
        if let Some(old) = &discarded {
            debug!(floor = old.floor_num(), "Discarding earlier floor snapshot");
        }
        discarded
    }

    /// Borrow the buffered snapshot
    pub fn peek(&self) -> Option<&FloorSnapshot> {
        self.slot.as_ref()
    }

    /// Remove and return the buffered snapshot
    pub fn take(&mut self) -> Option<FloorSnapshot> {
        self.slot.take()
    }

    /// Whether there is anything to undo
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Drop the buffered snapshot
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// Result of an undo request
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    /// The buffered floor was put back
    Restored {
        /// Snapshot with the floor restored and room types rebuilt
        inventory: Inventory,
        /// Number of the restored floor
        floor_num: u32,
    },
    /// The buffer was empty; nothing changed
    NothingToUndo,
}

impl UndoOutcome {
    /// Whether a floor was restored
    pub fn is_restored(&self) -> bool {
        matches!(self, UndoOutcome::Restored { .. })
    }
}

/// Put the buffered floor back and rebuild room type lists
///
/// The restored floor's containers come back verbatim. A floor re-created under
/// the same number since the removal is replaced, and the numbers it held are
/// released from their room types first.
pub fn undo_remove_floor(buffer: &mut FloorUndoBuffer, inventory: &Inventory) -> UndoOutcome {
    let Some(snapshot) = buffer.take() else {
        info!("Nothing to undo");
        return UndoOutcome::NothingToUndo;
    };

    let floor_num = snapshot.floor_num();
    let mut next = inventory.clone();

    if let Some(idx) = next.floor_index(floor_num) {
        let replaced = next.floors.remove(idx);
        let catalog = RoomTypeCatalog::build(&next.room_types);
        for container in replaced.containers.iter().filter(|c| c.has_room_number()) {
            if let Some(room_type) = catalog.get_mut(&mut next.room_types, &container.room_info) {
                room_type.remove_room_number(&container.room_number);
            }
        }
        debug!(floor = floor_num, "Replacing floor re-created since removal");
    }

    next.floors.push(snapshot.floor);
    next.sort_floors();
    let containers = next.floors.iter().flat_map(|f| f.containers.iter());
    next.room_types = rebuild_room_types_from_containers(&next.room_types, containers);

    info!(floor = floor_num, removed_at = %snapshot.removed_at, "Floor removal undone");
    UndoOutcome::Restored { inventory: next, floor_num }
}
