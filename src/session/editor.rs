//! Editing session
//!
//! [`EditorSession`] owns the state a front end keeps between edits: the
//! current inventory snapshot, the floor removal undo slot and the room number
//! allocator. Each method runs one engine operation and, on success, replaces
//! the snapshot with the result. A refused edit leaves the snapshot as it was.

use crate::{edit_span, inventory_event};
use crate::engine::{
    self, check_consistency, undo_remove_floor, validate_for_save, ConsistencyViolation,
    FloorUndoBuffer, InventoryResult, RoomNumberAllocator, UndoOutcome, ValidationError,
};
use crate::inventory::Inventory;
use crate::session::statistics::InventorySummary;
use crate::types::{ContainerId, InventoryConfig};
use std::path::Path;
use tracing::{info, warn};

/// Caller-held editing state
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    inventory: Inventory,
    undo: FloorUndoBuffer,
    allocator: RoomNumberAllocator,
}

impl EditorSession {
    /// Start from an empty inventory
    pub fn new(allocator: RoomNumberAllocator) -> Self {
        Self { inventory: Inventory::default(), undo: FloorUndoBuffer::new(), allocator }
    }

    /// Start from a loaded inventory
    ///
    /// The snapshot is normalized and room type lists are resynchronized from
    /// the floor grid, so stored `stock` values are never trusted.
    pub fn from_inventory(inventory: &Inventory, allocator: RoomNumberAllocator) -> Self {
        let _span = edit_span!("load", floors = inventory.floors.len()).entered();
        let inventory = engine::resynchronize(inventory);
        let violations = check_consistency(&inventory);
        if !violations.is_empty() {
            inventory_event!(
                warn,
                "Loaded layout is inconsistent after resynchronization",
                violations = violations.len(),
            );
        }
        Self { inventory, undo: FloorUndoBuffer::new(), allocator }
    }

    /// Plan room numbers from the configured template and generate the layout
    pub fn from_config(config: &InventoryConfig) -> InventoryResult<Self> {
        let _span = edit_span!("generate", hotel = config.hotel_name.as_str()).entered();
        let allocator = config.allocator();
        let planned = engine::plan_room_numbers(&config.room_types, &allocator)?;
        let inventory = engine::generate_initial_layout(&config.floors, &planned);
        info!(total_rooms = inventory.total_rooms(), "Session started from configuration");
        Ok(Self { inventory, undo: FloorUndoBuffer::new(), allocator })
    }

    /// Load a saved inventory file
    pub fn load<P: AsRef<Path>>(path: P, allocator: RoomNumberAllocator) -> InventoryResult<Self> {
        let inventory = Inventory::load_from_file(path)?;
        Ok(Self::from_inventory(&inventory, allocator))
    }

    /// Current snapshot
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Consume the session, returning the current snapshot
    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    /// Allocator used for new room numbers
    pub fn allocator(&self) -> &RoomNumberAllocator {
        &self.allocator
    }

    /// Whether a floor removal can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Total sellable rooms
    pub fn total_rooms(&self) -> usize {
        engine::total_rooms(&self.inventory.room_types)
    }

    fn apply(&mut self, result: InventoryResult<Inventory>) -> InventoryResult<()> {
        match result {
            Ok(next) => {
                self.inventory = next;
                Ok(())
            }
            Err(e) => {
                warn!(category = e.category(), error = %e, "Edit refused");
                Err(e)
            }
        }
    }

    /// Bind a container to a room type by name
    pub fn set_room_type(
        &mut self,
        floor_num: u32,
        container_id: &ContainerId,
        room_info: &str,
    ) -> InventoryResult<()> {
        let _span = edit_span!("set_room_type", floor = floor_num, room_type = room_info).entered();
        let result = engine::set_container_room_type(
            &self.inventory,
            &self.allocator,
            floor_num,
            container_id,
            room_info,
        );
        self.apply(result)
    }

    /// Renumber a container
    pub fn set_room_number(
        &mut self,
        floor_num: u32,
        container_id: &ContainerId,
        room_number: &str,
    ) -> InventoryResult<()> {
        let _span = edit_span!("set_room_number", floor = floor_num, room_number = room_number).entered();
        let result = engine::set_container_room_number(
            &self.inventory,
            &self.allocator,
            floor_num,
            container_id,
            room_number,
        );
        self.apply(result)
    }

    /// Override a container's price
    pub fn set_price(&mut self, floor_num: u32, container_id: &ContainerId, price: f64) -> InventoryResult<()> {
        let _span = edit_span!("set_price", floor = floor_num, price = price).entered();
        let result = engine::set_container_price(&self.inventory, floor_num, container_id, price);
        self.apply(result)
    }

    /// Activate or deactivate a container
    pub fn set_active(&mut self, floor_num: u32, container_id: &ContainerId, active: bool) -> InventoryResult<()> {
        let _span = edit_span!("set_active", floor = floor_num, active = active).entered();
        let result =
            engine::set_container_active(&self.inventory, &self.allocator, floor_num, container_id, active);
        self.apply(result)
    }

    /// Add an empty floor
    pub fn add_floor(&mut self, floor_num: u32) {
        let _span = edit_span!("add_floor", floor = floor_num).entered();
        self.inventory = engine::add_floor(&self.inventory, floor_num);
    }

    /// Add one room to a floor
    pub fn add_room(&mut self, floor_num: u32) -> InventoryResult<()> {
        let _span = edit_span!("add_room", floor = floor_num).entered();
        let result = engine::add_room_to_floor(&self.inventory, &self.allocator, floor_num);
        self.apply(result)
    }

    /// Delete a container
    pub fn remove_container(&mut self, floor_num: u32, container_id: &ContainerId) {
        let _span = edit_span!("remove_container", floor = floor_num).entered();
        self.inventory = engine::remove_container(&self.inventory, floor_num, container_id);
    }

    /// Remove a floor, keeping it in the undo slot; returns whether a floor was removed
    pub fn remove_floor(&mut self, floor_num: u32) -> bool {
        let _span = edit_span!("remove_floor", floor = floor_num).entered();
        let removal = engine::remove_floor(&self.inventory, floor_num);
        self.inventory = removal.inventory;
        match removal.snapshot {
            Some(snapshot) => {
                self.undo.record(snapshot);
                true
            }
            None => false,
        }
    }

    /// Undo the most recent floor removal; returns the restored floor number
    pub fn undo_remove_floor(&mut self) -> Option<u32> {
        let _span = edit_span!("undo_remove_floor").entered();
        match undo_remove_floor(&mut self.undo, &self.inventory) {
            UndoOutcome::Restored { inventory, floor_num } => {
                self.inventory = inventory;
                Some(floor_num)
            }
            UndoOutcome::NothingToUndo => None,
        }
    }

    /// Regenerate the floor grid from room type lists
    ///
    /// Only floors present in the snapshot are regenerated. A floor held in the
    /// undo slot is not one of them, so the slot is kept and can still be restored.
    pub fn rebuild_floors(&mut self) {
        let _span = edit_span!("rebuild_floors").entered();
        self.inventory = engine::rebuild_floors_from_room_types(&self.inventory);
    }

    /// Replace the layout with one generated for `floor_numbers` from the current room types
    pub fn generate_layout(&mut self, floor_numbers: &[u32]) {
        let _span = edit_span!("generate_layout", floors = floor_numbers.len()).entered();
        self.inventory = engine::generate_initial_layout(floor_numbers, &self.inventory.room_types);
        self.undo.clear();
    }

    /// Summary of the current snapshot
    pub fn summary(&self) -> InventorySummary {
        InventorySummary::from_inventory(&self.inventory)
    }

    /// Save check for the current snapshot
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_for_save(&self.inventory)
    }

    /// Invariant report for the current snapshot
    pub fn check(&self) -> Vec<ConsistencyViolation> {
        check_consistency(&self.inventory)
    }

    /// Run the save check, then write the snapshot as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> InventoryResult<()> {
        self.validate()?;
        self.inventory.save_to_file(path.as_ref())?;
        info!(path = %path.as_ref().display(), "Inventory saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InventoryError;
    use crate::inventory::{Container, Floor, RoomType};

    fn first_id(session: &EditorSession, floor_num: u32) -> ContainerId {
        session.inventory().get_floor(floor_num).unwrap().containers[0].container_id.clone()
    }

    #[test]
    fn test_from_default_config() {
        let session = EditorSession::from_config(&InventoryConfig::default()).unwrap();
        let inventory = session.inventory();

        assert_eq!(inventory.floor_numbers(), vec![2, 3, 4]);
        assert_eq!(inventory.room_types[0].room_numbers, vec!["201", "202", "203", "204", "301", "302", "303"]);
        assert_eq!(inventory.room_types[1].room_numbers, vec!["304", "305", "401", "402", "403"]);
        assert_eq!(inventory.room_types[2].room_numbers, vec!["410", "411"]);
        assert_eq!(session.total_rooms(), 14);
        assert!(session.check().is_empty());
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_from_inventory_recomputes_stock() {
        let mut standard = RoomType::new("standard", 100.0);
        standard.stock = 40;
        let inventory = Inventory::new(
            vec![standard],
            vec![Floor::with_containers(3, vec![Container::new(3, "standard", "301", 100.0)])],
        );

        let session = EditorSession::from_inventory(&inventory, RoomNumberAllocator::new());
        assert_eq!(session.inventory().room_types[0].room_numbers, vec!["301"]);
        assert_eq!(session.total_rooms(), 1);
    }

    #[test]
    fn test_refused_edit_keeps_snapshot() {
        let mut session = EditorSession::from_config(&InventoryConfig::default()).unwrap();
        let before = session.inventory().clone();
        let id = first_id(&session, 2);

        let err = session.set_room_number(2, &id, "202").unwrap_err();
        assert!(matches!(err, InventoryError::RoomNumberInUse(_)));
        assert_eq!(session.inventory(), &before);

        let err = session.set_price(2, &id, -1.0).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidPrice(_)));
        assert_eq!(session.inventory(), &before);
    }

    #[test]
    fn test_remove_and_undo_floor() {
        let mut session = EditorSession::from_config(&InventoryConfig::default()).unwrap();
        assert!(!session.can_undo());

        assert!(session.remove_floor(4));
        assert!(session.can_undo());
        assert_eq!(session.total_rooms(), 9);
        assert!(session.inventory().room_types[2].room_numbers.is_empty());

        assert_eq!(session.undo_remove_floor(), Some(4));
        assert_eq!(session.total_rooms(), 14);
        assert_eq!(session.undo_remove_floor(), None);
        assert!(session.check().is_empty());

        assert!(!session.remove_floor(9));
    }

    #[test]
    fn test_undo_survives_floor_rebuild() {
        let mut session = EditorSession::from_config(&InventoryConfig::default()).unwrap();
        assert!(session.remove_floor(4));

        session.rebuild_floors();
        assert!(session.can_undo());
        assert_eq!(session.inventory().floor_numbers(), vec![2, 3]);

        assert_eq!(session.undo_remove_floor(), Some(4));
        assert_eq!(session.inventory().floor_numbers(), vec![2, 3, 4]);
        assert_eq!(session.total_rooms(), 14);
        assert!(session.check().is_empty());
    }

    #[test]
    fn test_generate_layout_clears_undo() {
        let mut session = EditorSession::from_config(&InventoryConfig::default()).unwrap();
        assert!(session.remove_floor(4));

        session.generate_layout(&[2, 3]);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_edit_sequence_stays_consistent() {
        let mut session = EditorSession::from_config(&InventoryConfig::default()).unwrap();

        session.add_floor(5);
        session.add_room(5).unwrap();
        let id = first_id(&session, 5);
        assert_eq!(session.inventory().get_floor(5).unwrap().containers[0].room_number, "501");

        session.set_room_type(5, &id, "suite").unwrap();
        let id = first_id(&session, 5);
        session.set_active(5, &id, false).unwrap();
        assert!(!session.inventory().room_types[2].contains_room_number("501"));

        let id = first_id(&session, 5);
        session.set_active(5, &id, true).unwrap();
        assert!(session.inventory().room_types[2].contains_room_number("501"));

        let id = first_id(&session, 5);
        session.remove_container(5, &id);
        assert_eq!(session.total_rooms(), 14);
        assert!(session.check().is_empty());
    }

    #[test]
    fn test_save_refuses_empty_room_type() {
        let mut session = EditorSession::from_config(&InventoryConfig::default()).unwrap();
        session.remove_floor(4);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let err = session.save(&path).unwrap_err();
        assert!(matches!(err, InventoryError::SaveRefused(ValidationError::EmptyRoomType(_))));
        assert!(!path.exists());

        session.undo_remove_floor();
        session.save(&path).unwrap();
        let loaded = EditorSession::load(&path, RoomNumberAllocator::new()).unwrap();
        assert_eq!(loaded.inventory(), session.inventory());
    }
}
