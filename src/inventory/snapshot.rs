//! Inventory snapshots
//!
//! An [`Inventory`] pairs the room type collection with the floor collection. Every
//! engine operation takes a snapshot by reference and returns a new one; nothing
//! is shared or mutated between versions.

use crate::engine::error::InventoryResult;
use crate::inventory::catalog::RoomTypeCatalog;
use crate::inventory::container::Container;
use crate::inventory::floor::Floor;
use crate::inventory::room_number::room_number_value;
use crate::inventory::room_type::RoomType;
use crate::types::ContainerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// The room type and floor collections of one hotel layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Room type collection
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    /// Floor collection, ascending by floor number
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Inventory {
    /// Create a snapshot from both collections
    pub fn new(room_types: Vec<RoomType>, floors: Vec<Floor>) -> Self {
        Self { room_types, floors }
    }

    /// Build the normalized room type lookup for this snapshot
    pub fn catalog(&self) -> RoomTypeCatalog {
        RoomTypeCatalog::build(&self.room_types)
    }

    /// Sum of `stock` across every room type
    pub fn total_rooms(&self) -> usize {
        self.room_types.iter().map(|t| t.stock).sum()
    }

    /// Floor numbers in collection order
    pub fn floor_numbers(&self) -> Vec<u32> {
        self.floors.iter().map(|f| f.floor_num).collect()
    }

    /// Position of floor `floor_num`
    pub fn floor_index(&self, floor_num: u32) -> Option<usize> {
        self.floors.iter().position(|f| f.floor_num == floor_num)
    }

    /// Borrow floor `floor_num`
    pub fn get_floor(&self, floor_num: u32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.floor_num == floor_num)
    }

    /// Borrow floor `floor_num`, mutably
    pub fn get_floor_mut(&mut self, floor_num: u32) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.floor_num == floor_num)
    }

    /// Keep floors ascending by floor number
    pub fn sort_floors(&mut self) {
        self.floors.sort_by_key(|f| f.floor_num);
    }

    /// Every container with the number of the floor holding it
    pub fn containers(&self) -> impl Iterator<Item = (u32, &Container)> + '_ {
        self.floors.iter().flat_map(|f| f.containers.iter().map(move |c| (f.floor_num, c)))
    }

    /// Find a container anywhere in the building
    pub fn find_container(&self, container_id: &ContainerId) -> Option<(u32, &Container)> {
        self.containers().find(|(_, c)| &c.container_id == container_id)
    }

    /// Every numeric room number in use, on the grid or in a room type's list
    pub fn used_room_numbers(&self) -> BTreeSet<u64> {
        let on_grid = self.containers().filter_map(|(_, c)| c.room_number_value());
        let in_types = self
            .room_types
            .iter()
            .flat_map(|t| t.room_numbers.iter())
            .filter_map(|n| room_number_value(n));
        on_grid.chain(in_types).collect()
    }

    /// Sort and deduplicate every collection, recomputing stock
    ///
    /// Loaded layouts may carry unsorted or duplicated lists; this is the
    /// normalization every synchronization pass starts from.
    pub fn normalized(&self) -> Self {
        let mut next = self.clone();
        for room_type in &mut next.room_types {
            room_type.normalize();
        }
        for floor in &mut next.floors {
            floor.sort_containers();
        }
        next.sort_floors();
        next
    }

    /// Parse a saved inventory from JSON
    pub fn from_json(json: &str) -> InventoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> InventoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a saved inventory from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> InventoryResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save the inventory to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> InventoryResult<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Inventory {
        let room_types = vec![
            RoomType::new("standard", 100.0).with_room_numbers(["301", "302"]),
            RoomType::new("deluxe", 180.0).with_room_numbers(["401"]),
        ];
        let floors = vec![
            Floor::with_containers(4, vec![Container::new(4, "deluxe", "401", 180.0)]),
            Floor::with_containers(
                3,
                vec![
                    Container::new(3, "standard", "301", 100.0),
                    Container::new(3, "standard", "302", 100.0),
                ],
            ),
        ];
        Inventory::new(room_types, floors)
    }

    #[test]
    fn test_total_rooms() {
        assert_eq!(sample().total_rooms(), 3);
    }

    #[test]
    fn test_used_room_numbers_cover_grid_and_types() {
        let mut inventory = sample();
        inventory.room_types[1].insert_room_number("405");
        let used = inventory.used_room_numbers();
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec![301, 302, 401, 405]);
    }

    #[test]
    fn test_normalized_sorts_floors_and_lists() {
        let mut inventory = sample();
        inventory.room_types[0].room_numbers = vec!["302".into(), "301".into(), "302".into()];
        inventory.room_types[0].stock = 9;

        let normalized = inventory.normalized();
        assert_eq!(normalized.floor_numbers(), vec![3, 4]);
        assert_eq!(normalized.room_types[0].room_numbers, vec!["301", "302"]);
        assert_eq!(normalized.room_types[0].stock, 2);
    }

    #[test]
    fn test_find_container() {
        let inventory = sample();
        let id = inventory.floors[1].containers[1].container_id.clone();
        let (floor_num, container) = inventory.find_container(&id).unwrap();
        assert_eq!(floor_num, 3);
        assert_eq!(container.room_number, "302");
        assert!(inventory.find_container(&ContainerId::from("missing")).is_none());
    }

    #[test]
    fn test_json_shape_uses_camel_case() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"roomTypes\""));
        assert!(json.contains("\"roomInfo\""));
        assert!(json.contains("\"floorNum\""));
        assert!(json.contains("\"containerId\""));
        assert!(json.contains("\"isActive\""));

        let parsed = Inventory::from_json(&json).unwrap();
        assert_eq!(parsed.to_json_pretty().unwrap(), json);
    }
}
