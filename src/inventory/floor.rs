//! Floors and their container grids
//!
//! A floor is keyed by its number, which is also the numeric prefix of every
//! room number allocated on it. Its containers are kept ascending by room number.

use crate::inventory::container::Container;
use crate::inventory::room_number::{compare_room_numbers, floor_base, same_room_number};
use crate::inventory::room_number::{FLOOR_MULTIPLIER, MAX_ROOMS_PER_FLOOR};
use crate::types::ContainerId;
use serde::{Deserialize, Serialize};

/// A numbered level of the building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    /// Unique floor key and room-number prefix
    pub floor_num: u32,
    /// Room slots, ascending by numeric room number
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl Floor {
    /// Create an empty floor
    pub fn new(floor_num: u32) -> Self {
        Self { floor_num, containers: Vec::new() }
    }

    /// Create a floor from containers, sorting them
    pub fn with_containers(floor_num: u32, containers: Vec<Container>) -> Self {
        let mut floor = Self { floor_num, containers };
        floor.sort_containers();
        floor
    }

    /// Sort containers ascending by numeric room number
    ///
    /// Containers without a number keep their relative order after the numbered ones.
    pub fn sort_containers(&mut self) {
        self.containers.sort_by(|a, b| {
            match (a.has_room_number(), b.has_room_number()) {
                (true, true) => compare_room_numbers(&a.room_number, &b.room_number),
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                (false, false) => std::cmp::Ordering::Equal,
            }
        });
    }

    /// Whether containers are in ascending room-number order
    pub fn is_sorted(&self) -> bool {
        self.containers.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            match (a.has_room_number(), b.has_room_number()) {
                (true, true) => compare_room_numbers(&a.room_number, &b.room_number).is_le(),
                (false, true) => false,
                _ => true,
            }
        })
    }

    /// Find a container by id
    pub fn get_container(&self, container_id: &ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| &c.container_id == container_id)
    }

    /// Find a container by id, mutably
    pub fn get_container_mut(&mut self, container_id: &ContainerId) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| &c.container_id == container_id)
    }

    /// Remove a container by id
    pub fn remove_container(&mut self, container_id: &ContainerId) -> Option<Container> {
        let pos = self.containers.iter().position(|c| &c.container_id == container_id)?;
        Some(self.containers.remove(pos))
    }

    /// Whether any container on this floor carries `room_number`
    pub fn contains_room_number(&self, room_number: &str) -> bool {
        self.containers
            .iter()
            .any(|c| c.has_room_number() && same_room_number(&c.room_number, room_number))
    }

    /// Highest numeric room number held by an active container inside this floor's range
    pub fn highest_active_room_number(&self) -> Option<u64> {
        let low = floor_base(self.floor_num);
        let high = u64::from(self.floor_num) * FLOOR_MULTIPLIER + u64::from(MAX_ROOMS_PER_FLOOR);
        self.containers
            .iter()
            .filter(|c| c.is_active)
            .filter_map(Container::room_number_value)
            .filter(|value| (low..=high).contains(value))
            .max()
    }

    /// Room numbers of active, numbered containers
    pub fn active_room_numbers(&self) -> Vec<&str> {
        self.containers
            .iter()
            .filter(|c| c.counts_toward_inventory())
            .map(|c| c.room_number.as_str())
            .collect()
    }

    /// Number of containers on this floor
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}
