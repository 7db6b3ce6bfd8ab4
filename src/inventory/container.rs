//! Floor grid containers
//!
//! A container is one physical room slot on a floor. It may be bound to a room
//! type and carry a room number; its identifier is re-derived whenever the floor,
//! room type or room number it represents changes.

use crate::inventory::room_number::room_number_value;
use crate::types::{ContainerId, ContainerState};
use serde::{Deserialize, Serialize};

/// A single room slot on a floor grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Unique identifier, re-derived on floor/type/number changes
    pub container_id: ContainerId,
    /// Room type this container represents; empty means unassigned
    #[serde(default)]
    pub room_info: String,
    /// Physical room number; empty means not yet allocated
    #[serde(default)]
    pub room_number: String,
    /// Effective nightly price
    #[serde(default)]
    pub price: f64,
    /// Whether this container counts toward inventory
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Container {
    /// Create an active container bound to a room type and number
    pub fn new(
        floor_num: u32,
        room_info: impl Into<String>,
        room_number: impl Into<String>,
        price: f64,
    ) -> Self {
        let room_info = room_info.into();
        let room_number = room_number.into();
        Self {
            container_id: ContainerId::generate(floor_num, &room_info, &room_number),
            room_info,
            room_number,
            price,
            is_active: true,
        }
    }

    /// Create an active container with no room type and no number
    pub fn unassigned(floor_num: u32) -> Self {
        Self::new(floor_num, "", "", 0.0)
    }

    /// Lifecycle state derived from the current fields
    pub fn state(&self) -> ContainerState {
        ContainerState::from_fields(&self.room_info, &self.room_number)
    }

    /// Whether the container has both a room type and a room number
    pub fn is_numbered(&self) -> bool {
        self.state() == ContainerState::Numbered
    }

    /// Whether the container takes part in the room-type invariant
    pub fn counts_toward_inventory(&self) -> bool {
        self.is_active && self.is_numbered()
    }

    /// Whether a room number has been allocated
    pub fn has_room_number(&self) -> bool {
        !self.room_number.trim().is_empty()
    }

    /// Numeric value of the room number, if it parses
    pub fn room_number_value(&self) -> Option<u64> {
        room_number_value(&self.room_number)
    }

    /// Re-derive the identifier from the current fields and a fresh token
    pub fn regenerate_id(&mut self, floor_num: u32) {
        self.container_id = ContainerId::generate(floor_num, &self.room_info, &self.room_number);
    }
}
