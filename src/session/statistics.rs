//! Inventory summary statistics

use crate::engine::total_rooms;
use crate::inventory::Inventory;
use crate::types::ContainerState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock of a single room type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeStock {
    /// Room type name as stored
    pub room_info: String,
    /// Number of sellable rooms
    pub stock: usize,
    /// Base price
    pub price: f64,
}

/// Point-in-time counts for an inventory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Sum of room type stock
    pub total_rooms: usize,
    /// Number of floors
    pub floor_count: usize,
    /// Number of containers on all floors
    pub container_count: usize,
    /// Containers with neither type nor number
    pub unassigned_containers: usize,
    /// Containers with a type but no number
    pub assigned_containers: usize,
    /// Containers with a number
    pub numbered_containers: usize,
    /// Numbered containers excluded from inventory
    pub inactive_containers: usize,
    /// Per-type stock in room type order
    pub room_types: Vec<RoomTypeStock>,
}

impl InventorySummary {
    /// Compute the summary for a snapshot
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let mut summary = Self {
            total_rooms: total_rooms(&inventory.room_types),
            floor_count: inventory.floors.len(),
            container_count: 0,
            unassigned_containers: 0,
            assigned_containers: 0,
            numbered_containers: 0,
            inactive_containers: 0,
            room_types: inventory
                .room_types
                .iter()
                .map(|t| RoomTypeStock {
                    room_info: t.room_info.clone(),
                    stock: t.stock,
                    price: t.price,
                })
                .collect(),
        };

        for (_, container) in inventory.containers() {
            summary.container_count += 1;
            match container.state() {
                ContainerState::Unassigned => summary.unassigned_containers += 1,
                ContainerState::Assigned => summary.assigned_containers += 1,
                ContainerState::Numbered => summary.numbered_containers += 1,
            }
            if container.is_numbered() && !container.is_active {
                summary.inactive_containers += 1;
            }
        }

        summary
    }

    /// Stock of a room type by exact stored name
    pub fn stock_of(&self, room_info: &str) -> Option<usize> {
        self.room_types.iter().find(|t| t.room_info == room_info).map(|t| t.stock)
    }
}

impl fmt::Display for InventorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total rooms: {}", self.total_rooms)?;
        writeln!(
            f,
            "Floors: {}, containers: {} ({} numbered, {} assigned, {} unassigned, {} inactive)",
            self.floor_count,
            self.container_count,
            self.numbered_containers,
            self.assigned_containers,
            self.unassigned_containers,
            self.inactive_containers
        )?;
        for room_type in &self.room_types {
            writeln!(f, "  {:<16} stock {:>3}  @ {:.2}", room_type.room_info, room_type.stock, room_type.price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Container, Floor, RoomType};

    fn sample() -> Inventory {
        let mut inactive = Container::new(3, "standard", "303", 100.0);
        inactive.is_active = false;
        Inventory::new(
            vec![
                RoomType::new("standard", 100.0).with_room_numbers(["301", "302"]),
                RoomType::new("suite", 320.0),
            ],
            vec![
                Floor::new(2),
                Floor::with_containers(
                    3,
                    vec![
                        Container::new(3, "standard", "301", 100.0),
                        Container::new(3, "standard", "302", 100.0),
                        inactive,
                        Container::new(3, "suite", "", 320.0),
                        Container::unassigned(3),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_summary_counts() {
        let summary = InventorySummary::from_inventory(&sample());
        assert_eq!(summary.total_rooms, 2);
        assert_eq!(summary.floor_count, 2);
        assert_eq!(summary.container_count, 5);
        assert_eq!(summary.numbered_containers, 3);
        assert_eq!(summary.assigned_containers, 1);
        assert_eq!(summary.unassigned_containers, 1);
        assert_eq!(summary.inactive_containers, 1);
        assert_eq!(summary.stock_of("standard"), Some(2));
        assert_eq!(summary.stock_of("suite"), Some(0));
        assert_eq!(summary.stock_of("penthouse"), None);
    }

    #[test]
    fn test_summary_display_and_serialization() {
        let summary = InventorySummary::from_inventory(&sample());
        let text = summary.to_string();
        assert!(text.starts_with("Total rooms: 2"));
        assert!(text.contains("standard"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalRooms"], 2);
        assert_eq!(json["roomTypes"][1]["roomInfo"], "suite");
    }
}
